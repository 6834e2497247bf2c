//! Character-window post-processing for generated descriptions.
//!
//! All lengths are counted in Unicode scalar values.

use super::DescriptionError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Words that cannot end a sentence in a finished description.
const DANGLING_WORDS: &[&str] = &[
    // articles
    "a", "an", "the",
    // conjunctions
    "and", "or", "but", "nor", "so", "yet", "as", "while", "because", "that", "which",
    // prepositions
    "for", "of", "to", "in", "on", "at", "by", "with", "from", "into", "onto", "about",
    "through", "over", "under", "between", "like", "than", "without", "within", "across",
];

/// Trailing characters removed before a period is appended.
const TRAILING_SEPARATORS: &[char] = &[',', ';', ':', '-', '–', '—', '(', '/', '&'];

const OPENING_QUOTES: &[char] = &['"', '“', '\''];
const CLOSING_QUOTES: &[char] = &['"', '”', '\''];
const CLOSERS: &[char] = &['"', '”', '\'', '’', ')'];

/// Sentences appended to short text, cycled in order.
const PAD_SENTENCES: &[&str] = &[
    "Every detail rewards a closer listen.",
    "It lingers long after the final note fades.",
    "Fans old and new will find plenty to return to here.",
    "The result feels honest and fully realized.",
    "It marks a confident step forward.",
];

/// Inclusive `[min, max]` character window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LengthWindow {
    pub min: usize,
    pub max: usize,
}

impl Default for LengthWindow {
    fn default() -> Self {
        Self { min: 490, max: 500 }
    }
}

impl LengthWindow {
    pub fn new(min: usize, max: usize) -> Result<Self, DescriptionError> {
        if min == 0 {
            return Err(DescriptionError::InvalidInput(
                "Minimum length must be greater than zero".to_string(),
            ));
        }
        if min > max {
            return Err(DescriptionError::InvalidInput(format!(
                "Minimum length {} is greater than maximum length {}",
                min, max
            )));
        }
        Ok(Self { min, max })
    }

    pub fn contains(&self, length: usize) -> bool {
        (self.min..=self.max).contains(&length)
    }
}

impl fmt::Display for LengthWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// What to do with an attempt that is shorter than the window.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShortTextPolicy {
    /// Fail the attempt and ask the model to elaborate on the next one.
    #[default]
    Elaborate,
    /// Append connective sentences until the minimum is met.
    Pad,
    /// Fail the attempt without feedback.
    Reject,
}

/// Why an attempt could not be fitted into the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FitError {
    Empty,
    TooShort { length: usize },
}

impl fmt::Display for FitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FitError::Empty => write!(f, "empty output"),
            FitError::TooShort { length } => write!(f, "too short ({} characters)", length),
        }
    }
}

/// Post-process raw model output into the window.
///
/// Text over the maximum is always cut back into the window. Text under the
/// minimum is padded or rejected depending on `policy`.
pub fn fit(raw: &str, window: LengthWindow, policy: ShortTextPolicy) -> Result<String, FitError> {
    let text = prepare(raw, window);
    if text.is_empty() {
        return Err(FitError::Empty);
    }

    let length = char_len(&text);
    if length < window.min {
        return match policy {
            ShortTextPolicy::Pad => Ok(pad(text, window)),
            ShortTextPolicy::Elaborate | ShortTextPolicy::Reject => {
                Err(FitError::TooShort { length })
            }
        };
    }

    Ok(shorten(text, window))
}

/// Force any text into the window, padding or cutting as needed. Never fails.
pub fn force(text: &str, window: LengthWindow) -> String {
    let text = prepare(text, window);
    if char_len(&text) < window.min {
        pad(text, window)
    } else {
        shorten(text, window)
    }
}

/// Length in characters of `raw` once whitespace and wrapping quotes are cleaned up.
pub fn cleaned_length(raw: &str) -> usize {
    char_len(&clean(raw))
}

pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}

fn clean(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    strip_wrapping_quotes(&collapsed).trim().to_string()
}

/// Clean up and drop dangling tails. An over-long text whose stripped form
/// would fall under the minimum is kept whole, `shorten` terminates it.
fn prepare(raw: &str, window: LengthWindow) -> String {
    let text = clean(raw);
    let stripped = strip_dangling(&text);
    if char_len(&stripped) >= window.min || char_len(&text) <= window.max {
        stripped
    } else {
        text
    }
}

fn strip_wrapping_quotes(text: &str) -> &str {
    let mut chars = text.chars();
    match (chars.next(), chars.next_back()) {
        (Some(first), Some(last))
            if OPENING_QUOTES.contains(&first) && CLOSING_QUOTES.contains(&last) =>
        {
            &text[first.len_utf8()..text.len() - last.len_utf8()]
        }
        _ => text,
    }
}

/// Char offsets just past each sentence end (`.`, `!` or `?` followed by
/// whitespace, the end of text, or a closing quote).
fn sentence_ends(chars: &[char]) -> Vec<usize> {
    let mut ends = Vec::new();
    for (i, c) in chars.iter().enumerate() {
        if !matches!(c, '.' | '!' | '?') {
            continue;
        }
        match chars.get(i + 1) {
            None => ends.push(i + 1),
            Some(next) if next.is_whitespace() => ends.push(i + 1),
            Some(next) if CLOSERS.contains(next) => {
                if chars.get(i + 2).map_or(true, |c| c.is_whitespace()) {
                    ends.push(i + 2);
                }
            }
            _ => {}
        }
    }
    ends
}

fn ends_with_terminal(text: &str) -> bool {
    let chars: Vec<char> = text.chars().collect();
    sentence_ends(&chars).last() == Some(&chars.len())
}

fn is_dangling_word(word: &str) -> bool {
    let bare: String = word
        .trim_matches(|c: char| !c.is_alphanumeric())
        .to_lowercase();
    DANGLING_WORDS.contains(&bare.as_str())
}

/// Drop an unterminated trailing fragment, then any final sentences whose
/// last word is dangling (e.g. a trailing "Perfect for.").
fn strip_dangling(text: &str) -> String {
    let mut chars: Vec<char> = text.chars().collect();

    match sentence_ends(&chars).last() {
        Some(&end) if end < chars.len() => chars.truncate(end),
        Some(_) => {}
        // A single fragment with no sentence end at all
        None => return finish_fragment(text).unwrap_or_default(),
    }

    loop {
        let ends = sentence_ends(&chars);
        if ends.len() < 2 {
            break;
        }
        let current: String = chars.iter().collect();
        let body = current
            .trim_end_matches(|c: char| matches!(c, '.' | '!' | '?') || CLOSERS.contains(&c));
        let last_word = body.split_whitespace().last().unwrap_or("");
        if !is_dangling_word(last_word) {
            break;
        }
        chars.truncate(ends[ends.len() - 2]);
    }

    chars.iter().collect::<String>().trim_end().to_string()
}

/// Close an unterminated fragment: drop dangling words and separators, then
/// append a period. `None` if nothing usable remains.
fn finish_fragment(fragment: &str) -> Option<String> {
    let mut words: Vec<&str> = fragment.split_whitespace().collect();
    loop {
        let last = words.last()?;
        let stripped = last.trim_end_matches(TRAILING_SEPARATORS);
        if stripped.is_empty() || is_dangling_word(stripped) {
            words.pop();
            continue;
        }
        break;
    }

    let mut joined = words.join(" ");
    let trimmed_len = joined
        .trim_end_matches(|c: char| TRAILING_SEPARATORS.contains(&c) || c.is_whitespace())
        .len();
    joined.truncate(trimmed_len);
    if joined.is_empty() {
        return None;
    }
    if !ends_with_terminal(&joined) {
        joined.push('.');
    }
    Some(joined)
}

/// Cut text longer than `window.max` back into the window.
fn shorten(text: String, window: LengthWindow) -> String {
    let chars: Vec<char> = text.chars().collect();
    if chars.len() <= window.max {
        return text;
    }

    // Sentence boundary that neither exceeds the max nor cuts too deep
    let floor = window.min.max(window.max - window.max / 10);
    if let Some(&end) = sentence_ends(&chars)
        .iter()
        .rev()
        .find(|&&end| end <= window.max && end >= floor)
    {
        return chars[..end].iter().collect();
    }

    // Word boundary within max - 1 chars, leaving room for the period
    let limit = window.max.saturating_sub(1);
    let head: String = chars[..limit].iter().collect();
    if let Some(space) = head.rfind(' ') {
        if let Some(cut) = finish_fragment(&head[..space]) {
            if window.contains(char_len(&cut)) {
                return cut;
            }
        }
    }

    // Hard cut
    let trimmed =
        head.trim_end_matches(|c: char| c.is_whitespace() || TRAILING_SEPARATORS.contains(&c));
    if char_len(trimmed) + 1 >= window.min {
        format!("{}.", trimmed)
    } else {
        format!("{}.", head)
    }
}

/// Append connective sentences until the minimum is met, then cut back if
/// the last sentence overshot.
fn pad(text: String, window: LengthWindow) -> String {
    let mut padded = text;
    let mut pool = PAD_SENTENCES.iter().cycle();
    while char_len(&padded) < window.min {
        let Some(sentence) = pool.next() else {
            break;
        };
        if !padded.is_empty() {
            padded.push(' ');
        }
        padded.push_str(sentence);
    }
    shorten(padded, window)
}
