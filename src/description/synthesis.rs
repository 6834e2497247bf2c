//! Parsing of the editorial synthesis returned by the model.

use crate::llm::LlmError;
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};
use std::borrow::Cow;
use thiserror::Error;

lazy_static! {
    static ref THINK_BLOCK: Regex = Regex::new(r"(?s)<think>.*?</think>")
        .expect("Failed to compile think block regex");
    static ref JSON_OBJECT: Regex = Regex::new(r"(?s)\{.*\}").expect("Failed to compile JSON object regex");
}

/// Structured reading of a song produced before copywriting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SongSynthesis {
    #[serde(deserialize_with = "text_or_list")]
    pub primary_theme: String,
    #[serde(deserialize_with = "text_or_list")]
    pub secondary_theme: String,
    #[serde(deserialize_with = "text_or_list")]
    pub unique_angle: String,
    #[serde(deserialize_with = "text_or_list")]
    pub artist_journey: String,
    #[serde(deserialize_with = "text_or_list")]
    pub mood_and_genre: String,
    #[serde(deserialize_with = "text_or_list")]
    pub playlist_keywords: String,
}

#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("Synthesis request failed: {0}")]
    Llm(#[from] LlmError),

    #[error("No JSON object found in synthesis response")]
    NoJson,

    #[error("Malformed synthesis JSON: {0}")]
    Malformed(String),

    #[error("Synthesis is missing {0}")]
    MissingField(&'static str),
}

/// Models sometimes return a list where a phrase was asked for.
fn text_or_list<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum TextOrList {
        Text(String),
        List(Vec<String>),
        Other(serde_json::Value),
    }

    Ok(match TextOrList::deserialize(deserializer)? {
        TextOrList::Text(text) => text.trim().to_string(),
        TextOrList::List(items) => items
            .iter()
            .map(|s| s.trim())
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        TextOrList::Other(serde_json::Value::Null) => String::new(),
        TextOrList::Other(value) => value.to_string(),
    })
}

/// Remove `<think>...</think>` reasoning traces that some models put in the answer.
pub fn strip_reasoning(raw: &str) -> Cow<'_, str> {
    THINK_BLOCK.replace_all(raw, "")
}

/// Extract the first `{...}` block of a model response and parse it.
pub fn parse_synthesis(raw: &str) -> Result<SongSynthesis, SynthesisError> {
    let without_reasoning = strip_reasoning(raw);
    let json = JSON_OBJECT
        .find(&without_reasoning)
        .ok_or(SynthesisError::NoJson)?;

    let synthesis: SongSynthesis = serde_json::from_str(json.as_str())
        .map_err(|e| SynthesisError::Malformed(e.to_string()))?;

    if synthesis.primary_theme.is_empty() {
        return Err(SynthesisError::MissingField("primaryTheme"));
    }
    if synthesis.unique_angle.is_empty() {
        return Err(SynthesisError::MissingField("uniqueAngle"));
    }
    Ok(synthesis)
}
