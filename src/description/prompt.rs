//! Prompt construction for the description generator.

use super::synthesis::SongSynthesis;
use super::window::LengthWindow;
use super::SongDetails;

pub const DESCRIPTION_SYSTEM_PROMPT: &str =
    "You write short promotional descriptions of songs for streaming platforms and press kits. \
     You answer with the description text only.";

pub const SYNTHESIS_SYSTEM_PROMPT: &str =
    "You are a senior music journalist. You answer with a single JSON object and nothing else.";

fn or_placeholder<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        placeholder
    } else {
        trimmed
    }
}

/// Prompt asking directly for a description inside `window`.
pub fn build_description_prompt(details: &SongDetails, window: LengthWindow) -> String {
    let mut prompt = format!(
        "Write a captivating description of the song \"{title}\" by {artist}.\n\
         \n\
         Requirements:\n\
         - The description MUST be between {min} and {max} characters long, counting every \
         character including spaces and punctuation.\n\
         - Write a single paragraph that ends with a complete sentence.\n\
         - Do not mention the character count, and add no notes, headings or quotes.\n\
         \n\
         Song details:\n\
         - Genre: {genre}\n\
         - Mood: {mood}\n\
         - Additional information: {info}\n",
        title = details.title.trim(),
        artist = details.artist.trim(),
        min = window.min,
        max = window.max,
        genre = or_placeholder(&details.genre, "Not specified"),
        mood = or_placeholder(&details.mood, "Not specified"),
        info = or_placeholder(&details.additional_info, "None provided"),
    );

    if !details.inspiration.trim().is_empty() {
        prompt.push_str(&format!("- Inspiration: {}\n", details.inspiration.trim()));
    }
    if !details.previous_work.trim().is_empty() {
        prompt.push_str(&format!(
            "- Previous work: {}\n",
            details.previous_work.trim()
        ));
    }

    prompt.push_str(
        "\nFocus on the sound, the emotion and what makes the song distinctive. \
         Count your characters carefully before answering.",
    );
    prompt
}

/// Prompt asking the model to interpret the raw song fields as JSON.
pub fn build_synthesis_prompt(details: &SongDetails) -> String {
    format!(
        "Analyze the raw notes below about a new song and extract its story, themes and \
         marketing angles. Do NOT write a description. Answer with one JSON object with the \
         keys \"primaryTheme\", \"secondaryTheme\", \"uniqueAngle\", \"artistJourney\", \
         \"moodAndGenre\" and \"playlistKeywords\".\n\
         \n\
         Interpret the artist's raw words as professional concepts. For example an inspiration \
         of \"overdose and second chance\" becomes \"redemption, gratitude and celebrating \
         life\", and a mood of \"happy\" becomes \"uplifting and feel-good\".\n\
         \n\
         Raw notes:\n\
         - Song title: \"{title}\"\n\
         - Artist: \"{artist}\"\n\
         - Genre: \"{genre}\"\n\
         - Mood: \"{mood}\"\n\
         - Inspiration: \"{inspiration}\"\n\
         - Previous work: \"{previous}\"\n\
         - Additional info: \"{info}\"\n",
        title = details.title.trim(),
        artist = details.artist.trim(),
        genre = details.genre.trim(),
        mood = details.mood.trim(),
        inspiration = details.inspiration.trim(),
        previous = details.previous_work.trim(),
        info = details.additional_info.trim(),
    )
}

/// Copywriting prompt built only from the journalist's synthesis.
pub fn build_copywriting_prompt(
    details: &SongDetails,
    synthesis: &SongSynthesis,
    window: LengthWindow,
) -> String {
    format!(
        "You are a copywriter on a streaming service's editorial team. Using the analysis \
         below, write a compelling and professional description of \"{title}\" by {artist}.\n\
         \n\
         Rules:\n\
         - The description MUST be between {min} and {max} characters long.\n\
         - Use a sophisticated, engaging tone and a single paragraph.\n\
         - Build the story from the analysis only.\n\
         \n\
         Analysis:\n\
         - Primary theme: {primary}\n\
         - Secondary theme: {secondary}\n\
         - Unique angle: {angle}\n\
         - Artist's journey: {journey}\n\
         - Mood and genre: {mood_genre}\n\
         - Playlist keywords: {keywords}\n",
        title = details.title.trim(),
        artist = details.artist.trim(),
        min = window.min,
        max = window.max,
        primary = synthesis.primary_theme,
        secondary = or_placeholder(&synthesis.secondary_theme, "-"),
        angle = synthesis.unique_angle,
        journey = or_placeholder(&synthesis.artist_journey, "-"),
        mood_genre = or_placeholder(&synthesis.mood_and_genre, "-"),
        keywords = or_placeholder(&synthesis.playlist_keywords, "-"),
    )
}

/// Feedback appended to the prompt after an attempt came back too short.
///
/// Over-long answers are cut into the window instead of retried.
pub fn length_feedback(previous_length: usize, window: LengthWindow) -> String {
    format!(
        "\nIMPORTANT: your previous attempt was {} characters long, which is below the \
         required range. You MUST write between {} and {} characters. Elaborate on the sound \
         and the story to make it longer.",
        previous_length, window.min, window.max
    )
}
