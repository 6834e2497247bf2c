//! Length-constrained song description generation.
//!
//! A [`DescriptionGenerator`] asks a language model for a description, fits
//! each answer into a character window and retries with feedback. When the
//! retry budget is spent it renders a deterministic fallback template, so a
//! caller with valid input always gets a description back.

mod fallback;
mod generator;
mod prompt;
mod synthesis;
mod window;

pub use fallback::{template_index, FallbackTemplates};
pub use generator::{
    DescriptionGenerator, DescriptionSource, FinalDescription, GenerationAttempt, GenerationMode,
    GenerationStrategy,
};
pub use prompt::{
    build_copywriting_prompt, build_description_prompt, build_synthesis_prompt, length_feedback,
};
pub use synthesis::{parse_synthesis, strip_reasoning, SongSynthesis, SynthesisError};
pub use window::{cleaned_length, fit, force, FitError, LengthWindow, ShortTextPolicy};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Upper bound for the configurable retry budget.
pub const MAX_ATTEMPTS_LIMIT: u32 = 10;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DescriptionError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// What the user tells us about a song.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SongDetails {
    pub title: String,
    pub artist: String,
    pub genre: String,
    pub mood: String,
    pub additional_info: String,
    pub inspiration: String,
    pub previous_work: String,
}

impl SongDetails {
    pub fn validate(&self) -> Result<(), DescriptionError> {
        if self.title.trim().is_empty() || self.artist.trim().is_empty() {
            return Err(DescriptionError::InvalidInput(
                "Song title and artist name are required".to_string(),
            ));
        }
        Ok(())
    }
}
