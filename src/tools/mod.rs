//! Small calculation tools exposed next to the lookups.

pub mod bpm;
pub mod timecode;

pub use bpm::{bpm_from_taps, TapTempo, MAX_TAP_GAP_MS, RECENT_TAPS};
pub use timecode::to_total_seconds;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ToolError {
    #[error("Seconds must be between 0 and 59, got {0}")]
    SecondsOutOfRange(u32),

    #[error("Total seconds overflow")]
    Overflow,

    #[error("Tap timestamps must not go backwards")]
    UnorderedTaps,
}
