use super::ToolError;

/// `minutes:seconds` to a total number of seconds.
pub fn to_total_seconds(minutes: u32, seconds: u32) -> Result<u32, ToolError> {
    if seconds >= 60 {
        return Err(ToolError::SecondsOutOfRange(seconds));
    }
    minutes
        .checked_mul(60)
        .and_then(|total| total.checked_add(seconds))
        .ok_or(ToolError::Overflow)
}
