//! Tap tempo.
//!
//! Taps are millisecond timestamps. A pause longer than [`MAX_TAP_GAP_MS`]
//! starts a new sequence, and the tempo is averaged over the most recent
//! [`RECENT_TAPS`] taps only.

use super::ToolError;

pub const MAX_TAP_GAP_MS: u64 = 2000;
pub const RECENT_TAPS: usize = 8;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TapTempo {
    taps: Vec<u64>,
}

impl TapTempo {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a tap and return the current tempo, if any.
    pub fn tap(&mut self, at_ms: u64) -> Result<Option<u32>, ToolError> {
        if let Some(&last) = self.taps.last() {
            if at_ms < last {
                return Err(ToolError::UnorderedTaps);
            }
            if at_ms - last > MAX_TAP_GAP_MS {
                self.taps.clear();
            }
        }
        self.taps.push(at_ms);
        Ok(self.bpm())
    }

    pub fn bpm(&self) -> Option<u32> {
        let recent = self.taps.len().saturating_sub(RECENT_TAPS);
        average_bpm(&self.taps[recent..])
    }

    /// Every tap in the current sequence.
    pub fn taps(&self) -> &[u64] {
        &self.taps
    }

    pub fn reset(&mut self) {
        self.taps.clear();
    }
}

/// Replay a list of taps and return the resulting tempo together with the
/// number of taps in the current sequence.
pub fn bpm_from_taps(taps: &[u64]) -> Result<(Option<u32>, usize), ToolError> {
    let mut tempo = TapTempo::new();
    for &tap in taps {
        tempo.tap(tap)?;
    }
    Ok((tempo.bpm(), tempo.taps().len()))
}

fn average_bpm(taps: &[u64]) -> Option<u32> {
    if taps.len() < 2 {
        return None;
    }
    let span = taps[taps.len() - 1] - taps[0];
    if span == 0 {
        return None;
    }
    let average_interval = span as f64 / (taps.len() - 1) as f64;
    Some((60_000.0 / average_interval).round() as u32)
}
