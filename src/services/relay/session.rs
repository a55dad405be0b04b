//! Per-stream progress accounting

use crate::types::ProgressSnapshot;
use std::time::{Duration, Instant};

/// Floor for elapsed time so the first chunk never divides by zero.
const MIN_ELAPSED_SECS: f64 = 0.001;

/// Session-local counters for one relay invocation.
///
/// Token counts are a display estimate derived from emitted characters
/// (`floor(chars / chars_per_token)`), not real tokenizer output.
pub struct RelaySession {
    started: Instant,
    chars_emitted: u64,
    chars_per_token: u32,
    max_tokens: u32,
}

impl RelaySession {
    pub fn new(chars_per_token: u32, max_tokens: u32) -> Self {
        Self {
            started: Instant::now(),
            chars_emitted: 0,
            chars_per_token: chars_per_token.max(1),
            max_tokens,
        }
    }

    /// Account for one emitted chunk and return the updated estimate.
    pub fn record(&mut self, text: &str) -> ProgressSnapshot {
        self.chars_emitted += text.chars().count() as u64;
        self.snapshot_at(self.started.elapsed())
    }

    fn snapshot_at(&self, elapsed: Duration) -> ProgressSnapshot {
        let tokens_emitted = (self.chars_emitted / self.chars_per_token as u64) as u32;
        let elapsed_secs = elapsed.as_secs_f64().max(MIN_ELAPSED_SECS);
        let tokens_per_sec = tokens_emitted as f64 / elapsed_secs;
        let remaining = self.max_tokens.saturating_sub(tokens_emitted);
        let eta_seconds = if tokens_per_sec > 0.0 {
            Some((remaining as f64 / tokens_per_sec).ceil() as u64)
        } else {
            None
        };

        ProgressSnapshot {
            tokens_emitted,
            max_tokens: self.max_tokens,
            tokens_per_sec,
            eta_seconds,
        }
    }
}
