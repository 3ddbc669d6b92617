//! Search configuration for the path finder.

use chrono::Duration;

/// Configuration parameters for shortest-path search.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Wait applied when a path breaks continuity at a stop: boarding a
    /// different line, switching transport mode, or stepping off a walk
    /// onto transport (seconds).
    pub transfer_penalty_secs: u32,
}

impl SearchConfig {
    /// Create a configuration with the given transfer penalty.
    pub fn new(transfer_penalty_secs: u32) -> Self {
        Self {
            transfer_penalty_secs,
        }
    }

    /// Returns the transfer penalty as a Duration.
    pub fn transfer_penalty(&self) -> Duration {
        Duration::seconds(i64::from(self.transfer_penalty_secs))
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            transfer_penalty_secs: 600, // 10 minutes
        }
    }
}
