//! Per-tick output structure for terminal display

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::{GuardAction, GuardState};

/// What one tick of the engine produced
#[derive(Debug, Clone, Serialize)]
pub struct TickOutput {
    /// Wall-clock time the tick was evaluated at
    pub timestamp: DateTime<Utc>,
    /// Was any detect-set name live this tick?
    pub detected: bool,
    /// Engine state after the tick
    pub state: GuardState,
    /// Seconds until the cooldown expires, if one is active
    pub cooldown_remaining_secs: Option<i64>,
    /// Side-effect requests for the driver to execute
    #[serde(skip)]
    pub actions: Vec<GuardAction>,
}

impl TickOutput {
    /// Create new output
    pub fn new(
        timestamp: DateTime<Utc>,
        detected: bool,
        state: GuardState,
        cooldown_remaining_secs: Option<i64>,
        actions: Vec<GuardAction>,
    ) -> Self {
        Self {
            timestamp,
            detected,
            state,
            cooldown_remaining_secs,
            actions,
        }
    }

    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        let color = self.state.color_code();
        let reset = GuardState::color_reset();

        format!(
            "{}detected={} | state={} | cooldown={}{}",
            color,
            self.detected,
            self.state,
            self.cooldown_display(),
            reset
        )
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "detected={} | state={} | cooldown={}",
            self.detected,
            self.state,
            self.cooldown_display()
        )
    }

    fn cooldown_display(&self) -> String {
        match self.cooldown_remaining_secs {
            Some(secs) => format!("{}s", secs),
            None => "-".to_string(),
        }
    }
}
