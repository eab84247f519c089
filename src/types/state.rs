//! Guard state definitions

use serde::{Deserialize, Serialize};

/// The four possible states of the enforcement engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GuardState {
    /// Nothing detected, no cooldown running
    Idle,
    /// A launch was observed and the interruption prompt is open
    AwaitingDecision,
    /// A cooldown is running, launches are suppressed
    CooldownActive,
    /// Momentary: the expiry check at the top of a cooldown tick
    CooldownExpiring,
}

impl GuardState {
    /// Get ANSI color code for terminal display
    pub fn color_code(&self) -> &'static str {
        match self {
            GuardState::Idle => "\x1b[90m",             // Gray
            GuardState::AwaitingDecision => "\x1b[33m", // Yellow
            GuardState::CooldownActive => "\x1b[31m",   // Red
            GuardState::CooldownExpiring => "\x1b[32m", // Green
        }
    }

    /// Reset ANSI color
    pub fn color_reset() -> &'static str {
        "\x1b[0m"
    }
}

impl std::fmt::Display for GuardState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            GuardState::Idle => "IDLE",
            GuardState::AwaitingDecision => "AWAITING_DECISION",
            GuardState::CooldownActive => "COOLDOWN_ACTIVE",
            GuardState::CooldownExpiring => "COOLDOWN_EXPIRING",
        };
        write!(f, "{}", name)
    }
}
