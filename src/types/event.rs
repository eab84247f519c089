//! Event codes for everything the guard writes to its log

use serde::{Deserialize, Serialize};

/// Events appended to the event log.
///
/// The log line text is stable: other tooling greps for these strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", tag = "kind", content = "detail")]
pub enum GuardEvent {
    /// Rising edge outside a cooldown
    Detected { name: String },
    /// Falling edge: the client went away
    Closed,
    /// Rising edge during an active cooldown; kills were requested
    BlockedDuringDelay,
    /// User committed to the cooldown
    ChoseDelay { minutes: i64 },
    /// User chose to play now (or dismissed the prompt)
    ChoseProceed,
    /// Cooldown reached its expiry and was cleared
    DelayFinished,
    /// A kill sweep finished; how many processes went down
    SweepTerminated { count: usize },
    /// The guard is shutting down
    Shutdown,
}

impl GuardEvent {
    /// Get the code string (for diagnostics)
    pub fn code(&self) -> &'static str {
        match self {
            Self::Detected { .. } => "E100_DETECTED",
            Self::Closed => "E101_CLOSED",
            Self::BlockedDuringDelay => "E200_BLOCKED_DURING_DELAY",
            Self::ChoseDelay { .. } => "E201_CHOSE_DELAY",
            Self::ChoseProceed => "E202_CHOSE_PROCEED",
            Self::DelayFinished => "E203_DELAY_FINISHED",
            Self::SweepTerminated { .. } => "E204_SWEEP_TERMINATED",
            Self::Shutdown => "E300_SHUTDOWN",
        }
    }

    /// Get the human-readable log line text
    pub fn message(&self) -> String {
        match self {
            Self::Detected { name } => format!("Target detected running ({})", name),
            Self::Closed => "Target closed".to_string(),
            Self::BlockedDuringDelay => "Blocked launch during delay".to_string(),
            Self::ChoseDelay { minutes } => format!("User chose DELAY {} minutes", minutes),
            Self::ChoseProceed => "User chose PLAY anyway".to_string(),
            Self::DelayFinished => "Delay finished".to_string(),
            Self::SweepTerminated { count } => format!("Terminated {} process(es)", count),
            Self::Shutdown => "Guard stopped".to_string(),
        }
    }
}

impl std::fmt::Display for GuardEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}
