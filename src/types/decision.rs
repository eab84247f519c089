//! User decisions and the engine's side-effect requests

use serde::{Deserialize, Serialize};

use crate::types::GuardEvent;

/// Outcome of the interruption prompt.
///
/// There is no third value: dismissing the prompt by any means resolves to
/// `Proceed`. Failing open is the safer default for a friction tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Decision {
    /// Commit to the cooldown
    Delay,
    /// Play now (explicit choice or dismissal)
    Proceed,
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Decision::Delay => write!(f, "DELAY"),
            Decision::Proceed => write!(f, "PROCEED"),
        }
    }
}

/// Context handed to the prompt so it can render a message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptContext {
    /// Name of the process that triggered the rising edge
    pub trigger: String,
    /// Cooldown length offered, in minutes
    pub cooldown_minutes: i64,
}

/// A side-effect the engine requests from its collaborators.
///
/// The engine never touches the process table, the terminal, or the log file
/// itself; each tick returns requests and the driver executes them. That is
/// what keeps the transition function deterministic under test.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardAction {
    /// Terminate this pid and all of its descendants
    KillTree(u32),
    /// Show a non-modal throttled notice
    Notice(String),
    /// Append an event to the log
    Log(GuardEvent),
    /// Open the blocking interruption prompt; the tick is suspended until
    /// the engine is resumed with `resolve`
    RequestDecision(PromptContext),
}
