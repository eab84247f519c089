//! Core types for TiltGuard

mod decision;
mod event;
mod output;
mod snapshot;
mod state;
mod targets;

pub use decision::{Decision, GuardAction, PromptContext};
pub use event::GuardEvent;
pub use output::TickOutput;
pub use snapshot::{ProcessRecord, ProcessSnapshot};
pub use state::GuardState;
pub use targets::TargetSet;
