//! Core modules for TiltGuard

pub mod discover;
pub mod driver;
pub mod engine;
pub mod eventlog;
pub mod prompt;
pub mod source;
pub mod terminate;

pub use discover::{DiscoveredProcess, DiscoverScanner};
pub use driver::{run_loop, DriverConfig};
pub use engine::GuardEngine;
pub use eventlog::{EventLog, FileEventLog, MemoryEventLog};
pub use prompt::{DecisionPrompt, NoticeSink, TerminalNotice, TerminalPrompt};
pub use source::{ProcessSource, SysinfoSource};
pub use terminate::terminate_tree;
