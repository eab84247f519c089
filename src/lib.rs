//! TiltGuard: detection / delay / enforcement guard for the League client
//!
//! Watches the process table, interposes a decision point on launch, and
//! enforces a self-imposed cooldown by terminating process trees.

pub mod core;
pub mod types;

// =============================================================================
// TIMING [C]
// =============================================================================

/// Cooldown committed to when the user chooses DELAY (minutes)
pub const COOLDOWN_MINUTES: i64 = 15;

/// Poll interval for the enforcement loop (milliseconds)
/// Short interval - blocking has to react before the client finishes booting
pub const POLL_INTERVAL_MS: u64 = 250;

/// Minimum gap between "cooldown active" notices (seconds)
pub const NOTICE_THROTTLE_SECS: i64 = 10;

// =============================================================================
// TARGETS [C] - Windows executable names of the client and its launcher
// =============================================================================

/// Names whose presence signals a launch attempt
pub const DEFAULT_DETECT_NAMES: &[&str] = &["LeagueClient.exe", "RiotClientServices.exe"];

/// Names terminated during an active cooldown
pub const DEFAULT_BLOCK_NAMES: &[&str] = &["LeagueClient.exe", "RiotClientServices.exe"];

/// Substrings matched (case-insensitive) by discovery mode
pub const DISCOVER_KEYWORDS: &[&str] = &["riot", "league"];

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";
