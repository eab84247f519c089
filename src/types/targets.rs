//! Target name sets: what to detect, what to terminate

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::{DEFAULT_BLOCK_NAMES, DEFAULT_DETECT_NAMES};

/// The two process-name sets the guard operates on.
///
/// `detect` names signal a launch attempt; `block` names are what actually
/// gets terminated during a cooldown. Every block name is also a detect name,
/// so nothing is blockable without being detectable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TargetSet {
    /// Names whose presence means the protected application is trying to run
    detect: BTreeSet<String>,
    /// Names terminated while a cooldown is active
    block: BTreeSet<String>,
}

impl Default for TargetSet {
    fn default() -> Self {
        Self::new(
            DEFAULT_DETECT_NAMES.iter().map(|s| s.to_string()),
            DEFAULT_BLOCK_NAMES.iter().map(|s| s.to_string()),
        )
    }
}

impl TargetSet {
    /// Build a target set. Block names are folded into the detect set.
    pub fn new<D, B>(detect: D, block: B) -> Self
    where
        D: IntoIterator<Item = String>,
        B: IntoIterator<Item = String>,
    {
        let mut detect: BTreeSet<String> = detect.into_iter().collect();
        let block: BTreeSet<String> = block.into_iter().collect();
        for name in &block {
            detect.insert(name.clone());
        }
        Self { detect, block }
    }

    /// Does this name signal a launch attempt?
    pub fn detects(&self, name: &str) -> bool {
        self.detect.contains(name)
    }

    /// Must this name be terminated during a cooldown?
    pub fn blocks(&self, name: &str) -> bool {
        self.block.contains(name)
    }

    /// All names the snapshot source should match against
    pub fn detect_names(&self) -> impl Iterator<Item = &str> {
        self.detect.iter().map(|s| s.as_str())
    }

    /// Names in the block set
    pub fn block_names(&self) -> impl Iterator<Item = &str> {
        self.block.iter().map(|s| s.as_str())
    }
}
