//! Process discovery mode
//!
//! Scans the whole process table for names containing configured keywords
//! (case-insensitive) and reports each (pid, name) pair once. This is how
//! you find the right executable names to feed the detect/block sets.

use std::collections::HashSet;

use serde::Serialize;

/// One newly discovered matching process
#[derive(Debug, Clone, Serialize)]
pub struct DiscoveredProcess {
    pub pid: u32,
    pub name: String,
    /// Executable path, when the table exposes it
    pub exe: Option<String>,
    /// Joined command line, when the table exposes it
    pub cmd: Option<String>,
}

/// Stateful scanner that deduplicates across polls
#[derive(Debug)]
pub struct DiscoverScanner {
    keywords: Vec<String>,
    seen: HashSet<(u32, String)>,
}

impl DiscoverScanner {
    /// Keywords are lowercased once up front
    pub fn new<I: IntoIterator<Item = String>>(keywords: I) -> Self {
        Self {
            keywords: keywords.into_iter().map(|k| k.to_lowercase()).collect(),
            seen: HashSet::new(),
        }
    }

    /// Feed one process table entry. Returns the record the first time a
    /// matching (pid, name) pair is observed, `None` otherwise.
    pub fn observe(
        &mut self,
        pid: u32,
        name: &str,
        exe: Option<&str>,
        cmd: Option<&str>,
    ) -> Option<DiscoveredProcess> {
        let lowered = name.to_lowercase();
        if !self.keywords.iter().any(|k| lowered.contains(k)) {
            return None;
        }
        if !self.seen.insert((pid, name.to_string())) {
            return None;
        }
        Some(DiscoveredProcess {
            pid,
            name: name.to_string(),
            exe: exe.map(|s| s.to_string()),
            cmd: cmd.map(|s| s.to_string()),
        })
    }

    /// How many distinct matches were reported so far
    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }
}

// =============================================================================
// TESTS
// =============================================================================
