//! Process snapshot types
//!
//! A snapshot is one observation of the process table: the records matching
//! the target set, plus a pid -> children map for the whole table so tree
//! termination can walk grandchildren without re-enumerating.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// One matching process at snapshot time
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessRecord {
    /// Process ID
    pub pid: u32,
    /// Executable name, e.g. "LeagueClient.exe"
    pub name: String,
    /// Direct child pids at snapshot time
    pub children: Vec<u32>,
}

/// One observation of the process table
#[derive(Debug, Clone, Default)]
pub struct ProcessSnapshot {
    /// Processes whose name matched the detect set
    pub matches: Vec<ProcessRecord>,
    /// Direct children of every live pid (not just matches)
    pub children: HashMap<u32, Vec<u32>>,
}

impl ProcessSnapshot {
    /// Snapshot with no matches and an empty table
    pub fn empty() -> Self {
        Self::default()
    }

    /// Matched records whose name satisfies the predicate
    pub fn matches_where<'a, F>(&'a self, pred: F) -> impl Iterator<Item = &'a ProcessRecord>
    where
        F: Fn(&str) -> bool + 'a,
    {
        self.matches.iter().filter(move |r| pred(&r.name))
    }

    /// Direct children of a pid; empty if unknown or already gone
    pub fn children_of(&self, pid: u32) -> &[u32] {
        self.children.get(&pid).map(Vec::as_slice).unwrap_or(&[])
    }
}
