//! Process snapshot source
//!
//! The engine never reads the process table directly; it consumes snapshots
//! from a [`ProcessSource`]. The production implementation sits on `sysinfo`.
//! A process disappearing between enumeration and an action on it is treated
//! as already-gone, never as an error.

use std::collections::HashMap;

use sysinfo::{Pid, PidExt, ProcessExt, System, SystemExt};
use tracing::trace;

use crate::types::{ProcessRecord, ProcessSnapshot, TargetSet};

/// Where process snapshots and kill capability come from
pub trait ProcessSource {
    /// Observe the current process table against the target set
    fn snapshot(&mut self, targets: &TargetSet) -> ProcessSnapshot;

    /// Attempt to terminate one pid. `false` means the process was already
    /// gone or the kill was denied; the caller decides whether that matters.
    fn kill(&mut self, pid: u32) -> bool;
}

/// Production source over the live process table
pub struct SysinfoSource {
    system: System,
}

impl SysinfoSource {
    pub fn new() -> Self {
        Self {
            system: System::new_all(),
        }
    }
}

impl Default for SysinfoSource {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessSource for SysinfoSource {
    fn snapshot(&mut self, targets: &TargetSet) -> ProcessSnapshot {
        self.system.refresh_processes();

        // Children map for the whole table, so tree termination can walk
        // grandchildren of a match without re-enumerating
        let mut children: HashMap<u32, Vec<u32>> = HashMap::new();
        for (pid, process) in self.system.processes() {
            if let Some(parent) = process.parent() {
                children.entry(parent.as_u32()).or_default().push(pid.as_u32());
            }
        }

        let mut matches: Vec<ProcessRecord> = Vec::new();
        for (pid, process) in self.system.processes() {
            let name = process.name();
            if targets.detects(name) {
                matches.push(ProcessRecord {
                    pid: pid.as_u32(),
                    name: name.to_string(),
                    children: children.get(&pid.as_u32()).cloned().unwrap_or_default(),
                });
            }
        }
        matches.sort_by_key(|r| r.pid);
        trace!(matches = matches.len(), "process table refreshed");

        ProcessSnapshot { matches, children }
    }

    fn kill(&mut self, pid: u32) -> bool {
        match self.system.process(Pid::from_u32(pid)) {
            Some(process) => process.kill(),
            // Already gone between enumeration and action
            None => false,
        }
    }
}
