//! Shared test doubles: a scriptable process table

use std::collections::HashMap;

use tiltguard::core::ProcessSource;
use tiltguard::types::{ProcessRecord, ProcessSnapshot, TargetSet};

/// In-memory process table implementing `ProcessSource`
#[derive(Debug, Default)]
#[allow(dead_code)]
pub struct FakeSource {
    /// pid -> (name, parent)
    table: HashMap<u32, (String, Option<u32>)>,
    /// Every pid successfully killed, in order
    pub killed: Vec<u32>,
}

#[allow(dead_code)]
impl FakeSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn spawn(&mut self, pid: u32, name: &str, parent: Option<u32>) {
        self.table.insert(pid, (name.to_string(), parent));
    }

    /// Process exits outside the guard's control
    pub fn exit(&mut self, pid: u32) {
        self.table.remove(&pid);
    }

    pub fn is_live(&self, pid: u32) -> bool {
        self.table.contains_key(&pid)
    }
}

impl ProcessSource for FakeSource {
    fn snapshot(&mut self, targets: &TargetSet) -> ProcessSnapshot {
        let mut children: HashMap<u32, Vec<u32>> = HashMap::new();
        for (&pid, (_, parent)) in &self.table {
            if let Some(parent) = parent {
                children.entry(*parent).or_default().push(pid);
            }
        }
        let mut matches: Vec<ProcessRecord> = self
            .table
            .iter()
            .filter(|(_, (name, _))| targets.detects(name))
            .map(|(&pid, (name, _))| ProcessRecord {
                pid,
                name: name.clone(),
                children: children.get(&pid).cloned().unwrap_or_default(),
            })
            .collect();
        matches.sort_by_key(|r| r.pid);
        ProcessSnapshot { matches, children }
    }

    fn kill(&mut self, pid: u32) -> bool {
        if self.table.remove(&pid).is_some() {
            self.killed.push(pid);
            true
        } else {
            false
        }
    }
}
