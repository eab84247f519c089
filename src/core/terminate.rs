//! Process-tree termination
//!
//! Descendants are enumerated first over the snapshot's children map with an
//! explicit worklist, then killed deepest-first, the root last. Every kill
//! attempt is independent: a process that already exited or that we lack the
//! privilege to touch is skipped, and only the aggregate count of successful
//! terminations is reported.

use std::collections::HashSet;

use tracing::debug;

use crate::core::ProcessSource;
use crate::types::ProcessSnapshot;

/// Terminate `root` and all of its descendants.
///
/// Returns how many processes were actually terminated. Safe to call when the
/// root (or any part of the tree) is already gone: that is a zero count, not
/// an error.
pub fn terminate_tree<S: ProcessSource + ?Sized>(
    source: &mut S,
    snapshot: &ProcessSnapshot,
    root: u32,
) -> usize {
    // Worklist traversal; the seen set guards against stale parent links
    // forming a cycle in the snapshot
    let mut descendants: Vec<u32> = Vec::new();
    let mut seen: HashSet<u32> = HashSet::new();
    seen.insert(root);
    let mut stack = vec![root];
    while let Some(pid) = stack.pop() {
        for &child in snapshot.children_of(pid) {
            if seen.insert(child) {
                descendants.push(child);
                stack.push(child);
            }
        }
    }

    let mut count = 0;
    for &pid in descendants.iter().rev() {
        if source.kill(pid) {
            count += 1;
        } else {
            debug!(pid, "descendant vanished or kill denied, skipping");
        }
    }
    if source.kill(root) {
        count += 1;
    } else {
        debug!(pid = root, "root vanished or kill denied");
    }
    count
}

// =============================================================================
// TESTS
// =============================================================================
