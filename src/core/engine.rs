//! Guard Engine: the detection / delay / enforcement state machine
//!
//! Transition rules, evaluated in fixed order every tick:
//! 1. Compute detected_now from the snapshot
//! 2. Rising edge: kill + notice if a cooldown is running, otherwise prompt
//! 3. Falling edge: log that the client closed
//! 4. Steady-state sweep while a cooldown is running (expiry check first)
//! 5. detected_before = detected_now, exactly once
//!
//! The engine owns the only mutable decision state in the system (cooldown
//! expiry, notice throttle, last-detected flag) and performs no I/O: every
//! tick returns side-effect requests for the driver to execute.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};

use crate::types::{
    Decision, GuardAction, GuardEvent, GuardState, ProcessSnapshot, PromptContext, TargetSet,
    TickOutput,
};
use crate::NOTICE_THROTTLE_SECS;

/// The enforcement state machine
#[derive(Debug)]
pub struct GuardEngine {
    /// What to detect and what to terminate
    targets: TargetSet,
    /// Cooldown length offered by the prompt (minutes)
    cooldown_minutes: i64,
    /// Detection value of the previous tick
    detected_before: bool,
    /// Active cooldown expiry, if any (in-memory only, lost on restart)
    cooldown_expires: Option<DateTime<Utc>>,
    /// When the last throttled notice was shown; advances monotonically
    last_notice: Option<DateTime<Utc>>,
    /// A prompt is open and the engine is suspended until `resolve`
    awaiting_decision: bool,
    /// Number of ticks evaluated
    tick_count: u64,
}

impl GuardEngine {
    /// Create a new engine around a target set
    pub fn new(targets: TargetSet, cooldown_minutes: i64) -> Self {
        Self {
            targets,
            cooldown_minutes,
            detected_before: false,
            cooldown_expires: None,
            last_notice: None,
            awaiting_decision: false,
            tick_count: 0,
        }
    }

    /// Evaluate one tick against a process snapshot at wall-clock `now`.
    ///
    /// May return a `RequestDecision` action, in which case the engine is
    /// suspended: the driver must obtain a decision and call [`resolve`]
    /// before the next tick does anything edge-triggered.
    ///
    /// [`resolve`]: GuardEngine::resolve
    pub fn tick(&mut self, snapshot: &ProcessSnapshot, now: DateTime<Utc>) -> TickOutput {
        self.tick_count += 1;
        let mut actions: Vec<GuardAction> = Vec::new();
        // Pids already targeted this tick; the rising-edge kill and the sweep
        // are independent idempotent checks, so a second request for the same
        // pid in one tick would only be wasted work
        let mut requested: HashSet<u32> = HashSet::new();

        // 1. Detection
        let detected_now = snapshot
            .matches_where(|n| self.targets.detects(n))
            .next()
            .is_some();

        // 2. Rising edge: a launch attempt is observed
        if detected_now && !self.detected_before && !self.awaiting_decision {
            match self.cooldown_expires {
                Some(expires) if now < expires => {
                    // Violation attempt - kill immediately, never prompt
                    self.request_block_kills(snapshot, &mut requested, &mut actions);
                    actions.push(GuardAction::Log(GuardEvent::BlockedDuringDelay));
                    if self.notice_due(now) {
                        let minutes = remaining_whole_minutes(expires, now);
                        actions.push(GuardAction::Notice(format!(
                            "Cooldown active - {} minute(s) remaining",
                            minutes
                        )));
                        self.last_notice = Some(now);
                    }
                }
                _ => {
                    // No cooldown, or one that expired but is not yet cleared
                    let trigger = snapshot
                        .matches_where(|n| self.targets.detects(n))
                        .next()
                        .map(|r| r.name.clone())
                        .unwrap_or_default();
                    actions.push(GuardAction::Log(GuardEvent::Detected {
                        name: trigger.clone(),
                    }));
                    self.awaiting_decision = true;
                    actions.push(GuardAction::RequestDecision(PromptContext {
                        trigger,
                        cooldown_minutes: self.cooldown_minutes,
                    }));
                }
            }
        }

        // 3. Falling edge: detection cleared
        if !detected_now && self.detected_before {
            actions.push(GuardAction::Log(GuardEvent::Closed));
        }

        // 4. Steady-state sweep, independent of edges. The expiry check runs
        //    before any block action this tick.
        let mut expired_this_tick = false;
        if let Some(expires) = self.cooldown_expires {
            if now >= expires {
                self.cooldown_expires = None;
                expired_this_tick = true;
                actions.push(GuardAction::Log(GuardEvent::DelayFinished));
            } else {
                // Safety net: catches processes that started mid-cooldown
                // without producing a rising edge, or survived a first kill
                self.request_block_kills(snapshot, &mut requested, &mut actions);
            }
        }

        // 5. Persist detection for the next tick
        self.detected_before = detected_now;

        let state = if expired_this_tick && !self.awaiting_decision {
            GuardState::CooldownExpiring
        } else {
            self.state()
        };
        let remaining = self
            .cooldown_expires
            .map(|e| e.signed_duration_since(now).num_seconds().max(0));
        TickOutput::new(now, detected_now, state, remaining, actions)
    }

    /// Resume a tick suspended on `RequestDecision` with the user's answer.
    ///
    /// `Delay` always sets the expiry to exactly `now` plus the configured
    /// cooldown, regardless of any prior cooldown state.
    pub fn resolve(&mut self, decision: Decision, now: DateTime<Utc>) -> Vec<GuardAction> {
        self.awaiting_decision = false;
        match decision {
            Decision::Delay => {
                self.cooldown_expires = Some(now + Duration::minutes(self.cooldown_minutes));
                vec![GuardAction::Log(GuardEvent::ChoseDelay {
                    minutes: self.cooldown_minutes,
                })]
            }
            Decision::Proceed => {
                vec![GuardAction::Log(GuardEvent::ChoseProceed)]
            }
        }
    }

    fn request_block_kills(
        &self,
        snapshot: &ProcessSnapshot,
        requested: &mut HashSet<u32>,
        actions: &mut Vec<GuardAction>,
    ) {
        for rec in snapshot.matches_where(|n| self.targets.blocks(n)) {
            if requested.insert(rec.pid) {
                actions.push(GuardAction::KillTree(rec.pid));
            }
        }
    }

    fn notice_due(&self, now: DateTime<Utc>) -> bool {
        match self.last_notice {
            Some(last) => now.signed_duration_since(last).num_seconds() >= NOTICE_THROTTLE_SECS,
            None => true,
        }
    }

    /// Get current state
    pub fn state(&self) -> GuardState {
        if self.awaiting_decision {
            GuardState::AwaitingDecision
        } else if self.cooldown_expires.is_some() {
            GuardState::CooldownActive
        } else {
            GuardState::Idle
        }
    }

    /// Detection value of the previous tick
    pub fn detected_before(&self) -> bool {
        self.detected_before
    }

    /// Active cooldown expiry, if any
    pub fn cooldown_expires(&self) -> Option<DateTime<Utc>> {
        self.cooldown_expires
    }

    /// Get tick count
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Target set the engine was built with
    pub fn targets(&self) -> &TargetSet {
        &self.targets
    }
}

/// Whole minutes left in the cooldown, floored, never reported below 1
fn remaining_whole_minutes(expires: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let secs = expires.signed_duration_since(now).num_seconds();
    (secs / 60).max(1)
}

// =============================================================================
// TESTS
// =============================================================================
