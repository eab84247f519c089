//! Polling driver
//!
//! Fixed-interval loop around the engine: take a snapshot, evaluate one
//! tick, execute the requested side effects. The loop ends when the stop
//! flag is set (the Ctrl+C handler) or when the tick budget is spent, and
//! the shutdown event is appended to the log in every case.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::sleep;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, info};

use crate::core::{
    terminate_tree, DecisionPrompt, EventLog, GuardEngine, NoticeSink, ProcessSource,
};
use crate::types::{GuardAction, GuardEvent, GuardState, TickOutput};

/// How the loop runs and when it ends
#[derive(Debug, Clone)]
pub struct DriverConfig {
    /// Pause between ticks
    pub interval: Duration,
    /// Stop after this many ticks; `None` runs until the stop flag is set
    pub max_ticks: Option<u64>,
}

/// Run the polling loop until the stop flag is set or the tick budget is
/// spent. `on_tick` is called after each tick's side effects with the tick
/// output and the settled engine state, so the caller can render progress.
#[allow(clippy::too_many_arguments)]
pub fn run_loop(
    engine: &mut GuardEngine,
    source: &mut dyn ProcessSource,
    prompt: &mut dyn DecisionPrompt,
    notice: &mut dyn NoticeSink,
    log: &mut dyn EventLog,
    config: &DriverConfig,
    stop: &AtomicBool,
    mut on_tick: impl FnMut(&TickOutput, GuardState),
) {
    let targets = engine.targets().clone();
    let mut ticks = 0u64;
    while !stop.load(Ordering::SeqCst) {
        if let Some(max) = config.max_ticks {
            if ticks >= max {
                break;
            }
        }
        let snapshot = source.snapshot(&targets);
        let now = Utc::now();
        let output = engine.tick(&snapshot, now);
        ticks += 1;

        let mut swept = 0usize;
        for action in &output.actions {
            match action {
                GuardAction::KillTree(pid) => {
                    swept += terminate_tree(source, &snapshot, *pid);
                }
                GuardAction::Notice(message) => notice.show(message),
                GuardAction::Log(event) => {
                    debug!(code = event.code(), "guard event");
                    log.append(now, event);
                }
                GuardAction::RequestDecision(ctx) => {
                    let decision = prompt.ask(ctx);
                    let resumed = Utc::now();
                    for followup in engine.resolve(decision, resumed) {
                        if let GuardAction::Log(event) = followup {
                            debug!(code = event.code(), "guard event");
                            log.append(resumed, &event);
                        }
                    }
                }
            }
        }
        if swept > 0 {
            info!(count = swept, "kill sweep finished");
            log.append(now, &GuardEvent::SweepTerminated { count: swept });
        }

        on_tick(&output, engine.state());

        let more_budget = config.max_ticks.map_or(true, |max| ticks < max);
        if more_budget && !stop.load(Ordering::SeqCst) {
            sleep(config.interval);
        }
    }

    // Final cleanup action: the log always records the stop
    log.append(Utc::now(), &GuardEvent::Shutdown);
    info!(ticks = engine.tick_count(), "guard stopped");
}
