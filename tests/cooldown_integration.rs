//! Integration tests for the cooldown path
//!
//! Covers the full enforcement cycle: delay chosen, sweep kills, throttled
//! notices, expiry. Includes the canonical pid 100/101 scenario.

mod common;

use chrono::{DateTime, Duration, TimeZone, Utc};
use common::FakeSource;
use pretty_assertions::assert_eq;

use tiltguard::core::{terminate_tree, EventLog, GuardEngine, MemoryEventLog, ProcessSource};
use tiltguard::types::{Decision, GuardAction, GuardState, TargetSet};

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
}

/// Drive one tick the way the polling driver does: execute kill requests
/// against the fake table, route logs, count terminations
fn drive_tick(
    engine: &mut GuardEngine,
    source: &mut FakeSource,
    targets: &TargetSet,
    now: DateTime<Utc>,
    log: &mut MemoryEventLog,
) -> (usize, bool) {
    let snapshot = source.snapshot(targets);
    let output = engine.tick(&snapshot, now);
    let mut swept = 0;
    let mut prompted = false;
    for action in &output.actions {
        match action {
            GuardAction::KillTree(pid) => swept += terminate_tree(source, &snapshot, *pid),
            GuardAction::Log(event) => log.append(now, event),
            GuardAction::RequestDecision(_) => prompted = true,
            GuardAction::Notice(_) => {}
        }
    }
    (swept, prompted)
}

/// The scenario from the design discussion: LeagueClient (pid 100) with one
/// child (pid 101), both sets contain LeagueClient.exe, no cooldown yet.
#[test]
fn test_delay_then_sweep_kills_child_then_root() {
    let targets = TargetSet::default();
    let mut source = FakeSource::new();
    let mut engine = GuardEngine::new(targets.clone(), 15);
    let mut log = MemoryEventLog::new();

    source.spawn(100, "LeagueClient.exe", None);
    source.spawn(101, "LeagueClientUx.exe", Some(100));

    // Rising edge, prompt returns delay
    let (_, prompted) = drive_tick(&mut engine, &mut source, &targets, t0(), &mut log);
    assert!(prompted);
    for action in engine.resolve(Decision::Delay, t0()) {
        if let GuardAction::Log(event) = action {
            log.append(t0(), &event);
        }
    }
    assert_eq!(engine.cooldown_expires(), Some(t0() + Duration::minutes(15)));
    assert!(log.contains("User chose DELAY 15 minutes"));

    // Next tick, same snapshot, cooldown active: sweep kills 101 then 100
    let (swept, prompted) = drive_tick(
        &mut engine,
        &mut source,
        &targets,
        t0() + Duration::seconds(1),
        &mut log,
    );
    assert!(!prompted, "no prompt during the sweep");
    assert_eq!(swept, 2);
    assert_eq!(source.killed, vec![101, 100]);
    assert!(!source.is_live(100));
    assert!(!source.is_live(101));
}

#[test]
fn test_relaunch_during_cooldown_is_blocked_and_logged() {
    let targets = TargetSet::default();
    let mut source = FakeSource::new();
    let mut engine = GuardEngine::new(targets.clone(), 15);
    let mut log = MemoryEventLog::new();

    source.spawn(100, "LeagueClient.exe", None);
    drive_tick(&mut engine, &mut source, &targets, t0(), &mut log);
    engine.resolve(Decision::Delay, t0());

    // Sweep takes the client down
    drive_tick(
        &mut engine,
        &mut source,
        &targets,
        t0() + Duration::seconds(1),
        &mut log,
    );
    assert!(!source.is_live(100));

    // Falling edge once the table is clean
    drive_tick(
        &mut engine,
        &mut source,
        &targets,
        t0() + Duration::seconds(2),
        &mut log,
    );

    // User relaunches three minutes in
    source.spawn(200, "LeagueClient.exe", None);
    let (swept, prompted) = drive_tick(
        &mut engine,
        &mut source,
        &targets,
        t0() + Duration::minutes(3),
        &mut log,
    );
    assert!(!prompted, "violation must never reach the prompt");
    assert_eq!(swept, 1);
    assert!(!source.is_live(200));
    assert!(log.contains("Blocked launch during delay"));
}

#[test]
fn test_process_started_mid_cooldown_without_edge_is_caught() {
    let targets = TargetSet::default();
    let mut source = FakeSource::new();
    let mut engine = GuardEngine::new(targets.clone(), 15);
    let mut log = MemoryEventLog::new();

    // Launcher survives the first kill attempt (stays live across the edge),
    // then the client pops up under it mid-cooldown
    source.spawn(50, "RiotClientServices.exe", None);
    drive_tick(&mut engine, &mut source, &targets, t0(), &mut log);
    engine.resolve(Decision::Delay, t0());

    // Sweep kills the launcher
    drive_tick(
        &mut engine,
        &mut source,
        &targets,
        t0() + Duration::seconds(1),
        &mut log,
    );

    // Launcher restarts itself and spawns the client: the detect flag was
    // never reset to a clean rising edge by the time we observe both
    source.spawn(50, "RiotClientServices.exe", None);
    source.spawn(60, "LeagueClient.exe", Some(50));
    source.spawn(61, "LeagueClientUx.exe", Some(60));

    let (swept, prompted) = drive_tick(
        &mut engine,
        &mut source,
        &targets,
        t0() + Duration::seconds(2),
        &mut log,
    );
    assert!(!prompted);
    assert_eq!(swept, 3, "sweep catches the whole restarted tree");
    assert!(!source.is_live(60));
    assert!(!source.is_live(61));
}

#[test]
fn test_expiry_clears_cooldown_and_logs_before_killing() {
    let targets = TargetSet::default();
    let mut source = FakeSource::new();
    let mut engine = GuardEngine::new(targets.clone(), 15);
    let mut log = MemoryEventLog::new();

    source.spawn(100, "LeagueClient.exe", None);
    drive_tick(&mut engine, &mut source, &targets, t0(), &mut log);
    engine.resolve(Decision::Delay, t0());
    drive_tick(
        &mut engine,
        &mut source,
        &targets,
        t0() + Duration::seconds(1),
        &mut log,
    );

    // Client comes back and is still up when the window closes exactly
    source.spawn(300, "LeagueClient.exe", None);
    let expires = t0() + Duration::minutes(15);
    // An intermediate tick so the relaunch kill has already happened
    drive_tick(
        &mut engine,
        &mut source,
        &targets,
        expires - Duration::minutes(1),
        &mut log,
    );
    source.spawn(400, "LeagueClient.exe", None);

    let (swept, _) = drive_tick(&mut engine, &mut source, &targets, expires, &mut log);
    assert_eq!(swept, 0, "expiry tick performs no block action");
    assert!(source.is_live(400));
    assert!(log.contains("Delay finished"));
    assert_eq!(engine.state(), GuardState::Idle);

    // After expiry a fresh launch goes back to the prompt
    source.exit(400);
    drive_tick(
        &mut engine,
        &mut source,
        &targets,
        expires + Duration::seconds(1),
        &mut log,
    );
    source.spawn(500, "LeagueClient.exe", None);
    let (_, prompted) = drive_tick(
        &mut engine,
        &mut source,
        &targets,
        expires + Duration::seconds(2),
        &mut log,
    );
    assert!(prompted);
    assert_eq!(engine.state(), GuardState::AwaitingDecision);
}

#[test]
fn test_full_cycle_event_log_reads_like_a_session() {
    let targets = TargetSet::default();
    let mut source = FakeSource::new();
    let mut engine = GuardEngine::new(targets.clone(), 15);
    let mut log = MemoryEventLog::new();

    source.spawn(100, "LeagueClient.exe", None);
    drive_tick(&mut engine, &mut source, &targets, t0(), &mut log);
    for action in engine.resolve(Decision::Delay, t0()) {
        if let GuardAction::Log(event) = action {
            log.append(t0(), &event);
        }
    }
    drive_tick(
        &mut engine,
        &mut source,
        &targets,
        t0() + Duration::seconds(1),
        &mut log,
    );
    drive_tick(
        &mut engine,
        &mut source,
        &targets,
        t0() + Duration::minutes(15),
        &mut log,
    );

    let text = log.lines().join("\n");
    let delay_pos = text.find("User chose DELAY").unwrap();
    let finished_pos = text.find("Delay finished").unwrap();
    assert!(delay_pos < finished_pos);
}
