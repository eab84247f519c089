//! TiltGuard CLI
//!
//! Usage:
//!   tiltguard                                # Guard with default targets
//!   tiltguard --cooldown-mins 30             # Longer cooldown
//!   tiltguard --discover                     # Find target process names
//!   tiltguard --once --json                  # Single tick, JSON output
//!   tiltguard --ticks 40                     # Bounded run, then exit

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::sleep;
use std::time::Duration;

use clap::Parser;
use sysinfo::{PidExt, ProcessExt, System, SystemExt};
use tracing::warn;
use tracing_subscriber::EnvFilter;

use tiltguard::core::{
    run_loop, DiscoverScanner, DriverConfig, FileEventLog, GuardEngine, SysinfoSource,
    TerminalNotice, TerminalPrompt,
};
use tiltguard::types::{GuardState, TargetSet};
use tiltguard::{COOLDOWN_MINUTES, DISCOVER_KEYWORDS, POLL_INTERVAL_MS, VERSION};

#[derive(Parser, Debug)]
#[command(
    name = "tiltguard",
    version = VERSION,
    about = "TiltGuard - self-imposed friction for the League/Riot client",
    long_about = "TiltGuard watches the process table for the League client and its\n\
                  launcher. When a launch is detected it asks you to either play now\n\
                  or commit to a cooldown, and while a cooldown is active it\n\
                  terminates the client's process tree on sight.\n\n\
                  Modes:\n  \
                  (default)   Guard loop\n  \
                  --discover  Print processes whose names contain the keywords\n\n\
                  States:\n  \
                  IDLE              - Nothing detected, no cooldown\n  \
                  AWAITING_DECISION - Launch observed, prompt open\n  \
                  COOLDOWN_ACTIVE   - Launches suppressed\n  \
                  COOLDOWN_EXPIRING - Cooldown just cleared"
)]
struct Args {
    /// Process names that signal a launch attempt (repeatable)
    #[arg(long)]
    detect: Vec<String>,

    /// Process names terminated during a cooldown (repeatable)
    #[arg(long)]
    block: Vec<String>,

    /// Cooldown length in minutes
    #[arg(long, default_value_t = COOLDOWN_MINUTES)]
    cooldown_mins: i64,

    /// Poll interval in milliseconds
    #[arg(long, default_value_t = POLL_INTERVAL_MS)]
    interval_ms: u64,

    /// Event log file
    #[arg(long, default_value = "./tiltguard.log")]
    log_file: String,

    /// Discovery mode - scan for processes matching the keywords
    #[arg(short, long)]
    discover: bool,

    /// Keyword for discovery mode (repeatable, default: riot, league)
    #[arg(short, long)]
    keyword: Vec<String>,

    /// Run a single tick and exit
    #[arg(long)]
    once: bool,

    /// Run this many ticks and exit
    #[arg(long)]
    ticks: Option<u64>,

    /// Output tick results as JSON
    #[arg(long)]
    json: bool,

    /// Disable colors in output
    #[arg(long)]
    no_color: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    if args.discover {
        run_discover(&args);
    } else {
        run_guard(&args);
    }
}

/// Build the target set from CLI overrides, or the defaults
fn build_targets(args: &Args) -> TargetSet {
    if args.detect.is_empty() && args.block.is_empty() {
        TargetSet::default()
    } else if args.block.is_empty() {
        // Detect-only override still blocks the same names
        TargetSet::new(args.detect.clone(), args.detect.clone())
    } else {
        TargetSet::new(args.detect.clone(), args.block.clone())
    }
}

/// Run the guard loop
fn run_guard(args: &Args) {
    let targets = build_targets(args);
    let mut source = SysinfoSource::new();
    let mut engine = GuardEngine::new(targets.clone(), args.cooldown_mins);
    let mut prompt = TerminalPrompt::new(args.no_color);
    let mut notice = TerminalNotice::new(args.no_color);
    let mut log = FileEventLog::new(&args.log_file);

    print_header("Guard", args.no_color);
    println!(
        "Watching for: {}",
        targets.detect_names().collect::<Vec<_>>().join(", ")
    );
    println!(
        "Will terminate: {}",
        targets.block_names().collect::<Vec<_>>().join(", ")
    );
    println!(
        "Cooldown: {} minutes | Poll: {} ms | Log: {}",
        args.cooldown_mins, args.interval_ms, args.log_file
    );
    println!("Press Ctrl+C to stop.");
    println!();

    // Ctrl+C flips the flag; the loop notices on the next tick and writes
    // the shutdown event before exiting
    let stop = Arc::new(AtomicBool::new(false));
    {
        let stop = Arc::clone(&stop);
        if let Err(e) = ctrlc::set_handler(move || stop.store(true, Ordering::SeqCst)) {
            warn!(error = %e, "could not install Ctrl+C handler");
        }
    }

    let config = DriverConfig {
        interval: Duration::from_millis(args.interval_ms),
        max_ticks: if args.once { Some(1) } else { args.ticks },
    };

    let json = args.json;
    let no_color = args.no_color;
    let print_every_tick = config.max_ticks.is_some();
    let mut last_printed: Option<(bool, GuardState)> = None;
    run_loop(
        &mut engine,
        &mut source,
        &mut prompt,
        &mut notice,
        &mut log,
        &config,
        &stop,
        // Print only when something changed, so the loop doesn't spam
        |output, state| {
            let key = (output.detected, state);
            if print_every_tick || last_printed != Some(key) {
                last_printed = Some(key);
                if json {
                    println!("{}", serde_json::to_string(output).unwrap_or_default());
                } else if no_color {
                    println!("{}", output.to_parseable_string());
                } else {
                    println!("{}", output.to_terminal_string());
                }
            }
        },
    );
}

/// Run discovery mode - print any process whose name contains a keyword
fn run_discover(args: &Args) {
    let keywords: Vec<String> = if args.keyword.is_empty() {
        DISCOVER_KEYWORDS.iter().map(|s| s.to_string()).collect()
    } else {
        args.keyword.clone()
    };

    print_header("Discovery", args.no_color);
    println!("Matching process names against: {:?}", keywords);
    println!("Open the client now. Press Ctrl+C to stop.");
    println!();

    let mut scanner = DiscoverScanner::new(keywords);
    let mut system = System::new_all();
    loop {
        system.refresh_processes();
        for (pid, process) in system.processes() {
            let exe = process.exe().to_str().filter(|s| !s.is_empty());
            let cmdline = process.cmd().join(" ");
            let cmd = if cmdline.is_empty() {
                None
            } else {
                Some(cmdline.as_str())
            };
            if let Some(found) = scanner.observe(pid.as_u32(), process.name(), exe, cmd) {
                if args.json {
                    println!("{}", serde_json::to_string(&found).unwrap_or_default());
                } else {
                    println!("PID={}  NAME={}", found.pid, found.name);
                    if let Some(exe) = &found.exe {
                        println!("  EXE={}", exe);
                    }
                    if let Some(cmd) = &found.cmd {
                        println!("  CMD={}", cmd);
                    }
                }
            }
        }
        if args.once {
            break;
        }
        sleep(Duration::from_millis(500));
    }
}

/// Print header
fn print_header(mode: &str, no_color: bool) {
    if no_color {
        println!("========================================");
        println!("  TiltGuard v{} - {}", VERSION, mode);
        println!("========================================");
    } else {
        println!("\x1b[1m========================================\x1b[0m");
        println!("\x1b[1m  TiltGuard v{} - {}\x1b[0m", VERSION, mode);
        println!("\x1b[1m========================================\x1b[0m");
    }
    println!();
}
