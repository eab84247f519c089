//! Interruption prompt and notice display
//!
//! The prompt is a synchronous call that always resolves to one of exactly
//! two values. There is no "undecided" outcome: EOF, a read error, or any
//! unrecognized input resolves to `Proceed`. Blocking the polling loop while
//! the prompt is open is an intentional pause point, not a bug.

use std::io::{self, BufRead, Write};

use colored::Colorize;

use crate::types::{Decision, PromptContext};

/// Synchronous interruption prompt
pub trait DecisionPrompt {
    /// Block until the user answers. Always resolves.
    fn ask(&mut self, ctx: &PromptContext) -> Decision;
}

/// Fire-and-forget notice sink for the throttled "cooldown active" message
pub trait NoticeSink {
    fn show(&mut self, message: &str);
}

/// Prompt on the controlling terminal
pub struct TerminalPrompt {
    no_color: bool,
}

impl TerminalPrompt {
    pub fn new(no_color: bool) -> Self {
        Self { no_color }
    }

    fn parse_answer(line: &str) -> Decision {
        match line.trim().to_ascii_lowercase().as_str() {
            "d" | "delay" => Decision::Delay,
            // Explicit proceed, dismissal, or anything else: fail open
            _ => Decision::Proceed,
        }
    }
}

impl DecisionPrompt for TerminalPrompt {
    fn ask(&mut self, ctx: &PromptContext) -> Decision {
        let headline = format!("{} is starting.", ctx.trigger);
        let question = format!(
            "[d]elay {} minutes, or press Enter to play anyway: ",
            ctx.cooldown_minutes
        );
        if self.no_color {
            println!("{}", headline);
            print!("{}", question);
        } else {
            println!("{}", headline.red().bold());
            print!("{}", question.yellow());
        }
        let _ = io::stdout().flush();

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(0) | Err(_) => Decision::Proceed,
            Ok(_) => Self::parse_answer(&line),
        }
    }
}

/// Notice printed to the terminal
pub struct TerminalNotice {
    no_color: bool,
}

impl TerminalNotice {
    pub fn new(no_color: bool) -> Self {
        Self { no_color }
    }
}

impl NoticeSink for TerminalNotice {
    fn show(&mut self, message: &str) {
        if self.no_color {
            println!("{}", message);
        } else {
            println!("{}", message.red());
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
