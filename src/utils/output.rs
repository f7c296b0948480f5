//! User-facing console output
//!
//! Diagnostics go through `tracing`; this is what the user reads.

use indicatif::{ProgressBar, ProgressStyle};
use std::io::IsTerminal;
use std::time::Duration;

const SPINNER_TEMPLATE: &str = "{spinner} {msg}";
const SPINNER_TICK: Duration = Duration::from_millis(100);

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Output {
    pub verbose: bool,
    pub quiet: bool,
    silent: bool,
}

impl Output {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            silent: false,
        }
    }

    /// Prints nothing at all; for library callers and tests
    pub fn silent() -> Self {
        Self {
            verbose: false,
            quiet: true,
            silent: true,
        }
    }

    fn chatty(&self) -> bool {
        !self.quiet && !self.silent
    }

    pub fn step(&self, message: &str) {
        if self.chatty() {
            println!("🔄 {message}");
        }
    }

    pub fn info(&self, message: &str) {
        if self.chatty() {
            println!("ℹ️  {message}");
        }
    }

    pub fn success(&self, message: &str) {
        if self.chatty() {
            println!("✅ {message}");
        }
    }

    /// Warnings are shown even in quiet mode
    pub fn warn(&self, message: &str) {
        if !self.silent {
            println!("⚠️  {message}");
        }
    }

    pub fn error(&self, message: &str) {
        if !self.silent {
            eprintln!("❌ {message}");
        }
    }

    pub fn hint(&self, message: &str) {
        if !self.silent {
            println!("💡 {message}");
        }
    }

    pub fn dry_run(&self, command: &str) {
        if !self.silent {
            println!("[DRY RUN] Would execute: {command}");
        }
    }

    /// Multi-line block, such as git's status listing
    pub fn block(&self, text: &str) {
        if self.chatty() && !text.trim().is_empty() {
            for line in text.lines() {
                println!("   {line}");
            }
        }
    }

    /// Raw tool output, shown even in quiet mode
    pub fn excerpt(&self, text: &str) {
        if !self.silent && !text.trim().is_empty() {
            for line in text.lines() {
                println!("   │ {line}");
            }
        }
    }

    /// Raw tool output, shown only in verbose mode
    pub fn detail(&self, text: &str) {
        if self.verbose {
            self.excerpt(text);
        }
    }

    /// Spinner for a step that talks to the network
    ///
    /// Hidden when output is quiet or stdout is not a terminal.
    pub fn spinner(&self, message: &str) -> ProgressBar {
        if !self.chatty() || !std::io::stdout().is_terminal() {
            return ProgressBar::hidden();
        }

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template(SPINNER_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(SPINNER_TICK);
        spinner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_output_hides_spinner() {
        let output = Output::silent();
        assert!(output.spinner("pushing").is_hidden());
        assert!(!output.chatty());
    }

    #[test]
    fn test_quiet_output_is_not_chatty() {
        assert!(!Output::new(false, true).chatty());
        assert!(Output::new(true, false).chatty());
    }
}
