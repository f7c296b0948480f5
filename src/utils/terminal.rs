//! Terminal utilities for title setting and confirmation prompts

use std::io::{self, BufRead, Write};

/// Sets the terminal title to the specified text
pub fn set_terminal_title(title: &str) {
    // ANSI escape sequence to set terminal title
    print!("\x1b]0;{}\x07", title);
    let _ = io::stdout().flush();
}

/// Asks a yes/no question on stdin
///
/// An empty answer, or a failure to read, picks `default`.
pub fn terminal_confirm(prompt: &str, default: bool) -> bool {
    let choices = if default { "[Y/n]" } else { "[y/N]" };
    print!("{prompt} {choices} ");
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    match io::stdin().lock().read_line(&mut input) {
        Ok(0) | Err(_) => default,
        Ok(_) => parse_answer(&input, default),
    }
}

fn parse_answer(input: &str, default: bool) -> bool {
    match input.trim().to_lowercase().as_str() {
        "" => default,
        "y" | "yes" => true,
        "n" | "no" => false,
        _ => default,
    }
}
