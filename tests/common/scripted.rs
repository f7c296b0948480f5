//! Scripted command executor and confirmation fakes

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use git_sync::git::{CommandExecutor, CommandResult, Invocation};
use git_sync::sync::ConfirmFn;

/// Command line the pipeline uses to list changed files
pub const PORCELAIN_STATUS: &str = "git status --porcelain -z --untracked-files=all";

struct Rule {
    pattern: String,
    /// Consumed front to back; the last response repeats
    responses: VecDeque<CommandResult>,
}

/// Executor that answers from rules and records every invocation
///
/// Rules match the rendered command line, where `*` matches any run of
/// characters. Later rules take precedence. Unmatched commands succeed with
/// empty output.
#[derive(Default)]
pub struct ScriptedExecutor {
    rules: Mutex<Vec<Rule>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository on `branch` with one modified file, an `origin` remote
    /// and staged changes after `git add`
    pub fn repo_on_branch(branch: &str) -> Self {
        Self::new()
            .on("git rev-parse --git-dir", ok(".git"))
            .on("git branch --show-current", ok(branch))
            .on("git remote", ok("origin"))
            .on(PORCELAIN_STATUS, ok(" M src/lib.rs"))
            .on("git status --short", ok(" M src/lib.rs"))
            .on("git diff --cached --quiet", fail(1, ""))
            .on("git diff --cached --numstat", ok("3\t1\tsrc/lib.rs"))
            .on("git diff --cached --stat", ok(" src/lib.rs | 4 +++-"))
    }

    pub fn on(self, pattern: &str, result: CommandResult) -> Self {
        self.on_sequence(pattern, vec![result])
    }

    pub fn on_sequence(self, pattern: &str, results: Vec<CommandResult>) -> Self {
        self.rules
            .lock()
            .expect("rules lock")
            .push(Rule {
                pattern: pattern.to_string(),
                responses: results.into(),
            });
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }

    /// Number of recorded invocations matching `pattern`
    pub fn count(&self, pattern: &str) -> usize {
        self.calls()
            .iter()
            .filter(|call| glob_match(pattern, call))
            .count()
    }

    pub fn ran(&self, pattern: &str) -> bool {
        self.count(pattern) > 0
    }
}

#[async_trait]
impl CommandExecutor for ScriptedExecutor {
    async fn execute(&self, invocation: &Invocation) -> CommandResult {
        let line = invocation.to_string();
        self.calls.lock().expect("calls lock").push(line.clone());

        let mut rules = self.rules.lock().expect("rules lock");
        match rules.iter_mut().rev().find(|rule| glob_match(&rule.pattern, &line)) {
            Some(rule) if rule.responses.len() > 1 => {
                rule.responses.pop_front().unwrap_or_default()
            }
            Some(rule) => rule.responses.front().cloned().unwrap_or_default(),
            None => CommandResult::default(),
        }
    }
}

pub fn ok(stdout: &str) -> CommandResult {
    CommandResult::new(0, stdout, "")
}

pub fn fail(exit_code: i32, stderr: &str) -> CommandResult {
    CommandResult::new(exit_code, "", stderr)
}

/// `*` matches any (possibly empty) run of characters
pub fn glob_match(pattern: &str, text: &str) -> bool {
    let parts: Vec<&str> = pattern.split('*').collect();
    if parts.len() == 1 {
        return pattern == text;
    }

    let first = parts[0];
    let last = parts[parts.len() - 1];
    if !text.starts_with(first) || text.len() < first.len() + last.len() || !text.ends_with(last) {
        return false;
    }

    let mut rest = &text[first.len()..text.len() - last.len()];
    for part in &parts[1..parts.len() - 1] {
        match rest.find(part) {
            Some(index) => rest = &rest[index + part.len()..],
            None => return false,
        }
    }
    true
}

/// Confirmation that always gives `answer`
pub fn answer(answer: bool) -> ConfirmFn {
    Box::new(move |_, _| answer)
}

/// Confirmation that takes the offered default
pub fn accept_default() -> ConfirmFn {
    Box::new(|_, default| default)
}

/// Confirmation that gives `answer` and records each question asked
pub fn recording(answer: bool) -> (ConfirmFn, Arc<Mutex<Vec<String>>>) {
    let asked = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&asked);
    let confirm: ConfirmFn = Box::new(move |question, _| {
        log.lock().expect("question log").push(question.to_string());
        answer
    });
    (confirm, asked)
}

#[test]
fn test_glob_match() {
    assert!(glob_match("git push*", "git push -u origin main"));
    assert!(glob_match("git push origin main", "git push origin main"));
    assert!(!glob_match("git push origin main", "git push -u origin main"));
    assert!(glob_match("git * origin *", "git pull origin main"));
    assert!(!glob_match("git add*", "git commit -m x"));
}
