//! Statistics for a single sync run

use std::time::Duration;

/// What one run did, returned with its outcome
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SyncStats {
    pub duration: Duration,
    pub files_changed: usize,
    pub insertions: usize,
    pub deletions: usize,
    pub committed: bool,
    pub pushed: bool,
    /// Push had to be retried with `-u`
    pub upstream_set: bool,
    pub pulled: bool,
}

impl SyncStats {
    /// Fills the change counters from `git diff --cached --numstat` output
    pub fn record_numstat(&mut self, numstat: &str) {
        let (files, insertions, deletions) = parse_numstat(numstat);
        self.files_changed = files;
        self.insertions = insertions;
        self.deletions = deletions;
    }

    /// One-line summary for the end of a run
    pub fn generate_summary(&self) -> String {
        let mut summary = format!("✅ Completed in {:.1}s", self.duration.as_secs_f64());

        if self.committed {
            summary.push_str(&format!(
                " • {} {} changed • +{} -{}",
                self.files_changed,
                if self.files_changed == 1 { "file" } else { "files" },
                self.insertions,
                self.deletions
            ));
        } else {
            summary.push_str(" • nothing committed");
        }
        if self.pulled {
            summary.push_str(" • pulled");
        }
        if self.pushed {
            summary.push_str(if self.upstream_set {
                " • pushed (upstream set)"
            } else {
                " • pushed"
            });
        }

        summary
    }
}

/// Sums `--numstat` lines into (files, insertions, deletions)
///
/// Binary files report `-` for both counts; they count as a changed file
/// with no line changes.
pub fn parse_numstat(output: &str) -> (usize, usize, usize) {
    output
        .lines()
        .filter_map(|line| {
            let mut fields = line.split('\t');
            let added = fields.next()?;
            let removed = fields.next()?;
            fields.next()?;
            Some((
                added.trim().parse::<usize>().unwrap_or(0),
                removed.trim().parse::<usize>().unwrap_or(0),
            ))
        })
        .fold((0, 0, 0), |(files, ins, del), (added, removed)| {
            (files + 1, ins + added, del + removed)
        })
}
