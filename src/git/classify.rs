//! Classification of git failure output
//!
//! All matching on git's human-readable messages lives here. The markers are
//! English and not a stable interface, so anything unrecognised falls back to
//! [`FailureClass::Generic`].

/// Category of a failed git command, derived from its output text
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureClass {
    /// A merge left conflicted paths behind
    MergeConflict,
    /// The branch has no tracking relationship yet
    NoUpstreamBranch,
    /// The remote has history the local branch does not
    NonFastForward,
    /// A pre-commit hook refused the commit
    PreCommitHookRejected,
    Generic,
}

const CONFLICT_MARKERS: &[&str] = &["CONFLICT", "Automatic merge failed"];
const NO_UPSTREAM_MARKERS: &[&str] = &["has no upstream branch", "no upstream"];
// `[remote rejected]` is a server-side refusal and must not match here
const NON_FAST_FORWARD_MARKERS: &[&str] = &["non-fast-forward", "fetch first", "[rejected]"];
const PRE_COMMIT_MARKERS: &[&str] = &["pre-commit hook", "pre-commit"];

/// Maps failure output to a [`FailureClass`]
///
/// Order matters: a conflict or missing upstream is more specific than a
/// rejection line printed alongside it.
pub fn classify_failure(output: &str) -> FailureClass {
    let contains_any = |markers: &[&str]| markers.iter().any(|m| output.contains(m));

    if contains_any(CONFLICT_MARKERS) {
        FailureClass::MergeConflict
    } else if contains_any(NO_UPSTREAM_MARKERS) {
        FailureClass::NoUpstreamBranch
    } else if contains_any(NON_FAST_FORWARD_MARKERS) {
        FailureClass::NonFastForward
    } else if contains_any(PRE_COMMIT_MARKERS) {
        FailureClass::PreCommitHookRejected
    } else {
        FailureClass::Generic
    }
}
