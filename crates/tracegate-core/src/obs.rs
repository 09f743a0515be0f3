//! Structured observability hooks for the evaluation lifecycle.
//!
//! Events are emitted at `info!` level; configure via `RUST_LOG`.

use tracing::info;

/// Emit event: an evaluation run started.
pub fn emit_evaluation_started(pr_body_len: usize) {
    info!(event = "evaluation.started", pr_body_len = pr_body_len);
}

/// Emit event: the issue-reference gate blocked the run.
pub fn emit_gate_blocked() {
    info!(event = "evaluation.gate_blocked");
}

/// Emit event: a verdict was produced.
pub fn emit_verdict(blocking: bool, fail_count: usize, warn_count: usize) {
    info!(
        event = "evaluation.verdict",
        blocking = blocking,
        fail_count = fail_count,
        warn_count = warn_count,
    );
}

/// Emit event: commit-message rule evaluated.
pub fn emit_commit_checked(valid: bool, exempt: bool) {
    info!(event = "commit.checked", valid = valid, exempt = exempt);
}
