//! Async evaluation orchestration: fetch linked data through an
//! [`IssueHost`], degrade fetch failures to absence signals, and hand the
//! assembled input to the pure engine.

use tracing::warn;

use tracegate_core::{evaluate, find_issue_reference, EvaluationInput, Verdict};

use crate::host::{HostError, HostResult, IssueHost};

/// Evaluate a pull request end to end.
///
/// The PR itself must be fetchable; without it there is nothing to
/// evaluate. Linked-issue fetch failures are logged and degraded: the
/// engine receives `None` for the missing data and emits its own
/// manual-verification warning.
pub async fn evaluate_pull_request(host: &dyn IssueHost, pr_number: u64) -> HostResult<Verdict> {
    let pull = host.fetch_pull_request(pr_number).await?;

    let mut input = EvaluationInput {
        pr_body: pull.body,
        issue_body: None,
        issue_comments: None,
        reviews: pull.reviews,
        created_files: pull.created_files,
        modified_files: pull.modified_files,
    };

    if let Some(issue_number) = find_issue_reference(&input.pr_body) {
        match host.fetch_issue(issue_number).await {
            Ok(issue) => input.issue_body = Some(issue.body),
            Err(err) => log_fetch_failure("issue body", issue_number, &err),
        }
        match host.fetch_comments(issue_number).await {
            Ok(comments) => {
                input.issue_comments = Some(comments.into_iter().map(|c| c.body).collect())
            }
            Err(err) => log_fetch_failure("issue comments", issue_number, &err),
        }
    }

    Ok(evaluate(&input))
}

// The engine treats every failure identically; the distinguishing status
// is logged here for operator diagnostics only.
fn log_fetch_failure(what: &str, issue_number: u64, err: &HostError) {
    match err {
        HostError::NotFound { .. } => {
            warn!(issue = issue_number, "{what} fetch failed: not found or inaccessible")
        }
        HostError::Forbidden { .. } => {
            warn!(issue = issue_number, "{what} fetch failed: rate limited or insufficient permissions")
        }
        _ => warn!(issue = issue_number, error = %err, "{what} fetch failed"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fakes::MemoryHost;
    use crate::host::PullRequestData;
    use tracegate_core::{ReviewSubmission, Severity};

    fn compliant_pull() -> PullRequestData {
        PullRequestData {
            body: "Closes #7\n## Summary\nfoo\n## Test plan\n- [x] ran it (https://ci.test/1)"
                .to_string(),
            created_files: vec![],
            modified_files: vec![],
            reviews: vec![ReviewSubmission::new(
                "APPROVED",
                "Checked the evaluator boundaries and both degraded paths in this change.",
            )],
        }
    }

    #[tokio::test]
    async fn test_full_run_against_fake_host() {
        let host = MemoryHost::new();
        host.put_pull_request(1, compliant_pull());
        host.put_issue(7, "- [x] done ([evidence](https://x.test/1))");
        host.put_comments(7, &["## Plan\nsteps", "plan approved"]);

        let verdict = evaluate_pull_request(&host, 1).await.expect("verdict");
        assert!(!verdict.blocking());
        assert_eq!(verdict.findings.len(), 1);
        assert_eq!(verdict.findings[0].severity, Severity::Info);
    }

    #[tokio::test]
    async fn test_missing_issue_degrades_to_warn() {
        let host = MemoryHost::new();
        host.put_pull_request(1, compliant_pull());
        // Issue #7 never registered: both fetches fail as 404.

        let verdict = evaluate_pull_request(&host, 1).await.expect("verdict");
        assert!(!verdict.blocking(), "fetch failure must not block by default");
        assert!(verdict
            .findings
            .iter()
            .any(|f| f.message.contains("Manual verification required")));
    }

    #[tokio::test]
    async fn test_pr_without_reference_skips_fetch_and_fails_gate() {
        let host = MemoryHost::new();
        host.put_pull_request(
            1,
            PullRequestData {
                body: "no keyword".to_string(),
                ..Default::default()
            },
        );

        let verdict = evaluate_pull_request(&host, 1).await.expect("verdict");
        assert!(verdict.blocking());
        assert_eq!(verdict.findings.len(), 1);
    }

    #[tokio::test]
    async fn test_missing_pull_request_propagates() {
        let host = MemoryHost::new();
        let err = evaluate_pull_request(&host, 9).await.expect_err("no PR");
        assert!(matches!(err, HostError::NotFound { .. }));
    }
}
