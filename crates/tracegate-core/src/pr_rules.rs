//! Pull-request compliance rules: issue-reference gate, plan archival,
//! test-plan section, and summary-section presence.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::patterns::{checked_items_without_evidence, find_issue_reference};
use crate::verdict::Finding;

/// Path marker identifying an in-progress plan document.
pub const PLAN_DIR_MARKER: &str = "docs/plans/";

/// Path marker identifying an archived plan document.
pub const PLAN_ARCHIVE_MARKER: &str = "docs/plans/archive/";

static TEST_PLAN_HEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"## Test [Pp]lan").unwrap());

static SUMMARY_HEADER: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)## Summary").unwrap());

static UNCHECKED_ITEM: Lazy<Regex> = Lazy::new(|| Regex::new(r"- \[ \] ").unwrap());

/// Gate rule: the PR body must carry a closing-keyword issue reference.
///
/// Returns the blocking finding when absent. A gate failure short-circuits
/// every other evaluator in the run.
pub fn issue_reference_gate(pr_body: &str) -> Option<Finding> {
    if find_issue_reference(pr_body).is_some() {
        None
    } else {
        Some(Finding::fail(
            "PR must reference an issue. Add 'Closes #N' to the PR description.",
        ))
    }
}

/// Plan-archival rule: a plan document modified outside the archive
/// directory must be accompanied by a created file inside it.
pub fn evaluate_plan_archival(created_files: &[String], modified_files: &[String]) -> Vec<Finding> {
    let plan_archived = created_files.iter().any(|f| f.contains(PLAN_ARCHIVE_MARKER));
    let plan_in_progress = modified_files
        .iter()
        .any(|f| f.contains(PLAN_DIR_MARKER) && !f.contains("archive"));

    if plan_in_progress && !plan_archived {
        vec![Finding::warn(
            "Plan file modified but not archived. Archive plan before merge.",
        )]
    } else {
        Vec::new()
    }
}

/// Test-plan and summary rules over the PR body.
///
/// When a `## Test plan` section exists, every item in it must be checked
/// and every checked item must carry evidence — both at fail level, a
/// deliberately stricter bar than the issue-level evidence rule. When the
/// section is absent, a warn prompts its inclusion.
pub fn evaluate_pr_body(pr_body: &str) -> Vec<Finding> {
    let mut findings = Vec::new();

    match test_plan_section(pr_body) {
        Some(section) => {
            let unchecked = UNCHECKED_ITEM.find_iter(section).count();
            if unchecked > 0 {
                findings.push(Finding::fail(format!(
                    "[PR] {unchecked} test plan items not verified. \
                     All test plan items must be checked before merge.",
                )));
            }

            let without_evidence = checked_items_without_evidence(section);
            if !without_evidence.is_empty() {
                findings.push(Finding::fail(format!(
                    "[PR] {} test plan items missing evidence links. \
                     Required format: - [x] Item ([evidence](link))",
                    without_evidence.len(),
                )));
            }
        }
        None => {
            findings.push(Finding::warn(
                "PR should include a '## Test plan' section.",
            ));
        }
    }

    if !SUMMARY_HEADER.is_match(pr_body) {
        findings.push(Finding::warn(
            "PR should include a '## Summary' section describing the changes.",
        ));
    }

    findings
}

/// Capture the test-plan section: from its header up to the next `##`
/// header, or end of body.
fn test_plan_section(pr_body: &str) -> Option<&str> {
    let m = TEST_PLAN_HEADER.find(pr_body)?;
    let rest = &pr_body[m.start()..];
    let header_len = m.end() - m.start();
    let end = rest[header_len..]
        .find("##")
        .map(|i| i + header_len)
        .unwrap_or(rest.len());
    Some(&rest[..end])
}
