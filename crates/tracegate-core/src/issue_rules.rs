//! Issue compliance rules over the linked issue body.
//!
//! Three rules, applied in order:
//! 1. Acceptance-criteria completeness — unchecked, non-descoped items block.
//! 2. Evidence coverage — checked items without evidence links are advisory.
//! 3. Descoped-item approval — a descoped item must carry a
//!    `(descoped: ...)` rationale or an evidence link; lacking both blocks.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::patterns::{extract_checklist_items, has_evidence_link, preview};
use crate::verdict::Finding;

static DESCOPED_APPROVAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)\(descoped:").unwrap());

/// Evaluate all issue-level rules against the linked issue body.
pub fn evaluate_issue(issue_body: &str) -> Vec<Finding> {
    let mut findings = Vec::new();
    let items = extract_checklist_items(issue_body);

    // Rule 1: all acceptance criteria must be checked or descoped.
    let unchecked = items.iter().filter(|i| !i.checked).count();
    let descoped = items.iter().filter(|i| i.descoped).count();
    let unchecked_count = unchecked - descoped;

    if unchecked_count > 0 {
        findings.push(Finding::fail(format!(
            "[Issue] {unchecked_count} acceptance criteria not checked. \
             Complete all items or mark as descoped (~~strikethrough~~) before PR.",
        )));
    }

    // Rule 2: checked items should carry evidence links (advisory).
    let checked_without_evidence = items
        .iter()
        .filter(|i| i.checked && !i.has_evidence)
        .count();

    if checked_without_evidence > 0 {
        findings.push(Finding::warn(format!(
            "[Issue] {checked_without_evidence} checked acceptance criteria may be missing \
             evidence links. Recommended format: - [x] Item ([evidence](link))",
        )));
    }

    // Rule 3: descoped items must carry an approval rationale or
    // evidence link. The full item line is tested, not just the label.
    let descoped_without_approval: Vec<String> = items
        .iter()
        .filter(|i| i.descoped)
        .filter(|i| !DESCOPED_APPROVAL.is_match(&i.text) && !has_evidence_link(&i.text))
        .map(|i| preview(i.descoped_label().unwrap_or(&i.text)).to_string())
        .collect();

    if !descoped_without_approval.is_empty() {
        findings.push(Finding::fail(format!(
            "[Issue] {} descoped items missing approval links ({}). \
             Format: - [ ] ~~Item~~ (descoped: [approval](link))",
            descoped_without_approval.len(),
            descoped_without_approval.join(", "),
        )));
    }

    findings
}
