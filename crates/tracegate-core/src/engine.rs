//! Verdict aggregation: runs every evaluator in a fixed order and merges
//! their findings into one [`Verdict`].
//!
//! Component order: issue-reference gate, acceptance-criteria, evidence,
//! descoping, plan-archival, test-plan, summary, review-depth,
//! plan-approval. A gate failure short-circuits everything else. When no
//! fail remains after evaluation, a single info entry is appended.
//!
//! Evaluation is a pure function of the input: re-running on identical
//! input always yields an identical verdict.

use serde::{Deserialize, Serialize};

use crate::conversation::evaluate_conversation;
use crate::issue_rules::evaluate_issue;
use crate::obs;
use crate::pr_rules::{evaluate_plan_archival, evaluate_pr_body, issue_reference_gate};
use crate::review_depth::{evaluate_reviews, ReviewSubmission};
use crate::verdict::{Finding, Verdict};

/// Everything one evaluation run consumes. Linked-issue fields are `None`
/// when the data could not be fetched; the corresponding evaluators are
/// then skipped and a single advisory warn is emitted instead.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvaluationInput {
    pub pr_body: String,
    #[serde(default)]
    pub issue_body: Option<String>,
    #[serde(default)]
    pub issue_comments: Option<Vec<String>>,
    #[serde(default)]
    pub reviews: Vec<ReviewSubmission>,
    #[serde(default)]
    pub created_files: Vec<String>,
    #[serde(default)]
    pub modified_files: Vec<String>,
}

const FETCH_DEGRADED: &str = "Could not fetch linked issue data. Manual verification required.";

const ALL_PASSED: &str = "All PR validation checks passed.";

/// Run the full rule set over one evaluation input.
pub fn evaluate(input: &EvaluationInput) -> Verdict {
    obs::emit_evaluation_started(input.pr_body.len());

    // Gate: without a linked issue nothing downstream is meaningful.
    if let Some(gate_failure) = issue_reference_gate(&input.pr_body) {
        obs::emit_gate_blocked();
        return Verdict::new(vec![gate_failure]);
    }

    let mut findings = Vec::new();
    let mut degraded = false;

    match &input.issue_body {
        Some(body) => findings.extend(evaluate_issue(body)),
        None => {
            degraded = true;
            findings.push(Finding::warn(FETCH_DEGRADED));
        }
    }

    findings.extend(evaluate_plan_archival(
        &input.created_files,
        &input.modified_files,
    ));
    findings.extend(evaluate_pr_body(&input.pr_body));
    findings.extend(evaluate_reviews(&input.reviews));

    match &input.issue_comments {
        Some(comments) => findings.extend(evaluate_conversation(comments)),
        None => {
            if !degraded {
                findings.push(Finding::warn(FETCH_DEGRADED));
            }
        }
    }

    let verdict = finalize(findings);
    obs::emit_verdict(verdict.blocking(), verdict.fail_count(), verdict.warn_count());
    verdict
}

/// Append the single info entry when no fail exists, regardless of warns.
fn finalize(findings: Vec<Finding>) -> Verdict {
    let mut verdict = Verdict::new(findings);
    if !verdict.blocking() {
        verdict.findings.push(Finding::info(ALL_PASSED));
    }
    verdict
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::verdict::Severity;

    fn clean_input() -> EvaluationInput {
        EvaluationInput {
            pr_body: "Closes #42\n## Summary\nfoo\n## Test plan\n- [x] ran it (https://ci.test/1)"
                .to_string(),
            issue_body: Some("- [x] done ([evidence](https://x.test/1))".to_string()),
            issue_comments: Some(vec!["## Plan\nsteps".to_string(), "plan approved".to_string()]),
            reviews: vec![],
            created_files: vec![],
            modified_files: vec![],
        }
    }

    #[test]
    fn test_clean_input_yields_single_info() {
        let verdict = evaluate(&clean_input());
        assert!(!verdict.blocking());
        assert_eq!(verdict.findings.len(), 1);
        assert_eq!(verdict.findings[0].severity, Severity::Info);
        assert!(verdict.findings[0].message.contains("All PR validation"));
    }

    #[test]
    fn test_gate_short_circuit_is_absolute() {
        let input = EvaluationInput {
            pr_body: "no closing keyword here".to_string(),
            ..clean_input()
        };
        let verdict = evaluate(&input);
        assert_eq!(verdict.findings.len(), 1);
        assert_eq!(verdict.findings[0].severity, Severity::Fail);
        assert!(verdict.findings[0].message.contains("must reference an issue"));
    }

    #[test]
    fn test_degraded_path_warns_once_and_skips_issue_rules() {
        let input = EvaluationInput {
            issue_body: None,
            issue_comments: None,
            ..clean_input()
        };
        let verdict = evaluate(&input);
        assert!(!verdict.blocking());
        let degraded: Vec<_> = verdict
            .findings
            .iter()
            .filter(|f| f.message.contains("Manual verification"))
            .collect();
        assert_eq!(degraded.len(), 1, "degraded warn must appear exactly once");
    }

    #[test]
    fn test_degraded_comments_still_run_issue_rules() {
        let input = EvaluationInput {
            issue_comments: None,
            issue_body: Some("- [ ] unfinished".to_string()),
            ..clean_input()
        };
        let verdict = evaluate(&input);
        assert!(verdict.blocking());
        assert!(verdict
            .findings
            .iter()
            .any(|f| f.message.contains("acceptance criteria")));
        assert!(verdict
            .findings
            .iter()
            .any(|f| f.message.contains("Manual verification")));
    }

    #[test]
    fn test_info_appended_even_with_warns() {
        let input = EvaluationInput {
            pr_body: "Closes #42\n## Test plan\n- [x] ran it (https://ci.test/1)".to_string(),
            ..clean_input()
        };
        let verdict = evaluate(&input);
        assert!(!verdict.blocking());
        assert!(verdict.warn_count() > 0, "missing summary should warn");
        assert_eq!(
            verdict.findings.last().unwrap().severity,
            Severity::Info,
            "info entry comes last"
        );
    }

    #[test]
    fn test_component_ordering() {
        let input = EvaluationInput {
            pr_body: "Closes #42".to_string(),
            issue_body: Some("- [ ] unfinished".to_string()),
            issue_comments: Some(vec![]),
            reviews: vec![ReviewSubmission::new("APPROVED", "ok")],
            created_files: vec![],
            modified_files: vec!["docs/plans/x.md".to_string()],
        };
        let verdict = evaluate(&input);
        let position = |needle: &str| {
            verdict
                .findings
                .iter()
                .position(|f| f.message.contains(needle))
                .unwrap_or_else(|| panic!("finding containing {needle:?}"))
        };
        assert!(position("acceptance criteria") < position("not archived"));
        assert!(position("not archived") < position("Test plan"));
        assert!(position("Test plan") < position("Summary"));
        assert!(position("Summary") < position("[Review]"));
        assert!(position("[Review]") < position("[Plan]"));
    }

    #[test]
    fn test_idempotent_on_identical_input() {
        let input = clean_input();
        assert_eq!(evaluate(&input), evaluate(&input));
    }

    #[test]
    fn test_input_round_trips_through_json() {
        let input = clean_input();
        let json = serde_json::to_string(&input).expect("serialize");
        let back: EvaluationInput = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(evaluate(&input), evaluate(&back));
    }

    #[test]
    fn test_minimal_json_input_uses_defaults() {
        let back: EvaluationInput = serde_json::from_str(r#"{"pr_body":"Closes #1"}"#)
            .expect("deserialize");
        assert!(back.issue_body.is_none());
        assert!(back.reviews.is_empty());
    }
}
