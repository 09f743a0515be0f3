//! Tracegate Core Library
//!
//! Pure rule-evaluation engine for documentation-driven delivery:
//! every pull request must trace to an issue, every acceptance criterion
//! must be resolved or explicitly descoped, and every claimed completion
//! must carry verifiable evidence.
//!
//! All evaluators are stateless functions over input text. Failures
//! detected by rules are data (entries in the verdict), not raised errors;
//! the engine never throws on malformed input — unmatched text simply
//! yields zero findings.

pub mod commit_rule;
pub mod conversation;
pub mod engine;
pub mod issue_rules;
pub mod obs;
pub mod patterns;
pub mod pr_rules;
pub mod review_depth;
pub mod telemetry;
pub mod verdict;

pub use commit_rule::{check_commit_message, CommitCheck, CommitMessage};
pub use conversation::{classify_comments, evaluate_conversation, PlanState};
pub use engine::{evaluate, EvaluationInput};
pub use issue_rules::evaluate_issue;
pub use patterns::{
    checked_items_without_evidence, extract_checklist_items, find_issue_reference,
    has_evidence_link, preview, ChecklistItem, MAX_ITEM_PREVIEW_LENGTH,
};
pub use pr_rules::{
    evaluate_plan_archival, evaluate_pr_body, issue_reference_gate, PLAN_ARCHIVE_MARKER,
    PLAN_DIR_MARKER,
};
pub use review_depth::{evaluate_reviews, ReviewSubmission, MIN_REVIEW_BODY_LENGTH};
pub use telemetry::init_tracing;
pub use verdict::{Finding, Severity, Verdict};

/// Tracegate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
