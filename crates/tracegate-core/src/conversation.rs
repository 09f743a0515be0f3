//! Plan/approval classification over free-form issue comments.
//!
//! Each comment is classified independently and the results are
//! OR-reduced across the thread. No chronological check is performed:
//! an approval is accepted even if it precedes the plan comment, and no
//! attempt is made to pair an approval with a specific plan when several
//! were posted. This mirrors the source workflow's looseness.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::pr_rules::PLAN_DIR_MARKER;
use crate::verdict::Finding;

static PLAN_HEADER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)## (Implementation )?Plan|## Refinement").unwrap());

static PLAN_PHRASES: &[&str] = &[
    "awaiting approval",
    "ready for approval",
    "plan ready for approval",
];

static APPROVAL_PHRASES: &[&str] = &[
    "approval acknowledged",
    "approved to proceed",
    "plan approved",
];

static PROCEED_WITH: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)proceed(ing)? with").unwrap());

/// Plan/approval state of an issue conversation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanState {
    pub has_plan_comment: bool,
    pub has_approval_comment: bool,
}

/// True if a comment reads as a posted implementation plan.
pub fn is_plan_comment(comment: &str) -> bool {
    if PLAN_HEADER.is_match(comment) || comment.contains(PLAN_DIR_MARKER) {
        return true;
    }
    let lower = comment.to_lowercase();
    PLAN_PHRASES.iter().any(|p| lower.contains(p))
}

/// True if a comment reads as a sign-off on a plan.
pub fn is_approval_comment(comment: &str) -> bool {
    let lower = comment.to_lowercase();
    APPROVAL_PHRASES.iter().any(|p| lower.contains(p)) || PROCEED_WITH.is_match(comment)
}

/// OR-reduce the per-comment classifications across a comment thread.
pub fn classify_comments(comments: &[String]) -> PlanState {
    PlanState {
        has_plan_comment: comments.iter().any(|c| is_plan_comment(c)),
        has_approval_comment: comments.iter().any(|c| is_approval_comment(c)),
    }
}

/// Advisory findings for the plan/approval workflow. Never blocks.
pub fn evaluate_conversation(comments: &[String]) -> Vec<Finding> {
    let state = classify_comments(comments);

    if !state.has_plan_comment {
        vec![Finding::warn(
            "[Plan] No implementation plan found in issue comments. \
             Post a plan and obtain approval before implementation.",
        )]
    } else if !state.has_approval_comment {
        vec![Finding::warn(
            "[Plan] Implementation plan posted but no approval found. \
             Obtain approval before merge.",
        )]
    } else {
        Vec::new()
    }
}
