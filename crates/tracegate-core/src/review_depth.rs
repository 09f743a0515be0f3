//! Review-depth scoring over review submissions.
//!
//! Warns only when every approved review is brief. Partial brevity is
//! tolerated: one substantive approval suffices for the whole run.

use serde::{Deserialize, Serialize};

use crate::verdict::Finding;

/// Minimum character count for a review body to count as substantive.
pub const MIN_REVIEW_BODY_LENGTH: usize = 50;

/// A single review submission as reported by the hosting platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewSubmission {
    /// Platform review state, e.g. "APPROVED", "CHANGES_REQUESTED".
    pub state: String,
    /// Free-form review body; may be empty.
    #[serde(default)]
    pub body: String,
}

impl ReviewSubmission {
    pub fn new(state: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            state: state.into(),
            body: body.into(),
        }
    }

    fn is_brief(&self) -> bool {
        self.body.trim().chars().count() < MIN_REVIEW_BODY_LENGTH
    }
}

/// Warn when all approvals are brief or empty; silent otherwise.
pub fn evaluate_reviews(reviews: &[ReviewSubmission]) -> Vec<Finding> {
    let approved: Vec<&ReviewSubmission> =
        reviews.iter().filter(|r| r.state == "APPROVED").collect();

    if approved.is_empty() {
        return Vec::new();
    }

    if approved.iter().all(|r| r.is_brief()) {
        vec![Finding::warn(format!(
            "[Review] All {} approval(s) have brief or empty review bodies. \
             Substantive reviews should include: files reviewed, potential issues checked, \
             or specific feedback.",
            approved.len(),
        ))]
    } else {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn long_body() -> String {
        "Reviewed the extractor changes line by line; checked the regex edge cases.".to_string()
    }

    #[test]
    fn test_no_reviews_no_output() {
        assert!(evaluate_reviews(&[]).is_empty());
    }

    #[test]
    fn test_no_approvals_no_output() {
        let reviews = vec![ReviewSubmission::new("CHANGES_REQUESTED", "")];
        assert!(evaluate_reviews(&reviews).is_empty());
    }

    #[test]
    fn test_one_substantive_approval_suffices() {
        let reviews = vec![
            ReviewSubmission::new("APPROVED", "LGTM"),
            ReviewSubmission::new("APPROVED", long_body()),
        ];
        assert!(evaluate_reviews(&reviews).is_empty());
    }

    #[test]
    fn test_all_brief_approvals_warn_once() {
        let reviews = vec![
            ReviewSubmission::new("APPROVED", "LGTM"),
            ReviewSubmission::new("APPROVED", "   "),
        ];
        let findings = evaluate_reviews(&reviews);
        assert_eq!(findings.len(), 1);
        assert!(findings[0].message.contains("All 2 approval(s)"));
    }

    #[test]
    fn test_whitespace_only_body_is_brief() {
        let reviews = vec![ReviewSubmission::new("APPROVED", "  \n\t ")];
        assert_eq!(evaluate_reviews(&reviews).len(), 1);
    }

    #[test]
    fn test_non_approved_brief_reviews_are_ignored() {
        let reviews = vec![
            ReviewSubmission::new("COMMENTED", "ok"),
            ReviewSubmission::new("APPROVED", long_body()),
        ];
        assert!(evaluate_reviews(&reviews).is_empty());
    }
}
