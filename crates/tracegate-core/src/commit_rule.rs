//! Commit-message issue-reference rule.
//!
//! A sibling engine to the PR evaluators, invoked from a commit-message
//! linter rather than from PR evaluation. Classifies a single commit
//! message as exempt (merge/revert/initial/release commits) or as
//! requiring an issue reference somewhere in subject, body, or footer.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::obs;

// Exemption is decided on the subject line only.
static EXEMPT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)^Merge\s").unwrap(),
        Regex::new(r"(?i)^Revert\s").unwrap(),
        Regex::new(r"(?i)^Initial commit$").unwrap(),
        Regex::new(r"(?i)release|version").unwrap(),
    ]
});

// Independent ORs; the specific pattern matched does not affect the
// outcome.
static REFERENCE_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"\(#\d+\)").unwrap(),
        Regex::new(r"(?i)refs?:\s*#\d+").unwrap(),
        Regex::new(r"(?i)fix(?:es)?:\s*#\d+").unwrap(),
        Regex::new(r"(?i)closes?:\s*#\d+").unwrap(),
        Regex::new(r"(?i)resolves?:\s*#\d+").unwrap(),
        Regex::new(r"#\d+").unwrap(),
    ]
});

/// A commit message decomposed into subject, body, and footer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitMessage {
    pub subject: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub footer: Option<String>,
}

impl CommitMessage {
    /// Split a raw commit message into subject, body, and footer.
    ///
    /// Subject is the first line. The footer is the final paragraph when
    /// every one of its lines looks like a `Token: value` trailer;
    /// everything between subject and footer is the body. Total: any
    /// input shape yields a message, never an error.
    pub fn parse(raw: &str) -> Self {
        static TRAILER_LINE: Lazy<Regex> =
            Lazy::new(|| Regex::new(r"^[A-Za-z][A-Za-z-]*:\s").unwrap());

        let mut lines = raw.lines();
        let subject = lines.next().unwrap_or("").trim_end().to_string();
        let rest: Vec<&str> = lines.collect();
        let rest = rest.join("\n");
        let rest = rest.trim();

        if rest.is_empty() {
            return Self {
                subject,
                body: None,
                footer: None,
            };
        }

        let paragraphs: Vec<&str> = rest.split("\n\n").collect();
        let last = paragraphs.last().unwrap();
        let is_footer =
            paragraphs.len() > 1 && last.lines().all(|l| TRAILER_LINE.is_match(l.trim()));

        if is_footer {
            let body = paragraphs[..paragraphs.len() - 1].join("\n\n");
            Self {
                subject,
                body: Some(body.trim().to_string()).filter(|b| !b.is_empty()),
                footer: Some(last.trim().to_string()),
            }
        } else {
            Self {
                subject,
                body: Some(rest.to_string()),
                footer: None,
            }
        }
    }

    /// Subject, body, and footer newline-joined, skipping absent parts.
    fn full_message(&self) -> String {
        let mut parts = vec![self.subject.as_str()];
        if let Some(body) = &self.body {
            parts.push(body.as_str());
        }
        if let Some(footer) = &self.footer {
            parts.push(footer.as_str());
        }
        parts.join("\n")
    }
}

/// Outcome of the commit-message rule: pass/fail plus a fixed message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitCheck {
    pub valid: bool,
    pub message: String,
}

/// Classify a commit message as exempt, referencing an issue, or invalid.
pub fn check_commit_message(commit: &CommitMessage) -> CommitCheck {
    if EXEMPT_PATTERNS.iter().any(|p| p.is_match(&commit.subject)) {
        obs::emit_commit_checked(true, true);
        return CommitCheck {
            valid: true,
            message: "Exempt commit type - issue reference not required".to_string(),
        };
    }

    let full = commit.full_message();
    let has_reference = REFERENCE_PATTERNS.iter().any(|p| p.is_match(&full));
    obs::emit_commit_checked(has_reference, false);

    if has_reference {
        CommitCheck {
            valid: true,
            message: "Valid issue reference found".to_string(),
        }
    } else {
        CommitCheck {
            valid: false,
            message: "Commit message must reference an issue \
                      (e.g., Refs: #123, Fixes: #456, or (#123) in subject)"
                .to_string(),
        }
    }
}
