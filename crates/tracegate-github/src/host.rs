//! Hosting-API trait definitions.
//!
//! [`IssueHost`] is the injected capability the orchestrator evaluates
//! through; the rule engine itself never performs I/O. An in-memory fake
//! is provided for testing via the `fakes` module.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use tracegate_core::ReviewSubmission;

/// Result type for hosting-API operations.
pub type HostResult<T> = std::result::Result<T, HostError>;

/// Errors raised at the hosting-API boundary.
///
/// The engine treats every variant identically (linked data unavailable);
/// the distinction exists for operator diagnostics only.
#[derive(Debug, Error)]
pub enum HostError {
    #[error("issue #{number} not found or inaccessible")]
    NotFound { number: u64 },

    #[error("rate limited or insufficient permissions for issue #{number}")]
    Forbidden { number: u64 },

    #[error("unexpected HTTP status {status} fetching {resource}")]
    Status { status: u16, resource: String },

    #[error("transport error: {0}")]
    Transport(String),
}

impl From<reqwest::Error> for HostError {
    fn from(err: reqwest::Error) -> Self {
        HostError::Transport(err.to_string())
    }
}

/// A fetched issue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssueData {
    pub number: u64,
    /// Issue body; empty when the platform reports none.
    #[serde(default)]
    pub body: String,
}

/// A single issue comment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentData {
    #[serde(default)]
    pub body: String,
    /// Timestamp for diagnostics; comment ordering is not evaluated.
    pub created_at: Option<DateTime<Utc>>,
}

/// A fetched pull request: body, changed-file partitions, and reviews.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PullRequestData {
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub created_files: Vec<String>,
    #[serde(default)]
    pub modified_files: Vec<String>,
    #[serde(default)]
    pub reviews: Vec<ReviewSubmission>,
}

/// Read-only access to the hosting platform's issues and pull requests.
#[async_trait]
pub trait IssueHost: Send + Sync {
    /// Fetch an issue by number.
    async fn fetch_issue(&self, number: u64) -> HostResult<IssueData>;

    /// Fetch the ordered comment thread of an issue.
    async fn fetch_comments(&self, number: u64) -> HostResult<Vec<CommentData>>;

    /// Fetch a pull request with its changed files and reviews.
    async fn fetch_pull_request(&self, number: u64) -> HostResult<PullRequestData>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_error_display() {
        let err = HostError::NotFound { number: 42 };
        assert!(err.to_string().contains("#42"));

        let err = HostError::Status {
            status: 500,
            resource: "issues/42".to_string(),
        };
        assert!(err.to_string().contains("500"));
        assert!(err.to_string().contains("issues/42"));
    }
}
