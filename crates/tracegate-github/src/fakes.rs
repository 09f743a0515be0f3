//! In-memory fake for the hosting-API trait (testing and offline runs).

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::host::{
    CommentData, HostError, HostResult, IssueData, IssueHost, PullRequestData,
};

/// In-memory [`IssueHost`] backed by hash maps. Unregistered numbers
/// behave like a 404.
#[derive(Debug, Default)]
pub struct MemoryHost {
    issues: Mutex<HashMap<u64, String>>,
    comments: Mutex<HashMap<u64, Vec<String>>>,
    pulls: Mutex<HashMap<u64, PullRequestData>>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn put_issue(&self, number: u64, body: &str) {
        self.issues.lock().unwrap().insert(number, body.to_string());
    }

    pub fn put_comments(&self, number: u64, comments: &[&str]) {
        self.comments
            .lock()
            .unwrap()
            .insert(number, comments.iter().map(|c| c.to_string()).collect());
    }

    pub fn put_pull_request(&self, number: u64, data: PullRequestData) {
        self.pulls.lock().unwrap().insert(number, data);
    }
}

#[async_trait]
impl IssueHost for MemoryHost {
    async fn fetch_issue(&self, number: u64) -> HostResult<IssueData> {
        self.issues
            .lock()
            .unwrap()
            .get(&number)
            .map(|body| IssueData {
                number,
                body: body.clone(),
            })
            .ok_or(HostError::NotFound { number })
    }

    async fn fetch_comments(&self, number: u64) -> HostResult<Vec<CommentData>> {
        self.comments
            .lock()
            .unwrap()
            .get(&number)
            .map(|bodies| {
                bodies
                    .iter()
                    .map(|b| CommentData {
                        body: b.clone(),
                        created_at: None,
                    })
                    .collect()
            })
            .ok_or(HostError::NotFound { number })
    }

    async fn fetch_pull_request(&self, number: u64) -> HostResult<PullRequestData> {
        self.pulls
            .lock()
            .unwrap()
            .get(&number)
            .cloned()
            .ok_or(HostError::NotFound { number })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_host_round_trip() {
        let host = MemoryHost::new();
        host.put_issue(7, "- [x] done (https://x.test/1)");
        host.put_comments(7, &["## Plan", "plan approved"]);

        let issue = host.fetch_issue(7).await.expect("issue");
        assert_eq!(issue.number, 7);
        assert!(issue.body.contains("done"));

        let comments = host.fetch_comments(7).await.expect("comments");
        assert_eq!(comments.len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_issue_is_not_found() {
        let host = MemoryHost::new();
        let err = host.fetch_issue(99).await.expect_err("missing issue");
        assert!(matches!(err, HostError::NotFound { number: 99 }));
    }
}
