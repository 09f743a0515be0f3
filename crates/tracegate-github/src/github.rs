//! GitHub REST API implementation of [`IssueHost`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::debug;

use tracegate_core::ReviewSubmission;

use crate::host::{
    CommentData, HostError, HostResult, IssueData, IssueHost, PullRequestData,
};

const DEFAULT_API_BASE: &str = "https://api.github.com";

// GitHub caps per_page at 100; without it list endpoints return 30.
const LIST_PAGE_SIZE: u32 = 100;

fn paged(resource: &str) -> String {
    format!("{resource}?per_page={LIST_PAGE_SIZE}")
}

/// GitHub-backed hosting API client for one repository.
pub struct GithubHost {
    client: reqwest::Client,
    api_base: String,
    owner: String,
    repo: String,
    token: Option<String>,
}

impl GithubHost {
    /// Create a client for `owner/repo`. The token is optional for
    /// public repositories but avoids aggressive rate limits.
    pub fn new(owner: &str, repo: &str, token: Option<String>) -> HostResult<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("tracegate/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_base: DEFAULT_API_BASE.to_string(),
            owner: owner.to_string(),
            repo: repo.to_string(),
            token,
        })
    }

    /// Point the client at a non-default API base (GitHub Enterprise,
    /// or a local stub in tests).
    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.api_base = api_base.trim_end_matches('/').to_string();
        self
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        resource: &str,
        number: u64,
    ) -> HostResult<T> {
        let url = format!(
            "{}/repos/{}/{}/{}",
            self.api_base, self.owner, self.repo, resource
        );
        debug!(url = %url, "fetching from hosting API");

        let mut request = self
            .client
            .get(&url)
            .header("Accept", "application/vnd.github+json");
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        match response.status().as_u16() {
            404 => Err(HostError::NotFound { number }),
            403 => Err(HostError::Forbidden { number }),
            status if !response.status().is_success() => Err(HostError::Status {
                status,
                resource: resource.to_string(),
            }),
            _ => Ok(response.json().await?),
        }
    }
}

#[derive(Deserialize)]
struct ApiIssue {
    number: u64,
    body: Option<String>,
}

#[derive(Deserialize)]
struct ApiComment {
    body: Option<String>,
    created_at: Option<DateTime<Utc>>,
}

#[derive(Deserialize)]
struct ApiPull {
    body: Option<String>,
}

#[derive(Deserialize)]
struct ApiFile {
    filename: String,
    status: String,
}

#[derive(Deserialize)]
struct ApiReview {
    state: String,
    body: Option<String>,
}

#[async_trait]
impl IssueHost for GithubHost {
    async fn fetch_issue(&self, number: u64) -> HostResult<IssueData> {
        let issue: ApiIssue = self.get_json(&format!("issues/{number}"), number).await?;
        Ok(IssueData {
            number: issue.number,
            body: issue.body.unwrap_or_default(),
        })
    }

    /// Fetch the comment thread of an issue.
    ///
    /// Reads a single page of up to 100 comments; longer threads are
    /// truncated.
    async fn fetch_comments(&self, number: u64) -> HostResult<Vec<CommentData>> {
        let comments: Vec<ApiComment> = self
            .get_json(&paged(&format!("issues/{number}/comments")), number)
            .await?;
        Ok(comments
            .into_iter()
            .map(|c| CommentData {
                body: c.body.unwrap_or_default(),
                created_at: c.created_at,
            })
            .collect())
    }

    /// Fetch a pull request with its changed files and reviews.
    ///
    /// File and review lists read a single page of up to 100 entries
    /// each; larger pull requests are truncated.
    async fn fetch_pull_request(&self, number: u64) -> HostResult<PullRequestData> {
        let pull: ApiPull = self.get_json(&format!("pulls/{number}"), number).await?;
        let files: Vec<ApiFile> = self
            .get_json(&paged(&format!("pulls/{number}/files")), number)
            .await?;
        let reviews: Vec<ApiReview> = self
            .get_json(&paged(&format!("pulls/{number}/reviews")), number)
            .await?;

        let (created_files, modified_files): (Vec<_>, Vec<_>) = files
            .into_iter()
            .partition(|f| f.status == "added");

        Ok(PullRequestData {
            body: pull.body.unwrap_or_default(),
            created_files: created_files.into_iter().map(|f| f.filename).collect(),
            modified_files: modified_files.into_iter().map(|f| f.filename).collect(),
            reviews: reviews
                .into_iter()
                .map(|r| ReviewSubmission::new(r.state, r.body.unwrap_or_default()))
                .collect(),
        })
    }
}
