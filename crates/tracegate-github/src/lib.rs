//! Tracegate GitHub collaborator
//!
//! Thin async adapters between the pure rule engine and the GitHub REST
//! API. No rule logic lives here: fetch failures are caught at this
//! boundary, logged with their distinguishing status, and degraded to
//! "linked data unavailable" before the engine runs.

pub mod fakes;
pub mod github;
pub mod host;
pub mod orchestrate;

pub use fakes::MemoryHost;
pub use github::GithubHost;
pub use host::{CommentData, HostError, HostResult, IssueData, IssueHost, PullRequestData};
pub use orchestrate::evaluate_pull_request;
