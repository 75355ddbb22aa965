use task_core::{Status, TaskError};
use thiserror::Error;

use crate::PLUGIN_ID;

#[derive(Error, Debug)]
pub enum GitHubError {
    #[error("HTTP error: {0}")]
    Http(#[from] ureq::Error),

    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Issue not found: {0}")]
    IssueNotFound(String),

    #[error("Authentication failed")]
    Unauthorized,

    #[error("Rate limited")]
    RateLimited,

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },
}

pub type Result<T> = std::result::Result<T, GitHubError>;

/// Remote failures reach the host as an error status carrying the original message
impl From<GitHubError> for TaskError {
    fn from(err: GitHubError) -> Self {
        let message = match err {
            GitHubError::RateLimited => "GitHub API rate limit exceeded".to_string(),
            other => other.to_string(),
        };
        TaskError::Service(Status::error(PLUGIN_ID, message))
    }
}
