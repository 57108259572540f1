// ABOUTME: Custom error types for the GitLab SDK with user-friendly messages
// ABOUTME: Provides specific error handling for different GitLab API failure modes

use thiserror::Error;

pub type Result<T, E = GitlabError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum GitlabError {
    #[error("{0}")]
    Configuration(String),

    #[error("issue #{0} not found")]
    IssueNotFound(u64),

    #[error("{message}")]
    Api { status: u16, message: String },

    #[error("network error: {0}")]
    Network(String),

    #[error("timeout: request took too long to complete")]
    Timeout,

    #[error("invalid API response: {0}")]
    InvalidResponse(#[from] serde_json::Error),
}

impl GitlabError {
    pub fn help_text(&self) -> Option<&'static str> {
        match self {
            GitlabError::IssueNotFound(_) => {
                Some("Issue numbers are the project-local values shown by `git-issue list`")
            }
            GitlabError::Api { status: 401, .. } => {
                Some("Check that issue.token holds a valid GitLab private token")
            }
            GitlabError::Network(_) | GitlabError::Timeout => {
                Some("Check your connection and the issue.url setting")
            }
            _ => None,
        }
    }
}

impl From<reqwest::Error> for GitlabError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            GitlabError::Timeout
        } else {
            GitlabError::Network(err.to_string())
        }
    }
}
