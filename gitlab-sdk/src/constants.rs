// ABOUTME: Centralized constants for the GitLab SDK
// ABOUTME: Contains timeouts, header names, and API defaults

/// HTTP and request timeouts
pub mod timeouts {
    use std::time::Duration;

    /// Default timeout for HTTP requests
    pub const HTTP_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
}

/// GitLab API conventions
pub mod api {
    /// Authentication header carried on every request
    pub const PRIVATE_TOKEN_HEADER: &str = "PRIVATE-TOKEN";

    /// State filter applied when listing issues without an explicit state
    pub const DEFAULT_LIST_STATE: &str = "opened";

    /// User agent reported to the server
    pub const USER_AGENT: &str = "git-issue-cli/0.1.0";
}
