// ABOUTME: Issue repository operations built on the request/response pipeline
// ABOUTME: Listing, lookup by display number, create, update, comment, and close

use crate::constants;
use crate::error::{GitlabError, Result};
use crate::models::{CreateIssue, Issue, IssueFilters, Note, StateEvent, UpdateIssue};
use crate::GitlabClient;

#[derive(serde::Serialize)]
struct NoteBody<'a> {
    body: &'a str,
}

impl GitlabClient {
    /// List issues with server-side `state`, `milestone`, and `labels`
    /// filters. Results are sorted ascending by display number; the API's
    /// own ordering is not relied upon. The `assignee` filter is applied
    /// client-side and drops issues with no assignee.
    pub fn list_issues(&self, filters: &IssueFilters) -> Result<Vec<Issue>> {
        let mut query: Vec<(&str, String)> = Vec::new();
        let state = filters
            .state
            .clone()
            .unwrap_or_else(|| constants::api::DEFAULT_LIST_STATE.to_string());
        query.push(("state", state));
        if let Some(milestone) = &filters.milestone {
            query.push(("milestone", milestone.clone()));
        }
        if let Some(labels) = &filters.labels {
            query.push(("labels", labels.clone()));
        }

        let mut issues: Vec<Issue> = self.get(&["issues"], &query)?;
        issues.sort_by_key(|issue| issue.iid);

        if let Some(assignee) = &filters.assignee {
            issues.retain(|issue| {
                issue
                    .assignee
                    .as_ref()
                    .is_some_and(|user| user.username == *assignee)
            });
        }

        Ok(issues)
    }

    /// Look up an issue by its project-local display number.
    ///
    /// The v3 API has no direct lookup by `iid`, so this retrieves the full
    /// listing and scans it. O(n) per lookup.
    pub fn fetch_by_iid(&self, iid: u64) -> Result<Issue> {
        let issues: Vec<Issue> = self.get(&["issues"], &[])?;
        issues
            .into_iter()
            .find(|issue| issue.iid == iid)
            .ok_or(GitlabError::IssueNotFound(iid))
    }

    pub fn create_issue(&self, params: &CreateIssue) -> Result<Issue> {
        self.post(&["issues"], params)
    }

    /// Update an issue's fields. Fetches the issue first to resolve its
    /// internal id, which is what the PUT endpoint addresses.
    pub fn update_issue(&self, iid: u64, params: &UpdateIssue) -> Result<Issue> {
        let issue = self.fetch_by_iid(iid)?;
        self.put(&["issues", &issue.id.to_string()], params)
    }

    /// Comments belonging to an issue, in whatever order the API returns.
    pub fn notes(&self, issue: &Issue) -> Result<Vec<Note>> {
        self.get(&["issues", &issue.id.to_string(), "notes"], &[])
    }

    pub fn add_comment(&self, iid: u64, body: &str) -> Result<Note> {
        let issue = self.fetch_by_iid(iid)?;
        self.comment_on(&issue, body)
    }

    pub fn comment_on(&self, issue: &Issue, body: &str) -> Result<Note> {
        self.post(&["issues", &issue.id.to_string(), "notes"], &NoteBody { body })
    }

    /// Close an issue, optionally posting a comment first.
    ///
    /// Both calls must complete for the operation to succeed. There is no
    /// compensation on partial failure: a failed state update leaves the
    /// comment posted and the issue open, and the error is reported as-is.
    pub fn close_issue(&self, iid: u64, comment: Option<&str>) -> Result<Issue> {
        let issue = self.fetch_by_iid(iid)?;
        if let Some(body) = comment {
            self.comment_on(&issue, body)?;
        }
        let params = UpdateIssue {
            state_event: Some(StateEvent::Close),
            ..Default::default()
        };
        self.put(&["issues", &issue.id.to_string()], &params)
    }
}
