// ABOUTME: Typed models for the GitLab v3 issues API
// ABOUTME: Issues, notes, and the request payloads for creating and updating them

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An issue as returned by `/projects/:id/issues`.
///
/// `id` is unique across the GitLab instance and only appears in API URLs;
/// `iid` is the project-local number shown to users.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Issue {
    pub id: u64,
    pub iid: u64,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub state: IssueState,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub milestone: Option<Milestone>,
    #[serde(default)]
    pub assignee: Option<User>,
    pub author: User,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Issue {
    pub fn joined_labels(&self) -> String {
        self.labels.join(",")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Opened,
    Closed,
    Reopened,
}

impl fmt::Display for IssueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueState::Opened => write!(f, "opened"),
            IssueState::Closed => write!(f, "closed"),
            IssueState::Reopened => write!(f, "reopened"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct User {
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Milestone {
    pub title: String,
}

/// A comment attached to an issue (GitLab calls these notes).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Note {
    pub id: u64,
    #[serde(default)]
    pub body: Option<String>,
    pub author: User,
    pub created_at: DateTime<Utc>,
}

/// Payload for `POST /projects/:id/issues`.
#[derive(Debug, Clone, Serialize)]
pub struct CreateIssue {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Payload for `PUT /projects/:id/issues/:issue_id`.
///
/// Only the populated fields are sent, so an update never clobbers values
/// the caller did not touch.
#[derive(Debug, Clone, Default, Serialize)]
pub struct UpdateIssue {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_event: Option<StateEvent>,
}

impl UpdateIssue {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.description.is_none() && self.state_event.is_none()
    }
}

/// State transition triggered as a side effect of an update call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StateEvent {
    Close,
    Reopen,
}

impl fmt::Display for StateEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StateEvent::Close => write!(f, "close"),
            StateEvent::Reopen => write!(f, "reopen"),
        }
    }
}

/// Filters for listing issues. `state`, `milestone`, and `labels` are passed
/// through verbatim as query parameters; `assignee` is applied client-side
/// because the v3 listing endpoint cannot filter by assignee username.
#[derive(Debug, Clone, Default)]
pub struct IssueFilters {
    pub state: Option<String>,
    pub milestone: Option<String>,
    pub labels: Option<String>,
    pub assignee: Option<String>,
}
