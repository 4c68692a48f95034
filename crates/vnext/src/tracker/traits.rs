//! Capability interface over the external issue-tracking service.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced by an issue tracker backend.
#[derive(Debug, Error)]
pub enum TrackerError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The tracker rejected the request
    #[error("Issue tracker API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// Credentials were missing or invalid
    #[error("Authentication failed")]
    AuthenticationFailed,
}

/// A tracking issue as the tracker reports it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Issue {
    /// Tracker-assigned issue number
    pub number: u64,
    /// Issue title
    pub title: String,
    /// Issue body
    #[serde(default)]
    pub body: String,
    /// Label names on the issue
    #[serde(default)]
    pub labels: Vec<String>,
    /// Open/closed state
    pub state: String,
}

/// A new issue to file.
#[derive(Debug, Clone, Serialize)]
pub struct NewIssue {
    /// Issue title
    pub title: String,
    /// Issue body
    pub body: String,
    /// Labels to attach on creation
    pub labels: Vec<String>,
}

/// Issue-tracking operations the synchronizer depends on.
///
/// Kept minimal so tests can substitute an in-memory fake for the live
/// service.
#[async_trait]
pub trait IssueTracker {
    /// Open issues carrying `label`, created by `creator`.
    async fn list_open_issues(
        &self,
        label: &str,
        creator: &str,
    ) -> Result<Vec<Issue>, TrackerError>;

    /// File a new issue, returning it as created.
    async fn create_issue(&self, issue: NewIssue) -> Result<Issue, TrackerError>;

    /// Replace an issue's title and body, leaving labels untouched.
    async fn update_issue(
        &self,
        number: u64,
        title: &str,
        body: &str,
    ) -> Result<(), TrackerError>;

    /// Close an issue.
    async fn close_issue(&self, number: u64) -> Result<(), TrackerError>;
}
