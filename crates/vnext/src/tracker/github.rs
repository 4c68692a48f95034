//! GitHub REST backend for the issue tracker.

use super::{Issue, IssueTracker, NewIssue, TrackerError};
use async_trait::async_trait;
use reqwest::{header, Client, Method, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::debug;

const DEFAULT_BASE_URL: &str = "https://api.github.com";
const USER_AGENT: &str = "vnext-issue-automation/1.0";

/// GitHub-backed issue tracker for a single repository.
#[derive(Clone)]
pub struct GitHubTracker {
    http: Client,
    base_url: String,
    token: String,
    /// Repository as "owner/repo"
    repository: String,
}

#[derive(Debug, Deserialize)]
struct WireLabel {
    name: String,
}

#[derive(Debug, Deserialize)]
struct WireIssue {
    number: u64,
    title: String,
    body: Option<String>,
    #[serde(default)]
    labels: Vec<WireLabel>,
    state: String,
}

impl From<WireIssue> for Issue {
    fn from(wire: WireIssue) -> Self {
        Self {
            number: wire.number,
            title: wire.title,
            body: wire.body.unwrap_or_default(),
            labels: wire.labels.into_iter().map(|label| label.name).collect(),
            state: wire.state,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireError {
    message: String,
}

impl GitHubTracker {
    /// Create a tracker for `repository` authenticating with `token`.
    pub fn new(token: String, repository: String) -> Result<Self, TrackerError> {
        Self::with_base_url(token, repository, DEFAULT_BASE_URL.to_string())
    }

    /// Point the client at a different API root. Tests use this to target a
    /// local mock server.
    pub fn with_base_url(
        token: String,
        repository: String,
        base_url: String,
    ) -> Result<Self, TrackerError> {
        let http = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            http,
            base_url,
            token,
            repository,
        })
    }

    fn issues_url(&self) -> String {
        format!("{}/repos/{}/issues", self.base_url, self.repository)
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        self.http
            .request(method, url)
            .bearer_auth(&self.token)
            .header(header::ACCEPT, "application/vnd.github+json")
    }

    async fn check_status(response: Response) -> Result<Response, TrackerError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        if status == StatusCode::UNAUTHORIZED {
            return Err(TrackerError::AuthenticationFailed);
        }
        let message = response
            .json::<WireError>()
            .await
            .map(|error| error.message)
            .unwrap_or_else(|_| status.to_string());
        Err(TrackerError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl IssueTracker for GitHubTracker {
    async fn list_open_issues(
        &self,
        label: &str,
        creator: &str,
    ) -> Result<Vec<Issue>, TrackerError> {
        debug!(repository = %self.repository, label, creator, "Listing open tracking issues");

        let response = self
            .request(Method::GET, &self.issues_url())
            .query(&[
                ("state", "open"),
                ("labels", label),
                ("creator", creator),
                ("per_page", "100"),
            ])
            .send()
            .await?;

        let issues: Vec<WireIssue> = Self::check_status(response).await?.json().await?;
        Ok(issues.into_iter().map(Issue::from).collect())
    }

    async fn create_issue(&self, issue: NewIssue) -> Result<Issue, TrackerError> {
        debug!(repository = %self.repository, title = %issue.title, "Creating tracking issue");

        let response = self
            .request(Method::POST, &self.issues_url())
            .json(&issue)
            .send()
            .await?;

        let created: WireIssue = Self::check_status(response).await?.json().await?;
        Ok(created.into())
    }

    async fn update_issue(
        &self,
        number: u64,
        title: &str,
        body: &str,
    ) -> Result<(), TrackerError> {
        debug!(repository = %self.repository, number, "Updating tracking issue");

        let url = format!("{}/{number}", self.issues_url());
        let response = self
            .request(Method::PATCH, &url)
            .json(&json!({ "title": title, "body": body }))
            .send()
            .await?;

        Self::check_status(response).await?;
        Ok(())
    }

    async fn close_issue(&self, number: u64) -> Result<(), TrackerError> {
        debug!(repository = %self.repository, number, "Closing tracking issue");

        let url = format!("{}/{number}", self.issues_url());
        let response = self
            .request(Method::PATCH, &url)
            .json(&json!({ "state": "closed" }))
            .send()
            .await?;

        Self::check_status(response).await?;
        Ok(())
    }
}
