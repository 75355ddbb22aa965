use std::time::Duration;

use task_core::Credentials;
use tracing::debug;
use ureq::{Agent, RequestBuilder};

use crate::error::{GitHubError, Result};
use crate::models::*;

/// REST endpoint of github.com
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// GitHub REST API client
///
/// The client is not bound to a repository or account: owner, repository and
/// credentials are passed per call, as the host may hold several repositories.
pub struct GitHubClient {
    agent: Agent,
    base_url: String,
}

impl Default for GitHubClient {
    fn default() -> Self {
        Self::new()
    }
}

impl GitHubClient {
    /// Create a new GitHub client targeting api.github.com
    pub fn new() -> Self {
        Self::with_base_url(DEFAULT_API_URL)
    }

    /// Create a new GitHub client with a custom base URL (for GitHub Enterprise or testing)
    pub fn with_base_url(base_url: &str) -> Self {
        let agent = Agent::config_builder()
            .timeout_global(Some(Duration::from_secs(30)))
            .http_status_as_error(false)
            .build()
            .into();

        Self {
            agent,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build a repo-scoped URL
    fn repo_url(&self, owner: &str, repo: &str, path: &str) -> String {
        format!(
            "{}/repos/{}/{}{}",
            self.base_url,
            urlencoding::encode(owner),
            urlencoding::encode(repo),
            path
        )
    }

    /// Add the API headers and, when given, the token
    fn authorize<B>(
        &self,
        request: RequestBuilder<B>,
        credentials: Option<&Credentials>,
    ) -> RequestBuilder<B> {
        let request = request
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", "2022-11-28");

        match credentials {
            Some(credentials) => {
                request.header("Authorization", &format!("Bearer {}", credentials.password))
            }
            None => request,
        }
    }

    /// Check response status and return error if not successful
    fn check_response(
        &self,
        mut response: ureq::http::Response<ureq::Body>,
    ) -> Result<ureq::http::Response<ureq::Body>> {
        let status = response.status().as_u16();

        if (200..300).contains(&status) {
            return Ok(response);
        }

        // Detect rate limiting: 403 with x-ratelimit-remaining: 0
        if status == 403 {
            if let Some(remaining) = response.headers().get("x-ratelimit-remaining") {
                if remaining.to_str().unwrap_or("") == "0" {
                    return Err(GitHubError::RateLimited);
                }
            }
        }

        let body = response
            .body_mut()
            .read_to_string()
            .unwrap_or_else(|_| String::new());

        let message = if let Ok(error_response) = serde_json::from_str::<serde_json::Value>(&body) {
            error_response
                .get("message")
                .and_then(|m| m.as_str())
                .unwrap_or(&body)
                .to_string()
        } else if body.is_empty() {
            format!("HTTP {}", status)
        } else {
            body
        };

        match status {
            401 => Err(GitHubError::Unauthorized),
            _ => Err(GitHubError::Api { status, message }),
        }
    }

    // ==================== Issue Operations ====================

    /// Get an issue by number
    pub fn get_issue(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        credentials: Option<&Credentials>,
    ) -> Result<GitHubIssue> {
        let url = self.repo_url(owner, repo, &format!("/issues/{}", number));
        debug!(%url, "fetching issue");

        let response = self
            .authorize(self.agent.get(&url), credentials)
            .call()
            .map_err(GitHubError::Http)?;

        let mut response = match self.check_response(response) {
            Err(GitHubError::Api { status: 404, .. }) => {
                return Err(GitHubError::IssueNotFound(format!(
                    "{}/{}#{}",
                    owner, repo, number
                )));
            }
            other => other?,
        };
        let issue: GitHubIssue = response.body_mut().read_json()?;
        Ok(issue)
    }

    /// List issues for the repository
    ///
    /// Returns only actual issues, filtering out pull requests.
    pub fn list_issues(
        &self,
        owner: &str,
        repo: &str,
        state: &str,
        per_page: usize,
        page: usize,
        credentials: Option<&Credentials>,
    ) -> Result<Vec<GitHubIssue>> {
        let url = format!(
            "{}?state={}&per_page={}&page={}",
            self.repo_url(owner, repo, "/issues"),
            urlencoding::encode(state),
            per_page,
            page
        );
        debug!(%url, "listing issues");

        let response = self
            .authorize(self.agent.get(&url), credentials)
            .call()
            .map_err(GitHubError::Http)?;

        let mut response = self.check_response(response)?;
        let issues: Vec<GitHubIssue> = response.body_mut().read_json()?;

        Ok(issues
            .into_iter()
            .filter(|i| !i.is_pull_request())
            .collect())
    }

    /// Create a new issue
    pub fn create_issue(
        &self,
        owner: &str,
        repo: &str,
        issue: &CreateGitHubIssue,
        credentials: &Credentials,
    ) -> Result<GitHubIssue> {
        let url = self.repo_url(owner, repo, "/issues");
        debug!(%url, "creating issue");

        let response = self
            .authorize(self.agent.post(&url), Some(credentials))
            .header("Content-Type", "application/json")
            .send_json(issue)
            .map_err(GitHubError::Http)?;

        let mut response = self.check_response(response)?;
        let created: GitHubIssue = response.body_mut().read_json()?;
        Ok(created)
    }

    /// Update an existing issue
    pub fn update_issue(
        &self,
        owner: &str,
        repo: &str,
        number: u64,
        update: &UpdateGitHubIssue,
        credentials: &Credentials,
    ) -> Result<GitHubIssue> {
        let url = self.repo_url(owner, repo, &format!("/issues/{}", number));
        debug!(%url, state = ?update.state, "updating issue");

        let response = self
            .authorize(self.agent.patch(&url), Some(credentials))
            .header("Content-Type", "application/json")
            .send_json(update)
            .map_err(GitHubError::Http)?;

        let mut response = self.check_response(response)?;
        let updated: GitHubIssue = response.body_mut().read_json()?;
        Ok(updated)
    }

    // ==================== User Operations ====================

    /// Get the user the credentials authenticate as
    pub fn get_authenticated_user(&self, credentials: &Credentials) -> Result<GitHubUser> {
        let url = format!("{}/user", self.base_url);
        debug!(%url, user = %credentials.user_name, "checking credentials");

        let response = self
            .authorize(self.agent.get(&url), Some(credentials))
            .call()
            .map_err(GitHubError::Http)?;

        let mut response = self.check_response(response)?;
        let user: GitHubUser = response.body_mut().read_json()?;
        Ok(user)
    }
}
