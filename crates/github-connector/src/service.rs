//! The remote issue session the mapper and validator talk to

use task_core::Credentials;

use crate::client::GitHubClient;
use crate::convert::{create_issue_payload, edit_issue_payload, github_issue_to_issue, state_payload};
use crate::error::{GitHubError, Result};
use crate::issue::{Issue, STATE_OPEN};
use crate::repository_url::GitHubRepositoryUrl;

/// Largest page GitHub serves for issue listings
const MAX_PAGE_SIZE: usize = 100;

/// Issue operations against one GitHub repository.
///
/// All calls are blocking. Writes always need credentials; reads use them
/// when given so private repositories stay reachable.
pub trait IssueService {
    /// Up to `limit` open issues of the repository; used to confirm the repository exists
    fn list_issues(
        &self,
        repository: &GitHubRepositoryUrl,
        limit: usize,
        credentials: Option<&Credentials>,
    ) -> Result<Vec<Issue>>;

    fn get_issue(
        &self,
        repository: &GitHubRepositoryUrl,
        number: u64,
        credentials: Option<&Credentials>,
    ) -> Result<Issue>;

    /// Create `issue`, returning it with the number GitHub assigned
    fn create_issue(
        &self,
        repository: &GitHubRepositoryUrl,
        issue: &Issue,
        credentials: &Credentials,
    ) -> Result<Issue>;

    /// Push title, body and labels of `issue`; the state is not changed
    fn edit_issue(
        &self,
        repository: &GitHubRepositoryUrl,
        number: u64,
        issue: &Issue,
        credentials: &Credentials,
    ) -> Result<Issue>;

    fn close_issue(
        &self,
        repository: &GitHubRepositoryUrl,
        number: u64,
        credentials: &Credentials,
    ) -> Result<Issue>;

    fn reopen_issue(
        &self,
        repository: &GitHubRepositoryUrl,
        number: u64,
        credentials: &Credentials,
    ) -> Result<Issue>;

    /// `Ok(false)` when GitHub rejects the credentials
    fn validate_credentials(&self, credentials: &Credentials) -> Result<bool>;
}

impl IssueService for GitHubClient {
    fn list_issues(
        &self,
        repository: &GitHubRepositoryUrl,
        limit: usize,
        credentials: Option<&Credentials>,
    ) -> Result<Vec<Issue>> {
        let issues = self.list_issues(
            &repository.user,
            &repository.project,
            STATE_OPEN,
            limit.clamp(1, MAX_PAGE_SIZE),
            1,
            credentials,
        )?;
        Ok(issues.into_iter().map(github_issue_to_issue).collect())
    }

    fn get_issue(
        &self,
        repository: &GitHubRepositoryUrl,
        number: u64,
        credentials: Option<&Credentials>,
    ) -> Result<Issue> {
        let issue = self.get_issue(&repository.user, &repository.project, number, credentials)?;

        // Pull requests share the issue number space but are not issues
        if issue.is_pull_request() {
            return Err(GitHubError::IssueNotFound(format!("{}#{}", repository, number)));
        }

        Ok(github_issue_to_issue(issue))
    }

    fn create_issue(
        &self,
        repository: &GitHubRepositoryUrl,
        issue: &Issue,
        credentials: &Credentials,
    ) -> Result<Issue> {
        let created = self.create_issue(
            &repository.user,
            &repository.project,
            &create_issue_payload(issue),
            credentials,
        )?;
        Ok(github_issue_to_issue(created))
    }

    fn edit_issue(
        &self,
        repository: &GitHubRepositoryUrl,
        number: u64,
        issue: &Issue,
        credentials: &Credentials,
    ) -> Result<Issue> {
        let updated = self.update_issue(
            &repository.user,
            &repository.project,
            number,
            &edit_issue_payload(issue),
            credentials,
        )?;
        Ok(github_issue_to_issue(updated))
    }

    fn close_issue(
        &self,
        repository: &GitHubRepositoryUrl,
        number: u64,
        credentials: &Credentials,
    ) -> Result<Issue> {
        let updated = self.update_issue(
            &repository.user,
            &repository.project,
            number,
            &state_payload(true),
            credentials,
        )?;
        Ok(github_issue_to_issue(updated))
    }

    fn reopen_issue(
        &self,
        repository: &GitHubRepositoryUrl,
        number: u64,
        credentials: &Credentials,
    ) -> Result<Issue> {
        let updated = self.update_issue(
            &repository.user,
            &repository.project,
            number,
            &state_payload(false),
            credentials,
        )?;
        Ok(github_issue_to_issue(updated))
    }

    fn validate_credentials(&self, credentials: &Credentials) -> Result<bool> {
        match self.get_authenticated_user(credentials) {
            Ok(user) => Ok(user.login.eq_ignore_ascii_case(&credentials.user_name)),
            Err(GitHubError::Unauthorized) => Ok(false),
            Err(e) => Err(e),
        }
    }
}
