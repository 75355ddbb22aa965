//! In-memory issue service and fixtures shared by the connector's unit tests

use std::cell::RefCell;

use chrono::FixedOffset;
use task_core::{Credentials, TaskRepository};

use crate::dates::DateConverter;
use crate::error::{GitHubError, Result};
use crate::issue::Issue;
use crate::repository_url::GitHubRepositoryUrl;
use crate::service::IssueService;
use crate::task_data::GitHubTaskDataHandler;
use crate::CONNECTOR_KIND;

pub fn pacific_handler() -> GitHubTaskDataHandler<FixedOffset> {
    GitHubTaskDataHandler::with_dates(DateConverter::new(
        FixedOffset::west_opt(8 * 3600).unwrap(),
    ))
}

pub fn repository() -> TaskRepository {
    TaskRepository::new(CONNECTOR_KIND, "https://github.com/octo/demo")
        .with_credentials(Credentials::new("octo", "token"))
}

pub fn open_issue(number: u64) -> Issue {
    Issue {
        number: Some(number),
        title: Some("Bug".to_string()),
        body: Some("It breaks".to_string()),
        state: Some("open".to_string()),
        created_at: Some("2010/02/02 22:58:39 -0800".to_string()),
        updated_at: Some("2010/02/03 08:00:00 -0800".to_string()),
        ..Default::default()
    }
}

pub fn closed_issue(number: u64) -> Issue {
    Issue {
        state: Some("closed".to_string()),
        closed_at: Some("2010/02/04 09:15:00 -0800".to_string()),
        ..open_issue(number)
    }
}

/// Records every remote call as a short string; optionally fails all of them
pub struct RecordingService {
    calls: RefCell<Vec<String>>,
    readers: RefCell<Vec<Option<String>>>,
    failure: Option<String>,
    credentials_valid: bool,
    private: bool,
    token_revoked: bool,
}

impl RecordingService {
    pub fn new() -> Self {
        Self {
            calls: RefCell::new(Vec::new()),
            readers: RefCell::new(Vec::new()),
            failure: None,
            credentials_valid: true,
            private: false,
            token_revoked: false,
        }
    }

    pub fn failing(mut self, message: &str) -> Self {
        self.failure = Some(message.to_string());
        self
    }

    pub fn rejecting_credentials(mut self) -> Self {
        self.credentials_valid = false;
        self
    }

    /// Reads answer 404 unless credentials are sent
    pub fn private(mut self) -> Self {
        self.private = true;
        self
    }

    /// Reads sent with credentials answer 401
    pub fn revoked_token(mut self) -> Self {
        self.token_revoked = true;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    /// User name sent with each read, `None` for anonymous reads
    pub fn readers(&self) -> Vec<Option<String>> {
        self.readers.borrow().clone()
    }

    fn read(&self, call: String, credentials: Option<&Credentials>) -> Result<()> {
        self.readers
            .borrow_mut()
            .push(credentials.map(|c| c.user_name.clone()));
        self.record(call)?;
        match credentials {
            None if self.private => Err(GitHubError::Api {
                status: 404,
                message: "Not Found".to_string(),
            }),
            Some(_) if self.token_revoked => Err(GitHubError::Unauthorized),
            _ => Ok(()),
        }
    }

    fn record(&self, call: String) -> Result<()> {
        self.calls.borrow_mut().push(call);
        match &self.failure {
            Some(message) => Err(GitHubError::Api {
                status: 422,
                message: message.clone(),
            }),
            None => Ok(()),
        }
    }
}

impl IssueService for RecordingService {
    fn list_issues(
        &self,
        repository: &GitHubRepositoryUrl,
        _limit: usize,
        credentials: Option<&Credentials>,
    ) -> Result<Vec<Issue>> {
        self.read(format!("list {}", repository), credentials)?;
        Ok(vec![open_issue(1)])
    }

    fn get_issue(
        &self,
        repository: &GitHubRepositoryUrl,
        number: u64,
        credentials: Option<&Credentials>,
    ) -> Result<Issue> {
        self.read(format!("get {}#{}", repository, number), credentials)?;
        Ok(open_issue(number))
    }

    fn create_issue(
        &self,
        repository: &GitHubRepositoryUrl,
        issue: &Issue,
        _credentials: &Credentials,
    ) -> Result<Issue> {
        self.record(format!(
            "create {} {}",
            repository,
            issue.title.as_deref().unwrap_or_default()
        ))?;
        Ok(Issue {
            number: Some(100),
            state: Some("open".to_string()),
            ..issue.clone()
        })
    }

    fn edit_issue(
        &self,
        repository: &GitHubRepositoryUrl,
        number: u64,
        issue: &Issue,
        _credentials: &Credentials,
    ) -> Result<Issue> {
        self.record(format!("edit {}#{}", repository, number))?;
        Ok(issue.clone())
    }

    fn close_issue(
        &self,
        repository: &GitHubRepositoryUrl,
        number: u64,
        _credentials: &Credentials,
    ) -> Result<Issue> {
        self.record(format!("close {}#{}", repository, number))?;
        Ok(closed_issue(number))
    }

    fn reopen_issue(
        &self,
        repository: &GitHubRepositoryUrl,
        number: u64,
        _credentials: &Credentials,
    ) -> Result<Issue> {
        self.record(format!("reopen {}#{}", repository, number))?;
        Ok(open_issue(number))
    }

    fn validate_credentials(&self, credentials: &Credentials) -> Result<bool> {
        self.record(format!("validate {}", credentials.user_name))?;
        Ok(self.credentials_valid)
    }
}
