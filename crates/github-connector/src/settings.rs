//! Validation of GitHub repository settings before they are saved

use task_core::{CredentialSource, ProgressMonitor, Status, TaskRepository};
use thiserror::Error;
use tracing::{debug, warn};

use crate::error::GitHubError;
use crate::repository_url::GitHubRepositoryUrl;
use crate::service::IssueService;
use crate::PLUGIN_ID;

const MONITOR_PROGRESS_100: u32 = 100;
const MONITOR_PROGRESS_400: u32 = 400;
const MONITOR_PROGRESS_1000: u32 = 1000;

/// One issue is enough to show the repository answers
const EXISTENCE_CHECK_LIMIT: usize = 1;

/// Message reported when validation passes
pub const SUCCESS_MESSAGE: &str = "Success!";

/// Why a repository configuration was rejected; `Display` is the user-facing message
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationFailure {
    #[error("Server URL must be in the form http://github.com/user/project or\nhttps://github.com/user/project")]
    MalformedUrl,

    #[error("Credentials are required.  Please specify username and API Token.")]
    MissingCredentials,

    #[error(
        "Invalid credentials.  Please check your GitHub User ID and API Token.\nYou can find your API Token on your GitHub account settings page."
    )]
    InvalidCredentials,

    #[error("Repository Test failed:{0}")]
    ServiceContact(String),

    #[error("Validation canceled")]
    Canceled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationState {
    NotValidated,
    Validating,
    Valid,
    Invalid(ValidationFailure),
}

/// Checks a repository's URL, reachability and credentials, in that order.
///
/// Every remote call is blocking; the host runs this off its UI thread.
pub struct SettingsValidator<'a> {
    repository: &'a TaskRepository,
    service: &'a dyn IssueService,
    state: ValidationState,
}

impl<'a> SettingsValidator<'a> {
    pub fn new(repository: &'a TaskRepository, service: &'a dyn IssueService) -> Self {
        Self {
            repository,
            service,
            state: ValidationState::NotValidated,
        }
    }

    pub fn state(&self) -> &ValidationState {
        &self.state
    }

    /// Host status for the last run, `None` before the first run completes
    pub fn status(&self) -> Option<Status> {
        match &self.state {
            ValidationState::Valid => Some(Status::ok(PLUGIN_ID, SUCCESS_MESSAGE)),
            ValidationState::Invalid(failure) => Some(Status::error(PLUGIN_ID, failure.to_string())),
            ValidationState::NotValidated | ValidationState::Validating => None,
        }
    }

    pub fn run(&mut self, monitor: &mut dyn ProgressMonitor) -> &ValidationState {
        self.state = ValidationState::Validating;
        let result = self.validate(monitor);
        monitor.done();

        self.state = match result {
            Ok(()) => ValidationState::Valid,
            Err(failure) => {
                warn!(url = %self.repository.url, %failure, "repository settings rejected");
                ValidationState::Invalid(failure)
            }
        };
        &self.state
    }

    fn validate(&self, monitor: &mut dyn ProgressMonitor) -> Result<(), ValidationFailure> {
        monitor.begin_task("Validating settings", MONITOR_PROGRESS_1000);

        let repository = GitHubRepositoryUrl::parse(&self.repository.url)
            .ok_or(ValidationFailure::MalformedUrl)?;
        monitor.worked(MONITOR_PROGRESS_100);

        let credentials = self.repository.credentials();
        monitor.sub_task("Contacting server...");

        if monitor.is_canceled() {
            return Err(ValidationFailure::Canceled);
        }
        // Private repositories are only visible with credentials
        self.service
            .list_issues(&repository, EXISTENCE_CHECK_LIMIT, credentials.as_ref())
            .map_err(|e| match e {
                GitHubError::Unauthorized => ValidationFailure::InvalidCredentials,
                e => ValidationFailure::ServiceContact(e.to_string()),
            })?;
        monitor.worked(MONITOR_PROGRESS_400);
        debug!(%repository, "repository reachable");

        let credentials = credentials.ok_or(ValidationFailure::MissingCredentials)?;

        if monitor.is_canceled() {
            return Err(ValidationFailure::Canceled);
        }
        let valid = self
            .service
            .validate_credentials(&credentials)
            .map_err(|e| ValidationFailure::ServiceContact(e.to_string()))?;
        if !valid {
            return Err(ValidationFailure::InvalidCredentials);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{repository, RecordingService};
    use crate::CONNECTOR_KIND;
    use task_core::{NullProgressMonitor, Severity};

    /// Records progress calls and cancels after a given number of checks
    #[derive(Default)]
    struct RecordingMonitor {
        events: Vec<String>,
        worked: u32,
        cancel_after_checks: Option<usize>,
        checks: std::cell::Cell<usize>,
    }

    impl ProgressMonitor for RecordingMonitor {
        fn begin_task(&mut self, name: &str, total_work: u32) {
            self.events.push(format!("begin {} {}", name, total_work));
        }

        fn sub_task(&mut self, name: &str) {
            self.events.push(format!("sub {}", name));
        }

        fn worked(&mut self, work: u32) {
            self.worked += work;
        }

        fn done(&mut self) {
            self.events.push("done".to_string());
        }

        fn is_canceled(&self) -> bool {
            let checks = self.checks.get() + 1;
            self.checks.set(checks);
            self.cancel_after_checks.is_some_and(|limit| checks > limit)
        }
    }

    #[test]
    fn test_valid_settings() {
        let repo = repository();
        let service = RecordingService::new();
        let mut validator = SettingsValidator::new(&repo, &service);
        assert_eq!(validator.state(), &ValidationState::NotValidated);
        assert!(validator.status().is_none());

        let mut monitor = RecordingMonitor::default();
        assert_eq!(validator.run(&mut monitor), &ValidationState::Valid);

        assert_eq!(service.calls(), vec!["list octo/demo", "validate octo"]);
        assert_eq!(service.readers(), vec![Some("octo".to_string())]);
        assert_eq!(monitor.worked, 500);
        assert_eq!(
            monitor.events,
            vec!["begin Validating settings 1000", "sub Contacting server...", "done"]
        );
        let status = validator.status().unwrap();
        assert!(status.is_ok());
        assert_eq!(status.message, "Success!");
    }

    #[test]
    fn test_malformed_url_contacts_nothing() {
        let repo = TaskRepository::new(CONNECTOR_KIND, "http://example.com/no-github-here");
        let service = RecordingService::new();
        let mut validator = SettingsValidator::new(&repo, &service);
        let mut monitor = RecordingMonitor::default();

        let state = validator.run(&mut monitor).clone();

        assert_eq!(state, ValidationState::Invalid(ValidationFailure::MalformedUrl));
        assert!(service.calls().is_empty());
        assert_eq!(monitor.events.last().map(String::as_str), Some("done"));
        let status = validator.status().unwrap();
        assert_eq!(status.severity, Severity::Error);
        assert!(status.message.starts_with("Server URL must be in the form"));
    }

    #[test]
    fn test_missing_credentials() {
        let repo = TaskRepository::new(CONNECTOR_KIND, "http://github.com/user/project");
        let service = RecordingService::new();
        let mut validator = SettingsValidator::new(&repo, &service);

        validator.run(&mut NullProgressMonitor);

        assert_eq!(
            validator.state(),
            &ValidationState::Invalid(ValidationFailure::MissingCredentials)
        );
        assert_eq!(service.calls(), vec!["list user/project"]);
        assert_eq!(service.readers(), vec![None]);
        assert!(
            validator
                .status()
                .unwrap()
                .message
                .starts_with("Credentials are required.")
        );
    }

    #[test]
    fn test_rejected_credentials_stop_validation() {
        let repo = repository();
        let service = RecordingService::new().rejecting_credentials();
        let mut validator = SettingsValidator::new(&repo, &service);

        validator.run(&mut NullProgressMonitor);

        assert_eq!(
            validator.state(),
            &ValidationState::Invalid(ValidationFailure::InvalidCredentials)
        );
        assert_eq!(service.calls(), vec!["list octo/demo", "validate octo"]);
        assert!(
            validator
                .status()
                .unwrap()
                .message
                .starts_with("Invalid credentials.")
        );
    }

    #[test]
    fn test_private_repository_is_checked_with_credentials() {
        let repo = repository();
        let service = RecordingService::new().private();
        let mut validator = SettingsValidator::new(&repo, &service);

        assert_eq!(validator.run(&mut NullProgressMonitor), &ValidationState::Valid);
        assert_eq!(service.readers(), vec![Some("octo".to_string())]);
    }

    #[test]
    fn test_private_repository_without_credentials_is_not_found() {
        let repo = TaskRepository::new(CONNECTOR_KIND, "https://github.com/octo/demo");
        let service = RecordingService::new().private();
        let mut validator = SettingsValidator::new(&repo, &service);

        validator.run(&mut NullProgressMonitor);

        assert_eq!(
            validator.state(),
            &ValidationState::Invalid(ValidationFailure::ServiceContact(
                "API error (404): Not Found".to_string()
            ))
        );
    }

    #[test]
    fn test_revoked_token_on_repository_check() {
        let repo = repository();
        let service = RecordingService::new().revoked_token();
        let mut validator = SettingsValidator::new(&repo, &service);

        validator.run(&mut NullProgressMonitor);

        assert_eq!(
            validator.state(),
            &ValidationState::Invalid(ValidationFailure::InvalidCredentials)
        );
        assert_eq!(service.calls(), vec!["list octo/demo"]);
    }

    #[test]
    fn test_service_failure_appends_message() {
        let repo = repository();
        let service = RecordingService::new().failing("Not Found");
        let mut validator = SettingsValidator::new(&repo, &service);

        validator.run(&mut NullProgressMonitor);

        let message = validator.status().unwrap().message;
        assert_eq!(message, "Repository Test failed:API error (422): Not Found");
        assert_eq!(service.calls(), vec!["list octo/demo"]);
    }

    #[test]
    fn test_cancel_before_contacting_server() {
        let repo = repository();
        let service = RecordingService::new();
        let mut validator = SettingsValidator::new(&repo, &service);
        let mut monitor = RecordingMonitor {
            cancel_after_checks: Some(0),
            ..Default::default()
        };

        validator.run(&mut monitor);

        assert_eq!(
            validator.state(),
            &ValidationState::Invalid(ValidationFailure::Canceled)
        );
        assert!(service.calls().is_empty());
    }

    #[test]
    fn test_cancel_before_credential_check() {
        let repo = repository();
        let service = RecordingService::new();
        let mut validator = SettingsValidator::new(&repo, &service);
        let mut monitor = RecordingMonitor {
            cancel_after_checks: Some(1),
            ..Default::default()
        };

        validator.run(&mut monitor);

        assert_eq!(
            validator.state(),
            &ValidationState::Invalid(ValidationFailure::Canceled)
        );
        assert_eq!(service.calls(), vec!["list octo/demo"]);
    }
}
