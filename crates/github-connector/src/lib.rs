pub mod attributes;
pub mod client;
mod convert;
pub mod dates;
pub mod error;
pub mod issue;
pub mod models;
pub mod operation;
pub mod repository_url;
pub mod service;
pub mod settings;
pub mod task_data;

#[cfg(test)]
mod test_support;

pub use attributes::GitHubTaskAttribute;
pub use client::GitHubClient;
pub use dates::DateConverter;
pub use error::{GitHubError, Result};
pub use issue::Issue;
pub use operation::GitHubTaskOperation;
pub use repository_url::{is_valid_url, GitHubRepositoryUrl};
pub use service::IssueService;
pub use settings::{SettingsValidator, ValidationFailure, ValidationState};
pub use task_data::GitHubTaskDataHandler;

/// Connector kind recorded on task data and repositories
pub const CONNECTOR_KIND: &str = "github";

/// Origin reported on statuses produced by this connector
pub const PLUGIN_ID: &str = "github-connector";
