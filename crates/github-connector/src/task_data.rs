//! Mapping between GitHub issues and host task data, and submission of edits

use std::fmt::Display;

use chrono::{Local, TimeZone};
use task_core::{
    AttributeSchema, AttributeType, CredentialSource, RepositoryResponse, ResponseKind, Result, TaskAttribute,
    TaskData, TaskError, TaskOperation, TaskRepository, OPERATION, PREFIX_OPERATION,
};
use tracing::{debug, info};

use crate::attributes::GitHubTaskAttribute;
use crate::dates::DateConverter;
use crate::issue::Issue;
use crate::operation::GitHubTaskOperation;
use crate::repository_url::GitHubRepositoryUrl;
use crate::service::IssueService;
use crate::CONNECTOR_KIND;

/// Version stamped on every task data this connector produces
pub const DATA_VERSION: &str = "1";

const CREDENTIALS_REQUIRED: &str = "Credentials are required to submit GitHub issues";

/// Creates the operation attributes for `issue` on `data`.
///
/// Existing tasks with a known state get `leave` as the default plus the one
/// transition that applies: `close` for open issues, `reopen` for closed ones.
pub fn build_operations(data: &mut TaskData, issue: &Issue) {
    let attr = data.create_attribute(OPERATION);
    attr.meta_data.attribute_type = AttributeType::Operation;

    let Some(state) = issue.state.as_deref() else {
        return;
    };
    if data.is_new() {
        return;
    }

    add_operation(data, state, GitHubTaskOperation::Leave, true);
    if issue.is_open() {
        add_operation(data, state, GitHubTaskOperation::Close, false);
    } else if issue.is_closed() {
        add_operation(data, state, GitHubTaskOperation::Reopen, false);
    }
}

fn add_operation(data: &mut TaskData, state: &str, operation: GitHubTaskOperation, as_default: bool) {
    let label = operation.label_for(state);
    let attr = data.create_attribute(&format!("{}{}", PREFIX_OPERATION, operation.id()));
    TaskOperation::apply_to(attr, operation.id(), &label);

    if as_default {
        if let Some(selected) = data.attribute_mut(OPERATION) {
            TaskOperation::apply_to(selected, operation.id(), &label);
        }
    }
}

/// The operation selected on `data`, if any.
///
/// A blank selection counts as none. Only ids this connector offers are
/// accepted; anything else fails.
pub fn selected_operation(data: &TaskData) -> Result<Option<GitHubTaskOperation>> {
    match data.selected_operation_id().filter(|id| !id.trim().is_empty()) {
        None => Ok(None),
        Some(id) => GitHubTaskOperation::from_id(id)
            .map(Some)
            .ok_or_else(|| TaskError::UnsupportedOperation(id.to_string())),
    }
}

/// Translates between [`Issue`] and [`TaskData`] and posts edits back to GitHub
#[derive(Debug, Clone)]
pub struct GitHubTaskDataHandler<Tz: TimeZone = Local> {
    dates: DateConverter<Tz>,
}

impl GitHubTaskDataHandler<Local> {
    pub fn new() -> Self {
        Self::with_dates(DateConverter::local())
    }
}

impl Default for GitHubTaskDataHandler<Local> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Tz: TimeZone> GitHubTaskDataHandler<Tz>
where
    Tz::Offset: Display,
{
    pub fn with_dates(dates: DateConverter<Tz>) -> Self {
        Self { dates }
    }

    /// Prepare a blank task: only init-flagged attributes, no values
    pub fn initialize(&self, data: &mut TaskData) -> bool {
        data.set_version(DATA_VERSION);
        GitHubTaskAttribute::initialize(data);
        true
    }

    /// Build task data for `issue`.
    ///
    /// `is_partial_data` marks an issue that came from a summary listing; such
    /// data is flagged partial when a required attribute has no value.
    pub fn from_issue(&self, repository: &TaskRepository, issue: &Issue, is_partial_data: bool) -> TaskData {
        let task_id = issue.number.map(|n| n.to_string()).unwrap_or_default();
        let mut data = TaskData::new(CONNECTOR_KIND, &repository.url, &task_id);
        data.set_version(DATA_VERSION);

        build_operations(&mut data, issue);

        let display = |value: &Option<String>| value.as_deref().map(|v| self.dates.to_display(v));

        for attribute in GitHubTaskAttribute::ALL {
            let attr = attribute.descriptor().create(&mut data);
            match attribute {
                GitHubTaskAttribute::Key => set_optional(attr, issue.number.map(|n| n.to_string())),
                GitHubTaskAttribute::Title => set_optional(attr, issue.title.clone()),
                GitHubTaskAttribute::Body => set_optional(attr, issue.body.clone()),
                GitHubTaskAttribute::Status => set_optional(attr, issue.state.clone()),
                GitHubTaskAttribute::CreationDate => set_optional(attr, display(&issue.created_at)),
                GitHubTaskAttribute::ModificationDate => set_optional(attr, display(&issue.updated_at)),
                GitHubTaskAttribute::ClosedDate => set_optional(attr, display(&issue.closed_at)),
                GitHubTaskAttribute::Label => attr.set_values(issue.labels.clone().unwrap_or_default()),
                GitHubTaskAttribute::Votes => set_optional(attr, issue.votes.map(|v| v.to_string())),
                GitHubTaskAttribute::ReportedBy => set_optional(attr, issue.reporter.clone()),
            }
        }

        if is_partial_data {
            let missing = GitHubTaskAttribute::missing_required(&data);
            if !missing.is_empty() {
                debug!(task = %task_id, ?missing, "issue data is partial");
                data.set_partial(true);
            }
        }

        data
    }

    /// Build the issue described by `data`
    pub fn to_issue(&self, data: &TaskData) -> Issue {
        let value = |attribute: GitHubTaskAttribute| data.value(attribute.id()).map(str::to_string);
        let wire = |attribute: GitHubTaskAttribute| {
            data.value(attribute.id()).map(|v| self.dates.to_wire(v))
        };

        Issue {
            number: if data.is_new() {
                None
            } else {
                data.task_id.parse().ok()
            },
            title: value(GitHubTaskAttribute::Title),
            body: value(GitHubTaskAttribute::Body),
            state: value(GitHubTaskAttribute::Status),
            created_at: wire(GitHubTaskAttribute::CreationDate),
            updated_at: wire(GitHubTaskAttribute::ModificationDate),
            closed_at: wire(GitHubTaskAttribute::ClosedDate),
            // No label attribute means the labels are not being edited
            labels: data.attribute(GitHubTaskAttribute::Label.id()).map(|a| {
                a.values
                    .iter()
                    .filter(|l| !l.trim().is_empty())
                    .cloned()
                    .collect()
            }),
            reporter: value(GitHubTaskAttribute::ReportedBy),
            votes: value(GitHubTaskAttribute::Votes).and_then(|v| v.parse().ok()),
        }
    }

    /// Post `data` to the repository.
    ///
    /// New tasks are created. Existing tasks are edited, then the selected
    /// state-changing operation is applied. Remote failures are returned as
    /// [`TaskError::Service`] and are not retried.
    pub fn submit(
        &self,
        repository: &TaskRepository,
        data: &TaskData,
        service: &dyn IssueService,
    ) -> Result<RepositoryResponse> {
        let repo = GitHubRepositoryUrl::parse(&repository.url)
            .ok_or_else(|| TaskError::InvalidUrl(repository.url.clone()))?;
        let credentials = repository
            .credentials()
            .ok_or_else(|| TaskError::InvalidInput(CREDENTIALS_REQUIRED.to_string()))?;
        let issue = self.to_issue(data);

        if data.is_new() {
            let created = service.create_issue(&repo, &issue, &credentials)?;
            let task_id = created.number.map(|n| n.to_string()).unwrap_or_default();
            info!(repository = %repo, task = %task_id, "created issue");
            return Ok(RepositoryResponse::new(ResponseKind::TaskCreated, &task_id));
        }

        let number = issue.number.ok_or_else(|| {
            TaskError::InvalidInput(format!("Invalid GitHub issue number: '{}'", data.task_id))
        })?;
        let operation = selected_operation(data)?;

        service.edit_issue(&repo, number, &issue, &credentials)?;
        match operation {
            Some(GitHubTaskOperation::Close) => {
                service.close_issue(&repo, number, &credentials)?;
            }
            Some(GitHubTaskOperation::Reopen) => {
                service.reopen_issue(&repo, number, &credentials)?;
            }
            Some(GitHubTaskOperation::Leave) | None => {}
        }

        info!(repository = %repo, task = number, operation = ?operation, "updated issue");
        Ok(RepositoryResponse::new(ResponseKind::TaskUpdated, &number.to_string()))
    }
}

fn set_optional(attr: &mut TaskAttribute, value: Option<String>) {
    if let Some(value) = value {
        attr.add_value(&value);
    }
}
