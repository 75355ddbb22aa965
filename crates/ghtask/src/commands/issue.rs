use crate::cli::{OperationArg, OutputFormat};
use crate::output::output_result;
use anyhow::{anyhow, Context, Result};
use github_connector::{
    GitHubRepositoryUrl, GitHubTaskAttribute, GitHubTaskDataHandler, GitHubTaskOperation,
    IssueService, CONNECTOR_KIND,
};
use task_core::{CredentialSource, TaskAttribute, TaskData, TaskRepository};

/// Edits requested on the command line for `submit`
pub struct SubmitArgs<'a> {
    pub number: Option<u64>,
    pub title: Option<&'a str>,
    pub body: Option<&'a str>,
    pub labels: &'a [String],
    pub operation: Option<OperationArg>,
}

pub fn handle_init(
    handler: &GitHubTaskDataHandler,
    repository_url: &str,
    format: OutputFormat,
) -> Result<()> {
    let mut data = TaskData::new(CONNECTOR_KIND, repository_url, "");
    handler.initialize(&mut data);

    output_result(&data, format);
    Ok(())
}

pub fn handle_show(
    handler: &GitHubTaskDataHandler,
    service: &dyn IssueService,
    repository: &TaskRepository,
    number: u64,
    partial: bool,
    format: OutputFormat,
) -> Result<()> {
    let data = fetch_task_data(handler, service, repository, number, partial)?;

    output_result(&data, format);
    Ok(())
}

pub fn handle_submit(
    handler: &GitHubTaskDataHandler,
    service: &dyn IssueService,
    repository: &TaskRepository,
    args: &SubmitArgs<'_>,
    format: OutputFormat,
) -> Result<()> {
    let mut data = match args.number {
        Some(number) => fetch_task_data(handler, service, repository, number, false)?,
        None => {
            if args.operation.is_some() {
                return Err(anyhow!("--operation only applies to existing issues"));
            }
            if args.title.is_none() {
                return Err(anyhow!("--title is required when creating an issue"));
            }
            let mut data = TaskData::new(CONNECTOR_KIND, &repository.url, "");
            handler.initialize(&mut data);
            data
        }
    };

    apply_edits(&mut data, args)?;

    let response = handler
        .submit(repository, &data, service)
        .context("Failed to submit issue")?;

    output_result(&response, format);
    Ok(())
}

fn fetch_task_data(
    handler: &GitHubTaskDataHandler,
    service: &dyn IssueService,
    repository: &TaskRepository,
    number: u64,
    partial: bool,
) -> Result<TaskData> {
    let repo = GitHubRepositoryUrl::parse(&repository.url)
        .ok_or_else(|| anyhow!("Invalid repository URL: {}", repository.url))?;
    let credentials = repository.credentials();

    let issue = service
        .get_issue(&repo, number, credentials.as_ref())
        .with_context(|| format!("Failed to fetch issue {}#{}", repo, number))?;

    Ok(handler.from_issue(repository, &issue, partial))
}

fn apply_edits(data: &mut TaskData, args: &SubmitArgs<'_>) -> Result<()> {
    if let Some(title) = args.title {
        set_value(data, GitHubTaskAttribute::Title, title);
    }
    if let Some(body) = args.body {
        set_value(data, GitHubTaskAttribute::Body, body);
    }
    if !args.labels.is_empty() {
        editable(data, GitHubTaskAttribute::Label).set_values(args.labels.to_vec());
    }

    if let Some(operation) = args.operation {
        let operation = GitHubTaskOperation::from(operation);
        let offered: Vec<String> = data
            .operations()
            .iter()
            .map(|op| op.operation_id.clone())
            .collect();
        if !offered.iter().any(|id| id == operation.id()) {
            return Err(anyhow!(
                "Operation '{}' is not available for issue #{} (offered: {})",
                operation,
                data.task_id,
                offered.join(", ")
            ));
        }
        data.select_operation(operation.id());
    }

    Ok(())
}

fn set_value(data: &mut TaskData, attribute: GitHubTaskAttribute, value: &str) {
    editable(data, attribute).set_value(value);
}

/// The attribute for `attribute`, created from its descriptor when missing
fn editable(data: &mut TaskData, attribute: GitHubTaskAttribute) -> &mut TaskAttribute {
    if data.attribute(attribute.id()).is_none() {
        return attribute.descriptor().create(data);
    }
    data.ensure_attribute(attribute.id())
}
