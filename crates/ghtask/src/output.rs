use crate::cli::OutputFormat;
use colored::Colorize;
use serde::Serialize;
use task_core::{
    AttributeType, RepositoryResponse, ResponseKind, Severity, Status, TaskData, OPERATION,
};

pub fn output_result<T: Serialize + Displayable>(result: &T, format: OutputFormat) {
    match format {
        OutputFormat::Json => {
            if let Ok(json) = serde_json::to_string_pretty(result) {
                println!("{}", json);
            }
        }
        OutputFormat::Text => {
            println!("{}", result.display());
        }
    }
}

#[derive(Serialize)]
pub struct JsonError {
    pub error: bool,
    pub code: String,
    pub message: String,
}

pub fn output_error(err: &anyhow::Error, format: OutputFormat) {
    let message = match format {
        OutputFormat::Json => {
            let json_err = JsonError {
                error: true,
                code: "error".to_string(),
                message: format!("{:#}", err),
            };
            serde_json::to_string_pretty(&json_err)
                .unwrap_or_else(|_| format!(r#"{{"error": true, "message": "{}"}}"#, err))
        }
        OutputFormat::Text => format!("{}: {:#}", "Error".red().bold(), err),
    };
    eprintln!("{}", message);
}

pub trait Displayable {
    fn display(&self) -> String;
}

impl Displayable for TaskData {
    fn display(&self) -> String {
        let heading = if self.is_new() {
            "New task".to_string()
        } else {
            format!("#{}", self.task_id)
        };
        let mut output = format!("{}", heading.cyan().bold());
        if self.partial {
            output.push_str(&format!(" {}", "(partial)".yellow()));
        }

        for attr in self.attributes() {
            if attr.meta_data.attribute_type == AttributeType::Operation {
                continue;
            }
            let value = if attr.values.is_empty() {
                "-".dimmed().to_string()
            } else {
                attr.values.join(", ")
            };
            output.push_str(&format!("\n  {} {}", attr.meta_data.label.dimmed(), value));
        }

        let selected = self.value(OPERATION);
        let operations: Vec<String> = self
            .operations()
            .iter()
            .map(|op| {
                if Some(op.operation_id.as_str()) == selected {
                    format!("{} (default)", op.label.green())
                } else {
                    op.label.clone()
                }
            })
            .collect();
        if !operations.is_empty() {
            output.push_str(&format!(
                "\n  {} {}",
                "Operations:".dimmed(),
                operations.join(", ")
            ));
        }

        output
    }
}

impl Displayable for RepositoryResponse {
    fn display(&self) -> String {
        let verb = match self.kind {
            ResponseKind::TaskCreated => "Created",
            ResponseKind::TaskUpdated => "Updated",
        };
        format!("{} issue {}", verb, format!("#{}", self.task_id).cyan().bold())
    }
}

impl Displayable for Status {
    fn display(&self) -> String {
        match self.severity {
            Severity::Ok => self.message.green().to_string(),
            Severity::Warning => self.message.yellow().to_string(),
            Severity::Error => self.message.red().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_data_display_lists_attributes_and_operations() {
        colored::control::set_override(false);

        let mut data = TaskData::new("github", "https://github.com/octo/demo", "42");
        let op = data.create_attribute(OPERATION);
        op.meta_data.attribute_type = AttributeType::Operation;
        let leave = data.create_attribute("task.common.operation-leave");
        task_core::TaskOperation::apply_to(leave, "leave", "leaveopen");
        let close = data.create_attribute("task.common.operation-close");
        task_core::TaskOperation::apply_to(close, "close", "close");
        data.select_operation("leave");
        let title = data.create_attribute("task.common.summary");
        title.meta_data.label = "Summary:".to_string();
        title.set_value("Bug");

        let text = data.display();
        assert!(text.starts_with("#42"));
        assert!(text.contains("Summary: Bug"));
        assert!(text.contains("Operations: leaveopen (default), close"));
    }

    #[test]
    fn test_response_display() {
        colored::control::set_override(false);
        let response = RepositoryResponse::new(ResponseKind::TaskCreated, "7");
        assert_eq!(response.display(), "Created issue #7");
    }
}
