use crate::cli::OutputFormat;
use crate::output::output_result;
use anyhow::{anyhow, Result};
use colored::Colorize;
use github_connector::{IssueService, SettingsValidator, ValidationState};
use task_core::{ProgressMonitor, TaskRepository};

/// Writes validation progress to stderr as whole percentages
struct TerminalProgress {
    total: u32,
    worked: u32,
    quiet: bool,
}

impl TerminalProgress {
    fn new(quiet: bool) -> Self {
        Self {
            total: 0,
            worked: 0,
            quiet,
        }
    }

    fn report(&self, message: &str) {
        if self.quiet {
            return;
        }
        let percent = if self.total == 0 {
            0
        } else {
            self.worked * 100 / self.total
        };
        eprintln!("{} {}", format!("[{:>3}%]", percent).dimmed(), message);
    }
}

impl ProgressMonitor for TerminalProgress {
    fn begin_task(&mut self, name: &str, total_work: u32) {
        self.total = total_work;
        self.worked = 0;
        self.report(name);
    }

    fn sub_task(&mut self, name: &str) {
        self.report(name);
    }

    fn worked(&mut self, work: u32) {
        self.worked = (self.worked + work).min(self.total);
    }

    fn done(&mut self) {
        self.worked = self.total;
    }
}

pub fn handle_validate(
    repository: &TaskRepository,
    service: &dyn IssueService,
    format: OutputFormat,
) -> Result<()> {
    let mut validator = SettingsValidator::new(repository, service);
    let mut monitor = TerminalProgress::new(format == OutputFormat::Json);
    validator.run(&mut monitor);

    let status = validator
        .status()
        .ok_or_else(|| anyhow!("Validation did not complete"))?;

    match validator.state() {
        ValidationState::Valid => {
            output_result(&status, format);
            Ok(())
        }
        _ => Err(anyhow!("{}", status.message)),
    }
}
