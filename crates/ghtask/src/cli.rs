use clap::{Parser, Subcommand, ValueEnum};
use github_connector::GitHubTaskOperation;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "ghtask",
    version,
    about = "Work with GitHub issues as task data"
)]
pub struct Cli {
    /// Output format
    #[arg(long, short = 'o', value_enum, global = true, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// When to colorize output
    #[arg(long, value_enum, global = true, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a TOML config file
    #[arg(long, env = "GHTASK_CONFIG", global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Repository URL, e.g. https://github.com/user/project (overrides config file)
    #[arg(long, env = "GHTASK_URL", global = true)]
    pub url: Option<String>,

    /// GitHub user name (overrides config file)
    #[arg(long, env = "GHTASK_USER", global = true)]
    pub user: Option<String>,

    /// GitHub API token (overrides config file)
    #[arg(long, env = "GHTASK_TOKEN", global = true, hide_env_values = true)]
    pub token: Option<String>,

    /// GitHub API base URL, for GitHub Enterprise (overrides config file)
    #[arg(long, env = "GHTASK_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(ValueEnum, Clone, Debug, Copy, Default)]
pub enum ColorChoice {
    /// Colorize output if stdout is a terminal
    #[default]
    Auto,
    /// Always colorize output
    Always,
    /// Never colorize output
    Never,
}

/// State transition to apply when submitting an existing issue
#[derive(ValueEnum, Clone, Debug, Copy, PartialEq, Eq)]
pub enum OperationArg {
    Leave,
    Close,
    Reopen,
}

impl From<OperationArg> for GitHubTaskOperation {
    fn from(arg: OperationArg) -> Self {
        match arg {
            OperationArg::Leave => GitHubTaskOperation::Leave,
            OperationArg::Close => GitHubTaskOperation::Close,
            OperationArg::Reopen => GitHubTaskOperation::Reopen,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check the repository URL, that the repository exists and that the credentials work
    #[command(visible_alias = "check")]
    Validate,

    /// Print the attribute skeleton of a new task
    Init,

    /// Fetch an issue and print it as task data
    #[command(visible_alias = "s")]
    Show {
        /// Issue number
        number: u64,

        /// Treat the issue as summary data and flag missing required attributes
        #[arg(long)]
        partial: bool,
    },

    /// Create a new issue, or edit an existing one and apply an operation
    Submit {
        /// Existing issue number; omit to create a new issue
        #[arg(long, short = 'n')]
        number: Option<u64>,

        /// Issue title (required for new issues)
        #[arg(long, short = 't')]
        title: Option<String>,

        /// Issue body
        #[arg(long, short = 'b')]
        body: Option<String>,

        /// Label to set (repeatable); replaces the existing labels
        #[arg(long = "label", short = 'l')]
        labels: Vec<String>,

        /// State transition for an existing issue
        #[arg(long, value_enum)]
        operation: Option<OperationArg>,
    },
}
