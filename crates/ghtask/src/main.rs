mod cli;
mod color;
mod commands;
mod config;
mod logging;
mod output;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use commands::issue::SubmitArgs;
use config::Config;
use output::output_error;
use std::process::ExitCode;
use tracing::debug;

fn main() -> ExitCode {
    let cli = Cli::parse();
    color::init(cli.color);
    logging::init(cli.verbose);

    let format = cli.format;
    if let Err(e) = run(cli) {
        output_error(&e, format);
        return ExitCode::from(1);
    }

    ExitCode::SUCCESS
}

fn run(cli: Cli) -> Result<()> {
    let mut config = Config::load(cli.config.clone())?;
    config.merge_with_cli(
        cli.url.clone(),
        cli.user.clone(),
        cli.token.clone(),
        cli.api_url.clone(),
    );
    debug!(api_url = %config.api_url, url = ?config.url, "configuration loaded");

    let handler = config.handler();

    match &cli.command {
        // The skeleton needs no repository access
        Commands::Init => {
            commands::issue::handle_init(&handler, config.url.as_deref().unwrap_or(""), cli.format)
        }
        Commands::Validate => {
            let repository = config.repository()?;
            commands::validate::handle_validate(&repository, &config.client(), cli.format)
        }
        Commands::Show { number, partial } => {
            let repository = config.repository()?;
            commands::issue::handle_show(
                &handler,
                &config.client(),
                &repository,
                *number,
                *partial,
                cli.format,
            )
        }
        Commands::Submit {
            number,
            title,
            body,
            labels,
            operation,
        } => {
            let repository = config.authenticated_repository()?;
            let args = SubmitArgs {
                number: *number,
                title: title.as_deref(),
                body: body.as_deref(),
                labels,
                operation: *operation,
            };
            commands::issue::handle_submit(&handler, &config.client(), &repository, &args, cli.format)
        }
    }
}
