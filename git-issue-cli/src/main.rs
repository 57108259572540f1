// ABOUTME: Main entry point for the git-issue CLI application
// ABOUTME: Resolves configuration, builds the API client, and dispatches subcommands

use anyhow::Result;
use clap::Parser;
use gitlab_sdk::{GitlabClient, GitlabError, IssueFilters};
use std::env;
use std::io::IsTerminal;

use git_issue_cli::cli::{Cli, Commands};
use git_issue_cli::cli_output::CliOutput;
use git_issue_cli::commands;
use git_issue_cli::config::{ConnectionOverrides, ConnectionSettings};

fn main() {
    let cli = Cli::parse();

    let mut log_builder = env_logger::Builder::from_default_env();
    if cli.verbose {
        log_builder.filter_level(log::LevelFilter::Debug);
    }
    log_builder.init();

    let use_color = !cli.no_color
        && env::var("NO_COLOR").is_err()
        && env::var("TERM").unwrap_or_default() != "dumb"
        && std::io::stdout().is_terminal();

    let output = CliOutput::with_color(use_color);
    if let Err(err) = run(cli, use_color) {
        output.error(&format!("{err:#}"));
        if let Some(help) = err.downcast_ref::<GitlabError>().and_then(GitlabError::help_text) {
            eprintln!();
            eprintln!("{help}");
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli, use_color: bool) -> Result<()> {
    let overrides = ConnectionOverrides {
        repo: cli.repo,
        url: cli.url,
        user: cli.user,
        token: cli.token,
    };
    // Configuration problems surface here, before any network call.
    let settings = ConnectionSettings::resolve(&overrides)?;

    let client = GitlabClient::builder()
        .base_url(settings.url)
        .project(settings.repo)
        .username(settings.user)
        .token(settings.token)
        .verify_tls(settings.verify_tls)
        .ca_path(settings.ca_path)
        .build()?;

    match cli.command {
        Commands::List {
            state,
            milestone,
            labels,
            assignee,
            comments,
        } => {
            let filters = IssueFilters {
                state,
                milestone,
                labels,
                assignee,
            };
            commands::list(&client, &filters, comments, use_color)
        }
        Commands::Mine {
            state,
            milestone,
            labels,
            comments,
        } => {
            let filters = IssueFilters {
                state,
                milestone,
                labels,
                assignee: Some(client.username().to_string()),
            };
            commands::list(&client, &filters, comments, use_color)
        }
        Commands::Show { ticket } => commands::show(&client, ticket, use_color),
        Commands::View { ticket } => commands::view(&client, ticket),
        Commands::Add { title, description } => {
            commands::add(&client, title, description, use_color)
        }
        Commands::Update {
            ticket,
            title,
            description,
            state,
        } => commands::update(
            &client,
            ticket,
            title,
            description,
            state.map(Into::into),
            use_color,
        ),
        Commands::Branch { ticket, force } => commands::branch(&client, ticket, force, use_color),
        Commands::Mention { ticket, body } => commands::mention(&client, ticket, body, use_color),
        Commands::Close { ticket, body } => {
            commands::close(&client, ticket, body.as_deref(), use_color)
        }
    }
}
