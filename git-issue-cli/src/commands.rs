// ABOUTME: Subcommand implementations gluing the API client to the formatters
// ABOUTME: Each command is one fresh invocation; API calls block sequentially

use anyhow::{Context, Result, bail};
use gitlab_sdk::{CreateIssue, GitlabClient, IssueFilters, StateEvent, UpdateIssue};
use log::info;
use std::process::Command;

use crate::branch;
use crate::editor;
use crate::output::{DetailFormatter, ListFormatter, issue_title};

pub fn list(
    client: &GitlabClient,
    filters: &IssueFilters,
    with_comments: bool,
    use_color: bool,
) -> Result<()> {
    let issues = client.list_issues(filters)?;
    if issues.is_empty() {
        println!("No issues found.");
        return Ok(());
    }

    // One notes round trip per issue, sequentially. Known scalability
    // ceiling for large listings.
    let comment_counts = if with_comments {
        let mut counts = Vec::with_capacity(issues.len());
        for issue in &issues {
            counts.push(client.notes(issue)?.len());
        }
        Some(counts)
    } else {
        None
    };

    let formatter = ListFormatter::new(use_color);
    for line in formatter.render(&issues, comment_counts.as_deref()) {
        println!("{line}");
    }
    Ok(())
}

pub fn show(client: &GitlabClient, ticket: u64, use_color: bool) -> Result<()> {
    let issue = client.fetch_by_iid(ticket)?;
    let comments = client.notes(&issue)?;
    let formatter = DetailFormatter::new(use_color);
    println!(
        "{}",
        formatter.render(&issue, &comments, &client.issue_web_url(issue.iid))
    );
    Ok(())
}

pub fn view(client: &GitlabClient, ticket: u64) -> Result<()> {
    let url = client.issue_web_url(ticket);
    info!("opening {url}");
    let status = Command::new("git")
        .args(["web--browse", &url])
        .status()
        .context("failed to run git web--browse")?;
    if !status.success() {
        bail!("git web--browse exited with {status}");
    }
    Ok(())
}

pub fn add(
    client: &GitlabClient,
    title: Option<String>,
    description: Option<String>,
    use_color: bool,
) -> Result<()> {
    let params = match title {
        Some(title) => CreateIssue { title, description },
        None => editor::compose_issue()?,
    };
    let issue = client.create_issue(&params)?;
    println!("created issue {}", issue_title(&issue, use_color));
    Ok(())
}

pub fn update(
    client: &GitlabClient,
    ticket: u64,
    title: Option<String>,
    description: Option<String>,
    state_event: Option<StateEvent>,
    use_color: bool,
) -> Result<()> {
    let params = if title.is_none() && description.is_none() && state_event.is_none() {
        let current = client.fetch_by_iid(ticket)?;
        let (title, description) =
            editor::compose_update(&current.title, current.description.as_deref())?;
        UpdateIssue {
            title: Some(title),
            description,
            state_event: None,
        }
    } else {
        UpdateIssue {
            title,
            description,
            state_event,
        }
    };
    let issue = client.update_issue(ticket, &params)?;
    println!("updated issue {}", issue_title(&issue, use_color));
    Ok(())
}

pub fn branch(client: &GitlabClient, ticket: u64, force: bool, use_color: bool) -> Result<()> {
    let branch_name = branch::ticket_branch(ticket);
    branch::checkout(&branch_name, force)?;
    show(client, ticket, use_color)
}

pub fn mention(
    client: &GitlabClient,
    ticket: u64,
    body: Option<String>,
    use_color: bool,
) -> Result<()> {
    let issue = client.fetch_by_iid(ticket)?;
    let body = match body {
        Some(body) => body,
        None => editor::compose_comment()?,
    };
    if body.trim().is_empty() {
        bail!("comment body is required");
    }
    client.comment_on(&issue, &body)?;
    println!("commented issue {}", issue_title(&issue, use_color));
    Ok(())
}

pub fn close(
    client: &GitlabClient,
    ticket: u64,
    body: Option<&str>,
    use_color: bool,
) -> Result<()> {
    let issue = client.close_issue(ticket, body)?;
    println!("closed issue {}", issue_title(&issue, use_color));
    Ok(())
}
