// ABOUTME: Editor-composed input for issue bodies and comments
// ABOUTME: Detects unmodified placeholder templates and aborts the command

use anyhow::{Context, Result, anyhow, bail};
use dialoguer::Editor;
use gitlab_sdk::CreateIssue;

const ISSUE_TEMPLATE: &str = "### Write title here ###\n\n### Write description here ###";
const COMMENT_TEMPLATE: &str = "### Write comment here ###";

/// Compose a new issue in the user's editor. The first line becomes the
/// title; everything after the first blank separator is the description.
pub fn compose_issue() -> Result<CreateIssue> {
    let text = edit(ISSUE_TEMPLATE)?;
    let (title, description) = split_title_and_body(&text);
    if title.is_empty() {
        bail!("issue title is required");
    }
    Ok(CreateIssue { title, description })
}

/// Edit an existing issue's title and description, pre-filled with the
/// current values.
pub fn compose_update(
    current_title: &str,
    current_description: Option<&str>,
) -> Result<(String, Option<String>)> {
    let template = format!("{current_title}\n\n{}", current_description.unwrap_or_default());
    let text = edit(&template)?;
    let (title, description) = split_title_and_body(&text);
    if title.is_empty() {
        bail!("issue title is required");
    }
    Ok((title, description))
}

/// Compose a comment body in the user's editor.
pub fn compose_comment() -> Result<String> {
    let body = edit(COMMENT_TEMPLATE)?;
    let body = body.trim().to_string();
    if body.is_empty() {
        bail!("comment body is required");
    }
    Ok(body)
}

fn edit(template: &str) -> Result<String> {
    let text = Editor::new()
        .edit(template)
        .context("failed to open editor")?
        .ok_or_else(|| anyhow!("aborted: editor closed without saving"))?;
    if is_unmodified(&text, template) {
        bail!("aborted: message was not modified");
    }
    Ok(text)
}

/// The user signals abort by saving the placeholder template unchanged.
fn is_unmodified(text: &str, template: &str) -> bool {
    text.trim_end() == template.trim_end()
}

fn split_title_and_body(text: &str) -> (String, Option<String>) {
    let mut lines = text.lines();
    let title = lines.next().unwrap_or_default().trim().to_string();
    let body = lines.collect::<Vec<_>>().join("\n");
    let body = body.trim();
    if body.is_empty() {
        (title, None)
    } else {
        (title, Some(body.to_string()))
    }
}
