// ABOUTME: Branch management for ticket-named git branches
// ABOUTME: Creates or checks out issue/<number> branches by shelling out to git

use anyhow::{Context, Result, bail};
use std::process::Command;

/// Branch name derived from an issue display number.
pub fn ticket_branch(ticket: u64) -> String {
    format!("issue/{ticket}")
}

/// Create or check out `branch_name`. With `force`, any existing branch of
/// that name is deleted and recreated from the current HEAD.
pub fn checkout(branch_name: &str, force: bool) -> Result<()> {
    if force {
        // The delete fails harmlessly when the branch does not exist yet.
        let _ = git(&["branch", "-D", branch_name]);
        git(&["checkout", "-b", branch_name])
    } else if branch_exists(branch_name)? {
        git(&["checkout", branch_name])
    } else {
        git(&["checkout", "-b", branch_name])
    }
}

fn branch_exists(branch_name: &str) -> Result<bool> {
    let output = Command::new("git")
        .args(["branch", "--list", branch_name])
        .output()
        .context("failed to run git branch")?;
    Ok(!String::from_utf8_lossy(&output.stdout).trim().is_empty())
}

fn git(args: &[&str]) -> Result<()> {
    let status = Command::new("git")
        .args(args)
        .status()
        .context("failed to run git")?;
    if !status.success() {
        bail!("git {} failed", args.join(" "));
    }
    Ok(())
}
