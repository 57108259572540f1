// ABOUTME: CLI argument definitions for the git-issue application
// ABOUTME: Defines the command-line interface structure using clap derive macros

use clap::{Parser, Subcommand, ValueEnum};
use gitlab_sdk::StateEvent;

#[derive(Parser, Debug)]
#[command(name = "git-issue")]
#[command(about = "Manage GitLab issues from the command line", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable verbose output for debugging
    #[arg(long, short, global = true)]
    pub verbose: bool,

    /// Project slug override (defaults to git config issue.repo)
    #[arg(long, global = true)]
    pub repo: Option<String>,

    /// API base URL override (defaults to git config issue.url)
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Username override (defaults to git config issue.user)
    #[arg(long, global = true)]
    pub user: Option<String>,

    /// Private token override (defaults to git config issue.token)
    #[arg(long, global = true)]
    pub token: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List issues
    List {
        /// Filter by state (opened or closed)
        #[arg(long)]
        state: Option<String>,

        /// Filter by milestone title
        #[arg(long)]
        milestone: Option<String>,

        /// Filter by comma-separated label list
        #[arg(long)]
        labels: Option<String>,

        /// Keep only issues assigned to this username (applied client-side)
        #[arg(long)]
        assignee: Option<String>,

        /// Annotate each row with its comment count (one request per issue)
        #[arg(long)]
        comments: bool,
    },
    /// List issues assigned to you
    Mine {
        /// Filter by state (opened or closed)
        #[arg(long)]
        state: Option<String>,

        /// Filter by milestone title
        #[arg(long)]
        milestone: Option<String>,

        /// Filter by comma-separated label list
        #[arg(long)]
        labels: Option<String>,

        /// Annotate each row with its comment count (one request per issue)
        #[arg(long)]
        comments: bool,
    },
    /// Show an issue with its comment thread
    Show {
        /// Issue display number
        ticket: u64,
    },
    /// Open an issue in the browser
    View {
        /// Issue display number
        ticket: u64,
    },
    /// Create a new issue
    Add {
        /// Issue title (opens an editor when omitted)
        #[arg(long)]
        title: Option<String>,

        /// Issue description
        #[arg(long)]
        description: Option<String>,
    },
    /// Update an existing issue
    Update {
        /// Issue display number
        ticket: u64,

        /// New title for the issue
        #[arg(long)]
        title: Option<String>,

        /// New description for the issue
        #[arg(long)]
        description: Option<String>,

        /// Trigger a state transition
        #[arg(long, value_enum)]
        state: Option<StateArg>,
    },
    /// Create or check out a branch named after an issue
    Branch {
        /// Issue display number
        ticket: u64,

        /// Recreate the branch even if it already exists
        #[arg(long)]
        force: bool,
    },
    /// Comment on an issue
    #[command(visible_alias = "men")]
    Mention {
        /// Issue display number
        ticket: u64,

        /// Comment body (opens an editor when omitted)
        #[arg(long)]
        body: Option<String>,
    },
    /// Close an issue, optionally with a comment
    #[command(visible_alias = "cl")]
    Close {
        /// Issue display number
        ticket: u64,

        /// Comment to post before closing
        #[arg(long)]
        body: Option<String>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StateArg {
    Close,
    Reopen,
}

impl From<StateArg> for StateEvent {
    fn from(arg: StateArg) -> Self {
        match arg {
            StateArg::Close => StateEvent::Close,
            StateArg::Reopen => StateEvent::Reopen,
        }
    }
}
