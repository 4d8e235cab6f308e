use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ggr")]
#[command(about = "Run git operations across a group of repositories")]
pub struct Cli {
    /// Group directory, or the name of a cloned group (defaults to the current directory)
    #[arg(long, short, global = true)]
    pub group: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Clone every repository of a GitHub organization as a group
    Clone {
        /// Organization to clone
        org: String,
        /// Destination directory (defaults to the configured workspace)
        #[arg(long)]
        dest: Option<PathBuf>,
    },
    /// Show the working state of every project
    Status {},
    /// List branches across the group
    Branches {
        /// List remote-tracking branches
        #[arg(long, conflicts_with = "all")]
        remote: bool,
        /// List local and remote-tracking branches
        #[arg(long)]
        all: bool,
        /// Only branches present in every project
        #[arg(long)]
        common: bool,
    },
    /// Create a branch at HEAD in every project
    CreateBranch {
        name: String,
        /// Move an existing branch of the same name
        #[arg(long)]
        force: bool,
    },
    /// Switch every project to a branch
    Switch {
        /// Branch to switch to (pick from the common branches when omitted)
        name: Option<String>,
        /// Create a local branch from the remote branch of that name
        #[arg(long)]
        remote: bool,
    },
    /// Delete a local branch in every project
    DeleteBranch {
        name: String,
        /// Delete even if not merged into the current branch
        #[arg(long)]
        force: bool,
    },
    /// Commit in every project
    Commit {
        /// Commit message
        #[arg(short, long)]
        message: String,
        /// Stage modified and deleted tracked files first
        #[arg(short, long)]
        all: bool,
        /// Push after a successful commit
        #[arg(long)]
        push: bool,
    },
    /// Push the current branch of every project
    Push {},
    /// Pull the current branch of every project
    Pull {},
}
