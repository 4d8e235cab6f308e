mod cli;
mod commands;
mod tui;

use clap::Parser;
use cli::{Cli, Commands};
use console::style;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_env("GITGROUP_LOG").unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let cli = Cli::parse();
    let group = cli.group.as_deref();

    let result = match &cli.command {
        Commands::Clone { org, dest } => commands::clone::handle_clone(org, dest.as_deref()).await,
        Commands::Status {} => commands::status::handle_status(group),
        Commands::Branches {
            remote,
            all,
            common,
        } => commands::branch::handle_branches(group, *remote, *all, *common),
        Commands::CreateBranch { name, force } => {
            commands::branch::handle_create_branch(group, name, *force)
        }
        Commands::Switch { name, remote } => {
            commands::branch::handle_switch(group, name.as_deref(), *remote)
        }
        Commands::DeleteBranch { name, force } => {
            commands::branch::handle_delete_branch(group, name, *force)
        }
        Commands::Commit { message, all, push } => {
            commands::commit::handle_commit(group, message, *all, *push)
        }
        Commands::Push {} => commands::sync::handle_push(group),
        Commands::Pull {} => commands::sync::handle_pull(group),
    };

    if let Err(e) = result {
        eprintln!("{} {:#}", style("Error:").red().bold(), e);
        std::process::exit(1);
    }
}
