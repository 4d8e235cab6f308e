use std::path::Path;

use anyhow::Result;
use console::style;
use gitgroup::engine::CommitRequest;

use super::{check_failures, open_engine};
use crate::tui::progress_display::{display_outcome, ConsoleProgress};

pub fn handle_commit(group: Option<&Path>, message: &str, all: bool, push: bool) -> Result<()> {
    let mut engine = open_engine(group)?;
    engine.context_mut().refresh_statuses();

    let context = engine.context();
    let projects: Vec<_> = context
        .correct_projects()
        .into_iter()
        .filter(|project| project.status().is_some_and(|status| status.has_changes()))
        .collect();
    if projects.is_empty() {
        println!("{} Nothing to commit", style("⚠").yellow());
        return Ok(());
    }
    let request = CommitRequest::new(message).stage_all(all);
    let mut progress = ConsoleProgress::new();

    let outcome = if push {
        engine.commit_and_push(&projects, &request, &mut progress)?
    } else {
        engine.commit(&projects, &request, &mut progress)?
    };
    display_outcome(context.group(), &outcome);
    check_failures(&progress)
}
