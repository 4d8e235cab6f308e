use std::path::Path;

use anyhow::Result;

use super::{check_failures, open_engine};
use crate::tui::progress_display::{display_outcome, ConsoleProgress};

pub fn handle_push(group: Option<&Path>) -> Result<()> {
    let mut engine = open_engine(group)?;
    engine.context_mut().refresh_statuses();

    let context = engine.context();
    let projects = context.correct_projects();
    let mut progress = ConsoleProgress::new();

    let outcome = engine.push(&projects, &mut progress)?;
    display_outcome(context.group(), &outcome);
    check_failures(&progress)
}

pub fn handle_pull(group: Option<&Path>) -> Result<()> {
    let mut engine = open_engine(group)?;
    engine.context_mut().refresh_statuses();

    let context = engine.context();
    let projects = context.correct_projects();
    let mut progress = ConsoleProgress::new();

    let outcome = engine.pull(&projects, &mut progress)?;
    display_outcome(context.group(), &outcome);
    check_failures(&progress)
}
