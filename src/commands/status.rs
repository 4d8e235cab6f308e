use std::path::Path;

use anyhow::Result;
use console::style;

use super::open_engine;
use crate::tui::progress_display::display_project_status;

pub fn handle_status(group: Option<&Path>) -> Result<()> {
    let mut engine = open_engine(group)?;
    engine.context_mut().refresh_statuses();

    let context = engine.context();
    println!("{} {}", style("Group").dim(), style(&context.group().name).bold());
    for project in context.projects() {
        display_project_status(project);
    }
    Ok(())
}
