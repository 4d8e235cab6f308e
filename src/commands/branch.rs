use std::path::Path;

use anyhow::{bail, Result};
use console::style;
use gitgroup::catalog;
use gitgroup::model::{Branch, BranchType};
use inquire::Select;

use super::{check_failures, open_engine};
use crate::tui::progress_display::{display_branches, display_outcome, ConsoleProgress};

pub fn handle_branches(group: Option<&Path>, remote: bool, all: bool, common: bool) -> Result<()> {
    let engine = open_engine(group)?;
    let branch_type = if all {
        BranchType::All
    } else if remote {
        BranchType::Remote
    } else {
        BranchType::Local
    };

    let branches = catalog::branches_of_projects(engine.context().projects(), branch_type, common);
    display_branches(&branches);
    Ok(())
}

pub fn handle_create_branch(group: Option<&Path>, name: &str, force: bool) -> Result<()> {
    let engine = open_engine(group)?;
    let projects = engine.context().projects();
    let mut progress = ConsoleProgress::new();

    let outcome = engine.create_branch(&projects, name, force, &mut progress)?;
    display_outcome(engine.context().group(), &outcome);
    check_failures(&progress)
}

pub fn handle_switch(group: Option<&Path>, name: Option<&str>, remote: bool) -> Result<()> {
    let engine = open_engine(group)?;
    let projects = engine.context().projects();

    let branch = match name {
        Some(name) if remote => Branch::remote(name),
        Some(name) => Branch::local(name),
        None => {
            let common: Vec<Branch> =
                catalog::branches_of_projects(projects.iter().copied(), BranchType::All, true)
                    .into_iter()
                    .collect();
            if common.is_empty() {
                bail!("The projects of this group have no branch in common");
            }
            match Select::new("Select a branch:", common).prompt() {
                Ok(branch) => branch,
                Err(err) => {
                    eprintln!(
                        "{} Selection cancelled: {}",
                        style("⚠").yellow().bold(),
                        style(err).yellow()
                    );
                    return Ok(());
                }
            }
        }
    };

    let mut progress = ConsoleProgress::new();
    let outcome = engine.switch_to(&projects, &branch, &mut progress)?;
    display_outcome(engine.context().group(), &outcome);
    check_failures(&progress)
}

pub fn handle_delete_branch(group: Option<&Path>, name: &str, force: bool) -> Result<()> {
    let engine = open_engine(group)?;
    let projects = engine.context().projects();
    let mut progress = ConsoleProgress::new();

    let outcome = engine.delete_branch(&projects, name, force, &mut progress)?;
    display_outcome(engine.context().group(), &outcome);
    check_failures(&progress)
}
