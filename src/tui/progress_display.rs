use std::collections::BTreeSet;

use console::style;
use gitgroup::engine::{BatchOutcome, ProgressListener};
use gitgroup::model::{Branch, Group, Project};

/// Prints batch progress to stderr as it happens
#[derive(Debug, Default)]
pub struct ConsoleProgress {
    failures: usize,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of error events seen so far
    pub fn failures(&self) -> usize {
        self.failures
    }
}

fn progress_label(progress: u32) -> String {
    format!("[{progress:>3}%]")
}

impl ProgressListener for ConsoleProgress {
    fn on_success(&mut self, progress: u32, project: Option<&Project>) {
        let name = project.map(|p| p.name.as_str()).unwrap_or("group");
        eprintln!(
            "{} {} {}",
            style(progress_label(progress)).dim(),
            style("✓").green().bold(),
            style(name).cyan()
        );
    }

    fn on_error(&mut self, progress: u32, _project: Option<&Project>, message: &str) {
        self.failures += 1;
        eprintln!(
            "{} {} {}",
            style(progress_label(progress)).dim(),
            style("✗").red().bold(),
            style(message).red()
        );
    }

    fn on_finish(&mut self, message: Option<&str>) {
        if let Some(message) = message {
            eprintln!("{} {}", style("●").green().bold(), message);
        }
    }
}

/// One line per project with the status it ended the batch in
pub fn display_outcome(group: &Group, outcome: &BatchOutcome) {
    for project in group.all_projects() {
        let Some(status) = outcome.get(&project.id) else {
            continue;
        };
        let marker = if status.is_successful() {
            style("✓").green().bold()
        } else {
            style("✗").red().bold()
        };
        println!("{} {:<30} {}", marker, project.name, style(status).dim());
    }
}

pub fn display_project_status(project: &Project) {
    if !project.is_cloned() {
        println!("{} {}", style("⚠").yellow(), style(&project.name).dim());
        println!("  {}", style("not cloned").yellow());
        return;
    }

    let Some(status) = project.status() else {
        println!("{} {}", style("✗").red().bold(), style(&project.name).cyan().bold());
        println!("  {}", style("status unavailable").red());
        return;
    };

    let branch = status.current_branch.as_deref().unwrap_or("(detached)");
    let marker = if status.has_conflicts() {
        style("!").red().bold()
    } else if status.has_changes() {
        style("●").yellow().bold()
    } else {
        style("●").green().bold()
    };
    println!(
        "{} {} {}",
        marker,
        style(&project.name).cyan().bold(),
        style(format!("[{branch}]")).dim()
    );

    let sections = [
        ("conflicting", &status.conflicting),
        ("added", &status.added),
        ("changed", &status.changed),
        ("removed", &status.removed),
        ("modified", &status.modified),
        ("missing", &status.missing),
        ("untracked", &status.untracked),
    ];
    for (label, files) in sections {
        for file in files {
            println!("  {:<12} {}", style(label).dim(), file);
        }
    }
}

pub fn display_branches(branches: &BTreeSet<Branch>) {
    if branches.is_empty() {
        println!("{} No branches found", style("⚠").yellow());
        return;
    }

    for branch in branches {
        let marker = if branch.is_remote() {
            style("↳").blue()
        } else {
            style("•").cyan()
        };
        println!("{} {}", marker, branch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn console_progress_counts_errors_only() {
        let mut progress = ConsoleProgress::new();
        let project = Project::new(1, "api", "https://example.com/api.git");

        progress.on_start();
        progress.on_success(50, Some(&project));
        progress.on_error(100, None, "Failed to push api project: failed");
        progress.on_finish(None);

        assert_eq!(progress.failures(), 1);
    }

    #[test]
    fn progress_label_is_padded() {
        assert_eq!(progress_label(5), "[  5%]");
        assert_eq!(progress_label(100), "[100%]");
    }
}
