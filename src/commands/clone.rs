use std::path::Path;

use anyhow::{Context, Result};
use gitgroup::config::Config;
use gitgroup::directory::{DirectoryService, GitHubDirectory};
use gitgroup::engine::{BatchOperationEngine, BatchOutcome, GroupContext};
use gitgroup::model::Group;

use super::{check_failures, group_store};
use crate::tui::progress_display::{display_outcome, ConsoleProgress};

pub async fn handle_clone(org: &str, dest: Option<&Path>) -> Result<()> {
    let config = Config::load_with_overrides()?;
    let store = group_store(&config);

    // A group cloned before is handed to the engine as is, which refuses it
    let group = match store.as_ref().and_then(|store| store.find(org)) {
        Some(group) => group,
        None => {
            let directory = GitHubDirectory::new(config.github_token.clone(), vec![org.to_string()])?;
            directory
                .find_group(org)
                .await
                .with_context(|| format!("Failed to look up {org} on {}", directory.name()))?
        }
    };

    let context = GroupContext::new(group)
        .with_remote(config.remote.clone())
        .with_current_user(config.identity.clone());
    let mut engine = BatchOperationEngine::new(context);
    let dest = dest.unwrap_or(config.workspace.as_path());
    let mut progress = ConsoleProgress::new();

    let outcome = engine.clone_group(dest, &mut progress)?;
    display_outcome(engine.context().group(), &outcome);

    let group = engine.into_context().into_group();
    if worth_remembering(&group, &outcome) {
        if let Some(store) = store {
            store.upsert(&group)?;
            tracing::debug!("Remembered {} group in {:?}", group.name, store.path());
        }
    }
    check_failures(&progress)
}

/// Store the group only when at least one of its projects reached disk
fn worth_remembering(group: &Group, outcome: &BatchOutcome) -> bool {
    group.is_cloned() && outcome.values().any(|status| status.is_successful())
}
