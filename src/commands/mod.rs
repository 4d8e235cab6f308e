pub mod branch;
pub mod clone;
pub mod commit;
pub mod status;
pub mod sync;

use std::path::Path;

use anyhow::{bail, Context, Result};
use gitgroup::config::Config;
use gitgroup::directory::GitHubDirectory;
use gitgroup::engine::{BatchOperationEngine, GroupContext};
use gitgroup::model::Group;
use gitgroup::storage::GroupStore;

use crate::tui::progress_display::ConsoleProgress;

/// Key the cloned groups of the configured user are stored under
fn user_key(config: &Config) -> String {
    config
        .identity
        .as_ref()
        .map(|identity| identity.email.clone())
        .unwrap_or_else(|| "default".to_string())
}

pub(crate) fn group_store(config: &Config) -> Option<GroupStore> {
    GroupStore::for_user(GitHubDirectory::SERVER, &user_key(config))
}

/// Resolve `--group` to a group: a directory of repositories, or the name
/// of a group cloned earlier. Defaults to the current directory.
fn resolve_group(config: &Config, group_arg: Option<&Path>) -> Result<Group> {
    let arg = group_arg.unwrap_or_else(|| Path::new("."));

    if arg.is_dir() {
        let path = arg
            .canonicalize()
            .with_context(|| format!("Failed to resolve {}", arg.display()))?;
        return Group::import_from_disk(&path)
            .with_context(|| format!("Failed to read group at {}", path.display()));
    }

    let name = arg.to_string_lossy();
    group_store(config)
        .and_then(|store| store.find(&name))
        .with_context(|| format!("No group directory or cloned group named '{name}'"))
}

/// Engine over the resolved group with the configured remote and identity
pub(crate) fn open_engine(group_arg: Option<&Path>) -> Result<BatchOperationEngine> {
    let config = Config::load_with_overrides()?;
    let group = resolve_group(&config, group_arg)?;
    tracing::debug!(
        "Opened {} group with {} projects",
        group.name,
        group.all_projects().len()
    );

    let context = GroupContext::new(group)
        .with_remote(config.remote.clone())
        .with_current_user(config.identity.clone());
    Ok(BatchOperationEngine::new(context))
}

/// Turn the failures a batch reported into the command's exit status
pub(crate) fn check_failures(progress: &ConsoleProgress) -> Result<()> {
    match progress.failures() {
        0 => Ok(()),
        1 => bail!("1 project failed"),
        n => bail!("{n} projects failed"),
    }
}
