//! Persistence of the groups cloned by a user on a directory service

use std::path::{Path, PathBuf};

use crate::model::Group;
use crate::Result;

const CLONED_GROUPS_FILE: &str = "cloned_groups.json";

/// JSON file holding the cloned groups of one user on one server
#[derive(Debug, Clone)]
pub struct GroupStore {
    path: PathBuf,
}

impl GroupStore {
    /// Store under `<data_dir>/gitgroup/<server>/<user>/`
    pub fn for_user(server: &str, user: &str) -> Option<Self> {
        dirs::data_dir().map(|data| Self::in_dir(data.join("gitgroup").join(server).join(user)))
    }

    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(CLONED_GROUPS_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Saved groups, empty when the file is missing or unreadable
    pub fn load(&self) -> Vec<Group> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                tracing::debug!("No cloned groups at {:?}: {}", self.path, e);
                return Vec::new();
            }
        };

        serde_json::from_str(&contents).unwrap_or_else(|e| {
            tracing::warn!("Ignoring unreadable {:?}: {}", self.path, e);
            Vec::new()
        })
    }

    pub fn save(&self, groups: &[Group]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(groups)?;
        std::fs::write(&self.path, json)?;
        tracing::debug!("Saved {} groups to {:?}", groups.len(), self.path);
        Ok(())
    }

    /// Add `group` or replace the saved group with the same name
    pub fn upsert(&self, group: &Group) -> Result<()> {
        let mut groups = self.load();
        match groups.iter_mut().find(|g| g.name == group.name) {
            Some(existing) => *existing = group.clone(),
            None => groups.push(group.clone()),
        }
        self.save(&groups)
    }

    pub fn find(&self, name: &str) -> Option<Group> {
        self.load().into_iter().find(|g| g.name == name)
    }
}
