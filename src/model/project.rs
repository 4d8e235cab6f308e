use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::ProjectStatus;
use crate::git::GitRepo;

/// Identifier of a project as reported by the directory service
pub type ProjectId = u64;

/// One repository tracked by the tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub remote_url: String,
    #[serde(default)]
    local_path: Option<PathBuf>,
    #[serde(default)]
    cloned: bool,
    #[serde(skip)]
    status: Option<ProjectStatus>,
}

impl Project {
    pub fn new(id: ProjectId, name: impl Into<String>, remote_url: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            remote_url: remote_url.into(),
            local_path: None,
            cloned: false,
            status: None,
        }
    }

    /// A project that already exists on disk
    pub fn cloned_at(
        id: ProjectId,
        name: impl Into<String>,
        remote_url: impl Into<String>,
        path: impl Into<PathBuf>,
    ) -> Self {
        let mut project = Self::new(id, name, remote_url);
        project.mark_cloned(path);
        project
    }

    pub fn is_cloned(&self) -> bool {
        self.cloned
    }

    pub fn local_path(&self) -> Option<&Path> {
        self.local_path.as_deref()
    }

    /// The local path, but only when the project may be operated on
    pub fn cloned_path(&self) -> Option<&Path> {
        if self.cloned {
            self.local_path.as_deref()
        } else {
            None
        }
    }

    pub fn mark_cloned(&mut self, path: impl Into<PathBuf>) {
        self.cloned = true;
        self.local_path = Some(path.into());
    }

    /// Last computed status snapshot
    pub fn status(&self) -> Option<&ProjectStatus> {
        self.status.as_ref()
    }

    /// Recompute the status snapshot from disk
    pub fn refresh_status(&mut self) -> Option<&ProjectStatus> {
        self.status = self
            .cloned_path()
            .and_then(|path| GitRepo::open(path).ok())
            .and_then(|repo| repo.status());
        self.status.as_ref()
    }

    pub fn has_conflicts(&self) -> bool {
        self.status.as_ref().is_some_and(ProjectStatus::has_conflicts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{create_test_repo, RepoTestOperations};

    #[test]
    fn cloned_path_requires_cloned_flag() {
        let mut project = Project::new(1, "api", "https://example.com/api.git");
        assert_eq!(project.cloned_path(), None);

        project.mark_cloned("/tmp/api");
        assert_eq!(project.cloned_path(), Some(Path::new("/tmp/api")));
    }

    #[test]
    fn refresh_status_reads_repository() -> Result<(), Box<dyn std::error::Error>> {
        let (temp_dir, repo) = create_test_repo();
        repo.add_file_and_commit("README.md", "initial", "Initial commit")?
            .add_file("README.md", "changed")?;

        let mut project = Project::cloned_at(7, "docs", "", temp_dir.path());
        let status = project.refresh_status().unwrap();

        assert_eq!(status.current_branch.as_deref(), Some("master"));
        assert!(status.modified.contains("README.md"));
        assert!(!project.has_conflicts());
        Ok(())
    }

    #[test]
    fn refresh_status_is_empty_for_uncloned_project() {
        let mut project = Project::new(1, "api", "");
        assert!(project.refresh_status().is_none());
    }
}
