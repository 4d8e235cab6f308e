use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::Project;
use crate::git::GitRepo;
use crate::Result;

/// A named collection of projects, possibly nested
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
    /// Path of the group on the remote directory service
    pub remote_path: String,
    #[serde(default)]
    cloned: bool,
    #[serde(default)]
    local_path: Option<PathBuf>,
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub subgroups: Vec<Group>,
}

impl Group {
    pub fn new(name: impl Into<String>, remote_path: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            remote_path: remote_path.into(),
            cloned: false,
            local_path: None,
            projects: Vec::new(),
            subgroups: Vec::new(),
        }
    }

    pub fn with_projects(mut self, projects: Vec<Project>) -> Self {
        self.projects = projects;
        self
    }

    pub fn is_cloned(&self) -> bool {
        self.cloned
    }

    pub fn local_path(&self) -> Option<&Path> {
        self.local_path.as_deref()
    }

    pub fn mark_cloned(&mut self, path: impl Into<PathBuf>) {
        self.cloned = true;
        self.local_path = Some(path.into());
    }

    /// All projects of this group and its subgroups, depth first
    pub fn all_projects(&self) -> Vec<&Project> {
        let mut projects: Vec<&Project> = self.projects.iter().collect();
        for subgroup in &self.subgroups {
            projects.extend(subgroup.all_projects());
        }
        projects
    }

    /// Build a cloned group from the repositories found directly under `path`.
    ///
    /// Directories that are not git repositories are ignored. Projects get
    /// sequential ids in directory-name order.
    pub fn import_from_disk(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        let mut dirs: Vec<PathBuf> = std::fs::read_dir(path)?
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|p| p.is_dir())
            .collect();
        dirs.sort();

        let mut projects = Vec::new();
        for dir in dirs {
            let repo = match GitRepo::open(&dir) {
                Ok(repo) => repo,
                Err(_) => {
                    tracing::debug!("Skipping {:?}: not a git repository", dir);
                    continue;
                }
            };
            let project_name = dir
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            let remote_url = repo.get_remote_url(repo.remote_name()).unwrap_or_default();
            let id = projects.len() as u64 + 1;
            projects.push(Project::cloned_at(id, project_name, remote_url, dir));
        }

        let mut group = Group::new(name.clone(), name).with_projects(projects);
        group.mark_cloned(path);
        Ok(group)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::git::GitRepo;

    #[test]
    fn import_from_disk_picks_up_repositories_only() {
        let temp_dir = assert_fs::TempDir::new().unwrap();
        GitRepo::init(temp_dir.path().join("beta")).unwrap();
        GitRepo::init(temp_dir.path().join("alpha")).unwrap();
        std::fs::create_dir(temp_dir.path().join("not-a-repo")).unwrap();

        let group = Group::import_from_disk(temp_dir.path()).unwrap();

        assert!(group.is_cloned());
        assert_eq!(group.local_path(), Some(temp_dir.path()));
        let names: Vec<&str> = group.projects.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["alpha", "beta"]);
        assert!(group.projects.iter().all(Project::is_cloned));
        assert_eq!(group.projects[0].id, 1);
    }

    #[test]
    fn all_projects_walks_subgroups() {
        let mut parent = Group::new("platform", "platform")
            .with_projects(vec![Project::new(1, "api", "")]);
        parent.subgroups.push(
            Group::new("tools", "platform/tools").with_projects(vec![Project::new(2, "cli", "")]),
        );

        let ids: Vec<u64> = parent.all_projects().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }
}
