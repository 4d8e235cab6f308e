use std::path::Path;

use anyhow::{Context, Error};
use git2::{Oid, Signature, Sort, Status, StatusOptions};

use crate::git::repository::core::{CommitInfo, GitRepo};
use crate::git::repository::signature::Identity;
use crate::model::{OperationStatus, ProjectStatus};

impl GitRepo {
    pub fn list_commits(&self) -> Result<Vec<CommitInfo>, Error> {
        let mut revwalk = self.repo().revwalk().context("Failed to create revwalk")?;

        revwalk
            .set_sorting(Sort::TOPOLOGICAL | Sort::TIME)
            .context("Failed to set sorting")?;

        match self.repo().head() {
            Ok(_) => {
                revwalk.push_head().context("Failed to push HEAD")?;
            }
            Err(_) => {
                // No commits in repository
                return Ok(Vec::new());
            }
        }

        let mut commits = Vec::new();

        for oid in revwalk {
            let oid = oid.context("Failed to get commit OID")?;
            let commit = self
                .repo()
                .find_commit(oid)
                .context("Failed to find commit")?;

            commits.push(CommitInfo {
                hash: oid.to_string(),
                message: commit.message().unwrap_or("").to_string(),
            });
        }

        Ok(commits)
    }

    pub fn add(&self, pathspecs: &[&str]) -> Result<&Self, Error> {
        let mut index = self
            .repo()
            .index()
            .context("Failed to get repository index")?;

        index
            .add_all(pathspecs, git2::IndexAddOption::DEFAULT, None)
            .context("Failed to add files to index")?;

        index.write().context("Failed to write index")?;

        Ok(self)
    }

    /// Stage one file or directory from the working tree
    pub fn add_path(&self, path: &str) -> bool {
        if path.is_empty() {
            return false;
        }
        if !self.path().join(path).exists() {
            tracing::warn!("Could not add {}: no such file in {:?}", path, self.path());
            return false;
        }

        match self.add(&[path]) {
            Ok(_) => true,
            Err(e) => {
                tracing::warn!("Could not add the {} file: {:#}", path, e);
                false
            }
        }
    }

    /// Stage several paths, returning the ones that were staged
    pub fn add_paths(&self, paths: &[&str]) -> Vec<String> {
        paths
            .iter()
            .filter(|path| self.add_path(path))
            .map(|path| path.to_string())
            .collect()
    }

    /// Stage the deletion of a tracked file
    pub fn remove_path(&self, path: &str) -> bool {
        if path.is_empty() {
            return false;
        }

        match self.unstage_from_index(path) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Could not remove the {} file: {:#}", path, e);
                false
            }
        }
    }

    /// Stage several deletions, returning the ones that were staged
    pub fn remove_paths(&self, paths: &[&str]) -> Vec<String> {
        paths
            .iter()
            .filter(|path| self.remove_path(path))
            .map(|path| path.to_string())
            .collect()
    }

    fn unstage_from_index(&self, path: &str) -> Result<(), Error> {
        let mut index = self
            .repo()
            .index()
            .context("Failed to get repository index")?;

        if index.get_path(Path::new(path), 0).is_none() {
            return Err(anyhow::anyhow!("'{path}' is not tracked"));
        }

        index
            .remove_path(Path::new(path))
            .context("Failed to remove path from index")?;
        index.write().context("Failed to write index")?;
        Ok(())
    }

    /// Reset index entries to HEAD, returning the paths that were reset
    pub fn reset_paths(&self, paths: &[&str]) -> Vec<String> {
        let head = self.repo().head().ok().and_then(|h| h.peel_to_commit().ok());

        paths
            .iter()
            .filter(|path| !path.is_empty())
            .filter(|path| {
                let target = head.as_ref().map(|commit| commit.as_object());
                match self.repo().reset_default(target, [**path]) {
                    Ok(()) => true,
                    Err(e) => {
                        tracing::warn!("Could not reset {}: {}", path, e);
                        false
                    }
                }
            })
            .map(|path| path.to_string())
            .collect()
    }

    /// Discard working tree changes of the given paths
    pub fn replace_with_head_revision(&self, paths: &[&str]) -> bool {
        let paths: Vec<&str> = paths.iter().copied().filter(|p| !p.is_empty()).collect();
        // An empty path list would check out the whole tree
        if paths.is_empty() {
            return false;
        }

        let mut checkout_opts = git2::build::CheckoutBuilder::new();
        checkout_opts.force();
        for path in &paths {
            checkout_opts.path(path);
        }

        match self.repo().checkout_head(Some(&mut checkout_opts)) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Could not replace {:?} with HEAD revision: {}", paths, e);
                false
            }
        }
    }

    /// Commit the index.
    ///
    /// `stage_all` first stages every modified or deleted tracked file; new
    /// files are left alone. Missing identities fall back to `current_user`
    /// and then to the repository's git config.
    pub fn commit(
        &self,
        message: &str,
        stage_all: bool,
        author: Option<&Identity>,
        committer: Option<&Identity>,
        current_user: Option<&Identity>,
    ) -> crate::Result<OperationStatus> {
        if message.is_empty() {
            return Err(crate::Error::invalid("commit message must not be empty"));
        }

        let result = self
            .signature_for(author, current_user)
            .and_then(|author| {
                let committer = self.signature_for(committer, current_user)?;
                self.write_commit(message, stage_all, &author, &committer)
            });

        Ok(match result {
            Ok(oid) => {
                tracing::info!("Committed {} in {:?}", oid, self.path());
                OperationStatus::Successful
            }
            Err(e) => {
                tracing::warn!("Failed to commit in {:?}: {:#}", self.path(), e);
                OperationStatus::Failed
            }
        })
    }

    /// Commit the index signed with the git config identity
    pub fn commit_staged(&self, message: &str) -> Result<String, Error> {
        let signature = self
            .create_signature()
            .context("Failed to create signature")?;

        let oid = self.write_commit(message, false, &signature, &signature)?;
        Ok(oid.to_string())
    }

    fn write_commit(
        &self,
        message: &str,
        stage_all: bool,
        author: &Signature<'_>,
        committer: &Signature<'_>,
    ) -> Result<Oid, Error> {
        let mut index = self
            .repo()
            .index()
            .context("Failed to get repository index")?;

        if stage_all {
            index
                .update_all(["*"], None)
                .context("Failed to stage tracked changes")?;
            index.write().context("Failed to write index")?;
        }

        let tree_id = index
            .write_tree()
            .context("Failed to write tree from index")?;

        let tree = self
            .repo()
            .find_tree(tree_id)
            .context("Failed to find tree")?;

        let parent_commit = match self.repo().head() {
            Ok(head) => {
                let target = head.target().context("Failed to get HEAD target")?;
                Some(
                    self.repo()
                        .find_commit(target)
                        .context("Failed to find parent commit")?,
                )
            }
            Err(_) => None, // First commit, no parent
        };

        let parents: Vec<_> = parent_commit.iter().collect();

        self.repo()
            .commit(Some("HEAD"), author, committer, message, &tree, &parents)
            .context("Failed to create commit")
    }

    /// Snapshot of the working state, `None` if it can not be read
    pub fn status(&self) -> Option<ProjectStatus> {
        match self.read_status() {
            Ok(status) => Some(status),
            Err(e) => {
                tracing::warn!("Failed to read status of {:?}: {:#}", self.path(), e);
                None
            }
        }
    }

    fn read_status(&self) -> Result<ProjectStatus, Error> {
        let mut options = StatusOptions::new();
        options
            .include_untracked(true)
            .recurse_untracked_dirs(true)
            .include_ignored(false);

        let statuses = self
            .repo()
            .statuses(Some(&mut options))
            .context("Failed to get statuses")?;

        let mut status = ProjectStatus {
            current_branch: self.current_branch_name(),
            ..ProjectStatus::default()
        };

        for entry in statuses.iter() {
            let Some(path) = entry.path() else {
                continue;
            };
            let path = path.to_string();
            let flags = entry.status();

            if flags.contains(Status::CONFLICTED) {
                status.conflicting.insert(path);
                continue;
            }
            if flags.contains(Status::INDEX_NEW) {
                status.added.insert(path.clone());
            }
            if flags.intersects(Status::INDEX_MODIFIED | Status::INDEX_RENAMED | Status::INDEX_TYPECHANGE)
            {
                status.changed.insert(path.clone());
            }
            if flags.contains(Status::INDEX_DELETED) {
                status.removed.insert(path.clone());
            }
            if flags.intersects(Status::WT_MODIFIED | Status::WT_TYPECHANGE) {
                status.modified.insert(path.clone());
            }
            if flags.contains(Status::WT_DELETED) {
                status.missing.insert(path.clone());
            }
            if flags.contains(Status::WT_NEW) {
                status.untracked.insert(path);
            }
        }

        Ok(status)
    }
}
