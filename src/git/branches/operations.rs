use anyhow::{Context, Error};

use crate::git::repository::core::GitRepo;
use crate::model::{strip_remote_alias, Branch, BranchType, OperationStatus, LOCAL_REF_PREFIX};

impl GitRepo {
    /// List branches of the given type, empty if the listing fails
    pub fn branches(&self, branch_type: BranchType) -> Vec<Branch> {
        match self.list_branches(branch_type) {
            Ok(branches) => branches,
            Err(e) => {
                tracing::warn!("Failed to list branches in {:?}: {:#}", self.path(), e);
                Vec::new()
            }
        }
    }

    fn list_branches(&self, branch_type: BranchType) -> Result<Vec<Branch>, Error> {
        let mut branches = Vec::new();

        let branch_iter = self
            .repo()
            .branches(branch_type.to_git2())
            .context("Failed to list branches")?;

        for branch in branch_iter {
            let (branch, _) = branch?;
            if let Some(full_name) = branch.get().name() {
                if let Some(branch) = Branch::from_ref_name(full_name) {
                    branches.push(branch);
                }
            }
        }

        Ok(branches)
    }

    /// Whether a local branch with exactly this name exists
    pub fn has_local_branch(&self, name: &str) -> bool {
        self.branches(BranchType::Local)
            .iter()
            .any(|branch| branch.name == name)
    }

    /// Short name of the checked-out branch, `None` when HEAD is detached or unreadable
    pub fn current_branch_name(&self) -> Option<String> {
        self.get_current_branch().ok()
    }

    pub fn get_head_symbolic_target(&self) -> Result<String, Error> {
        let head_ref = self
            .repo()
            .find_reference("HEAD")
            .context("Failed to find HEAD reference")?;

        match head_ref.symbolic_target() {
            Some(target) => Ok(target.to_string()),
            None => Err(anyhow::anyhow!("HEAD is not a symbolic reference")),
        }
    }

    /// Get the current branch name
    pub fn get_current_branch(&self) -> Result<String, Error> {
        let head_target = self
            .get_head_symbolic_target()
            .context("Failed to get current branch from HEAD")?;

        let branch_name = head_target
            .strip_prefix(LOCAL_REF_PREFIX)
            .ok_or_else(|| anyhow::anyhow!("HEAD is not pointing to a branch"))?;

        Ok(branch_name.to_string())
    }

    /// Create a local branch at HEAD.
    ///
    /// Without `force` an existing branch of the same name is left alone and
    /// reported as `BranchAlreadyExists`.
    pub fn create_branch(&self, name: &str, force: bool) -> OperationStatus {
        if !force && self.has_local_branch(name) {
            return OperationStatus::BranchAlreadyExists;
        }

        match self.create_branch_at_head(name, force) {
            Ok(()) => {
                tracing::info!("Created branch '{}' in {:?}", name, self.path());
                OperationStatus::Successful
            }
            Err(e) => {
                tracing::warn!("Failed to create branch '{}' in {:?}: {:#}", name, self.path(), e);
                OperationStatus::Failed
            }
        }
    }

    fn create_branch_at_head(&self, name: &str, force: bool) -> Result<(), Error> {
        let head_commit = self
            .repo()
            .head()
            .context("Failed to get HEAD")?
            .peel_to_commit()
            .context("Failed to find HEAD commit")?;

        let mut branch = self
            .repo()
            .branch(name, &head_commit, force)
            .context("Failed to create branch")?;

        // The new branch tracks the branch it was started from
        if let Some(start) = self.current_branch_name() {
            if start != name {
                if let Err(e) = branch.set_upstream(Some(&start)) {
                    tracing::debug!("Could not set upstream of '{}' to '{}': {}", name, start, e);
                }
            }
        }

        Ok(())
    }

    /// Switch to a branch after checking that doing so is safe.
    ///
    /// With `as_new_local_from_remote` a local branch is created from the
    /// remote-tracking branch of the same name. The checks run in order and
    /// the first one that applies decides the result: missing branch,
    /// already existing local branch, branch already checked out, predicted
    /// conflict with the working tree.
    pub fn checkout(&self, name: &str, as_new_local_from_remote: bool) -> OperationStatus {
        let target = strip_remote_alias(name, self.remote_name());
        let exists_locally = self.has_local_branch(target);

        if !exists_locally && !as_new_local_from_remote {
            return OperationStatus::BranchDoesNotExist;
        }
        if exists_locally && as_new_local_from_remote {
            return OperationStatus::BranchAlreadyExists;
        }
        if self.current_branch_name().as_deref() == Some(target) {
            return OperationStatus::BranchCurrentlyCheckedOut;
        }

        let target_ref = if as_new_local_from_remote {
            format!("refs/remotes/{}/{target}", self.remote_name())
        } else {
            format!("{LOCAL_REF_PREFIX}{target}")
        };
        let head_ref = self
            .get_head_symbolic_target()
            .unwrap_or_else(|_| "HEAD".to_string());
        if self.branches_conflict(&head_ref, &target_ref) {
            tracing::warn!(
                "Switching {:?} to '{}' would conflict with local changes",
                self.path(),
                target
            );
            return OperationStatus::Conflicts;
        }

        let result = if as_new_local_from_remote {
            self.checkout_new_branch_from_remote(target)
        } else {
            self.checkout_branch(target)
        };

        match result {
            Ok(()) => {
                tracing::info!("Switched {:?} to branch '{}'", self.path(), target);
                OperationStatus::Successful
            }
            Err(e) => {
                tracing::warn!("Failed to switch {:?} to '{}': {:#}", self.path(), target, e);
                OperationStatus::Failed
            }
        }
    }

    pub fn checkout_branch(&self, branch_name: &str) -> Result<(), Error> {
        let branch_ref = format!("{LOCAL_REF_PREFIX}{branch_name}");
        let obj = self.repo().revparse_single(&branch_ref)?;

        if !self.is_bare() {
            self.repo().checkout_tree(&obj, None)?;
        }

        self.repo().set_head(&branch_ref)?;

        Ok(())
    }

    fn checkout_new_branch_from_remote(&self, branch_name: &str) -> Result<(), Error> {
        let upstream = format!("{}/{branch_name}", self.remote_name());
        let remote_commit = self
            .repo()
            .find_branch(&upstream, git2::BranchType::Remote)
            .context(format!("Remote branch '{upstream}' not found"))?
            .get()
            .peel_to_commit()
            .context("Failed to get remote branch commit")?;

        if !self.is_bare() {
            self.repo()
                .checkout_tree(remote_commit.as_object(), None)
                .context("Failed to checkout remote branch tree")?;
        }

        let mut branch = self
            .repo()
            .branch(branch_name, &remote_commit, false)
            .context("Failed to create local branch")?;
        branch
            .set_upstream(Some(&upstream))
            .context("Failed to set upstream")?;

        self.repo()
            .set_head(&format!("{LOCAL_REF_PREFIX}{branch_name}"))
            .context("Failed to set HEAD to new branch")?;

        Ok(())
    }

    /// Create a new branch from the current HEAD and switch to it
    pub fn create_and_checkout_branch(&self, branch_name: &str) -> Result<(), Error> {
        match self.repo().head() {
            Ok(head) => {
                let target_commit = head.target().context("Failed to get HEAD target")?;

                let commit = self
                    .repo()
                    .find_commit(target_commit)
                    .context("Failed to find HEAD commit")?;

                self.repo()
                    .branch(branch_name, &commit, false)
                    .context("Failed to create branch")?;

                self.repo()
                    .set_head(&format!("{LOCAL_REF_PREFIX}{branch_name}"))
                    .context("Failed to set HEAD to new branch")?;
            }
            Err(_) => {
                // No commits yet, HEAD becomes an unborn branch
                self.repo()
                    .set_head(&format!("{LOCAL_REF_PREFIX}{branch_name}"))
                    .context("Failed to set HEAD to new branch")?;
            }
        }

        Ok(())
    }

    /// Delete a local branch.
    ///
    /// The checked-out branch is never deleted. Without `force` a branch
    /// whose commits are not all reachable from HEAD is refused.
    pub fn delete_branch(&self, name: &str, force: bool) -> OperationStatus {
        if self.current_branch_name().as_deref() == Some(name) {
            tracing::warn!("The current branch '{}' can not be deleted", name);
            return OperationStatus::Failed;
        }

        match self.delete_local_branch(name, force) {
            Ok(()) => {
                tracing::info!("Branch '{}' deleted from {:?}", name, self.path());
                OperationStatus::Successful
            }
            Err(e) => {
                tracing::warn!("Failed to delete branch '{}' in {:?}: {:#}", name, self.path(), e);
                OperationStatus::Failed
            }
        }
    }

    fn delete_local_branch(&self, name: &str, force: bool) -> Result<(), Error> {
        let mut branch = self
            .repo()
            .find_branch(name, git2::BranchType::Local)
            .context(format!("Branch '{name}' not found"))?;

        if !force && !self.is_merged_into_head(name)? {
            return Err(anyhow::anyhow!(
                "Branch '{name}' is not fully merged into the current branch"
            ));
        }

        branch.delete().context("Failed to delete branch")?;
        Ok(())
    }
}
