use anyhow::{Context, Error};
use git2::{build::CheckoutBuilder, Commit};

use crate::git::repository::core::GitRepo;
use crate::git::repository::signature::Identity;
use crate::model::{OperationStatus, LOCAL_REF_PREFIX};

impl GitRepo {
    /// Merge `target` into the checked-out branch.
    ///
    /// Fast-forwards when possible, otherwise records a merge commit signed
    /// by `current_user` or the git config identity. A merge that would
    /// leave conflicts changes nothing and reports `Conflicts`. Local edits
    /// are never overwritten.
    pub(crate) fn merge_into_head(
        &self,
        target: &Commit<'_>,
        message: &str,
        current_user: Option<&Identity>,
    ) -> Result<OperationStatus, Error> {
        let head_commit = self
            .repo()
            .head()
            .context("Failed to get HEAD")?
            .peel_to_commit()
            .context("Failed to get current commit")?;

        if head_commit.id() == target.id() {
            return Ok(OperationStatus::AlreadyUpToDate);
        }

        let merge_base = self
            .repo()
            .merge_base(head_commit.id(), target.id())
            .context("Failed to find merge base")?;

        if merge_base == target.id() {
            // Local branch is ahead
            return Ok(OperationStatus::AlreadyUpToDate);
        }

        if merge_base == head_commit.id() {
            let branch_ref = format!(
                "{LOCAL_REF_PREFIX}{}",
                self.get_current_branch()
                    .context("Failed to get current branch")?
            );

            if !self.is_bare() {
                let mut checkout_opts = CheckoutBuilder::new();
                checkout_opts.safe();
                self.repo()
                    .checkout_tree(target.as_object(), Some(&mut checkout_opts))
                    .context("Failed to checkout target tree")?;
            }

            self.repo()
                .reference(&branch_ref, target.id(), true, "Fast-forward merge")
                .context("Failed to update branch reference")?;

            return Ok(OperationStatus::FastForward);
        }

        let mut index = self
            .repo()
            .merge_commits(&head_commit, target, None)
            .context("Failed to merge commits")?;

        if index.has_conflicts() {
            tracing::warn!(
                "Merging {} into {:?} leaves conflicts, nothing was changed",
                target.id(),
                self.path()
            );
            return Ok(OperationStatus::Conflicts);
        }

        let signature = self.signature_for(None, current_user)?;
        let tree_id = index
            .write_tree_to(self.repo())
            .context("Failed to write merge tree")?;
        let tree = self
            .repo()
            .find_tree(tree_id)
            .context("Failed to find merge tree")?;

        if !self.is_bare() {
            let mut checkout_opts = CheckoutBuilder::new();
            checkout_opts.safe();
            self.repo()
                .checkout_tree(tree.as_object(), Some(&mut checkout_opts))
                .context("Failed to checkout merge tree")?;
        }

        let merge_commit_id = self
            .repo()
            .commit(
                Some("HEAD"),
                &signature,
                &signature,
                message,
                &tree,
                &[&head_commit, target],
            )
            .context("Failed to create merge commit")?;

        tracing::debug!("Merge commit {} created in {:?}", merge_commit_id, self.path());
        Ok(OperationStatus::Merged)
    }
}
