use std::collections::BTreeSet;

use anyhow::{Context, Error};
use git2::build::CheckoutBuilder;
use git2::{CheckoutNotificationType, Diff, ErrorCode, Tree};

use super::lock::IndexLock;
use crate::git::repository::core::GitRepo;

/// Paths touched by a diff, both sides of renames included
fn diff_paths(diff: &Diff<'_>) -> BTreeSet<String> {
    let mut paths = BTreeSet::new();
    for delta in diff.deltas() {
        for file in [delta.old_file(), delta.new_file()] {
            if let Some(path) = file.path().and_then(|p| p.to_str()) {
                paths.insert(path.to_string());
            }
        }
    }
    paths
}

impl GitRepo {
    /// Predict whether checking out `target` over the working tree of
    /// `current` would be refused by a safe checkout.
    ///
    /// Runs the checkout as a dry run with the index locked, so neither the
    /// working tree nor the index changes. Any failure, including a lock
    /// held by someone else, counts as a conflict.
    pub fn trees_conflict(&self, current: &Tree<'_>, target: &Tree<'_>) -> bool {
        match self.dry_run_checkout(current, target) {
            Ok(conflicts) if conflicts.is_empty() => false,
            Ok(conflicts) => {
                tracing::debug!("Checkout in {:?} would conflict on {:?}", self.path(), conflicts);
                true
            }
            Err(e) => {
                tracing::warn!("Could not predict conflicts in {:?}: {:#}", self.path(), e);
                true
            }
        }
    }

    /// Paths a safe checkout from `current` to `target` refuses to touch
    fn dry_run_checkout(
        &self,
        current: &Tree<'_>,
        target: &Tree<'_>,
    ) -> Result<BTreeSet<String>, Error> {
        let _lock = IndexLock::acquire(self.repo().path())?;

        if current.id() == target.id() {
            return Ok(BTreeSet::new());
        }

        let mut conflicts = BTreeSet::new();
        let result = {
            let mut options = CheckoutBuilder::new();
            options
                .safe()
                .dry_run()
                .update_index(false)
                .notify_on(CheckoutNotificationType::CONFLICT)
                .notify(|_, path, _, _, _| {
                    if let Some(path) = path.and_then(|p| p.to_str()) {
                        conflicts.insert(path.to_string());
                    }
                    true
                });
            self.repo()
                .checkout_tree(target.as_object(), Some(&mut options))
        };

        match result {
            Ok(()) => Ok(conflicts),
            Err(e) if e.code() == ErrorCode::Conflict => {
                if conflicts.is_empty() {
                    conflicts.insert(e.message().to_string());
                }
                Ok(conflicts)
            }
            Err(e) => Err(e).context("Failed to simulate checkout"),
        }
    }

    /// Conflict prediction between two revisions, e.g. `refs/heads/main`.
    ///
    /// Revisions that do not resolve to a commit never conflict.
    pub fn branches_conflict(&self, current: &str, target: &str) -> bool {
        let current = self.repo().revparse_single(current).and_then(|o| o.peel_to_tree());
        let target = self.repo().revparse_single(target).and_then(|o| o.peel_to_tree());

        match (current, target) {
            (Ok(current), Ok(target)) => self.trees_conflict(&current, &target),
            _ => false,
        }
    }

    /// Fetch `branch` from the bound remote and report whether merging it
    /// would touch a file modified in the working tree.
    ///
    /// HEAD and the working tree are left as they were. Failing to fetch or
    /// to read the fetched branch counts as a conflict.
    pub fn would_pull_conflict(&self, branch: &str) -> bool {
        match self.incoming_overlaps_modified(branch) {
            Ok(conflict) => conflict,
            Err(e) => {
                tracing::warn!("Could not check pull of '{}' in {:?}: {:#}", branch, self.path(), e);
                true
            }
        }
    }

    fn incoming_overlaps_modified(&self, branch: &str) -> Result<bool, Error> {
        let head_tree = self
            .repo()
            .head()
            .context("Failed to get HEAD")?
            .peel_to_tree()
            .context("Failed to get HEAD tree")?;

        self.fetch(self.remote_name(), branch)?;

        let fetched_ref = format!("refs/remotes/{}/{branch}", self.remote_name());
        let fetched_tree = self
            .repo()
            .revparse_single(&fetched_ref)
            .context(format!("'{fetched_ref}' not found after fetch"))?
            .peel_to_tree()
            .context("Failed to get fetched tree")?;

        let incoming = self
            .repo()
            .diff_tree_to_tree(Some(&head_tree), Some(&fetched_tree), None)
            .context("Failed to diff against fetched tree")?;
        let incoming = diff_paths(&incoming);

        let modified = self
            .status()
            .map(|status| status.modified)
            .ok_or_else(|| anyhow::anyhow!("Failed to read working tree status"))?;

        Ok(!incoming.is_disjoint(&modified))
    }
}
