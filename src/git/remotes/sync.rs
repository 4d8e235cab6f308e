use anyhow::{Context, Error};

use crate::git::repository::core::GitRepo;
use crate::git::repository::signature::Identity;
use crate::model::OperationStatus;

impl GitRepo {
    /// Fetch `branch_name` into its remote-tracking branch
    pub fn fetch(&self, remote_name: &str, branch_name: &str) -> Result<String, Error> {
        let mut remote = self
            .repo()
            .find_remote(remote_name)
            .context(format!("Remote '{remote_name}' not found"))?;

        let refspec =
            format!("refs/heads/{branch_name}:refs/remotes/{remote_name}/{branch_name}");

        remote
            .fetch(&[&refspec], None, None)
            .context("Failed to fetch from remote")?;

        let stats = remote.stats();
        let received_objects = stats.received_objects();
        let total_objects = stats.total_objects();

        if received_objects > 0 {
            Ok(format!(
                "Fetched {received_objects}/{total_objects} objects from {remote_name}"
            ))
        } else {
            Ok("Already up-to-date".to_string())
        }
    }

    /// Bring the checked-out branch up to date with the bound remote.
    ///
    /// The incoming changes are checked against modified files first: if they
    /// overlap the result is `Failed` and nothing but remote-tracking refs
    /// has changed. A merge of diverged history that would leave conflicts
    /// reports `Conflicts`. Merge commits are signed by `current_user`,
    /// falling back to the git config identity.
    pub fn pull(&self, current_user: Option<&Identity>) -> OperationStatus {
        let Some(branch) = self.current_branch_name() else {
            tracing::warn!("Nothing to pull in {:?}: HEAD is not on a branch", self.path());
            return OperationStatus::Failed;
        };

        if self.would_pull_conflict(&branch) {
            tracing::warn!(
                "Pulling '{}' into {:?} would overwrite local changes",
                branch,
                self.path()
            );
            return OperationStatus::Failed;
        }

        match self.merge_fetched(&branch, current_user) {
            Ok(status) => {
                tracing::info!("Pulled '{}' into {:?}: {}", branch, self.path(), status);
                status
            }
            Err(e) => {
                tracing::warn!("Failed to pull '{}' into {:?}: {:#}", branch, self.path(), e);
                OperationStatus::Failed
            }
        }
    }

    fn merge_fetched(
        &self,
        branch: &str,
        current_user: Option<&Identity>,
    ) -> Result<OperationStatus, Error> {
        let remote_branch = format!("{}/{branch}", self.remote_name());
        let remote_commit = self
            .repo()
            .revparse_single(&format!("refs/remotes/{remote_branch}"))
            .context(format!("Remote branch '{remote_branch}' not found after fetch"))?
            .peel_to_commit()
            .context("Failed to get remote commit")?;

        let message = format!("Merge branch '{remote_branch}' into {branch}");
        self.merge_into_head(&remote_commit, &message, current_user)
    }
}
