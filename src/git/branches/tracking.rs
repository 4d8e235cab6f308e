use anyhow::{Context, Error};

use crate::git::repository::core::GitRepo;
use crate::model::{LOCAL_REF_PREFIX, REMOTE_REF_PREFIX};

impl GitRepo {
    /// Upstream of the current branch in `remote/branch` form
    pub fn tracking_branch(&self) -> Option<String> {
        let branch = self.current_branch_name()?;
        self.get_remote_tracking_info(&branch).ok()
    }

    /// Get remote tracking info for a specific branch
    pub fn get_remote_tracking_info(&self, branch: &str) -> Result<String, Error> {
        let branch_ref = format!("{LOCAL_REF_PREFIX}{branch}");

        let upstream = self
            .repo()
            .branch_upstream_name(&branch_ref)
            .context("No remote tracking branch")?;

        let upstream_str = upstream
            .as_str()
            .ok_or_else(|| anyhow::anyhow!("Failed to convert upstream name to string"))?;

        let tracking_branch = upstream_str
            .strip_prefix(REMOTE_REF_PREFIX)
            .or_else(|| upstream_str.strip_prefix(LOCAL_REF_PREFIX))
            .unwrap_or(upstream_str);

        Ok(tracking_branch.to_string())
    }

    /// Check if every commit of the local branch is reachable from HEAD
    pub fn is_merged_into_head(&self, branch: &str) -> Result<bool, Error> {
        let branch_commit = self
            .repo()
            .revparse_single(&format!("{LOCAL_REF_PREFIX}{branch}"))
            .context(format!("Failed to find branch '{branch}'"))?
            .peel_to_commit()
            .context("Failed to get branch commit")?;

        let head_commit = self
            .repo()
            .head()
            .context("Failed to get HEAD")?
            .peel_to_commit()
            .context("Failed to get HEAD commit")?;

        let merge_base = self
            .repo()
            .merge_base(branch_commit.id(), head_commit.id())
            .context("Failed to find merge base")?;

        Ok(merge_base == branch_commit.id())
    }
}
