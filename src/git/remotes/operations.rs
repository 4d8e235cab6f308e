use anyhow::{Context, Error};

use crate::git::repository::core::GitRepo;
use crate::model::OperationStatus;

impl GitRepo {
    /// Add a remote repository
    pub fn add_remote(&self, name: &str, url: &str) -> Result<(), Error> {
        self.repo()
            .remote(name, url)
            .context(format!("Failed to add remote '{name}' with URL '{url}'"))?;

        Ok(())
    }

    /// Get the URL of a specific remote
    pub fn get_remote_url(&self, name: &str) -> Result<String, Error> {
        let remote = self
            .repo()
            .find_remote(name)
            .context(format!("Failed to find remote '{name}'"))?;

        let url = remote
            .url()
            .ok_or_else(|| anyhow::anyhow!("Remote '{name}' has no URL"))?;

        Ok(url.to_string())
    }

    /// Push a local branch to the branch of the same name on `remote_name`
    pub fn push_branch(&self, remote_name: &str, branch_name: &str) -> Result<(), Error> {
        let mut remote = self
            .repo()
            .find_remote(remote_name)
            .context(format!("Failed to find remote '{remote_name}'"))?;

        let refspec = format!("refs/heads/{branch_name}:refs/heads/{branch_name}");

        let mut rejection = None;
        {
            let mut callbacks = git2::RemoteCallbacks::new();
            callbacks.push_update_reference(|refname, status| {
                if let Some(status) = status {
                    rejection = Some(format!("{refname}: {status}"));
                }
                Ok(())
            });
            let mut options = git2::PushOptions::new();
            options.remote_callbacks(callbacks);

            remote
                .push(&[&refspec], Some(&mut options))
                .context(format!(
                    "Failed to push branch '{branch_name}' to remote '{remote_name}'"
                ))?;
        }

        if let Some(rejection) = rejection {
            return Err(anyhow::anyhow!("Remote '{remote_name}' rejected {rejection}"));
        }

        Ok(())
    }

    /// Push the checked-out branch to the bound remote.
    ///
    /// A branch without upstream starts tracking the pushed branch.
    pub fn push(&self) -> OperationStatus {
        let Some(branch) = self.current_branch_name() else {
            tracing::warn!("Nothing to push in {:?}: HEAD is not on a branch", self.path());
            return OperationStatus::Failed;
        };

        if let Err(e) = self.push_branch(self.remote_name(), &branch) {
            tracing::warn!("Failed to push {:?}: {:#}", self.path(), e);
            return OperationStatus::Failed;
        }

        if self.tracking_branch().is_none() {
            let upstream = format!("{}/{branch}", self.remote_name());
            let tracked = self
                .repo()
                .find_branch(&branch, git2::BranchType::Local)
                .and_then(|mut local| local.set_upstream(Some(&upstream)));
            if let Err(e) = tracked {
                tracing::debug!("Could not track '{}' from '{}': {}", upstream, branch, e);
            }
        }

        tracing::info!("Pushed '{}' from {:?}", branch, self.path());
        OperationStatus::Successful
    }
}
