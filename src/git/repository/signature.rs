use anyhow::{Context, Error};
use git2::Signature;
use serde::{Deserialize, Serialize};

use super::core::GitRepo;

/// Display name and email used to sign commits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub name: String,
    pub email: String,
}

impl Identity {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
        }
    }
}

impl GitRepo {
    pub(crate) fn create_signature(&self) -> Result<Signature<'static>, Error> {
        let config = self
            .repo()
            .config()
            .context("Failed to get repository config")?;

        let author_name = config.get_string("user.name").context(
            "Failed to get user.name from git config. Run: git config user.name \"Your Name\"",
        )?;

        let author_email = config.get_string("user.email")
            .context("Failed to get user.email from git config. Run: git config user.email \"your@email.com\"")?;

        Signature::now(&author_name, &author_email)
            .context("Failed to create signature with git config values")
    }

    /// Signature for `identity`, else `fallback`, else the repository's git config
    pub(crate) fn signature_for(
        &self,
        identity: Option<&Identity>,
        fallback: Option<&Identity>,
    ) -> Result<Signature<'static>, Error> {
        match identity.or(fallback) {
            Some(identity) => Signature::now(&identity.name, &identity.email)
                .context(format!("Invalid identity '{} <{}>'", identity.name, identity.email)),
            None => self.create_signature(),
        }
    }

    /// Write user.name and user.email into the repository's local config
    pub fn set_user_config(&self, name: &str, email: &str) -> Result<(), Error> {
        let mut config = self
            .repo()
            .config()
            .context("Failed to get repository config")?;
        let mut local = config
            .open_level(git2::ConfigLevel::Local)
            .context("Failed to open local repository config")?;

        local.set_str("user.name", name)?;
        local.set_str("user.email", email)?;
        Ok(())
    }
}
