//! Configuration for gitgroup
//!
//! Loaded with the following priority (highest to lowest):
//! 1. Environment variables (GITGROUP_*, GITHUB_TOKEN)
//! 2. Config file (~/.config/gitgroup/config.toml)
//! 3. Default values

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::git::{Identity, DEFAULT_REMOTE};
use crate::{Error, Result};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Directory groups are cloned into
    pub workspace: PathBuf,

    /// Remote used for push, fetch and pull
    pub remote: String,

    /// Commit identity used when a commit names none
    pub identity: Option<Identity>,

    /// Token for the GitHub directory service
    pub github_token: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workspace: dirs::home_dir()
                .map(|home| home.join("gitgroup"))
                .unwrap_or_else(|| PathBuf::from("gitgroup")),
            remote: DEFAULT_REMOTE.to_string(),
            identity: None,
            github_token: None,
        }
    }
}

impl Config {
    /// Load configuration from the default config file location
    ///
    /// Returns default config if file doesn't exist
    pub fn load() -> Result<Self> {
        match Self::default_config_path() {
            Some(path) if path.exists() => Self::load_from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {e}", path.display())))
    }

    /// Returns `~/.config/gitgroup/config.toml` on Unix
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("gitgroup").join("config.toml"))
    }

    /// Apply environment variable overrides
    ///
    /// Supported variables:
    /// - GITGROUP_WORKSPACE: Clone destination
    /// - GITGROUP_REMOTE: Remote name
    /// - GITGROUP_USER_NAME / GITGROUP_USER_EMAIL: Commit identity
    /// - GITHUB_TOKEN: Directory service token
    pub fn with_env_overrides(self) -> Self {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    fn with_overrides_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(workspace) = lookup("GITGROUP_WORKSPACE") {
            self.workspace = PathBuf::from(workspace);
        }

        if let Some(remote) = lookup("GITGROUP_REMOTE") {
            self.remote = remote;
        }

        let name = lookup("GITGROUP_USER_NAME");
        let email = lookup("GITGROUP_USER_EMAIL");
        self.identity = match (self.identity.take(), name, email) {
            (_, Some(name), Some(email)) => Some(Identity::new(name, email)),
            (Some(mut identity), name, email) => {
                if let Some(name) = name {
                    identity.name = name;
                }
                if let Some(email) = email {
                    identity.email = email;
                }
                Some(identity)
            }
            (None, _, _) => None,
        };

        if let Some(token) = lookup("GITHUB_TOKEN") {
            self.github_token = Some(token);
        }

        self
    }

    /// Load configuration with all overrides applied
    pub fn load_with_overrides() -> Result<Self> {
        Ok(Self::load()?.with_env_overrides())
    }
}
