use std::path::{Path, PathBuf};

use anyhow::{Context, Error};
use git2::Repository;

/// Remote used when none is configured
pub const DEFAULT_REMOTE: &str = "origin";

#[derive(Debug, Clone)]
pub struct CommitInfo {
    pub hash: String,
    pub message: String,
}

/// Handle bound to one on-disk repository
pub struct GitRepo {
    path: PathBuf,
    repo: Repository,
    remote: String,
}

impl GitRepo {
    /// Open a git repository at the specified path
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        Ok(Self {
            path: path.as_ref().to_path_buf(),
            repo: Repository::open(path).context("Cannot open git repo at given path")?,
            remote: DEFAULT_REMOTE.to_string(),
        })
    }

    /// Clone `url` into `path` and open the result
    pub fn clone<P: AsRef<Path>>(url: &str, path: P) -> Result<Self, Error> {
        let path_ref = path.as_ref();
        let repo = Repository::clone(url, path_ref)
            .context(format!("Failed to clone '{url}' into {path_ref:?}"))?;

        tracing::info!("Cloned {} into {:?}", url, path_ref);

        Ok(Self {
            path: path_ref.to_path_buf(),
            repo,
            remote: DEFAULT_REMOTE.to_string(),
        })
    }

    pub fn init<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path_ref = path.as_ref();

        // Check if it's already a git repository
        if Repository::open(path_ref).is_ok() {
            return Err(anyhow::anyhow!("Directory is already a git repository"));
        }

        let repo = Repository::init(path_ref).context("Failed to initialize git repository")?;

        let git_repo = Self {
            path: path_ref.to_path_buf(),
            repo,
            remote: DEFAULT_REMOTE.to_string(),
        };

        // The master branch will be created when the first commit is made
        git_repo
            .repo
            .set_head("refs/heads/master")
            .context("Failed to set HEAD to master")?;

        Ok(git_repo)
    }

    /// Initialize a new bare git repository
    pub fn init_bare<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let path_ref = path.as_ref();

        if Repository::open(path_ref).is_ok() {
            return Err(anyhow::anyhow!("Directory is already a git repository"));
        }

        let repo =
            Repository::init_bare(path_ref).context("Failed to initialize bare git repository")?;

        let git_repo = Self {
            path: path_ref.to_path_buf(),
            repo,
            remote: DEFAULT_REMOTE.to_string(),
        };

        git_repo
            .repo
            .set_head("refs/heads/master")
            .context("Failed to set HEAD to master")?;

        Ok(git_repo)
    }

    /// Use `remote` instead of `origin` for push, fetch and pull
    pub fn with_remote(mut self, remote: impl Into<String>) -> Self {
        self.remote = remote.into();
        self
    }

    /// Name of the remote this handle pushes to and pulls from
    pub fn remote_name(&self) -> &str {
        &self.remote
    }

    /// Get the path to the repository
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if this is a bare repository
    pub fn is_bare(&self) -> bool {
        self.repo.is_bare()
    }

    /// Get access to the internal git2 Repository
    pub(crate) fn repo(&self) -> &Repository {
        &self.repo
    }
}
