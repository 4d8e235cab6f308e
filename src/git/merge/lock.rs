use std::fs::OpenOptions;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Error};

/// Exclusive hold on a repository's `index.lock`.
///
/// Other git processes refuse to write the index while the guard is alive.
/// The lock file is removed when the guard is dropped.
#[derive(Debug)]
pub struct IndexLock {
    path: PathBuf,
}

impl IndexLock {
    /// Take the lock inside `git_dir`, failing fast if it is already held
    pub fn acquire(git_dir: &Path) -> Result<Self, Error> {
        let path = git_dir.join("index.lock");

        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(_) => Ok(Self { path }),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => Err(anyhow::anyhow!(
                "The index of {git_dir:?} is locked by another process"
            )),
            Err(e) => Err(e).context(format!("Failed to create {path:?}")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for IndexLock {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.path) {
            tracing::debug!("Could not release {:?}: {}", self.path, e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::IndexLock;

    #[test]
    fn lock_is_exclusive_and_released_on_drop() {
        let temp_dir = assert_fs::TempDir::new().unwrap();

        let lock = IndexLock::acquire(temp_dir.path()).unwrap();
        assert!(lock.path().exists());
        assert!(IndexLock::acquire(temp_dir.path()).is_err());

        let path = lock.path().to_path_buf();
        drop(lock);
        assert!(!path.exists());
        assert!(IndexLock::acquire(temp_dir.path()).is_ok());
    }
}
