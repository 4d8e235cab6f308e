use std::fmt;

use serde::{Deserialize, Serialize};

/// Prefix of local branch refs
pub const LOCAL_REF_PREFIX: &str = "refs/heads/";

/// Prefix of remote-tracking branch refs
pub const REMOTE_REF_PREFIX: &str = "refs/remotes/";

/// Which kind of branches to list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BranchType {
    Local,
    Remote,
    /// Local and remote-tracking branches together
    All,
}

impl BranchType {
    pub(crate) fn to_git2(self) -> Option<git2::BranchType> {
        match self {
            BranchType::Local => Some(git2::BranchType::Local),
            BranchType::Remote => Some(git2::BranchType::Remote),
            BranchType::All => None,
        }
    }
}

/// A branch name in short form together with where it lives.
///
/// Remote branches carry the name without the remote alias, so
/// `refs/remotes/origin/main` becomes `Branch::remote("main")`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Branch {
    pub name: String,
    pub branch_type: BranchType,
}

impl Branch {
    pub fn new(name: impl Into<String>, branch_type: BranchType) -> Self {
        Self {
            name: name.into(),
            branch_type,
        }
    }

    pub fn local(name: impl Into<String>) -> Self {
        Self::new(name, BranchType::Local)
    }

    pub fn remote(name: impl Into<String>) -> Self {
        Self::new(name, BranchType::Remote)
    }

    pub fn is_remote(&self) -> bool {
        self.branch_type == BranchType::Remote
    }

    /// Build a branch from a full ref name, classifying it by its prefix.
    ///
    /// Returns `None` for refs that are neither local nor remote-tracking
    /// branches, and for the symbolic `<remote>/HEAD` ref.
    pub fn from_ref_name(full_name: &str) -> Option<Self> {
        if let Some(name) = full_name.strip_prefix(LOCAL_REF_PREFIX) {
            return Some(Self::local(name));
        }

        let rest = full_name.strip_prefix(REMOTE_REF_PREFIX)?;
        let (_remote, name) = rest.split_once('/')?;
        if name == "HEAD" {
            return None;
        }
        Some(Self::remote(name))
    }
}

impl fmt::Display for Branch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.branch_type {
            BranchType::Remote => write!(f, "{} (remote)", self.name),
            _ => write!(f, "{}", self.name),
        }
    }
}

/// Strip a `<remote>/` alias from a branch name if present
pub fn strip_remote_alias<'a>(name: &'a str, remote: &str) -> &'a str {
    name.strip_prefix(remote)
        .and_then(|rest| rest.strip_prefix('/'))
        .unwrap_or(name)
}
