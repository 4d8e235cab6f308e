use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Outcome of one operation on one repository
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OperationStatus {
    Successful,
    Failed,
    Conflicts,
    BranchAlreadyExists,
    BranchDoesNotExist,
    BranchCurrentlyCheckedOut,
    /// Pull moved the branch forward without a merge commit
    FastForward,
    /// Pull found nothing new
    AlreadyUpToDate,
    /// Pull created a merge commit
    Merged,
}

impl OperationStatus {
    /// Whether the batch should report this outcome as a success
    pub fn is_successful(self) -> bool {
        matches!(
            self,
            OperationStatus::Successful
                | OperationStatus::FastForward
                | OperationStatus::AlreadyUpToDate
                | OperationStatus::Merged
        )
    }
}

impl fmt::Display for OperationStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let text = match self {
            OperationStatus::Successful => "successful",
            OperationStatus::Failed => "failed",
            OperationStatus::Conflicts => "conflicts",
            OperationStatus::BranchAlreadyExists => "branch already exists",
            OperationStatus::BranchDoesNotExist => "branch does not exist",
            OperationStatus::BranchCurrentlyCheckedOut => "branch currently checked out",
            OperationStatus::FastForward => "fast-forward",
            OperationStatus::AlreadyUpToDate => "already up-to-date",
            OperationStatus::Merged => "merged",
        };
        write!(f, "{text}")
    }
}

/// Snapshot of a repository's working state.
///
/// Computed on demand and never updated incrementally; callers refresh it
/// when they need current data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectStatus {
    pub current_branch: Option<String>,
    pub conflicting: BTreeSet<String>,
    /// New files staged in the index
    pub added: BTreeSet<String>,
    /// Tracked files whose index content differs from HEAD
    pub changed: BTreeSet<String>,
    /// Tracked files modified in the working tree but not staged
    pub modified: BTreeSet<String>,
    /// Tracked files deleted from the working tree but not staged
    pub missing: BTreeSet<String>,
    /// Deletions staged in the index
    pub removed: BTreeSet<String>,
    pub untracked: BTreeSet<String>,
}

impl ProjectStatus {
    /// Whether there is anything uncommitted, untracked files excluded
    pub fn has_changes(&self) -> bool {
        !(self.conflicting.is_empty()
            && self.added.is_empty()
            && self.changed.is_empty()
            && self.modified.is_empty()
            && self.missing.is_empty()
            && self.removed.is_empty())
    }

    pub fn has_conflicts(&self) -> bool {
        !self.conflicting.is_empty()
    }
}
