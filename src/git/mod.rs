//! Git operations module
//!
//! Everything the batch engine does to a single working copy goes through
//! [`GitRepo`], split by concern:
//!
//! - `repository`: Opening, cloning and initializing repositories, signatures
//! - `branches`: Branch listing, creation, checkout, deletion and tracking
//! - `commits`: Index mutations, commits and working tree status
//! - `remotes`: Remote configuration, push, fetch and pull
//! - `merge`: Conflict prediction, the index lock and merging fetched work

pub mod branches;
pub mod commits;
pub mod merge;
pub mod remotes;
pub mod repository;

// Re-export the main types
pub use repository::core::{GitRepo, DEFAULT_REMOTE};
pub use repository::signature::Identity;
