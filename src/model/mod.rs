//! Domain types: groups, projects, branches and operation outcomes

mod branch;
mod group;
mod project;
mod status;

pub use branch::{strip_remote_alias, Branch, BranchType, LOCAL_REF_PREFIX, REMOTE_REF_PREFIX};
pub use group::Group;
pub use project::{Project, ProjectId};
pub use status::{OperationStatus, ProjectStatus};
