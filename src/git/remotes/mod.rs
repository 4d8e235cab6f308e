//! Remotes, push, fetch and the guarded pull

pub mod operations;
pub mod sync;
