//! Batch git operations over a group of repositories
//!
//! A [`Group`](model::Group) of [`Project`](model::Project)s is handed to a
//! [`BatchOperationEngine`](engine::BatchOperationEngine) which runs clone,
//! branch, commit, push and pull operations on every project in turn,
//! predicting conflicts before touching a working tree.

pub mod catalog;
pub mod config;
pub mod directory;
pub mod engine;
pub mod error;
pub mod git;
pub mod model;
pub mod storage;

#[cfg(test)]
pub mod test_utils;

pub use error::{Error, Result};
