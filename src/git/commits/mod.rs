//! Index and working tree mutations, commits and status

pub mod operations;
