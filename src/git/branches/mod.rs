//! Branch listing, creation, switching, deletion and tracking

pub mod operations;
pub mod tracking;
