//! Opening, creating and cloning repositories, plus commit identities

pub mod core;
pub mod signature;
