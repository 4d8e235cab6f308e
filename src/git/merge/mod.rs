pub mod conflict;
pub mod lock;
pub mod operations;
