//! Command implementations

pub mod cache;
pub mod completions;
pub mod find;
pub mod platform;
