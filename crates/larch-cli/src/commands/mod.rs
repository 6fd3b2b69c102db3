//! CLI command implementations.

pub mod catalog;
pub mod lower;
pub mod version;
