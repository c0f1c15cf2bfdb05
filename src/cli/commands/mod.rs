//! Command implementations for the backsearch CLI
//!
//! Each command is organized into its own module.

pub mod config;
pub mod find;
pub mod version;
