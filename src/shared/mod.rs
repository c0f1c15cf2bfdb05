//! Shared utilities used by the CLI and library callers

pub mod glob;
pub mod patterns;

pub use patterns::{NamePredicate, PatternKind};
