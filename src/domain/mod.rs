//! Domain layer for naming enforcement
//!
//! CDD Principle: Domain Model - The language of naming rules and their outcomes
//! - Issues and summaries are plain values produced by a traversal
//! - The error vocabulary separates hard faults from recorded issues
//! - Independent of filesystem layout, configuration files and terminal output

pub mod violations;

pub use violations::{
    Issue, IssueKind, StandardizerError, StandardizerResult, Summary,
};
