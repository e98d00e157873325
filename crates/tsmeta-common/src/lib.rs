//! Common types and utilities for the tsmeta metadata pass.
//!
//! This crate provides foundational pieces shared by the tsmeta crates:
//! - Comment scanning and doc-comment parsing (`DocComment`, `DocTag`)
//! - Diagnostic notes for skipped classes and properties
//! - Import specifier normalization for module paths
//! - Centralized limits and thresholds

// Comment parsing utilities
pub mod comments;
pub use comments::{CommentRange, DocComment, DocTag};

// Non-fatal diagnostic notes
pub mod diagnostics;
pub use diagnostics::{DiagnosticCategory, DiagnosticNote};

// Centralized limits and thresholds
pub mod limits;

// Module path normalization
pub mod paths;
