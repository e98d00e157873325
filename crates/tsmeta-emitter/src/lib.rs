//! Lowered IR and printer for code generated by the metadata pass.
//!
//! The pass produces IR trees (`IRNode`) instead of strings: the injected
//! static accessor, lazy type thunks, and the consolidated metadata module.
//! `IRPrinter` renders them to source text.

pub mod ir;
pub use ir::{IRNode, IRParam, IRProperty, IRPropertyKey};

pub mod ir_printer;
pub use ir_printer::IRPrinter;
