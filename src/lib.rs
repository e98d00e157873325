//! Property metadata synthesis for decorated TypeScript model classes.
//!
//! This crate re-exports the workspace crates for hosts that embed the pass:
//!
//! - [`common`]: doc-comment scanning, diagnostic notes, path helpers
//! - [`syntax`]: the front-end model and the `TypeOracle` seam
//! - [`emitter`]: IR and printer for generated code
//! - [`plugin`]: descriptor synthesis, the model-class visitor and the
//!   consolidated artifact
//!
//! A typical host loads options once, visits every source file through one
//! [`plugin::RunContext`], and splices the returned directives into its
//! output (or, in collection mode, writes [`plugin::RunContext::into_artifact`]).

use std::path::Path;

use anyhow::Context;

pub use tsmeta_common as common;
pub use tsmeta_emitter as emitter;
pub use tsmeta_plugin as plugin;
pub use tsmeta_syntax as syntax;

pub use tsmeta_plugin::{
    MetadataArtifact, ModelClassVisitor, PluginOptions, RunContext, TransformContext,
    TransformDirective,
};

pub mod tracing_config;
pub use tracing_config::init_tracing;

/// Read and validate plugin options from a JSON file.
pub fn load_options(path: impl AsRef<Path>) -> anyhow::Result<PluginOptions> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read options file {}", path.display()))?;
    let options = PluginOptions::from_json(&text)
        .with_context(|| format!("invalid options in {}", path.display()))?;
    tracing::debug!(path = %path.display(), mode = ?options.emission_mode(), "options loaded");
    Ok(options)
}
