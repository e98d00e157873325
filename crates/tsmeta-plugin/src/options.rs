//! Plugin options.
//!
//! Options arrive as JSON from the host build tool. Every field is optional;
//! missing fields take the defaults below.

use serde::{Deserialize, Serialize};

pub const DEFAULT_METADATA_FACTORY_NAME: &str = "_OPENAPI_METADATA_FACTORY";

/// How class metadata leaves the pass.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EmissionMode {
    /// Append a static accessor returning the metadata to each class.
    Augment,
    /// Leave classes untouched and record metadata in the run's registry.
    Collect,
}

#[derive(Debug, thiserror::Error)]
pub enum OptionsError {
    #[error("invalid plugin options: {0}")]
    Json(#[from] serde_json::Error),
    #[error("`readonly` mode requires `pathToSource`")]
    MissingPathToSource,
    #[error("`metadataFactoryName` must be a plain identifier, got {0:?}")]
    InvalidFactoryName(String),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PluginOptions {
    /// Collect metadata out of band instead of augmenting classes.
    pub readonly: bool,
    /// Derive `description`, `example(s)` and `deprecated` from doc comments.
    pub introspect_comments: bool,
    /// Translate class-validator decorators into schema constraints.
    pub class_validator_shim: bool,
    /// Key the comment prose is stored under.
    pub dto_key_of_comment: String,
    /// Base directory registry keys and late-bound imports are relative to.
    pub path_to_source: Option<String>,
    /// Record diagnostic notes for skipped classes and properties.
    pub debug: bool,
    pub metadata_factory_name: String,
    /// Decorators that exclude a property from the metadata.
    pub hidden_decorators: Vec<String>,
    /// Decorators whose object-literal argument seeds the descriptor.
    pub seed_decorators: Vec<String>,
}

impl Default for PluginOptions {
    fn default() -> Self {
        Self {
            readonly: false,
            introspect_comments: false,
            class_validator_shim: true,
            dto_key_of_comment: "description".to_string(),
            path_to_source: None,
            debug: false,
            metadata_factory_name: DEFAULT_METADATA_FACTORY_NAME.to_string(),
            hidden_decorators: vec!["ApiHideProperty".to_string()],
            seed_decorators: vec![
                "ApiProperty".to_string(),
                "ApiPropertyOptional".to_string(),
                "ApiResponseProperty".to_string(),
            ],
        }
    }
}

impl PluginOptions {
    /// Parse and validate options JSON.
    pub fn from_json(json: &str) -> Result<Self, OptionsError> {
        let options: PluginOptions = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    pub fn validate(&self) -> Result<(), OptionsError> {
        if self.readonly && self.path_to_source.is_none() {
            return Err(OptionsError::MissingPathToSource);
        }
        if !tsmeta_emitter::ir_printer::is_identifier_name(&self.metadata_factory_name) {
            return Err(OptionsError::InvalidFactoryName(
                self.metadata_factory_name.clone(),
            ));
        }
        Ok(())
    }

    pub fn emission_mode(&self) -> EmissionMode {
        if self.readonly {
            EmissionMode::Collect
        } else {
            EmissionMode::Augment
        }
    }

    pub fn is_hidden_decorator(&self, name: &str) -> bool {
        self.hidden_decorators.iter().any(|d| d == name)
    }

    pub fn is_seed_decorator(&self, name: &str) -> bool {
        self.seed_decorators.iter().any(|d| d == name)
    }

    /// `pathToSource`, normalized. `"."` when unset.
    pub fn source_root(&self) -> String {
        match &self.path_to_source {
            Some(path) => tsmeta_common::paths::normalize_path(path),
            None => ".".to_string(),
        }
    }
}

#[cfg(test)]
#[path = "../tests/options_tests.rs"]
mod tests;
