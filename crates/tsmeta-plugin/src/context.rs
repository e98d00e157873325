//! Run and per-file state.
//!
//! `RunContext` owns everything that outlives one file: options, the type
//! import table, the collected registry and diagnostic notes. While a file is
//! visited, the resolvers work through a `DescriptorContext` that borrows the
//! pieces they need from the run.

use crate::artifact::MetadataArtifact;
use crate::descriptor::TypeAccess;
use crate::error::DescriptorError;
use crate::options::{EmissionMode, OptionsError, PluginOptions};
use crate::registry::{CollectedRegistry, TypeImportTable};
use tracing::trace;
use tsmeta_common::DiagnosticNote;
use tsmeta_common::paths::{dirname, normalize_path, relative_specifier, strip_source_extension};
use tsmeta_syntax::{ModuleRef, NamedType, TypeId, TypeOracle, TypeShape};

/// State shared by every file visited in one run.
#[derive(Debug)]
pub struct RunContext {
    pub(crate) options: PluginOptions,
    pub(crate) imports: TypeImportTable,
    pub(crate) registry: CollectedRegistry,
    pub(crate) notes: Vec<DiagnosticNote>,
}

impl RunContext {
    pub fn new(options: PluginOptions) -> Result<Self, OptionsError> {
        options.validate()?;
        Ok(Self {
            options,
            imports: TypeImportTable::new(),
            registry: CollectedRegistry::new(),
            notes: Vec::new(),
        })
    }

    pub fn options(&self) -> &PluginOptions {
        &self.options
    }

    pub fn mode(&self) -> EmissionMode {
        self.options.emission_mode()
    }

    pub fn imports(&self) -> &TypeImportTable {
        &self.imports
    }

    pub fn registry(&self) -> &CollectedRegistry {
        &self.registry
    }

    pub fn notes(&self) -> &[DiagnosticNote] {
        &self.notes
    }

    pub fn take_notes(&mut self) -> Vec<DiagnosticNote> {
        std::mem::take(&mut self.notes)
    }

    /// Registry key for a source file: its specifier relative to
    /// `pathToSource`.
    pub fn file_key(&self, file_name: &str) -> String {
        relative_specifier(&self.options.source_root(), file_name)
    }

    /// Fold a shard's accumulators into this run.
    pub fn absorb(&mut self, shard: RunContext) {
        self.imports.merge(shard.imports);
        self.registry.merge(shard.registry);
        self.notes.extend(shard.notes);
    }

    /// End the run: build the consolidated artifact from what was collected.
    pub fn into_artifact(self) -> MetadataArtifact {
        MetadataArtifact::build(&self.registry, &self.imports)
    }
}

/// What the resolvers see while one file is visited.
pub struct DescriptorContext<'a> {
    oracle: &'a dyn TypeOracle,
    options: &'a PluginOptions,
    /// Normalized path of the file being visited.
    file_name: String,
    imports: &'a mut TypeImportTable,
    notes: &'a mut Vec<DiagnosticNote>,
    /// `Class.property` currently being described, for notes.
    subject: String,
}

impl<'a> DescriptorContext<'a> {
    pub fn new(
        oracle: &'a dyn TypeOracle,
        options: &'a PluginOptions,
        file_name: &str,
        imports: &'a mut TypeImportTable,
        notes: &'a mut Vec<DiagnosticNote>,
    ) -> Self {
        Self {
            oracle,
            options,
            file_name: normalize_path(file_name),
            imports,
            notes,
            subject: String::new(),
        }
    }

    pub fn oracle(&self) -> &'a dyn TypeOracle {
        self.oracle
    }

    pub fn options(&self) -> &'a PluginOptions {
        self.options
    }

    pub fn mode(&self) -> EmissionMode {
        self.options.emission_mode()
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn set_subject(&mut self, subject: impl Into<String>) {
        self.subject = subject.into();
    }

    pub fn subject(&self) -> &str {
        &self.subject
    }

    /// Shape of a type the oracle handed out. An id without a shape is an
    /// oracle inconsistency, not an unrepresentable type.
    pub fn shape(&self, ty: TypeId) -> Result<TypeShape, DescriptorError> {
        self.oracle
            .shape(ty)
            .ok_or(DescriptorError::DanglingType(ty))
    }

    /// Record a note about the current subject when `debug` is on.
    pub fn note(&mut self, message: impl Into<String>, code: u32) {
        if self.options.debug {
            self.notes.push(DiagnosticNote::message(
                self.file_name.clone(),
                self.subject.clone(),
                message,
                code,
            ));
        }
    }

    /// Decide how generated code reaches `named`, recording cross-module
    /// references in the import table.
    pub fn access_for(&mut self, named: &NamedType) -> TypeAccess {
        let Some(module) = &named.module else {
            return TypeAccess::Global;
        };
        let (module_path, specifier) = match module {
            ModuleRef::Package(package) => (package.clone(), package.clone()),
            ModuleRef::File(path) => {
                let path = normalize_path(path);
                let specifier = match self.mode() {
                    EmissionMode::Augment => {
                        if strip_source_extension(&path) == strip_source_extension(&self.file_name)
                        {
                            return TypeAccess::Global;
                        }
                        relative_specifier(dirname(&self.file_name), &path)
                    }
                    EmissionMode::Collect => {
                        relative_specifier(&self.options.source_root(), &path)
                    }
                };
                (strip_source_extension(&path).to_string(), specifier)
            }
        };

        let canonical = format!("{module_path}#{}", named.name);
        if self.imports.record(canonical.as_str(), specifier.as_str()) {
            trace!(canonical = %canonical, specifier = %specifier, "recorded type import");
        }

        match self.mode() {
            EmissionMode::Augment => TypeAccess::Require(specifier),
            EmissionMode::Collect => TypeAccess::LateBound(specifier),
        }
    }
}

#[cfg(test)]
#[path = "../tests/context_tests.rs"]
mod tests;
