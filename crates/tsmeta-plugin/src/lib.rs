//! Property metadata synthesis for decorated model classes.
//!
//! For every property of a model class the pass derives a descriptor
//! (`required`, `type`, `nullable`, `enum`, documentation, `default`,
//! validation constraints) from the property's declaration and a
//! `TypeOracle` supplied by the host front end.
//!
//! # Architecture
//!
//! Leaf-first:
//!
//! - `classifier`: which source expressions may be copied into generated code
//! - `type_resolver`: the `type` field (named reference or inline shape)
//! - `enum_resolver`: the `enum` field
//! - `validation`: class-validator decorators to schema constraints
//! - `docs`: doc comments to `description` / `example(s)` / `deprecated`
//! - `assembler`: one ordered descriptor per property
//! - `class_emitter`: per-class augmentation directives or registry entries
//! - `artifact`: the consolidated module built from the registry
//!
//! A run is driven through `RunContext`:
//!
//! ```
//! use tsmeta_plugin::{ModelClassVisitor, PluginOptions, RunContext};
//! use tsmeta_syntax::{ClassDeclaration, PropertyDeclaration, SourceFile, TypeTable};
//!
//! let file = SourceFile::new("/app/src/cat.dto.ts").with_class(
//!     ClassDeclaration::new("CreateCatDto")
//!         .exported()
//!         .with_property(PropertyDeclaration::new("name").optional()),
//! );
//! let oracle = TypeTable::new();
//!
//! let mut run = RunContext::new(PluginOptions::default()).unwrap();
//! let transforms = ModelClassVisitor::new(&mut run).visit_file(&file, &oracle);
//! let directive = transforms.for_class("CreateCatDto").unwrap();
//! assert!(directive.member_text().contains("name: { required: false }"));
//! ```

pub mod artifact;
pub mod assembler;
pub mod class_emitter;
pub mod classifier;
pub mod context;
pub mod descriptor;
pub mod docs;
pub mod enum_resolver;
pub mod error;
pub mod options;
pub mod registry;
pub mod type_resolver;
pub mod validation;

pub use artifact::MetadataArtifact;
pub use assembler::{SeedSet, assemble};
pub use class_emitter::{
    ClassTransform, ClassVisitState, ModelClassVisitor, TransformContext, TransformDirective,
};
pub use context::{DescriptorContext, RunContext};
pub use descriptor::{
    ClassMetadata, DescriptorValue, EnumDomain, NamedReference, ObjectDescriptor,
    PropertyAssignment, TypeAccess, TypeReference,
};
pub use error::DescriptorError;
pub use options::{EmissionMode, OptionsError, PluginOptions};
pub use registry::{CollectedRegistry, TypeImportTable};
