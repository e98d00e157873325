//! Class Emitter - Model-class visitor
//!
//! Walks the classes of a source file in declaration order and decides, per
//! class, one of three outcomes:
//!
//! - `Skip`: nothing happens (non-exported or anonymous class in collection
//!   mode).
//! - `Augment`: the class gains a static accessor returning its metadata.
//!   The syntax tree is read-only, so the accessor is handed back as a
//!   `TransformDirective` for the host printer to splice in.
//! - `Collect`: the metadata goes into the run's registry and the class is
//!   left alone.
//!
//! Within a class, a property whose descriptor fails to assemble is dropped
//! and the walk continues.

use crate::assembler::{SeedSet, assemble};
use crate::context::{DescriptorContext, RunContext};
use crate::descriptor::ClassMetadata;
use crate::options::{EmissionMode, PluginOptions};
use tracing::{debug, trace};
use tsmeta_common::DiagnosticNote;
use tsmeta_common::diagnostics::diagnostic_codes;
use tsmeta_emitter::{IRNode, IRPrinter};
use tsmeta_syntax::{ClassDeclaration, NodeId, PropertyDeclaration, SourceFile, TypeOracle};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClassVisitState {
    Skip,
    Augment,
    Collect,
}

/// How the host should change a class when printing it.
#[derive(Clone, Debug, PartialEq)]
pub enum TransformDirective {
    /// Add `member` as the last class member.
    AppendStaticMember { member: IRNode },
    /// Replace the existing static member called `name` with `member`.
    ReplaceStaticMember { name: String, member: IRNode },
}

impl TransformDirective {
    pub fn member(&self) -> &IRNode {
        match self {
            TransformDirective::AppendStaticMember { member }
            | TransformDirective::ReplaceStaticMember { member, .. } => member,
        }
    }

    /// Source text of the member, indented one level for a class body.
    pub fn member_text(&self) -> String {
        let mut printer = IRPrinter::with_indent(1);
        printer.emit_node(self.member());
        printer.finish()
    }
}

/// A directive and the class it applies to.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassTransform {
    pub class_id: NodeId,
    /// Position of the class in `SourceFile::classes`.
    pub class_index: usize,
    pub class_name: Option<String>,
    pub directive: TransformDirective,
}

/// Directives produced for one file, in class order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TransformContext {
    transforms: Vec<ClassTransform>,
}

impl TransformContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, transform: ClassTransform) {
        self.transforms.push(transform);
    }

    /// Directive for the class at `class_index`, if any.
    pub fn get(&self, class_index: usize) -> Option<&TransformDirective> {
        self.transforms
            .iter()
            .find(|t| t.class_index == class_index)
            .map(|t| &t.directive)
    }

    pub fn for_class(&self, class_name: &str) -> Option<&TransformDirective> {
        self.transforms
            .iter()
            .find(|t| t.class_name.as_deref() == Some(class_name))
            .map(|t| &t.directive)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClassTransform> {
        self.transforms.iter()
    }

    pub fn len(&self) -> usize {
        self.transforms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transforms.is_empty()
    }
}

/// Visits model classes and routes their metadata to directives or to the
/// run's registry.
pub struct ModelClassVisitor<'run> {
    run: &'run mut RunContext,
}

impl<'run> ModelClassVisitor<'run> {
    pub fn new(run: &'run mut RunContext) -> Self {
        Self { run }
    }

    /// Visit every class of `file`. In collection mode the returned context
    /// is always empty.
    #[tracing::instrument(level = "debug", skip_all, fields(file = %file.file_name))]
    pub fn visit_file(&mut self, file: &SourceFile, oracle: &dyn TypeOracle) -> TransformContext {
        let mut transforms = TransformContext::new();
        for (class_index, class) in file.classes.iter().enumerate() {
            let state = class_visit_state(class, &self.run.options);
            trace!(class = ?class.name, ?state, "class state");
            match state {
                ClassVisitState::Skip => {
                    if self.run.options.debug {
                        let (subject, reason) = match class.name.as_deref() {
                            Some(name) => (name, "class is not exported; no metadata collected"),
                            None => ("<anonymous>", "anonymous class; no registry key"),
                        };
                        self.run.notes.push(DiagnosticNote::message(
                            file.file_name.as_str(),
                            subject,
                            reason,
                            diagnostic_codes::SKIPPED_CLASS,
                        ));
                    }
                }
                ClassVisitState::Augment => {
                    let metadata = self.class_metadata(class, file, oracle);
                    let directive = self.augment(class, &metadata);
                    transforms.insert(ClassTransform {
                        class_id: class.id,
                        class_index,
                        class_name: class.name.clone(),
                        directive,
                    });
                }
                ClassVisitState::Collect => {
                    let metadata = self.class_metadata(class, file, oracle);
                    let file_key = self.run.file_key(&file.file_name);
                    let class_name = class.name.clone().unwrap_or_default();
                    if !self.run.registry.insert(file_key, class_name, metadata) {
                        debug!(class = ?class.name, "class already collected");
                    }
                }
            }
        }
        transforms
    }

    /// Describe every eligible property of `class`.
    #[tracing::instrument(level = "debug", skip_all, fields(class = ?class.name))]
    pub fn class_metadata(
        &mut self,
        class: &ClassDeclaration,
        file: &SourceFile,
        oracle: &dyn TypeOracle,
    ) -> ClassMetadata {
        let run = &mut *self.run;
        let mut ctx = DescriptorContext::new(
            oracle,
            &run.options,
            &file.file_name,
            &mut run.imports,
            &mut run.notes,
        );
        let class_name = class.name.as_deref().unwrap_or("default");

        let mut metadata = ClassMetadata::new();
        for property in class.properties() {
            let Some(name) = describable_name(property, ctx.options()) else {
                continue;
            };
            ctx.set_subject(format!("{class_name}.{name}"));
            let seed = SeedSet::from_decorators(&property.decorators, ctx.options());
            match assemble(property, &seed, &mut ctx, 0) {
                Ok(descriptor) => {
                    metadata.insert(name, descriptor);
                }
                Err(err) => {
                    debug!(property = name, error = %err, "property skipped");
                    ctx.note(
                        format!("descriptor not generated: {err}"),
                        diagnostic_codes::PROPERTY_ASSEMBLY_FAILED,
                    );
                }
            }
        }
        metadata
    }

    fn augment(&self, class: &ClassDeclaration, metadata: &ClassMetadata) -> TransformDirective {
        let name = self.run.options.metadata_factory_name.clone();
        let member = IRNode::StaticMethod {
            name: name.clone(),
            body: vec![IRNode::ret(Some(metadata.to_ir()))],
        };
        if class.has_static_member(&name) {
            TransformDirective::ReplaceStaticMember { name, member }
        } else {
            TransformDirective::AppendStaticMember { member }
        }
    }
}

pub fn class_visit_state(class: &ClassDeclaration, options: &PluginOptions) -> ClassVisitState {
    match options.emission_mode() {
        EmissionMode::Augment => ClassVisitState::Augment,
        EmissionMode::Collect if class.is_exported && class.name.is_some() => {
            ClassVisitState::Collect
        }
        EmissionMode::Collect => ClassVisitState::Skip,
    }
}

/// The property's name if it gets a descriptor at all: not static, not
/// hidden, and named by a plain identifier.
fn describable_name<'p>(
    property: &'p PropertyDeclaration,
    options: &PluginOptions,
) -> Option<&'p str> {
    if property.is_static {
        return None;
    }
    if property
        .decorators
        .iter()
        .any(|d| options.is_hidden_decorator(&d.name))
    {
        return None;
    }
    property.name.as_identifier()
}

#[cfg(test)]
#[path = "../tests/class_emitter_tests.rs"]
mod tests;
