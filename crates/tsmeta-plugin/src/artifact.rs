//! Consolidated metadata artifact for collection mode.
//!
//! ```text
//! export default async () => {
//!     const t = {
//!         "./cats/cat.entity": await import("./cats/cat.entity")
//!     };
//!     return {
//!         models: [[import("./cats/cat.dto"), { CreateCatDto: { ... } }]]
//!     };
//! };
//! ```
//!
//! `t` binds every module a late-bound type reference (`t["..."].Name`)
//! points into. Type thunks run after the function has returned, so `t` is
//! always populated by the time they are consumed.

use crate::descriptor::ClassMetadata;
use crate::registry::{CollectedRegistry, TypeImportTable};
use tsmeta_emitter::{IRNode, IRPrinter, IRProperty};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MetadataArtifact {
    /// Modules bound into `t`, in first-use order.
    pub specifiers: Vec<String>,
    /// File key -> classes of that file, in visit order.
    pub models: Vec<(String, Vec<(String, ClassMetadata)>)>,
}

impl MetadataArtifact {
    pub fn build(registry: &CollectedRegistry, imports: &TypeImportTable) -> Self {
        Self {
            specifiers: imports
                .specifiers()
                .into_iter()
                .map(str::to_string)
                .collect(),
            models: registry
                .files()
                .map(|(file_key, classes)| {
                    (
                        file_key.to_string(),
                        classes
                            .iter()
                            .map(|(name, metadata)| (name.clone(), metadata.clone()))
                            .collect(),
                    )
                })
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn to_ir(&self) -> IRNode {
        let bindings = IRNode::object_multiline(
            self.specifiers
                .iter()
                .map(|specifier| {
                    IRProperty::init_string(
                        specifier.as_str(),
                        IRNode::await_expr(IRNode::ImportCall(specifier.clone())),
                    )
                })
                .collect(),
        );

        let models = IRNode::array(
            self.models
                .iter()
                .map(|(file_key, classes)| {
                    IRNode::array(vec![
                        IRNode::ImportCall(file_key.clone()),
                        IRNode::object(
                            classes
                                .iter()
                                .map(|(name, metadata)| {
                                    IRProperty::init(name.as_str(), metadata.to_ir())
                                })
                                .collect(),
                        ),
                    ])
                })
                .collect(),
        );

        IRNode::ExportDefault(Box::new(IRNode::ArrowFunctionBlock {
            parameters: Vec::new(),
            body: vec![
                IRNode::const_decl("t", bindings),
                IRNode::ret(Some(IRNode::object_multiline(vec![IRProperty::init(
                    "models", models,
                )]))),
            ],
            is_async: true,
        }))
    }

    /// Module source text.
    pub fn print(&self) -> String {
        let mut text = IRPrinter::emit_to_string(&self.to_ir());
        text.push('\n');
        text
    }
}

#[cfg(test)]
#[path = "../tests/artifact_tests.rs"]
mod tests;
