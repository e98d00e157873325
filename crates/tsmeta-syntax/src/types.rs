//! Type Oracle
//!
//! The metadata pass never computes types itself. It asks the host front end,
//! through `TypeOracle`, two questions:
//!
//! 1. Which type does this node have? (`type_of_node`) For a type annotation
//!    node this is the annotated type; for a declaration it is the declared or
//!    inferred type.
//! 2. What does this type look like? (`shape`) The answer is a `TypeShape`,
//!    a classification coarse enough for descriptor synthesis: primitives,
//!    literals, arrays, unions, enums, classes, and "some object".
//!
//! `TypeTable` is an interned, serde-loadable oracle. Hosts that run their
//! checker in another process dump a `TypeTable`; tests build one directly.

use crate::node::NodeId;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

/// Identity of a type inside one oracle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeId(pub u32);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum IntrinsicKind {
    String,
    Number,
    Boolean,
    BigInt,
    Symbol,
    Any,
    Unknown,
    /// The non-primitive `object` type.
    Object,
    Null,
    Undefined,
    Void,
    Never,
}

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LiteralValue {
    String(String),
    /// Numeric literal source text.
    Number(String),
    Boolean(bool),
    /// BigInt literal text without the `n` suffix.
    BigInt(String),
}

/// Where a named type is declared.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ModuleRef {
    /// A source file of the program (path as the front end reports it).
    File(String),
    /// A bare package specifier (`@app/shared`, `rxjs`).
    Package(String),
}

/// A declared, nameable type. `module: None` means an ambient global
/// (`Date`, `Buffer`) that needs no import.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NamedType {
    pub name: String,
    #[serde(default)]
    pub module: Option<ModuleRef>,
}

impl NamedType {
    pub fn new(name: impl Into<String>, module: Option<ModuleRef>) -> Self {
        Self {
            name: name.into(),
            module,
        }
    }

    pub fn global(name: impl Into<String>) -> Self {
        Self::new(name, None)
    }
}

/// Classification of a type, as far as descriptor synthesis cares.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeShape {
    Intrinsic(IntrinsicKind),
    Literal(LiteralValue),
    /// `T[]` / `Array<T>` / `ReadonlyArray<T>`
    Array(TypeId),
    Tuple(Vec<TypeId>),
    /// Members in the oracle's canonical order.
    Union(Vec<TypeId>),
    /// An explicit `enum` declaration.
    Enum(NamedType),
    /// A single member of an enum (`Status.Active`).
    EnumMember { parent: TypeId, name: String },
    /// A class: a type with a runtime value.
    Class(NamedType),
    /// An interface or object type alias: no runtime value.
    Interface(NamedType),
    /// An anonymous object type.
    Object,
    Function,
    TypeParameter(String),
}

/// The type-resolution service provided by the host front end.
pub trait TypeOracle {
    /// The type of a node: a type annotation's denoted type, or a
    /// declaration's declared/inferred type.
    fn type_of_node(&self, node: NodeId) -> Option<TypeId>;

    /// The shape of a type. `None` for ids the oracle does not know.
    fn shape(&self, ty: TypeId) -> Option<TypeShape>;
}

impl<T: TypeOracle + ?Sized> TypeOracle for &T {
    fn type_of_node(&self, node: NodeId) -> Option<TypeId> {
        (**self).type_of_node(node)
    }

    fn shape(&self, ty: TypeId) -> Option<TypeShape> {
        (**self).shape(ty)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TypeTableError {
    #[error("invalid type table JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("type {0:?} references unknown type {1:?}")]
    DanglingTypeId(TypeId, TypeId),
    #[error("node {0:?} is bound to unknown type {1:?}")]
    DanglingBinding(NodeId, TypeId),
}

/// Serialized form of a `TypeTable`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeTableData {
    #[serde(default)]
    pub types: Vec<TypeShape>,
    #[serde(default)]
    pub bindings: Vec<(NodeId, TypeId)>,
}

/// Interned in-memory type oracle.
///
/// Structurally equal shapes share one `TypeId`, so unions and arrays built
/// twice compare equal by id.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(try_from = "TypeTableData", into = "TypeTableData")]
pub struct TypeTable {
    types: Vec<TypeShape>,
    index: FxHashMap<TypeShape, TypeId>,
    nodes: FxHashMap<NodeId, TypeId>,
}

impl TypeTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self, TypeTableError> {
        let data: TypeTableData = serde_json::from_str(json)?;
        Self::try_from(data)
    }

    /// Intern a shape, returning the existing id for an equal shape.
    pub fn intern(&mut self, shape: TypeShape) -> TypeId {
        if let Some(&id) = self.index.get(&shape) {
            return id;
        }
        let id = TypeId(self.types.len() as u32);
        self.types.push(shape.clone());
        self.index.insert(shape, id);
        id
    }

    /// Record the type of a node.
    pub fn bind(&mut self, node: NodeId, ty: TypeId) {
        self.nodes.insert(node, ty);
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    // =========================================================================
    // Builder helpers
    // =========================================================================

    pub fn intrinsic(&mut self, kind: IntrinsicKind) -> TypeId {
        self.intern(TypeShape::Intrinsic(kind))
    }

    pub fn string(&mut self) -> TypeId {
        self.intrinsic(IntrinsicKind::String)
    }

    pub fn number(&mut self) -> TypeId {
        self.intrinsic(IntrinsicKind::Number)
    }

    pub fn boolean(&mut self) -> TypeId {
        self.intrinsic(IntrinsicKind::Boolean)
    }

    pub fn null(&mut self) -> TypeId {
        self.intrinsic(IntrinsicKind::Null)
    }

    pub fn undefined(&mut self) -> TypeId {
        self.intrinsic(IntrinsicKind::Undefined)
    }

    pub fn string_literal(&mut self, value: impl Into<String>) -> TypeId {
        self.intern(TypeShape::Literal(LiteralValue::String(value.into())))
    }

    pub fn number_literal(&mut self, text: impl Into<String>) -> TypeId {
        self.intern(TypeShape::Literal(LiteralValue::Number(text.into())))
    }

    pub fn boolean_literal(&mut self, value: bool) -> TypeId {
        self.intern(TypeShape::Literal(LiteralValue::Boolean(value)))
    }

    pub fn array(&mut self, element: TypeId) -> TypeId {
        self.intern(TypeShape::Array(element))
    }

    pub fn union(&mut self, members: Vec<TypeId>) -> TypeId {
        self.intern(TypeShape::Union(members))
    }

    pub fn class(&mut self, name: &str, module: Option<ModuleRef>) -> TypeId {
        self.intern(TypeShape::Class(NamedType::new(name, module)))
    }

    pub fn interface(&mut self, name: &str, module: Option<ModuleRef>) -> TypeId {
        self.intern(TypeShape::Interface(NamedType::new(name, module)))
    }

    pub fn enum_type(&mut self, name: &str, module: Option<ModuleRef>) -> TypeId {
        self.intern(TypeShape::Enum(NamedType::new(name, module)))
    }

    pub fn enum_member(&mut self, parent: TypeId, name: &str) -> TypeId {
        self.intern(TypeShape::EnumMember {
            parent,
            name: name.to_string(),
        })
    }

    fn referenced_ids(shape: &TypeShape) -> &[TypeId] {
        match shape {
            TypeShape::Array(id) | TypeShape::EnumMember { parent: id, .. } => {
                std::slice::from_ref(id)
            }
            TypeShape::Tuple(ids) | TypeShape::Union(ids) => ids,
            _ => &[],
        }
    }
}

impl TypeOracle for TypeTable {
    fn type_of_node(&self, node: NodeId) -> Option<TypeId> {
        self.nodes.get(&node).copied()
    }

    fn shape(&self, ty: TypeId) -> Option<TypeShape> {
        self.types.get(ty.0 as usize).cloned()
    }
}

impl TryFrom<TypeTableData> for TypeTable {
    type Error = TypeTableError;

    fn try_from(data: TypeTableData) -> Result<Self, Self::Error> {
        let count = data.types.len() as u32;
        let mut index = FxHashMap::default();
        for (i, shape) in data.types.iter().enumerate() {
            let id = TypeId(i as u32);
            if let Some(bad) = Self::referenced_ids(shape).iter().find(|r| r.0 >= count) {
                return Err(TypeTableError::DanglingTypeId(id, *bad));
            }
            index.entry(shape.clone()).or_insert(id);
        }

        let mut nodes = FxHashMap::default();
        for (node, ty) in data.bindings {
            if ty.0 >= count {
                return Err(TypeTableError::DanglingBinding(node, ty));
            }
            nodes.insert(node, ty);
        }

        Ok(TypeTable {
            types: data.types,
            index,
            nodes,
        })
    }
}

impl From<TypeTable> for TypeTableData {
    fn from(table: TypeTable) -> Self {
        let mut bindings: Vec<(NodeId, TypeId)> = table.nodes.into_iter().collect();
        bindings.sort();
        TypeTableData {
            types: table.types,
            bindings,
        }
    }
}

#[cfg(test)]
#[path = "../tests/types_tests.rs"]
mod tests;
