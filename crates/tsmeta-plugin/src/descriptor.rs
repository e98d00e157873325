//! Descriptor data model.
//!
//! A property descriptor is an ordered field map. Values are kept typed until
//! the very end, when `to_ir` lowers them for printing:
//!
//! - `Lazy` type references lower to a thunk (`() => String`) so that
//!   forward and circular references are only resolved when consumed.
//! - Enum domains lower eagerly (`require("./status").Status` or `["A", "B"]`).
//! - Source expressions (defaults, validation arguments) are re-emitted as-is.

use indexmap::IndexMap;
use smallvec::SmallVec;
use tsmeta_emitter::{IRNode, IRProperty};
use tsmeta_syntax::{Expression, LiteralValue};

/// One derived `key: value` pair.
#[derive(Clone, Debug, PartialEq)]
pub struct PropertyAssignment {
    pub key: String,
    pub value: DescriptorValue,
}

impl PropertyAssignment {
    pub fn new(key: impl Into<String>, value: DescriptorValue) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }
}

/// Most components produce zero, one or two assignments.
pub type Assignments = SmallVec<[PropertyAssignment; 2]>;

#[derive(Clone, Debug, PartialEq)]
pub enum DescriptorValue {
    Bool(bool),
    /// Numeric literal text, possibly with a leading `-`.
    Number(String),
    String(String),
    /// A value parsed from a doc comment.
    Json(serde_json::Value),
    /// A source expression re-emitted verbatim.
    Expression(Expression),
    /// A nested descriptor (members of an inline object type).
    Object(ObjectDescriptor),
    /// A deferred type reference: `() => T`.
    Lazy(TypeReference),
    Enum(EnumDomain),
}

impl DescriptorValue {
    /// Evaluate a deferred type reference.
    pub fn force(&self) -> Option<&TypeReference> {
        match self {
            DescriptorValue::Lazy(reference) => Some(reference),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&ObjectDescriptor> {
        match self {
            DescriptorValue::Object(descriptor) => Some(descriptor),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DescriptorValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn to_ir(&self) -> IRNode {
        match self {
            DescriptorValue::Bool(b) => IRNode::BooleanLiteral(*b),
            DescriptorValue::Number(text) => number_ir(text),
            DescriptorValue::String(s) => IRNode::string(s.as_str()),
            DescriptorValue::Json(value) => IRNode::from_json(value),
            DescriptorValue::Expression(expr) => IRNode::from_expression(expr),
            DescriptorValue::Object(descriptor) => descriptor.to_ir(),
            DescriptorValue::Lazy(reference) => IRNode::thunk(reference.to_ir()),
            DescriptorValue::Enum(domain) => domain.to_ir(),
        }
    }
}

fn number_ir(text: &str) -> IRNode {
    match text.strip_prefix('-') {
        Some(abs) => IRNode::PrefixUnaryExpr {
            operator: "-".to_string(),
            operand: Box::new(IRNode::number(abs)),
        },
        None => IRNode::number(text),
    }
}

/// What a `type` thunk evaluates to.
#[derive(Clone, Debug, PartialEq)]
pub enum TypeReference {
    Named(NamedReference),
    /// An anonymous object type, described member by member.
    Inline(ObjectDescriptor),
}

impl TypeReference {
    pub fn as_named(&self) -> Option<&NamedReference> {
        match self {
            TypeReference::Named(named) => Some(named),
            TypeReference::Inline(_) => None,
        }
    }

    pub fn as_inline(&self) -> Option<&ObjectDescriptor> {
        match self {
            TypeReference::Inline(shape) => Some(shape),
            TypeReference::Named(_) => None,
        }
    }

    pub fn to_ir(&self) -> IRNode {
        match self {
            TypeReference::Named(named) => named.to_ir(),
            TypeReference::Inline(shape) => shape.to_ir(),
        }
    }
}

/// How generated code reaches a named type.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum TypeAccess {
    /// Bare name: a global, or a type declared in the same file.
    Global,
    /// `require("<specifier>").Name`
    Require(String),
    /// `t["<specifier>"].Name`, bound by the consolidated artifact.
    LateBound(String),
}

/// A reference to a type by name, wrapped in `array_depth` array levels.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct NamedReference {
    pub name: String,
    pub access: TypeAccess,
    pub array_depth: u32,
}

impl NamedReference {
    pub fn global(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            access: TypeAccess::Global,
            array_depth: 0,
        }
    }

    pub fn with_access(name: impl Into<String>, access: TypeAccess) -> Self {
        Self {
            name: name.into(),
            access,
            array_depth: 0,
        }
    }

    /// One more array level: `T` -> `[T]`.
    pub fn wrap_array(mut self) -> Self {
        self.array_depth += 1;
        self
    }

    pub fn to_ir(&self) -> IRNode {
        let mut node = match &self.access {
            TypeAccess::Global => IRNode::id(self.name.as_str()),
            TypeAccess::Require(specifier) => {
                IRNode::prop(IRNode::require(specifier.as_str()), self.name.as_str())
            }
            TypeAccess::LateBound(specifier) => IRNode::prop(
                IRNode::elem(IRNode::id("t"), IRNode::string(specifier.as_str())),
                self.name.as_str(),
            ),
        };
        for _ in 0..self.array_depth {
            node = IRNode::array(vec![node]);
        }
        node
    }
}

/// The value domain of an `enum` field.
#[derive(Clone, Debug, PartialEq)]
pub enum EnumDomain {
    /// A declared enum, reached like any named type.
    Named(NamedReference),
    /// The members of a literal union: `["ACTIVE", "INACTIVE"]`.
    Literals(Vec<LiteralValue>),
}

impl EnumDomain {
    pub fn to_ir(&self) -> IRNode {
        match self {
            EnumDomain::Named(named) => named.to_ir(),
            EnumDomain::Literals(values) => IRNode::array(
                values
                    .iter()
                    .map(|value| match value {
                        LiteralValue::String(s) => IRNode::string(s.as_str()),
                        LiteralValue::Number(n) => number_ir(n),
                        LiteralValue::Boolean(b) => IRNode::BooleanLiteral(*b),
                        LiteralValue::BigInt(n) => IRNode::number(format!("{n}n")),
                    })
                    .collect(),
            ),
        }
    }
}

/// Ordered field map for one property (or one inline object type).
///
/// Insertion never overwrites: the first value stored under a key wins.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ObjectDescriptor {
    fields: IndexMap<String, DescriptorValue>,
}

impl ObjectDescriptor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `value` under `key` unless the key is already present.
    /// Returns whether the value was stored.
    pub fn insert(&mut self, key: impl Into<String>, value: DescriptorValue) -> bool {
        match self.fields.entry(key.into()) {
            indexmap::map::Entry::Occupied(_) => false,
            indexmap::map::Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
        }
    }

    pub fn get(&self, key: &str) -> Option<&DescriptorValue> {
        self.fields.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DescriptorValue)> {
        self.fields.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn to_ir(&self) -> IRNode {
        IRNode::object(
            self.fields
                .iter()
                .map(|(key, value)| IRProperty::init(key.as_str(), value.to_ir()))
                .collect(),
        )
    }
}

/// Property name -> descriptor, in declaration order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ClassMetadata {
    properties: IndexMap<String, ObjectDescriptor>,
}

impl ClassMetadata {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` (and keeps the first descriptor) for a repeated name.
    pub fn insert(&mut self, name: impl Into<String>, descriptor: ObjectDescriptor) -> bool {
        match self.properties.entry(name.into()) {
            indexmap::map::Entry::Occupied(_) => false,
            indexmap::map::Entry::Vacant(slot) => {
                slot.insert(descriptor);
                true
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&ObjectDescriptor> {
        self.properties.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.properties.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ObjectDescriptor)> {
        self.properties.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.properties.len()
    }

    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }

    pub fn to_ir(&self) -> IRNode {
        IRNode::object(
            self.properties
                .iter()
                .map(|(name, descriptor)| IRProperty::init(name.as_str(), descriptor.to_ir()))
                .collect(),
        )
    }
}

#[cfg(test)]
#[path = "../tests/descriptor_tests.rs"]
mod tests;
