//! Declaration nodes handed over by the front end.
//!
//! Only the parts of a source file the metadata pass looks at are modelled:
//! class declarations and their members. Members the pass never describes
//! (constructors, accessors, index signatures) collapse into
//! `ClassMember::Other`.

use crate::expression::Expression;
use crate::type_node::TypeNode;
use serde::{Deserialize, Serialize};

/// Host-assigned identity of a node. The type oracle is keyed by it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel for synthesized nodes the oracle knows nothing about.
    pub const NONE: NodeId = NodeId(u32::MAX);

    #[inline]
    pub fn is_some(self) -> bool {
        self != Self::NONE
    }
}

impl Default for NodeId {
    fn default() -> Self {
        Self::NONE
    }
}

/// One source unit: its file name and its classes in declaration order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceFile {
    pub file_name: String,
    #[serde(default)]
    pub classes: Vec<ClassDeclaration>,
}

impl SourceFile {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            classes: Vec::new(),
        }
    }

    pub fn with_class(mut self, class: ClassDeclaration) -> Self {
        self.classes.push(class);
        self
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassDeclaration {
    #[serde(default)]
    pub id: NodeId,
    /// `None` for `export default class { ... }`.
    #[serde(default)]
    pub name: Option<String>,
    /// Result of the front end's export-visibility predicate.
    #[serde(default)]
    pub is_exported: bool,
    #[serde(default)]
    pub decorators: Vec<Decorator>,
    #[serde(default)]
    pub members: Vec<ClassMember>,
}

impl ClassDeclaration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn exported(mut self) -> Self {
        self.is_exported = true;
        self
    }

    pub fn with_member(mut self, member: ClassMember) -> Self {
        self.members.push(member);
        self
    }

    pub fn with_property(self, property: PropertyDeclaration) -> Self {
        self.with_member(ClassMember::Property(property))
    }

    /// Instance and static properties in declaration order.
    pub fn properties(&self) -> impl Iterator<Item = &PropertyDeclaration> {
        self.members.iter().filter_map(|m| match m {
            ClassMember::Property(p) => Some(p),
            _ => None,
        })
    }

    /// Whether the class already declares a static member called `name`.
    pub fn has_static_member(&self, name: &str) -> bool {
        self.members.iter().any(|m| match m {
            ClassMember::Property(p) => p.is_static && p.name.as_identifier() == Some(name),
            ClassMember::Method(m) => m.is_static && m.name.as_identifier() == Some(name),
            ClassMember::Other => false,
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ClassMember {
    Property(PropertyDeclaration),
    Method(MethodDeclaration),
    Other,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodDeclaration {
    #[serde(default)]
    pub id: NodeId,
    pub name: PropertyName,
    #[serde(default)]
    pub is_static: bool,
}

/// The name of a property, method, or type-literal member.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum PropertyName {
    Identifier(String),
    StringLiteral(String),
    NumericLiteral(String),
    /// `#secret`
    PrivateIdentifier(String),
    /// `[key]`
    Computed(Expression),
}

impl PropertyName {
    /// The name if it is a plain identifier.
    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            PropertyName::Identifier(name) => Some(name),
            _ => None,
        }
    }

    /// Display text for notes and logs.
    pub fn display(&self) -> String {
        match self {
            PropertyName::Identifier(name) | PropertyName::NumericLiteral(name) => name.clone(),
            PropertyName::StringLiteral(name) => format!("'{name}'"),
            PropertyName::PrivateIdentifier(name) => format!("#{name}"),
            PropertyName::Computed(_) => "[computed]".to_string(),
        }
    }
}

/// A decorator application: `@Name(arg, ...)`.
///
/// `name` is the rightmost identifier of the callee, so `@v.Min(1)` and
/// `@Min(1)` both have name `Min`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Decorator {
    pub name: String,
    #[serde(default)]
    pub arguments: Vec<Expression>,
}

impl Decorator {
    pub fn new(name: impl Into<String>, arguments: Vec<Expression>) -> Self {
        Self {
            name: name.into(),
            arguments,
        }
    }

    pub fn first_argument(&self) -> Option<&Expression> {
        self.arguments.first()
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDeclaration {
    #[serde(default)]
    pub id: NodeId,
    pub name: PropertyName,
    #[serde(default)]
    pub is_static: bool,
    #[serde(default)]
    pub is_readonly: bool,
    /// `name?: T`
    #[serde(default)]
    pub question_token: bool,
    #[serde(default)]
    pub type_annotation: Option<TypeNode>,
    #[serde(default)]
    pub initializer: Option<Expression>,
    #[serde(default)]
    pub decorators: Vec<Decorator>,
    /// Raw whitespace and comments preceding the declaration.
    #[serde(default)]
    pub leading_trivia: String,
}

impl PropertyDeclaration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: NodeId::NONE,
            name: PropertyName::Identifier(name.into()),
            is_static: false,
            is_readonly: false,
            question_token: false,
            type_annotation: None,
            initializer: None,
            decorators: Vec::new(),
            leading_trivia: String::new(),
        }
    }

    pub fn with_id(mut self, id: NodeId) -> Self {
        self.id = id;
        self
    }

    pub fn optional(mut self) -> Self {
        self.question_token = true;
        self
    }

    pub fn with_type(mut self, ty: TypeNode) -> Self {
        self.type_annotation = Some(ty);
        self
    }

    pub fn with_initializer(mut self, init: Expression) -> Self {
        self.initializer = Some(init);
        self
    }

    pub fn with_decorator(mut self, decorator: Decorator) -> Self {
        self.decorators.push(decorator);
        self
    }

    pub fn with_trivia(mut self, trivia: impl Into<String>) -> Self {
        self.leading_trivia = trivia.into();
        self
    }
}

/// A member of an inline object-literal type: `{ name?: T }`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertySignature {
    #[serde(default)]
    pub id: NodeId,
    pub name: PropertyName,
    #[serde(default)]
    pub question_token: bool,
    #[serde(default)]
    pub type_annotation: Option<TypeNode>,
    #[serde(default)]
    pub leading_trivia: String,
}

impl PropertySignature {
    pub fn new(name: impl Into<String>, ty: Option<TypeNode>) -> Self {
        Self {
            id: NodeId::NONE,
            name: PropertyName::Identifier(name.into()),
            question_token: false,
            type_annotation: ty,
            leading_trivia: String::new(),
        }
    }

    pub fn with_id(mut self, id: NodeId) -> Self {
        self.id = id;
        self
    }

    pub fn optional(mut self) -> Self {
        self.question_token = true;
        self
    }
}

/// The view of a property the descriptor assembler works over.
///
/// Class properties and type-literal members are described by the same
/// pipeline; signatures simply have no initializer and no decorators.
pub trait PropertyLike {
    fn node_id(&self) -> NodeId;
    fn name(&self) -> &PropertyName;
    fn is_optional(&self) -> bool;
    fn type_annotation(&self) -> Option<&TypeNode>;
    fn initializer(&self) -> Option<&Expression>;
    fn decorators(&self) -> &[Decorator];
    fn leading_trivia(&self) -> &str;
}

impl PropertyLike for PropertyDeclaration {
    fn node_id(&self) -> NodeId {
        self.id
    }
    fn name(&self) -> &PropertyName {
        &self.name
    }
    fn is_optional(&self) -> bool {
        self.question_token
    }
    fn type_annotation(&self) -> Option<&TypeNode> {
        self.type_annotation.as_ref()
    }
    fn initializer(&self) -> Option<&Expression> {
        self.initializer.as_ref()
    }
    fn decorators(&self) -> &[Decorator] {
        &self.decorators
    }
    fn leading_trivia(&self) -> &str {
        &self.leading_trivia
    }
}

impl PropertyLike for PropertySignature {
    fn node_id(&self) -> NodeId {
        self.id
    }
    fn name(&self) -> &PropertyName {
        &self.name
    }
    fn is_optional(&self) -> bool {
        self.question_token
    }
    fn type_annotation(&self) -> Option<&TypeNode> {
        self.type_annotation.as_ref()
    }
    fn initializer(&self) -> Option<&Expression> {
        None
    }
    fn decorators(&self) -> &[Decorator] {
        &[]
    }
    fn leading_trivia(&self) -> &str {
        &self.leading_trivia
    }
}

#[cfg(test)]
#[path = "../tests/node_tests.rs"]
mod tests;
