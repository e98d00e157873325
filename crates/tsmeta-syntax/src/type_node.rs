//! Syntactic type annotations.
//!
//! The closed set of annotation shapes the descriptor resolver distinguishes.
//! Everything the resolver treats uniformly (function types, tuples, mapped
//! types, ...) is `Other`; its meaning comes from the type oracle.

use crate::node::{NodeId, PropertySignature};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeNode {
    #[serde(default)]
    pub id: NodeId,
    pub kind: TypeNodeKind,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TypeNodeKind {
    Keyword(KeywordType),
    /// `Foo`, `ns.Foo`, `Array<T>`
    Reference {
        name: String,
        #[serde(default)]
        type_arguments: Vec<TypeNode>,
    },
    /// `T[]`
    Array(Box<TypeNode>),
    /// `A | B | null`
    Union(Vec<TypeNode>),
    /// `'a'`, `1`, `true`, `null`
    Literal(LiteralType),
    /// `{ a: string; b?: number }`
    TypeLiteral(Vec<PropertySignature>),
    /// `(T)`
    Parenthesized(Box<TypeNode>),
    Other,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum KeywordType {
    String,
    Number,
    Boolean,
    BigInt,
    Symbol,
    Any,
    Unknown,
    Object,
    Null,
    Undefined,
    Void,
    Never,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LiteralType {
    String(String),
    Number(String),
    Boolean(bool),
    Null,
}

impl TypeNode {
    pub fn new(id: NodeId, kind: TypeNodeKind) -> Self {
        Self { id, kind }
    }

    pub fn keyword(id: NodeId, keyword: KeywordType) -> Self {
        Self::new(id, TypeNodeKind::Keyword(keyword))
    }

    pub fn reference(id: NodeId, name: impl Into<String>) -> Self {
        Self::new(
            id,
            TypeNodeKind::Reference {
                name: name.into(),
                type_arguments: Vec::new(),
            },
        )
    }

    pub fn array(id: NodeId, element: TypeNode) -> Self {
        Self::new(id, TypeNodeKind::Array(Box::new(element)))
    }

    pub fn union(id: NodeId, members: Vec<TypeNode>) -> Self {
        Self::new(id, TypeNodeKind::Union(members))
    }

    pub fn null(id: NodeId) -> Self {
        Self::new(id, TypeNodeKind::Literal(LiteralType::Null))
    }

    pub fn type_literal(id: NodeId, members: Vec<PropertySignature>) -> Self {
        Self::new(id, TypeNodeKind::TypeLiteral(members))
    }

    /// Strip redundant parentheses: `((T))` -> `T`.
    pub fn skip_parentheses(&self) -> &TypeNode {
        let mut current = self;
        while let TypeNodeKind::Parenthesized(inner) = &current.kind {
            current = inner.as_ref();
        }
        current
    }

    /// Whether this node spells `null` (either as a keyword or literal type).
    pub fn is_null(&self) -> bool {
        matches!(
            self.skip_parentheses().kind,
            TypeNodeKind::Literal(LiteralType::Null) | TypeNodeKind::Keyword(KeywordType::Null)
        )
    }
}
