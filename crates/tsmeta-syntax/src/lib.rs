//! Front-end interface model for the tsmeta metadata pass.
//!
//! Parsing and type checking happen in the host front end. What crosses the
//! boundary is modelled here:
//! - Declarations (`SourceFile`, `ClassDeclaration`, `PropertyDeclaration`)
//! - Type annotation nodes (`TypeNode`) and expressions (`Expression`)
//! - The type oracle (`TypeOracle`) and an interned implementation (`TypeTable`)
//!
//! Every node carries a host-assigned `NodeId`; the oracle answers type
//! queries keyed by it. All types are serde-(de)serializable so a front end
//! in another process can hand them over as JSON.

pub mod node;
pub use node::{
    ClassDeclaration, ClassMember, Decorator, MethodDeclaration, NodeId, PropertyDeclaration,
    PropertyLike, PropertyName, PropertySignature, SourceFile,
};

pub mod expression;
pub use expression::{Expression, ObjectLiteralElement};

pub mod type_node;
pub use type_node::{KeywordType, LiteralType, TypeNode, TypeNodeKind};

pub mod types;
pub use types::{
    IntrinsicKind, LiteralValue, ModuleRef, NamedType, TypeId, TypeOracle, TypeShape, TypeTable,
    TypeTableError,
};
