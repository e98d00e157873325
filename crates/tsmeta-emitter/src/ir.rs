//! Lowered IR (Intermediate Representation) for generated code
//!
//! This module defines a tree-structured IR that the metadata pass produces
//! instead of strings. The IR nodes represent JavaScript constructs that the
//! printer can emit.
//!
//! # Architecture
//!
//! The descriptor assembler builds typed descriptors; lowering turns them into
//! IR trees (object literals, lazy `() => Type` thunks, `require(...)`
//! accesses). The printer then walks these IR trees and emits source text.
//!
//! Source expressions the pass re-emits verbatim (default values, decorator
//! arguments) enter the IR through `IRNode::from_expression`.

use tsmeta_syntax::{Expression, ObjectLiteralElement, PropertyName};

/// Intermediate Representation node for generated JavaScript
#[derive(Debug, Clone, PartialEq)]
pub enum IRNode {
    // =========================================================================
    // Literals
    // =========================================================================
    /// Numeric literal: `42`, `3.14`
    NumericLiteral(String),

    /// String literal: `"hello"` (value, unescaped)
    StringLiteral(String),

    /// Boolean literal: `true`, `false`
    BooleanLiteral(bool),

    /// Null literal: `null`
    NullLiteral,

    /// Undefined: `void 0`
    Undefined,

    /// Regular expression literal, full source text: `/a+/g`
    RegularExpressionLiteral(String),

    // =========================================================================
    // Identifiers
    // =========================================================================
    /// Identifier: `foo`, `_bar`
    Identifier(String),

    /// `this`
    This,

    // =========================================================================
    // Expressions
    // =========================================================================
    /// Unary prefix expression: `-x`, `!x`
    PrefixUnaryExpr {
        operator: String,
        operand: Box<Self>,
    },

    /// Call expression: `callee(args)`
    CallExpr {
        callee: Box<Self>,
        arguments: Vec<Self>,
    },

    /// New expression: `new Callee(args)`
    NewExpr {
        callee: Box<Self>,
        arguments: Vec<Self>,
    },

    /// Property access: `object.property`
    PropertyAccess { object: Box<Self>, property: String },

    /// Element access: `object[index]`
    ElementAccess { object: Box<Self>, index: Box<Self> },

    /// Parenthesized expression: `(expr)`
    Parenthesized(Box<Self>),

    /// Array literal: `[a, b, c]`
    ArrayLiteral(Vec<Self>),

    /// Object literal: `{ key: value, ... }`
    ObjectLiteral {
        properties: Vec<IRProperty>,
        /// One property per line instead of a single line.
        multi_line: bool,
    },

    /// Arrow function with an expression body: `(params) => body`
    ArrowFunction {
        parameters: Vec<IRParam>,
        body: Box<Self>,
        is_async: bool,
    },

    /// Arrow function with a block body: `async () => { ... }`
    ArrowFunctionBlock {
        parameters: Vec<IRParam>,
        body: Vec<Self>,
        is_async: bool,
    },

    /// `await expr`
    AwaitExpr(Box<Self>),

    /// Dynamic import: `import("specifier")`
    ImportCall(String),

    // =========================================================================
    // Statements
    // =========================================================================
    /// `const name = value;`
    ConstDecl { name: String, initializer: Box<Self> },

    /// Expression statement: `expr;`
    ExpressionStatement(Box<Self>),

    /// Return statement: `return expr;`
    ReturnStatement(Option<Box<Self>>),

    /// `export default expr;`
    ExportDefault(Box<Self>),

    // =========================================================================
    // Class members
    // =========================================================================
    /// Static method member: `static name() { body }`
    StaticMethod { name: String, body: Vec<Self> },

    // =========================================================================
    // Special
    // =========================================================================
    /// Raw JavaScript string (escape hatch for opaque source text)
    Raw(String),

    /// Sequence of statements, one per line
    Sequence(Vec<Self>),
}

/// Property in an object literal
#[derive(Debug, Clone, PartialEq)]
pub struct IRProperty {
    pub key: IRPropertyKey,
    pub value: IRNode,
}

/// Object property key
#[derive(Debug, Clone, PartialEq)]
pub enum IRPropertyKey {
    /// Printed bare when it is a valid identifier, quoted otherwise.
    Identifier(String),
    /// Always printed quoted: `"key"`
    StringLiteral(String),
    NumericLiteral(String),
    /// `[expr]`
    Computed(Box<IRNode>),
    /// Shorthand property: `{ name }`
    Shorthand(String),
    /// Spread: `{ ...expr }` (value holds the spread operand)
    Spread,
}

/// Function parameter
#[derive(Debug, Clone, PartialEq)]
pub struct IRParam {
    pub name: String,
    pub rest: bool,
}

// =========================================================================
// Builder helpers for IR construction
// =========================================================================

impl IRNode {
    /// Create an identifier node
    pub fn id(name: impl Into<String>) -> Self {
        Self::Identifier(name.into())
    }

    /// Create a string literal
    pub fn string(s: impl Into<String>) -> Self {
        Self::StringLiteral(s.into())
    }

    /// Create a numeric literal
    pub fn number(n: impl Into<String>) -> Self {
        Self::NumericLiteral(n.into())
    }

    /// Create a call expression
    pub fn call(callee: Self, args: Vec<Self>) -> Self {
        Self::CallExpr {
            callee: Box::new(callee),
            arguments: args,
        }
    }

    /// Create a property access
    pub fn prop(object: Self, property: impl Into<String>) -> Self {
        Self::PropertyAccess {
            object: Box::new(object),
            property: property.into(),
        }
    }

    /// Create an element access
    pub fn elem(object: Self, index: Self) -> Self {
        Self::ElementAccess {
            object: Box::new(object),
            index: Box::new(index),
        }
    }

    /// Create a return statement
    pub fn ret(expr: Option<Self>) -> Self {
        Self::ReturnStatement(expr.map(Box::new))
    }

    /// Create a zero-parameter arrow function: `() => body`
    pub fn thunk(body: Self) -> Self {
        Self::ArrowFunction {
            parameters: Vec::new(),
            body: Box::new(body),
            is_async: false,
        }
    }

    /// Create `void 0`
    pub const fn void_0() -> Self {
        Self::Undefined
    }

    /// Wrap in parentheses
    pub fn paren(self) -> Self {
        Self::Parenthesized(Box::new(self))
    }

    /// Create a single-line object literal
    pub const fn object(props: Vec<IRProperty>) -> Self {
        Self::ObjectLiteral {
            properties: props,
            multi_line: false,
        }
    }

    /// Create an object literal printed one property per line
    pub const fn object_multiline(props: Vec<IRProperty>) -> Self {
        Self::ObjectLiteral {
            properties: props,
            multi_line: true,
        }
    }

    /// Create an array literal
    pub const fn array(elements: Vec<Self>) -> Self {
        Self::ArrayLiteral(elements)
    }

    /// Create `await expr`
    pub fn await_expr(expr: Self) -> Self {
        Self::AwaitExpr(Box::new(expr))
    }

    /// Create `require("specifier")`
    pub fn require(specifier: impl Into<String>) -> Self {
        Self::call(Self::id("require"), vec![Self::string(specifier)])
    }

    /// Create a const declaration
    pub fn const_decl(name: impl Into<String>, init: Self) -> Self {
        Self::ConstDecl {
            name: name.into(),
            initializer: Box::new(init),
        }
    }

    /// Lower a JSON value (parsed doc-comment examples) to a literal tree.
    pub fn from_json(value: &serde_json::Value) -> Self {
        use serde_json::Value;
        match value {
            Value::Null => Self::NullLiteral,
            Value::Bool(b) => Self::BooleanLiteral(*b),
            Value::Number(n) => {
                let text = n.to_string();
                match text.strip_prefix('-') {
                    Some(abs) => Self::PrefixUnaryExpr {
                        operator: "-".to_string(),
                        operand: Box::new(Self::NumericLiteral(abs.to_string())),
                    },
                    None => Self::NumericLiteral(text),
                }
            }
            Value::String(s) => Self::StringLiteral(s.clone()),
            Value::Array(items) => Self::ArrayLiteral(items.iter().map(Self::from_json).collect()),
            Value::Object(map) => Self::object(
                map.iter()
                    .map(|(k, v)| IRProperty::init(k.clone(), Self::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Re-emit a source expression.
    pub fn from_expression(expr: &Expression) -> Self {
        match expr {
            Expression::StringLiteral(s) | Expression::NoSubstitutionTemplate(s) => {
                Self::StringLiteral(s.clone())
            }
            Expression::NumericLiteral(n) => Self::NumericLiteral(n.clone()),
            Expression::BigIntLiteral(n) => Self::NumericLiteral(format!("{n}n")),
            Expression::BooleanLiteral(b) => Self::BooleanLiteral(*b),
            Expression::Null => Self::NullLiteral,
            Expression::RegularExpressionLiteral(text) => {
                Self::RegularExpressionLiteral(text.clone())
            }
            Expression::Identifier(name) => Self::Identifier(name.clone()),
            Expression::This => Self::This,
            Expression::Super => Self::Raw("super".to_string()),
            Expression::PropertyAccess { expression, name } => {
                Self::prop(Self::from_expression(expression), name.clone())
            }
            Expression::ElementAccess {
                expression,
                argument,
            } => Self::elem(
                Self::from_expression(expression),
                Self::from_expression(argument),
            ),
            Expression::Call { callee, arguments } => Self::call(
                Self::from_expression(callee),
                arguments.iter().map(Self::from_expression).collect(),
            ),
            Expression::New { callee, arguments } => Self::NewExpr {
                callee: Box::new(Self::from_expression(callee)),
                arguments: arguments.iter().map(Self::from_expression).collect(),
            },
            Expression::PrefixUnary { operator, operand } => Self::PrefixUnaryExpr {
                operator: operator.clone(),
                operand: Box::new(Self::from_expression(operand)),
            },
            Expression::ArrayLiteral(elements) => {
                Self::ArrayLiteral(elements.iter().map(Self::from_expression).collect())
            }
            Expression::ObjectLiteral(elements) => Self::object(
                elements
                    .iter()
                    .map(|element| match element {
                        ObjectLiteralElement::Property { name, value } => IRProperty {
                            key: IRPropertyKey::from_property_name(name),
                            value: Self::from_expression(value),
                        },
                        ObjectLiteralElement::Shorthand(name) => IRProperty {
                            key: IRPropertyKey::Shorthand(name.clone()),
                            value: Self::Identifier(name.clone()),
                        },
                        ObjectLiteralElement::Spread(inner) => IRProperty {
                            key: IRPropertyKey::Spread,
                            value: Self::from_expression(inner),
                        },
                    })
                    .collect(),
            ),
            // Type assertions have no runtime meaning.
            Expression::As { expression, .. } => Self::from_expression(expression),
            Expression::Parenthesized(inner) => Self::from_expression(inner).paren(),
            Expression::Function(text) => Self::Raw(text.clone()).paren(),
            Expression::Other(text) => Self::Raw(text.clone()),
        }
    }
}

impl IRProperty {
    /// Create a simple property with identifier key: `{ key: value }`
    pub fn init(key: impl Into<String>, value: IRNode) -> Self {
        Self {
            key: IRPropertyKey::Identifier(key.into()),
            value,
        }
    }

    /// Create a property with string literal key: `{ "key": value }`
    pub fn init_string(key: impl Into<String>, value: IRNode) -> Self {
        Self {
            key: IRPropertyKey::StringLiteral(key.into()),
            value,
        }
    }

    /// Create a computed property: `{ [key]: value }`
    pub fn computed(key: IRNode, value: IRNode) -> Self {
        Self {
            key: IRPropertyKey::Computed(Box::new(key)),
            value,
        }
    }
}

impl IRPropertyKey {
    pub fn from_property_name(name: &PropertyName) -> Self {
        match name {
            PropertyName::Identifier(n) => Self::Identifier(n.clone()),
            PropertyName::StringLiteral(n) => Self::StringLiteral(n.clone()),
            PropertyName::NumericLiteral(n) => Self::NumericLiteral(n.clone()),
            PropertyName::PrivateIdentifier(n) => Self::Identifier(format!("#{n}")),
            PropertyName::Computed(expr) => {
                Self::Computed(Box::new(IRNode::from_expression(expr)))
            }
        }
    }
}

impl IRParam {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rest: false,
        }
    }

    pub fn rest(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rest: true,
        }
    }
}
