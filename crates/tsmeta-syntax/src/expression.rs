//! Expressions as they appear in initializers and decorator arguments.

use crate::node::PropertyName;
use crate::type_node::TypeNode;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Expression {
    /// `'text'` (unquoted, unescaped value)
    StringLiteral(String),
    /// `42`, `0x1f`, `1e3` (source text)
    NumericLiteral(String),
    /// `10n` (source text without the `n`)
    BigIntLiteral(String),
    /// `true` / `false`
    BooleanLiteral(bool),
    /// `null`
    Null,
    /// `/^[a-z]+$/i` (full source text including delimiters and flags)
    RegularExpressionLiteral(String),
    /// `` `text` `` without substitutions (unescaped value)
    NoSubstitutionTemplate(String),
    Identifier(String),
    This,
    Super,
    PropertyAccess {
        expression: Box<Expression>,
        name: String,
    },
    ElementAccess {
        expression: Box<Expression>,
        argument: Box<Expression>,
    },
    Call {
        callee: Box<Expression>,
        arguments: Vec<Expression>,
    },
    New {
        callee: Box<Expression>,
        arguments: Vec<Expression>,
    },
    /// `-1`, `!x`, `~x`
    PrefixUnary {
        operator: String,
        operand: Box<Expression>,
    },
    ArrayLiteral(Vec<Expression>),
    ObjectLiteral(Vec<ObjectLiteralElement>),
    /// `expr as T`
    As {
        expression: Box<Expression>,
        #[serde(default)]
        type_node: Option<Box<TypeNode>>,
    },
    Parenthesized(Box<Expression>),
    /// Arrow functions and function expressions (source text).
    Function(String),
    /// Anything else the front end does not break down further (source text).
    Other(String),
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ObjectLiteralElement {
    Property {
        name: PropertyName,
        value: Expression,
    },
    Shorthand(String),
    Spread(Expression),
}

impl ObjectLiteralElement {
    /// The key this element defines, when it is statically known.
    pub fn key(&self) -> Option<&str> {
        match self {
            ObjectLiteralElement::Property { name, .. } => match name {
                PropertyName::Identifier(n)
                | PropertyName::StringLiteral(n)
                | PropertyName::NumericLiteral(n) => Some(n),
                _ => None,
            },
            ObjectLiteralElement::Shorthand(n) => Some(n),
            ObjectLiteralElement::Spread(_) => None,
        }
    }
}

impl Expression {
    pub fn string(value: impl Into<String>) -> Self {
        Expression::StringLiteral(value.into())
    }

    pub fn number(text: impl Into<String>) -> Self {
        Expression::NumericLiteral(text.into())
    }

    pub fn ident(name: impl Into<String>) -> Self {
        Expression::Identifier(name.into())
    }

    pub fn prop(expression: Expression, name: impl Into<String>) -> Self {
        Expression::PropertyAccess {
            expression: Box::new(expression),
            name: name.into(),
        }
    }

    pub fn call(callee: Expression, arguments: Vec<Expression>) -> Self {
        Expression::Call {
            callee: Box::new(callee),
            arguments,
        }
    }

    pub fn negative(text: impl Into<String>) -> Self {
        Expression::PrefixUnary {
            operator: "-".to_string(),
            operand: Box::new(Expression::NumericLiteral(text.into())),
        }
    }

    /// Strip `as` casts and parentheses: `(x as T)` -> `x`.
    pub fn skip_outer_expressions(&self) -> &Expression {
        let mut current = self;
        loop {
            match current {
                Expression::As { expression, .. } | Expression::Parenthesized(expression) => {
                    current = expression.as_ref();
                }
                _ => return current,
            }
        }
    }

    /// Whether `this` or `super` occurs anywhere in the expression.
    ///
    /// Function bodies are opaque source text and are treated as capturing.
    pub fn references_this(&self) -> bool {
        match self {
            Expression::This | Expression::Super => true,
            Expression::Function(text) => text.contains("this") || text.contains("super"),
            Expression::PropertyAccess { expression, .. } => expression.references_this(),
            Expression::ElementAccess {
                expression,
                argument,
            } => expression.references_this() || argument.references_this(),
            Expression::Call { callee, arguments } | Expression::New { callee, arguments } => {
                callee.references_this() || arguments.iter().any(Expression::references_this)
            }
            Expression::PrefixUnary { operand, .. } => operand.references_this(),
            Expression::ArrayLiteral(elements) => elements.iter().any(Expression::references_this),
            Expression::ObjectLiteral(elements) => elements.iter().any(|e| match e {
                ObjectLiteralElement::Property { name, value } => {
                    value.references_this()
                        || matches!(name, PropertyName::Computed(key) if key.references_this())
                }
                ObjectLiteralElement::Shorthand(_) => false,
                ObjectLiteralElement::Spread(e) => e.references_this(),
            }),
            Expression::As { expression, .. } | Expression::Parenthesized(expression) => {
                expression.references_this()
            }
            Expression::Other(text) => text.contains("this") || text.contains("super"),
            _ => false,
        }
    }
}
