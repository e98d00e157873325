//! Literal/expression classifier.
//!
//! Decides whether a source expression (a property initializer or a
//! validation decorator argument) may be copied into generated code.
//! Generated code runs away from the property: inside a static accessor in
//! augmentation mode, inside the consolidated artifact in collection mode.
//! Only primitives are reachable from the artifact; the accessor can also
//! see the module's bindings, but never an instance.

use crate::descriptor::DescriptorValue;
use crate::options::EmissionMode;
use tsmeta_syntax::{Expression, ObjectLiteralElement};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExpressionClass {
    /// String, number, bigint, boolean, `null` or a template without
    /// substitutions.
    Primitive,
    /// Not a primitive, but resolvable wherever the metadata is consumed.
    Referenceable,
    Unsafe,
}

pub fn classify(expr: &Expression, mode: EmissionMode) -> ExpressionClass {
    let expr = expr.skip_outer_expressions();
    if is_primitive_literal(expr) {
        return ExpressionClass::Primitive;
    }
    let referenceable = match mode {
        EmissionMode::Collect => is_date_construction(expr),
        EmissionMode::Augment => !expr.references_this() && is_module_reachable(expr),
    };
    if referenceable {
        ExpressionClass::Referenceable
    } else {
        ExpressionClass::Unsafe
    }
}

/// The value to store for `expr`, or `None` when it cannot be re-emitted.
pub fn safe_value(expr: &Expression, mode: EmissionMode) -> Option<DescriptorValue> {
    match classify(expr, mode) {
        ExpressionClass::Unsafe => None,
        ExpressionClass::Primitive | ExpressionClass::Referenceable => {
            Some(literal_value(expr.skip_outer_expressions()))
        }
    }
}

pub fn is_primitive_literal(expr: &Expression) -> bool {
    match expr.skip_outer_expressions() {
        Expression::StringLiteral(_)
        | Expression::NumericLiteral(_)
        | Expression::BigIntLiteral(_)
        | Expression::BooleanLiteral(_)
        | Expression::Null
        | Expression::NoSubstitutionTemplate(_) => true,
        Expression::PrefixUnary { operator, operand } => {
            (operator == "-" || operator == "+")
                && matches!(
                    operand.skip_outer_expressions(),
                    Expression::NumericLiteral(_) | Expression::BigIntLiteral(_)
                )
        }
        _ => false,
    }
}

fn literal_value(expr: &Expression) -> DescriptorValue {
    match expr {
        Expression::StringLiteral(s) | Expression::NoSubstitutionTemplate(s) => {
            DescriptorValue::String(s.clone())
        }
        Expression::NumericLiteral(n) => DescriptorValue::Number(n.clone()),
        Expression::BooleanLiteral(b) => DescriptorValue::Bool(*b),
        Expression::PrefixUnary { operator, operand } if operator == "-" => {
            match operand.skip_outer_expressions() {
                Expression::NumericLiteral(n) => DescriptorValue::Number(format!("-{n}")),
                _ => DescriptorValue::Expression(expr.clone()),
            }
        }
        _ => DescriptorValue::Expression(expr.clone()),
    }
}

/// `new Date()` / `new Date(<primitives>)`
fn is_date_construction(expr: &Expression) -> bool {
    match expr {
        Expression::New { callee, arguments } => {
            matches!(callee.skip_outer_expressions(), Expression::Identifier(name) if name == "Date")
                && arguments.iter().all(is_primitive_literal)
        }
        _ => false,
    }
}

/// Whether `expr` only uses module-level bindings and literals.
fn is_module_reachable(expr: &Expression) -> bool {
    match expr.skip_outer_expressions() {
        e if is_primitive_literal(e) => true,
        Expression::Identifier(_) | Expression::RegularExpressionLiteral(_) => true,
        Expression::PropertyAccess { expression, .. } => is_module_reachable(expression),
        Expression::ElementAccess {
            expression,
            argument,
        } => is_module_reachable(expression) && is_module_reachable(argument),
        Expression::Call { callee, arguments } | Expression::New { callee, arguments } => {
            is_module_reachable(callee) && arguments.iter().all(is_module_reachable)
        }
        Expression::PrefixUnary { operand, .. } => is_module_reachable(operand),
        Expression::ArrayLiteral(elements) => elements.iter().all(is_module_reachable),
        Expression::ObjectLiteral(elements) => elements.iter().all(|element| match element {
            ObjectLiteralElement::Property { value, .. } => is_module_reachable(value),
            ObjectLiteralElement::Shorthand(_) => true,
            ObjectLiteralElement::Spread(inner) => is_module_reachable(inner),
        }),
        _ => false,
    }
}

#[cfg(test)]
#[path = "../tests/classifier_tests.rs"]
mod tests;
