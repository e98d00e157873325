//! Validation-annotation mapper.
//!
//! Translates class-validator decorators into schema constraints:
//!
//! | decorator    | fields                                   |
//! |--------------|------------------------------------------|
//! | `Min`        | `minimum`                                |
//! | `Max`        | `maximum`                                |
//! | `MinLength`  | `minLength`                              |
//! | `MaxLength`  | `maxLength`                              |
//! | `IsPositive` | `minimum: 1`                             |
//! | `IsNegative` | `maximum: -1`                            |
//! | `Length`     | `minLength`, `maxLength` (second arg)    |
//! | `Matches`    | `pattern` (literal source, with flags)   |
//! | `IsIn`       | `enum` (augmentation mode only)          |
//!
//! Only the first decorator of each name counts. An argument that cannot be
//! re-emitted drops that one field.

use crate::classifier::safe_value;
use crate::context::DescriptorContext;
use crate::descriptor::{DescriptorValue, PropertyAssignment};
use crate::options::EmissionMode;
use rustc_hash::FxHashSet;
use tsmeta_common::diagnostics::diagnostic_codes;
use tsmeta_syntax::{Decorator, Expression};

pub fn validation_assignments(
    decorators: &[Decorator],
    ctx: &mut DescriptorContext<'_>,
) -> Vec<PropertyAssignment> {
    let mut assignments = Vec::new();
    let mut seen: FxHashSet<&str> = FxHashSet::default();

    for decorator in decorators {
        let name = decorator.name.as_str();
        if !is_recognized(name) || !seen.insert(name) {
            continue;
        }
        match name {
            "Min" => push_argument(&mut assignments, "minimum", decorator, 0, ctx),
            "Max" => push_argument(&mut assignments, "maximum", decorator, 0, ctx),
            "MinLength" => push_argument(&mut assignments, "minLength", decorator, 0, ctx),
            "MaxLength" => push_argument(&mut assignments, "maxLength", decorator, 0, ctx),
            "IsPositive" => assignments.push(PropertyAssignment::new(
                "minimum",
                DescriptorValue::Number("1".to_string()),
            )),
            "IsNegative" => assignments.push(PropertyAssignment::new(
                "maximum",
                DescriptorValue::Number("-1".to_string()),
            )),
            "Length" => {
                push_argument(&mut assignments, "minLength", decorator, 0, ctx);
                if decorator.arguments.len() > 1 {
                    push_argument(&mut assignments, "maxLength", decorator, 1, ctx);
                }
            }
            "Matches" => match decorator.first_argument().map(Expression::skip_outer_expressions) {
                Some(Expression::RegularExpressionLiteral(text)) => assignments.push(
                    PropertyAssignment::new("pattern", DescriptorValue::String(text.clone())),
                ),
                _ => skipped(ctx, name),
            },
            "IsIn" => {
                if ctx.mode() == EmissionMode::Augment {
                    push_argument(&mut assignments, "enum", decorator, 0, ctx);
                }
            }
            _ => {}
        }
    }
    assignments
}

fn is_recognized(name: &str) -> bool {
    matches!(
        name,
        "Min"
            | "Max"
            | "MinLength"
            | "MaxLength"
            | "IsPositive"
            | "IsNegative"
            | "Length"
            | "Matches"
            | "IsIn"
    )
}

fn push_argument(
    assignments: &mut Vec<PropertyAssignment>,
    key: &str,
    decorator: &Decorator,
    index: usize,
    ctx: &mut DescriptorContext<'_>,
) {
    let value = decorator
        .arguments
        .get(index)
        .and_then(|argument| safe_value(argument, ctx.mode()));
    match value {
        Some(value) => assignments.push(PropertyAssignment::new(key, value)),
        None => skipped(ctx, &decorator.name),
    }
}

fn skipped(ctx: &mut DescriptorContext<'_>, decorator: &str) {
    tracing::debug!(subject = ctx.subject(), decorator, "validation argument skipped");
    ctx.note(
        format!("argument of @{decorator} cannot be re-emitted"),
        diagnostic_codes::SKIPPED_VALIDATION_ARGUMENT,
    );
}

#[cfg(test)]
#[path = "../tests/validation_tests.rs"]
mod tests;
