//! Descriptor assembler.
//!
//! Field order for one property:
//!
//! 1. `required`
//! 2. `type`, `nullable`
//! 3. documentation (`description`, `example`/`examples`, `deprecated`)
//! 4. `default`
//! 5. `enum`, `isArray`
//! 6. validation constraints (only with `classValidatorShim`)
//!
//! Keys in the seed set are never derived, and a key derived twice keeps its
//! first value.

use crate::classifier::safe_value;
use crate::context::DescriptorContext;
use crate::descriptor::{DescriptorValue, ObjectDescriptor, PropertyAssignment};
use crate::docs::documentation_assignments;
use crate::enum_resolver::resolve_enum;
use crate::error::DescriptorError;
use crate::options::PluginOptions;
use crate::type_resolver::resolve_type;
use crate::validation::validation_assignments;
use rustc_hash::FxHashSet;
use tsmeta_common::diagnostics::diagnostic_codes;
use tsmeta_syntax::{Decorator, Expression, ObjectLiteralElement, PropertyLike};

/// Keys the caller already supplies for a property.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SeedSet {
    keys: FxHashSet<String>,
}

impl SeedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keys of the object literal passed to a seed decorator
    /// (`@ApiProperty({ type: () => Cat, required: false })`).
    pub fn from_decorators(decorators: &[Decorator], options: &PluginOptions) -> Self {
        let mut seed = Self::new();
        for decorator in decorators {
            if !options.is_seed_decorator(&decorator.name) {
                continue;
            }
            let Some(Expression::ObjectLiteral(elements)) = decorator
                .first_argument()
                .map(Expression::skip_outer_expressions)
            else {
                continue;
            };
            seed.keys.extend(
                elements
                    .iter()
                    .filter_map(ObjectLiteralElement::key)
                    .map(str::to_string),
            );
        }
        seed
    }

    pub fn insert(&mut self, key: impl Into<String>) {
        self.keys.insert(key.into());
    }

    pub fn contains(&self, key: &str) -> bool {
        self.keys.contains(key)
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for SeedSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Build the descriptor for one property.
///
/// `depth` is the inline-shape nesting level: 0 for class properties.
pub fn assemble<P: PropertyLike + ?Sized>(
    property: &P,
    seed: &SeedSet,
    ctx: &mut DescriptorContext<'_>,
    depth: u32,
) -> Result<ObjectDescriptor, DescriptorError> {
    let mut descriptor = ObjectDescriptor::new();
    let mut add = |assignment: PropertyAssignment| {
        if !seed.contains(&assignment.key) {
            descriptor.insert(assignment.key, assignment.value);
        }
    };

    add(PropertyAssignment::new(
        "required",
        DescriptorValue::Bool(!property.is_optional()),
    ));

    resolve_type(property, seed, ctx, depth)?
        .into_iter()
        .for_each(&mut add);

    documentation_assignments(property.leading_trivia(), seed, ctx.options())
        .into_iter()
        .for_each(&mut add);

    if let Some(initializer) = property.initializer() {
        match safe_value(initializer, ctx.mode()) {
            Some(value) => add(PropertyAssignment::new("default", value)),
            None => {
                tracing::debug!(subject = ctx.subject(), "default value skipped");
                ctx.note(
                    "default value cannot be re-emitted",
                    diagnostic_codes::SKIPPED_DEFAULT_VALUE,
                );
            }
        }
    }

    if let Some(enum_assignment) = resolve_enum(property, seed, ctx)? {
        enum_assignment.into_assignments().into_iter().for_each(&mut add);
    }

    if ctx.options().class_validator_shim {
        validation_assignments(property.decorators(), ctx)
            .into_iter()
            .for_each(&mut add);
    }

    Ok(descriptor)
}

#[cfg(test)]
#[path = "../tests/assembler_tests.rs"]
mod tests;
