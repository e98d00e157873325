//! Enum resolver.
//!
//! Finds the value domain of a property typed as an enum, an enum member, a
//! union of one enum's members, or a union of string/number literals, with
//! one optional level of array wrapping.

use crate::assembler::SeedSet;
use crate::context::DescriptorContext;
use crate::descriptor::{
    Assignments, DescriptorValue, EnumDomain, NamedReference, PropertyAssignment,
};
use crate::error::DescriptorError;
use crate::type_resolver::property_type;
use tracing::trace;
use tsmeta_syntax::{IntrinsicKind, LiteralValue, NamedType, PropertyLike, TypeId, TypeShape};

#[derive(Clone, Debug, PartialEq)]
pub struct EnumAssignment {
    pub domain: EnumDomain,
    pub is_array: bool,
}

impl EnumAssignment {
    /// `enum`, then `isArray` for array-typed properties.
    pub fn into_assignments(self) -> Assignments {
        let mut assignments = Assignments::new();
        assignments.push(PropertyAssignment::new(
            "enum",
            DescriptorValue::Enum(self.domain),
        ));
        if self.is_array {
            assignments.push(PropertyAssignment::new(
                "isArray",
                DescriptorValue::Bool(true),
            ));
        }
        assignments
    }
}

pub fn resolve_enum<P: PropertyLike + ?Sized>(
    property: &P,
    seed: &SeedSet,
    ctx: &mut DescriptorContext<'_>,
) -> Result<Option<EnumAssignment>, DescriptorError> {
    if seed.contains("enum") {
        return Ok(None);
    }
    let Some(ty) = property_type(property, ctx) else {
        return Ok(None);
    };

    let mut shape = strip_nullish(ctx.shape(ty)?, ctx)?;
    let mut is_array = false;
    if let TypeShape::Array(element) = shape {
        is_array = true;
        shape = strip_nullish(ctx.shape(element)?, ctx)?;
    }

    let domain = match shape {
        TypeShape::Enum(named) => Some(EnumDomain::Named(enum_reference(&named, ctx))),
        TypeShape::EnumMember { parent, .. } => parent_enum(parent, ctx)?,
        TypeShape::Union(members) => synthesized_domain(&members, ctx)?,
        _ => None,
    };
    if let Some(domain) = &domain {
        trace!(?domain, is_array, "enum domain");
    }
    Ok(domain.map(|domain| EnumAssignment { domain, is_array }))
}

/// Drop `null`/`undefined` members of a union; a single survivor replaces
/// the union.
fn strip_nullish(
    shape: TypeShape,
    ctx: &DescriptorContext<'_>,
) -> Result<TypeShape, DescriptorError> {
    let TypeShape::Union(members) = shape else {
        return Ok(shape);
    };
    let mut kept: Vec<TypeId> = Vec::with_capacity(members.len());
    let mut single: Option<TypeShape> = None;
    for member in members {
        let member_shape = ctx.shape(member)?;
        if matches!(
            member_shape,
            TypeShape::Intrinsic(IntrinsicKind::Null | IntrinsicKind::Undefined)
        ) {
            continue;
        }
        kept.push(member);
        single = Some(member_shape);
    }
    match (kept.len(), single) {
        (1, Some(shape)) => Ok(shape),
        _ => Ok(TypeShape::Union(kept)),
    }
}

fn enum_reference(named: &NamedType, ctx: &mut DescriptorContext<'_>) -> NamedReference {
    let access = ctx.access_for(named);
    NamedReference::with_access(named.name.as_str(), access)
}

fn parent_enum(
    parent: TypeId,
    ctx: &mut DescriptorContext<'_>,
) -> Result<Option<EnumDomain>, DescriptorError> {
    match ctx.shape(parent)? {
        TypeShape::Enum(named) => Ok(Some(EnumDomain::Named(enum_reference(&named, ctx)))),
        _ => Ok(None),
    }
}

/// A union with no enum declaration of its own: members of a single enum,
/// or string/number literals.
fn synthesized_domain(
    members: &[TypeId],
    ctx: &mut DescriptorContext<'_>,
) -> Result<Option<EnumDomain>, DescriptorError> {
    let shapes = members
        .iter()
        .map(|&member| ctx.shape(member))
        .collect::<Result<Vec<_>, _>>()?;
    if shapes.is_empty() {
        return Ok(None);
    }

    let mut common_parent: Option<TypeId> = None;
    let all_members_of_one_enum = shapes.iter().all(|shape| match shape {
        TypeShape::EnumMember { parent, .. } => {
            let same = common_parent.is_none_or(|p| p == *parent);
            common_parent = Some(*parent);
            same
        }
        _ => false,
    });
    if all_members_of_one_enum {
        if let Some(parent) = common_parent {
            return parent_enum(parent, ctx);
        }
    }

    let mut literals = Vec::with_capacity(shapes.len());
    for shape in shapes {
        match shape {
            TypeShape::Literal(value @ (LiteralValue::String(_) | LiteralValue::Number(_))) => {
                literals.push(value);
            }
            _ => return Ok(None),
        }
    }
    Ok(Some(EnumDomain::Literals(literals)))
}

#[cfg(test)]
#[path = "../tests/enum_resolver_tests.rs"]
mod tests;
