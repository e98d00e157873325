//! Type descriptor resolver.
//!
//! Turns a property's annotation (or, without one, its inferred type) into
//! the `type` field: a named reference, an inline shape for object-literal
//! types, or nothing. A union contributes `nullable: true` when one branch is
//! `null` and exactly one other branch remains; wider unions have no `type`.

use crate::assembler::{SeedSet, assemble};
use crate::context::DescriptorContext;
use crate::descriptor::{
    Assignments, DescriptorValue, NamedReference, ObjectDescriptor, PropertyAssignment,
    TypeReference,
};
use crate::error::DescriptorError;
use smallvec::SmallVec;
use tracing::trace;
use tsmeta_common::limits::{MAX_INLINE_SHAPE_DEPTH, MAX_TYPE_WALK_DEPTH};
use tsmeta_syntax::{
    IntrinsicKind, KeywordType, LiteralValue, NodeId, PropertyLike, PropertySignature, TypeId,
    TypeNode, TypeNodeKind, TypeShape,
};

struct ResolvedType {
    reference: Option<TypeReference>,
    nullable: bool,
}

impl ResolvedType {
    const fn absent() -> Self {
        Self {
            reference: None,
            nullable: false,
        }
    }
}

/// `type` (and `nullable`) assignments for one property.
///
/// `depth` is the inline-shape nesting level of `property`.
pub fn resolve_type<P: PropertyLike + ?Sized>(
    property: &P,
    seed: &SeedSet,
    ctx: &mut DescriptorContext<'_>,
    depth: u32,
) -> Result<Assignments, DescriptorError> {
    let mut assignments = Assignments::new();
    if seed.contains("type") {
        return Ok(assignments);
    }

    let resolved = match property.type_annotation() {
        Some(annotation) => resolve_type_node(annotation, property.node_id(), ctx, depth)?,
        None => ResolvedType {
            reference: resolve_oracle_type(property.node_id(), ctx)?,
            nullable: false,
        },
    };

    if let Some(reference) = resolved.reference {
        assignments.push(PropertyAssignment::new(
            "type",
            DescriptorValue::Lazy(reference),
        ));
    }
    // Also without `type`: `Status | null` where the enum has no runtime name.
    if resolved.nullable && !seed.contains("nullable") {
        assignments.push(PropertyAssignment::new(
            "nullable",
            DescriptorValue::Bool(true),
        ));
    }
    Ok(assignments)
}

/// The oracle type of a property: its annotation's type when the annotation
/// carries an id, else the declaration's.
pub(crate) fn property_type<P: PropertyLike + ?Sized>(
    property: &P,
    ctx: &DescriptorContext<'_>,
) -> Option<TypeId> {
    let oracle = ctx.oracle();
    property
        .type_annotation()
        .map(|annotation| annotation.id)
        .filter(|id| id.is_some())
        .and_then(|id| oracle.type_of_node(id))
        .or_else(|| oracle.type_of_node(property.node_id()))
}

fn resolve_type_node(
    node: &TypeNode,
    fallback: NodeId,
    ctx: &mut DescriptorContext<'_>,
    depth: u32,
) -> Result<ResolvedType, DescriptorError> {
    let node = node.skip_parentheses();
    match &node.kind {
        TypeNodeKind::TypeLiteral(members) => Ok(ResolvedType {
            reference: Some(TypeReference::Inline(inline_shape(members, ctx, depth)?)),
            nullable: false,
        }),
        TypeNodeKind::Union(branches) => {
            let nullable = branches.iter().any(TypeNode::is_null);
            let remaining: SmallVec<[&TypeNode; 2]> = branches
                .iter()
                .filter(|branch| !branch.is_null() && !is_undefined_keyword(branch))
                .collect();
            match remaining.as_slice() {
                [single] => {
                    let mut inner = if has_own_type(single) {
                        resolve_type_node(single, NodeId::NONE, ctx, depth)?
                    } else {
                        let id = if node.id.is_some() { node.id } else { fallback };
                        ResolvedType {
                            reference: resolve_non_nullish_type(id, ctx)?,
                            nullable: false,
                        }
                    };
                    inner.nullable |= nullable;
                    Ok(inner)
                }
                _ => {
                    trace!(branches = remaining.len(), "union not representable");
                    Ok(ResolvedType::absent())
                }
            }
        }
        _ => {
            let id = if node.id.is_some() { node.id } else { fallback };
            Ok(ResolvedType {
                reference: resolve_oracle_type(id, ctx)?,
                nullable: false,
            })
        }
    }
}

/// Whether a union branch can be resolved on its own: it carries an id, or
/// its meaning is syntactic.
fn has_own_type(branch: &TypeNode) -> bool {
    let branch = branch.skip_parentheses();
    branch.id.is_some()
        || matches!(
            branch.kind,
            TypeNodeKind::TypeLiteral(_) | TypeNodeKind::Union(_)
        )
}

fn is_undefined_keyword(node: &TypeNode) -> bool {
    matches!(
        node.skip_parentheses().kind,
        TypeNodeKind::Keyword(KeywordType::Undefined)
    )
}

fn resolve_oracle_type(
    node: NodeId,
    ctx: &mut DescriptorContext<'_>,
) -> Result<Option<TypeReference>, DescriptorError> {
    if !node.is_some() {
        return Ok(None);
    }
    match ctx.oracle().type_of_node(node) {
        Some(ty) => Ok(printable_reference(ty, ctx, 0)?.map(TypeReference::Named)),
        None => Ok(None),
    }
}

/// The oracle type of `node` with `null`/`undefined` union members removed.
/// Used for union branches the host handed over without ids.
fn resolve_non_nullish_type(
    node: NodeId,
    ctx: &mut DescriptorContext<'_>,
) -> Result<Option<TypeReference>, DescriptorError> {
    if !node.is_some() {
        return Ok(None);
    }
    let Some(ty) = ctx.oracle().type_of_node(node) else {
        return Ok(None);
    };
    let ty = match ctx.shape(ty)? {
        TypeShape::Union(members) => {
            let mut kept: SmallVec<[TypeId; 2]> = SmallVec::new();
            for member in members {
                if !matches!(
                    ctx.shape(member)?,
                    TypeShape::Intrinsic(IntrinsicKind::Null | IntrinsicKind::Undefined)
                ) {
                    kept.push(member);
                }
            }
            match kept.as_slice() {
                [single] => *single,
                _ => {
                    trace!(members = kept.len(), "union not representable");
                    return Ok(None);
                }
            }
        }
        _ => ty,
    };
    Ok(printable_reference(ty, ctx, 0)?.map(TypeReference::Named))
}

/// Describe the members of an object-literal type.
fn inline_shape(
    members: &[PropertySignature],
    ctx: &mut DescriptorContext<'_>,
    depth: u32,
) -> Result<ObjectDescriptor, DescriptorError> {
    if depth >= MAX_INLINE_SHAPE_DEPTH {
        return Err(DescriptorError::InlineShapeTooDeep {
            limit: MAX_INLINE_SHAPE_DEPTH,
        });
    }
    let mut shape = ObjectDescriptor::new();
    for member in members {
        let Some(name) = member.name.as_identifier() else {
            continue;
        };
        let descriptor = assemble(member, &SeedSet::default(), ctx, depth + 1)?;
        shape.insert(name, DescriptorValue::Object(descriptor));
    }
    Ok(shape)
}

/// The runtime name a type is described by, if it has one.
pub fn printable_reference(
    ty: TypeId,
    ctx: &mut DescriptorContext<'_>,
    depth: u32,
) -> Result<Option<NamedReference>, DescriptorError> {
    if depth > MAX_TYPE_WALK_DEPTH {
        return Err(DescriptorError::TypeTooDeep {
            limit: MAX_TYPE_WALK_DEPTH,
        });
    }
    let reference = match ctx.shape(ty)? {
        TypeShape::Intrinsic(kind) => intrinsic_name(kind).map(NamedReference::global),
        TypeShape::Literal(value) => Some(NamedReference::global(literal_name(&value))),
        TypeShape::Array(element) => {
            printable_reference(element, ctx, depth + 1)?.map(NamedReference::wrap_array)
        }
        TypeShape::Tuple(_) => Some(NamedReference::global("Array")),
        TypeShape::Union(members) => union_reference(&members, ctx, depth)?,
        TypeShape::Class(named) => {
            let access = ctx.access_for(&named);
            Some(NamedReference::with_access(named.name, access))
        }
        TypeShape::Interface(_) | TypeShape::Object => Some(NamedReference::global("Object")),
        TypeShape::Function => Some(NamedReference::global("Function")),
        TypeShape::Enum(_) | TypeShape::EnumMember { .. } | TypeShape::TypeParameter(_) => None,
    };
    Ok(reference)
}

fn intrinsic_name(kind: IntrinsicKind) -> Option<&'static str> {
    match kind {
        IntrinsicKind::String => Some("String"),
        IntrinsicKind::Number => Some("Number"),
        IntrinsicKind::Boolean => Some("Boolean"),
        IntrinsicKind::BigInt => Some("BigInt"),
        IntrinsicKind::Any | IntrinsicKind::Unknown | IntrinsicKind::Object => Some("Object"),
        IntrinsicKind::Symbol
        | IntrinsicKind::Null
        | IntrinsicKind::Undefined
        | IntrinsicKind::Void
        | IntrinsicKind::Never => None,
    }
}

fn literal_name(value: &LiteralValue) -> &'static str {
    match value {
        LiteralValue::String(_) => "String",
        LiteralValue::Number(_) => "Number",
        LiteralValue::Boolean(_) => "Boolean",
        LiteralValue::BigInt(_) => "BigInt",
    }
}

/// `T | undefined` is `T`; a union of literals of one primitive kind
/// (including `true | false`) is that primitive. Anything else is unnamed.
fn union_reference(
    members: &[TypeId],
    ctx: &mut DescriptorContext<'_>,
    depth: u32,
) -> Result<Option<NamedReference>, DescriptorError> {
    let mut kept: SmallVec<[(TypeId, TypeShape); 4]> = SmallVec::new();
    for &member in members {
        let shape = ctx.shape(member)?;
        if shape != TypeShape::Intrinsic(IntrinsicKind::Undefined) {
            kept.push((member, shape));
        }
    }

    if let [(single, _)] = kept.as_slice() {
        return printable_reference(*single, ctx, depth + 1);
    }

    let mut primitive: Option<&'static str> = None;
    for (_, shape) in &kept {
        let TypeShape::Literal(value) = shape else {
            return Ok(None);
        };
        let name = literal_name(value);
        if primitive.is_some_and(|p| p != name) {
            return Ok(None);
        }
        primitive = Some(name);
    }
    Ok(primitive.map(NamedReference::global))
}

#[cfg(test)]
#[path = "../tests/type_resolver_tests.rs"]
mod tests;
