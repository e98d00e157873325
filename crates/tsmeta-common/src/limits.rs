//! Centralized limits and thresholds for the metadata pass.
//!
//! Both limits guard recursion over data the front end hands us. A front end
//! with a cyclic type graph (an oracle that returns a type containing itself)
//! must not be able to overflow the stack.

/// Maximum nesting depth of inline object-literal shapes.
///
/// ```typescript
/// class Dto {
///     a: { b: { c: { d: string } } };
/// }
/// ```
///
/// Each `{ ... }` level runs the full descriptor assembler on its members.
/// Deeper shapes fail the property with `DescriptorError::DepthExceeded`.
pub const MAX_INLINE_SHAPE_DEPTH: u32 = 32;

/// Maximum depth when walking oracle type shapes (arrays, unions) to derive
/// a printable type reference or an enum domain.
pub const MAX_TYPE_WALK_DEPTH: u32 = 64;
