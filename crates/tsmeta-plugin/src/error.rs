use tsmeta_syntax::TypeId;

/// Failure while assembling one property's descriptor.
///
/// These never escape the class emitter: a failing property is skipped and
/// the rest of the class is still described.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum DescriptorError {
    #[error("type oracle has no shape for {0:?}")]
    DanglingType(TypeId),
    #[error("inline object type nested deeper than {limit} levels")]
    InlineShapeTooDeep { limit: u32 },
    #[error("type structure nested deeper than {limit} levels")]
    TypeTooDeep { limit: u32 },
}
