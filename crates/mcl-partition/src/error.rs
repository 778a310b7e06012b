use mcl_types::EntityKind;

/// Errors from partition-map lookups.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PartitionError {
    #[error("unknown collection: {0}")]
    UnknownCollection(String),

    #[error("entity kind {0} has no existence-index collection")]
    NotIndexed(EntityKind),

    #[error("no single org is a member of every touched collection")]
    NoEligibleEndorsers,
}

pub type PartitionResult<T> = Result<T, PartitionError>;
