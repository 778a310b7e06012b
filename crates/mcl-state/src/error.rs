/// Errors from world-state access.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StateError {
    /// The store does not hold this collection at all.
    #[error("collection {collection} is not stored by this peer")]
    NotStored { collection: String },

    #[error(transparent)]
    Partition(#[from] mcl_partition::PartitionError),
}

pub type StateResult<T> = Result<T, StateError>;
