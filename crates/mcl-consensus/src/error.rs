/// Errors from the consensus network itself (not contract execution).
#[derive(Debug, thiserror::Error)]
pub enum ConsensusError {
    #[error("ordering service unavailable: {0}")]
    OrdererUnavailable(String),

    #[error("commit event stream closed")]
    EventStreamClosed,

    #[error("no peer at address: {0}")]
    UnknownPeer(String),

    #[error("channel handshake failed: {0}")]
    HandshakeFailed(String),

    #[error(transparent)]
    Partition(#[from] mcl_partition::PartitionError),
}

pub type ConsensusResult<T> = Result<T, ConsensusError>;
