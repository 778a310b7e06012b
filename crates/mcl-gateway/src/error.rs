use std::fmt;

use mcl_contract::ContractError;

/// The pipeline phase a deadline belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Evaluate,
    Endorse,
    Submit,
    CommitStatus,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Phase::Evaluate => "evaluate",
            Phase::Endorse => "endorse",
            Phase::Submit => "submit",
            Phase::CommitStatus => "commit status",
        };
        f.write_str(name)
    }
}

/// Failures surfaced by the gateway client.
///
/// Every variant maps to a stable machine-readable kind via
/// [`GatewayError::kind`]; the `Display` form is the human-readable
/// detail. `DeadlineExceeded` and `Conflict` are deliberately distinct
/// from `NotFound` so a caller can tell "re-query to learn the
/// outcome" apart from "the record is genuinely absent".
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("{0}")]
    NotFound(String),

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("endorsement failed: {0}")]
    Endorsement(String),

    #[error("{phase} deadline exceeded; outcome unknown, re-query to confirm")]
    DeadlineExceeded { phase: Phase },

    #[error("transaction conflicted at commit: {0}")]
    Conflict(String),

    #[error("internal gateway failure: {0}")]
    Internal(String),
}

impl GatewayError {
    pub fn kind(&self) -> &'static str {
        match self {
            GatewayError::Validation(_) => "VALIDATION",
            GatewayError::NotFound(_) => "NOT_FOUND",
            GatewayError::Connection(_) => "CONNECTION",
            GatewayError::Endorsement(_) => "ENDORSEMENT",
            GatewayError::DeadlineExceeded { .. } => "DEADLINE",
            GatewayError::Conflict(_) => "CONFLICT",
            GatewayError::Internal(_) => "INTERNAL",
        }
    }

    /// Fold a contract execution failure into the gateway taxonomy.
    pub fn from_contract(err: ContractError) -> Self {
        match err.code() {
            "NOT_FOUND" => GatewayError::NotFound(err.to_string()),
            "VALIDATION" => GatewayError::Validation(err.to_string()),
            _ => GatewayError::Internal(err.to_string()),
        }
    }
}

impl From<mcl_consensus::ConsensusError> for GatewayError {
    fn from(err: mcl_consensus::ConsensusError) -> Self {
        use mcl_consensus::ConsensusError::*;
        match err {
            UnknownPeer(_) | HandshakeFailed(_) => GatewayError::Connection(err.to_string()),
            OrdererUnavailable(_) | EventStreamClosed => GatewayError::Internal(err.to_string()),
            Partition(e) => GatewayError::Validation(e.to_string()),
        }
    }
}

pub type GatewayResult<T> = Result<T, GatewayError>;
