use mcl_gateway::GatewayError;

/// Failures from claim workflows.
#[derive(Debug, thiserror::Error)]
pub enum ClaimError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// The ledger returned bytes that do not decode as a claim.
    #[error("malformed claim record: {0}")]
    Malformed(String),
}

impl ClaimError {
    pub fn kind(&self) -> &'static str {
        match self {
            ClaimError::Gateway(e) => e.kind(),
            ClaimError::Malformed(_) => "INTERNAL",
        }
    }
}

pub type ClaimResult<T> = Result<T, ClaimError>;
