/// Errors from parsing or validating foundation types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TypeError {
    #[error("unknown organization: {0}")]
    InvalidOrg(String),

    #[error("unknown entity kind: {0}")]
    InvalidKind(String),

    #[error("invalid claim status: {0}")]
    InvalidStatus(String),

    #[error("claim status transition not allowed: {from} -> {to}")]
    InvalidTransition { from: String, to: String },
}
