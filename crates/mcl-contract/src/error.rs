use mcl_types::EntityKind;

/// Errors raised by contract execution.
///
/// Each variant carries a stable machine-readable code (for the wire)
/// plus a human-readable detail via `Display`.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ContractError {
    /// Malformed or missing input, rejected before any state access.
    #[error("validation failed: {0}")]
    Validation(String),

    /// The record is absent, or its stored value is empty.
    #[error("{kind} with ID {id} not found")]
    NotFound { kind: EntityKind, id: String },

    /// A referenced entity has no existence marker.
    #[error("referenced {kind} with ID {id} does not exist")]
    MissingReference { kind: EntityKind, id: String },

    /// The claim state machine refuses this transition.
    #[error("claim status transition not allowed: {from} -> {to}")]
    InvalidTransition { from: String, to: String },

    /// Unknown transaction name.
    #[error("unknown transaction: {0}")]
    UnknownTransaction(String),

    #[error(transparent)]
    State(#[from] mcl_state::StateError),

    #[error("stored record is not valid JSON: {0}")]
    CorruptRecord(String),
}

impl ContractError {
    /// Stable wire code, decoded by the gateway into its own taxonomy.
    pub fn code(&self) -> &'static str {
        match self {
            ContractError::Validation(_)
            | ContractError::MissingReference { .. }
            | ContractError::InvalidTransition { .. }
            | ContractError::UnknownTransaction(_) => "VALIDATION",
            ContractError::NotFound { .. } => "NOT_FOUND",
            ContractError::State(_) | ContractError::CorruptRecord(_) => "STATE",
        }
    }
}

pub type ContractResult<T> = Result<T, ContractError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_failures_are_validation_on_the_wire() {
        let err = ContractError::MissingReference {
            kind: EntityKind::Treatment,
            id: "T1".into(),
        };
        assert_eq!(err.code(), "VALIDATION");
        assert!(err.to_string().contains("Treatment"));
    }

    #[test]
    fn not_found_is_distinct() {
        let err = ContractError::NotFound {
            kind: EntityKind::Patient,
            id: "P1".into(),
        };
        assert_eq!(err.code(), "NOT_FOUND");
    }
}
