use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

use mcl_claims::ClaimError;
use mcl_gateway::GatewayError;
use mcl_identity::IdentityError;

/// Facade failures, each carrying the machine-readable kind of the
/// underlying ledger error so the HTTP mapping stays mechanical.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error(transparent)]
    Claim(#[from] ClaimError),

    #[error(transparent)]
    Identity(#[from] IdentityError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("internal error: {0}")]
    Internal(String),
}

impl ServerError {
    pub fn kind(&self) -> &'static str {
        match self {
            ServerError::Gateway(e) => e.kind(),
            ServerError::Claim(e) => e.kind(),
            ServerError::Identity(_) => "CREDENTIAL",
            ServerError::Config(_) => "CONFIG",
            ServerError::Io(_) => "INTERNAL",
            ServerError::Internal(_) => "INTERNAL",
        }
    }

    fn status(&self) -> StatusCode {
        match self.kind() {
            "VALIDATION" => StatusCode::BAD_REQUEST,
            "NOT_FOUND" => StatusCode::NOT_FOUND,
            "CONFLICT" => StatusCode::CONFLICT,
            "ENDORSEMENT" | "CONNECTION" => StatusCode::BAD_GATEWAY,
            "DEADLINE" => StatusCode::GATEWAY_TIMEOUT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "error": self.kind(),
            "message": self.to_string(),
        }));
        (status, body).into_response()
    }
}

pub type ServerResult<T> = Result<T, ServerError>;

#[cfg(test)]
mod tests {
    use super::*;
    use mcl_gateway::Phase;

    #[test]
    fn status_mapping() {
        let not_found = ServerError::Gateway(GatewayError::NotFound("x".into()));
        assert_eq!(not_found.status(), StatusCode::NOT_FOUND);

        let conflict = ServerError::Gateway(GatewayError::Conflict("x".into()));
        assert_eq!(conflict.status(), StatusCode::CONFLICT);

        let deadline = ServerError::Gateway(GatewayError::DeadlineExceeded {
            phase: Phase::CommitStatus,
        });
        assert_eq!(deadline.status(), StatusCode::GATEWAY_TIMEOUT);

        let validation = ServerError::Gateway(GatewayError::Validation("x".into()));
        assert_eq!(validation.status(), StatusCode::BAD_REQUEST);

        let endorsement = ServerError::Gateway(GatewayError::Endorsement("x".into()));
        assert_eq!(endorsement.status(), StatusCode::BAD_GATEWAY);
    }
}
