use std::sync::Arc;

use tracing::info;

use mcl_gateway::{tx_args, Gateway, GatewayError};
use mcl_types::{fresh_record_id, Claim, ClaimStatus};

use crate::error::{ClaimError, ClaimResult};

/// Coordinates the claim lifecycle over a gateway client.
///
/// Creation always produces a `Pending` claim and requires both
/// referenced entities to exist (enforced inside the transaction, not
/// here). Transitions check the state machine before submitting; the
/// submitted transaction re-reads the claim in-simulation, so a
/// transition raced by another writer surfaces as a conflict instead
/// of silently losing the update.
pub struct ClaimService {
    gateway: Arc<Gateway>,
}

impl ClaimService {
    pub fn new(gateway: Arc<Gateway>) -> Self {
        Self { gateway }
    }

    /// A fresh claim ID in the conventional form (`CLAIM` + millis).
    pub fn generate_claim_id() -> String {
        fresh_record_id("CLAIM")
    }

    /// Create a claim with status `Pending`. Fails with a validation
    /// error naming the missing entity if the referenced treatment or
    /// patient has no existence marker.
    pub async fn create_claim(
        &self,
        claim_id: &str,
        treatment_id: &str,
        patient_id: &str,
        aadhar_number: &str,
        insurance_number: &str,
    ) -> ClaimResult<Claim> {
        self.gateway
            .submit(
                "CreateClaim",
                tx_args![claim_id, treatment_id, patient_id, aadhar_number, insurance_number],
            )
            .await?;
        info!(claim_id, "claim created");
        self.read_claim(claim_id).await
    }

    /// Move a claim to `new_status`, returning the updated record.
    ///
    /// The state machine is checked against a pre-read snapshot to
    /// fail obviously-invalid transitions fast; the authoritative
    /// check and the conflict guard run inside the submitted
    /// transaction.
    pub async fn transition_status(
        &self,
        claim_id: &str,
        new_status: ClaimStatus,
    ) -> ClaimResult<Claim> {
        let current = self.read_claim(claim_id).await?;
        if !current.status.can_transition_to(new_status) {
            return Err(GatewayError::Validation(format!(
                "claim status transition not allowed: {} -> {}",
                current.status, new_status
            ))
            .into());
        }

        self.gateway
            .submit(
                "UpdateClaimStatus",
                tx_args![claim_id, new_status.as_str()],
            )
            .await?;
        info!(claim_id, status = %new_status, "claim transitioned");
        self.read_claim(claim_id).await
    }

    pub async fn approve(&self, claim_id: &str) -> ClaimResult<Claim> {
        self.transition_status(claim_id, ClaimStatus::Approved).await
    }

    pub async fn reject(&self, claim_id: &str) -> ClaimResult<Claim> {
        self.transition_status(claim_id, ClaimStatus::Rejected).await
    }

    pub async fn read_claim(&self, claim_id: &str) -> ClaimResult<Claim> {
        let bytes = self
            .gateway
            .evaluate("ReadClaim", tx_args![claim_id])
            .await?;
        serde_json::from_slice(&bytes).map_err(|e| ClaimError::Malformed(e.to_string()))
    }

    pub async fn list_claims(&self) -> ClaimResult<Vec<Claim>> {
        let bytes = self.gateway.evaluate("GetAllClaims", Vec::new()).await?;
        serde_json::from_slice(&bytes).map_err(|e| ClaimError::Malformed(e.to_string()))
    }
}
