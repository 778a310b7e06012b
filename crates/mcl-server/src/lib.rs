//! REST facade for the Medical Claims Ledger.
//!
//! One axum router covers all four domains (patients, treatments,
//! insurances, claims), translating JSON bodies into the positional
//! string arguments the transaction layer requires and mapping gateway
//! failures onto HTTP status codes. All ledger access goes through the
//! gateway client; this crate contains no ledger logic of its own.

pub mod config;
pub mod error;
pub mod handler;
pub mod router;
pub mod server;
pub mod state;

pub use config::{CryptoPaths, DeadlineConfig, ServerConfig};
pub use error::{ServerError, ServerResult};
pub use server::MclServer;
pub use state::AppState;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use tower::util::ServiceExt;

    use mcl_consensus::{Network, NetworkConfig};
    use mcl_types::Org;

    fn router_for(network: &Arc<Network>, org: Org) -> Router {
        let config = ServerConfig {
            org,
            ..ServerConfig::default()
        };
        let state = AppState::build(&config, Arc::clone(network)).unwrap();
        router::build_router(state)
    }

    async fn send(router: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let request = match body {
            Some(value) => Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(value.to_string()))
                .unwrap(),
            None => Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::empty())
                .unwrap(),
        };
        let response = router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    fn patient_body(id: &str) -> Value {
        json!({
            "patientID": id,
            "name": "John Doe",
            "age": 30,
            "gender": "Male",
            "bloodType": "O+",
            "height": 180,
            "weight": 75,
            "address": "123 Main St",
            "dob": "1990-01-01",
            "aadharNumber": "123456789012",
            "insuranceNumber": "INS123456",
            "phoneNumber": "1234567890",
            "emailID": "john.doe@example.com",
            "smokerStatus": "1",
        })
    }

    fn treatment_body(id: &str, patient_id: &str) -> Value {
        json!({
            "treatmentID": id,
            "medicalCondition": "Fever",
            "hospitalName": "City Hospital",
            "roomNumber": "101",
            "admissionType": "Emergency",
            "medication": "Paracetamol",
            "patientID": patient_id,
            "admissionDate": "2023-10-01",
            "releaseDate": "2023-10-05",
            "billingAmount": 500.5,
            "doctorName": "Dr. Smith",
        })
    }

    #[tokio::test]
    async fn health_endpoint() {
        let network = Network::start(NetworkConfig::default());
        let app = router_for(&network, Org::Org1);
        let (status, body) = send(&app, "GET", "/v1/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn patient_crud_round_trip() {
        let network = Network::start(NetworkConfig::default());
        let app = router_for(&network, Org::Org1);

        let (status, body) = send(&app, "POST", "/patients", Some(patient_body("P1"))).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["patientID"], "P1");

        let (status, body) = send(&app, "GET", "/patients/P1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "John Doe");
        assert_eq!(body["patientID"], "P1");

        let (status, body) = send(&app, "GET", "/patients/P1/exists", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["exists"], "yes");
    }

    #[tokio::test]
    async fn missing_patient_is_404() {
        let network = Network::start(NetworkConfig::default());
        let app = router_for(&network, Org::Org1);
        let (status, body) = send(&app, "GET", "/patients/ghost", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["error"], "NOT_FOUND");
    }

    #[tokio::test]
    async fn delete_keeps_the_existence_marker() {
        let network = Network::start(NetworkConfig::default());
        let app = router_for(&network, Org::Org1);
        send(&app, "POST", "/patients", Some(patient_body("P1"))).await;

        let (status, _) = send(&app, "DELETE", "/patients/P1", None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(&app, "GET", "/patients/P1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        // The marker survives the delete: the ID is still provably used.
        let (status, body) = send(&app, "GET", "/patients/P1/exists", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["exists"], "yes");
    }

    #[tokio::test]
    async fn insurance_is_never_discoverable_through_the_index() {
        let network = Network::start(NetworkConfig::default());
        let org2 = router_for(&network, Org::Org2);

        let (status, _) = send(
            &org2,
            "POST",
            "/insurances",
            Some(json!({
                "insuranceNumber": "INS9",
                "name": "Jane Smith",
                "aadharNumber": "987654321098",
                "startDate": "2023-02-15",
                "endDate": "2024-02-15",
                "age": 28,
                "claimLimit": 150000.0,
                "alreadyClaimed": 50000.0,
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        // Org2 reads it back; the broad index never reflects it.
        let (status, body) = send(&org2, "GET", "/insurances/INS9", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["insuranceNumber"], "INS9");

        let (status, body) = send(&org2, "GET", "/patients/INS9/exists", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["exists"], "no");
    }

    #[tokio::test]
    async fn claim_flow_over_http() {
        let network = Network::start(NetworkConfig::default());
        let org1 = router_for(&network, Org::Org1);
        let org3 = router_for(&network, Org::Org3);

        send(&org1, "POST", "/patients", Some(patient_body("P1"))).await;
        send(&org1, "POST", "/treatments", Some(treatment_body("T1", "P1"))).await;

        let (status, body) = send(
            &org3,
            "POST",
            "/claims",
            Some(json!({
                "claimID": "C1",
                "treatmentID": "T1",
                "patientID": "P1",
                "aadharNumber": "123456789012",
                "insuranceNumber": "INS123456",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["status"], "Pending");

        let (status, body) = send(
            &org3,
            "POST",
            "/claims/C1/status",
            Some(json!({ "status": "Approved" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "Approved");

        // Terminal state: further transitions are client errors.
        let (status, body) = send(
            &org3,
            "POST",
            "/claims/C1/status",
            Some(json!({ "status": "Rejected" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "VALIDATION");
    }

    #[tokio::test]
    async fn claim_with_missing_reference_is_400() {
        let network = Network::start(NetworkConfig::default());
        let org3 = router_for(&network, Org::Org3);
        let (status, body) = send(
            &org3,
            "POST",
            "/claims",
            Some(json!({
                "claimID": "C1",
                "treatmentID": "T-none",
                "patientID": "P-none",
                "aadharNumber": "123456789012",
                "insuranceNumber": "INS123456",
            })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["message"].as_str().unwrap().contains("T-none"));
    }
}
