use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};

use mcl_gateway::tx_args;
use mcl_types::{fresh_record_id, ClaimStatus};

use crate::error::ServerResult;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Request bodies (wire field names, numbers as JSON numbers)
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientBody {
    #[serde(rename = "patientID", default)]
    pub patient_id: Option<String>,
    pub name: String,
    pub age: u32,
    pub gender: String,
    pub blood_type: String,
    pub height: u32,
    pub weight: u32,
    pub address: String,
    pub dob: String,
    pub aadhar_number: String,
    pub insurance_number: String,
    pub phone_number: String,
    #[serde(rename = "emailID")]
    pub email_id: String,
    pub smoker_status: String,
}

impl PatientBody {
    fn into_args(self, id: &str) -> Vec<String> {
        tx_args![
            id,
            self.name,
            self.age,
            self.gender,
            self.blood_type,
            self.height,
            self.weight,
            self.address,
            self.dob,
            self.aadhar_number,
            self.insurance_number,
            self.phone_number,
            self.email_id,
            self.smoker_status
        ]
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TreatmentBody {
    #[serde(rename = "treatmentID", default)]
    pub treatment_id: Option<String>,
    pub medical_condition: String,
    pub hospital_name: String,
    pub room_number: String,
    pub admission_type: String,
    pub medication: String,
    #[serde(rename = "patientID")]
    pub patient_id: String,
    pub admission_date: String,
    pub release_date: String,
    pub billing_amount: f64,
    pub doctor_name: String,
}

impl TreatmentBody {
    fn into_args(self, id: &str) -> Vec<String> {
        tx_args![
            id,
            self.medical_condition,
            self.hospital_name,
            self.room_number,
            self.admission_type,
            self.medication,
            self.patient_id,
            self.admission_date,
            self.release_date,
            self.billing_amount,
            self.doctor_name
        ]
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsuranceBody {
    pub insurance_number: String,
    pub name: String,
    pub aadhar_number: String,
    pub start_date: String,
    pub end_date: String,
    pub age: u32,
    pub claim_limit: f64,
    pub already_claimed: f64,
}

impl InsuranceBody {
    fn into_args(self) -> Vec<String> {
        tx_args![
            self.insurance_number,
            self.name,
            self.aadhar_number,
            self.start_date,
            self.end_date,
            self.age,
            self.claim_limit,
            self.already_claimed
        ]
    }

    fn update_args(self, id: &str) -> Vec<String> {
        tx_args![
            id,
            self.name,
            self.aadhar_number,
            self.start_date,
            self.end_date,
            self.age,
            self.claim_limit,
            self.already_claimed
        ]
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimBody {
    #[serde(rename = "claimID", default)]
    pub claim_id: Option<String>,
    #[serde(rename = "treatmentID")]
    pub treatment_id: String,
    #[serde(rename = "patientID")]
    pub patient_id: String,
    pub aadhar_number: String,
    pub insurance_number: String,
}

#[derive(Debug, Deserialize)]
pub struct StatusBody {
    pub status: ClaimStatus,
}

// ---------------------------------------------------------------------------
// Health
// ---------------------------------------------------------------------------

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

// ---------------------------------------------------------------------------
// Patients
// ---------------------------------------------------------------------------

pub async fn create_patient(
    State(state): State<AppState>,
    Json(body): Json<PatientBody>,
) -> ServerResult<(StatusCode, Json<Value>)> {
    let id = body
        .patient_id
        .clone()
        .unwrap_or_else(|| fresh_record_id("PATIENT"));
    state
        .gateway
        .submit("CreatePatient", body.into_args(&id))
        .await?;
    Ok((StatusCode::CREATED, Json(json!({ "patientID": id }))))
}

pub async fn read_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServerResult<Json<Value>> {
    evaluate_json(&state, "ReadPatient", tx_args![id]).await
}

pub async fn update_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<PatientBody>,
) -> ServerResult<Json<Value>> {
    state
        .gateway
        .submit("UpdatePatient", body.into_args(&id))
        .await?;
    Ok(Json(json!({ "patientID": id })))
}

pub async fn delete_patient(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServerResult<Json<Value>> {
    state.gateway.submit("DeletePatient", tx_args![id]).await?;
    Ok(Json(json!({ "patientID": id })))
}

pub async fn patient_exists(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServerResult<Json<Value>> {
    let bytes = state
        .gateway
        .evaluate("PatientExists", tx_args![id])
        .await?;
    Ok(Json(json!({ "exists": String::from_utf8_lossy(&bytes) })))
}

pub async fn list_patients(State(state): State<AppState>) -> ServerResult<Json<Value>> {
    evaluate_json(&state, "GetAllPatients", Vec::new()).await
}

// ---------------------------------------------------------------------------
// Treatments
// ---------------------------------------------------------------------------

pub async fn create_treatment(
    State(state): State<AppState>,
    Json(body): Json<TreatmentBody>,
) -> ServerResult<(StatusCode, Json<Value>)> {
    let id = body
        .treatment_id
        .clone()
        .unwrap_or_else(|| fresh_record_id("TREATMENT"));
    state
        .gateway
        .submit("CreateTreatment", body.into_args(&id))
        .await?;
    Ok((StatusCode::CREATED, Json(json!({ "treatmentID": id }))))
}

pub async fn read_treatment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServerResult<Json<Value>> {
    evaluate_json(&state, "ReadTreatment", tx_args![id]).await
}

pub async fn update_treatment(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<TreatmentBody>,
) -> ServerResult<Json<Value>> {
    state
        .gateway
        .submit("UpdateTreatment", body.into_args(&id))
        .await?;
    Ok(Json(json!({ "treatmentID": id })))
}

pub async fn delete_treatment(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServerResult<Json<Value>> {
    state
        .gateway
        .submit("DeleteTreatment", tx_args![id])
        .await?;
    Ok(Json(json!({ "treatmentID": id })))
}

pub async fn treatment_exists(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServerResult<Json<Value>> {
    let bytes = state
        .gateway
        .evaluate("TreatmentExists", tx_args![id])
        .await?;
    Ok(Json(json!({ "exists": String::from_utf8_lossy(&bytes) })))
}

pub async fn list_treatments(State(state): State<AppState>) -> ServerResult<Json<Value>> {
    evaluate_json(&state, "GetAllTreatments", Vec::new()).await
}

// ---------------------------------------------------------------------------
// Insurances
// ---------------------------------------------------------------------------

pub async fn create_insurance(
    State(state): State<AppState>,
    Json(body): Json<InsuranceBody>,
) -> ServerResult<(StatusCode, Json<Value>)> {
    let id = body.insurance_number.clone();
    state
        .gateway
        .submit("CreateInsurance", body.into_args())
        .await?;
    Ok((StatusCode::CREATED, Json(json!({ "insuranceNumber": id }))))
}

pub async fn read_insurance(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServerResult<Json<Value>> {
    evaluate_json(&state, "ReadInsurance", tx_args![id]).await
}

pub async fn update_insurance(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<InsuranceBody>,
) -> ServerResult<Json<Value>> {
    state
        .gateway
        .submit("UpdateInsurance", body.update_args(&id))
        .await?;
    Ok(Json(json!({ "insuranceNumber": id })))
}

pub async fn delete_insurance(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServerResult<Json<Value>> {
    state
        .gateway
        .submit("DeleteInsurance", tx_args![id])
        .await?;
    Ok(Json(json!({ "insuranceNumber": id })))
}

pub async fn list_insurances(State(state): State<AppState>) -> ServerResult<Json<Value>> {
    evaluate_json(&state, "GetAllInsurances", Vec::new()).await
}

// ---------------------------------------------------------------------------
// Claims
// ---------------------------------------------------------------------------

pub async fn create_claim(
    State(state): State<AppState>,
    Json(body): Json<ClaimBody>,
) -> ServerResult<(StatusCode, Json<Value>)> {
    let id = body
        .claim_id
        .clone()
        .unwrap_or_else(mcl_claims::ClaimService::generate_claim_id);
    let claim = state
        .claims
        .create_claim(
            &id,
            &body.treatment_id,
            &body.patient_id,
            &body.aadhar_number,
            &body.insurance_number,
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(serde_json::to_value(claim).map_err(|e| {
            crate::error::ServerError::Internal(e.to_string())
        })?),
    ))
}

pub async fn read_claim(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServerResult<Json<Value>> {
    evaluate_json(&state, "ReadClaim", tx_args![id]).await
}

pub async fn transition_claim(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<StatusBody>,
) -> ServerResult<Json<Value>> {
    let claim = state.claims.transition_status(&id, body.status).await?;
    serde_json::to_value(claim)
        .map(Json)
        .map_err(|e| crate::error::ServerError::Internal(e.to_string()))
}

pub async fn delete_claim(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ServerResult<Json<Value>> {
    state.gateway.submit("DeleteClaim", tx_args![id]).await?;
    Ok(Json(json!({ "claimID": id })))
}

pub async fn list_claims(State(state): State<AppState>) -> ServerResult<Json<Value>> {
    evaluate_json(&state, "GetAllClaims", Vec::new()).await
}

// ---------------------------------------------------------------------------

/// Evaluate and re-serve the ledger's JSON result bytes.
async fn evaluate_json(
    state: &AppState,
    transaction: &str,
    args: Vec<String>,
) -> ServerResult<Json<Value>> {
    let bytes = state.gateway.evaluate(transaction, args).await?;
    let value: Value = serde_json::from_slice(&bytes)
        .map_err(|e| crate::error::ServerError::Internal(e.to_string()))?;
    Ok(Json(value))
}
