use serde::{Deserialize, Serialize};

use crate::entity::EntityKind;
use crate::status::ClaimStatus;

/// Patient detail record. Visible to Org1 and Org2 only.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    #[serde(rename = "patientID", default)]
    pub patient_id: String,
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

/// Treatment detail record. Visible to Org1 and Org2 only.
/// References the treated patient by ID.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Treatment {
    #[serde(rename = "treatmentID", default)]
    pub treatment_id: String,
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

/// Insurance policy record. Visible to Org2 only and never indexed —
/// its existence is not discoverable outside the insurer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insurance {
    pub name: String,
    pub aadhar_number: String,
    pub start_date: String,
    pub end_date: String,
    pub age: u32,
    pub insurance_number: String,
    pub claim_limit: f64,
    pub already_claimed: f64,
}

/// Insurance claim record. Visible to all three orgs.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Claim {
    #[serde(rename = "claimID", default)]
    pub claim_id: String,
    #[serde(rename = "treatmentID")]
    pub treatment_id: String,
    #[serde(rename = "patientID")]
    pub patient_id: String,
    pub aadhar_number: String,
    pub insurance_number: String,
    pub status: ClaimStatus,
}

/// The `{kind, id}` pair stored in the broad existence-index collection.
///
/// Carries no payload attribute, ever. This is the only shape an org
/// without detail-read rights can observe.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistenceMarker {
    pub kind: EntityKind,
    pub id: String,
}

impl ExistenceMarker {
    pub fn new(kind: EntityKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }
}
