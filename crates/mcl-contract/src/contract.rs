use serde_json::Value;
use tracing::debug;

use mcl_partition::PartitionMap;
use mcl_types::{Claim, ClaimStatus, EntityKind, Insurance, Patient, Treatment};

use crate::error::{ContractError, ContractResult};
use crate::simulator::TxSimulator;
use crate::store::LedgerStore;

/// Existence results in the external wire contract.
const YES: &[u8] = b"yes";
const NO: &[u8] = b"no";

/// The deployed contract surface: maps wire transaction names onto the
/// kind-routed store operations.
///
/// Arguments are positional strings — the transaction layer carries
/// only strings and bytes, never structured values. Numbers and
/// booleans arrive in canonical string form and are parsed here;
/// parse failures are validation errors raised before any state access.
pub struct LedgerContract {
    store: LedgerStore,
}

impl LedgerContract {
    pub fn new(partition: PartitionMap) -> Self {
        Self {
            store: LedgerStore::new(partition),
        }
    }

    pub fn store(&self) -> &LedgerStore {
        &self.store
    }

    /// Execute one named transaction against a simulation context.
    /// Returns the result bytes; the caller owns the read/write set.
    pub fn invoke(
        &self,
        sim: &mut TxSimulator<'_>,
        name: &str,
        args: &[String],
    ) -> ContractResult<Vec<u8>> {
        debug!(transaction = name, args = args.len(), "invoke");
        match name {
            // -- Patient ----------------------------------------------------
            "CreatePatient" => {
                let patient = parse_patient(args)?;
                self.store.create(
                    sim,
                    EntityKind::Patient,
                    &patient.patient_id,
                    to_value(&patient)?,
                )?;
                Ok(Vec::new())
            }
            "ReadPatient" => {
                let [id] = expect_args::<1>(name, args)?;
                self.store.read(sim, EntityKind::Patient, id)
            }
            "UpdatePatient" => {
                let patient = parse_patient(args)?;
                self.store.update(
                    sim,
                    EntityKind::Patient,
                    &patient.patient_id,
                    to_value(&patient)?,
                )?;
                Ok(Vec::new())
            }
            "DeletePatient" => {
                let [id] = expect_args::<1>(name, args)?;
                self.store.delete(sim, EntityKind::Patient, id)?;
                Ok(Vec::new())
            }
            "PatientExists" => {
                let [id] = expect_args::<1>(name, args)?;
                Ok(encode_exists(self.store.exists(sim, EntityKind::Patient, id)?))
            }
            "GetAllPatients" => self.encode_list(sim, EntityKind::Patient),

            // -- Treatment --------------------------------------------------
            "CreateTreatment" => {
                let treatment = parse_treatment(args)?;
                self.store.create(
                    sim,
                    EntityKind::Treatment,
                    &treatment.treatment_id,
                    to_value(&treatment)?,
                )?;
                Ok(Vec::new())
            }
            "ReadTreatment" => {
                let [id] = expect_args::<1>(name, args)?;
                self.store.read(sim, EntityKind::Treatment, id)
            }
            "UpdateTreatment" => {
                let treatment = parse_treatment(args)?;
                self.store.update(
                    sim,
                    EntityKind::Treatment,
                    &treatment.treatment_id,
                    to_value(&treatment)?,
                )?;
                Ok(Vec::new())
            }
            "DeleteTreatment" => {
                let [id] = expect_args::<1>(name, args)?;
                self.store.delete(sim, EntityKind::Treatment, id)?;
                Ok(Vec::new())
            }
            "TreatmentExists" => {
                let [id] = expect_args::<1>(name, args)?;
                Ok(encode_exists(self.store.exists(sim, EntityKind::Treatment, id)?))
            }
            "GetAllTreatments" => self.encode_list(sim, EntityKind::Treatment),

            // -- Insurance --------------------------------------------------
            "CreateInsurance" => {
                let insurance = parse_insurance(args)?;
                self.store.create(
                    sim,
                    EntityKind::Insurance,
                    &insurance.insurance_number,
                    to_value(&insurance)?,
                )?;
                Ok(Vec::new())
            }
            "ReadInsurance" => {
                let [id] = expect_args::<1>(name, args)?;
                self.store.read(sim, EntityKind::Insurance, id)
            }
            "UpdateInsurance" => {
                let insurance = parse_insurance(args)?;
                self.store.update(
                    sim,
                    EntityKind::Insurance,
                    &insurance.insurance_number,
                    to_value(&insurance)?,
                )?;
                Ok(Vec::new())
            }
            "DeleteInsurance" => {
                let [id] = expect_args::<1>(name, args)?;
                self.store.delete(sim, EntityKind::Insurance, id)?;
                Ok(Vec::new())
            }
            "GetAllInsurances" => self.encode_list(sim, EntityKind::Insurance),

            // -- Claim ------------------------------------------------------
            "CreateClaim" => {
                let [claim_id, treatment_id, patient_id, aadhar, insurance_no] =
                    expect_args::<5>(name, args)?;
                self.create_claim(sim, claim_id, treatment_id, patient_id, aadhar, insurance_no)?;
                Ok(Vec::new())
            }
            "ReadClaim" => {
                let [id] = expect_args::<1>(name, args)?;
                self.store.read(sim, EntityKind::Claim, id)
            }
            "UpdateClaimStatus" => {
                let [id, status] = expect_args::<2>(name, args)?;
                self.update_claim_status(sim, id, status)?;
                Ok(Vec::new())
            }
            "DeleteClaim" => {
                let [id] = expect_args::<1>(name, args)?;
                self.store.delete(sim, EntityKind::Claim, id)?;
                Ok(Vec::new())
            }
            "GetAllClaims" => self.encode_list(sim, EntityKind::Claim),

            other => Err(ContractError::UnknownTransaction(other.to_string())),
        }
    }

    /// New claims are always Pending, and both referenced entities must
    /// have existence markers — the reference check is a store
    /// precondition, not caller courtesy.
    fn create_claim(
        &self,
        sim: &mut TxSimulator<'_>,
        claim_id: &str,
        treatment_id: &str,
        patient_id: &str,
        aadhar: &str,
        insurance_no: &str,
    ) -> ContractResult<()> {
        if !self.store.exists(sim, EntityKind::Treatment, treatment_id)? {
            return Err(ContractError::MissingReference {
                kind: EntityKind::Treatment,
                id: treatment_id.to_string(),
            });
        }
        if !self.store.exists(sim, EntityKind::Patient, patient_id)? {
            return Err(ContractError::MissingReference {
                kind: EntityKind::Patient,
                id: patient_id.to_string(),
            });
        }
        let claim = Claim {
            claim_id: claim_id.to_string(),
            treatment_id: treatment_id.to_string(),
            patient_id: patient_id.to_string(),
            aadhar_number: aadhar.to_string(),
            insurance_number: insurance_no.to_string(),
            status: ClaimStatus::Pending,
        };
        self.store
            .create(sim, EntityKind::Claim, claim_id, to_value(&claim)?)
    }

    /// Read-modify-write of the status field alone. The in-simulation
    /// read guards the transition: of two racing transitions from the
    /// same snapshot exactly one commits, the other conflicts.
    fn update_claim_status(
        &self,
        sim: &mut TxSimulator<'_>,
        claim_id: &str,
        new_status: &str,
    ) -> ContractResult<()> {
        let new_status: ClaimStatus = new_status
            .parse()
            .map_err(|e: mcl_types::TypeError| ContractError::Validation(e.to_string()))?;
        let bytes = self.store.read(sim, EntityKind::Claim, claim_id)?;
        let mut claim: Claim = serde_json::from_slice(&bytes)
            .map_err(|e| ContractError::CorruptRecord(e.to_string()))?;
        claim.status =
            claim
                .status
                .transition_to(new_status)
                .map_err(|_| ContractError::InvalidTransition {
                    from: claim.status.to_string(),
                    to: new_status.to_string(),
                })?;
        self.store
            .update(sim, EntityKind::Claim, claim_id, to_value(&claim)?)
    }

    fn encode_list(
        &self,
        sim: &mut TxSimulator<'_>,
        kind: EntityKind,
    ) -> ContractResult<Vec<u8>> {
        let records = self.store.list_all(sim, kind)?;
        serde_json::to_vec(&records).map_err(|e| ContractError::CorruptRecord(e.to_string()))
    }
}

fn encode_exists(present: bool) -> Vec<u8> {
    if present { YES.to_vec() } else { NO.to_vec() }
}

fn to_value<T: serde::Serialize>(record: &T) -> ContractResult<Value> {
    serde_json::to_value(record).map_err(|e| ContractError::CorruptRecord(e.to_string()))
}

fn expect_args<'a, const N: usize>(
    name: &str,
    args: &'a [String],
) -> ContractResult<[&'a str; N]> {
    if args.len() != N {
        return Err(ContractError::Validation(format!(
            "{name} expects {N} argument(s), got {}",
            args.len()
        )));
    }
    let mut out = [""; N];
    for (slot, arg) in out.iter_mut().zip(args) {
        *slot = arg.as_str();
    }
    Ok(out)
}

fn parse_u32(field: &str, raw: &str) -> ContractResult<u32> {
    raw.parse()
        .map_err(|_| ContractError::Validation(format!("{field} must be a whole number: {raw}")))
}

fn parse_f64(field: &str, raw: &str) -> ContractResult<f64> {
    raw.parse()
        .map_err(|_| ContractError::Validation(format!("{field} must be a number: {raw}")))
}

fn parse_patient(args: &[String]) -> ContractResult<Patient> {
    let [patient_id, name, age, gender, blood_type, height, weight, address, dob, aadhar, insurance_no, phone, email, smoker] =
        expect_args::<14>("patient transaction", args)?;
    Ok(Patient {
        patient_id: patient_id.to_string(),
        name: name.to_string(),
        age: parse_u32("age", age)?,
        gender: gender.to_string(),
        blood_type: blood_type.to_string(),
        height: parse_u32("height", height)?,
        weight: parse_u32("weight", weight)?,
        address: address.to_string(),
        dob: dob.to_string(),
        aadhar_number: aadhar.to_string(),
        insurance_number: insurance_no.to_string(),
        phone_number: phone.to_string(),
        email_id: email.to_string(),
        smoker_status: smoker.to_string(),
    })
}

fn parse_treatment(args: &[String]) -> ContractResult<Treatment> {
    let [treatment_id, medical_condition, hospital_name, room_number, admission_type, medication, patient_id, admission_date, release_date, billing_amount, doctor_name] =
        expect_args::<11>("treatment transaction", args)?;
    Ok(Treatment {
        treatment_id: treatment_id.to_string(),
        medical_condition: medical_condition.to_string(),
        hospital_name: hospital_name.to_string(),
        room_number: room_number.to_string(),
        admission_type: admission_type.to_string(),
        medication: medication.to_string(),
        patient_id: patient_id.to_string(),
        admission_date: admission_date.to_string(),
        release_date: release_date.to_string(),
        billing_amount: parse_f64("billingAmount", billing_amount)?,
        doctor_name: doctor_name.to_string(),
    })
}

fn parse_insurance(args: &[String]) -> ContractResult<Insurance> {
    let [insurance_no, name, aadhar, start_date, end_date, age, claim_limit, already_claimed] =
        expect_args::<8>("insurance transaction", args)?;
    Ok(Insurance {
        insurance_number: insurance_no.to_string(),
        name: name.to_string(),
        aadhar_number: aadhar.to_string(),
        start_date: start_date.to_string(),
        end_date: end_date.to_string(),
        age: parse_u32("age", age)?,
        claim_limit: parse_f64("claimLimit", claim_limit)?,
        already_claimed: parse_f64("alreadyClaimed", already_claimed)?,
    })
}
