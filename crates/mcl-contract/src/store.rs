use serde_json::Value;
use tracing::debug;

use mcl_partition::PartitionMap;
use mcl_types::{ClaimStatus, EntityKind, ExistenceMarker};

use crate::error::{ContractError, ContractResult};
use crate::simulator::TxSimulator;

/// Kind-routed record operations over the partitioned collections.
///
/// Detail records are stored under a kind-namespaced key
/// (`<Kind>:<id>`) so that kinds sharing a detail collection keep
/// disjoint key spaces and full-kind scans are well defined. Existence
/// markers are stored under the raw ID — the marker key *is* the
/// cross-org discoverable handle.
pub struct LedgerStore {
    partition: PartitionMap,
}

impl LedgerStore {
    pub fn new(partition: PartitionMap) -> Self {
        Self { partition }
    }

    pub fn partition(&self) -> &PartitionMap {
        &self.partition
    }

    fn detail_key(kind: EntityKind, id: &str) -> String {
        format!("{}:{}", kind.as_str(), id)
    }

    /// Create a detail record; patients and treatments also get a
    /// `{kind, id}` marker in the broad index, staged in the same
    /// write-set so both commit together or not at all.
    pub fn create(
        &self,
        sim: &mut TxSimulator<'_>,
        kind: EntityKind,
        id: &str,
        payload: Value,
    ) -> ContractResult<()> {
        let payload = validate_payload(kind, id, payload)?;
        let collection = &self.partition.detail_collection(kind).name;
        let bytes = serde_json::to_vec(&payload)
            .map_err(|e| ContractError::CorruptRecord(e.to_string()))?;
        sim.put(collection, &Self::detail_key(kind, id), bytes);

        if kind.is_indexed() {
            let index = self
                .partition
                .index_collection(kind)
                .map_err(|e| ContractError::Validation(e.to_string()))?;
            let marker = ExistenceMarker::new(kind, id);
            let marker_bytes = serde_json::to_vec(&marker)
                .map_err(|e| ContractError::CorruptRecord(e.to_string()))?;
            sim.put(&index.name, id, marker_bytes);
        }

        debug!(%kind, id, "record created");
        Ok(())
    }

    /// Read the detail record. Absent keys and zero-length values are
    /// both `NotFound` — callers cannot tell them apart.
    pub fn read(
        &self,
        sim: &mut TxSimulator<'_>,
        kind: EntityKind,
        id: &str,
    ) -> ContractResult<Vec<u8>> {
        require_id(id)?;
        let collection = &self.partition.detail_collection(kind).name;
        match sim.get(collection, &Self::detail_key(kind, id))? {
            Some(bytes) if !bytes.is_empty() => Ok(bytes),
            _ => Err(ContractError::NotFound {
                kind,
                id: id.to_string(),
            }),
        }
    }

    /// Whether the broad index holds a marker for this kind and ID.
    /// Never touches the detail collection.
    pub fn exists(
        &self,
        sim: &mut TxSimulator<'_>,
        kind: EntityKind,
        id: &str,
    ) -> ContractResult<bool> {
        require_id(id)?;
        let index = self
            .partition
            .index_collection(kind)
            .map_err(|e| ContractError::Validation(e.to_string()))?;
        match sim.get(&index.name, id)? {
            Some(bytes) if !bytes.is_empty() => {
                let marker: ExistenceMarker = serde_json::from_slice(&bytes)
                    .map_err(|e| ContractError::CorruptRecord(e.to_string()))?;
                Ok(marker.kind == kind)
            }
            _ => Ok(false),
        }
    }

    /// Whole-record overwrite, only if the record exists. The
    /// in-simulation read is the optimistic-concurrency guard: a
    /// concurrent overwrite invalidates this transaction at commit.
    pub fn update(
        &self,
        sim: &mut TxSimulator<'_>,
        kind: EntityKind,
        id: &str,
        payload: Value,
    ) -> ContractResult<()> {
        let payload = validate_payload(kind, id, payload)?;
        self.read(sim, kind, id)?;
        let collection = &self.partition.detail_collection(kind).name;
        let bytes = serde_json::to_vec(&payload)
            .map_err(|e| ContractError::CorruptRecord(e.to_string()))?;
        sim.put(collection, &Self::detail_key(kind, id), bytes);
        debug!(%kind, id, "record updated");
        Ok(())
    }

    /// Remove the detail record. The existence marker is retained as a
    /// permanent record that the ID once existed.
    pub fn delete(
        &self,
        sim: &mut TxSimulator<'_>,
        kind: EntityKind,
        id: &str,
    ) -> ContractResult<()> {
        self.read(sim, kind, id)?;
        let collection = &self.partition.detail_collection(kind).name;
        sim.delete(collection, &Self::detail_key(kind, id));
        debug!(%kind, id, "record deleted, marker retained");
        Ok(())
    }

    /// Every committed detail record of a kind, as parsed JSON values.
    pub fn list_all(
        &self,
        sim: &mut TxSimulator<'_>,
        kind: EntityKind,
    ) -> ContractResult<Vec<Value>> {
        let collection = &self.partition.detail_collection(kind).name;
        let prefix = format!("{}:", kind.as_str());
        let mut records = Vec::new();
        for (key, bytes) in sim.scan(collection)? {
            if !key.starts_with(&prefix) || bytes.is_empty() {
                continue;
            }
            let value: Value = serde_json::from_slice(&bytes)
                .map_err(|e| ContractError::CorruptRecord(e.to_string()))?;
            records.push(value);
        }
        Ok(records)
    }
}

fn require_id(id: &str) -> ContractResult<()> {
    if id.trim().is_empty() {
        return Err(ContractError::Validation("record ID must not be empty".into()));
    }
    Ok(())
}

/// Reject malformed input before any state access, then inject the
/// ledger key into the payload under the kind's key field.
fn validate_payload(kind: EntityKind, id: &str, mut payload: Value) -> ContractResult<Value> {
    require_id(id)?;
    let Some(object) = payload.as_object_mut() else {
        return Err(ContractError::Validation(format!(
            "{kind} payload must be a JSON object"
        )));
    };
    object.insert(kind.key_field().to_string(), Value::String(id.to_string()));
    if object.len() <= 1 {
        return Err(ContractError::Validation(format!(
            "{kind} payload must not be empty"
        )));
    }
    if kind == EntityKind::Claim {
        let status = object
            .get("status")
            .and_then(Value::as_str)
            .ok_or_else(|| ContractError::Validation("claim payload missing status".into()))?;
        status
            .parse::<ClaimStatus>()
            .map_err(|e| ContractError::Validation(e.to_string()))?;
    }
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcl_state::PeerState;
    use mcl_types::Org;
    use serde_json::json;

    fn peer(org: Org) -> PeerState {
        PeerState::new(org, PartitionMap::default())
    }

    /// Run a store closure as one transaction and commit it.
    fn commit<F>(state: &PeerState, block: u64, f: F) -> ContractResult<()>
    where
        F: FnOnce(&LedgerStore, &mut TxSimulator<'_>) -> ContractResult<()>,
    {
        let store = LedgerStore::new(PartitionMap::default());
        let mut sim = TxSimulator::new(state);
        f(&store, &mut sim)?;
        let verdicts = state.apply_block(block, &[("tx".to_string(), sim.into_rwset())]);
        assert!(verdicts[0].outcome.is_valid());
        Ok(())
    }

    fn patient_payload() -> Value {
        json!({
            "name": "John Doe",
            "age": 30,
            "bloodType": "O+",
            "aadharNumber": "123456789012",
        })
    }

    #[test]
    fn create_then_read_round_trips_with_key_injected() {
        let state = peer(Org::Org1);
        commit(&state, 1, |store, sim| {
            store.create(sim, EntityKind::Patient, "P1", patient_payload())
        })
        .unwrap();

        let store = LedgerStore::new(PartitionMap::default());
        let mut sim = TxSimulator::new(&state);
        let bytes = store.read(&mut sim, EntityKind::Patient, "P1").unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(value["patientID"], "P1");
        assert_eq!(value["name"], "John Doe");
    }

    #[test]
    fn create_stages_detail_and_marker_in_one_write_set() {
        let state = peer(Org::Org1);
        let store = LedgerStore::new(PartitionMap::default());
        let mut sim = TxSimulator::new(&state);
        store
            .create(&mut sim, EntityKind::Treatment, "T1", json!({"medication": "x"}))
            .unwrap();
        let rwset = sim.into_rwset();
        assert_eq!(rwset.writes.len(), 2);
        let collections: Vec<_> = rwset.writes.iter().map(|w| w.collection.as_str()).collect();
        assert!(collections.contains(&mcl_partition::names::ORG1_ORG2_DETAIL));
        assert!(collections.contains(&mcl_partition::names::BROAD_ID_INDEX));
    }

    #[test]
    fn insurance_create_never_touches_the_index() {
        let state = peer(Org::Org2);
        let store = LedgerStore::new(PartitionMap::default());
        let mut sim = TxSimulator::new(&state);
        store
            .create(&mut sim, EntityKind::Insurance, "INS1", json!({"name": "Jane"}))
            .unwrap();
        let rwset = sim.into_rwset();
        assert_eq!(rwset.writes.len(), 1);
        assert_eq!(
            rwset.writes[0].collection,
            mcl_partition::names::ORG2_DETAIL
        );
    }

    #[test]
    fn exists_checks_marker_kind() {
        let state = peer(Org::Org1);
        commit(&state, 1, |store, sim| {
            store.create(sim, EntityKind::Patient, "P1", patient_payload())
        })
        .unwrap();

        let store = LedgerStore::new(PartitionMap::default());
        let mut sim = TxSimulator::new(&state);
        assert!(store.exists(&mut sim, EntityKind::Patient, "P1").unwrap());
        // Same ID, different kind: the marker records the kind.
        assert!(!store.exists(&mut sim, EntityKind::Treatment, "P1").unwrap());
        assert!(!store.exists(&mut sim, EntityKind::Patient, "P2").unwrap());
    }

    #[test]
    fn exists_refuses_unindexed_kinds() {
        let state = peer(Org::Org2);
        let store = LedgerStore::new(PartitionMap::default());
        let mut sim = TxSimulator::new(&state);
        let err = store
            .exists(&mut sim, EntityKind::Insurance, "INS1")
            .unwrap_err();
        assert_eq!(err.code(), "VALIDATION");
    }

    #[test]
    fn read_of_missing_record_is_not_found() {
        let state = peer(Org::Org1);
        let store = LedgerStore::new(PartitionMap::default());
        let mut sim = TxSimulator::new(&state);
        let err = store.read(&mut sim, EntityKind::Patient, "ghost").unwrap_err();
        assert!(matches!(err, ContractError::NotFound { .. }));
    }

    #[test]
    fn zero_length_value_reads_as_not_found() {
        let state = peer(Org::Org1);
        let mut raw = mcl_state::ReadWriteSet::new();
        raw.record_write(mcl_partition::names::ORG1_ORG2_DETAIL, "Patient:P1", Vec::new());
        state.apply_block(1, &[("tx".to_string(), raw)]);

        let store = LedgerStore::new(PartitionMap::default());
        let mut sim = TxSimulator::new(&state);
        let err = store.read(&mut sim, EntityKind::Patient, "P1").unwrap_err();
        assert!(matches!(err, ContractError::NotFound { .. }));
    }

    #[test]
    fn update_requires_existence() {
        let state = peer(Org::Org1);
        let store = LedgerStore::new(PartitionMap::default());
        let mut sim = TxSimulator::new(&state);
        let err = store
            .update(&mut sim, EntityKind::Patient, "ghost", patient_payload())
            .unwrap_err();
        assert!(matches!(err, ContractError::NotFound { .. }));
    }

    #[test]
    fn delete_removes_detail_but_keeps_marker() {
        let state = peer(Org::Org1);
        commit(&state, 1, |store, sim| {
            store.create(sim, EntityKind::Patient, "P1", patient_payload())
        })
        .unwrap();
        commit(&state, 2, |store, sim| {
            store.delete(sim, EntityKind::Patient, "P1")
        })
        .unwrap();

        let store = LedgerStore::new(PartitionMap::default());
        let mut sim = TxSimulator::new(&state);
        assert!(matches!(
            store.read(&mut sim, EntityKind::Patient, "P1"),
            Err(ContractError::NotFound { .. })
        ));
        assert!(store.exists(&mut sim, EntityKind::Patient, "P1").unwrap());
    }

    #[test]
    fn list_all_filters_by_kind_within_shared_collection() {
        let state = peer(Org::Org1);
        commit(&state, 1, |store, sim| {
            store.create(sim, EntityKind::Patient, "P1", patient_payload())?;
            store.create(sim, EntityKind::Treatment, "T1", json!({"medication": "x"}))
        })
        .unwrap();

        let store = LedgerStore::new(PartitionMap::default());
        let mut sim = TxSimulator::new(&state);
        let patients = store.list_all(&mut sim, EntityKind::Patient).unwrap();
        assert_eq!(patients.len(), 1);
        assert_eq!(patients[0]["patientID"], "P1");
        let treatments = store.list_all(&mut sim, EntityKind::Treatment).unwrap();
        assert_eq!(treatments.len(), 1);
    }

    #[test]
    fn empty_id_and_non_object_payloads_are_rejected() {
        let state = peer(Org::Org1);
        let store = LedgerStore::new(PartitionMap::default());
        let mut sim = TxSimulator::new(&state);
        assert!(matches!(
            store.create(&mut sim, EntityKind::Patient, "  ", patient_payload()),
            Err(ContractError::Validation(_))
        ));
        assert!(matches!(
            store.create(&mut sim, EntityKind::Patient, "P1", json!("not an object")),
            Err(ContractError::Validation(_))
        ));
        assert!(matches!(
            store.create(&mut sim, EntityKind::Patient, "P1", json!({})),
            Err(ContractError::Validation(_))
        ));
        // Nothing was staged by the rejected calls.
        assert!(sim.into_rwset().is_empty());
    }

    #[test]
    fn claim_payload_requires_valid_status() {
        let state = peer(Org::Org3);
        let store = LedgerStore::new(PartitionMap::default());
        let mut sim = TxSimulator::new(&state);
        let err = store
            .create(
                &mut sim,
                EntityKind::Claim,
                "C1",
                json!({"patientID": "P1", "status": "Maybe"}),
            )
            .unwrap_err();
        assert!(matches!(err, ContractError::Validation(_)));
    }
}
