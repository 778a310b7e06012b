use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use mcl_types::{EntityKind, Org};

use crate::error::{PartitionError, PartitionResult};
use crate::names;

/// A named storage partition and the orgs entitled to read its plaintext.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionSpec {
    pub name: String,
    pub members: BTreeSet<Org>,
}

impl CollectionSpec {
    pub fn new(name: impl Into<String>, members: impl IntoIterator<Item = Org>) -> Self {
        Self {
            name: name.into(),
            members: members.into_iter().collect(),
        }
    }

    /// Whether the given org may store and read this collection's payloads.
    pub fn is_member(&self, org: Org) -> bool {
        self.members.contains(&org)
    }
}

/// The fixed entity-kind → collection mapping.
///
/// Looked up, never computed. The `Default` instance is the production
/// topology; a different one can be deserialized from configuration for
/// tests or alternative networks.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PartitionMap {
    patient_detail: CollectionSpec,
    treatment_detail: CollectionSpec,
    insurance_detail: CollectionSpec,
    claim_detail: CollectionSpec,
    id_index: CollectionSpec,
}

impl Default for PartitionMap {
    fn default() -> Self {
        Self {
            patient_detail: CollectionSpec::new(names::ORG1_ORG2_DETAIL, [Org::Org1, Org::Org2]),
            treatment_detail: CollectionSpec::new(names::ORG1_ORG2_DETAIL, [Org::Org1, Org::Org2]),
            insurance_detail: CollectionSpec::new(names::ORG2_DETAIL, [Org::Org2]),
            claim_detail: CollectionSpec::new(
                names::ORG1_ORG2_ORG3_DETAIL,
                [Org::Org1, Org::Org2, Org::Org3],
            ),
            id_index: CollectionSpec::new(
                names::BROAD_ID_INDEX,
                [Org::Org1, Org::Org2, Org::Org3],
            ),
        }
    }
}

impl PartitionMap {
    /// The detail collection holding the full payload for a kind.
    pub fn detail_collection(&self, kind: EntityKind) -> &CollectionSpec {
        match kind {
            EntityKind::Patient => &self.patient_detail,
            EntityKind::Treatment => &self.treatment_detail,
            EntityKind::Insurance => &self.insurance_detail,
            EntityKind::Claim => &self.claim_detail,
        }
    }

    /// The broad existence-index collection for a kind, if it has one.
    pub fn index_collection(&self, kind: EntityKind) -> PartitionResult<&CollectionSpec> {
        if kind.is_indexed() {
            Ok(&self.id_index)
        } else {
            Err(PartitionError::NotIndexed(kind))
        }
    }

    /// The existence-index collection itself.
    pub fn id_index(&self) -> &CollectionSpec {
        &self.id_index
    }

    /// Look up any collection by name.
    pub fn spec_for(&self, name: &str) -> PartitionResult<&CollectionSpec> {
        self.all()
            .into_iter()
            .find(|spec| spec.name == name)
            .ok_or_else(|| PartitionError::UnknownCollection(name.to_string()))
    }

    /// Whether an org may read the named collection's plaintext.
    pub fn is_visible(&self, name: &str, org: Org) -> PartitionResult<bool> {
        Ok(self.spec_for(name)?.is_member(org))
    }

    /// Every collection an org's peer stores.
    pub fn visible_to(&self, org: Org) -> Vec<&CollectionSpec> {
        let mut seen = BTreeSet::new();
        self.all()
            .into_iter()
            .filter(|spec| spec.is_member(org) && seen.insert(spec.name.clone()))
            .collect()
    }

    fn all(&self) -> Vec<&CollectionSpec> {
        vec![
            &self.patient_detail,
            &self.treatment_detail,
            &self.insurance_detail,
            &self.claim_detail,
            &self.id_index,
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_routing_matches_visibility_table() {
        let map = PartitionMap::default();
        assert_eq!(
            map.detail_collection(EntityKind::Patient).name,
            names::ORG1_ORG2_DETAIL
        );
        assert_eq!(
            map.detail_collection(EntityKind::Insurance).name,
            names::ORG2_DETAIL
        );
        assert_eq!(
            map.detail_collection(EntityKind::Claim).name,
            names::ORG1_ORG2_ORG3_DETAIL
        );
    }

    #[test]
    fn org3_sees_markers_and_claims_but_no_details() {
        let map = PartitionMap::default();
        assert!(!map.detail_collection(EntityKind::Patient).is_member(Org::Org3));
        assert!(!map.detail_collection(EntityKind::Insurance).is_member(Org::Org3));
        assert!(map.detail_collection(EntityKind::Claim).is_member(Org::Org3));
        assert!(map.id_index().is_member(Org::Org3));
    }

    #[test]
    fn insurance_has_no_index_collection() {
        let map = PartitionMap::default();
        assert_eq!(
            map.index_collection(EntityKind::Insurance).unwrap_err(),
            PartitionError::NotIndexed(EntityKind::Insurance)
        );
        assert!(map.index_collection(EntityKind::Treatment).is_ok());
    }

    #[test]
    fn only_org2_sees_insurance() {
        let map = PartitionMap::default();
        let spec = map.detail_collection(EntityKind::Insurance);
        assert!(spec.is_member(Org::Org2));
        assert!(!spec.is_member(Org::Org1));
        assert!(!spec.is_member(Org::Org3));
    }

    #[test]
    fn unknown_collection_is_an_error() {
        let map = PartitionMap::default();
        assert!(matches!(
            map.spec_for("NoSuchCollection"),
            Err(PartitionError::UnknownCollection(_))
        ));
    }

    #[test]
    fn visible_to_deduplicates_shared_detail_collection() {
        let map = PartitionMap::default();
        let visible: Vec<_> = map.visible_to(Org::Org1).iter().map(|s| s.name.clone()).collect();
        // Patient and treatment share one detail collection.
        assert_eq!(
            visible,
            vec![
                names::ORG1_ORG2_DETAIL.to_string(),
                names::ORG1_ORG2_ORG3_DETAIL.to_string(),
                names::BROAD_ID_INDEX.to_string(),
            ]
        );
    }
}
