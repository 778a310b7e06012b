use mcl_partition::PartitionMap;
use mcl_types::Org;

use crate::error::StateResult;
use crate::memory::InMemoryCollectionStore;
use crate::rwset::ReadWriteSet;
use crate::traits::CollectionStore;
use crate::version::Version;

/// Commit verdict for one transaction in a block.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TxOutcome {
    Valid,
    /// A read was stale at commit time; the write-set was discarded.
    Conflict { reason: String },
}

impl TxOutcome {
    pub fn is_valid(&self) -> bool {
        matches!(self, TxOutcome::Valid)
    }
}

/// One transaction's verdict, paired with its ID for event routing.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TxValidation {
    pub tx_id: String,
    pub outcome: TxOutcome,
}

/// The committed world state held by one org's peer.
///
/// The backing store holds exactly the collections the org is a member
/// of — a peer physically cannot serve a payload it is not entitled
/// to. Writes to other collections pass through commit untouched and
/// unstored.
pub struct PeerState {
    org: Org,
    partition: PartitionMap,
    store: InMemoryCollectionStore,
}

impl PeerState {
    pub fn new(org: Org, partition: PartitionMap) -> Self {
        let store = InMemoryCollectionStore::new(
            partition
                .visible_to(org)
                .into_iter()
                .map(|spec| spec.name.clone()),
        );
        Self {
            org,
            partition,
            store,
        }
    }

    pub fn org(&self) -> Org {
        self.org
    }

    pub fn partition(&self) -> &PartitionMap {
        &self.partition
    }

    /// Last committed block number.
    pub fn height(&self) -> u64 {
        self.store.height()
    }

    /// Read a committed value and its version. `Ok(None)` means the key
    /// is absent; reading a collection this peer does not store is an
    /// error, never an empty result.
    pub fn read(&self, collection: &str, key: &str) -> StateResult<Option<(Vec<u8>, Version)>> {
        self.store.read(collection, key)
    }

    /// All committed key/value pairs of a collection, in key order.
    pub fn scan(&self, collection: &str) -> StateResult<Vec<(String, Vec<u8>)>> {
        self.store.scan(collection)
    }

    /// Validate and apply one ordered block.
    ///
    /// Transactions are processed in order; each validates its reads
    /// against the state left by its predecessors (committed blocks plus
    /// earlier valid transactions in this block). A stale read marks the
    /// transaction `Conflict` and discards its whole write-set.
    pub fn apply_block(&self, block: u64, txs: &[(String, ReadWriteSet)]) -> Vec<TxValidation> {
        self.store.apply_block(block, txs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StateError;
    use mcl_partition::names;

    fn tx(id: &str, rwset: ReadWriteSet) -> (String, ReadWriteSet) {
        (id.to_string(), rwset)
    }

    fn write_set(collection: &str, key: &str, value: &[u8]) -> ReadWriteSet {
        let mut set = ReadWriteSet::new();
        set.record_write(collection, key, value.to_vec());
        set
    }

    #[test]
    fn peer_stores_only_member_collections() {
        let org3 = PeerState::new(Org::Org3, PartitionMap::default());
        assert!(org3.read(names::ORG1_ORG2_ORG3_DETAIL, "k").is_ok());
        assert!(matches!(
            org3.read(names::ORG1_ORG2_DETAIL, "k"),
            Err(StateError::NotStored { .. })
        ));
    }

    #[test]
    fn writes_apply_atomically_with_versions() {
        let peer = PeerState::new(Org::Org1, PartitionMap::default());
        let mut set = ReadWriteSet::new();
        set.record_write(names::ORG1_ORG2_DETAIL, "PATIENT1", b"payload".to_vec());
        set.record_write(names::BROAD_ID_INDEX, "PATIENT1", b"marker".to_vec());

        let verdicts = peer.apply_block(1, &[tx("tx1", set)]);
        assert!(verdicts[0].outcome.is_valid());

        let (value, version) = peer.read(names::ORG1_ORG2_DETAIL, "PATIENT1").unwrap().unwrap();
        assert_eq!(value, b"payload");
        assert_eq!(version, Version::new(1, 0));
        assert!(peer.read(names::BROAD_ID_INDEX, "PATIENT1").unwrap().is_some());
        assert_eq!(peer.height(), 1);
    }

    #[test]
    fn non_member_writes_are_dropped_at_commit() {
        let org3 = PeerState::new(Org::Org3, PartitionMap::default());
        let mut set = ReadWriteSet::new();
        set.record_write(names::ORG1_ORG2_DETAIL, "PATIENT1", b"payload".to_vec());
        set.record_write(names::BROAD_ID_INDEX, "PATIENT1", b"marker".to_vec());

        let verdicts = org3.apply_block(1, &[tx("tx1", set)]);
        assert!(verdicts[0].outcome.is_valid());

        // The marker landed; the detail payload was never stored.
        assert!(org3.read(names::BROAD_ID_INDEX, "PATIENT1").unwrap().is_some());
        assert!(matches!(
            org3.read(names::ORG1_ORG2_DETAIL, "PATIENT1"),
            Err(StateError::NotStored { .. })
        ));
    }

    #[test]
    fn stale_read_is_conflict_and_discards_writes() {
        let peer = PeerState::new(Org::Org2, PartitionMap::default());
        peer.apply_block(
            1,
            &[tx("setup", write_set(names::ORG1_ORG2_ORG3_DETAIL, "CLAIM1", b"v1"))],
        );

        // Both transactions read version 1:0, then write.
        let mut first = ReadWriteSet::new();
        first.record_read(names::ORG1_ORG2_ORG3_DETAIL, "CLAIM1", Some(Version::new(1, 0)));
        first.record_write(names::ORG1_ORG2_ORG3_DETAIL, "CLAIM1", b"approved".to_vec());

        let mut second = ReadWriteSet::new();
        second.record_read(names::ORG1_ORG2_ORG3_DETAIL, "CLAIM1", Some(Version::new(1, 0)));
        second.record_write(names::ORG1_ORG2_ORG3_DETAIL, "CLAIM1", b"rejected".to_vec());

        let verdicts = peer.apply_block(2, &[tx("txA", first), tx("txB", second)]);
        assert!(verdicts[0].outcome.is_valid());
        assert!(matches!(verdicts[1].outcome, TxOutcome::Conflict { .. }));

        let (value, _) = peer.read(names::ORG1_ORG2_ORG3_DETAIL, "CLAIM1").unwrap().unwrap();
        assert_eq!(value, b"approved");
    }

    #[test]
    fn read_of_absent_key_validates_against_absence() {
        let peer = PeerState::new(Org::Org1, PartitionMap::default());
        let mut set = ReadWriteSet::new();
        set.record_read(names::ORG1_ORG2_DETAIL, "P", None);
        set.record_write(names::ORG1_ORG2_DETAIL, "P", b"v".to_vec());

        // First create validates (key absent), second conflicts (key now
        // exists at a version).
        let verdicts = peer.apply_block(1, &[tx("a", set.clone()), tx("b", set)]);
        assert!(verdicts[0].outcome.is_valid());
        assert!(matches!(verdicts[1].outcome, TxOutcome::Conflict { .. }));
    }

    #[test]
    fn delete_removes_the_key() {
        let peer = PeerState::new(Org::Org1, PartitionMap::default());
        peer.apply_block(1, &[tx("a", write_set(names::ORG1_ORG2_DETAIL, "P", b"v"))]);

        let mut del = ReadWriteSet::new();
        del.record_delete(names::ORG1_ORG2_DETAIL, "P");
        peer.apply_block(2, &[tx("b", del)]);

        assert!(peer.read(names::ORG1_ORG2_DETAIL, "P").unwrap().is_none());
    }

    #[test]
    fn scan_returns_key_order() {
        let peer = PeerState::new(Org::Org2, PartitionMap::default());
        peer.apply_block(1, &[tx("a", write_set(names::ORG2_DETAIL, "INS2", b"b"))]);
        peer.apply_block(2, &[tx("b", write_set(names::ORG2_DETAIL, "INS1", b"a"))]);

        let keys: Vec<_> = peer
            .scan(names::ORG2_DETAIL)
            .unwrap()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert_eq!(keys, vec!["INS1".to_string(), "INS2".to_string()]);
    }
}
