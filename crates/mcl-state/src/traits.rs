use crate::error::StateResult;
use crate::peer::TxValidation;
use crate::rwset::ReadWriteSet;
use crate::version::Version;

/// Versioned collection key-value storage backing one peer.
///
/// All implementations must satisfy these invariants:
/// - A store holds a fixed set of collections, decided at construction;
///   reads of any other collection are errors, never empty results.
/// - Every committed value carries the `{block, tx}` version of the
///   write that produced it.
/// - `apply_block` is atomic per transaction: a transaction's writes
///   are all visible or none are, and no reader observes a half-applied
///   transaction.
/// - Writes naming a collection the store does not hold are dropped,
///   not errors — partitioning is enforced here.
pub trait CollectionStore: Send + Sync {
    /// Read a committed value and its version. `Ok(None)` means the
    /// key is absent.
    fn read(&self, collection: &str, key: &str) -> StateResult<Option<(Vec<u8>, Version)>>;

    /// All committed key/value pairs of a collection, in key order.
    fn scan(&self, collection: &str) -> StateResult<Vec<(String, Vec<u8>)>>;

    /// Validate each transaction's reads against current versions and
    /// apply the write-sets of the valid ones, in order.
    fn apply_block(&self, block: u64, txs: &[(String, ReadWriteSet)]) -> Vec<TxValidation>;

    /// Last committed block number.
    fn height(&self) -> u64;
}
