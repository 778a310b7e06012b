use serde::{Deserialize, Serialize};

/// Commit-time position of a key's last write: the block that carried
/// it and the transaction's index within that block.
///
/// Two reads of the same key observed the same committed value iff
/// their versions are equal — this is the whole MVCC comparison.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Version {
    pub block: u64,
    pub tx: u64,
}

impl Version {
    pub fn new(block: u64, tx: u64) -> Self {
        Self { block, tx }
    }
}

impl std::fmt::Display for Version {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.block, self.tx)
    }
}
