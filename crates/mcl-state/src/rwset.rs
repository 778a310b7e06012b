use serde::{Deserialize, Serialize};

use crate::version::Version;

/// A key read during simulation, with the version that was observed
/// (`None` when the key was absent).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyRead {
    pub collection: String,
    pub key: String,
    pub version: Option<Version>,
}

/// A key write produced by simulation. `value: None` is a delete.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyWrite {
    pub collection: String,
    pub key: String,
    pub value: Option<Vec<u8>>,
}

/// The full effect record of one simulated transaction.
///
/// Reads are validated at commit; writes apply atomically if every read
/// is still current. Entries keep insertion order — simulation is
/// deterministic, so identical simulations produce identical sets.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadWriteSet {
    pub reads: Vec<KeyRead>,
    pub writes: Vec<KeyWrite>,
}

impl ReadWriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_read(
        &mut self,
        collection: impl Into<String>,
        key: impl Into<String>,
        version: Option<Version>,
    ) {
        self.reads.push(KeyRead {
            collection: collection.into(),
            key: key.into(),
            version,
        });
    }

    pub fn record_write(
        &mut self,
        collection: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<Vec<u8>>,
    ) {
        self.writes.push(KeyWrite {
            collection: collection.into(),
            key: key.into(),
            value: Some(value.into()),
        });
    }

    pub fn record_delete(&mut self, collection: impl Into<String>, key: impl Into<String>) {
        self.writes.push(KeyWrite {
            collection: collection.into(),
            key: key.into(),
            value: None,
        });
    }

    pub fn is_empty(&self) -> bool {
        self.reads.is_empty() && self.writes.is_empty()
    }

    pub fn has_writes(&self) -> bool {
        !self.writes.is_empty()
    }

    /// The latest staged write for a key, if any. Simulation reads its
    /// own writes back through this.
    pub fn staged_value(&self, collection: &str, key: &str) -> Option<&KeyWrite> {
        self.writes
            .iter()
            .rev()
            .find(|w| w.collection == collection && w.key == key)
    }

    /// Names of every collection this set touches, deduplicated.
    pub fn touched_collections(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .reads
            .iter()
            .map(|r| r.collection.as_str())
            .chain(self.writes.iter().map(|w| w.collection.as_str()))
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn touched_collections_deduplicates() {
        let mut set = ReadWriteSet::new();
        set.record_read("A", "k1", None);
        set.record_write("A", "k1", b"v".to_vec());
        set.record_write("B", "k2", b"v".to_vec());
        assert_eq!(set.touched_collections(), vec!["A", "B"]);
    }

    #[test]
    fn staged_value_returns_latest_write() {
        let mut set = ReadWriteSet::new();
        set.record_write("A", "k", b"first".to_vec());
        set.record_delete("A", "k");
        let staged = set.staged_value("A", "k").unwrap();
        assert!(staged.value.is_none());
        assert!(set.staged_value("A", "other").is_none());
    }

    #[test]
    fn empty_set_reports_no_writes() {
        let set = ReadWriteSet::new();
        assert!(set.is_empty());
        assert!(!set.has_writes());
    }
}
