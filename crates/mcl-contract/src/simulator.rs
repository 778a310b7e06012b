use mcl_state::{PeerState, ReadWriteSet};

use crate::error::ContractResult;

/// Transaction simulation context over one peer's committed state.
///
/// Every read goes through here so its observed version lands in the
/// read-set; every write is staged, never applied. Staged writes are
/// visible to later reads in the same simulation (read-your-writes),
/// and such reads add no read-set entry — the transaction cannot
/// conflict with itself.
pub struct TxSimulator<'a> {
    state: &'a PeerState,
    rwset: ReadWriteSet,
}

impl<'a> TxSimulator<'a> {
    pub fn new(state: &'a PeerState) -> Self {
        Self {
            state,
            rwset: ReadWriteSet::new(),
        }
    }

    pub fn state(&self) -> &PeerState {
        self.state
    }

    /// Read a value, staged writes first, committed state second.
    pub fn get(&mut self, collection: &str, key: &str) -> ContractResult<Option<Vec<u8>>> {
        if let Some(staged) = self.rwset.staged_value(collection, key) {
            return Ok(staged.value.clone());
        }
        let committed = self.state.read(collection, key)?;
        let (value, version) = match committed {
            Some((value, version)) => (Some(value), Some(version)),
            None => (None, None),
        };
        self.rwset.record_read(collection, key, version);
        Ok(value)
    }

    /// Stage a write.
    pub fn put(&mut self, collection: &str, key: &str, value: impl Into<Vec<u8>>) {
        self.rwset.record_write(collection, key, value);
    }

    /// Stage a delete.
    pub fn delete(&mut self, collection: &str, key: &str) {
        self.rwset.record_delete(collection, key);
    }

    /// Committed key/value pairs of a whole collection, in key order.
    /// Each returned key's version is recorded as read.
    pub fn scan(&mut self, collection: &str) -> ContractResult<Vec<(String, Vec<u8>)>> {
        let entries = self.state.scan(collection)?;
        for (key, _) in &entries {
            let version = self.state.read(collection, key)?.map(|(_, v)| v);
            self.rwset.record_read(collection, key.clone(), version);
        }
        Ok(entries)
    }

    /// Finish the simulation and hand back the effect record.
    pub fn into_rwset(self) -> ReadWriteSet {
        self.rwset
    }
}
