use std::collections::{BTreeMap, HashMap};
use std::sync::RwLock;

use tracing::{debug, warn};

use crate::error::{StateError, StateResult};
use crate::peer::{TxOutcome, TxValidation};
use crate::rwset::ReadWriteSet;
use crate::traits::CollectionStore;
use crate::version::Version;

#[derive(Clone)]
struct VersionedValue {
    value: Vec<u8>,
    version: Version,
}

struct Inner {
    collections: HashMap<String, BTreeMap<String, VersionedValue>>,
    height: u64,
}

/// `HashMap`-backed collection store for tests, demos, and the
/// in-process network.
///
/// Validation and application run under one write lock, so a torn
/// transaction is never observable.
pub struct InMemoryCollectionStore {
    inner: RwLock<Inner>,
}

impl InMemoryCollectionStore {
    /// A store holding exactly the named collections.
    pub fn new(collections: impl IntoIterator<Item = String>) -> Self {
        Self {
            inner: RwLock::new(Inner {
                collections: collections
                    .into_iter()
                    .map(|name| (name, BTreeMap::new()))
                    .collect(),
                height: 0,
            }),
        }
    }
}

impl CollectionStore for InMemoryCollectionStore {
    fn read(&self, collection: &str, key: &str) -> StateResult<Option<(Vec<u8>, Version)>> {
        let inner = self.inner.read().expect("state lock poisoned");
        let entries = inner
            .collections
            .get(collection)
            .ok_or_else(|| StateError::NotStored {
                collection: collection.to_string(),
            })?;
        Ok(entries.get(key).map(|v| (v.value.clone(), v.version)))
    }

    fn scan(&self, collection: &str) -> StateResult<Vec<(String, Vec<u8>)>> {
        let inner = self.inner.read().expect("state lock poisoned");
        let entries = inner
            .collections
            .get(collection)
            .ok_or_else(|| StateError::NotStored {
                collection: collection.to_string(),
            })?;
        Ok(entries
            .iter()
            .map(|(k, v)| (k.clone(), v.value.clone()))
            .collect())
    }

    fn apply_block(&self, block: u64, txs: &[(String, ReadWriteSet)]) -> Vec<TxValidation> {
        let mut inner = self.inner.write().expect("state lock poisoned");
        let mut verdicts = Vec::with_capacity(txs.len());

        for (tx_index, (tx_id, rwset)) in txs.iter().enumerate() {
            let stale = rwset.reads.iter().find_map(|read| {
                let current = inner
                    .collections
                    .get(&read.collection)
                    .and_then(|entries| entries.get(&read.key))
                    .map(|v| v.version);
                // A read of a collection this store does not hold is
                // vacuously current: validating it is the member
                // peers' job.
                if inner.collections.contains_key(&read.collection) && current != read.version {
                    Some(format!(
                        "read of {}/{} expected version {:?}, found {:?}",
                        read.collection, read.key, read.version, current
                    ))
                } else {
                    None
                }
            });

            if let Some(reason) = stale {
                warn!(tx_id = %tx_id, %reason, "transaction invalidated");
                verdicts.push(TxValidation {
                    tx_id: tx_id.clone(),
                    outcome: TxOutcome::Conflict { reason },
                });
                continue;
            }

            let version = Version::new(block, tx_index as u64);
            for write in &rwset.writes {
                let Some(entries) = inner.collections.get_mut(&write.collection) else {
                    continue;
                };
                match &write.value {
                    Some(value) => {
                        entries.insert(
                            write.key.clone(),
                            VersionedValue {
                                value: value.clone(),
                                version,
                            },
                        );
                    }
                    None => {
                        entries.remove(&write.key);
                    }
                }
            }
            verdicts.push(TxValidation {
                tx_id: tx_id.clone(),
                outcome: TxOutcome::Valid,
            });
        }

        inner.height = block;
        debug!(block, txs = txs.len(), "block applied");
        verdicts
    }

    fn height(&self) -> u64 {
        self.inner.read().expect("state lock poisoned").height
    }
}
