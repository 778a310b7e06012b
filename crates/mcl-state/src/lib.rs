//! Versioned per-peer world state for the Medical Claims Ledger.
//!
//! Each peer holds the committed key-value state of every collection its
//! org is a member of. Keys carry `{block, tx}` versions; transaction
//! simulation records the versions it read, and commit-time validation
//! rejects any transaction whose reads are stale (multi-version
//! concurrency control). A transaction's writes apply atomically or not
//! at all — the detail record and its existence marker can never be
//! observed half-committed.
//!
//! # Design Rules
//!
//! 1. A peer stores only collections its org is a member of; writes to
//!    other collections are dropped at commit. This is the partitioning
//!    scheme — there is no other enforcement point below the contract.
//! 2. Reads of a non-stored collection are refused, never empty.
//! 3. Validation and application happen under one lock per peer: no
//!    torn transactions are observable.
//! 4. Zero-length stored values are indistinguishable from absent keys
//!    at the contract layer; the state layer stores what it is given.

pub mod error;
pub mod memory;
pub mod peer;
pub mod rwset;
pub mod traits;
pub mod version;

pub use error::{StateError, StateResult};
pub use memory::InMemoryCollectionStore;
pub use peer::{PeerState, TxOutcome, TxValidation};
pub use rwset::{KeyRead, KeyWrite, ReadWriteSet};
pub use traits::CollectionStore;
pub use version::Version;
