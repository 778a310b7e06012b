//! Partitioned ledger store for the Medical Claims Ledger.
//!
//! This crate is the contract layer: it owns create/read/exists/update/
//! delete/list semantics for every entity kind and routes each operation
//! to the correct collection(s). It executes inside a transaction
//! simulation ([`TxSimulator`]) that records the read/write set later
//! validated at commit.
//!
//! # Guarantees
//!
//! - Patient and treatment creation writes the detail record and the
//!   `{kind, id}` existence marker in one write-set: they commit
//!   together or not at all.
//! - `read` reports `NotFound` for absent *and* zero-length values; the
//!   two are indistinguishable to callers.
//! - `exists` consults only the broad index collection — it can never
//!   leak payload.
//! - `update` and `delete` require the record to exist; the
//!   in-simulation read doubles as the optimistic-concurrency guard.
//! - `delete` removes the detail record only. The existence marker is
//!   retained as a permanent record that the ID once existed.
//! - Validation failures are raised before any state access.

pub mod contract;
pub mod error;
pub mod simulator;
pub mod store;

pub use contract::LedgerContract;
pub use error::{ContractError, ContractResult};
pub use simulator::TxSimulator;
pub use store::LedgerStore;
