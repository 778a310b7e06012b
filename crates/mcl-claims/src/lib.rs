//! Claim lifecycle coordinator for the Medical Claims Ledger.
//!
//! The only cross-entity workflow in the system: creating a claim
//! references a treatment and a patient by ID (verified against their
//! existence markers before the claim is written), and a status
//! transition is a read-modify-write guarded by commit-time conflict
//! detection — of two racing transitions from the same snapshot,
//! exactly one wins and the loser observes a conflict, never a silent
//! overwrite.

pub mod error;
pub mod service;

pub use error::{ClaimError, ClaimResult};
pub use service::ClaimService;
