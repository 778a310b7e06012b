//! Foundation types for the Medical Claims Ledger (MCL).
//!
//! This crate provides the organization, entity, and record types used
//! throughout the MCL system. Every other MCL crate depends on `mcl-types`.
//!
//! # Key Types
//!
//! - [`Org`] — One of the three consortium member organizations
//! - [`EntityKind`] — The four ledger record kinds and their key/index rules
//! - [`ClaimStatus`] — Closed claim lifecycle state machine
//! - [`Patient`], [`Treatment`], [`Insurance`], [`Claim`] — Typed record payloads
//! - [`ExistenceMarker`] — The `{kind, id}` pair stored in the broad index

pub mod entity;
pub mod error;
pub mod id;
pub mod org;
pub mod records;
pub mod status;

pub use entity::EntityKind;
pub use error::TypeError;
pub use id::fresh_record_id;
pub use org::Org;
pub use records::{Claim, ExistenceMarker, Insurance, Patient, Treatment};
pub use status::ClaimStatus;
