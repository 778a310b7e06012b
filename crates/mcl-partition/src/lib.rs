//! Private-data partitioning for the Medical Claims Ledger.
//!
//! This crate owns the fixed mapping from entity kind to collection name
//! to member-organization set. It is configuration, not computation: the
//! rest of the system only ever looks the mapping up.
//!
//! # Collections
//!
//! - `Org1Org2PrivateCollection` — patient and treatment detail records
//! - `Org2PrivateCollection` — insurance detail records
//! - `Org1Org2Org3PrivateCollection` — claim detail records
//! - `Org1Org2Org3IDCollection` — existence markers (`{kind, id}` only)
//!
//! A peer stores and can read a collection's plaintext only if its org is
//! a member. The existence-index collection is the mechanism by which an
//! org without detail-read rights still verifies that a record exists.

pub mod error;
pub mod map;
pub mod names;
pub mod policy;

pub use error::{PartitionError, PartitionResult};
pub use map::{CollectionSpec, PartitionMap};
pub use policy::EndorsementPolicy;
