//! Identity provider for the Medical Claims Ledger.
//!
//! Loads an organization's signing identity from the fixed on-disk
//! crypto-material convention (one keystore directory, one signcerts
//! directory, one TLS root certificate file) and derives an Ed25519
//! signer from the private key. Material is read once at process start
//! and never reloaded.
//!
//! Failures are typed: an empty material directory is
//! [`IdentityError::CredentialUnavailable`]; nothing here retries.

pub mod error;
pub mod identity;
pub mod material;
pub mod signer;

pub use error::{IdentityError, IdentityResult};
pub use identity::Identity;
pub use material::{CryptoMaterial, LoadedMaterial};
pub use signer::{Signature, Signer, VerifyingKey};
