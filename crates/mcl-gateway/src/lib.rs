//! Transaction gateway client for the Medical Claims Ledger.
//!
//! Every calling service reaches the ledger through this client. It
//! offers exactly two operation kinds:
//!
//! - [`Gateway::evaluate`] — read-only, one peer, no consensus, short
//!   deadline. No side effects on the ledger.
//! - [`Gateway::submit`] — the full write path: proposal → endorsement
//!   → ordering → commit wait, each phase under its own deadline.
//!
//! A phase that outlives its deadline fails with
//! [`GatewayError::DeadlineExceeded`] naming the phase. An expired
//! submit leaves the outcome *unknown*: the write may or may not have
//! landed, no retry is performed, and the caller must re-query through
//! `evaluate` to find out. Submits against the same key are not
//! serialized here — conflicting writes are resolved (and one
//! rejected) by commit-time validation.

pub mod args;
pub mod channel;
pub mod client;
pub mod error;
pub mod options;

pub use args::ToTxArg;
pub use channel::Channel;
pub use client::Gateway;
pub use error::{GatewayError, GatewayResult, Phase};
pub use options::GatewayOptions;
