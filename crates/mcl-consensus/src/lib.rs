//! In-process consensus network for the Medical Claims Ledger.
//!
//! Models the full write path a gateway submit must traverse:
//!
//! 1. **Endorse** — each required org's peer simulates the proposal
//!    against its own committed state and signs the effect digest.
//! 2. **Order** — a single ordering service assigns monotonically
//!    increasing block numbers and broadcasts blocks to every peer.
//! 3. **Commit** — each peer re-verifies endorsements, validates the
//!    read-set (MVCC), applies the write-set atomically, and emits a
//!    commit event for the transaction.
//!
//! The network is in-process: peers, orderer, and event channels live
//! in one runtime. Partitioning is enforced where it matters — each
//! peer persists only the collections its org is a member of, and all
//! plaintext reads go through the peer's own state.

pub mod error;
pub mod message;
pub mod network;
pub mod orderer;
pub mod peer;

pub use error::{ConsensusError, ConsensusResult};
pub use message::{
    Block, CommitEvent, CommitOutcome, Endorsement, Envelope, Proposal,
};
pub use network::{Network, NetworkConfig, PeerEndpoint};
pub use orderer::OrderingService;
pub use peer::Peer;
