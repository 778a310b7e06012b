use std::collections::{BTreeSet, HashMap};

use tokio::sync::broadcast;
use tracing::{debug, warn};

use mcl_contract::{ContractError, LedgerContract, TxSimulator};
use mcl_identity::{Signer, VerifyingKey};
use mcl_partition::{EndorsementPolicy, PartitionMap};
use mcl_state::{PeerState, TxOutcome};
use mcl_types::Org;

use crate::message::{Block, CommitEvent, CommitOutcome, Endorsement, Envelope, Proposal};

/// One org's peer: committed state, the deployed contract, and the
/// org's endorsement signer.
///
/// Peers never talk to each other — the ordering service is the only
/// path by which state changes reach them.
pub struct Peer {
    org: Org,
    state: PeerState,
    contract: LedgerContract,
    signer: Signer,
    verifiers: HashMap<Org, VerifyingKey>,
    commit_tx: broadcast::Sender<CommitEvent>,
}

impl std::fmt::Debug for Peer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Peer")
            .field("org", &self.org)
            .finish_non_exhaustive()
    }
}

impl Peer {
    pub fn new(
        org: Org,
        partition: PartitionMap,
        signer: Signer,
        verifiers: HashMap<Org, VerifyingKey>,
        channel_capacity: usize,
    ) -> Self {
        let (commit_tx, _) = broadcast::channel(channel_capacity);
        Self {
            org,
            state: PeerState::new(org, partition.clone()),
            contract: LedgerContract::new(partition),
            signer,
            verifiers,
            commit_tx,
        }
    }

    pub fn org(&self) -> Org {
        self.org
    }

    pub fn state(&self) -> &PeerState {
        &self.state
    }

    /// Read-only execution against this peer's committed state. No
    /// consensus, no side effects: a simulation that stages writes is
    /// a contract misuse and is refused.
    pub fn evaluate(&self, transaction: &str, args: &[String]) -> Result<Vec<u8>, ContractError> {
        let mut sim = TxSimulator::new(&self.state);
        let result = self.contract.invoke(&mut sim, transaction, args)?;
        let rwset = sim.into_rwset();
        if rwset.has_writes() {
            return Err(ContractError::Validation(format!(
                "{transaction} stages writes and must be submitted, not evaluated"
            )));
        }
        Ok(result)
    }

    /// Verify the proposal's integrity, simulate it, and sign the
    /// effect digest.
    pub fn endorse(&self, proposal: &Proposal) -> Result<Endorsement, ContractError> {
        proposal
            .verify()
            .map_err(|reason| ContractError::Validation(format!("proposal rejected: {reason}")))?;
        let mut sim = TxSimulator::new(&self.state);
        let result = self
            .contract
            .invoke(&mut sim, &proposal.transaction, &proposal.args)?;
        let rwset = sim.into_rwset();
        let digest = Endorsement::digest(&proposal.tx_id, &result, &rwset);
        let signature = self.signer.sign(&digest);
        debug!(org = %self.org, tx_id = %proposal.tx_id, "proposal endorsed");
        Ok(Endorsement {
            org: self.org,
            result,
            rwset,
            signature,
        })
    }

    /// Commit events for transactions applied on this peer.
    pub fn subscribe_commits(&self) -> broadcast::Receiver<CommitEvent> {
        self.commit_tx.subscribe()
    }

    /// Re-verify, validate, and apply an ordered block, then emit one
    /// commit event per transaction.
    pub fn commit_block(&self, block: &Block) {
        let mut applicable: Vec<(String, mcl_state::ReadWriteSet)> = Vec::new();
        let mut events: Vec<CommitEvent> = Vec::new();

        for envelope in &block.txs {
            match self.verify_endorsements(envelope) {
                Ok(()) => applicable.push((envelope.tx_id.clone(), envelope.rwset.clone())),
                Err(reason) => {
                    warn!(org = %self.org, tx_id = %envelope.tx_id, %reason, "endorsement rejected at commit");
                    events.push(CommitEvent {
                        block: block.number,
                        tx_id: envelope.tx_id.clone(),
                        outcome: CommitOutcome::PolicyFailure { reason },
                    });
                }
            }
        }

        for verdict in self.state.apply_block(block.number, &applicable) {
            let outcome = match verdict.outcome {
                TxOutcome::Valid => CommitOutcome::Committed,
                TxOutcome::Conflict { reason } => CommitOutcome::Conflict { reason },
            };
            events.push(CommitEvent {
                block: block.number,
                tx_id: verdict.tx_id,
                outcome,
            });
        }

        for event in events {
            // No subscribers is fine; the event stream is best-effort.
            let _ = self.commit_tx.send(event);
        }
    }

    /// Endorsement policy and signature checks, recomputed from the
    /// envelope contents — an orderer cannot forge what it cannot sign.
    fn verify_endorsements(&self, envelope: &Envelope) -> Result<(), String> {
        let policy = EndorsementPolicy::for_collections(
            self.state.partition(),
            envelope.rwset.touched_collections(),
        )
        .map_err(|e| e.to_string())?;

        let digest = Endorsement::digest(&envelope.tx_id, &envelope.result, &envelope.rwset);
        let mut signed: BTreeSet<Org> = BTreeSet::new();
        for endorsement in &envelope.endorsements {
            let Some(verifier) = self.verifiers.get(&endorsement.org) else {
                return Err(format!("unknown endorser {}", endorsement.org));
            };
            if !verifier.verify(&digest, &endorsement.signature) {
                return Err(format!("bad signature from {}", endorsement.org));
            }
            signed.insert(endorsement.org);
        }

        if !policy.is_satisfied_by(&signed) {
            return Err(format!(
                "endorsement policy not satisfied: required {:?}, signed {:?}",
                policy.required, signed
            ));
        }
        Ok(())
    }
}
