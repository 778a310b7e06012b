use serde::{Deserialize, Serialize};

use mcl_identity::{Signature, Signer, VerifyingKey};
use mcl_state::ReadWriteSet;
use mcl_types::Org;

/// A transaction proposal built by the gateway and sent to endorsers.
///
/// The transaction ID is a digest over the proposal content; the
/// client signs it, and endorsers recompute and verify both before
/// simulating. A proposal altered in transit never reaches the
/// contract.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Proposal {
    pub tx_id: String,
    /// MSP ID of the submitting identity.
    pub creator: String,
    pub transaction: String,
    pub args: Vec<String>,
    /// Distinguishes two otherwise-identical submissions.
    pub nonce: u64,
    /// The submitting client's public key bytes.
    pub client_key: [u8; 32],
    /// Client signature over the transaction ID.
    pub signature: Signature,
}

impl Proposal {
    /// Build and sign a proposal.
    pub fn signed(
        creator: impl Into<String>,
        transaction: impl Into<String>,
        args: Vec<String>,
        nonce: u64,
        signer: &Signer,
    ) -> Self {
        let creator = creator.into();
        let transaction = transaction.into();
        let tx_id = Self::compute_tx_id(&creator, &transaction, &args, nonce);
        let signature = signer.sign(tx_id.as_bytes());
        Self {
            tx_id,
            creator,
            transaction,
            args,
            nonce,
            client_key: signer.verifying_key().as_bytes(),
            signature,
        }
    }

    /// Recompute the content digest and check the client signature.
    pub fn verify(&self) -> Result<(), String> {
        let expected =
            Self::compute_tx_id(&self.creator, &self.transaction, &self.args, self.nonce);
        if expected != self.tx_id {
            return Err("transaction ID does not match proposal content".into());
        }
        let key = VerifyingKey::from_bytes(self.client_key)
            .map_err(|_| "malformed client key".to_string())?;
        if !key.verify(self.tx_id.as_bytes(), &self.signature) {
            return Err("client signature invalid".into());
        }
        Ok(())
    }

    fn compute_tx_id(creator: &str, transaction: &str, args: &[String], nonce: u64) -> String {
        let mut hasher = blake3::Hasher::new();
        hasher.update(creator.as_bytes());
        hasher.update(&[0]);
        hasher.update(transaction.as_bytes());
        hasher.update(&[0]);
        for arg in args {
            hasher.update(arg.as_bytes());
            hasher.update(&[0]);
        }
        hasher.update(&nonce.to_le_bytes());
        hex::encode(hasher.finalize().as_bytes())
    }
}

/// One org's signed simulation response.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Endorsement {
    pub org: Org,
    pub result: Vec<u8>,
    pub rwset: ReadWriteSet,
    pub signature: Signature,
}

impl Endorsement {
    /// The digest every endorser signs: the transaction ID plus the
    /// simulated result and effect set. Matching digests across
    /// endorsers prove the simulations agreed.
    pub fn digest(tx_id: &str, result: &[u8], rwset: &ReadWriteSet) -> [u8; 32] {
        let mut hasher = blake3::Hasher::new();
        hasher.update(tx_id.as_bytes());
        hasher.update(&(result.len() as u64).to_le_bytes());
        hasher.update(result);
        for read in &rwset.reads {
            hasher.update(read.collection.as_bytes());
            hasher.update(&[0]);
            hasher.update(read.key.as_bytes());
            hasher.update(&[0]);
            match read.version {
                Some(v) => {
                    hasher.update(&[1]);
                    hasher.update(&v.block.to_le_bytes());
                    hasher.update(&v.tx.to_le_bytes());
                }
                None => {
                    hasher.update(&[0]);
                }
            }
        }
        for write in &rwset.writes {
            hasher.update(write.collection.as_bytes());
            hasher.update(&[0]);
            hasher.update(write.key.as_bytes());
            hasher.update(&[0]);
            match &write.value {
                Some(value) => {
                    hasher.update(&[1]);
                    hasher.update(&(value.len() as u64).to_le_bytes());
                    hasher.update(value);
                }
                None => {
                    hasher.update(&[0]);
                }
            }
        }
        *hasher.finalize().as_bytes()
    }
}

/// An endorsed transaction, ready for ordering.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Envelope {
    pub tx_id: String,
    pub rwset: ReadWriteSet,
    pub result: Vec<u8>,
    pub endorsements: Vec<Endorsement>,
}

/// An ordered block. The reference ordering service cuts one
/// transaction per block.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Block {
    pub number: u64,
    pub txs: Vec<Envelope>,
}

/// Commit verdict as observed on one peer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CommitOutcome {
    Committed,
    /// MVCC validation failed: a read was stale at commit time.
    Conflict { reason: String },
    /// Endorsement re-verification failed at commit time.
    PolicyFailure { reason: String },
}

impl CommitOutcome {
    pub fn is_committed(&self) -> bool {
        matches!(self, CommitOutcome::Committed)
    }
}

/// Event emitted by a peer once a transaction's block is applied.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CommitEvent {
    pub block: u64,
    pub tx_id: String,
    pub outcome: CommitOutcome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tx_ids_differ_by_nonce() {
        let signer = Signer::generate();
        let a = Proposal::signed("Org1MSP", "CreatePatient", vec!["P1".into()], 1, &signer);
        let b = Proposal::signed("Org1MSP", "CreatePatient", vec!["P1".into()], 2, &signer);
        assert_ne!(a.tx_id, b.tx_id);
        assert_eq!(a.transaction, "CreatePatient");
    }

    #[test]
    fn arg_boundaries_affect_the_digest() {
        let signer = Signer::generate();
        let a = Proposal::signed("Org1MSP", "T", vec!["ab".into(), "c".into()], 0, &signer);
        let b = Proposal::signed("Org1MSP", "T", vec!["a".into(), "bc".into()], 0, &signer);
        assert_ne!(a.tx_id, b.tx_id);
    }

    #[test]
    fn signed_proposal_verifies_and_detects_tampering() {
        let signer = Signer::generate();
        let mut proposal =
            Proposal::signed("Org1MSP", "ReadPatient", vec!["P1".into()], 3, &signer);
        assert!(proposal.verify().is_ok());

        proposal.args[0] = "P2".into();
        assert!(proposal.verify().is_err());
    }

    #[test]
    fn endorsement_digest_covers_effects() {
        let mut rwset = ReadWriteSet::new();
        rwset.record_write("C", "k", b"v".to_vec());
        let with_write = Endorsement::digest("tx", b"result", &rwset);
        let without = Endorsement::digest("tx", b"result", &ReadWriteSet::new());
        assert_ne!(with_write, without);
    }
}
