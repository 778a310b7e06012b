use std::future::Future;
use std::time::Duration;

use tracing::{debug, info, warn};

use mcl_consensus::{CommitOutcome, Endorsement, Envelope, Proposal};
use mcl_identity::{Identity, Signer};
use mcl_partition::EndorsementPolicy;

use crate::channel::Channel;
use crate::error::{GatewayError, GatewayResult, Phase};
use crate::options::GatewayOptions;

/// The gateway client: the only path between a calling service and the
/// ledger.
///
/// Holds an authenticated channel to one org's peer, the caller's
/// signing identity, and the per-phase deadline budget. The client is
/// cheap to share behind an `Arc`; it keeps no mutable state between
/// operations.
pub struct Gateway {
    channel: Channel,
    identity: Identity,
    signer: Signer,
    options: GatewayOptions,
}

impl Gateway {
    pub fn connect(
        channel: Channel,
        identity: Identity,
        signer: Signer,
        options: GatewayOptions,
    ) -> Self {
        info!(msp_id = %identity.msp_id, "gateway connected");
        Self {
            channel,
            identity,
            signer,
            options,
        }
    }

    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    pub fn options(&self) -> &GatewayOptions {
        &self.options
    }

    /// Execute a read-only transaction against the connected peer's
    /// current state. No ordering, no consensus, no side effects.
    pub async fn evaluate(&self, transaction: &str, args: Vec<String>) -> GatewayResult<Vec<u8>> {
        let peer = self.channel.peer().clone();
        let name = transaction.to_string();
        with_deadline(Phase::Evaluate, self.options.evaluate_timeout, async move {
            peer.evaluate(&name, &args).map_err(GatewayError::from_contract)
        })
        .await?
    }

    /// Run the full write path: endorse, order, and wait for commit.
    ///
    /// Returns the simulated result bytes once the transaction is
    /// committed and reflected in state. On `DeadlineExceeded` the
    /// caller cannot assume the write did or did not land — re-query
    /// via [`Gateway::evaluate`]. No retry is performed here.
    pub async fn submit(&self, transaction: &str, args: Vec<String>) -> GatewayResult<Vec<u8>> {
        let proposal = Proposal::signed(
            self.identity.msp_id.clone(),
            transaction,
            args,
            rand::random::<u64>(),
            &self.signer,
        );
        debug!(tx_id = %proposal.tx_id, transaction, "submit started");

        let envelope = with_deadline(
            Phase::Endorse,
            self.options.endorse_timeout,
            self.endorse(&proposal),
        )
        .await??;
        let result = envelope.result.clone();

        // Subscribe before broadcasting so the commit event cannot be
        // missed between the two phases.
        let mut commits = self.channel.peer().subscribe_commits();

        with_deadline(Phase::Submit, self.options.submit_timeout, async {
            self.channel
                .network()
                .orderer()
                .broadcast(envelope)
                .await
                .map_err(GatewayError::from)
        })
        .await??;

        let tx_id = proposal.tx_id.clone();
        let outcome = with_deadline(
            Phase::CommitStatus,
            self.options.commit_timeout,
            async move {
                loop {
                    match commits.recv().await {
                        Ok(event) if event.tx_id == tx_id => return Ok(event.outcome),
                        Ok(_) => continue,
                        Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                            warn!(skipped, "commit event stream lagged");
                            continue;
                        }
                        Err(tokio::sync::broadcast::error::RecvError::Closed) => {
                            return Err(GatewayError::Internal(
                                "commit event stream closed".into(),
                            ));
                        }
                    }
                }
            },
        )
        .await??;

        match outcome {
            CommitOutcome::Committed => {
                debug!(tx_id = %proposal.tx_id, "submit committed");
                Ok(result)
            }
            CommitOutcome::Conflict { reason } => Err(GatewayError::Conflict(reason)),
            CommitOutcome::PolicyFailure { reason } => Err(GatewayError::Endorsement(reason)),
        }
    }

    /// Collect matching endorsements from every org the policy names.
    ///
    /// The connected peer simulates first; its effect set determines
    /// the policy. Every required org must endorse with an identical
    /// effect digest — a refusal or a divergent simulation fails the
    /// whole submit.
    async fn endorse(&self, proposal: &Proposal) -> GatewayResult<Envelope> {
        let connected = self.channel.peer();
        let first = connected
            .endorse(proposal)
            .map_err(GatewayError::from_contract)?;

        let policy = EndorsementPolicy::for_collections(
            connected.state().partition(),
            first.rwset.touched_collections(),
        )
        .map_err(|e| GatewayError::Validation(e.to_string()))?;

        let expected = Endorsement::digest(&proposal.tx_id, &first.result, &first.rwset);
        let mut endorsements = Vec::with_capacity(policy.required.len());
        for &org in &policy.required {
            let endorsement = if org == connected.org() {
                first.clone()
            } else {
                self.channel
                    .network()
                    .peer(org)
                    .endorse(proposal)
                    .map_err(|e| {
                        GatewayError::Endorsement(format!("{org} refused to endorse: {e}"))
                    })?
            };
            let digest =
                Endorsement::digest(&proposal.tx_id, &endorsement.result, &endorsement.rwset);
            if digest != expected {
                return Err(GatewayError::Endorsement(format!(
                    "{org} simulation diverged from the connected peer"
                )));
            }
            endorsements.push(endorsement);
        }

        Ok(Envelope {
            tx_id: proposal.tx_id.clone(),
            rwset: first.rwset,
            result: first.result,
            endorsements,
        })
    }
}

/// Run a phase under its deadline; expiry is a typed failure, never a
/// partial result.
async fn with_deadline<T>(
    phase: Phase,
    limit: Duration,
    fut: impl Future<Output = T>,
) -> GatewayResult<T> {
    tokio::time::timeout(limit, fut)
        .await
        .map_err(|_| GatewayError::DeadlineExceeded { phase })
}
