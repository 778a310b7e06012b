use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info};

use crate::error::{ConsensusError, ConsensusResult};
use crate::message::{Block, Envelope};
use crate::peer::Peer;

/// The single ordering service: sequences endorsed transactions into
/// blocks and delivers each block to every peer.
///
/// The reference implementation cuts one transaction per block —
/// ordering between independent submits is exactly their arrival order
/// on the queue, and nothing else.
pub struct OrderingService {
    queue: mpsc::Sender<Envelope>,
}

impl OrderingService {
    /// Spawn the ordering task over the given peer set.
    pub fn start(peers: Vec<Arc<Peer>>, queue_depth: usize) -> Self {
        let (queue, mut rx) = mpsc::channel::<Envelope>(queue_depth);
        tokio::spawn(async move {
            let mut next_block: u64 = 1;
            while let Some(envelope) = rx.recv().await {
                let block = Block {
                    number: next_block,
                    txs: vec![envelope],
                };
                next_block += 1;
                debug!(block = block.number, tx_id = %block.txs[0].tx_id, "block cut");
                for peer in &peers {
                    peer.commit_block(&block);
                }
            }
            info!("ordering service stopped");
        });
        Self { queue }
    }

    /// Hand an endorsed transaction to the orderer. Returns once the
    /// envelope is accepted onto the ordering queue; commit is observed
    /// separately through the peers' event streams.
    pub async fn broadcast(&self, envelope: Envelope) -> ConsensusResult<()> {
        self.queue
            .send(envelope)
            .await
            .map_err(|e| ConsensusError::OrdererUnavailable(e.to_string()))
    }
}
