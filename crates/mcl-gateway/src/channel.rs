use std::sync::Arc;

use tracing::info;

use mcl_consensus::{Network, Peer, PeerEndpoint};

use crate::error::{GatewayError, GatewayResult};

/// An authenticated channel to one org's peer.
///
/// Establishing the channel performs the handshake against the
/// network's connection directory: the endpoint must be known, the
/// hostname override must match, and the presented TLS root must equal
/// the peer's registered root. Failures propagate as
/// [`GatewayError::Connection`]; there is no retry at this layer.
pub struct Channel {
    endpoint: PeerEndpoint,
    peer: Arc<Peer>,
    network: Arc<Network>,
}

impl std::fmt::Debug for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Channel")
            .field("endpoint", &self.endpoint)
            .finish_non_exhaustive()
    }
}

impl Channel {
    pub fn connect(
        network: Arc<Network>,
        endpoint: PeerEndpoint,
        tls_root: &[u8],
    ) -> GatewayResult<Self> {
        let peer = network
            .connect(&endpoint, tls_root)
            .map_err(GatewayError::from)?;
        info!(address = %endpoint.address, host_alias = %endpoint.host_alias, "channel established");
        Ok(Self {
            endpoint,
            peer,
            network,
        })
    }

    pub fn endpoint(&self) -> &PeerEndpoint {
        &self.endpoint
    }

    pub(crate) fn peer(&self) -> &Arc<Peer> {
        &self.peer
    }

    pub(crate) fn network(&self) -> &Arc<Network> {
        &self.network
    }
}
