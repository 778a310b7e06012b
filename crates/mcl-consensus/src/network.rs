use std::collections::HashMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

use mcl_identity::Signer;
use mcl_partition::PartitionMap;
use mcl_types::Org;

use crate::error::{ConsensusError, ConsensusResult};
use crate::orderer::OrderingService;
use crate::peer::Peer;

/// A peer's network address plus the TLS hostname override presented
/// during the handshake.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeerEndpoint {
    pub address: String,
    pub host_alias: String,
}

/// Network construction parameters.
#[derive(Clone, Debug)]
pub struct NetworkConfig {
    pub partition: PartitionMap,
    /// Capacity of each peer's commit-event broadcast channel.
    pub channel_capacity: usize,
    /// Depth of the ordering queue.
    pub queue_depth: usize,
    /// TLS root material per org. Orgs absent here get a root derived
    /// from their peer's verifying key at startup.
    pub tls_roots: HashMap<Org, Vec<u8>>,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            partition: PartitionMap::default(),
            channel_capacity: 1024,
            queue_depth: 256,
            tls_roots: HashMap::new(),
        }
    }
}

/// The assembled consortium: three peers, one ordering service, and
/// the connection directory the channel layer authenticates against.
pub struct Network {
    peers: HashMap<Org, Arc<Peer>>,
    endpoints: HashMap<Org, PeerEndpoint>,
    tls_roots: HashMap<Org, Vec<u8>>,
    orderer: OrderingService,
}

impl Network {
    /// Build the peers and spawn the ordering task. Must run inside a
    /// tokio runtime.
    pub fn start(config: NetworkConfig) -> Arc<Self> {
        let signers: Vec<(Org, Signer)> = Org::ALL
            .iter()
            .map(|&org| (org, Signer::generate()))
            .collect();
        let verifiers: HashMap<_, _> = signers
            .iter()
            .map(|(org, signer)| (*org, signer.verifying_key()))
            .collect();

        let mut peers = HashMap::new();
        let mut tls_roots = HashMap::new();
        for (org, signer) in signers {
            let root = config.tls_roots.get(&org).cloned().unwrap_or_else(|| {
                derive_tls_root(org, &verifiers[&org].as_bytes())
            });
            tls_roots.insert(org, root);
            peers.insert(
                org,
                Arc::new(Peer::new(
                    org,
                    config.partition.clone(),
                    signer,
                    verifiers.clone(),
                    config.channel_capacity,
                )),
            );
        }

        let orderer =
            OrderingService::start(peers.values().cloned().collect(), config.queue_depth);

        let endpoints = Org::ALL
            .iter()
            .map(|&org| (org, default_endpoint(org)))
            .collect();

        info!("consensus network started");
        Arc::new(Self {
            peers,
            endpoints,
            tls_roots,
            orderer,
        })
    }

    /// The advertised endpoint of an org's peer.
    pub fn endpoint(&self, org: Org) -> &PeerEndpoint {
        &self.endpoints[&org]
    }

    /// The TLS root material a client must present to reach this
    /// org's peer.
    pub fn tls_root(&self, org: Org) -> &[u8] {
        &self.tls_roots[&org]
    }

    pub fn peer(&self, org: Org) -> Arc<Peer> {
        Arc::clone(&self.peers[&org])
    }

    pub fn orderer(&self) -> &OrderingService {
        &self.orderer
    }

    /// Authenticate a channel to the peer at `endpoint`. The endpoint
    /// must be known, its host alias must match, and the presented TLS
    /// root must equal the peer's registered root.
    pub fn connect(&self, endpoint: &PeerEndpoint, tls_root: &[u8]) -> ConsensusResult<Arc<Peer>> {
        let org = self
            .endpoints
            .iter()
            .find(|(_, ep)| ep.address == endpoint.address)
            .map(|(org, _)| *org)
            .ok_or_else(|| ConsensusError::UnknownPeer(endpoint.address.clone()))?;

        let registered = &self.endpoints[&org];
        if registered.host_alias != endpoint.host_alias {
            return Err(ConsensusError::HandshakeFailed(format!(
                "hostname override {} does not match {}",
                endpoint.host_alias, registered.host_alias
            )));
        }
        if self.tls_roots[&org] != tls_root {
            return Err(ConsensusError::HandshakeFailed(format!(
                "TLS root mismatch for {}",
                endpoint.address
            )));
        }
        Ok(self.peer(org))
    }
}

fn default_endpoint(org: Org) -> PeerEndpoint {
    let (address, host_alias) = match org {
        Org::Org1 => ("localhost:7051", "peer0.org1.example.com"),
        Org::Org2 => ("localhost:9051", "peer0.org2.example.com"),
        Org::Org3 => ("localhost:11051", "peer0.org3.example.com"),
    };
    PeerEndpoint {
        address: address.to_string(),
        host_alias: host_alias.to_string(),
    }
}

fn derive_tls_root(org: Org, key_bytes: &[u8]) -> Vec<u8> {
    let mut hasher = blake3::Hasher::new();
    hasher.update(org.msp_id().as_bytes());
    hasher.update(key_bytes);
    format!(
        "-----BEGIN MCL TLS ROOT-----\n{}\n-----END MCL TLS ROOT-----\n",
        hex::encode(hasher.finalize().as_bytes())
    )
    .into_bytes()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn connect_with_registered_root_succeeds() {
        let network = Network::start(NetworkConfig::default());
        let endpoint = network.endpoint(Org::Org1).clone();
        let root = network.tls_root(Org::Org1).to_vec();
        let peer = network.connect(&endpoint, &root).unwrap();
        assert_eq!(peer.org(), Org::Org1);
    }

    #[tokio::test]
    async fn unknown_address_is_refused() {
        let network = Network::start(NetworkConfig::default());
        let endpoint = PeerEndpoint {
            address: "localhost:1".into(),
            host_alias: "peer0.org1.example.com".into(),
        };
        let err = network.connect(&endpoint, b"root").unwrap_err();
        assert!(matches!(err, ConsensusError::UnknownPeer(_)));
    }

    #[tokio::test]
    async fn wrong_tls_root_fails_the_handshake() {
        let network = Network::start(NetworkConfig::default());
        let endpoint = network.endpoint(Org::Org2).clone();
        let err = network.connect(&endpoint, b"wrong root").unwrap_err();
        assert!(matches!(err, ConsensusError::HandshakeFailed(_)));
    }

    #[tokio::test]
    async fn wrong_host_alias_fails_the_handshake() {
        let network = Network::start(NetworkConfig::default());
        let mut endpoint = network.endpoint(Org::Org3).clone();
        endpoint.host_alias = "peer0.org1.example.com".into();
        let root = network.tls_root(Org::Org3).to_vec();
        let err = network.connect(&endpoint, &root).unwrap_err();
        assert!(matches!(err, ConsensusError::HandshakeFailed(_)));
    }

    #[tokio::test]
    async fn configured_tls_root_overrides_derived_one() {
        let mut config = NetworkConfig::default();
        config.tls_roots.insert(Org::Org1, b"org1 ca".to_vec());
        let network = Network::start(config);
        assert_eq!(network.tls_root(Org::Org1), b"org1 ca");
        let endpoint = network.endpoint(Org::Org1).clone();
        assert!(network.connect(&endpoint, b"org1 ca").is_ok());
    }

    #[tokio::test]
    async fn ordered_submit_reaches_every_member_peer() {
        let network = Network::start(NetworkConfig::default());
        let org2 = network.peer(Org::Org2);

        let args: Vec<String> = [
            "INS1", "Jane", "987654321098", "2023-02-15", "2024-02-15", "28", "150000",
            "50000",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect();
        let client = mcl_identity::Signer::generate();
        let proposal =
            crate::message::Proposal::signed("Org2MSP", "CreateInsurance", args, 1, &client);
        let endorsement = org2.endorse(&proposal).unwrap();
        let envelope = crate::message::Envelope {
            tx_id: proposal.tx_id.clone(),
            rwset: endorsement.rwset.clone(),
            result: endorsement.result.clone(),
            endorsements: vec![endorsement],
        };

        let mut commits = org2.subscribe_commits();
        network.orderer().broadcast(envelope).await.unwrap();

        let event = commits.recv().await.unwrap();
        assert_eq!(event.tx_id, proposal.tx_id);
        assert!(event.outcome.is_committed());

        // Org2 stores the insurance record; Org1 never does.
        assert!(org2.evaluate("ReadInsurance", &["INS1".to_string()]).is_ok());
        assert!(network
            .peer(Org::Org1)
            .evaluate("ReadInsurance", &["INS1".to_string()])
            .is_err());
    }
}
