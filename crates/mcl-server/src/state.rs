use std::sync::Arc;

use tracing::info;

use mcl_claims::ClaimService;
use mcl_consensus::{Network, NetworkConfig};
use mcl_gateway::{Channel, Gateway};
use mcl_identity::{CryptoMaterial, Identity, Signer};

use crate::config::ServerConfig;
use crate::error::ServerResult;

/// Shared handler state: one gateway client and the claim coordinator
/// built over it.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<Gateway>,
    pub claims: Arc<ClaimService>,
}

impl AppState {
    /// Build the gateway and services for `config.org` against an
    /// already-running network.
    pub fn build(config: &ServerConfig, network: Arc<Network>) -> ServerResult<Self> {
        let (identity, signer) = match &config.crypto {
            Some(paths) => {
                let material = CryptoMaterial::new(
                    &paths.key_dir,
                    &paths.cert_dir,
                    &paths.tls_cert_path,
                )
                .load()?;
                let signer = Signer::from_pkcs8_pem(&material.key_pem)?;
                (Identity::new(config.org, material.cert_pem), signer)
            }
            None => {
                info!(org = %config.org, "no crypto material configured, using ephemeral identity");
                (Identity::new(config.org, Vec::new()), Signer::generate())
            }
        };

        let endpoint = network.endpoint(config.org).clone();
        let tls_root = network.tls_root(config.org).to_vec();
        let channel = Channel::connect(Arc::clone(&network), endpoint, &tls_root)?;
        let gateway = Arc::new(Gateway::connect(
            channel,
            identity,
            signer,
            config.deadlines.to_gateway_options(),
        ));
        let claims = Arc::new(ClaimService::new(Arc::clone(&gateway)));
        Ok(Self { gateway, claims })
    }

    /// State over a freshly started default network. Demo/test entry
    /// point; production deployments start the network once and build
    /// one state per serving org.
    pub fn standalone(config: &ServerConfig) -> ServerResult<Self> {
        let mut network_config = NetworkConfig::default();
        if let Some(paths) = &config.crypto {
            let material =
                CryptoMaterial::new(&paths.key_dir, &paths.cert_dir, &paths.tls_cert_path)
                    .load()?;
            network_config
                .tls_roots
                .insert(config.org, material.tls_root);
        }
        Self::build(config, Network::start(network_config))
    }
}
