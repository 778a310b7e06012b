use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use mcl_gateway::GatewayOptions;
use mcl_types::Org;

use crate::error::{ServerError, ServerResult};

/// On-disk crypto-material locations for the serving org.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CryptoPaths {
    pub key_dir: PathBuf,
    pub cert_dir: PathBuf,
    pub tls_cert_path: PathBuf,
}

/// Per-phase deadlines in seconds; defaults are the reference values.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DeadlineConfig {
    pub evaluate_secs: u64,
    pub endorse_secs: u64,
    pub submit_secs: u64,
    pub commit_secs: u64,
}

impl Default for DeadlineConfig {
    fn default() -> Self {
        Self {
            evaluate_secs: 5,
            endorse_secs: 15,
            submit_secs: 5,
            commit_secs: 60,
        }
    }
}

impl DeadlineConfig {
    pub fn to_gateway_options(&self) -> GatewayOptions {
        GatewayOptions {
            evaluate_timeout: Duration::from_secs(self.evaluate_secs),
            endorse_timeout: Duration::from_secs(self.endorse_secs),
            submit_timeout: Duration::from_secs(self.submit_secs),
            commit_timeout: Duration::from_secs(self.commit_secs),
        }
    }
}

/// Server configuration, constructed once at startup and passed by
/// reference — no ambient environment lookups anywhere below this.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// The org this facade serves on behalf of.
    pub org: Org,
    /// Crypto material on disk. When absent, an ephemeral identity is
    /// generated — useful for demos and tests only.
    #[serde(default)]
    pub crypto: Option<CryptoPaths>,
    #[serde(default)]
    pub deadlines: DeadlineConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:3000".parse().expect("valid default bind addr"),
            org: Org::Org1,
            crypto: None,
            deadlines: DeadlineConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_toml_file(path: &Path) -> ServerResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        toml::from_str(&raw).map_err(|e| ServerError::Config(e.to_string()))
    }
}
