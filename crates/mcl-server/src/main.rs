use std::path::PathBuf;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use mcl_server::{MclServer, ServerConfig};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => ServerConfig::from_toml_file(&PathBuf::from(&path))
            .with_context(|| format!("loading config from {path}"))?,
        None => ServerConfig::default(),
    };

    MclServer::new(config).serve().await?;
    Ok(())
}
