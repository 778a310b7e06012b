use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{IdentityError, IdentityResult};

/// The fixed on-disk crypto-material convention for one organization:
/// a keystore directory holding the private key, a signcerts directory
/// holding the certificate, and a TLS root certificate file.
///
/// Each directory is expected to contain the credential as its first
/// file; which file is "first" follows directory order, matching the
/// convention of the material layout this mirrors.
#[derive(Clone, Debug)]
pub struct CryptoMaterial {
    pub key_dir: PathBuf,
    pub cert_dir: PathBuf,
    pub tls_cert_path: PathBuf,
}

/// Material read from disk, held in memory for the process lifetime.
#[derive(Clone)]
pub struct LoadedMaterial {
    /// PKCS#8 PEM private key.
    pub key_pem: String,
    /// PEM-encoded certificate presented as the identity credential.
    pub cert_pem: Vec<u8>,
    /// PEM-encoded TLS root certificate for the peer channel.
    pub tls_root: Vec<u8>,
}

impl std::fmt::Debug for LoadedMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoadedMaterial")
            .field("key_pem", &"<redacted>")
            .field("cert_pem_len", &self.cert_pem.len())
            .field("tls_root_len", &self.tls_root.len())
            .finish()
    }
}

impl CryptoMaterial {
    pub fn new(
        key_dir: impl Into<PathBuf>,
        cert_dir: impl Into<PathBuf>,
        tls_cert_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            key_dir: key_dir.into(),
            cert_dir: cert_dir.into(),
            tls_cert_path: tls_cert_path.into(),
        }
    }

    /// Read all three credentials from disk.
    pub fn load(&self) -> IdentityResult<LoadedMaterial> {
        let key_path = first_file_in_dir(&self.key_dir)?;
        let cert_path = first_file_in_dir(&self.cert_dir)?;

        let key_pem = fs::read_to_string(key_path)?;
        let cert_pem = fs::read(cert_path)?;
        let tls_root = fs::read(&self.tls_cert_path)?;

        Ok(LoadedMaterial {
            key_pem,
            cert_pem,
            tls_root,
        })
    }
}

/// The first regular file in a directory, or `CredentialUnavailable`
/// if the directory holds none.
fn first_file_in_dir(dir: &Path) -> IdentityResult<PathBuf> {
    let mut entries: Vec<PathBuf> = fs::read_dir(dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| path.is_file())
        .collect();
    entries.sort();
    entries
        .into_iter()
        .next()
        .ok_or_else(|| IdentityError::CredentialUnavailable(dir.to_path_buf()))
}
