use std::path::PathBuf;

/// Errors from identity material loading and signing.
#[derive(Debug, thiserror::Error)]
pub enum IdentityError {
    /// The expected material directory exists but contains no files.
    #[error("no credential files in directory: {0}")]
    CredentialUnavailable(PathBuf),

    /// The private key PEM could not be decoded.
    #[error("invalid private key: {0}")]
    InvalidKey(String),

    #[error("I/O error reading crypto material: {0}")]
    Io(#[from] std::io::Error),
}

pub type IdentityResult<T> = Result<T, IdentityError>;
