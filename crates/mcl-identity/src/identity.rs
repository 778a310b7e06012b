use serde::{Deserialize, Serialize};

use mcl_types::Org;

/// A signing identity: the org's membership-service ID plus the
/// PEM-encoded certificate presented as its credential.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub msp_id: String,
    pub credentials: Vec<u8>,
}

impl Identity {
    pub fn new(org: Org, credentials: impl Into<Vec<u8>>) -> Self {
        Self {
            msp_id: org.msp_id().to_string(),
            credentials: credentials.into(),
        }
    }
}
