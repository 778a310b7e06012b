//! Canonical collection names shared with the external wire contract.

/// Patient and treatment detail records.
pub const ORG1_ORG2_DETAIL: &str = "Org1Org2PrivateCollection";

/// Insurance detail records.
pub const ORG2_DETAIL: &str = "Org2PrivateCollection";

/// Claim detail records.
pub const ORG1_ORG2_ORG3_DETAIL: &str = "Org1Org2Org3PrivateCollection";

/// Existence markers for patients and treatments.
pub const BROAD_ID_INDEX: &str = "Org1Org2Org3IDCollection";
