use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// A consortium member organization.
///
/// The network is fixed at three members: the hospital (`Org1`), the
/// insurer (`Org2`), and the claim manager (`Org3`). Collection
/// membership and endorsement policies are expressed in terms of these.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Org {
    /// Hospital: creates patients and treatments.
    Org1,
    /// Insurer: sole owner of insurance policy records.
    Org2,
    /// Claim manager: processes claims, sees only existence markers
    /// for patients and treatments.
    Org3,
}

impl Org {
    /// All member organizations, in canonical order.
    pub const ALL: [Org; 3] = [Org::Org1, Org::Org2, Org::Org3];

    /// The membership-service identifier bound to this org's identities.
    pub fn msp_id(&self) -> &'static str {
        match self {
            Org::Org1 => "Org1MSP",
            Org::Org2 => "Org2MSP",
            Org::Org3 => "Org3MSP",
        }
    }

    /// Short lowercase name, used in endpoints and logs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Org::Org1 => "org1",
            Org::Org2 => "org2",
            Org::Org3 => "org3",
        }
    }
}

impl fmt::Display for Org {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Org {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "org1" | "Org1" | "Org1MSP" => Ok(Org::Org1),
            "org2" | "Org2" | "Org2MSP" => Ok(Org::Org2),
            "org3" | "Org3" | "Org3MSP" => Ok(Org::Org3),
            other => Err(TypeError::InvalidOrg(other.to_string())),
        }
    }
}
