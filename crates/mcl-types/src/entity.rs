use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// The four ledger record kinds.
///
/// Each kind routes to exactly one detail collection; `Patient` and
/// `Treatment` are additionally indexed in the broad existence
/// collection so that orgs without detail-read rights can still confirm
/// an ID exists.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Patient,
    Treatment,
    Insurance,
    Claim,
}

impl EntityKind {
    pub const ALL: [EntityKind; 4] = [
        EntityKind::Patient,
        EntityKind::Treatment,
        EntityKind::Insurance,
        EntityKind::Claim,
    ];

    /// The JSON field that carries the ledger key inside the stored
    /// payload. Injected on every create and update.
    pub fn key_field(&self) -> &'static str {
        match self {
            EntityKind::Patient => "patientID",
            EntityKind::Treatment => "treatmentID",
            EntityKind::Insurance => "insuranceNumber",
            EntityKind::Claim => "claimID",
        }
    }

    /// Whether this kind writes a `{kind, id}` marker to the broad
    /// existence-index collection. Insurance is deliberately never
    /// indexed; claims are already visible to all three orgs.
    pub fn is_indexed(&self) -> bool {
        matches!(self, EntityKind::Patient | EntityKind::Treatment)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Patient => "Patient",
            EntityKind::Treatment => "Treatment",
            EntityKind::Insurance => "Insurance",
            EntityKind::Claim => "Claim",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Patient" => Ok(EntityKind::Patient),
            "Treatment" => Ok(EntityKind::Treatment),
            "Insurance" => Ok(EntityKind::Insurance),
            "Claim" => Ok(EntityKind::Claim),
            other => Err(TypeError::InvalidKind(other.to_string())),
        }
    }
}
