use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use mcl_types::Org;

use crate::error::{PartitionError, PartitionResult};
use crate::map::{CollectionSpec, PartitionMap};

/// The orgs that must endorse a transaction before it can be ordered.
///
/// An org can endorse only what its peer can simulate, so the required
/// set for a transaction is the orgs that are members of *every*
/// collection the simulation touched. Endorsement is all-of, not
/// any-of: a missing or mismatched response from any required org fails
/// the submit.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EndorsementPolicy {
    pub required: BTreeSet<Org>,
}

impl EndorsementPolicy {
    pub fn for_collection(spec: &CollectionSpec) -> Self {
        Self {
            required: spec.members.clone(),
        }
    }

    /// Policy for a transaction that touched the named collections:
    /// the intersection of their member sets.
    pub fn for_collections<'a>(
        map: &PartitionMap,
        names: impl IntoIterator<Item = &'a str>,
    ) -> PartitionResult<Self> {
        let mut required: Option<BTreeSet<Org>> = None;
        for name in names {
            let members = &map.spec_for(name)?.members;
            required = Some(match required {
                None => members.clone(),
                Some(acc) => acc.intersection(members).copied().collect(),
            });
        }
        let required = required.unwrap_or_default();
        if required.is_empty() {
            return Err(PartitionError::NoEligibleEndorsers);
        }
        Ok(Self { required })
    }

    pub fn is_satisfied_by(&self, endorsers: &BTreeSet<Org>) -> bool {
        self.required.is_subset(endorsers)
    }
}
