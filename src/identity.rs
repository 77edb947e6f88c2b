//! Alias resolution to canonical player identities.
//!
//! The alias table is owned by the ingestion collaborator and passed in
//! read-only for the duration of a run. Unknown names are a distinct error
//! class — never silently merged into an existing identity, never used to
//! mint a new one.

use std::collections::HashMap;

use tracing::debug;

use crate::errors::DataError;
use crate::models::{normalize_name, PlayerIdentity};

/// Read-only resolver from raw name strings to canonical identities.
#[derive(Debug)]
pub struct IdentityResolver<'a> {
    identities: &'a [PlayerIdentity],
    /// normalized alias or canonical name -> index into `identities`.
    lookup: HashMap<String, usize>,
}

impl<'a> IdentityResolver<'a> {
    /// Build a resolver over an identity list.
    ///
    /// Later entries never overwrite earlier ones: the alias -> canonical
    /// mapping must stay a function, so on collision the first mapping wins
    /// and the duplicate is logged.
    pub fn new(identities: &'a [PlayerIdentity]) -> Self {
        let mut lookup = HashMap::new();
        for (idx, identity) in identities.iter().enumerate() {
            let canonical_key = normalize_name(&identity.canonical);
            if let Some(&existing) = lookup.get(&canonical_key) {
                if existing != idx {
                    debug!(
                        canonical = %identity.canonical,
                        "duplicate canonical name in alias table, keeping first"
                    );
                }
            } else {
                lookup.insert(canonical_key, idx);
            }
            for alias in &identity.aliases {
                let key = normalize_name(alias);
                if key.is_empty() {
                    continue;
                }
                if let Some(&existing) = lookup.get(&key) {
                    if existing != idx {
                        debug!(
                            alias = %alias,
                            kept = %identities[existing].canonical,
                            ignored = %identity.canonical,
                            "alias maps to two identities, keeping first"
                        );
                    }
                } else {
                    lookup.insert(key, idx);
                }
            }
        }
        Self { identities, lookup }
    }

    /// Resolve a raw name to its canonical identity.
    pub fn resolve(&self, raw_name: &str) -> Result<&'a PlayerIdentity, DataError> {
        self.lookup
            .get(&normalize_name(raw_name))
            .map(|&idx| &self.identities[idx])
            .ok_or_else(|| DataError::UnknownPlayer(raw_name.trim().to_string()))
    }

    /// Number of known identities.
    pub fn len(&self) -> usize {
        self.identities.len()
    }

    /// Whether the table is empty.
    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }
}
