use std::collections::{BTreeSet, HashSet};
use std::sync::{PoisonError, RwLock};

use serde::{Serialize, Serializer};

/// Canonical string form of a URL, the identity key used for dedup.
pub type Link = String;

/// Thread-safe set of canonical links.
///
/// `add` is the only way entries get in, and it decides membership under a
/// single write lock, so exactly one caller wins the race for a new key.
#[derive(Debug, Default)]
pub struct LinkSet {
    links: RwLock<HashSet<Link>>,
}

impl LinkSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `link`, returning `true` only if it was not present before.
    pub fn add(&self, link: &str) -> bool {
        let mut links = self.links.write().unwrap_or_else(PoisonError::into_inner);
        if links.contains(link) {
            return false;
        }
        links.insert(link.to_string())
    }

    /// Current presence of `link`.
    ///
    /// Only a fast path; a concurrent `add` may still win right after this
    /// returns `false`.
    pub fn contains(&self, link: &str) -> bool {
        self.links
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(link)
    }

    pub fn len(&self) -> usize {
        self.links.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Sorted copy of the contents, for reporting.
    pub fn sorted(&self) -> Vec<Link> {
        let links = self.links.read().unwrap_or_else(PoisonError::into_inner);
        links.iter().cloned().collect::<BTreeSet<_>>().into_iter().collect()
    }
}

impl Serialize for LinkSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.sorted().serialize(serializer)
    }
}
