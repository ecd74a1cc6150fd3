use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Serialize, Serializer};

use super::link_set::{Link, LinkSet};

/// Which pages linked to which discovered links.
#[derive(Debug, Default)]
pub struct ReferenceMap {
    referrers: RwLock<HashMap<Link, HashSet<Link>>>,
}

impl ReferenceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Notes that `referrer` contains a link to `link`.
    pub fn record(&self, link: &str, referrer: &str) {
        let mut referrers = self
            .referrers
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        referrers
            .entry(link.to_string())
            .or_default()
            .insert(referrer.to_string());
    }

    /// Pages referencing `link`, sorted.
    pub fn referrers(&self, link: &str) -> Vec<Link> {
        let referrers = self
            .referrers
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        referrers
            .get(link)
            .map(|pages| pages.iter().cloned().collect::<BTreeSet<_>>().into_iter().collect())
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.referrers
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Serialize for ReferenceMap {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let referrers = self
            .referrers
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        let sorted: BTreeMap<&Link, BTreeSet<&Link>> = referrers
            .iter()
            .map(|(link, pages)| (link, pages.iter().collect()))
            .collect();
        sorted.serialize(serializer)
    }
}

/// Everything a crawl found, shared by all workers while it runs.
#[derive(Debug, Default, Serialize)]
pub struct CrawlResult {
    /// Every link a worker claimed for fetching. This is the dedup set.
    #[serde(skip)]
    pub seen: LinkSet,
    /// Links that were fetched successfully.
    pub visited: LinkSet,
    /// Links that failed to fetch, answered with a non-success status, or
    /// could not be parsed at all.
    pub broken: LinkSet,
    pub references: ReferenceMap,
}

impl CrawlResult {
    pub fn new() -> Self {
        Self::default()
    }
}

pub type CrawlResultRef = Arc<CrawlResult>;
