//! In-memory database of NEOs and close approaches.
//!
//! `NeoDatabase` owns both master lists and the designation index, and is
//! the only place linkage happens. Key invariants:
//! - entities are constructed once from loader output and never mutated
//!   after construction (the one-time population of `approaches` aside)
//! - the designation index is the sole index; lookups by designation are O(1)
//! - `query` is a pure read-side scan in original load order
//! - orphan approaches (unresolvable designation) stay in the master list
//!   with `neo = None` and are excluded from `query`, so nothing downstream
//!   ever dereferences an unlinked approach

use rustc_hash::FxHashMap;

use crate::filter::Filter;
use crate::neo::{ApproachId, CloseApproach, NearEarthObject, NeoId};

/// Owns the full entity set and answers lookups and filtered scans.
#[derive(Debug, Clone, Default)]
pub struct NeoDatabase {
    neos: Vec<NearEarthObject>,
    approaches: Vec<CloseApproach>,
    by_designation: FxHashMap<String, NeoId>,
    orphan_count: usize,
}

impl NeoDatabase {
    /// Build the database from independently loaded, unlinked collections.
    ///
    /// Links every approach whose designation resolves against the index:
    /// sets its `neo` reference and appends it to the owner's `approaches`,
    /// preserving supply order. On a duplicate designation the first NEO
    /// wins (well-formed data has none).
    pub fn new(mut neos: Vec<NearEarthObject>, mut approaches: Vec<CloseApproach>) -> Self {
        let mut by_designation =
            FxHashMap::with_capacity_and_hasher(neos.len(), Default::default());
        for (i, neo) in neos.iter().enumerate() {
            by_designation
                .entry(neo.designation.clone())
                .or_insert(NeoId(i));
        }

        let mut orphan_count = 0;
        for (i, approach) in approaches.iter_mut().enumerate() {
            match by_designation.get(&approach.designation) {
                Some(&id) => {
                    approach.neo = Some(id);
                    neos[id.0].approaches.push(ApproachId(i));
                }
                None => orphan_count += 1,
            }
        }

        Self {
            neos,
            approaches,
            by_designation,
            orphan_count,
        }
    }

    pub fn neos(&self) -> &[NearEarthObject] {
        &self.neos
    }

    pub fn approaches(&self) -> &[CloseApproach] {
        &self.approaches
    }

    pub fn neo(&self, id: NeoId) -> &NearEarthObject {
        &self.neos[id.0]
    }

    pub fn approach(&self, id: ApproachId) -> &CloseApproach {
        &self.approaches[id.0]
    }

    /// Number of approaches whose designation matched no loaded NEO.
    pub fn orphan_count(&self) -> usize {
        self.orphan_count
    }

    /// The NEO an approach links to, if linkage resolved.
    pub fn neo_of(&self, approach: &CloseApproach) -> Option<&NearEarthObject> {
        approach.neo.map(|id| &self.neos[id.0])
    }

    /// Exact, case-sensitive primary-key lookup. O(1).
    pub fn get_neo_by_designation(&self, designation: &str) -> Option<&NearEarthObject> {
        self.by_designation
            .get(designation)
            .map(|&id| &self.neos[id.0])
    }

    /// Lookup by IAU name. Linear scan; on a (not expected) collision the
    /// first match in insertion order wins.
    pub fn get_neo_by_name(&self, name: &str) -> Option<&NearEarthObject> {
        self.neos.iter().find(|neo| neo.name.as_deref() == Some(name))
    }

    /// Lazily scan the master approach list in load order, yielding every
    /// linked approach that satisfies all `filters` (conjunction). Orphans
    /// are skipped. No predicate mutates state, so the scan observes a
    /// stable snapshot.
    pub fn query<'a>(
        &'a self,
        filters: &'a [Filter],
    ) -> impl Iterator<Item = &'a CloseApproach> + 'a {
        self.approaches.iter().filter(move |approach| {
            match self.neo_of(approach) {
                Some(neo) => filters.iter().all(|f| f.matches(approach, neo)),
                None => false,
            }
        })
    }
}
