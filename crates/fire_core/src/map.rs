//! Active fire map: the authoritative set of currently-burning cells.
//!
//! Backed by a concurrent map so request entry points may add/remove/query
//! while the tick iterates a point-in-time snapshot. The tick is the only
//! writer that iterates; other threads touch single coordinates.

use crate::block::BlockState;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use glam::IVec3;

#[derive(Default)]
pub struct FireMap {
    inner: DashMap<IVec3, BlockState>,
}

impl FireMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert if absent. Returns false (and leaves the map untouched) when an
    /// entry already exists: at most one entry per coordinate, ever.
    pub fn try_add(&self, pos: IVec3, state: BlockState) -> bool {
        match self.inner.entry(pos) {
            Entry::Occupied(_) => false,
            Entry::Vacant(e) => {
                e.insert(state);
                true
            }
        }
    }

    pub fn remove(&self, pos: IVec3) -> Option<BlockState> {
        self.inner.remove(&pos).map(|(_, state)| state)
    }

    #[must_use]
    pub fn contains(&self, pos: IVec3) -> bool {
        self.inner.contains_key(&pos)
    }

    /// Replace the stored snapshot for a burning cell.
    pub fn update(&self, pos: IVec3, state: BlockState) {
        self.inner.insert(pos, state);
    }

    /// Point-in-time copy, safe to iterate while concurrent mutation proceeds.
    /// Iteration order across coordinates is unspecified.
    #[must_use]
    pub fn snapshot(&self) -> Vec<(IVec3, BlockState)> {
        self.inner
            .iter()
            .map(|r| (*r.key(), r.value().clone()))
            .collect()
    }

    #[must_use]
    pub fn positions(&self) -> Vec<IVec3> {
        self.inner.iter().map(|r| *r.key()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn clear(&self) {
        self.inner.clear();
    }
}
