//! Timed suppression set: recently extinguished cells that are temporarily
//! ineligible for re-ignition.
//!
//! Eviction happens in one sweep per cycle rather than on access, because it
//! carries a client-visible side effect (clearing the lingering smoke cue)
//! that must fire exactly once per coordinate.

use dashmap::DashMap;
use glam::IVec3;

#[derive(Default)]
pub struct SuppressionSet {
    inner: DashMap<IVec3, u64>,
}

impl SuppressionSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert with the given expiry unless the coordinate is already
    /// suppressed; a repeat extinguish keeps the original expiry.
    pub fn insert_if_absent(&self, pos: IVec3, expiry: u64) {
        self.inner.entry(pos).or_insert(expiry);
    }

    #[must_use]
    pub fn contains(&self, pos: IVec3) -> bool {
        self.inner.contains_key(&pos)
    }

    #[must_use]
    pub fn expiry(&self, pos: IVec3) -> Option<u64> {
        self.inner.get(&pos).map(|e| *e)
    }

    pub fn remove(&self, pos: IVec3) {
        self.inner.remove(&pos);
    }

    /// Evict and return, in one pass, every entry whose expiry has passed or
    /// whose supporting cell below is gone. Each returned coordinate owes the
    /// caller exactly one "clear visual cue" side effect.
    pub fn sweep_expired(
        &self,
        now: u64,
        below_is_air: impl Fn(IVec3) -> bool,
    ) -> Vec<IVec3> {
        let mut evicted = Vec::new();
        self.inner.retain(|pos, expiry| {
            if *expiry < now || below_is_air(*pos) {
                evicted.push(*pos);
                false
            } else {
                true
            }
        });
        evicted
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
