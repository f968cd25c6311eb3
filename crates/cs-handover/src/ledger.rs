//! Step-scoped tower capacity ledger.

use cs_core::TowerId;

/// Counts the users admitted to each tower during one step.
///
/// Borrow the resolved per-tower capacities for the run, create one ledger
/// per step, and turn it into the step's load vector with
/// [`into_loads`][Self::into_loads] when the last user has been placed.
#[derive(Debug)]
pub struct CapacityLedger<'a> {
    capacity: &'a [u32],
    admitted: Vec<u32>,
}

impl<'a> CapacityLedger<'a> {
    /// A ledger with every tower at zero.
    pub fn new(capacity: &'a [u32]) -> Self {
        Self { capacity, admitted: vec![0; capacity.len()] }
    }

    #[inline]
    pub fn tower_count(&self) -> usize {
        self.capacity.len()
    }

    /// Whether one more user fits on `tower`.  Unknown towers never have room.
    #[inline]
    pub fn has_room(&self, tower: TowerId) -> bool {
        let i = tower.index();
        i < self.capacity.len() && self.admitted[i] < self.capacity[i]
    }

    /// Take a slot on `tower`.  Returns `false`, changing nothing, when the
    /// tower is full.
    #[inline]
    pub fn try_admit(&mut self, tower: TowerId) -> bool {
        if !self.has_room(tower) {
            return false;
        }
        self.admitted[tower.index()] += 1;
        true
    }

    /// Users admitted to `tower` so far this step.
    #[inline]
    pub fn load(&self, tower: TowerId) -> u32 {
        self.admitted.get(tower.index()).copied().unwrap_or(0)
    }

    #[inline]
    pub fn loads(&self) -> &[u32] {
        &self.admitted
    }

    /// Finish the step, yielding the per-tower load.
    pub fn into_loads(self) -> Vec<u32> {
        self.admitted
    }
}
