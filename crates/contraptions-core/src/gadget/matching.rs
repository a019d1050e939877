use crate::item::{ItemSet, ResourcePool, SharedPool};

/// Tests a pool against a required multiset and removes it atomically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchGadget {
    required: ItemSet,
}

impl MatchGadget {
    pub fn new(required: ItemSet) -> Self {
        Self { required }
    }

    pub fn required(&self) -> &ItemSet {
        &self.required
    }

    /// True iff `pool` holds at least the required count of every kind.
    pub fn matches<P: ResourcePool + ?Sized>(&self, pool: &P) -> bool {
        pool.contains_all(&self.required)
    }

    /// Remove exactly the required multiset, or nothing.
    ///
    /// The check and the removal happen under the same `&mut` borrow, so no
    /// other caller can observe or mutate the pool in between.
    pub fn consume<P: ResourcePool + ?Sized>(&self, pool: &mut P) -> bool {
        if !self.matches(pool) {
            return false;
        }
        for (kind, quantity) in self.required.iter() {
            let removed = pool.remove(kind, quantity);
            debug_assert_eq!(removed, quantity, "pool lost {kind} between check and removal");
        }
        true
    }

    /// [`consume`](Self::consume) against a shared pool, holding its lock
    /// from the check until the removal finishes.
    pub fn consume_locked<P: ResourcePool>(&self, pool: &SharedPool<P>) -> bool {
        let mut guard = pool.lock();
        self.consume(&mut *guard)
    }
}
