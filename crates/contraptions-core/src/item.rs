//! Resources, multisets of resources, and the pool abstraction gadgets
//! operate on.
//!
//! Gadgets never see the host's inventory type directly. They work through
//! [`ResourcePool`], which [`ItemSet`] and [`Chest`] implement and which a
//! host can implement for its own containers. Pools shared with the host are
//! wrapped in a [`SharedPool`] so check-then-mutate sequences can hold a lock.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// A kind of resource, e.g. `"IRON_INGOT"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceKind(pub String);

impl ResourceKind {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ResourceKind {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

// ---------------------------------------------------------------------------
// ItemSet
// ---------------------------------------------------------------------------

/// A multiset of resources. Zero counts are never stored, so two sets with
/// the same contents always compare equal.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<ResourceKind, u32>", into = "BTreeMap<ResourceKind, u32>")]
pub struct ItemSet {
    counts: BTreeMap<ResourceKind, u32>,
}

impl ItemSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, kind: impl Into<ResourceKind>, quantity: u32) -> Self {
        self.insert(kind.into(), quantity);
        self
    }

    /// Add `quantity` of `kind`, saturating at `u32::MAX`.
    pub fn insert(&mut self, kind: ResourceKind, quantity: u32) {
        if quantity == 0 {
            return;
        }
        let entry = self.counts.entry(kind).or_insert(0);
        *entry = entry.saturating_add(quantity);
    }

    pub fn get(&self, kind: &ResourceKind) -> u32 {
        self.counts.get(kind).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ResourceKind, u32)> {
        self.counts.iter().map(|(k, &n)| (k, n))
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Number of distinct kinds.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Total item count across all kinds.
    pub fn total(&self) -> u32 {
        self.counts.values().fold(0u32, |acc, &n| acc.saturating_add(n))
    }
}

impl From<BTreeMap<ResourceKind, u32>> for ItemSet {
    fn from(map: BTreeMap<ResourceKind, u32>) -> Self {
        let mut set = ItemSet::new();
        for (kind, quantity) in map {
            set.insert(kind, quantity);
        }
        set
    }
}

impl From<ItemSet> for BTreeMap<ResourceKind, u32> {
    fn from(set: ItemSet) -> Self {
        set.counts
    }
}

impl<K: Into<ResourceKind>> FromIterator<(K, u32)> for ItemSet {
    fn from_iter<I: IntoIterator<Item = (K, u32)>>(iter: I) -> Self {
        let mut set = ItemSet::new();
        for (kind, quantity) in iter {
            set.insert(kind.into(), quantity);
        }
        set
    }
}

// ---------------------------------------------------------------------------
// ResourcePool
// ---------------------------------------------------------------------------

/// Anything gadgets can count, take from and put into.
pub trait ResourcePool {
    /// How many of `kind` the pool holds.
    fn count(&self, kind: &ResourceKind) -> u32;

    /// Remove up to `quantity` of `kind`. Returns the amount actually removed.
    fn remove(&mut self, kind: &ResourceKind, quantity: u32) -> u32;

    /// Add `quantity` of `kind`. Returns the amount that didn't fit.
    fn add(&mut self, kind: &ResourceKind, quantity: u32) -> u32;

    /// Free room for additional items. Unbounded unless overridden.
    fn space(&self) -> u32 {
        u32::MAX
    }

    /// True if every kind in `set` is present in at least the set's count.
    fn contains_all(&self, set: &ItemSet) -> bool {
        set.iter().all(|(kind, quantity)| self.count(kind) >= quantity)
    }
}

impl ResourcePool for ItemSet {
    fn count(&self, kind: &ResourceKind) -> u32 {
        self.get(kind)
    }

    fn remove(&mut self, kind: &ResourceKind, quantity: u32) -> u32 {
        let Some(held) = self.counts.get_mut(kind) else {
            return 0;
        };
        let removed = quantity.min(*held);
        *held -= removed;
        if *held == 0 {
            self.counts.remove(kind);
        }
        removed
    }

    fn add(&mut self, kind: &ResourceKind, quantity: u32) -> u32 {
        let held = self.get(kind);
        let to_add = quantity.min(u32::MAX - held);
        self.insert(kind.clone(), to_add);
        quantity - to_add
    }
}

// ---------------------------------------------------------------------------
// Chest
// ---------------------------------------------------------------------------

/// A stack of one resource kind inside a [`Chest`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemStack {
    pub kind: ResourceKind,
    pub quantity: u32,
}

/// Capacity-bounded container, the in-memory stand-in for a host's block
/// inventory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chest {
    pub stacks: Vec<ItemStack>,
    pub capacity: u32,
}

impl Chest {
    pub fn new(capacity: u32) -> Self {
        Self {
            stacks: Vec::new(),
            capacity,
        }
    }

    /// Total items across all kinds.
    pub fn total(&self) -> u32 {
        self.stacks.iter().map(|s| s.quantity).sum()
    }

    /// Snapshot of the contents as a multiset.
    pub fn contents(&self) -> ItemSet {
        self.stacks
            .iter()
            .map(|s| (s.kind.clone(), s.quantity))
            .collect()
    }
}

impl ResourcePool for Chest {
    fn count(&self, kind: &ResourceKind) -> u32 {
        self.stacks
            .iter()
            .find(|s| &s.kind == kind)
            .map(|s| s.quantity)
            .unwrap_or(0)
    }

    fn remove(&mut self, kind: &ResourceKind, quantity: u32) -> u32 {
        if let Some(stack) = self.stacks.iter_mut().find(|s| &s.kind == kind) {
            let to_remove = quantity.min(stack.quantity);
            stack.quantity -= to_remove;
            if stack.quantity == 0 {
                self.stacks.retain(|s| s.quantity > 0);
            }
            to_remove
        } else {
            0
        }
    }

    fn add(&mut self, kind: &ResourceKind, quantity: u32) -> u32 {
        let to_add = quantity.min(self.space());
        let overflow = quantity - to_add;

        if to_add > 0 {
            if let Some(stack) = self.stacks.iter_mut().find(|s| &s.kind == kind) {
                stack.quantity += to_add;
            } else {
                self.stacks.push(ItemStack {
                    kind: kind.clone(),
                    quantity: to_add,
                });
            }
        }

        overflow
    }

    fn space(&self) -> u32 {
        self.capacity.saturating_sub(self.total())
    }
}

// ---------------------------------------------------------------------------
// SharedPool
// ---------------------------------------------------------------------------

/// A pool shared between the host and the core. Every check-then-mutate
/// sequence against it runs under its lock.
#[derive(Debug, Default)]
pub struct SharedPool<P> {
    inner: Arc<Mutex<P>>,
}

impl<P> Clone for SharedPool<P> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<P> SharedPool<P> {
    pub fn new(pool: P) -> Self {
        Self {
            inner: Arc::new(Mutex::new(pool)),
        }
    }

    /// Lock the pool. A poisoned lock is recovered: pools are only mutated
    /// after a successful check, so their contents stay consistent.
    pub fn lock(&self) -> MutexGuard<'_, P> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Run `f` with exclusive access to the pool.
    pub fn with<R>(&self, f: impl FnOnce(&mut P) -> R) -> R {
        let mut guard = self.lock();
        f(&mut guard)
    }

    /// True if both handles refer to the same underlying pool.
    pub fn same_pool(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn iron() -> ResourceKind {
        ResourceKind::new("IRON_INGOT")
    }

    fn stone() -> ResourceKind {
        ResourceKind::new("STONE")
    }

    #[test]
    fn item_set_drops_zero_counts() {
        let set = ItemSet::new().with("IRON_INGOT", 0).with("STONE", 3);
        assert_eq!(set.len(), 1);
        assert_eq!(set, ItemSet::new().with("STONE", 3));
    }

    #[test]
    fn item_set_accumulates() {
        let set = ItemSet::new().with("STONE", 3).with("STONE", 4);
        assert_eq!(set.get(&stone()), 7);
        assert_eq!(set.total(), 7);
    }

    #[test]
    fn item_set_remove_more_than_held() {
        let mut set = ItemSet::new().with("IRON_INGOT", 5);
        assert_eq!(set.remove(&iron(), 10), 5);
        assert_eq!(set.get(&iron()), 0);
        assert!(set.is_empty());
    }

    #[test]
    fn item_set_deserializes_from_map() {
        let set: ItemSet = serde_json::from_str(r#"{"IRON_INGOT": 4, "STONE": 0}"#).unwrap();
        assert_eq!(set, ItemSet::new().with("IRON_INGOT", 4));
    }

    #[test]
    fn contains_all_checks_every_kind() {
        let pool = ItemSet::new().with("IRON_INGOT", 4).with("STONE", 1);
        assert!(pool.contains_all(&ItemSet::new().with("IRON_INGOT", 4)));
        assert!(!pool.contains_all(&ItemSet::new().with("IRON_INGOT", 4).with("STONE", 2)));
        assert!(pool.contains_all(&ItemSet::new()));
    }

    #[test]
    fn chest_add_and_remove() {
        let mut chest = Chest::new(100);
        assert_eq!(chest.add(&iron(), 50), 0);
        assert_eq!(chest.count(&iron()), 50);
        assert_eq!(chest.remove(&iron(), 30), 30);
        assert_eq!(chest.count(&iron()), 20);
    }

    #[test]
    fn chest_overflow() {
        let mut chest = Chest::new(10);
        assert_eq!(chest.add(&iron(), 15), 5);
        assert_eq!(chest.count(&iron()), 10);
        assert_eq!(chest.space(), 0);
    }

    #[test]
    fn chest_multiple_kinds() {
        let mut chest = Chest::new(100);
        let _ = chest.add(&iron(), 30);
        let _ = chest.add(&stone(), 20);
        assert_eq!(chest.total(), 50);
        assert_eq!(chest.space(), 50);
        assert_eq!(
            chest.contents(),
            ItemSet::new().with("IRON_INGOT", 30).with("STONE", 20)
        );
    }

    #[test]
    fn chest_remove_empties_stack() {
        let mut chest = Chest::new(100);
        let _ = chest.add(&iron(), 5);
        assert_eq!(chest.remove(&iron(), 5), 5);
        assert!(chest.stacks.is_empty());
        assert_eq!(chest.remove(&stone(), 1), 0);
    }

    #[test]
    fn shared_pool_handles_alias() {
        let pool = SharedPool::new(ItemSet::new());
        let alias = pool.clone();
        alias.with(|p| p.insert(iron(), 3));
        assert_eq!(pool.lock().get(&iron()), 3);
        assert!(pool.same_pool(&alias));
        assert!(!pool.same_pool(&SharedPool::new(ItemSet::new())));
    }
}
