//! The world as the core sees it, plus an in-memory implementation for
//! headless hosts and tests.

use crate::item::{ResourcePool, SharedPool};
use crate::location::{BlockKind, BlockLocation, BlockView};
use std::collections::HashMap;

/// Blocks and the inventories attached to them.
pub trait WorldView: BlockView {
    type Pool: ResourcePool;

    /// The inventory held by the block at `location`, if it has one.
    fn inventory_at(&self, location: BlockLocation) -> Option<SharedPool<Self::Pool>>;
}

/// A world held entirely in memory.
#[derive(Debug)]
pub struct MemoryWorld<P> {
    blocks: HashMap<BlockLocation, BlockKind>,
    inventories: HashMap<BlockLocation, SharedPool<P>>,
}

impl<P> Default for MemoryWorld<P> {
    fn default() -> Self {
        Self {
            blocks: HashMap::new(),
            inventories: HashMap::new(),
        }
    }
}

impl<P> MemoryWorld<P> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_block(&mut self, location: BlockLocation, block: impl Into<BlockKind>) {
        self.blocks.insert(location, block.into());
    }

    /// Place a block that holds an inventory. Returns the shared handle.
    pub fn set_container(
        &mut self,
        location: BlockLocation,
        block: impl Into<BlockKind>,
        pool: P,
    ) -> SharedPool<P> {
        self.set_block(location, block);
        let shared = SharedPool::new(pool);
        self.inventories.insert(location, shared.clone());
        shared
    }

    pub fn remove_block(&mut self, location: BlockLocation) {
        self.blocks.remove(&location);
        self.inventories.remove(&location);
    }
}

impl<P> BlockView for MemoryWorld<P> {
    fn block_at(&self, location: BlockLocation) -> Option<BlockKind> {
        self.blocks.get(&location).cloned()
    }
}

impl<P: ResourcePool> WorldView for MemoryWorld<P> {
    type Pool = P;

    fn inventory_at(&self, location: BlockLocation) -> Option<SharedPool<P>> {
        self.inventories.get(&location).cloned()
    }
}
