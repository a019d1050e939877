use crate::item::{ItemSet, ResourcePool};

/// A recipe: inputs consumed and outputs produced, with no notion of time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductionGadget {
    inputs: ItemSet,
    outputs: ItemSet,
}

impl ProductionGadget {
    pub fn new(inputs: ItemSet, outputs: ItemSet) -> Self {
        Self { inputs, outputs }
    }

    pub fn inputs(&self) -> &ItemSet {
        &self.inputs
    }

    pub fn outputs(&self) -> &ItemSet {
        &self.outputs
    }

    /// Inputs are present and the pool can hold the outputs once the inputs
    /// are gone.
    pub fn can_produce<P: ResourcePool + ?Sized>(&self, pool: &P) -> bool {
        pool.contains_all(&self.inputs)
            && self.outputs.total() <= pool.space().saturating_add(self.inputs.total())
    }

    /// Run the recipe once. Returns the produced outputs, or `None` without
    /// touching the pool when [`can_produce`](Self::can_produce) is false.
    pub fn produce<P: ResourcePool + ?Sized>(&self, pool: &mut P) -> Option<ItemSet> {
        if !self.can_produce(pool) {
            return None;
        }
        for (kind, quantity) in self.inputs.iter() {
            let removed = pool.remove(kind, quantity);
            debug_assert_eq!(removed, quantity);
        }
        for (kind, quantity) in self.outputs.iter() {
            let overflow = pool.add(kind, quantity);
            debug_assert_eq!(overflow, 0, "pool overflowed after space check");
        }
        Some(self.outputs.clone())
    }
}
