use super::MinMaxGadget;
use crate::fixed::Fixed64;
use crate::item::{ItemSet, ResourcePool};

/// Converts whole sets of input resources into a change of a tracked
/// quantity, `rate` per set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionGadget {
    inputs: ItemSet,
    rate: Fixed64,
}

/// What a [`ConversionGadget::convert`] call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Conversion {
    /// Whole input sets removed from the pool.
    pub sets: u32,
    /// Change to apply to the quantity: `sets * rate`, never past the bound.
    pub delta: Fixed64,
}

impl ConversionGadget {
    pub fn new(inputs: ItemSet, rate: Fixed64) -> Self {
        Self { inputs, rate }
    }

    pub fn inputs(&self) -> &ItemSet {
        &self.inputs
    }

    pub fn rate(&self) -> Fixed64 {
        self.rate
    }

    /// How many whole input sets `pool` could supply. Zero for an empty
    /// input set, which never converts.
    pub fn conversions_available<P: ResourcePool + ?Sized>(&self, pool: &P) -> u32 {
        self.inputs
            .iter()
            .map(|(kind, per_set)| pool.count(kind) / per_set)
            .min()
            .unwrap_or(0)
    }

    /// Convert as many sets as the pool supports, but only sets that fit
    /// whole between `quantity` and the bound `rate` pushes it towards. A
    /// set that would overshoot stays in the pool.
    pub fn convert<P: ResourcePool + ?Sized>(
        &self,
        pool: &mut P,
        quantity: Fixed64,
        bounds: &MinMaxGadget,
    ) -> Conversion {
        let available = self.conversions_available(pool);
        let headroom = bounds.headroom(quantity, self.rate);
        if available == 0 || headroom == Fixed64::ZERO {
            return Conversion::default();
        }

        let step = self.rate.saturating_abs();
        let needed = headroom
            .checked_div(step)
            .and_then(|sets| sets.checked_floor())
            .and_then(|sets| sets.checked_to_num::<u32>())
            .unwrap_or(u32::MAX);
        let sets = available.min(needed);
        if sets == 0 {
            return Conversion::default();
        }

        for (kind, per_set) in self.inputs.iter() {
            let removed = pool.remove(kind, per_set * sets);
            debug_assert_eq!(removed, per_set * sets);
        }

        let magnitude = step.saturating_mul_int(i64::from(sets));
        let delta = if self.rate < Fixed64::ZERO {
            -magnitude
        } else {
            magnitude
        };
        Conversion { sets, delta }
    }
}
