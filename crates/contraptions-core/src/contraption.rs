//! Live contraption instances and the per-instance update step.

use crate::fixed::{Fixed64, Ticks};
use crate::gadget::Conversion;
use crate::item::{ItemSet, ResourcePool};
use crate::location::Anchor;
use crate::properties::{ContraptionKind, ContraptionProperties};
use std::sync::Arc;

/// A contraption placed in the world.
///
/// All mutable state lives here; all rules live on the shared
/// [`ContraptionProperties`]. The quantity is a repair level for factories
/// and stored output for generators, and always sits inside the
/// specification's [`MinMaxGadget`](crate::gadget::MinMaxGadget) bounds.
#[derive(Debug, Clone)]
pub struct Contraption {
    properties: Arc<ContraptionProperties>,
    anchor: Anchor,
    quantity: Fixed64,
    created_at: Ticks,
    last_update: Ticks,
}

/// Result of one [`Contraption::update`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateOutcome {
    pub before: Fixed64,
    pub after: Fixed64,
    pub conversion: Conversion,
}

impl Contraption {
    pub fn new(properties: Arc<ContraptionProperties>, anchor: Anchor) -> Self {
        let quantity = properties.initial_quantity();
        Self {
            properties,
            anchor,
            quantity,
            created_at: 0,
            last_update: 0,
        }
    }

    pub fn properties(&self) -> &Arc<ContraptionProperties> {
        &self.properties
    }

    pub fn anchor(&self) -> &Anchor {
        &self.anchor
    }

    pub fn name(&self) -> &str {
        self.properties.name()
    }

    pub fn kind(&self) -> ContraptionKind {
        self.properties.kind()
    }

    pub fn quantity(&self) -> Fixed64 {
        self.quantity
    }

    pub fn created_at(&self) -> Ticks {
        self.created_at
    }

    pub fn last_update(&self) -> Ticks {
        self.last_update
    }

    /// Overwrite the quantity, e.g. when the host restores saved state.
    /// The value is clamped into bounds.
    pub fn set_quantity(&mut self, quantity: Fixed64) {
        self.quantity = self.properties.min_max_gadget().clamp(quantity);
    }

    /// Quantity is at the upper bound.
    pub fn is_full(&self) -> bool {
        self.quantity == self.properties.min_max_gadget().max()
    }

    /// Quantity is at the lower bound. A factory in this state is broken
    /// and refuses to produce.
    pub fn is_depleted(&self) -> bool {
        self.quantity == self.properties.min_max_gadget().min()
    }

    /// Whether `now` is at least one update interval past the last update.
    pub fn is_due(&self, now: Ticks) -> bool {
        now.saturating_sub(self.last_update) >= self.properties.update_interval()
    }

    pub(crate) fn stamp(&mut self, tick: Ticks) {
        self.created_at = tick;
        self.last_update = tick;
    }

    pub(crate) fn mark_updated(&mut self, tick: Ticks) {
        self.last_update = tick;
    }

    /// Advance the quantity by `elapsed` ticks, converting materials from
    /// `pool` when one is attached.
    ///
    /// Factories: breakdown, clamp, repair conversion, clamp.
    /// Generators: generation, clamp, degradation, clamp, material
    /// conversion, clamp. Because of the intermediate clamp a generator
    /// sitting at capacity ends the update at `capacity - degradation`.
    pub fn update<P: ResourcePool + ?Sized>(&mut self, elapsed: Ticks, pool: Option<&mut P>) -> UpdateOutcome {
        let before = self.quantity;
        let properties = Arc::clone(&self.properties);
        let bounds = properties.min_max_gadget();

        let mut quantity = before;
        match properties.as_ref() {
            ContraptionProperties::Factory(factory) => {
                quantity = bounds.clamp(factory.grow_gadget().apply_ticks(quantity, elapsed));
            }
            ContraptionProperties::Generator(generator) => {
                quantity = bounds.clamp(generator.generation_gadget().apply_ticks(quantity, elapsed));
                quantity = bounds.clamp(generator.degradation_gadget().apply_ticks(quantity, elapsed));
            }
        }

        let conversion = match pool {
            Some(pool) => properties.conversion_gadget().convert(pool, quantity, bounds),
            None => Conversion::default(),
        };
        quantity = bounds.clamp(quantity.saturating_add(conversion.delta));

        debug_assert!(bounds.contains(quantity), "quantity {quantity} escaped its bounds");
        self.quantity = quantity;
        UpdateOutcome {
            before,
            after: quantity,
            conversion,
        }
    }

    /// Take up to `amount` of stored quantity out. Returns what was taken.
    pub fn withdraw(&mut self, amount: Fixed64) -> Fixed64 {
        let bounds = self.properties.min_max_gadget();
        let available = self.quantity.saturating_sub(bounds.min()).max(Fixed64::ZERO);
        let taken = amount.max(Fixed64::ZERO).min(available);
        self.quantity = bounds.clamp(self.quantity - taken);
        taken
    }

    /// Run a factory's recipe once against `pool`. `None` for generators,
    /// for broken factories, and when the recipe cannot run.
    pub fn run_production<P: ResourcePool + ?Sized>(&mut self, pool: &mut P) -> Option<ItemSet> {
        match self.properties.as_ref() {
            ContraptionProperties::Factory(factory) if !self.is_depleted() => {
                factory.production_gadget().produce(pool)
            }
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FactoryConfig, GeneratorConfig, RecipeConfig, SpecConfig};
    use crate::fixed::{TICKS_PER_DAY, fixed64_to_f64};
    use crate::id::SpecId;
    use crate::location::BlockLocation;

    fn generator(capacity: f64) -> Arc<ContraptionProperties> {
        let mut config = GeneratorConfig::with_cost(ItemSet::new());
        config.capacity = capacity;
        config.materials = ItemSet::new().with("COAL", 1);
        Arc::new(ContraptionProperties::from_config(SpecId::new("gen"), SpecConfig::Generator(config)).unwrap())
    }

    fn factory() -> Arc<ContraptionProperties> {
        let mut config = FactoryConfig::with_recipe(
            ItemSet::new(),
            RecipeConfig {
                inputs: ItemSet::new().with("IRON_ORE", 1),
                outputs: ItemSet::new().with("IRON_INGOT", 1),
            },
        );
        config.max_repair = 10.0;
        // One unit of repair lost per tick.
        config.breakdown_rate = TICKS_PER_DAY as f64;
        config.repair_materials = ItemSet::new().with("COAL", 1);
        config.repair_amount = 4.0;
        Arc::new(ContraptionProperties::from_config(SpecId::new("smelter"), SpecConfig::Factory(config)).unwrap())
    }

    fn anchor() -> Anchor {
        Anchor::at(BlockLocation::new(0, 64, 0))
    }

    #[test]
    fn generator_one_tick_grows_by_net_rate() {
        let mut unit = Contraption::new(generator(500.0), anchor());
        let outcome = unit.update::<ItemSet>(1, None);
        let expected = (10_000.0 - 50.0) / TICKS_PER_DAY as f64;
        assert!((fixed64_to_f64(outcome.after) - expected).abs() < 1e-8);
        assert_eq!(outcome.before, Fixed64::ZERO);
    }

    #[test]
    fn generator_clamps_at_capacity_then_degrades() {
        let mut unit = Contraption::new(generator(500.0), anchor());
        unit.set_quantity(Fixed64::from_num(500));
        unit.update::<ItemSet>(TICKS_PER_DAY, None);
        // Generation saturates at 500, then a full day of degradation applies.
        let q = fixed64_to_f64(unit.quantity());
        assert!((q - 450.0).abs() < 1e-3, "got {q}");
    }

    #[test]
    fn generator_converts_materials_up_to_capacity() {
        let mut unit = Contraption::new(generator(10.0), anchor());
        let mut pool = ItemSet::new().with("COAL", 64);
        let outcome = unit.update(0, Some(&mut pool));
        assert_eq!(outcome.conversion.sets, 10);
        assert_eq!(unit.quantity(), Fixed64::from_num(10));
        assert_eq!(pool.get(&"COAL".into()), 54);
        assert!(unit.is_full());
    }

    #[test]
    fn factory_breaks_down_and_repairs() {
        let mut f = Contraption::new(factory(), anchor());
        assert_eq!(f.quantity(), Fixed64::from_num(10));

        f.update::<ItemSet>(25, None);
        assert!(f.is_depleted());

        let mut pool = ItemSet::new().with("COAL", 1);
        f.update(0, Some(&mut pool));
        assert_eq!(f.quantity(), Fixed64::from_num(4));
        assert!(pool.is_empty());
    }

    #[test]
    fn broken_factory_does_not_produce() {
        let mut f = Contraption::new(factory(), anchor());
        let mut pool = ItemSet::new().with("IRON_ORE", 2);
        assert_eq!(f.run_production(&mut pool), Some(ItemSet::new().with("IRON_INGOT", 1)));

        f.set_quantity(Fixed64::ZERO);
        assert_eq!(f.run_production(&mut pool), None);
        assert_eq!(pool.get(&"IRON_ORE".into()), 1);
    }

    #[test]
    fn generators_do_not_produce() {
        let mut unit = Contraption::new(generator(500.0), anchor());
        let mut pool = ItemSet::new().with("IRON_ORE", 2);
        assert_eq!(unit.run_production(&mut pool), None);
    }

    #[test]
    fn withdraw_is_bounded_by_stock() {
        let mut unit = Contraption::new(generator(500.0), anchor());
        unit.set_quantity(Fixed64::from_num(30));
        assert_eq!(unit.withdraw(Fixed64::from_num(12)), Fixed64::from_num(12));
        assert_eq!(unit.withdraw(Fixed64::from_num(100)), Fixed64::from_num(18));
        assert_eq!(unit.quantity(), Fixed64::ZERO);
        assert_eq!(unit.withdraw(Fixed64::from_num(-5)), Fixed64::ZERO);
    }

    #[test]
    fn set_quantity_clamps() {
        let mut unit = Contraption::new(generator(500.0), anchor());
        unit.set_quantity(Fixed64::from_num(9_000));
        assert_eq!(unit.quantity(), Fixed64::from_num(500));
    }

    #[test]
    fn due_after_interval() {
        let mut unit = Contraption::new(generator(500.0), anchor());
        unit.stamp(100);
        assert!(!unit.is_due(100 + 11_999));
        assert!(unit.is_due(100 + 12_000));
    }
}
