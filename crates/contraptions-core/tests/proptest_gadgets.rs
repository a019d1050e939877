//! Property-based tests for gadgets and contraption updates.
//!
//! Uses proptest to generate random pools, bounds and tick counts, then
//! verify the quantity and inventory invariants hold.

use contraptions_core::config::SpecConfig;
use contraptions_core::contraption::Contraption;
use contraptions_core::fixed::Fixed64;
use contraptions_core::gadget::{ConversionGadget, GrowGadget, MatchGadget, MinMaxGadget};
use contraptions_core::id::SpecId;
use contraptions_core::item::{ItemSet, ResourcePool};
use contraptions_core::location::Anchor;
use contraptions_core::properties::ContraptionProperties;
use contraptions_core::test_utils::*;
use proptest::prelude::*;

// ===========================================================================
// Generators
// ===========================================================================

const KINDS: [&str; 4] = ["COAL", "IRON_ORE", "STONE", "WHEAT"];

fn arb_items(max_count: u32) -> impl Strategy<Value = ItemSet> {
    proptest::collection::vec((0..KINDS.len(), 0..=max_count), 0..=KINDS.len())
        .prop_map(|entries| {
            let mut set = ItemSet::new();
            for (kind, count) in entries {
                set.insert(KINDS[kind].into(), count);
            }
            set
        })
}

fn arb_fixed(range: std::ops::RangeInclusive<i32>) -> impl Strategy<Value = Fixed64> {
    range.prop_map(Fixed64::from_num)
}

fn arb_bounds() -> impl Strategy<Value = MinMaxGadget> {
    (-1_000i32..=1_000, 0i32..=2_000).prop_map(|(min, span)| {
        MinMaxGadget::new(Fixed64::from_num(min), Fixed64::from_num(min + span))
            .expect("span is non-negative")
    })
}

// ===========================================================================
// Properties
// ===========================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// clamp lands inside the bounds and a second clamp changes nothing.
    #[test]
    fn clamp_is_bounded_and_idempotent(bounds in arb_bounds(), value in arb_fixed(-10_000..=10_000)) {
        let once = bounds.clamp(value);
        prop_assert!(bounds.contains(once));
        prop_assert_eq!(bounds.clamp(once), once);
        if bounds.contains(value) {
            prop_assert_eq!(once, value);
        }
    }

    /// clamp preserves order.
    #[test]
    fn clamp_is_monotonic(bounds in arb_bounds(), a in arb_fixed(-5_000..=5_000), b in arb_fixed(-5_000..=5_000)) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(bounds.clamp(lo) <= bounds.clamp(hi));
    }

    /// apply_ticks equals applying the rate tick by tick.
    #[test]
    fn grow_over_ticks_matches_repeated_apply(rate in -50i32..=50, start in arb_fixed(-1_000..=1_000), ticks in 0u64..64) {
        let grow = GrowGadget::new(Fixed64::from_num(rate));
        let mut stepwise = start;
        for _ in 0..ticks {
            stepwise = grow.apply(stepwise);
        }
        prop_assert_eq!(grow.apply_ticks(start, ticks), stepwise);
    }

    /// consume removes exactly the requirement, or leaves the pool untouched.
    #[test]
    fn consume_is_all_or_nothing(required in arb_items(8), pool in arb_items(16)) {
        let gadget = MatchGadget::new(required.clone());
        let mut after = pool.clone();
        let matched = gadget.consume(&mut after);

        prop_assert_eq!(matched, gadget.matches(&pool));
        for kind in KINDS {
            let kind = kind.into();
            let expected = if matched {
                pool.get(&kind) - required.get(&kind)
            } else {
                pool.get(&kind)
            };
            prop_assert_eq!(after.get(&kind), expected);
        }
    }

    /// Conversion never pushes the quantity past its bound, and removes
    /// whole input sets only.
    #[test]
    fn conversion_respects_bounds(
        inputs in arb_items(4),
        pool in arb_items(64),
        rate in prop_oneof![-20i32..=-1, 1i32..=20],
        bounds in arb_bounds(),
        start in arb_fixed(-1_000..=3_000),
    ) {
        let gadget = ConversionGadget::new(inputs.clone(), Fixed64::from_num(rate));
        let quantity = bounds.clamp(start);
        let mut after = pool.clone();
        let conversion = gadget.convert(&mut after, quantity, &bounds);

        prop_assert!(bounds.contains(quantity + conversion.delta));
        prop_assert!(conversion.sets <= gadget.conversions_available(&pool));
        // Every removed set is credited in full.
        prop_assert_eq!(
            conversion.delta.saturating_abs(),
            Fixed64::from_num(rate.unsigned_abs() * conversion.sets)
        );
        for (kind, per_set) in inputs.iter() {
            prop_assert_eq!(pool.get(kind) - after.get(kind), per_set * conversion.sets);
        }
    }

    /// A generator's stock stays in `[0, capacity]` whatever it is fed.
    #[test]
    fn generator_update_stays_in_bounds(
        capacity in 0u32..=1_000,
        start in 0u32..=1_000,
        coal in 0u32..=200,
        elapsed in 0u64..=5_000_000,
    ) {
        let mut config = windmill_config();
        config.capacity = f64::from(capacity);
        let props = properties("windmill", SpecConfig::Generator(config));
        let mut unit = Contraption::new(props, Anchor::at(origin()));
        unit.set_quantity(Fixed64::from_num(start));

        let mut pool = items(&[("COAL", coal)]);
        let outcome = unit.update(elapsed, Some(&mut pool));

        prop_assert!(outcome.after >= Fixed64::ZERO);
        prop_assert!(outcome.after <= Fixed64::from_num(capacity));
        prop_assert_eq!(coal - pool.count(&"COAL".into()), outcome.conversion.sets);
    }

    /// to_config then from_config gives back equal properties.
    #[test]
    fn properties_config_round_trip(
        generation in 0u32..=100_000,
        degradation in 0u32..=100_000,
        capacity in 0u32..=100_000,
        period in 1u32..=86_400,
        breakdown in 0u32..=100_000,
        max_repair in 0u32..=10_000,
    ) {
        let mut generator = windmill_config();
        generator.generation_rate = f64::from(generation);
        generator.degredation_rate = f64::from(degradation);
        generator.capacity = f64::from(capacity);
        generator.period = period;

        let mut factory = smelter_config();
        factory.breakdown_rate = f64::from(breakdown);
        factory.max_repair = f64::from(max_repair);

        for config in [SpecConfig::Generator(generator), SpecConfig::Factory(factory)] {
            let props = ContraptionProperties::from_config(SpecId::new("spec"), config).unwrap();
            let again = ContraptionProperties::from_config(SpecId::new("spec"), props.to_config()).unwrap();
            prop_assert_eq!(again, props);
        }
    }
}
