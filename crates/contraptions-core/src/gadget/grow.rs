use crate::fixed::{Fixed64, Ticks, scale_by_ticks};

/// Adds a fixed rate to a quantity every tick. Negative rates model decay.
///
/// Growth has no bounds of its own; callers clamp the result through a
/// [`MinMaxGadget`](super::MinMaxGadget) before committing it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GrowGadget {
    rate_per_tick: Fixed64,
}

impl GrowGadget {
    pub fn new(rate_per_tick: Fixed64) -> Self {
        Self { rate_per_tick }
    }

    pub fn rate_per_tick(&self) -> Fixed64 {
        self.rate_per_tick
    }

    /// One tick of growth.
    #[inline]
    pub fn apply(&self, quantity: Fixed64) -> Fixed64 {
        quantity.saturating_add(self.rate_per_tick)
    }

    /// `ticks` ticks of growth in one step, with no clamping in between.
    #[inline]
    pub fn apply_ticks(&self, quantity: Fixed64, ticks: Ticks) -> Fixed64 {
        quantity.saturating_add(scale_by_ticks(self.rate_per_tick, ticks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gadget::MinMaxGadget;

    fn fixed(v: f64) -> Fixed64 {
        Fixed64::from_num(v)
    }

    #[test]
    fn apply_adds_rate() {
        let grow = GrowGadget::new(fixed(1.25));
        assert_eq!(grow.apply(fixed(2.0)), fixed(3.25));
    }

    #[test]
    fn negative_rate_decays() {
        let decay = GrowGadget::new(fixed(-0.5));
        assert_eq!(decay.apply(fixed(2.0)), fixed(1.5));
    }

    #[test]
    fn apply_ticks_matches_repeated_apply() {
        let grow = GrowGadget::new(fixed(0.75));
        let mut q = fixed(10.0);
        for _ in 0..8 {
            q = grow.apply(q);
        }
        assert_eq!(grow.apply_ticks(fixed(10.0), 8), q);
    }

    #[test]
    fn zero_ticks_is_identity() {
        let grow = GrowGadget::new(fixed(3.0));
        assert_eq!(grow.apply_ticks(fixed(4.0), 0), fixed(4.0));
    }

    #[test]
    fn saturates_instead_of_overflowing() {
        let grow = GrowGadget::new(fixed(1.0));
        assert_eq!(grow.apply(Fixed64::MAX), Fixed64::MAX);
    }

    #[test]
    fn clamping_between_applications_does_not_commute() {
        let grow = GrowGadget::new(fixed(3.0));
        let double = GrowGadget::new(fixed(6.0));
        let bounds = MinMaxGadget::new(fixed(0.0), fixed(10.0)).unwrap();

        // Unclamped, two steps of r equal one step of 2r.
        assert_eq!(grow.apply(grow.apply(fixed(1.0))), double.apply(fixed(1.0)));

        // Clamped in between, they diverge once a bound is hit.
        let stepwise = bounds.clamp(grow.apply(bounds.clamp(grow.apply(fixed(-4.0)))));
        let once = bounds.clamp(double.apply(fixed(-4.0)));
        assert_eq!(stepwise, fixed(3.0));
        assert_eq!(once, fixed(2.0));
    }
}
