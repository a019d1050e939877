use fixed::types::I32F32;

/// Q32.32 fixed-point: 32 integer bits, 32 fractional bits.
pub type Fixed64 = I32F32;

/// Ticks are the atomic unit of simulation time.
pub type Ticks = u64;

/// Fixed tick rate of the host loop.
pub const TICKS_PER_SECOND: Ticks = 20;

pub const SECONDS_PER_DAY: Ticks = 24 * 60 * 60;

/// 1,728,000 ticks.
pub const TICKS_PER_DAY: Ticks = SECONDS_PER_DAY * TICKS_PER_SECOND;

/// Convert Fixed64 to f64. Use only for display and config export.
#[inline]
pub fn fixed64_to_f64(v: Fixed64) -> f64 {
    v.to_num::<f64>()
}

/// Convert an f64 to Fixed64, or `None` for NaN, infinities and values
/// outside the Q32.32 range. Configuration only, never in the sim loop.
#[inline]
pub fn checked_f64_to_fixed64(v: f64) -> Option<Fixed64> {
    if !v.is_finite() {
        return None;
    }
    Fixed64::checked_from_num(v)
}

/// Convert a configured per-day rate into a per-tick rate.
pub fn per_day_to_per_tick(per_day: f64) -> Option<Fixed64> {
    checked_f64_to_fixed64(per_day / TICKS_PER_DAY as f64)
}

/// Inverse of [`per_day_to_per_tick`], for exporting configuration.
pub fn per_tick_to_per_day(per_tick: Fixed64) -> f64 {
    fixed64_to_f64(per_tick) * TICKS_PER_DAY as f64
}

#[inline]
pub fn seconds_to_ticks(seconds: u32) -> Ticks {
    Ticks::from(seconds) * TICKS_PER_SECOND
}

/// Multiply a rate by a tick count, saturating at the Fixed64 range.
#[inline]
pub fn scale_by_ticks(rate: Fixed64, ticks: Ticks) -> Fixed64 {
    let ticks = i64::try_from(ticks).unwrap_or(i64::MAX);
    rate.saturating_mul_int(ticks)
}
