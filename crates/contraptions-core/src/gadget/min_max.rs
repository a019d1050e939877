use crate::config::ConfigError;
use crate::fixed::{Fixed64, fixed64_to_f64};

/// A closed interval `[min, max]` that every tracked quantity is clamped
/// into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinMaxGadget {
    min: Fixed64,
    max: Fixed64,
}

impl MinMaxGadget {
    /// Fails with [`ConfigError::InvertedBounds`] if `min > max`.
    pub fn new(min: Fixed64, max: Fixed64) -> Result<Self, ConfigError> {
        if min > max {
            return Err(ConfigError::InvertedBounds {
                min: fixed64_to_f64(min),
                max: fixed64_to_f64(max),
            });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> Fixed64 {
        self.min
    }

    pub fn max(&self) -> Fixed64 {
        self.max
    }

    /// Clamp `value` into `[min, max]`. Total, monotonic and idempotent.
    #[inline]
    pub fn clamp(&self, value: Fixed64) -> Fixed64 {
        value.clamp(self.min, self.max)
    }

    pub fn contains(&self, value: Fixed64) -> bool {
        self.min <= value && value <= self.max
    }

    /// Distance from `value` to the bound `rate` moves it towards. Zero when
    /// `rate` is zero or `value` already sits on that bound.
    pub fn headroom(&self, value: Fixed64, rate: Fixed64) -> Fixed64 {
        let room = if rate > Fixed64::ZERO {
            self.max.saturating_sub(value)
        } else if rate < Fixed64::ZERO {
            value.saturating_sub(self.min)
        } else {
            Fixed64::ZERO
        };
        room.max(Fixed64::ZERO)
    }
}
