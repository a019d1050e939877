//! Events emitted by the [`ContraptionManager`](crate::manager::ContraptionManager).
//!
//! Like the rest of the engine's events, these fire on *transitions* only:
//! a generator sitting at capacity reports `ReachedCapacity` once, not on
//! every update.

use crate::fixed::{Fixed64, Ticks};
use crate::id::{ContraptionId, SpecId};
use crate::location::Anchor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContraptionEvent {
    Created {
        contraption: ContraptionId,
        spec: SpecId,
        anchor: Anchor,
        tick: Ticks,
    },
    Removed {
        contraption: ContraptionId,
        tick: Ticks,
    },
    /// Quantity rose to its upper bound.
    ReachedCapacity {
        contraption: ContraptionId,
        tick: Ticks,
    },
    /// Quantity fell to its lower bound. For factories this means broken.
    Depleted {
        contraption: ContraptionId,
        tick: Ticks,
    },
    /// Materials were converted into quantity.
    Converted {
        contraption: ContraptionId,
        sets: u32,
        delta: Fixed64,
        tick: Ticks,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Created,
    Removed,
    ReachedCapacity,
    Depleted,
    Converted,
}

impl ContraptionEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            ContraptionEvent::Created { .. } => EventKind::Created,
            ContraptionEvent::Removed { .. } => EventKind::Removed,
            ContraptionEvent::ReachedCapacity { .. } => EventKind::ReachedCapacity,
            ContraptionEvent::Depleted { .. } => EventKind::Depleted,
            ContraptionEvent::Converted { .. } => EventKind::Converted,
        }
    }

    pub fn contraption(&self) -> ContraptionId {
        match self {
            ContraptionEvent::Created { contraption, .. }
            | ContraptionEvent::Removed { contraption, .. }
            | ContraptionEvent::ReachedCapacity { contraption, .. }
            | ContraptionEvent::Depleted { contraption, .. }
            | ContraptionEvent::Converted { contraption, .. } => *contraption,
        }
    }
}
