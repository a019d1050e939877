//! Contraptions Core -- placeable machines assembled from gadgets.
//!
//! A contraption is a factory or a generator that players build in the
//! world. Each kind is described once by an immutable
//! [`properties::ContraptionProperties`], which is composed from small
//! reusable capabilities ("gadgets"): bounds, growth, material matching,
//! conversion, production, and structure checks. Live
//! [`contraption::Contraption`]s share their properties through an `Arc`
//! and hold only their mutable state.
//!
//! # Lifecycle
//!
//! 1. **Configure** -- parse a [`config::SpecConfig`] and build properties
//!    with [`properties::ContraptionProperties::from_config`].
//! 2. **Place** -- [`placement::create_contraption`] checks the block and
//!    structure, consumes the construction cost, registers the contraption,
//!    and plays creation feedback.
//! 3. **Tick** -- [`manager::ContraptionManager::step`] updates due
//!    contraptions and reports transitions as
//!    [`event::ContraptionEvent`]s.
//!
//! # Key Types
//!
//! - [`gadget`] -- The capability building blocks.
//! - [`item::ResourcePool`] -- Anything that holds countable resources.
//! - [`item::SharedPool`] -- A pool shared with the host behind a lock.
//! - [`world::WorldView`] -- Blocks and inventories, as the host sees them.
//! - [`fixed::Fixed64`] -- Q32.32 fixed-point type for deterministic math.

pub mod config;
pub mod contraption;
pub mod event;
pub mod fixed;
pub mod gadget;
pub mod id;
pub mod item;
pub mod location;
pub mod manager;
pub mod placement;
pub mod properties;
pub mod world;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
