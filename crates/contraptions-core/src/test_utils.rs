//! Shared test helpers for integration tests and benchmarks.
//!
//! Gated behind `#[cfg(any(test, feature = "test-utils"))]` so these helpers
//! are available in unit tests, integration tests, and benchmarks (via the
//! `test-utils` feature).

use crate::config::{FactoryConfig, GeneratorConfig, RecipeConfig, SpecConfig};
use crate::fixed::Fixed64;
use crate::id::SpecId;
use crate::item::{ItemSet, SharedPool};
use crate::location::BlockLocation;
use crate::placement::{FeedbackSink, SoundType};
use crate::properties::ContraptionProperties;
use crate::world::MemoryWorld;
use std::sync::Arc;

// ===========================================================================
// Fixed-point helper
// ===========================================================================

pub fn fixed(v: f64) -> Fixed64 {
    Fixed64::from_num(v)
}

// ===========================================================================
// Items
// ===========================================================================

/// Build an [`ItemSet`] from `(kind, count)` pairs.
pub fn items(pairs: &[(&str, u32)]) -> ItemSet {
    pairs.iter().map(|&(kind, count)| (kind, count)).collect()
}

// ===========================================================================
// Sample specifications
// ===========================================================================

/// Config for a windmill: costs 4 iron blocks, burns coal for stock.
pub fn windmill_config() -> GeneratorConfig {
    let mut config = GeneratorConfig::with_cost(items(&[("IRON_BLOCK", 4)]));
    config.name = Some("windmill".to_string());
    config.materials = items(&[("COAL", 1)]);
    config
}

/// Config for a smelter: costs 8 stone, turns ore into ingots, and breaks
/// down by one point a second.
pub fn smelter_config() -> FactoryConfig {
    let mut config = FactoryConfig::with_recipe(
        items(&[("STONE", 8)]),
        RecipeConfig {
            inputs: items(&[("IRON_ORE", 1)]),
            outputs: items(&[("IRON_INGOT", 1)]),
        },
    );
    config.name = Some("smelter".to_string());
    config.repair_materials = items(&[("COAL", 1)]);
    config.repair_amount = 10.0;
    config.breakdown_rate = 86_400.0;
    config
}

pub fn windmill() -> Arc<ContraptionProperties> {
    properties("windmill", SpecConfig::Generator(windmill_config()))
}

pub fn smelter() -> Arc<ContraptionProperties> {
    properties("smelter", SpecConfig::Factory(smelter_config()))
}

/// Build shared properties, panicking on invalid config.
pub fn properties(id: &str, config: SpecConfig) -> Arc<ContraptionProperties> {
    match ContraptionProperties::from_config(SpecId::new(id), config) {
        Ok(props) => Arc::new(props),
        Err(err) => panic!("invalid test config '{id}': {err}"),
    }
}

// ===========================================================================
// World
// ===========================================================================

pub fn origin() -> BlockLocation {
    BlockLocation::new(0, 64, 0)
}

/// A world with a single chest at [`origin`] holding `contents`.
pub fn chest_world(contents: ItemSet) -> (MemoryWorld<ItemSet>, SharedPool<ItemSet>) {
    let mut world = MemoryWorld::new();
    let chest = world.set_container(origin(), "CHEST", contents);
    (world, chest)
}

// ===========================================================================
// Feedback
// ===========================================================================

/// A [`FeedbackSink`] that remembers every sound played.
#[derive(Debug, Default)]
pub struct RecordingFeedback {
    pub played: Vec<(SoundType, BlockLocation)>,
}

impl RecordingFeedback {
    pub fn new() -> Self {
        Self::default()
    }
}

impl FeedbackSink for RecordingFeedback {
    fn play(&mut self, sound: SoundType, location: BlockLocation) {
        self.played.push((sound, location));
    }
}
