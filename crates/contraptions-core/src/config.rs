//! Typed configuration records for contraption specifications.
//!
//! Each specification is loaded once from one of these records. Optional
//! fields carry the documented defaults below; required fields have none and
//! a record missing them fails to deserialize. Semantic checks (bounds, sign
//! of rates, representable numbers) happen in
//! [`ContraptionProperties::from_config`](crate::properties::ContraptionProperties::from_config).
//!
//! | kind | key | default |
//! |---|---|---|
//! | both | `name` | spec id |
//! | both | `structure` | lone `CHEST` |
//! | generator | `generation_rate` (per day) | 10000 |
//! | generator | `degredation_rate` (per day) | 50 |
//! | generator | `capacity` | 500 |
//! | generator | `period` (seconds) | 600 |
//! | generator | `construction_cost` | required |
//! | generator | `materials` | empty |
//! | factory | `building_materials` | required |
//! | factory | `recipe` | required |
//! | factory | `repair_materials` | empty |
//! | factory | `repair_amount` | 1 |
//! | factory | `breakdown_rate` (per day) | 0 |
//! | factory | `max_repair` | 100 |

use crate::gadget::StructureGadget;
use crate::item::ItemSet;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// A specification that cannot be turned into properties. Fatal to that one
/// specification only.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("lower bound {min} exceeds upper bound {max}")]
    InvertedBounds { min: f64, max: f64 },
    #[error("field '{field}' is not a representable number: {value}")]
    InvalidNumber { field: &'static str, value: f64 },
    #[error("field '{field}' must not be negative, got {value}")]
    NegativeRate { field: &'static str, value: f64 },
    #[error("update period must be at least one second")]
    ZeroPeriod,
    #[error("recipe produces nothing")]
    EmptyRecipe,
    #[cfg(feature = "data-loader")]
    #[error("JSON parse error: {0}")]
    Json(String),
}

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A specification of either kind, tagged by `type`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SpecConfig {
    Factory(FactoryConfig),
    Generator(GeneratorConfig),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structure: Option<StructureGadget>,
    /// Units generated per day.
    #[serde(default = "default_generation_rate")]
    pub generation_rate: f64,
    /// Units lost per day. The key keeps its historical spelling.
    #[serde(default = "default_degredation_rate")]
    pub degredation_rate: f64,
    #[serde(default = "default_capacity")]
    pub capacity: f64,
    /// Seconds between updates.
    #[serde(default = "default_period")]
    pub period: u32,
    pub construction_cost: ItemSet,
    #[serde(default)]
    pub materials: ItemSet,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactoryConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub structure: Option<StructureGadget>,
    pub building_materials: ItemSet,
    pub recipe: RecipeConfig,
    #[serde(default)]
    pub repair_materials: ItemSet,
    #[serde(default = "default_repair_amount")]
    pub repair_amount: f64,
    /// Repair lost per day.
    #[serde(default)]
    pub breakdown_rate: f64,
    #[serde(default = "default_max_repair")]
    pub max_repair: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeConfig {
    #[serde(default)]
    pub inputs: ItemSet,
    pub outputs: ItemSet,
}

fn default_generation_rate() -> f64 {
    10_000.0
}

fn default_degredation_rate() -> f64 {
    50.0
}

fn default_capacity() -> f64 {
    500.0
}

fn default_period() -> u32 {
    600
}

fn default_repair_amount() -> f64 {
    1.0
}

fn default_max_repair() -> f64 {
    100.0
}

impl GeneratorConfig {
    /// A generator with every optional field at its default.
    pub fn with_cost(construction_cost: ItemSet) -> Self {
        Self {
            name: None,
            structure: None,
            generation_rate: default_generation_rate(),
            degredation_rate: default_degredation_rate(),
            capacity: default_capacity(),
            period: default_period(),
            construction_cost,
            materials: ItemSet::new(),
        }
    }
}

impl FactoryConfig {
    /// A factory with every optional field at its default.
    pub fn with_recipe(building_materials: ItemSet, recipe: RecipeConfig) -> Self {
        Self {
            name: None,
            structure: None,
            building_materials,
            recipe,
            repair_materials: ItemSet::new(),
            repair_amount: default_repair_amount(),
            breakdown_rate: 0.0,
            max_repair: default_max_repair(),
        }
    }
}

/// Parse a single JSON-encoded specification.
#[cfg(feature = "data-loader")]
pub fn spec_config_from_json(json: &str) -> Result<SpecConfig, ConfigError> {
    serde_json::from_str(json).map_err(|e| ConfigError::Json(e.to_string()))
}
