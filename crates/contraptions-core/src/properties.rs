//! Contraption specifications: immutable templates composed of gadgets.
//!
//! A specification is loaded once from a [`SpecConfig`] and then shared
//! read-only, behind an `Arc`, by every contraption built from it. The kinds
//! form a closed enum; code that needs kind-specific behaviour matches on
//! [`ContraptionProperties`] rather than calling through a trait object.

use crate::config::{ConfigError, FactoryConfig, GeneratorConfig, RecipeConfig, SpecConfig};
use crate::fixed::{
    Fixed64, Ticks, checked_f64_to_fixed64, fixed64_to_f64, per_day_to_per_tick,
    per_tick_to_per_day, seconds_to_ticks,
};
use crate::gadget::{
    ConversionGadget, GrowGadget, MatchGadget, MinMaxGadget, ProductionGadget, StructureGadget,
    TerritoryGadget,
};
use crate::id::SpecId;
use std::fmt;

// ---------------------------------------------------------------------------
// Kind tag
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContraptionKind {
    Factory,
    Generator,
}

impl ContraptionKind {
    /// Tag used by the surrounding registry for dispatch and persistence.
    pub fn tag(self) -> &'static str {
        match self {
            ContraptionKind::Factory => "factory",
            ContraptionKind::Generator => "generator",
        }
    }
}

impl fmt::Display for ContraptionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

// ---------------------------------------------------------------------------
// Shared header
// ---------------------------------------------------------------------------

/// Identity and placement requirements common to every kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecHeader {
    id: SpecId,
    name: String,
    structure: StructureGadget,
}

impl SpecHeader {
    /// `name` defaults to the id, `structure` to a lone chest.
    pub fn new(id: SpecId, name: Option<String>, structure: Option<StructureGadget>) -> Self {
        let name = name.unwrap_or_else(|| id.0.clone());
        Self {
            id,
            name,
            structure: structure.unwrap_or_default(),
        }
    }

    pub fn id(&self) -> &SpecId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn structure(&self) -> &StructureGadget {
        &self.structure
    }
}

// ---------------------------------------------------------------------------
// Factory
// ---------------------------------------------------------------------------

/// A factory runs its recipe while its repair level is above the floor.
/// Repair decays by `grow_gadget` every tick and is restored by converting
/// repair materials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactoryProperties {
    header: SpecHeader,
    match_gadget: MatchGadget,
    production_gadget: ProductionGadget,
    conversion_gadget: ConversionGadget,
    grow_gadget: GrowGadget,
    min_max_gadget: MinMaxGadget,
}

impl FactoryProperties {
    pub fn new(
        header: SpecHeader,
        match_gadget: MatchGadget,
        production_gadget: ProductionGadget,
        conversion_gadget: ConversionGadget,
        grow_gadget: GrowGadget,
        min_max_gadget: MinMaxGadget,
    ) -> Self {
        Self {
            header,
            match_gadget,
            production_gadget,
            conversion_gadget,
            grow_gadget,
            min_max_gadget,
        }
    }

    pub fn from_config(id: SpecId, config: FactoryConfig) -> Result<Self, ConfigError> {
        if config.recipe.outputs.is_empty() {
            return Err(ConfigError::EmptyRecipe);
        }
        let breakdown = non_negative("breakdown_rate", config.breakdown_rate)?;
        let breakdown = per_day_to_per_tick(breakdown).ok_or(ConfigError::InvalidNumber {
            field: "breakdown_rate",
            value: config.breakdown_rate,
        })?;
        let repair_amount = to_fixed("repair_amount", non_negative("repair_amount", config.repair_amount)?)?;
        let max_repair = to_fixed("max_repair", config.max_repair)?;

        Ok(Self::new(
            SpecHeader::new(id, config.name, config.structure),
            MatchGadget::new(config.building_materials),
            ProductionGadget::new(config.recipe.inputs, config.recipe.outputs),
            ConversionGadget::new(config.repair_materials, repair_amount),
            GrowGadget::new(-breakdown),
            MinMaxGadget::new(Fixed64::ZERO, max_repair)?,
        ))
    }

    pub fn to_config(&self) -> FactoryConfig {
        FactoryConfig {
            name: Some(self.header.name.clone()),
            structure: Some(self.header.structure.clone()),
            building_materials: self.match_gadget.required().clone(),
            recipe: RecipeConfig {
                inputs: self.production_gadget.inputs().clone(),
                outputs: self.production_gadget.outputs().clone(),
            },
            repair_materials: self.conversion_gadget.inputs().clone(),
            repair_amount: fixed64_to_f64(self.conversion_gadget.rate()),
            breakdown_rate: per_tick_to_per_day(-self.grow_gadget.rate_per_tick()),
            max_repair: fixed64_to_f64(self.min_max_gadget.max()),
        }
    }

    pub fn header(&self) -> &SpecHeader {
        &self.header
    }

    pub fn match_gadget(&self) -> &MatchGadget {
        &self.match_gadget
    }

    pub fn production_gadget(&self) -> &ProductionGadget {
        &self.production_gadget
    }

    pub fn conversion_gadget(&self) -> &ConversionGadget {
        &self.conversion_gadget
    }

    /// Breakdown per tick; the rate is negative.
    pub fn grow_gadget(&self) -> &GrowGadget {
        &self.grow_gadget
    }

    pub fn min_max_gadget(&self) -> &MinMaxGadget {
        &self.min_max_gadget
    }
}

// ---------------------------------------------------------------------------
// Generator
// ---------------------------------------------------------------------------

/// A generator accumulates stored output at a global rate, loses some of it
/// to degradation, and is updated once every `period` seconds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorProperties {
    header: SpecHeader,
    period: u32,
    match_gadget: MatchGadget,
    territory_gadget: TerritoryGadget,
    conversion_gadget: ConversionGadget,
    generation_gadget: GrowGadget,
    degradation_gadget: GrowGadget,
    min_max_gadget: MinMaxGadget,
}

impl GeneratorProperties {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        header: SpecHeader,
        period: u32,
        match_gadget: MatchGadget,
        territory_gadget: TerritoryGadget,
        conversion_gadget: ConversionGadget,
        generation_gadget: GrowGadget,
        degradation_gadget: GrowGadget,
        min_max_gadget: MinMaxGadget,
    ) -> Self {
        Self {
            header,
            period,
            match_gadget,
            territory_gadget,
            conversion_gadget,
            generation_gadget,
            degradation_gadget,
            min_max_gadget,
        }
    }

    pub fn from_config(id: SpecId, config: GeneratorConfig) -> Result<Self, ConfigError> {
        if config.period == 0 {
            return Err(ConfigError::ZeroPeriod);
        }
        let generation = non_negative("generation_rate", config.generation_rate)?;
        let generation = per_day_to_per_tick(generation).ok_or(ConfigError::InvalidNumber {
            field: "generation_rate",
            value: config.generation_rate,
        })?;
        let degradation = non_negative("degredation_rate", config.degredation_rate)?;
        let degradation = per_day_to_per_tick(degradation).ok_or(ConfigError::InvalidNumber {
            field: "degredation_rate",
            value: config.degredation_rate,
        })?;
        let capacity = to_fixed("capacity", config.capacity)?;

        let header = SpecHeader::new(id, config.name, config.structure);
        let territory = TerritoryGadget::new(header.structure().interaction_block().clone());
        Ok(Self::new(
            header,
            config.period,
            MatchGadget::new(config.construction_cost),
            territory,
            ConversionGadget::new(config.materials, Fixed64::ONE),
            GrowGadget::new(generation),
            GrowGadget::new(-degradation),
            MinMaxGadget::new(Fixed64::ZERO, capacity)?,
        ))
    }

    pub fn to_config(&self) -> GeneratorConfig {
        GeneratorConfig {
            name: Some(self.header.name.clone()),
            structure: Some(self.header.structure.clone()),
            generation_rate: per_tick_to_per_day(self.generation_gadget.rate_per_tick()),
            degredation_rate: per_tick_to_per_day(-self.degradation_gadget.rate_per_tick()),
            capacity: fixed64_to_f64(self.min_max_gadget.max()),
            period: self.period,
            construction_cost: self.match_gadget.required().clone(),
            materials: self.conversion_gadget.inputs().clone(),
        }
    }

    pub fn header(&self) -> &SpecHeader {
        &self.header
    }

    /// Seconds between updates.
    pub fn period(&self) -> u32 {
        self.period
    }

    pub fn match_gadget(&self) -> &MatchGadget {
        &self.match_gadget
    }

    pub fn territory_gadget(&self) -> &TerritoryGadget {
        &self.territory_gadget
    }

    pub fn conversion_gadget(&self) -> &ConversionGadget {
        &self.conversion_gadget
    }

    pub fn generation_gadget(&self) -> &GrowGadget {
        &self.generation_gadget
    }

    /// Degradation per tick; the rate is negative.
    pub fn degradation_gadget(&self) -> &GrowGadget {
        &self.degradation_gadget
    }

    pub fn min_max_gadget(&self) -> &MinMaxGadget {
        &self.min_max_gadget
    }
}

// ---------------------------------------------------------------------------
// ContraptionProperties
// ---------------------------------------------------------------------------

/// A loaded specification of any kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContraptionProperties {
    Factory(FactoryProperties),
    Generator(GeneratorProperties),
}

impl ContraptionProperties {
    /// Validate `config` and build the gadget bundle for it.
    pub fn from_config(id: SpecId, config: SpecConfig) -> Result<Self, ConfigError> {
        match config {
            SpecConfig::Factory(c) => FactoryProperties::from_config(id, c).map(Self::Factory),
            SpecConfig::Generator(c) => GeneratorProperties::from_config(id, c).map(Self::Generator),
        }
    }

    /// The configuration this specification would be loaded from.
    pub fn to_config(&self) -> SpecConfig {
        match self {
            Self::Factory(p) => SpecConfig::Factory(p.to_config()),
            Self::Generator(p) => SpecConfig::Generator(p.to_config()),
        }
    }

    pub fn kind(&self) -> ContraptionKind {
        match self {
            Self::Factory(_) => ContraptionKind::Factory,
            Self::Generator(_) => ContraptionKind::Generator,
        }
    }

    pub fn type_tag(&self) -> &'static str {
        self.kind().tag()
    }

    pub fn header(&self) -> &SpecHeader {
        match self {
            Self::Factory(p) => p.header(),
            Self::Generator(p) => p.header(),
        }
    }

    pub fn id(&self) -> &SpecId {
        self.header().id()
    }

    pub fn name(&self) -> &str {
        self.header().name()
    }

    pub fn structure_gadget(&self) -> &StructureGadget {
        self.header().structure()
    }

    pub fn match_gadget(&self) -> &MatchGadget {
        match self {
            Self::Factory(p) => p.match_gadget(),
            Self::Generator(p) => p.match_gadget(),
        }
    }

    pub fn conversion_gadget(&self) -> &ConversionGadget {
        match self {
            Self::Factory(p) => p.conversion_gadget(),
            Self::Generator(p) => p.conversion_gadget(),
        }
    }

    pub fn min_max_gadget(&self) -> &MinMaxGadget {
        match self {
            Self::Factory(p) => p.min_max_gadget(),
            Self::Generator(p) => p.min_max_gadget(),
        }
    }

    /// Ticks between two updates of a contraption of this specification.
    pub fn update_interval(&self) -> Ticks {
        match self {
            Self::Factory(_) => 1,
            Self::Generator(p) => seconds_to_ticks(p.period()),
        }
    }

    /// Quantity of a freshly built contraption: factories start fully
    /// repaired, generators start empty.
    pub fn initial_quantity(&self) -> Fixed64 {
        match self {
            Self::Factory(p) => p.min_max_gadget().max(),
            Self::Generator(p) => p.min_max_gadget().min(),
        }
    }
}

fn to_fixed(field: &'static str, value: f64) -> Result<Fixed64, ConfigError> {
    checked_f64_to_fixed64(value).ok_or(ConfigError::InvalidNumber { field, value })
}

fn non_negative(field: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value < 0.0 {
        Err(ConfigError::NegativeRate { field, value })
    } else {
        Ok(value)
    }
}
