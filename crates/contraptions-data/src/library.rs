//! Spec library loading: turns a data file into shared contraption
//! properties.
//!
//! A library file maps spec ids to tagged configs:
//!
//! ```toml
//! [windmill]
//! type = "generator"
//! construction_cost = { IRON_BLOCK = 4 }
//! materials = { COAL = 1 }
//!
//! [smelter]
//! type = "factory"
//! building_materials = { STONE = 8 }
//! recipe = { inputs = { IRON_ORE = 1 }, outputs = { IRON_INGOT = 1 } }
//! ```
//!
//! Entries load independently. A bad entry is recorded in
//! [`SpecLibrary::failures`] and the rest still load.

use crate::loader::{DataLoadError, read_entries, require_data_file};
use contraptions_core::config::{ConfigError, SpecConfig};
use contraptions_core::id::SpecId;
use contraptions_core::properties::ContraptionProperties;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use std::sync::Arc;

/// Base name of the library file inside a data directory.
pub const LIBRARY_FILE: &str = "contraptions";

/// Why a single entry was skipped.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SpecError {
    /// The entry does not have the shape of a config record.
    #[error("malformed entry: {0}")]
    Malformed(String),
    /// The record parsed but its values are unusable.
    #[error(transparent)]
    Invalid(#[from] ConfigError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpecLoadFailure {
    pub id: SpecId,
    pub error: SpecError,
}

/// Every spec that loaded, keyed by id, plus the ones that didn't.
#[derive(Debug, Clone, Default)]
pub struct SpecLibrary {
    specs: BTreeMap<SpecId, Arc<ContraptionProperties>>,
    failures: Vec<SpecLoadFailure>,
}

impl SpecLibrary {
    /// Build a library from raw entries.
    pub fn from_entries(entries: BTreeMap<String, Value>) -> Self {
        let mut library = SpecLibrary::default();
        for (id, value) in entries {
            let id = SpecId::new(id);
            match load_entry(&id, value) {
                Ok(properties) => {
                    log::debug!("loaded {} '{id}'", properties.kind());
                    library.specs.insert(id, Arc::new(properties));
                }
                Err(error) => {
                    log::warn!("skipping spec '{id}': {error}");
                    library.failures.push(SpecLoadFailure { id, error });
                }
            }
        }
        library
    }

    pub fn get(&self, id: &str) -> Option<&Arc<ContraptionProperties>> {
        self.specs.get(&SpecId::new(id))
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&SpecId, &Arc<ContraptionProperties>)> {
        self.specs.iter()
    }

    pub fn failures(&self) -> &[SpecLoadFailure] {
        &self.failures
    }
}

fn load_entry(id: &SpecId, value: Value) -> Result<ContraptionProperties, SpecError> {
    let config: SpecConfig =
        serde_json::from_value(value).map_err(|e| SpecError::Malformed(e.to_string()))?;
    Ok(ContraptionProperties::from_config(id.clone(), config)?)
}

/// Load a single library file.
pub fn load_spec_file(path: &Path) -> Result<SpecLibrary, DataLoadError> {
    let library = SpecLibrary::from_entries(read_entries(path)?);
    log::info!(
        "loaded {} contraption specs from {} ({} skipped)",
        library.len(),
        path.display(),
        library.failures().len()
    );
    Ok(library)
}

/// Load `contraptions.{ron,toml,json}` from a data directory.
pub fn load_spec_library(dir: &Path) -> Result<SpecLibrary, DataLoadError> {
    let path = require_data_file(dir, LIBRARY_FILE)?;
    load_spec_file(&path)
}

// ===========================================================================
// Tests
// ===========================================================================
