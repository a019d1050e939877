//! File handling: format detection (RON/JSON/TOML), file discovery, and
//! reading a spec file into raw per-entry values.

use serde_json::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

// ===========================================================================
// Errors
// ===========================================================================

/// Errors that stop a whole file from loading.
#[derive(Debug, thiserror::Error)]
pub enum DataLoadError {
    /// No `{file}.{ron,toml,json}` in the data directory.
    #[error("no '{file}' data file in {dir}")]
    MissingRequired { file: String, dir: PathBuf },

    #[error("{file}: expected a .ron, .toml or .json extension")]
    UnsupportedFormat { file: PathBuf },

    /// The same library exists in more than one format.
    #[error("ambiguous data files {a} and {b}")]
    ConflictingFormats { a: PathBuf, b: PathBuf },

    /// The file is not a map of spec id to entry.
    #[error("cannot parse {file}: {detail}")]
    Parse { file: PathBuf, detail: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

// ===========================================================================
// Format detection
// ===========================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Ron,
    Toml,
    Json,
}

impl Format {
    pub const ALL: [Format; 3] = [Format::Ron, Format::Toml, Format::Json];

    pub fn extension(self) -> &'static str {
        match self {
            Format::Ron => "ron",
            Format::Toml => "toml",
            Format::Json => "json",
        }
    }
}

/// Pick the format from the file extension.
pub fn detect_format(path: &Path) -> Result<Format, DataLoadError> {
    let extension = path.extension().and_then(|e| e.to_str());
    Format::ALL
        .into_iter()
        .find(|format| Some(format.extension()) == extension)
        .ok_or_else(|| DataLoadError::UnsupportedFormat {
            file: path.to_path_buf(),
        })
}

// ===========================================================================
// File discovery
// ===========================================================================

/// Look for `{base_name}.ron`, `{base_name}.toml` and `{base_name}.json`
/// in `dir`. `Ok(None)` if none exists; `ConflictingFormats` if several do.
pub fn find_data_file(dir: &Path, base_name: &str) -> Result<Option<PathBuf>, DataLoadError> {
    let mut found: Option<PathBuf> = None;

    for format in Format::ALL {
        let candidate = dir.join(format!("{base_name}.{}", format.extension()));
        if !candidate.exists() {
            continue;
        }
        if let Some(existing) = found {
            return Err(DataLoadError::ConflictingFormats {
                a: existing,
                b: candidate,
            });
        }
        found = Some(candidate);
    }

    Ok(found)
}

/// Like [`find_data_file`], but a missing file is an error.
pub fn require_data_file(dir: &Path, base_name: &str) -> Result<PathBuf, DataLoadError> {
    find_data_file(dir, base_name)?.ok_or_else(|| DataLoadError::MissingRequired {
        file: base_name.to_string(),
        dir: dir.to_path_buf(),
    })
}

// ===========================================================================
// Reading
// ===========================================================================

/// Parse `content` as a map of entry name to raw value.
///
/// Entries stay as untyped values so that one malformed entry can be
/// reported on its own without failing its neighbours.
pub fn parse_entries(
    content: &str,
    format: Format,
    file: &Path,
) -> Result<BTreeMap<String, Value>, DataLoadError> {
    let parse_error = |detail: String| DataLoadError::Parse {
        file: file.to_path_buf(),
        detail,
    };
    match format {
        Format::Ron => ron::from_str(content).map_err(|e| parse_error(e.to_string())),
        Format::Toml => toml::from_str(content).map_err(|e| parse_error(e.to_string())),
        Format::Json => serde_json::from_str(content).map_err(|e| parse_error(e.to_string())),
    }
}

/// Read a file and split it into entries, detecting the format from its
/// extension.
pub fn read_entries(path: &Path) -> Result<BTreeMap<String, Value>, DataLoadError> {
    let format = detect_format(path)?;
    let content = std::fs::read_to_string(path)?;
    parse_entries(&content, format, path)
}

// ===========================================================================
// Tests
// ===========================================================================
