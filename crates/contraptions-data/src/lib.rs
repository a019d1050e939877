//! Contraptions Data -- loads contraption specifications from RON, TOML or
//! JSON files into shared [`ContraptionProperties`](contraptions_core::properties::ContraptionProperties).

pub mod library;
pub mod loader;

pub use library::{SpecLibrary, load_spec_file, load_spec_library};
pub use loader::DataLoadError;
