//! Gadgets: small immutable rule objects that contraption specifications
//! are assembled from.
//!
//! No gadget holds instance state. Every mutable quantity lives on the
//! [`Contraption`](crate::contraption::Contraption); gadgets are shared
//! read-only through the owning
//! [`ContraptionProperties`](crate::properties::ContraptionProperties).

mod conversion;
mod grow;
mod matching;
mod min_max;
mod production;
mod structure;

pub use conversion::{Conversion, ConversionGadget};
pub use grow::GrowGadget;
pub use matching::MatchGadget;
pub use min_max::MinMaxGadget;
pub use production::ProductionGadget;
pub use structure::{StructureBlock, StructureGadget, TerritoryGadget};
