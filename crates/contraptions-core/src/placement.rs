//! Building contraptions in the world.
//!
//! A creation attempt walks five gates in order:
//!
//! 1. **Block** -- the interaction block must be the one the specification
//!    names.
//! 2. **Structure** -- the surrounding blocks must form the specification's
//!    structure (generators without extra blocks resolve through their
//!    territory gadget instead).
//! 3. **Vacancy** -- no registered contraption may already sit on the
//!    anchor.
//! 4. **Cost** -- the inventory at the interaction block must hold the
//!    construction cost, which is removed under the inventory's lock.
//! 5. **Registration** -- the new contraption goes to the registry, and only
//!    then is creation feedback played.
//!
//! Expected failures come back as a rejected [`Response`], never as a panic
//! or an `Err`.

use crate::contraption::Contraption;
use crate::id::ContraptionId;
use crate::location::{Anchor, BlockLocation, BlockView};
use crate::properties::{ContraptionKind, ContraptionProperties};
use crate::world::WorldView;
use std::fmt;
use std::sync::Arc;

// ---------------------------------------------------------------------------
// Collaborators
// ---------------------------------------------------------------------------

/// Accepts newly created contraptions.
pub trait ContraptionRegistry {
    fn register(&mut self, contraption: Contraption) -> ContraptionId;

    /// Whether a contraption is already anchored at `location`.
    fn occupied(&self, location: BlockLocation) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundType {
    Creation,
}

/// Sound/notification output.
pub trait FeedbackSink {
    fn play(&mut self, sound: SoundType, location: BlockLocation);
}

impl<F: FnMut(SoundType, BlockLocation)> FeedbackSink for F {
    fn play(&mut self, sound: SoundType, location: BlockLocation) {
        self(sound, location)
    }
}

// ---------------------------------------------------------------------------
// Response
// ---------------------------------------------------------------------------

/// Why a creation attempt was turned down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rejection {
    InvalidBlock,
    InvalidStructure,
    Occupied,
    NoInventory,
    InsufficientMaterials,
}

impl Rejection {
    fn message(self, kind: ContraptionKind) -> String {
        match self {
            Rejection::InvalidBlock => format!("Incorrect block for a {kind}"),
            Rejection::InvalidStructure => format!("Incorrect structure for a {kind}"),
            Rejection::Occupied => format!("There is already a contraption on this {kind} block"),
            Rejection::NoInventory => format!("No inventory to build a {kind} from"),
            Rejection::InsufficientMaterials => format!("Incorrect items for a {kind}"),
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Rejection::InvalidBlock => "invalid block",
            Rejection::InvalidStructure => "invalid structure",
            Rejection::Occupied => "anchor occupied",
            Rejection::NoInventory => "no inventory",
            Rejection::InsufficientMaterials => "insufficient materials",
        };
        f.write_str(text)
    }
}

/// Outcome of a creation attempt, shown to the player as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub success: bool,
    pub message: String,
    pub contraption: Option<ContraptionId>,
    pub rejection: Option<Rejection>,
}

impl Response {
    pub fn created(id: ContraptionId, name: &str, kind: ContraptionKind) -> Self {
        Self {
            success: true,
            message: format!("Created a {name} {kind}!"),
            contraption: Some(id),
            rejection: None,
        }
    }

    pub fn rejected(rejection: Rejection, kind: ContraptionKind) -> Self {
        Self {
            success: false,
            message: rejection.message(kind),
            contraption: None,
            rejection: Some(rejection),
        }
    }
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

/// Gates 1 and 2: find the anchor for a contraption at `location`.
pub fn resolve_anchor<W: BlockView + ?Sized>(
    properties: &ContraptionProperties,
    world: &W,
    location: BlockLocation,
) -> Result<Anchor, Rejection> {
    let structure = properties.structure_gadget();
    let valid = world
        .block_at(location)
        .is_some_and(|block| structure.valid_block(&block));
    if !valid {
        return Err(Rejection::InvalidBlock);
    }

    match properties {
        ContraptionProperties::Generator(generator) if structure.is_single_block() => {
            Ok(generator.territory_gadget().exists(location))
        }
        _ => structure
            .exists(world, location)
            .ok_or(Rejection::InvalidStructure),
    }
}

/// Try to build a contraption of `properties` at `location`.
pub fn create_contraption<W, R, F>(
    properties: &Arc<ContraptionProperties>,
    location: BlockLocation,
    world: &W,
    registry: &mut R,
    feedback: &mut F,
) -> Response
where
    W: WorldView + ?Sized,
    R: ContraptionRegistry + ?Sized,
    F: FeedbackSink + ?Sized,
{
    let kind = properties.kind();
    let reject = |rejection: Rejection| {
        log::debug!(
            "rejected {} '{}' at {location}: {rejection}",
            kind,
            properties.id()
        );
        Response::rejected(rejection, kind)
    };

    let anchor = match resolve_anchor(properties, world, location) {
        Ok(anchor) => anchor,
        Err(rejection) => return reject(rejection),
    };
    if registry.occupied(anchor.location) {
        return reject(Rejection::Occupied);
    }

    let Some(inventory) = world.inventory_at(location) else {
        return reject(Rejection::NoInventory);
    };
    if !properties.match_gadget().consume_locked(&inventory) {
        return reject(Rejection::InsufficientMaterials);
    }

    let contraption = Contraption::new(Arc::clone(properties), anchor);
    let id = registry.register(contraption);
    feedback.play(SoundType::Creation, anchor.location);
    log::debug!("created {kind} '{}' at {location}", properties.id());
    Response::created(id, properties.name(), kind)
}
