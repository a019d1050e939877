use crate::location::{Anchor, BlockKind, BlockLocation, BlockView, Rotation};
use serde::{Deserialize, Serialize};

/// One block of a multi-block structure, relative to the interaction block.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StructureBlock {
    pub offset: [i32; 3],
    pub block: BlockKind,
}

/// Describes the block arrangement a contraption needs: the block players
/// interact with, plus any surrounding blocks at fixed offsets from it.
///
/// The arrangement may be built facing any of the four horizontal
/// directions; [`exists`](Self::exists) tries each rotation in turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructureGadget {
    #[serde(default = "BlockKind::chest")]
    interaction_block: BlockKind,
    #[serde(default)]
    blocks: Vec<StructureBlock>,
}

impl Default for StructureGadget {
    /// A lone chest.
    fn default() -> Self {
        Self::single(BlockKind::chest())
    }
}

impl StructureGadget {
    pub fn new(interaction_block: BlockKind, blocks: Vec<StructureBlock>) -> Self {
        Self {
            interaction_block,
            blocks,
        }
    }

    /// A structure that is just its interaction block.
    pub fn single(interaction_block: BlockKind) -> Self {
        Self::new(interaction_block, Vec::new())
    }

    pub fn interaction_block(&self) -> &BlockKind {
        &self.interaction_block
    }

    pub fn blocks(&self) -> &[StructureBlock] {
        &self.blocks
    }

    /// True when nothing beyond the interaction block is required.
    pub fn is_single_block(&self) -> bool {
        self.blocks.is_empty()
    }

    pub fn valid_block(&self, block: &BlockKind) -> bool {
        *block == self.interaction_block
    }

    /// Scan the world around `location`. Returns the anchor for the first
    /// rotation under which every block matches.
    pub fn exists<W: BlockView + ?Sized>(&self, world: &W, location: BlockLocation) -> Option<Anchor> {
        if world.block_at(location).as_ref() != Some(&self.interaction_block) {
            return None;
        }
        Rotation::all().into_iter().find_map(|rotation| {
            let anchor = Anchor { location, rotation };
            self.blocks
                .iter()
                .all(|b| {
                    anchor
                        .resolve(b.offset)
                        .and_then(|at| world.block_at(at))
                        .is_some_and(|block| block == b.block)
                })
                .then_some(anchor)
        })
    }
}

/// Placement capability that needs no footprint beyond the anchor block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TerritoryGadget {
    anchor_block: BlockKind,
}

impl TerritoryGadget {
    pub fn new(anchor_block: BlockKind) -> Self {
        Self { anchor_block }
    }

    pub fn anchor_block(&self) -> &BlockKind {
        &self.anchor_block
    }

    pub fn valid_block(&self, block: &BlockKind) -> bool {
        *block == self.anchor_block
    }

    /// The identity anchor on the single block.
    pub fn exists(&self, location: BlockLocation) -> Anchor {
        Anchor::at(location)
    }
}
