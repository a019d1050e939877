//! Block positions, block kinds, rotations and anchors.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A block position in the world.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BlockLocation {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl BlockLocation {
    pub fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// The location displaced by `[dx, dy, dz]`, or `None` if that leaves
    /// the `i32` coordinate range.
    pub fn offset(&self, [dx, dy, dz]: [i32; 3]) -> Option<Self> {
        Some(Self::new(
            self.x.checked_add(dx)?,
            self.y.checked_add(dy)?,
            self.z.checked_add(dz)?,
        ))
    }
}

impl fmt::Display for BlockLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Material of a block, e.g. `"CHEST"` or `"IRON_BLOCK"`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockKind(pub String);

impl BlockKind {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The default interaction block.
    pub fn chest() -> Self {
        Self::new("CHEST")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for BlockKind {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Rotation of a structure about the vertical axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Rotation {
    /// No rotation.
    #[default]
    None,
    /// 90 degrees clockwise, seen from above.
    Cw90,
    /// 180 degrees.
    Cw180,
    /// 270 degrees clockwise (90 degrees counter-clockwise).
    Cw270,
}

impl Rotation {
    /// All four rotation values, in scan order.
    pub fn all() -> [Rotation; 4] {
        [
            Rotation::None,
            Rotation::Cw90,
            Rotation::Cw180,
            Rotation::Cw270,
        ]
    }

    /// Rotate a relative `[dx, dy, dz]` offset. `y` is untouched; `x` grows
    /// east and `z` grows south, so north `(0, -1)` turns into east `(1, 0)`.
    /// `None` when a component is `i32::MIN` and cannot be negated.
    pub fn apply(self, [dx, dy, dz]: [i32; 3]) -> Option<[i32; 3]> {
        Some(match self {
            Rotation::None => [dx, dy, dz],
            Rotation::Cw90 => [dz.checked_neg()?, dy, dx],
            Rotation::Cw180 => [dx.checked_neg()?, dy, dz.checked_neg()?],
            Rotation::Cw270 => [dz, dy, dx.checked_neg()?],
        })
    }
}

/// A resolved placement: the interaction block plus the rotation under which
/// the structure matched. Stable for the lifetime of the contraption.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Anchor {
    pub location: BlockLocation,
    pub rotation: Rotation,
}

impl Anchor {
    /// An anchor on a single block.
    pub fn at(location: BlockLocation) -> Self {
        Self {
            location,
            rotation: Rotation::None,
        }
    }

    /// World position of a structure offset under this anchor's rotation.
    /// `None` if it falls outside the coordinate range.
    pub fn resolve(&self, offset: [i32; 3]) -> Option<BlockLocation> {
        self.location.offset(self.rotation.apply(offset)?)
    }
}

/// Read access to the blocks of a world.
pub trait BlockView {
    fn block_at(&self, location: BlockLocation) -> Option<BlockKind>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_adds_components() {
        let loc = BlockLocation::new(1, 64, -3);
        assert_eq!(loc.offset([2, -1, 5]), Some(BlockLocation::new(3, 63, 2)));
    }

    #[test]
    fn offset_past_coordinate_range_is_none() {
        let edge = BlockLocation::new(i32::MAX, 64, i32::MIN);
        assert_eq!(edge.offset([1, 0, 0]), None);
        assert_eq!(edge.offset([0, 0, -1]), None);
        assert_eq!(edge.offset([-1, 0, 1]), Some(BlockLocation::new(i32::MAX - 1, 64, i32::MIN + 1)));
        assert_eq!(Rotation::Cw180.apply([i32::MIN, 0, 0]), None);
    }

    #[test]
    fn rotation_turns_north_into_east() {
        assert_eq!(Rotation::Cw90.apply([0, 0, -1]), Some([1, 0, 0]));
        assert_eq!(Rotation::Cw180.apply([0, 0, -1]), Some([0, 0, 1]));
        assert_eq!(Rotation::Cw270.apply([0, 0, -1]), Some([-1, 0, 0]));
    }

    #[test]
    fn four_quarter_turns_are_identity() {
        let offset = [2, 1, -3];
        let mut turned = offset;
        for _ in 0..4 {
            turned = Rotation::Cw90.apply(turned).unwrap();
        }
        assert_eq!(turned, offset);
    }

    #[test]
    fn rotation_keeps_height() {
        for rotation in Rotation::all() {
            assert_eq!(rotation.apply([4, 7, 2]).unwrap()[1], 7);
        }
    }

    #[test]
    fn anchor_resolves_rotated_offsets() {
        let anchor = Anchor {
            location: BlockLocation::new(10, 5, 10),
            rotation: Rotation::Cw90,
        };
        assert_eq!(anchor.resolve([0, 0, -1]), Some(BlockLocation::new(11, 5, 10)));
        assert_eq!(Anchor::at(BlockLocation::new(0, 0, 0)).rotation, Rotation::None);
    }
}
