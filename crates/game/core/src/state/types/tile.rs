use super::{Direction, UnitId};

/// Blocking strength of a single tile edge.
///
/// Only [`CoverLevel::Full`] blocks movement. `Half` is carried for
/// line-of-sight and damage collaborators and never consulted by navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum CoverLevel {
    #[default]
    None,
    Half,
    Full,
}

impl CoverLevel {
    pub fn blocks_movement(self) -> bool {
        matches!(self, CoverLevel::Full)
    }
}

/// Independent blocking levels for the four edges of a cover tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cover {
    edges: [CoverLevel; 4],
}

impl Cover {
    pub const NONE: Self = Self {
        edges: [CoverLevel::None; 4],
    };

    pub const FULL: Self = Self {
        edges: [CoverLevel::Full; 4],
    };

    /// Cover with a single edge set to `level`.
    pub fn single(direction: Direction, level: CoverLevel) -> Self {
        Self::NONE.with(direction, level)
    }

    #[must_use]
    pub fn with(mut self, direction: Direction, level: CoverLevel) -> Self {
        self.set(direction, level);
        self
    }

    pub fn level(&self, direction: Direction) -> CoverLevel {
        self.edges[direction.index()]
    }

    pub fn set(&mut self, direction: Direction, level: CoverLevel) {
        self.edges[direction.index()] = level;
    }

    /// Flips an edge between `None` and `Full`. Half cover becomes `None`.
    pub fn toggle(&mut self, direction: Direction) {
        let next = match self.level(direction) {
            CoverLevel::None => CoverLevel::Full,
            CoverLevel::Half | CoverLevel::Full => CoverLevel::None,
        };
        self.set(direction, next);
    }

    pub fn blocks(&self, direction: Direction) -> bool {
        self.level(direction).blocks_movement()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.iter().all(|level| *level == CoverLevel::None)
    }
}

/// Terrain class of a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TileKind {
    #[default]
    Empty,
    Unwalkable,
    Cover(Cover),
}

/// A single battlefield cell: terrain plus the unit standing on it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tile {
    pub kind: TileKind,
    pub occupant: Option<UnitId>,
}

impl Tile {
    pub const EMPTY: Self = Self {
        kind: TileKind::Empty,
        occupant: None,
    };

    pub const fn new(kind: TileKind) -> Self {
        Self {
            kind,
            occupant: None,
        }
    }

    pub const fn unwalkable() -> Self {
        Self::new(TileKind::Unwalkable)
    }

    pub const fn with_cover(cover: Cover) -> Self {
        Self::new(TileKind::Cover(cover))
    }

    pub fn is_walkable(&self) -> bool {
        !matches!(self.kind, TileKind::Unwalkable)
    }

    pub fn is_occupied(&self) -> bool {
        self.occupant.is_some()
    }

    pub fn cover(&self) -> Option<&Cover> {
        match &self.kind {
            TileKind::Cover(cover) => Some(cover),
            _ => None,
        }
    }

    /// True when this tile's edge on `direction` is fully blocked.
    pub fn blocks(&self, direction: Direction) -> bool {
        self.cover().is_some_and(|cover| cover.blocks(direction))
    }
}
