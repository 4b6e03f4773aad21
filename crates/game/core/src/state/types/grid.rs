use arrayvec::ArrayVec;

use crate::config::GameConfig;
use crate::state::GridError;

use super::{Cover, CoverLevel, Direction, Position, Tile, TileKind, UnitId};

/// Bounded battlefield of `width × height` tiles stored in row-major order.
///
/// The extent is fixed at construction. Tiles are looked up by coordinate and
/// never handed out beyond a borrow of the grid. Out-of-bounds coordinates are
/// treated as transient pointer noise: readers return `None` and writers no-op.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    width: u32,
    height: u32,
    tiles: Vec<Tile>,
}

impl Grid {
    /// Creates an all-empty grid.
    pub fn new(width: u32, height: u32) -> Result<Self, GridError> {
        if width == 0
            || height == 0
            || width > GameConfig::MAX_GRID_DIMENSION
            || height > GameConfig::MAX_GRID_DIMENSION
        {
            return Err(GridError::InvalidDimensions { width, height });
        }

        Ok(Self {
            width,
            height,
            tiles: vec![Tile::EMPTY; (width * height) as usize],
        })
    }

    /// Parses an ASCII layout, one row per line.
    ///
    /// `.` empty, `#` unwalkable, `C` full cover on every edge, and
    /// `^ v < >` full cover on the up/down/left/right edge only. Blank lines
    /// and surrounding whitespace are ignored.
    pub fn from_ascii(layout: &str) -> Result<Self, GridError> {
        let rows: Vec<&str> = layout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();

        let height = rows.len() as u32;
        let width = rows.first().map_or(0, |row| row.chars().count()) as u32;
        let mut grid = Self::new(width, height)?;

        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() as u32 != width {
                return Err(GridError::MalformedLayout {
                    row: y,
                    reason: "row width differs from the first row",
                });
            }

            for (x, glyph) in row.chars().enumerate() {
                let kind = match glyph {
                    '.' => TileKind::Empty,
                    '#' => TileKind::Unwalkable,
                    'C' => TileKind::Cover(Cover::FULL),
                    '^' => TileKind::Cover(Cover::single(Direction::Up, CoverLevel::Full)),
                    'v' => TileKind::Cover(Cover::single(Direction::Down, CoverLevel::Full)),
                    '<' => TileKind::Cover(Cover::single(Direction::Left, CoverLevel::Full)),
                    '>' => TileKind::Cover(Cover::single(Direction::Right, CoverLevel::Full)),
                    _ => {
                        return Err(GridError::MalformedLayout {
                            row: y,
                            reason: "unknown tile glyph",
                        });
                    }
                };
                grid.set_cell(Position::new(x as i32, y as i32), Tile::new(kind));
            }
        }

        Ok(grid)
    }

    /// Renders the terrain back into the [`Grid::from_ascii`] notation.
    ///
    /// Cover that is not exactly one full edge renders as `C`.
    pub fn to_ascii(&self) -> String {
        let mut out = String::with_capacity(((self.width + 1) * self.height) as usize);
        for row in self.tiles.chunks(self.width as usize) {
            for tile in row {
                out.push(glyph_for(tile));
            }
            out.push('\n');
        }
        out
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn contains(&self, position: Position) -> bool {
        position.x >= 0
            && position.y >= 0
            && position.x < self.width as i32
            && position.y < self.height as i32
    }

    fn index(&self, position: Position) -> Option<usize> {
        if !self.contains(position) {
            return None;
        }
        let row = position.y as usize * self.width as usize;
        Some(row + position.x as usize)
    }

    /// Returns the tile at `position`, if in bounds.
    pub fn cell(&self, position: Position) -> Option<&Tile> {
        self.index(position).map(|index| &self.tiles[index])
    }

    /// Replaces a tile wholesale, occupant included. No-op out of bounds.
    ///
    /// Returns whether the write happened.
    pub fn set_cell(&mut self, position: Position, tile: Tile) -> bool {
        match self.index(position) {
            Some(index) => {
                self.tiles[index] = tile;
                true
            }
            None => false,
        }
    }

    /// Resets a tile to `Empty` with no occupant. No-op out of bounds.
    pub fn clear_cell(&mut self, position: Position) -> bool {
        self.set_cell(position, Tile::EMPTY)
    }

    pub fn occupant_at(&self, position: Position) -> Option<UnitId> {
        self.cell(position).and_then(|tile| tile.occupant)
    }

    pub(crate) fn set_occupant(&mut self, position: Position, occupant: Option<UnitId>) -> bool {
        match self.index(position) {
            Some(index) => {
                self.tiles[index].occupant = occupant;
                true
            }
            None => false,
        }
    }

    /// In-bounds Von Neumann neighbors in right, down, left, up order.
    pub fn neighbors(&self, position: Position) -> ArrayVec<Position, 4> {
        Direction::ALL
            .iter()
            .map(|direction| position.step(*direction))
            .filter(|neighbor| self.contains(*neighbor))
            .collect()
    }

    /// Applies the edge traversal rule to a single step `from → to`.
    ///
    /// The step is blocked when `to` is unwalkable, when `to` has full cover on
    /// the travel direction, or when `from` has full cover on the edge facing
    /// `to`. Non-adjacent or out-of-bounds pairs are never traversable.
    pub fn can_traverse(&self, from: Position, to: Position) -> bool {
        let Some(direction) = from.direction_to(to) else {
            return false;
        };
        let (Some(source), Some(target)) = (self.cell(from), self.cell(to)) else {
            return false;
        };

        target.is_walkable() && !target.blocks(direction) && !source.blocks(direction)
    }

    /// Iterates every tile with its coordinate, row by row.
    pub fn tiles(&self) -> impl Iterator<Item = (Position, &Tile)> + '_ {
        let width = self.width as usize;
        self.tiles.iter().enumerate().map(move |(index, tile)| {
            (
                Position::new((index % width) as i32, (index / width) as i32),
                tile,
            )
        })
    }
}

fn glyph_for(tile: &Tile) -> char {
    match tile.kind {
        TileKind::Empty => '.',
        TileKind::Unwalkable => '#',
        TileKind::Cover(cover) => {
            let full: ArrayVec<Direction, 4> = Direction::ALL
                .into_iter()
                .filter(|direction| cover.level(*direction) == CoverLevel::Full)
                .collect();
            let others_clear = Direction::ALL
                .iter()
                .filter(|direction| !full.contains(*direction))
                .all(|direction| cover.level(*direction) == CoverLevel::None);

            match (full.as_slice(), others_clear) {
                ([Direction::Up], true) => '^',
                ([Direction::Down], true) => 'v',
                ([Direction::Left], true) => '<',
                ([Direction::Right], true) => '>',
                _ => 'C',
            }
        }
    }
}
