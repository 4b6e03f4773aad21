//! Cover-aware wave expansion over the battlefield grid.
//!
//! Every search here is a breadth-first expansion over 4-connected tiles that
//! consults [`Grid::can_traverse`] for each step, so unwalkable tiles and full
//! cover edges shape both the movement overlay and traced paths.

use std::collections::VecDeque;

use crate::state::{Grid, Position};

/// A tile reached by [`reachable_tiles`] with its hop distance from the origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReachableTile {
    pub position: Position,
    pub distance: u32,
}

/// Set of tiles reachable within a step budget, in discovery order.
///
/// Each position appears once, annotated with its shortest hop count. The
/// origin is included at distance `0`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovementRange {
    tiles: Vec<ReachableTile>,
}

impl MovementRange {
    pub const fn empty() -> Self {
        Self { tiles: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn contains(&self, position: Position) -> bool {
        self.distance(position).is_some()
    }

    pub fn distance(&self, position: Position) -> Option<u32> {
        self.tiles
            .iter()
            .find(|tile| tile.position == position)
            .map(|tile| tile.distance)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ReachableTile> {
        self.tiles.iter()
    }

    pub fn clear(&mut self) {
        self.tiles.clear();
    }
}

/// Dense per-tile hop counts for one search, `None` until discovered.
struct DistanceField {
    width: usize,
    distances: Vec<Option<u32>>,
}

impl DistanceField {
    fn new(grid: &Grid) -> Self {
        let width = grid.width() as usize;
        Self {
            width,
            distances: vec![None; width * grid.height() as usize],
        }
    }

    // Callers only pass in-bounds positions.
    fn index(&self, position: Position) -> usize {
        position.y as usize * self.width + position.x as usize
    }

    fn get(&self, position: Position) -> Option<u32> {
        self.distances[self.index(position)]
    }

    fn set(&mut self, position: Position, distance: u32) {
        let index = self.index(position);
        self.distances[index] = Some(distance);
    }
}

/// Wave expansion from `origin` collecting every tile within `max_steps` hops.
///
/// Returns an empty range when `origin` is out of bounds. `max_steps = 0`
/// yields only the origin.
pub fn reachable_tiles(grid: &Grid, origin: Position, max_steps: u32) -> MovementRange {
    let mut range = MovementRange::default();
    if !grid.contains(origin) {
        return range;
    }

    let mut field = DistanceField::new(grid);
    let mut queue = VecDeque::new();

    field.set(origin, 0);
    range.tiles.push(ReachableTile {
        position: origin,
        distance: 0,
    });
    queue.push_back(origin);

    while let Some(current) = queue.pop_front() {
        let Some(distance) = field.get(current) else {
            continue;
        };
        if distance >= max_steps {
            continue;
        }

        for neighbor in grid.neighbors(current) {
            if field.get(neighbor).is_some() || !grid.can_traverse(current, neighbor) {
                continue;
            }

            field.set(neighbor, distance + 1);
            range.tiles.push(ReachableTile {
                position: neighbor,
                distance: distance + 1,
            });
            queue.push_back(neighbor);
        }
    }

    range
}

/// Traces a shortest path from `start` to `end`, both ends included.
///
/// Returns `None` when `start == end` (nothing to do), when either end is out
/// of bounds, or when `end` cannot be reached. Among several shortest paths
/// the result is deterministic: reconstruction walks back from `end` and at
/// each step takes the first neighbor, in right, down, left, up order, whose
/// hop count is one less and whose edge is traversable.
pub fn trace_path(grid: &Grid, start: Position, end: Position) -> Option<Vec<Position>> {
    if start == end || !grid.contains(start) || !grid.contains(end) {
        return None;
    }

    let mut field = DistanceField::new(grid);
    let mut queue = VecDeque::new();
    field.set(start, 0);
    queue.push_back(start);

    'search: while let Some(current) = queue.pop_front() {
        let distance = field.get(current)?;
        for neighbor in grid.neighbors(current) {
            if field.get(neighbor).is_some() || !grid.can_traverse(current, neighbor) {
                continue;
            }
            field.set(neighbor, distance + 1);
            if neighbor == end {
                break 'search;
            }
            queue.push_back(neighbor);
        }
    }

    let mut remaining = field.get(end)?;
    let mut path = Vec::with_capacity(remaining as usize + 1);
    let mut current = end;
    path.push(current);

    while remaining > 0 {
        let previous = grid.neighbors(current).into_iter().find(|neighbor| {
            field.get(*neighbor) == Some(remaining - 1) && grid.can_traverse(*neighbor, current)
        })?;
        path.push(previous);
        current = previous;
        remaining -= 1;
    }

    path.reverse();
    Some(path)
}

/// Shortens `path` so it walks at most `budget` steps.
///
/// Paths within budget are returned unchanged. Longer paths are re-traced
/// from their first cell to the cell `budget` steps along, so the result is
/// itself a deterministic shortest path. Returns `None` for a zero budget on
/// a path that needs to move, or for an empty path.
pub fn clamp_path(grid: &Grid, path: Vec<Position>, budget: u32) -> Option<Vec<Position>> {
    let budget = budget as usize;
    if path.is_empty() {
        return None;
    }
    if path.len() <= budget + 1 {
        return Some(path);
    }
    if budget == 0 {
        return None;
    }

    trace_path(grid, path[0], path[budget])
}

/// In-bounds tiles within Manhattan distance `radius` of `center`, row-major.
pub fn blast_area(grid: &Grid, center: Position, radius: u32) -> Vec<Position> {
    let reach = radius as i32;
    let mut tiles = Vec::new();

    for y in (center.y - reach)..=(center.y + reach) {
        for x in (center.x - reach)..=(center.x + reach) {
            let position = Position::new(x, y);
            if grid.contains(position) && center.manhattan(position) <= radius {
                tiles.push(position);
            }
        }
    }

    tiles
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{Cover, CoverLevel, Direction, Tile};

    fn open_grid(size: u32) -> Grid {
        Grid::new(size, size).unwrap()
    }

    #[test]
    fn open_grid_range_matches_manhattan_diamond() {
        let grid = open_grid(6);

        for k in 0..8 {
            let range = reachable_tiles(&grid, Position::ORIGIN, k);
            let expected = grid
                .tiles()
                .filter(|(position, _)| Position::ORIGIN.manhattan(*position) <= k)
                .count();
            assert_eq!(range.len(), expected, "k = {k}");

            for tile in range.iter() {
                assert_eq!(tile.distance, Position::ORIGIN.manhattan(tile.position));
            }
        }
    }

    #[test]
    fn zero_steps_yields_only_the_origin() {
        let grid = open_grid(5);
        let range = reachable_tiles(&grid, Position::new(2, 2), 0);

        assert_eq!(range.len(), 1);
        assert_eq!(range.distance(Position::new(2, 2)), Some(0));
    }

    #[test]
    fn two_step_range_from_corner() {
        let grid = open_grid(5);
        let range = reachable_tiles(&grid, Position::ORIGIN, 2);

        assert!(range.contains(Position::new(0, 2)));
        assert!(range.contains(Position::new(2, 0)));
        assert!(range.contains(Position::new(1, 1)));
        assert!(!range.contains(Position::new(0, 3)));
    }

    #[test]
    fn range_routes_around_obstacles() {
        let grid = Grid::from_ascii(
            "\
            ...\n\
            ##.\n\
            ...\n",
        )
        .unwrap();
        let range = reachable_tiles(&grid, Position::ORIGIN, 10);

        assert!(!range.contains(Position::new(0, 1)));
        assert_eq!(range.distance(Position::new(0, 2)), Some(6));
    }

    #[test]
    fn out_of_bounds_origin_yields_nothing() {
        let grid = open_grid(3);
        assert!(reachable_tiles(&grid, Position::new(5, 5), 3).is_empty());
    }

    #[test]
    fn trace_to_self_returns_nothing() {
        let grid = open_grid(4);
        for (position, _) in grid.tiles() {
            assert_eq!(trace_path(&grid, position, position), None);
        }
    }

    #[test]
    fn trace_into_unwalkable_returns_nothing() {
        let mut grid = open_grid(4);
        grid.set_cell(Position::new(3, 3), Tile::unwalkable());

        assert_eq!(
            trace_path(&grid, Position::ORIGIN, Position::new(3, 3)),
            None
        );
        assert_eq!(
            trace_path(&grid, Position::ORIGIN, Position::new(4, 0)),
            None
        );
    }

    #[test]
    fn trace_prefers_right_then_down_when_reconstructing() {
        let grid = open_grid(3);
        let path = trace_path(&grid, Position::ORIGIN, Position::new(1, 1)).unwrap();

        // Search stops as soon as (1,1) is found, so (2,1) and (1,2) stay
        // undiscovered; walking back, left (0,1) is checked before up (1,0).
        assert_eq!(
            path,
            vec![Position::ORIGIN, Position::new(0, 1), Position::new(1, 1)]
        );
    }

    #[test]
    fn trace_is_deterministic() {
        let grid = Grid::from_ascii(
            "\
            .....\n\
            .#.#.\n\
            .....\n\
            .#.#.\n\
            .....\n",
        )
        .unwrap();

        let first = trace_path(&grid, Position::ORIGIN, Position::new(4, 4)).unwrap();
        for _ in 0..10 {
            assert_eq!(
                trace_path(&grid, Position::ORIGIN, Position::new(4, 4)).unwrap(),
                first
            );
        }
        assert_eq!(first.len(), 9);
        for pair in first.windows(2) {
            assert!(grid.can_traverse(pair[0], pair[1]));
        }
    }

    fn corridor_with_cover(cover: Cover) -> Grid {
        // Only (1,1) touches (1,0); the rest of the top row is solid.
        let mut grid = Grid::from_ascii(
            "\
            #.#\n\
            ...\n",
        )
        .unwrap();
        grid.set_cell(Position::new(1, 0), Tile::with_cover(cover));
        grid
    }

    #[test]
    fn asymmetric_cover_blocks_only_the_configured_edge() {
        let start = Position::new(1, 1);
        let end = Position::new(1, 0);

        let blocked = corridor_with_cover(Cover::single(Direction::Up, CoverLevel::Full));
        assert_eq!(trace_path(&blocked, start, end), None);

        let open = corridor_with_cover(Cover::NONE);
        assert_eq!(trace_path(&open, start, end), Some(vec![start, end]));

        let other_edge = corridor_with_cover(Cover::single(Direction::Left, CoverLevel::Full));
        assert_eq!(trace_path(&other_edge, start, end), Some(vec![start, end]));

        let half = corridor_with_cover(Cover::single(Direction::Up, CoverLevel::Half));
        assert_eq!(trace_path(&half, start, end), Some(vec![start, end]));
    }

    #[test]
    fn cover_on_the_source_blocks_exit() {
        let mut grid = open_grid(2);
        grid.set_cell(
            Position::ORIGIN,
            Tile::with_cover(Cover::single(Direction::Right, CoverLevel::Full)),
        );

        let path = trace_path(&grid, Position::ORIGIN, Position::new(1, 0)).unwrap();
        assert_eq!(
            path,
            vec![
                Position::ORIGIN,
                Position::new(0, 1),
                Position::new(1, 1),
                Position::new(1, 0)
            ]
        );
    }

    #[test]
    fn clamp_path_retraces_within_budget() {
        let grid = open_grid(6);
        let path = trace_path(&grid, Position::ORIGIN, Position::new(5, 0)).unwrap();
        assert_eq!(path.len(), 6);

        let clamped = clamp_path(&grid, path.clone(), 3).unwrap();
        assert_eq!(clamped.len(), 4);
        assert_eq!(clamped.first(), Some(&Position::ORIGIN));
        assert_eq!(clamped.last(), Some(&Position::new(3, 0)));

        assert_eq!(clamp_path(&grid, path.clone(), 5), Some(path.clone()));
        assert_eq!(clamp_path(&grid, path, 0), None);
    }

    #[test]
    fn blast_area_is_a_clipped_diamond() {
        let grid = open_grid(5);

        let center = blast_area(&grid, Position::new(2, 2), 1);
        assert_eq!(
            center,
            vec![
                Position::new(2, 1),
                Position::new(1, 2),
                Position::new(2, 2),
                Position::new(3, 2),
                Position::new(2, 3),
            ]
        );

        let corner = blast_area(&grid, Position::ORIGIN, 1);
        assert_eq!(
            corner,
            vec![Position::ORIGIN, Position::new(1, 0), Position::new(0, 1)]
        );
    }
}
