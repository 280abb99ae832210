//! Tile grid
//!
//! A row-major array of [`Tile`]s with a parallel array of region owners.
//! Dimensions are always odd: rooms and corridors sit on odd coordinates
//! and the even rows and columns between them are wall separators.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::region::RegionId;

/// Cell state
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
#[repr(u8)]
pub enum Tile {
    #[default]
    Wall = 0,
    Floor = 1,
    /// Door touching a room, or any door that merged two components
    DoorRoom = 2,
    /// Loop door between two corridor regions
    DoorCorridor = 3,
}

impl Tile {
    /// Anything that is not a wall
    pub const fn is_open(&self) -> bool {
        !matches!(self, Tile::Wall)
    }

    pub const fn is_door(&self) -> bool {
        matches!(self, Tile::DoorRoom | Tile::DoorCorridor)
    }

    /// ASCII symbol used by [`crate::render_ascii`]
    pub const fn symbol(&self) -> char {
        match self {
            Tile::Wall => '#',
            Tile::Floor => '.',
            Tile::DoorRoom => '+',
            Tile::DoorCorridor => '\'',
        }
    }

    pub const fn from_symbol(c: char) -> Option<Tile> {
        match c {
            '#' => Some(Tile::Wall),
            '.' => Some(Tile::Floor),
            '+' => Some(Tile::DoorRoom),
            '\'' => Some(Tile::DoorCorridor),
            _ => None,
        }
    }
}

/// Orthogonal directions: north, south, west, east
pub const DIRS: [(isize, isize); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// Round an even dimension up to the next odd one
pub const fn odd(n: usize) -> usize {
    if n % 2 == 0 { n + 1 } else { n }
}

/// Tile map plus per-cell region ownership
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
    regions: Vec<Option<RegionId>>,
}

impl Grid {
    /// Create an all-wall grid, forcing both dimensions odd
    pub fn new(width: usize, height: usize) -> Self {
        let width = odd(width);
        let height = odd(height);
        Self {
            width,
            height,
            tiles: vec![Tile::Wall; width * height],
            regions: vec![None; width * height],
        }
    }

    /// Parse a grid drawn with [`Tile::symbol`] characters, one row per line
    ///
    /// Regions are left unassigned. Returns None for ragged, even-sized or
    /// unknown input.
    pub fn from_ascii(text: &str) -> Option<Self> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect();
        let height = rows.len();
        let width = rows.first()?.chars().count();
        if width % 2 == 0 || height % 2 == 0 {
            return None;
        }
        let mut grid = Grid::new(width, height);
        for (y, row) in rows.iter().enumerate() {
            if row.chars().count() != width {
                return None;
            }
            for (x, c) in row.chars().enumerate() {
                grid.set(x, y, Tile::from_symbol(c)?);
            }
        }
        Some(grid)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn index(&self, x: usize, y: usize) -> usize {
        debug_assert!(
            x < self.width && y < self.height,
            "({x}, {y}) outside {}x{} grid",
            self.width,
            self.height
        );
        y * self.width + x
    }

    pub fn in_bounds(&self, x: isize, y: isize) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    /// Inside the one-cell border ring
    pub fn is_interior(&self, x: usize, y: usize) -> bool {
        x > 0 && y > 0 && x < self.width - 1 && y < self.height - 1
    }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Tile {
        self.tiles[self.index(x, y)]
    }

    #[inline]
    pub fn set(&mut self, x: usize, y: usize, tile: Tile) {
        let i = self.index(x, y);
        self.tiles[i] = tile;
    }

    #[inline]
    pub fn region(&self, x: usize, y: usize) -> Option<RegionId> {
        self.regions[self.index(x, y)]
    }

    #[inline]
    pub fn set_region(&mut self, x: usize, y: usize, region: Option<RegionId>) {
        let i = self.index(x, y);
        self.regions[i] = region;
    }

    /// Set a floor tile owned by `region`
    pub fn carve(&mut self, x: usize, y: usize, region: RegionId) {
        self.set(x, y, Tile::Floor);
        self.set_region(x, y, Some(region));
    }

    /// Open tile at a signed position; out of bounds counts as wall
    pub fn is_open_at(&self, x: isize, y: isize) -> bool {
        self.in_bounds(x, y) && self.get(x as usize, y as usize).is_open()
    }

    /// Number of open orthogonal neighbours
    pub fn open_neighbors(&self, x: usize, y: usize) -> usize {
        DIRS.iter()
            .filter(|(dx, dy)| self.is_open_at(x as isize + dx, y as isize + dy))
            .count()
    }

    /// Both horizontal neighbours open, or both vertical neighbours open
    pub fn spans_open_axis(&self, x: usize, y: usize) -> bool {
        let (x, y) = (x as isize, y as isize);
        (self.is_open_at(x - 1, y) && self.is_open_at(x + 1, y))
            || (self.is_open_at(x, y - 1) && self.is_open_at(x, y + 1))
    }

    pub fn count(&self, tile: Tile) -> usize {
        self.tiles.iter().filter(|&&t| t == tile).count()
    }

    /// All positions, row-major
    pub fn positions(&self) -> impl Iterator<Item = (usize, usize)> + use<> {
        let width = self.width;
        (0..self.height).flat_map(move |y| (0..width).map(move |x| (x, y)))
    }

    /// Same tiles, ignoring region ownership
    pub fn same_tiles(&self, other: &Grid) -> bool {
        self.width == other.width && self.height == other.height && self.tiles == other.tiles
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_new_forces_odd() {
        let grid = Grid::new(20, 14);
        assert_eq!(grid.width(), 21);
        assert_eq!(grid.height(), 15);
        let grid = Grid::new(21, 15);
        assert_eq!((grid.width(), grid.height()), (21, 15));
        assert_eq!(grid.count(Tile::Wall), 21 * 15);
    }

    #[test]
    fn test_set_and_region() {
        let mut grid = Grid::new(7, 7);
        grid.carve(3, 2, RegionId(4));
        assert_eq!(grid.get(3, 2), Tile::Floor);
        assert_eq!(grid.region(3, 2), Some(RegionId(4)));
        assert_eq!(grid.region(2, 3), None);
        assert_eq!(grid.get(2, 3), Tile::Wall);
    }

    #[test]
    #[should_panic]
    fn test_out_of_range_panics() {
        let grid = Grid::new(5, 5);
        grid.get(0, 5);
    }

    #[test]
    fn test_neighbors_and_axis() {
        let grid = Grid::from_ascii(
            "#####
             #.#.#
             #...#
             #.###
             #####",
        )
        .unwrap();
        assert_eq!(grid.open_neighbors(2, 2), 2);
        assert_eq!(grid.open_neighbors(1, 1), 1);
        assert!(grid.spans_open_axis(2, 2));
        assert!(grid.spans_open_axis(2, 1));
        assert!(!grid.spans_open_axis(3, 3));
        assert!(!grid.is_open_at(-1, 0));
        assert!(grid.is_interior(1, 1));
        assert!(!grid.is_interior(4, 2));
    }

    #[test]
    fn test_ascii_symbols() {
        for tile in Tile::iter() {
            assert_eq!(Tile::from_symbol(tile.symbol()), Some(tile));
        }
        assert!(Grid::from_ascii("####\n####\n####").is_none());
        assert!(Grid::from_ascii("###\n#x#\n###").is_none());
    }

    #[test]
    fn test_positions_row_major() {
        let grid = Grid::new(5, 5);
        let positions: Vec<_> = grid.positions().take(6).collect();
        assert_eq!(positions[0], (0, 0));
        assert_eq!(positions[4], (4, 0));
        assert_eq!(positions[5], (0, 1));
        assert_eq!(grid.positions().count(), 25);
    }
}
