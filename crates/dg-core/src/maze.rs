//! Maze fill
//!
//! Every odd lattice point still solid after room placement seeds a new
//! corridor region, grown by a randomized depth-first walk that carves two
//! cells per step. The walk keeps its own stack, so grid size never
//! touches the call stack. Each region comes out as a perfect maze.

use crate::config::Pacing;
use crate::dungeon::{Advance, Dungeon};
use crate::grid::{DIRS, Grid, Tile};
use crate::region::RegionId;
use crate::rng::RandomSource;

/// An in-progress walk
#[derive(Debug, Clone)]
struct Walk {
    region: RegionId,
    stack: Vec<(usize, usize)>,
}

/// Resumable maze fill stage: one carve step (or pop) per advance
#[derive(Debug, Clone)]
pub struct MazeFiller {
    /// Next lattice point to scan
    cursor: (usize, usize),
    walk: Option<Walk>,
    carved: u32,
}

impl Default for MazeFiller {
    fn default() -> Self {
        Self::new()
    }
}

impl MazeFiller {
    pub fn new() -> Self {
        Self {
            cursor: (1, 1),
            walk: None,
            carved: 0,
        }
    }

    pub fn advance(
        &mut self,
        dungeon: &mut Dungeon,
        pacing: Pacing,
        rng: &mut dyn RandomSource,
    ) -> Advance {
        let Some(walk) = self.walk.as_mut() else {
            return self.seed_next(dungeon);
        };

        let Some(&(x, y)) = walk.stack.last() else {
            self.walk = None;
            return Advance::Continue;
        };

        let mut options = [(0usize, 0usize, 0isize, 0isize); 4];
        let mut count = 0;
        for &(dx, dy) in &DIRS {
            let nx = x as isize + dx * 2;
            let ny = y as isize + dy * 2;
            if carvable(&dungeon.grid, nx, ny) {
                options[count] = (nx as usize, ny as usize, dx, dy);
                count += 1;
            }
        }

        if count == 0 {
            walk.stack.pop();
            if walk.stack.is_empty() {
                self.walk = None;
            }
            return Advance::Continue;
        }

        let (nx, ny, dx, dy) = options[rng.below(count)];
        let mid_x = (x as isize + dx) as usize;
        let mid_y = (y as isize + dy) as usize;
        dungeon.grid.carve(mid_x, mid_y, walk.region);
        dungeon.grid.carve(nx, ny, walk.region);
        walk.stack.push((nx, ny));

        self.carved += 1;
        if pacing.batch_done(self.carved) {
            Advance::Pause(pacing.half())
        } else {
            Advance::Continue
        }
    }

    /// Scan forward for the next solid lattice point and start a walk there
    fn seed_next(&mut self, dungeon: &mut Dungeon) -> Advance {
        let (width, height) = (dungeon.width(), dungeon.height());
        let (mut x, mut y) = self.cursor;
        while y < height {
            while x < width {
                if dungeon.grid.get(x, y) == Tile::Wall {
                    let region = dungeon.regions.create(false);
                    dungeon.grid.carve(x, y, region);
                    dungeon.stats.maze_regions += 1;
                    log::trace!("maze region {region} seeded at ({x}, {y})");
                    self.walk = Some(Walk {
                        region,
                        stack: vec![(x, y)],
                    });
                    self.cursor = (x + 2, y);
                    return Advance::Continue;
                }
                x += 2;
            }
            x = 1;
            y += 2;
        }
        self.cursor = (x, y);
        Advance::Finished
    }
}

/// Lattice target two steps away: strictly inside the border and solid
fn carvable(grid: &Grid, x: isize, y: isize) -> bool {
    x > 0
        && y > 0
        && x < grid.width() as isize - 1
        && y < grid.height() as isize - 1
        && grid.get(x as usize, y as usize) == Tile::Wall
}

/// Fill the whole grid at once
pub fn fill_maze(dungeon: &mut Dungeon, rng: &mut dyn RandomSource) {
    let mut filler = MazeFiller::new();
    let pacing = Pacing::new(0, u32::MAX);
    while filler.advance(dungeon, pacing, rng) != Advance::Finished {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::GenRng;
    use std::collections::{HashSet, VecDeque};

    /// Floor cells of one region form a tree under 4-adjacency
    fn is_tree(dungeon: &Dungeon, region: RegionId) -> bool {
        let grid = &dungeon.grid;
        let cells: HashSet<(usize, usize)> = grid
            .positions()
            .filter(|&(x, y)| grid.get(x, y) == Tile::Floor && grid.region(x, y) == Some(region))
            .collect();
        let mut edges = 0;
        for &(x, y) in &cells {
            if cells.contains(&(x + 1, y)) {
                edges += 1;
            }
            if cells.contains(&(x, y + 1)) {
                edges += 1;
            }
        }
        let Some(&start) = cells.iter().next() else {
            return false;
        };
        let mut seen = HashSet::from([start]);
        let mut queue = VecDeque::from([start]);
        while let Some((x, y)) = queue.pop_front() {
            for (dx, dy) in DIRS {
                let n = ((x as isize + dx) as usize, (y as isize + dy) as usize);
                if cells.contains(&n) && seen.insert(n) {
                    queue.push_back(n);
                }
            }
        }
        seen.len() == cells.len() && edges + 1 == cells.len()
    }

    #[test]
    fn test_empty_grid_is_one_perfect_maze() {
        let mut dungeon = Dungeon::new(21, 15, 0);
        fill_maze(&mut dungeon, &mut GenRng::new(42));

        assert_eq!(dungeon.regions.len(), 1);
        assert!(is_tree(&dungeon, RegionId(0)));
        // Every lattice point is carved
        for y in (1..15).step_by(2) {
            for x in (1..21).step_by(2) {
                assert_eq!(dungeon.grid.get(x, y), Tile::Floor);
            }
        }
        // Even-even cells are never carved
        assert_eq!(dungeon.grid.get(2, 2), Tile::Wall);
        // 10x7 lattice points, 69 connecting cells
        assert_eq!(dungeon.grid.count(Tile::Floor), 70 + 69);
    }

    #[test]
    fn test_border_untouched() {
        let mut dungeon = Dungeon::new(31, 21, 0);
        fill_maze(&mut dungeon, &mut GenRng::new(9));
        let grid = &dungeon.grid;
        for x in 0..grid.width() {
            assert_eq!(grid.get(x, 0), Tile::Wall);
            assert_eq!(grid.get(x, grid.height() - 1), Tile::Wall);
        }
        for y in 0..grid.height() {
            assert_eq!(grid.get(0, y), Tile::Wall);
            assert_eq!(grid.get(grid.width() - 1, y), Tile::Wall);
        }
    }

    #[test]
    fn test_walls_split_into_regions() {
        // A full-height room column splits the lattice into two blobs
        let mut dungeon = Dungeon::new(21, 11, 0);
        let room = dungeon.regions.create(true);
        for y in 1..10 {
            for x in 9..12 {
                dungeon.grid.carve(x, y, room);
            }
        }
        fill_maze(&mut dungeon, &mut GenRng::new(3));

        assert_eq!(dungeon.stats.maze_regions, 2);
        assert!(is_tree(&dungeon, RegionId(1)));
        assert!(is_tree(&dungeon, RegionId(2)));
        assert_eq!(dungeon.grid.region(1, 1), Some(RegionId(1)));
        assert_eq!(dungeon.grid.region(13, 1), Some(RegionId(2)));
        // The wall ring next to the room stays solid
        assert_eq!(dungeon.grid.get(8, 5), Tile::Wall);
        assert_eq!(dungeon.grid.get(12, 5), Tile::Wall);
    }

    #[test]
    fn test_pauses_every_batch() {
        let mut dungeon = Dungeon::new(21, 15, 0);
        let mut filler = MazeFiller::new();
        let mut rng = GenRng::new(1);
        let pacing = Pacing::new(10, 5);
        let mut pauses = 0;
        loop {
            match filler.advance(&mut dungeon, pacing, &mut rng) {
                Advance::Pause(d) => {
                    assert_eq!(d, pacing.half());
                    pauses += 1;
                }
                Advance::Continue => {}
                Advance::Finished => break,
            }
        }
        // 69 carve steps
        assert_eq!(pauses, 69 / 5);
    }
}
