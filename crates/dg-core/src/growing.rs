//! Growing-tree dungeons
//!
//! Starts from a 5x5 room in the middle of the grid and keeps a frontier of
//! walls bordering open space. Each step pulls a random frontier wall and
//! tries to attach a room or a straight corridor on its far side. A feature
//! fits when it stays inside the border and the ring around it is solid;
//! the wall then becomes a door. Everything stays connected by
//! construction, so there is no connector or pruning pass.

use strum::{Display, EnumIter, IntoStaticStr};

use crate::config::GrowingConfig;
use crate::dungeon::{Advance, Dungeon};
use crate::error::ConfigError;
use crate::generator::Algorithm;
use crate::grid::{DIRS, Grid, Tile};
use crate::region::RegionId;
use crate::rng::RandomSource;
use crate::rooms::Room;

/// Side of the seed room
pub const SEED_ROOM: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr, EnumIter)]
#[strum(serialize_all = "title_case")]
pub enum Stage {
    Idle,
    Seeding,
    Growing,
    Done,
}

/// Wall next to open space, with the direction pointing away from it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FrontierWall {
    x: usize,
    y: usize,
    dir: (isize, isize),
}

/// Proposed room or corridor rectangle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Feature {
    pub x: isize,
    pub y: isize,
    pub width: usize,
    pub height: usize,
    pub is_room: bool,
}

impl Feature {
    fn contains(&self, x: isize, y: isize) -> bool {
        x >= self.x
            && y >= self.y
            && x < self.x + self.width as isize
            && y < self.y + self.height as isize
    }
}

/// Growing-tree dungeon generator
#[derive(Debug, Clone)]
pub struct GrowingTree {
    config: GrowingConfig,
    stage: Stage,
    frontier: Vec<FrontierWall>,
}

impl Algorithm for GrowingTree {
    type Config = GrowingConfig;
    type Stage = Stage;

    const NAME: &'static str = "growing-tree";

    fn validate(config: &GrowingConfig) -> Result<(), ConfigError> {
        config.validate()
    }

    fn dimensions(config: &GrowingConfig) -> (usize, usize) {
        (config.width, config.height)
    }

    fn instant_by_default(config: &GrowingConfig) -> bool {
        config.instant
    }

    fn new(config: &GrowingConfig) -> Self {
        Self {
            config: config.clone(),
            stage: Stage::Idle,
            frontier: Vec::new(),
        }
    }

    fn stage(&self) -> Stage {
        self.stage
    }

    fn advance(&mut self, dungeon: &mut Dungeon, rng: &mut dyn RandomSource) -> Advance {
        match self.stage {
            Stage::Idle => {
                self.stage = Stage::Seeding;
                Advance::Continue
            }
            Stage::Seeding => {
                let x = dungeon.width() / 2 - 2;
                let y = dungeon.height() / 2 - 2;
                let region = dungeon.regions.create(true);
                self.place(dungeon, x, y, SEED_ROOM, SEED_ROOM, region);
                dungeon.rooms.push(Room {
                    x,
                    y,
                    width: SEED_ROOM,
                    height: SEED_ROOM,
                    region,
                });
                dungeon.stats.rooms_placed += 1;
                dungeon.stats.features = 1;
                self.stage = Stage::Growing;
                Advance::Pause(self.config.pacing().full())
            }
            Stage::Growing => self.grow(dungeon, rng),
            Stage::Done => Advance::Finished,
        }
    }
}

impl GrowingTree {
    /// Frontier walls still queued
    pub fn frontier_len(&self) -> usize {
        self.frontier.len()
    }

    fn grow(&mut self, dungeon: &mut Dungeon, rng: &mut dyn RandomSource) -> Advance {
        if self.frontier.is_empty() || dungeon.stats.features >= self.config.max_features {
            log::debug!(
                "growth stopped: {} features, {} frontier walls",
                dungeon.stats.features,
                self.frontier.len()
            );
            self.stage = Stage::Done;
            return Advance::Continue;
        }

        let wall = self.frontier.swap_remove(rng.below(self.frontier.len()));
        let is_room = rng.percent(self.config.room_chance);
        let feature = define_feature(&self.config, wall.x, wall.y, wall.dir, is_room, rng);
        if !check_space(&dungeon.grid, &feature) {
            return Advance::Continue;
        }

        // Fits, so both coordinates are inside the border
        let (x, y) = (feature.x as usize, feature.y as usize);
        dungeon.grid.set(wall.x, wall.y, Tile::DoorRoom);
        let region = dungeon.regions.create(is_room);
        self.place(dungeon, x, y, feature.width, feature.height, region);

        let behind = dungeon.grid.region(
            (wall.x as isize - wall.dir.0) as usize,
            (wall.y as isize - wall.dir.1) as usize,
        );
        let anchor = behind.unwrap_or(RegionId::MAIN);
        dungeon.regions.union(anchor, region);
        if dungeon.regions.is_room(anchor) {
            dungeon.regions.add_door(anchor);
        }
        if is_room {
            dungeon.regions.add_door(region);
            dungeon.rooms.push(Room {
                x,
                y,
                width: feature.width,
                height: feature.height,
                region,
            });
            dungeon.stats.rooms_placed += 1;
        }
        dungeon.stats.features += 1;
        dungeon.stats.merges += 1;
        log::trace!(
            "{} {}x{} at ({x}, {y}) through ({}, {})",
            if is_room { "room" } else { "corridor" },
            feature.width,
            feature.height,
            wall.x,
            wall.y
        );
        Advance::Pause(self.config.pacing().full())
    }

    /// Carve a rectangle and queue the walls around it
    fn place(
        &mut self,
        dungeon: &mut Dungeon,
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        region: RegionId,
    ) {
        for iy in y..y + height {
            for ix in x..x + width {
                dungeon.grid.carve(ix, iy, region);
            }
        }
        let grid = &dungeon.grid;
        for iy in y..y + height {
            for ix in x..x + width {
                for (dx, dy) in DIRS {
                    let (wx, wy) = (ix as isize + dx, iy as isize + dy);
                    if !grid.in_bounds(wx, wy) || !grid.is_interior(wx as usize, wy as usize) {
                        continue;
                    }
                    let (wx, wy) = (wx as usize, wy as usize);
                    if grid.get(wx, wy) == Tile::Wall {
                        self.frontier.push(FrontierWall {
                            x: wx,
                            y: wy,
                            dir: (dx, dy),
                        });
                    }
                }
            }
        }
    }
}

/// Odd value drawn from `min..=max`
///
/// An even draw moves one up or down at random, never below `min`. With an
/// even `max` the result can be `max + 1`.
pub fn random_odd(rng: &mut dyn RandomSource, min: usize, max: usize) -> usize {
    let mut v = rng.below(max - min + 1) + min;
    if v % 2 == 0 {
        v = if rng.next_f64() > 0.5 { v + 1 } else { v - 1 };
    }
    v.max(min)
}

/// Lay out a feature on the far side of a frontier wall
pub fn define_feature(
    config: &GrowingConfig,
    wall_x: usize,
    wall_y: usize,
    dir: (isize, isize),
    is_room: bool,
    rng: &mut dyn RandomSource,
) -> Feature {
    let (wx, wy) = (wall_x as isize, wall_y as isize);
    if is_room {
        let width = random_odd(rng, config.min_room_size, config.max_room_size);
        let height = random_odd(rng, config.min_room_size, config.max_room_size);
        let (w, h) = (width as isize, height as isize);
        let (x, y) = if dir.1 != 0 {
            let y = if dir.1 < 0 { wy - h } else { wy + 1 };
            (wx - w + 1 + rng.below(width) as isize, y)
        } else {
            let x = if dir.0 < 0 { wx - w } else { wx + 1 };
            (x, wy - h + 1 + rng.below(height) as isize)
        };
        Feature {
            x,
            y,
            width,
            height,
            is_room,
        }
    } else {
        let len = random_odd(rng, config.min_corridor, config.max_corridor);
        let l = len as isize;
        let (x, y, width, height) = if dir.1 != 0 {
            (wx, if dir.1 < 0 { wy - l } else { wy + 1 }, 1, len)
        } else {
            (if dir.0 < 0 { wx - l } else { wx + 1 }, wy, len, 1)
        };
        Feature {
            x,
            y,
            width,
            height,
            is_room,
        }
    }
}

/// Inside the border, and every cell of the surrounding ring is wall
pub fn check_space(grid: &Grid, feature: &Feature) -> bool {
    let (w, h) = (grid.width() as isize, grid.height() as isize);
    let right = feature.x + feature.width as isize;
    let bottom = feature.y + feature.height as isize;
    if feature.x < 1 || feature.y < 1 || right > w - 1 || bottom > h - 1 {
        return false;
    }
    for cy in feature.y - 1..bottom + 1 {
        for cx in feature.x - 1..right + 1 {
            if feature.contains(cx, cy) || !grid.in_bounds(cx, cy) {
                continue;
            }
            if grid.get(cx as usize, cy as usize) != Tile::Wall {
                return false;
            }
        }
    }
    true
}
