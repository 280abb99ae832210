//! Room placement
//!
//! Rolls odd-sized rectangles at odd coordinates and keeps the ones whose
//! footprint, grown by a one-cell ring, is still solid wall. Rejections
//! are silent: the attempt budget bounds the work and zero rooms is a
//! legal outcome.

use serde::{Deserialize, Serialize};

use crate::config::DungeonConfig;
use crate::dungeon::{Advance, Dungeon};
use crate::grid::{Grid, Tile};
use crate::region::RegionId;
use crate::rng::RandomSource;

/// A placed room
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    /// Left edge of the floor
    pub x: usize,
    /// Top edge of the floor
    pub y: usize,
    pub width: usize,
    pub height: usize,
    pub region: RegionId,
}

impl Room {
    /// Check if this room, grown by `buffer` on every side, touches the
    /// other room's floor
    pub fn touches(&self, other: &Room, buffer: usize) -> bool {
        let x1 = self.x.saturating_sub(buffer);
        let y1 = self.y.saturating_sub(buffer);
        let x2 = self.x + self.width + buffer;
        let y2 = self.y + self.height + buffer;

        !(x2 <= other.x
            || x1 >= other.x + other.width
            || y2 <= other.y
            || y1 >= other.y + other.height)
    }

    pub fn area(&self) -> usize {
        self.width * self.height
    }
}

/// Resumable room placement stage: one attempt per advance
#[derive(Debug, Clone, Default)]
pub struct RoomPlacer {
    attempt: usize,
}

impl RoomPlacer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn advance(
        &mut self,
        dungeon: &mut Dungeon,
        config: &DungeonConfig,
        rng: &mut dyn RandomSource,
    ) -> Advance {
        if self.attempt >= config.attempts {
            return Advance::Finished;
        }
        self.attempt += 1;
        dungeon.stats.room_attempts += 1;

        match roll_room(&dungeon.grid, config, rng) {
            Some((x, y, width, height)) => {
                let room = stamp_room(dungeon, x, y, width, height);
                log::trace!(
                    "room {} at ({}, {}) {}x{} on attempt {}",
                    room.region,
                    x,
                    y,
                    width,
                    height,
                    self.attempt
                );
                Advance::Pause(config.pacing().full())
            }
            None => Advance::Continue,
        }
    }
}

/// Run every placement attempt at once
pub fn place_rooms(dungeon: &mut Dungeon, config: &DungeonConfig, rng: &mut dyn RandomSource) {
    let mut placer = RoomPlacer::new();
    while placer.advance(dungeon, config, rng) != Advance::Finished {}
}

/// Roll one candidate rectangle and check it against the grid
///
/// Always draws the same number of values whether or not the roll fits.
fn roll_room(
    grid: &Grid,
    config: &DungeonConfig,
    rng: &mut dyn RandomSource,
) -> Option<(usize, usize, usize, usize)> {
    let k_min = config.min_room_size / 2;
    let k_max = (config.max_room_size - 1) / 2;
    let size = (rng.below(k_max - k_min + 1) + k_min) * 2 + 1;
    let stretch = ((rng.next_f64() * (1.0 + size as f64 / 2.0)) as usize) * 2;

    let (mut width, mut height) = (size, size);
    if rng.coin() {
        width += stretch;
    } else {
        height += stretch;
    }

    let x = lattice_origin(rng, grid.width(), width);
    let y = lattice_origin(rng, grid.height(), height);

    if x < 1
        || y < 1
        || x as usize + width >= grid.width()
        || y as usize + height >= grid.height()
    {
        return None;
    }
    let (x, y) = (x as usize, y as usize);

    for ry in y - 1..y + height + 1 {
        for rx in x - 1..x + width + 1 {
            if grid.get(rx, ry) != Tile::Wall {
                return None;
            }
        }
    }
    Some((x, y, width, height))
}

/// Odd coordinate for a span of `size` cells along an axis of `extent`
///
/// Negative when the span cannot fit.
fn lattice_origin(rng: &mut dyn RandomSource, extent: usize, size: usize) -> isize {
    let room = extent as f64 - size as f64;
    (rng.next_f64() * room / 2.0).floor() as isize * 2 + 1
}

fn stamp_room(dungeon: &mut Dungeon, x: usize, y: usize, width: usize, height: usize) -> Room {
    let region = dungeon.regions.create(true);
    for ry in y..y + height {
        for rx in x..x + width {
            dungeon.grid.carve(rx, ry, region);
        }
    }
    let room = Room {
        x,
        y,
        width,
        height,
        region,
    };
    dungeon.rooms.push(room);
    dungeon.stats.rooms_placed += 1;
    room
}
