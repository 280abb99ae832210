//! Generator configuration
//!
//! Both configs deserialize from partial JSON: missing fields take the
//! defaults below.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Smallest grid the room-and-maze generator accepts
pub const MIN_GRID: usize = 5;

/// Smallest grid the growing-tree generator accepts (5x5 seed room plus border)
pub const MIN_GROWING_GRID: usize = 7;

/// Animation pacing
///
/// Only changes how often an animated run suspends and for how long, never
/// the grid it produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Base delay in milliseconds; 0 suspends without delay
    pub speed: u32,
    /// Operations between suspensions for the fine-grained stages
    pub batch: u32,
}

impl Pacing {
    pub fn new(speed: u32, batch: u32) -> Self {
        Self {
            speed,
            batch: batch.max(1),
        }
    }

    /// Full delay, used after placing a room or completing a merge
    pub fn full(&self) -> Duration {
        Duration::from_millis(self.speed as u64)
    }

    /// Half delay, used while carving the maze
    pub fn half(&self) -> Duration {
        Duration::from_millis(self.speed as u64 / 2)
    }

    /// Quarter delay, used after opening a loop door
    pub fn quarter(&self) -> Duration {
        Duration::from_millis(self.speed as u64 / 4)
    }

    /// Delay between removed dead ends
    pub fn prune(&self) -> Duration {
        if self.speed == 0 {
            Duration::ZERO
        } else {
            Duration::from_millis((self.speed as u64 / 5).max(1))
        }
    }

    /// Delay between flood waves of a merge
    pub fn flood(&self) -> Duration {
        if self.speed == 0 {
            Duration::ZERO
        } else {
            Duration::from_millis((self.speed as u64 / 2).max(5))
        }
    }

    /// True when `count` operations complete a batch
    pub fn batch_done(&self, count: u32) -> bool {
        count % self.batch.max(1) == 0
    }
}

/// Room-and-maze generator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DungeonConfig {
    /// Grid width, incremented to odd
    pub width: usize,
    /// Grid height, incremented to odd
    pub height: usize,
    /// Room placement attempts
    pub attempts: usize,
    /// Percent chance to open a loop door touching a room
    pub room_chance: u32,
    /// Percent chance to open a loop door between two corridors
    pub corr_chance: u32,
    /// Prune dead-end corridors after connecting
    pub remove_dead_ends: bool,
    /// Door cap per room region
    pub max_room_doors: u32,
    /// Last stage to run (1 rooms, 2 maze, 3 connect, 4 prune)
    pub target_stage: u8,
    /// Default execution mode for `Generator::generate_default`
    pub instant: bool,
    /// Animation delay in milliseconds
    pub speed: u32,
    /// Carve steps or pruned cells between suspensions
    pub batch: u32,
    /// Smallest room side before stretching
    pub min_room_size: usize,
    /// Largest room side before stretching
    pub max_room_size: usize,
}

impl Default for DungeonConfig {
    fn default() -> Self {
        Self {
            width: 61,
            height: 41,
            attempts: 200,
            room_chance: 5,
            corr_chance: 20,
            remove_dead_ends: true,
            max_room_doors: 4,
            target_stage: 4,
            instant: false,
            speed: 5,
            batch: 5,
            min_room_size: 3,
            max_room_size: 7,
        }
    }
}

impl DungeonConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_GRID || self.height < MIN_GRID {
            return Err(ConfigError::GridTooSmall {
                width: self.width,
                height: self.height,
                min: MIN_GRID,
            });
        }
        check_chance("room_chance", self.room_chance)?;
        check_chance("corr_chance", self.corr_chance)?;
        if self.max_room_doors == 0 {
            return Err(ConfigError::NoRoomDoors);
        }
        if !(1..=4).contains(&self.target_stage) {
            return Err(ConfigError::TargetStageOutOfRange(self.target_stage));
        }
        if self.batch == 0 {
            return Err(ConfigError::EmptyBatch);
        }
        check_bounds("room size", self.min_room_size, self.max_room_size)?;
        check_odd_fits("room size", self.min_room_size, self.max_room_size)
    }

    pub fn pacing(&self) -> Pacing {
        Pacing::new(self.speed, self.batch)
    }
}

/// Growing-tree generator configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GrowingConfig {
    pub width: usize,
    pub height: usize,
    /// Feature cap, the seed room included
    pub max_features: usize,
    /// Percent chance that a new feature is a room rather than a corridor
    pub room_chance: u32,
    pub min_room_size: usize,
    pub max_room_size: usize,
    pub min_corridor: usize,
    pub max_corridor: usize,
    pub instant: bool,
    pub speed: u32,
}

impl Default for GrowingConfig {
    fn default() -> Self {
        Self {
            width: 51,
            height: 41,
            max_features: 100,
            room_chance: 60,
            min_room_size: 3,
            max_room_size: 7,
            min_corridor: 3,
            max_corridor: 7,
            instant: false,
            speed: 20,
        }
    }
}

impl GrowingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width < MIN_GROWING_GRID || self.height < MIN_GROWING_GRID {
            return Err(ConfigError::GridTooSmall {
                width: self.width,
                height: self.height,
                min: MIN_GROWING_GRID,
            });
        }
        check_chance("room_chance", self.room_chance)?;
        check_bounds("room size", self.min_room_size, self.max_room_size)?;
        check_bounds("corridor length", self.min_corridor, self.max_corridor)
    }

    pub fn pacing(&self) -> Pacing {
        Pacing::new(self.speed, 1)
    }
}

fn check_chance(name: &'static str, value: u32) -> Result<(), ConfigError> {
    if value > 100 {
        return Err(ConfigError::ChanceOutOfRange { name, value });
    }
    Ok(())
}

fn check_bounds(name: &'static str, min: usize, max: usize) -> Result<(), ConfigError> {
    if min == 0 || min > max {
        return Err(ConfigError::InvalidSizeBounds { name, min, max });
    }
    Ok(())
}

/// Rooms are rolled with odd sides, so `min..=max` must hold an odd value
fn check_odd_fits(name: &'static str, min: usize, max: usize) -> Result<(), ConfigError> {
    if min / 2 > (max - 1) / 2 {
        return Err(ConfigError::NoOddSize { name, min, max });
    }
    Ok(())
}
