//! Rooms and mazes
//!
//! Rooms first, a perfect maze in the gaps, doors to join everything into
//! one region, then dead-end pruning. `target_stage` stops the pipeline
//! early, which is handy for looking at the intermediate layouts.

use strum::{Display, EnumIter, IntoStaticStr};

use crate::config::DungeonConfig;
use crate::connector::Connector;
use crate::deadends::DeadEndPruner;
use crate::dungeon::{Advance, Dungeon};
use crate::error::ConfigError;
use crate::generator::Algorithm;
use crate::maze::MazeFiller;
use crate::rng::RandomSource;
use crate::rooms::RoomPlacer;

/// Pipeline stage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, IntoStaticStr, EnumIter)]
#[strum(serialize_all = "title_case")]
pub enum Stage {
    Idle,
    PlacingRooms,
    FillingMaze,
    Connecting,
    RemovingDeadEnds,
    Done,
}

impl Stage {
    /// Position in the pipeline; working stages are 1..=4
    pub const fn number(self) -> u8 {
        match self {
            Stage::Idle => 0,
            Stage::PlacingRooms => 1,
            Stage::FillingMaze => 2,
            Stage::Connecting => 3,
            Stage::RemovingDeadEnds => 4,
            Stage::Done => 5,
        }
    }

    const fn next(self) -> Stage {
        match self {
            Stage::Idle => Stage::PlacingRooms,
            Stage::PlacingRooms => Stage::FillingMaze,
            Stage::FillingMaze => Stage::Connecting,
            Stage::Connecting => Stage::RemovingDeadEnds,
            Stage::RemovingDeadEnds | Stage::Done => Stage::Done,
        }
    }
}

/// Room-and-maze dungeon generator
#[derive(Debug, Clone)]
pub struct RoomsAndMazes {
    config: DungeonConfig,
    stage: Stage,
    rooms: RoomPlacer,
    maze: MazeFiller,
    connector: Connector,
    pruner: DeadEndPruner,
}

impl RoomsAndMazes {
    fn finish_stage(&mut self) -> Advance {
        self.stage = if self.stage.number() >= self.config.target_stage {
            Stage::Done
        } else {
            self.stage.next()
        };
        Advance::Continue
    }
}

impl Algorithm for RoomsAndMazes {
    type Config = DungeonConfig;
    type Stage = Stage;

    const NAME: &'static str = "rooms-and-mazes";

    fn validate(config: &DungeonConfig) -> Result<(), ConfigError> {
        config.validate()
    }

    fn dimensions(config: &DungeonConfig) -> (usize, usize) {
        (config.width, config.height)
    }

    fn instant_by_default(config: &DungeonConfig) -> bool {
        config.instant
    }

    fn new(config: &DungeonConfig) -> Self {
        Self {
            config: config.clone(),
            stage: Stage::Idle,
            rooms: RoomPlacer::new(),
            maze: MazeFiller::new(),
            connector: Connector::new(),
            pruner: DeadEndPruner::new(config.remove_dead_ends),
        }
    }

    fn stage(&self) -> Stage {
        self.stage
    }

    fn advance(&mut self, dungeon: &mut Dungeon, rng: &mut dyn RandomSource) -> Advance {
        let step = match self.stage {
            Stage::Idle => {
                self.stage = Stage::PlacingRooms;
                return Advance::Continue;
            }
            Stage::PlacingRooms => self.rooms.advance(dungeon, &self.config, rng),
            Stage::FillingMaze => self.maze.advance(dungeon, self.config.pacing(), rng),
            Stage::Connecting => self.connector.advance(dungeon, &self.config, rng),
            Stage::RemovingDeadEnds => self.pruner.advance(dungeon, self.config.pacing()),
            Stage::Done => return Advance::Finished,
        };
        match step {
            Advance::Finished => self.finish_stage(),
            other => other,
        }
    }
}
