//! Settings: JSON config file plus command-line overrides

use std::fs;
use std::path::Path;

use clap::ValueEnum;
use serde::de::DeserializeOwned;
use strum::Display;

use dg_core::{DungeonConfig, Generator, GrowingConfig, GrowingTree};

use crate::app::Dungeons;
use crate::error::AppError;

/// Which generator to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Display)]
#[strum(serialize_all = "lowercase")]
pub enum Variant {
    /// Rooms, mazes, connectors and dead-end pruning
    #[default]
    Classic,
    /// Rooms and corridors grown from a central room
    Growing,
}

/// Command-line values that win over the config file
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub speed: Option<u32>,
    pub instant: bool,
    pub attempts: Option<usize>,
    pub room_chance: Option<u32>,
    pub corr_chance: Option<u32>,
    pub max_room_doors: Option<u32>,
    pub target_stage: Option<u8>,
    pub keep_dead_ends: bool,
    pub batch: Option<u32>,
    pub max_features: Option<usize>,
}

impl Overrides {
    pub fn apply_classic(&self, config: &mut DungeonConfig) {
        if let Some(v) = self.width {
            config.width = v;
        }
        if let Some(v) = self.height {
            config.height = v;
        }
        if let Some(v) = self.speed {
            config.speed = v;
        }
        if self.instant {
            config.instant = true;
        }
        if let Some(v) = self.attempts {
            config.attempts = v;
        }
        if let Some(v) = self.room_chance {
            config.room_chance = v;
        }
        if let Some(v) = self.corr_chance {
            config.corr_chance = v;
        }
        if let Some(v) = self.max_room_doors {
            config.max_room_doors = v;
        }
        if let Some(v) = self.target_stage {
            config.target_stage = v;
        }
        if self.keep_dead_ends {
            config.remove_dead_ends = false;
        }
        if let Some(v) = self.batch {
            config.batch = v;
        }
    }

    /// Only the options both generators share, plus `max_features`
    pub fn apply_growing(&self, config: &mut GrowingConfig) {
        if let Some(v) = self.width {
            config.width = v;
        }
        if let Some(v) = self.height {
            config.height = v;
        }
        if let Some(v) = self.speed {
            config.speed = v;
        }
        if self.instant {
            config.instant = true;
        }
        if let Some(v) = self.room_chance {
            config.room_chance = v;
        }
        if let Some(v) = self.max_features {
            config.max_features = v;
        }
    }
}

/// Read a JSON config; missing fields take their defaults
pub fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, AppError> {
    let text = fs::read_to_string(path)?;
    serde_json::from_str(&text).map_err(|source| AppError::ConfigFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Build the generator for `variant` from an optional config file and the
/// overrides
pub fn build_dungeons(
    variant: Variant,
    config_path: Option<&Path>,
    overrides: &Overrides,
    seed: Option<u64>,
) -> Result<Dungeons, AppError> {
    let dungeons = match variant {
        Variant::Classic => {
            let mut config: DungeonConfig = match config_path {
                Some(path) => load_json(path)?,
                None => DungeonConfig::default(),
            };
            overrides.apply_classic(&mut config);
            log::debug!("classic config: {config:?}");
            Dungeons::Classic(match seed {
                Some(seed) => Generator::with_seed(config, seed)?,
                None => Generator::new(config)?,
            })
        }
        Variant::Growing => {
            let mut config: GrowingConfig = match config_path {
                Some(path) => load_json(path)?,
                None => GrowingConfig::default(),
            };
            overrides.apply_growing(&mut config);
            log::debug!("growing config: {config:?}");
            Dungeons::Growing(match seed {
                Some(seed) => Generator::<GrowingTree>::with_seed(config, seed)?,
                None => Generator::<GrowingTree>::new(config)?,
            })
        }
    };
    Ok(dungeons)
}
