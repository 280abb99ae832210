//! dg-core: Dungeon grid generation
//!
//! Two generators over an odd-sized tile grid:
//!
//! - [`RoomsAndMazes`] places non-overlapping rooms, fills the gaps with
//!   perfect mazes, opens doors until every region is reachable and prunes
//!   dead ends.
//! - [`GrowingTree`] grows rooms and corridors outward from a seed room.
//!
//! Both run as resumable state machines under a [`Generator`], which can
//! finish a dungeon in one call or hand control back at every suspension
//! point so a host can animate the build. Starting a new run supersedes
//! the previous one. No I/O happens here; renderers read a [`DungeonView`].

pub mod classic;
pub mod config;
pub mod connector;
pub mod deadends;
pub mod dungeon;
pub mod error;
pub mod generator;
pub mod grid;
pub mod growing;
pub mod maze;
pub mod region;
pub mod rng;
pub mod rooms;
pub mod view;

pub use classic::RoomsAndMazes;
pub use config::{DungeonConfig, GrowingConfig, Pacing};
pub use dungeon::{Advance, Dungeon, RunStats};
pub use error::ConfigError;
pub use generator::{Algorithm, Generator, Run, Tick};
pub use grid::{Grid, Tile};
pub use growing::GrowingTree;
pub use region::{Region, RegionId, Regions};
pub use rng::{GenRng, RandomSource};
pub use rooms::Room;
pub use view::{CellColor, DungeonView, Renderer, render_ascii};
