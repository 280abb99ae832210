//! Per-run generation state

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::grid::Grid;
use crate::region::Regions;
use crate::rooms::Room;

/// Result of one unit of stage work
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    /// Work was done; keep going without suspending
    Continue,
    /// Suspension point: an animated run yields for this long
    Pause(Duration),
    /// The stage (or algorithm) has nothing left to do
    Finished,
}

/// Counters collected while a run progresses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub rooms_placed: usize,
    pub room_attempts: usize,
    pub maze_regions: usize,
    pub candidates: usize,
    pub merges: usize,
    pub loops: usize,
    /// Connector ended with regions not joined to main
    pub stalled: bool,
    pub pruned_cells: usize,
    pub demoted_doors: usize,
    /// Features placed by the growing-tree generator, seed room included
    pub features: usize,
}

/// Everything one run owns: the grid, its regions and the rooms placed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dungeon {
    pub grid: Grid,
    pub regions: Regions,
    pub rooms: Vec<Room>,
    pub stats: RunStats,
}

impl Dungeon {
    /// All-wall dungeon; `color_offset` seeds region colors (the run id)
    pub fn new(width: usize, height: usize, color_offset: u64) -> Self {
        Self {
            grid: Grid::new(width, height),
            regions: Regions::new(color_offset),
            rooms: Vec::new(),
            stats: RunStats::default(),
        }
    }

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }
}
