//! Read-only access for renderers

use crate::dungeon::{Dungeon, RunStats};
use crate::grid::{Grid, Tile};
use crate::region::RegionId;
use crate::rooms::Room;

/// Cosmetic color class of a cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CellColor {
    Wall,
    /// Floor joined to the main region
    Main,
    /// Floor of a region not yet merged into main
    Region { seed: u64 },
    DoorRoom,
    DoorCorridor,
}

impl CellColor {
    pub const MAIN_RGB: (u8, u8, u8) = (0xF5, 0xF5, 0xDC);
    pub const DOOR_ROOM_RGB: (u8, u8, u8) = (0xCF, 0x66, 0x79);
    pub const DOOR_CORRIDOR_RGB: (u8, u8, u8) = (0x03, 0xDA, 0xC6);

    /// Golden-angle hue for a region seed, in degrees
    pub fn hue(seed: u64) -> f64 {
        (seed as f64 * 137.508) % 360.0
    }

    pub fn to_rgb(self) -> (u8, u8, u8) {
        match self {
            CellColor::Wall => (0, 0, 0),
            CellColor::Main => Self::MAIN_RGB,
            CellColor::Region { seed } => hsl_to_rgb(Self::hue(seed), 0.60, 0.35),
            CellColor::DoorRoom => Self::DOOR_ROOM_RGB,
            CellColor::DoorCorridor => Self::DOOR_CORRIDOR_RGB,
        }
    }
}

fn hsl_to_rgb(hue: f64, saturation: f64, lightness: f64) -> (u8, u8, u8) {
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let sector = hue / 60.0;
    let x = chroma * (1.0 - (sector % 2.0 - 1.0).abs());
    let (r, g, b) = match sector as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = lightness - chroma / 2.0;
    let channel = |v: f64| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    (channel(r), channel(g), channel(b))
}

/// Snapshot handed to renderers at every suspension point
#[derive(Debug, Clone, Copy)]
pub struct DungeonView<'a> {
    dungeon: &'a Dungeon,
    stage: &'static str,
    run_id: u64,
    finished: bool,
}

impl<'a> DungeonView<'a> {
    pub fn new(dungeon: &'a Dungeon, stage: &'static str, run_id: u64, finished: bool) -> Self {
        Self {
            dungeon,
            stage,
            run_id,
            finished,
        }
    }

    pub fn width(&self) -> usize {
        self.dungeon.width()
    }

    pub fn height(&self) -> usize {
        self.dungeon.height()
    }

    pub fn grid(&self) -> &'a Grid {
        &self.dungeon.grid
    }

    pub fn tile(&self, x: usize, y: usize) -> Tile {
        self.dungeon.grid.get(x, y)
    }

    /// Root of the cell's region, None for walls, doors and pruned cells
    pub fn region_root(&self, x: usize, y: usize) -> Option<RegionId> {
        self.dungeon
            .grid
            .region(x, y)
            .map(|id| self.dungeon.regions.root(id))
    }

    pub fn color(&self, x: usize, y: usize) -> CellColor {
        match self.tile(x, y) {
            Tile::Wall => CellColor::Wall,
            Tile::DoorRoom => CellColor::DoorRoom,
            Tile::DoorCorridor => CellColor::DoorCorridor,
            Tile::Floor => match self.region_root(x, y) {
                None => CellColor::Wall,
                Some(root) if root.is_main() => CellColor::Main,
                Some(root) => CellColor::Region {
                    seed: self.dungeon.regions.get(root).color_seed,
                },
            },
        }
    }

    /// Human-readable name of the current stage
    pub fn stage(&self) -> &'static str {
        self.stage
    }

    pub fn run_id(&self) -> u64 {
        self.run_id
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn stats(&self) -> &'a RunStats {
        &self.dungeon.stats
    }

    pub fn rooms(&self) -> &'a [Room] {
        &self.dungeon.rooms
    }
}

/// Receives a view at every suspension point and once at the end
pub trait Renderer {
    fn present(&mut self, view: &DungeonView<'_>);
}

impl<F: FnMut(&DungeonView<'_>)> Renderer for F {
    fn present(&mut self, view: &DungeonView<'_>) {
        self(view)
    }
}

/// One line per row using [`Tile::symbol`]
pub fn render_ascii(view: &DungeonView<'_>) -> String {
    let mut out = String::with_capacity((view.width() + 1) * view.height());
    for y in 0..view.height() {
        for x in 0..view.width() {
            out.push(view.tile(x, y).symbol());
        }
        out.push('\n');
    }
    out
}
