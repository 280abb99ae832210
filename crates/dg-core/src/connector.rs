//! Connector pass
//!
//! Opens doors through one-cell wall separators until every region that
//! can be reached has been merged into the main set.
//!
//! Each selection round walks the shuffled candidate list once:
//! - a candidate next to an existing door, or touching a room already at
//!   its door cap, is dropped;
//! - the first candidate joining main to a foreign root is a MERGE;
//! - a candidate inside the main set is a LOOP, opened with the room or
//!   corridor chance unless it would leave a 2x2 open block. A failed roll
//!   drops it for the rest of the pass.
//!
//! A round that opens nothing compacts the list. When that removes nothing
//! the pass has stalled: any regions still outside main stay disconnected.

use crate::config::DungeonConfig;
use crate::dungeon::{Advance, Dungeon};
use crate::grid::{DIRS, Grid, Tile};
use crate::region::{RegionId, Regions};
use crate::rng::{RandomSource, shuffle};

/// Wall cell separating two open cells along one axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Candidate {
    pub x: usize,
    pub y: usize,
    pub a: RegionId,
    pub b: RegionId,
}

/// How a selected candidate joins the dungeon
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Join {
    /// Joins main with `absorbed`'s set
    Merge { absorbed: RegionId },
    /// Adds a cycle inside main
    Loop,
}

#[derive(Debug, Clone)]
enum Phase {
    Scan,
    Select,
    /// Relabelling the absorbed component, one wave per advance
    Flood {
        frontier: Vec<(usize, usize)>,
        absorbed: RegionId,
        a: RegionId,
        b: RegionId,
    },
    Done,
}

/// Resumable connector stage
#[derive(Debug, Clone)]
pub struct Connector {
    phase: Phase,
    candidates: Vec<Option<Candidate>>,
}

impl Default for Connector {
    fn default() -> Self {
        Self::new()
    }
}

impl Connector {
    pub fn new() -> Self {
        Self {
            phase: Phase::Scan,
            candidates: Vec::new(),
        }
    }

    /// Candidates still under consideration
    pub fn remaining(&self) -> usize {
        self.candidates.iter().flatten().count()
    }

    pub fn advance(
        &mut self,
        dungeon: &mut Dungeon,
        config: &DungeonConfig,
        rng: &mut dyn RandomSource,
    ) -> Advance {
        match &mut self.phase {
            Phase::Scan => {
                let mut found = scan_candidates(&dungeon.grid);
                shuffle(rng, &mut found);
                dungeon.stats.candidates = found.len();
                log::debug!("connector: {} candidates", found.len());
                self.candidates = found.into_iter().map(Some).collect();
                self.phase = Phase::Select;
                Advance::Continue
            }
            Phase::Select => self.select(dungeon, config, rng),
            Phase::Flood {
                frontier,
                absorbed,
                a,
                b,
            } => {
                let next = flood_wave(dungeon, frontier, *absorbed);
                if next.is_empty() {
                    let (a, b) = (*a, *b);
                    dungeon.regions.union(a, b);
                    self.phase = Phase::Select;
                    Advance::Pause(config.pacing().full())
                } else {
                    *frontier = next;
                    Advance::Pause(config.pacing().flood())
                }
            }
            Phase::Done => Advance::Finished,
        }
    }

    /// One selection round
    fn select(
        &mut self,
        dungeon: &mut Dungeon,
        config: &DungeonConfig,
        rng: &mut dyn RandomSource,
    ) -> Advance {
        let Dungeon { grid, regions, .. } = dungeon;
        let mut chosen = None;

        for slot in self.candidates.iter_mut() {
            let Some(c) = *slot else { continue };

            if crowded(grid, c.x, c.y) {
                *slot = None;
                continue;
            }
            if at_door_cap(regions, c.a, config.max_room_doors)
                || at_door_cap(regions, c.b, config.max_room_doors)
            {
                *slot = None;
                continue;
            }

            let root_a = regions.find(c.a);
            let root_b = regions.find(c.b);
            if root_a != root_b {
                if root_a.is_main() != root_b.is_main() {
                    let absorbed = if root_a.is_main() { root_b } else { root_a };
                    *slot = None;
                    chosen = Some((c, Join::Merge { absorbed }));
                    break;
                }
            } else if root_a.is_main() {
                let corridors = !regions.is_room(c.a) && !regions.is_room(c.b);
                let chance = if corridors {
                    config.corr_chance
                } else {
                    config.room_chance
                };
                let rolled = rng.percent(chance);
                if rolled && !would_form_artifact(grid, c.x, c.y) {
                    *slot = None;
                    chosen = Some((c, Join::Loop));
                    break;
                }
                if !rolled {
                    *slot = None;
                }
            }
        }

        match chosen {
            Some((c, join)) => self.open(dungeon, config, c, join),
            None => {
                let before = self.candidates.len();
                self.candidates.retain(Option::is_some);
                let after = self.candidates.len();
                if after == 0 || after == before {
                    dungeon.stats.stalled = !dungeon.regions.all_connected();
                    if dungeon.stats.stalled {
                        log::debug!("connector stalled with {after} candidates left");
                    }
                    self.phase = Phase::Done;
                    Advance::Finished
                } else {
                    Advance::Continue
                }
            }
        }
    }

    fn open(
        &mut self,
        dungeon: &mut Dungeon,
        config: &DungeonConfig,
        c: Candidate,
        join: Join,
    ) -> Advance {
        let regions = &mut dungeon.regions;
        let room_a = regions.is_room(c.a);
        let room_b = regions.is_room(c.b);
        if room_a {
            regions.add_door(c.a);
        }
        if room_b {
            regions.add_door(c.b);
        }

        let tile = if join == Join::Loop && !room_a && !room_b {
            Tile::DoorCorridor
        } else {
            Tile::DoorRoom
        };
        dungeon.grid.set(c.x, c.y, tile);

        match join {
            Join::Merge { absorbed } => {
                log::trace!("merge {} via ({}, {})", absorbed, c.x, c.y);
                dungeon.stats.merges += 1;
                self.phase = Phase::Flood {
                    frontier: vec![(c.x, c.y)],
                    absorbed,
                    a: c.a,
                    b: c.b,
                };
                Advance::Continue
            }
            Join::Loop => {
                log::trace!("loop door at ({}, {})", c.x, c.y);
                dungeon.stats.loops += 1;
                Advance::Pause(config.pacing().quarter())
            }
        }
    }
}

/// Run the whole pass at once
pub fn connect_regions(dungeon: &mut Dungeon, config: &DungeonConfig, rng: &mut dyn RandomSource) {
    let mut connector = Connector::new();
    while connector.advance(dungeon, config, rng) != Advance::Finished {}
}

/// Every interior wall with open cells on both sides of an axis
///
/// The horizontal pair wins when both axes qualify.
pub fn scan_candidates(grid: &Grid) -> Vec<Candidate> {
    let mut found = Vec::new();
    for y in 1..grid.height() - 1 {
        for x in 1..grid.width() - 1 {
            if grid.get(x, y) != Tile::Wall {
                continue;
            }
            let pair = if grid.get(x - 1, y).is_open() && grid.get(x + 1, y).is_open() {
                (grid.region(x - 1, y), grid.region(x + 1, y))
            } else if grid.get(x, y - 1).is_open() && grid.get(x, y + 1).is_open() {
                (grid.region(x, y - 1), grid.region(x, y + 1))
            } else {
                continue;
            };
            if let (Some(a), Some(b)) = pair {
                found.push(Candidate { x, y, a, b });
            }
        }
    }
    found
}

/// A door already sits next to this cell
fn crowded(grid: &Grid, x: usize, y: usize) -> bool {
    DIRS.iter().any(|(dx, dy)| {
        let (nx, ny) = (x as isize + dx, y as isize + dy);
        grid.in_bounds(nx, ny) && grid.get(nx as usize, ny as usize).is_door()
    })
}

fn at_door_cap(regions: &Regions, id: RegionId, max_doors: u32) -> bool {
    regions.is_room(id) && regions.door_count(id) >= max_doors
}

/// Opening (x, y) would complete a 2x2 open block at one of its corners
pub fn would_form_artifact(grid: &Grid, x: usize, y: usize) -> bool {
    let (x, y) = (x as isize, y as isize);
    let open = |tx: isize, ty: isize| (tx == x && ty == y) || grid.is_open_at(tx, ty);
    [(-1, -1), (1, -1), (-1, 1), (1, 1)]
        .iter()
        .any(|&(dx, dy)| open(x + dx, y + dy) && open(x, y + dy) && open(x + dx, y))
}

/// Relabel the open cells next to `frontier` that still belong to
/// `absorbed`'s set; returns the relabelled cells
fn flood_wave(
    dungeon: &mut Dungeon,
    frontier: &[(usize, usize)],
    absorbed: RegionId,
) -> Vec<(usize, usize)> {
    let Dungeon { grid, regions, .. } = dungeon;
    let mut next = Vec::new();
    for &(x, y) in frontier {
        for (dx, dy) in DIRS {
            let (nx, ny) = (x as isize + dx, y as isize + dy);
            if !grid.is_open_at(nx, ny) {
                continue;
            }
            let (nx, ny) = (nx as usize, ny as usize);
            let Some(region) = grid.region(nx, ny) else {
                continue;
            };
            if regions.find(region) == absorbed {
                grid.set_region(nx, ny, Some(RegionId::MAIN));
                next.push((nx, ny));
            }
        }
    }
    next
}
