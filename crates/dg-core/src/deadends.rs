//! Dead-end pruning
//!
//! Sweeps the interior in row-major order, filling every floor cell with at
//! most one open neighbour. Removals take effect immediately, so one sweep
//! can eat a whole corridor in scan direction. Sweeps repeat until one
//! changes nothing, then doors left without a passage through them are
//! demoted to wall. A demotion can expose new dead ends, so sweeping starts
//! over until both passes are quiet.

use crate::config::Pacing;
use crate::dungeon::{Advance, Dungeon};
use crate::grid::{Grid, Tile};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Sweep { next: usize, changed: bool },
    Doors { next: usize, demoted: bool },
    Done,
}

/// Resumable pruning stage
#[derive(Debug, Clone)]
pub struct DeadEndPruner {
    enabled: bool,
    phase: Phase,
    removed: u32,
}

impl DeadEndPruner {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            phase: Phase::Sweep {
                next: 0,
                changed: false,
            },
            removed: 0,
        }
    }

    pub fn advance(&mut self, dungeon: &mut Dungeon, pacing: Pacing) -> Advance {
        if !self.enabled {
            return Advance::Finished;
        }
        let cells = interior_len(&dungeon.grid);

        match self.phase {
            Phase::Sweep { next, mut changed } => {
                for i in next..cells {
                    let (x, y) = interior_pos(&dungeon.grid, i);
                    if !is_dead_end(&dungeon.grid, x, y) {
                        continue;
                    }
                    dungeon.grid.set(x, y, Tile::Wall);
                    dungeon.grid.set_region(x, y, None);
                    dungeon.stats.pruned_cells += 1;
                    changed = true;
                    self.removed += 1;
                    if pacing.batch_done(self.removed) {
                        self.phase = Phase::Sweep {
                            next: i + 1,
                            changed,
                        };
                        return Advance::Pause(pacing.prune());
                    }
                }

                if changed {
                    self.phase = Phase::Sweep {
                        next: 0,
                        changed: false,
                    };
                    Advance::Pause(pacing.full())
                } else {
                    self.phase = Phase::Doors {
                        next: 0,
                        demoted: false,
                    };
                    Advance::Continue
                }
            }
            Phase::Doors { next, demoted } => {
                for i in next..cells {
                    let (x, y) = interior_pos(&dungeon.grid, i);
                    if !dungeon.grid.get(x, y).is_door() || dungeon.grid.spans_open_axis(x, y) {
                        continue;
                    }
                    dungeon.grid.set(x, y, Tile::Wall);
                    dungeon.stats.demoted_doors += 1;
                    log::trace!("demoted orphan door at ({x}, {y})");
                    self.phase = Phase::Doors {
                        next: i + 1,
                        demoted: true,
                    };
                    return Advance::Pause(pacing.quarter());
                }

                if demoted {
                    self.phase = Phase::Sweep {
                        next: 0,
                        changed: false,
                    };
                    Advance::Continue
                } else {
                    self.phase = Phase::Done;
                    Advance::Finished
                }
            }
            Phase::Done => Advance::Finished,
        }
    }
}

/// Prune the whole grid at once
pub fn remove_dead_ends(dungeon: &mut Dungeon) {
    let mut pruner = DeadEndPruner::new(true);
    let pacing = Pacing::new(0, u32::MAX);
    while pruner.advance(dungeon, pacing) != Advance::Finished {}
}

/// A floor cell with at most one open neighbour
pub fn is_dead_end(grid: &Grid, x: usize, y: usize) -> bool {
    grid.get(x, y) == Tile::Floor && grid.open_neighbors(x, y) <= 1
}

fn interior_len(grid: &Grid) -> usize {
    (grid.width() - 2) * (grid.height() - 2)
}

fn interior_pos(grid: &Grid, i: usize) -> (usize, usize) {
    let span = grid.width() - 2;
    (1 + i % span, 1 + i / span)
}
