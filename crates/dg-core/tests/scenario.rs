//! Fixed-seed scenario: 21x15, 50 attempts, room loops 50%, corridor loops
//! 20%, two doors per room, all four stages
//!
//! The rendered grid is compared against `tests/snapshots/scenario.txt`.
//! Set `DG_BLESS=1` to rewrite it after an intended change.

use std::fs;
use std::path::PathBuf;

use dg_core::deadends::is_dead_end;
use dg_core::{DungeonConfig, Generator, RoomsAndMazes, Tick, Tile, render_ascii};

const SEED: u64 = 0x5EED_2024;

fn scenario() -> DungeonConfig {
    DungeonConfig {
        width: 21,
        height: 15,
        attempts: 50,
        room_chance: 50,
        corr_chance: 20,
        max_room_doors: 2,
        target_stage: 4,
        remove_dead_ends: true,
        speed: 0,
        ..Default::default()
    }
}

fn render(seed: u64) -> String {
    let mut generator = Generator::<RoomsAndMazes>::with_seed(scenario(), 0).unwrap();
    assert_eq!(generator.generate_seeded(true, seed), Tick::Done);
    render_ascii(&generator.view().unwrap())
}

fn snapshot_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("snapshots")
        .join("scenario.txt")
}

#[test]
fn test_scenario_matches_snapshot() {
    let rendered = render(SEED);
    let path = snapshot_path();
    let bless = std::env::var("DG_BLESS").is_ok_and(|v| v == "1");

    if bless {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(&path, &rendered).unwrap();
        return;
    }
    let expected = fs::read_to_string(&path).unwrap_or_else(|e| {
        panic!("{}: {e}; run with DG_BLESS=1 to create it", path.display())
    });
    assert_eq!(rendered, expected, "set DG_BLESS=1 to accept the new grid");
}

#[test]
fn test_scenario_is_deterministic() {
    assert_eq!(render(SEED), render(SEED));
    assert_eq!(render(SEED + 1), render(SEED + 1));
}

#[test]
fn test_scenario_shape() {
    let mut generator = Generator::<RoomsAndMazes>::with_seed(scenario(), 0).unwrap();
    generator.generate_seeded(true, SEED);
    let run = generator.current().unwrap();
    let dungeon = run.dungeon();
    let grid = &dungeon.grid;

    assert_eq!((grid.width(), grid.height()), (21, 15));
    for region in dungeon.regions.iter().filter(|r| r.is_room) {
        assert!(region.door_count <= 2);
    }
    for (x, y) in grid.positions() {
        assert!(!is_dead_end(grid, x, y));
    }

    let text = render_ascii(&run.view());
    assert_eq!(text.lines().count(), 15);
    assert!(text.lines().all(|l| l.len() == 21));
    assert!(text.lines().next().unwrap().chars().all(|c| c == '#'));
    if !dungeon.stats.stalled && grid.count(Tile::Floor) > 0 {
        assert!(dungeon.regions.all_connected());
    }
}
