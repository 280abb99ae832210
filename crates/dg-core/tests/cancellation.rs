//! Starting a run while another is suspended

use dg_core::{DungeonConfig, Generator, GrowingConfig, GrowingTree, RoomsAndMazes, Tick};

fn config() -> DungeonConfig {
    DungeonConfig {
        width: 31,
        height: 21,
        speed: 0,
        ..Default::default()
    }
}

#[test]
fn test_stale_run_never_writes_again() {
    let mut generator = Generator::<RoomsAndMazes>::with_seed(config(), 7).unwrap();
    let mut first = generator.start(false, 11);
    for _ in 0..10 {
        assert!(matches!(first.resume(), Tick::Paused(_)));
    }
    let frozen = first.dungeon().clone();

    // Instant run started while the first is suspended
    let mut second = generator.start(true, 12);
    assert_eq!(second.resume(), Tick::Done);

    for _ in 0..5 {
        assert_eq!(first.resume(), Tick::Superseded);
    }
    assert_eq!(first.dungeon().grid, frozen.grid);
    assert_eq!(first.dungeon().stats, frozen.stats);
    assert!(!first.is_finished());
    assert!(second.is_finished());
    assert!(second.id() > first.id());
}

#[test]
fn test_superseded_result_matches_fresh_run() {
    let mut generator = Generator::<RoomsAndMazes>::with_seed(config(), 7).unwrap();
    let mut old = generator.start(false, 1);
    let _ = old.resume();

    let mut replacement = generator.start(false, 2);
    while replacement.resume() != Tick::Done {}

    // The interrupted run had no effect on the replacement
    let mut clean = Generator::<RoomsAndMazes>::with_seed(config(), 7).unwrap();
    assert_eq!(clean.generate_seeded(true, 2), Tick::Done);
    let expected = &clean.current().unwrap().dungeon().grid;
    assert!(replacement.dungeon().grid.same_tiles(expected));
}

#[test]
fn test_generate_replaces_current() {
    let mut generator = Generator::<GrowingTree>::with_seed(
        GrowingConfig {
            speed: 0,
            ..Default::default()
        },
        3,
    )
    .unwrap();
    generator.generate(false);
    let first_id = generator.current().unwrap().id();
    assert!(matches!(generator.tick(), Tick::Paused(_)));

    assert_eq!(generator.generate(true), Tick::Done);
    let current_id = generator.current().unwrap().id();
    assert_eq!(current_id, first_id + 1);
    assert_eq!(generator.tick(), Tick::Done);
    assert_eq!(generator.latest_id(), current_id);
}
