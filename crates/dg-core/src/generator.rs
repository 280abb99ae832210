//! Generation controller
//!
//! A [`Generator`] owns a configuration and a shared run counter. Every
//! [`Generator::start`] or [`Generator::generate`] bumps the counter and
//! hands out a [`Run`] that remembers the id it was started with. Runs are
//! resumed cooperatively: each [`Run::resume`] first compares its id with
//! the counter and, if a newer run exists, returns [`Tick::Superseded`]
//! without touching its grid.
//!
//! Instant runs execute to completion inside a single resume. Animated runs
//! return [`Tick::Paused`] at every suspension point the algorithm reports,
//! so the host decides how to wait. Pausing never changes what gets drawn
//! for a given random source.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::Duration;

use crate::dungeon::{Advance, Dungeon};
use crate::error::ConfigError;
use crate::rng::{GenRng, RandomSource};
use crate::view::{DungeonView, Renderer};

/// A dungeon-building algorithm driven one unit of work at a time
pub trait Algorithm: Sized {
    type Config: Clone + fmt::Debug;
    type Stage: Copy + Eq + fmt::Debug + fmt::Display + Into<&'static str>;

    /// Short name used in logs
    const NAME: &'static str;

    fn validate(config: &Self::Config) -> Result<(), ConfigError>;

    /// Grid dimensions before odd coercion
    fn dimensions(config: &Self::Config) -> (usize, usize);

    /// Execution mode used by [`Generator::generate_default`]
    fn instant_by_default(config: &Self::Config) -> bool;

    fn new(config: &Self::Config) -> Self;

    fn stage(&self) -> Self::Stage;

    /// Do the next unit of work
    ///
    /// Must eventually return [`Advance::Finished`] and keep returning it.
    fn advance(&mut self, dungeon: &mut Dungeon, rng: &mut dyn RandomSource) -> Advance;
}

/// Outcome of resuming a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tick {
    /// Suspended; resume after this delay
    Paused(Duration),
    /// Completed, now or earlier
    Done,
    /// A newer run was started; this one will never write again
    Superseded,
    /// No run has been started
    Idle,
}

/// One generation, owning its dungeon and random source
pub struct Run<A: Algorithm> {
    id: u64,
    latest: Arc<AtomicU64>,
    instant: bool,
    algorithm: A,
    dungeon: Dungeon,
    rng: Box<dyn RandomSource + Send>,
    last_stage: A::Stage,
    finished: bool,
    superseded: bool,
    pauses: u64,
}

impl<A: Algorithm> fmt::Debug for Run<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Run")
            .field("id", &self.id)
            .field("instant", &self.instant)
            .field("stage", &self.last_stage)
            .field("finished", &self.finished)
            .field("pauses", &self.pauses)
            .finish_non_exhaustive()
    }
}

impl<A: Algorithm> Run<A> {
    fn new(
        id: u64,
        latest: Arc<AtomicU64>,
        config: &A::Config,
        instant: bool,
        rng: Box<dyn RandomSource + Send>,
    ) -> Self {
        let (width, height) = A::dimensions(config);
        let algorithm = A::new(config);
        let dungeon = Dungeon::new(width, height, id);
        log::debug!(
            "{} run {} started: {}x{}, {}",
            A::NAME,
            id,
            dungeon.width(),
            dungeon.height(),
            if instant { "instant" } else { "animated" }
        );
        Self {
            id,
            latest,
            instant,
            last_stage: algorithm.stage(),
            algorithm,
            dungeon,
            rng,
            finished: false,
            superseded: false,
            pauses: 0,
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    /// No newer run has been started since this one
    pub fn is_current(&self) -> bool {
        self.latest.load(Ordering::Acquire) == self.id
    }

    pub fn is_instant(&self) -> bool {
        self.instant
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn stage(&self) -> A::Stage {
        self.algorithm.stage()
    }

    /// Suspension points handed out so far
    pub fn pauses(&self) -> u64 {
        self.pauses
    }

    pub fn dungeon(&self) -> &Dungeon {
        &self.dungeon
    }

    pub fn into_dungeon(self) -> Dungeon {
        self.dungeon
    }

    pub fn view(&self) -> DungeonView<'_> {
        DungeonView::new(
            &self.dungeon,
            self.algorithm.stage().into(),
            self.id,
            self.finished,
        )
    }

    /// Continue until the next suspension point or the end
    pub fn resume(&mut self) -> Tick {
        if !self.is_current() {
            if !self.superseded {
                self.superseded = true;
                log::debug!(
                    "{} run {} superseded by run {}",
                    A::NAME,
                    self.id,
                    self.latest.load(Ordering::Acquire)
                );
            }
            return Tick::Superseded;
        }
        if self.finished {
            return Tick::Done;
        }

        loop {
            let step = self.algorithm.advance(&mut self.dungeon, self.rng.as_mut());
            self.note_stage();
            match step {
                Advance::Continue => {}
                Advance::Pause(delay) => {
                    if !self.instant {
                        self.pauses += 1;
                        return Tick::Paused(delay);
                    }
                }
                Advance::Finished => {
                    self.finished = true;
                    self.log_summary();
                    return Tick::Done;
                }
            }
        }
    }

    fn note_stage(&mut self) {
        let stage = self.algorithm.stage();
        if stage != self.last_stage {
            log::debug!("{} run {}: {} -> {}", A::NAME, self.id, self.last_stage, stage);
            self.last_stage = stage;
        }
    }

    fn log_summary(&self) {
        let stats = &self.dungeon.stats;
        log::info!(
            "{} run {} finished: {} rooms, {} regions, {} merges, {} loops, {} cells pruned{}",
            A::NAME,
            self.id,
            self.dungeon.rooms.len(),
            self.dungeon.regions.len(),
            stats.merges,
            stats.loops,
            stats.pruned_cells,
            if stats.stalled { ", stalled" } else { "" }
        );
    }
}

/// Owns the configuration, the run counter and the current run
pub struct Generator<A: Algorithm> {
    config: A::Config,
    latest: Arc<AtomicU64>,
    seeds: GenRng,
    current: Option<Run<A>>,
}

impl<A: Algorithm> fmt::Debug for Generator<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Generator")
            .field("config", &self.config)
            .field("latest", &self.latest.load(Ordering::Acquire))
            .field("current", &self.current)
            .finish()
    }
}

impl<A: Algorithm> Generator<A> {
    /// Validate `config`; per-run seeds come from entropy
    pub fn new(config: A::Config) -> Result<Self, ConfigError> {
        Self::with_seeds(config, GenRng::from_entropy())
    }

    /// Validate `config`; per-run seeds are derived from `seed`
    pub fn with_seed(config: A::Config, seed: u64) -> Result<Self, ConfigError> {
        Self::with_seeds(config, GenRng::new(seed))
    }

    fn with_seeds(config: A::Config, seeds: GenRng) -> Result<Self, ConfigError> {
        A::validate(&config)?;
        Ok(Self {
            config,
            latest: Arc::new(AtomicU64::new(0)),
            seeds,
            current: None,
        })
    }

    pub fn config(&self) -> &A::Config {
        &self.config
    }

    /// Id of the newest run, 0 before the first
    pub fn latest_id(&self) -> u64 {
        self.latest.load(Ordering::Acquire)
    }

    /// Start a detached run, superseding every earlier one
    pub fn start(&mut self, instant: bool, seed: u64) -> Run<A> {
        self.start_with(instant, Box::new(GenRng::new(seed)))
    }

    /// Start a detached run drawing from `rng`
    pub fn start_with(&mut self, instant: bool, rng: Box<dyn RandomSource + Send>) -> Run<A> {
        let id = self.latest.fetch_add(1, Ordering::AcqRel) + 1;
        Run::new(id, Arc::clone(&self.latest), &self.config, instant, rng)
    }

    /// Start a new current run with a fresh seed
    ///
    /// An instant run is complete when this returns. An animated run has
    /// done no work yet and reports `Tick::Paused(ZERO)`.
    pub fn generate(&mut self, instant: bool) -> Tick {
        let seed = self.seeds.next_seed();
        self.generate_seeded(instant, seed)
    }

    /// [`Generator::generate`] in the configured execution mode
    pub fn generate_default(&mut self) -> Tick {
        let instant = A::instant_by_default(&self.config);
        self.generate(instant)
    }

    pub fn generate_seeded(&mut self, instant: bool, seed: u64) -> Tick {
        log::trace!("seed {seed}");
        self.generate_with(instant, Box::new(GenRng::new(seed)))
    }

    pub fn generate_with(&mut self, instant: bool, rng: Box<dyn RandomSource + Send>) -> Tick {
        let mut run = self.start_with(instant, rng);
        let tick = if instant {
            run.resume()
        } else {
            Tick::Paused(Duration::ZERO)
        };
        self.current = Some(run);
        tick
    }

    /// Resume the current run
    pub fn tick(&mut self) -> Tick {
        match self.current.as_mut() {
            Some(run) => run.resume(),
            None => Tick::Idle,
        }
    }

    pub fn current(&self) -> Option<&Run<A>> {
        self.current.as_ref()
    }

    pub fn view(&self) -> Option<DungeonView<'_>> {
        self.current.as_ref().map(Run::view)
    }

    /// Supersede every outstanding run and drop the current one
    pub fn cancel(&mut self) {
        self.latest.fetch_add(1, Ordering::AcqRel);
        self.current = None;
    }

    /// Drive the current run to the end, sleeping through pauses and
    /// presenting the view at every suspension point
    pub fn drive(&mut self, renderer: &mut dyn Renderer) -> Tick {
        loop {
            let tick = self.tick();
            if let Some(view) = self.view() {
                renderer.present(&view);
            }
            match tick {
                Tick::Paused(delay) => {
                    if !delay.is_zero() {
                        thread::sleep(delay);
                    }
                }
                other => return other,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classic::{RoomsAndMazes, Stage};
    use crate::config::DungeonConfig;

    fn config() -> DungeonConfig {
        DungeonConfig {
            width: 21,
            height: 15,
            speed: 0,
            ..Default::default()
        }
    }

    #[test]
    fn test_rejects_invalid_config() {
        let config = DungeonConfig {
            max_room_doors: 0,
            ..config()
        };
        assert_eq!(
            Generator::<RoomsAndMazes>::new(config).unwrap_err(),
            ConfigError::NoRoomDoors
        );
    }

    #[test]
    fn test_idle_before_first_run() {
        let mut generator = Generator::<RoomsAndMazes>::with_seed(config(), 1).unwrap();
        assert_eq!(generator.tick(), Tick::Idle);
        assert!(generator.view().is_none());
    }

    #[test]
    fn test_instant_completes_in_generate() {
        let mut generator = Generator::<RoomsAndMazes>::with_seed(config(), 1).unwrap();
        assert_eq!(generator.generate_seeded(true, 7), Tick::Done);
        let run = generator.current().unwrap();
        assert!(run.is_finished());
        assert_eq!(run.stage(), Stage::Done);
        assert_eq!(run.pauses(), 0);
        assert_eq!(generator.tick(), Tick::Done);
    }

    #[test]
    fn test_animated_pauses_then_finishes() {
        let mut generator = Generator::<RoomsAndMazes>::with_seed(config(), 1).unwrap();
        assert_eq!(
            generator.generate_seeded(false, 7),
            Tick::Paused(Duration::ZERO)
        );
        assert_eq!(generator.current().unwrap().stage(), Stage::Idle);

        let mut paused = 0;
        loop {
            match generator.tick() {
                Tick::Paused(_) => paused += 1,
                Tick::Done => break,
                other => panic!("unexpected {other:?}"),
            }
        }
        assert!(paused > 0);
        assert_eq!(generator.current().unwrap().pauses(), paused);
    }

    #[test]
    fn test_pacing_does_not_change_result() {
        let mut generator = Generator::<RoomsAndMazes>::with_seed(config(), 1).unwrap();
        generator.generate_seeded(true, 99);
        let instant = generator.current().unwrap().dungeon().grid.clone();

        generator.generate_seeded(false, 99);
        while generator.tick() != Tick::Done {}
        let animated = &generator.current().unwrap().dungeon().grid;
        assert!(instant.same_tiles(animated));
    }

    #[test]
    fn test_new_run_supersedes_old() {
        let mut generator = Generator::<RoomsAndMazes>::with_seed(config(), 1).unwrap();
        let mut old = generator.start(false, 3);
        assert!(matches!(old.resume(), Tick::Paused(_)));

        generator.generate(true);
        assert!(!old.is_current());
        let before = old.dungeon().grid.clone();
        assert_eq!(old.resume(), Tick::Superseded);
        assert_eq!(old.resume(), Tick::Superseded);
        assert_eq!(old.dungeon().grid, before);
        assert!(generator.current().unwrap().is_current());
    }

    #[test]
    fn test_cancel() {
        let mut generator = Generator::<RoomsAndMazes>::with_seed(config(), 1).unwrap();
        let mut run = generator.start(false, 3);
        generator.cancel();
        assert_eq!(run.resume(), Tick::Superseded);
        assert_eq!(generator.tick(), Tick::Idle);
    }

    #[test]
    fn test_drive_presents_every_pause() {
        let mut generator = Generator::<RoomsAndMazes>::with_seed(config(), 1).unwrap();
        generator.generate_seeded(false, 5);
        let mut frames = 0u64;
        let mut last_stage = "";
        let mut present = |view: &DungeonView<'_>| {
            frames += 1;
            last_stage = view.stage();
        };
        assert_eq!(generator.drive(&mut present), Tick::Done);
        let pauses = generator.current().unwrap().pauses();
        // One frame per pause plus the final one
        assert_eq!(frames, pauses + 1);
        assert_eq!(last_stage, "Done");
    }

    #[test]
    fn test_color_offset_is_run_id() {
        let mut generator = Generator::<RoomsAndMazes>::with_seed(config(), 1).unwrap();
        generator.generate_seeded(true, 4);
        let run = generator.current().unwrap();
        let first = run.dungeon().regions.iter().next().unwrap();
        assert_eq!(first.color_seed, run.id());
    }
}
