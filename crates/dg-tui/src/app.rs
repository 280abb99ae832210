//! Application state and main UI controller

use std::time::{Duration, Instant};

use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Frame;
use ratatui::layout::{Constraint, Direction, Layout};

use dg_core::{DungeonView, Generator, GrowingTree, Renderer, RoomsAndMazes, Tick};

use crate::config::Variant;
use crate::theme::Theme;
use crate::widgets::{GridWidget, StatusWidget};

/// Longest wait between redraws while idle
pub const IDLE_POLL: Duration = Duration::from_millis(100);

/// Resumes allowed per update when pauses are zero-length, so input stays
/// responsive at speed 0
const MAX_STEPS_PER_UPDATE: usize = 64;

/// Either generator behind one interface
#[derive(Debug)]
pub enum Dungeons {
    Classic(Generator<RoomsAndMazes>),
    Growing(Generator<GrowingTree>),
}

impl Dungeons {
    pub fn variant(&self) -> Variant {
        match self {
            Dungeons::Classic(_) => Variant::Classic,
            Dungeons::Growing(_) => Variant::Growing,
        }
    }

    pub fn instant_by_default(&self) -> bool {
        match self {
            Dungeons::Classic(g) => g.config().instant,
            Dungeons::Growing(g) => g.config().instant,
        }
    }

    pub fn generate(&mut self, instant: bool) -> Tick {
        match self {
            Dungeons::Classic(g) => g.generate(instant),
            Dungeons::Growing(g) => g.generate(instant),
        }
    }

    pub fn tick(&mut self) -> Tick {
        match self {
            Dungeons::Classic(g) => g.tick(),
            Dungeons::Growing(g) => g.tick(),
        }
    }

    pub fn view(&self) -> Option<DungeonView<'_>> {
        match self {
            Dungeons::Classic(g) => g.view(),
            Dungeons::Growing(g) => g.view(),
        }
    }

    pub fn drive(&mut self, renderer: &mut dyn Renderer) -> Tick {
        match self {
            Dungeons::Classic(g) => g.drive(renderer),
            Dungeons::Growing(g) => g.drive(renderer),
        }
    }
}

/// Application state
pub struct App {
    dungeons: Dungeons,
    theme: Theme,
    should_quit: bool,
    /// When the current run wants to be resumed
    deadline: Option<Instant>,
    last_tick: Tick,
}

impl App {
    pub fn new(dungeons: Dungeons, theme: Theme) -> Self {
        Self {
            dungeons,
            theme,
            should_quit: false,
            deadline: None,
            last_tick: Tick::Idle,
        }
    }

    pub fn dungeons(&self) -> &Dungeons {
        &self.dungeons
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    pub fn last_tick(&self) -> Tick {
        self.last_tick
    }

    /// Start a new run, superseding the current one
    ///
    /// `toggle` flips the configured execution mode for this run only.
    pub fn regenerate(&mut self, toggle: bool, now: Instant) {
        let instant = self.dungeons.instant_by_default() != toggle;
        let tick = self.dungeons.generate(instant);
        self.schedule(tick, now);
    }

    fn schedule(&mut self, tick: Tick, now: Instant) {
        self.last_tick = tick;
        self.deadline = match tick {
            Tick::Paused(delay) => Some(now + delay),
            Tick::Done | Tick::Superseded | Tick::Idle => None,
        };
    }

    /// Resume the run if its pause has elapsed; returns true if it moved
    pub fn update(&mut self, now: Instant) -> bool {
        let mut moved = false;
        for _ in 0..MAX_STEPS_PER_UPDATE {
            match self.deadline {
                Some(deadline) if deadline <= now => {
                    let tick = self.dungeons.tick();
                    self.schedule(tick, now);
                    moved = true;
                }
                _ => break,
            }
        }
        moved
    }

    /// How long the event loop may block before the next update is due
    pub fn poll_timeout(&self, now: Instant) -> Duration {
        match self.deadline {
            Some(deadline) => deadline.saturating_duration_since(now).min(IDLE_POLL),
            None => IDLE_POLL,
        }
    }

    pub fn handle_event(&mut self, event: Event, now: Instant) {
        if let Event::Key(key) = event {
            self.handle_key(key, now);
        }
    }

    fn handle_key(&mut self, key: KeyEvent, now: Instant) {
        if key.kind == KeyEventKind::Release {
            return;
        }
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Esc => self.should_quit = true,
            KeyCode::Char('r') | KeyCode::Char(' ') => self.regenerate(false, now),
            KeyCode::Char('R') => self.regenerate(true, now),
            _ => {}
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(3), Constraint::Length(2)])
            .split(frame.area());

        let view = self.dungeons.view();
        let title = format!(" {} dungeon ", self.dungeons.variant());
        frame.render_widget(
            GridWidget::new(view.as_ref(), &self.theme, &title),
            chunks[0],
        );
        let variant = self.dungeons.variant().to_string();
        frame.render_widget(
            StatusWidget::new(view.as_ref(), &variant, &self.theme),
            chunks[1],
        );
    }
}
