//! Dungeon generator
//!
//! Animates generation in the terminal, or prints the finished grid.

use std::io::{self, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use clap::Parser;
use crossterm::{
    event, execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;

use dg_core::{DungeonView, render_ascii};
use dg_tui::logging::{self, LogSink};
use dg_tui::{App, AppError, Dungeons, Overrides, Theme, Variant, build_dungeons};

/// Procedural dungeon generator
#[derive(Parser, Debug)]
#[command(name = "dungeon")]
#[command(author, version, about = "Rooms, mazes and growing trees", long_about = None)]
struct Args {
    /// Generator to run
    #[arg(long, value_enum, default_value_t = Variant::Classic)]
    variant: Variant,

    /// JSON file with a full or partial generator config
    #[arg(short = 'c', long = "config")]
    config: Option<PathBuf>,

    /// Seed for reproducible runs
    #[arg(short = 's', long)]
    seed: Option<u64>,

    #[arg(long)]
    width: Option<usize>,

    #[arg(long)]
    height: Option<usize>,

    /// Animation delay in milliseconds
    #[arg(long)]
    speed: Option<u32>,

    /// Skip the animation
    #[arg(short = 'i', long)]
    instant: bool,

    /// Room placement attempts (classic)
    #[arg(long)]
    attempts: Option<usize>,

    /// Percent chance of a loop door next to a room, or of a room feature
    #[arg(long)]
    room_chance: Option<u32>,

    /// Percent chance of a loop door between corridors (classic)
    #[arg(long)]
    corr_chance: Option<u32>,

    /// Door cap per room (classic)
    #[arg(long)]
    max_room_doors: Option<u32>,

    /// Stop after stage 1 rooms, 2 maze, 3 connect or 4 prune (classic)
    #[arg(long)]
    target_stage: Option<u8>,

    /// Leave dead-end corridors in place (classic)
    #[arg(long)]
    keep_dead_ends: bool,

    /// Operations between animation frames (classic)
    #[arg(long)]
    batch: Option<u32>,

    /// Feature cap (growing)
    #[arg(long)]
    max_features: Option<usize>,

    /// Print the finished grid as text instead of starting the UI
    #[arg(short = 'p', long)]
    print: bool,

    /// With --print, print every animation frame
    #[arg(long, requires = "print")]
    frames: bool,

    /// Write logs here while the UI is running
    #[arg(long)]
    log_file: Option<PathBuf>,

    /// Verbose logging
    #[arg(short = 'v', long)]
    verbose: bool,

    /// Colors for a light terminal background
    #[arg(long)]
    light: bool,
}

impl Args {
    fn overrides(&self) -> Overrides {
        Overrides {
            width: self.width,
            height: self.height,
            speed: self.speed,
            instant: self.instant,
            attempts: self.attempts,
            room_chance: self.room_chance,
            corr_chance: self.corr_chance,
            max_room_doors: self.max_room_doors,
            target_stage: self.target_stage,
            keep_dead_ends: self.keep_dead_ends,
            batch: self.batch,
            max_features: self.max_features,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("dungeon: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<(), AppError> {
    let sink = if args.print {
        LogSink::Stderr
    } else {
        match &args.log_file {
            Some(path) => LogSink::File(path),
            None => LogSink::Off,
        }
    };
    logging::install(args.verbose, sink)?;

    let dungeons = build_dungeons(
        args.variant,
        args.config.as_deref(),
        &args.overrides(),
        args.seed,
    )?;

    if args.print {
        print_dungeon(dungeons, args.frames)
    } else {
        let theme = if args.light {
            Theme::light()
        } else {
            Theme::detect()
        };
        run_tui(App::new(dungeons, theme))
    }
}

fn print_dungeon(mut dungeons: Dungeons, frames: bool) -> Result<(), AppError> {
    let mut out = io::stdout().lock();
    if frames {
        let mut failed = None;
        let mut frame = 0u64;
        dungeons.generate(false);
        dungeons.drive(&mut |view: &DungeonView<'_>| {
            if failed.is_some() {
                return;
            }
            frame += 1;
            let text = format!("-- frame {frame}: {}\n{}\n", view.stage(), render_ascii(view));
            if let Err(e) = out.write_all(text.as_bytes()) {
                failed = Some(e);
            }
        });
        if let Some(e) = failed {
            return Err(e.into());
        }
    } else {
        dungeons.generate(true);
        if let Some(view) = dungeons.view() {
            write!(out, "{}", render_ascii(&view))?;
            let stats = view.stats();
            log::info!(
                "{} rooms, {} merges, {} loops, {} pruned{}",
                stats.rooms_placed,
                stats.merges,
                stats.loops,
                stats.pruned_cells,
                if stats.stalled { ", stalled" } else { "" }
            );
        }
    }
    out.flush()?;
    Ok(())
}

fn run_tui(mut app: App) -> Result<(), AppError> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<(), AppError> {
    app.regenerate(false, Instant::now());
    loop {
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(app.poll_timeout(Instant::now()))? {
            app.handle_event(event::read()?, Instant::now());
            if app.should_quit() {
                break;
            }
        }
        app.update(Instant::now());
    }
    Ok(())
}
