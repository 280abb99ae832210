//! dg-tui: Terminal front end for the dungeon generators
//!
//! Animates a run cell by cell with ratatui, or prints finished grids as
//! text.

pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod theme;
pub mod widgets;

pub use app::{App, Dungeons};
pub use config::{Overrides, Variant, build_dungeons};
pub use error::AppError;
pub use theme::Theme;
