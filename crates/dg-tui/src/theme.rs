//! Terminal color theme
//!
//! Cell colors come from the generator; the theme only covers the chrome
//! around the grid. Auto-detects via COLORFGBG, or DG_LIGHT_BG=1.

use ratatui::style::Color;

use dg_core::CellColor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    /// Primary foreground text
    pub text: Color,
    /// Key hints
    pub text_dim: Color,
    pub border: Color,
    /// Stage label
    pub accent: Color,
    /// Finished and connected
    pub good: Color,
    /// Stalled connector
    pub bad: Color,
    /// Use 24-bit cell colors; falls back to the 16-color palette
    pub true_color: bool,
}

impl Theme {
    /// Dark terminal background theme (default)
    pub fn dark() -> Self {
        Self {
            text: Color::White,
            text_dim: Color::DarkGray,
            border: Color::White,
            accent: Color::Cyan,
            good: Color::Green,
            bad: Color::Red,
            true_color: true,
        }
    }

    /// Light terminal background theme
    pub fn light() -> Self {
        Self {
            text: Color::Black,
            text_dim: Color::DarkGray,
            border: Color::DarkGray,
            accent: Color::Blue,
            good: Color::Green,
            bad: Color::Red,
            true_color: true,
        }
    }

    pub fn detect() -> Self {
        let mut theme = if Self::is_light_background() {
            Self::light()
        } else {
            Self::dark()
        };
        theme.true_color = std::env::var("COLORTERM")
            .map(|v| v == "truecolor" || v == "24bit")
            .unwrap_or(true);
        theme
    }

    /// Terminal color for a generator cell color
    pub fn cell(&self, color: CellColor) -> Color {
        if self.true_color {
            let (r, g, b) = color.to_rgb();
            return Color::Rgb(r, g, b);
        }
        match color {
            CellColor::Wall => Color::Black,
            CellColor::Main => Color::White,
            CellColor::Region { seed } => {
                const HUES: [Color; 6] = [
                    Color::Red,
                    Color::Yellow,
                    Color::Green,
                    Color::Cyan,
                    Color::Blue,
                    Color::Magenta,
                ];
                HUES[(CellColor::hue(seed) / 60.0) as usize % HUES.len()]
            }
            CellColor::DoorRoom => Color::LightRed,
            CellColor::DoorCorridor => Color::LightCyan,
        }
    }

    fn is_light_background() -> bool {
        if let Ok(val) = std::env::var("DG_LIGHT_BG") {
            return val == "1" || val.eq_ignore_ascii_case("true");
        }

        // COLORFGBG is "fg;bg" with palette indices
        if let Ok(colorfgbg) = std::env::var("COLORFGBG")
            && let Some(bg_str) = colorfgbg.rsplit(';').next()
            && let Ok(bg_idx) = bg_str.parse::<u8>()
        {
            return matches!(bg_idx, 7 | 9..=15);
        }

        false
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::detect()
    }
}
