//! Status line widget

use ratatui::prelude::*;
use ratatui::widgets::Widget;

use dg_core::DungeonView;

use crate::theme::Theme;

const HINTS: &str = "r/space: new  R: new (toggle instant)  q: quit";

pub struct StatusWidget<'a> {
    view: Option<&'a DungeonView<'a>>,
    variant: &'a str,
    theme: &'a Theme,
}

impl<'a> StatusWidget<'a> {
    pub fn new(view: Option<&'a DungeonView<'a>>, variant: &'a str, theme: &'a Theme) -> Self {
        Self {
            view,
            variant,
            theme,
        }
    }

    /// Run summary: stage, then counters
    pub fn summary(&self) -> String {
        let Some(view) = self.view else {
            return format!("{} | idle", self.variant);
        };
        let stats = view.stats();
        let mut line = format!(
            "{} #{} | {} | rooms {} | merges {} | loops {}",
            self.variant,
            view.run_id(),
            view.stage(),
            stats.rooms_placed,
            stats.merges,
            stats.loops,
        );
        if stats.pruned_cells > 0 {
            line.push_str(&format!(" | pruned {}", stats.pruned_cells));
        }
        if stats.features > 0 {
            line.push_str(&format!(" | features {}", stats.features));
        }
        if stats.stalled {
            line.push_str(" | stalled");
        }
        line
    }
}

impl Widget for StatusWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let stalled = self.view.is_some_and(|v| v.stats().stalled);
        let done = self.view.is_some_and(|v| v.is_finished());
        let color = if stalled {
            self.theme.bad
        } else if done {
            self.theme.good
        } else {
            self.theme.accent
        };

        buf.set_string(area.x, area.y, self.summary(), Style::default().fg(color));
        if area.height > 1 {
            buf.set_string(
                area.x,
                area.y + 1,
                HINTS,
                Style::default().fg(self.theme.text_dim),
            );
        }
    }
}
