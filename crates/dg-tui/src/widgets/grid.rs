//! Dungeon grid widget

use ratatui::prelude::*;
use ratatui::widgets::{Block, Borders, Widget};

use dg_core::DungeonView;

use crate::theme::Theme;

/// Draws every cell as a colored block, two columns wide when it fits
pub struct GridWidget<'a> {
    view: Option<&'a DungeonView<'a>>,
    theme: &'a Theme,
    title: &'a str,
}

impl<'a> GridWidget<'a> {
    pub fn new(view: Option<&'a DungeonView<'a>>, theme: &'a Theme, title: &'a str) -> Self {
        Self { view, theme, title }
    }

    /// Columns per cell for a grid of `width` cells in `available` columns
    pub fn cell_width(width: usize, available: u16) -> u16 {
        if width * 2 <= available as usize { 2 } else { 1 }
    }
}

impl Widget for GridWidget<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(self.theme.border))
            .title(self.title);

        let inner = block.inner(area);
        block.render(area, buf);

        let Some(view) = self.view else {
            return;
        };
        let step = Self::cell_width(view.width(), inner.width);
        let columns = (inner.width / step) as usize;

        for y in 0..view.height().min(inner.height as usize) {
            for x in 0..view.width().min(columns) {
                let color = self.theme.cell(view.color(x, y));
                for dx in 0..step {
                    let pos = Position::new(inner.x + x as u16 * step + dx, inner.y + y as u16);
                    if let Some(cell) = buf.cell_mut(pos) {
                        cell.set_char(' ');
                        cell.set_bg(color);
                    }
                }
            }
        }
    }
}
