use std::time::Instant;

use ratatui::Terminal;
use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::style::Color;

use dg_core::{CellColor, DungeonConfig, Generator, GrowingConfig};
use dg_tui::{App, Dungeons, Theme};

fn buffer_text(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut text = String::new();
    for y in 0..area.height {
        for x in 0..area.width {
            text.push_str(buffer[(x, y)].symbol());
        }
        text.push('\n');
    }
    text
}

fn classic_app() -> App {
    let config = DungeonConfig {
        width: 21,
        height: 15,
        instant: true,
        ..Default::default()
    };
    let generator = Generator::with_seed(config, 11).unwrap();
    App::new(Dungeons::Classic(generator), Theme::dark())
}

#[test]
fn test_render_finished_dungeon() {
    let mut app = classic_app();
    app.regenerate(false, Instant::now());

    // 21 cells at two columns each plus borders
    let backend = TestBackend::new(44, 20);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| app.render(frame)).unwrap();
    let buffer = terminal.backend().buffer().clone();

    let view = app.dungeons().view().unwrap();
    for y in 0..view.height() {
        for x in 0..view.width() {
            let (r, g, b) = view.color(x, y).to_rgb();
            let expected = Color::Rgb(r, g, b);
            let left = (1 + 2 * x) as u16;
            let top = (1 + y) as u16;
            assert_eq!(buffer[(left, top)].bg, expected, "cell ({x}, {y})");
            assert_eq!(buffer[(left + 1, top)].bg, expected, "cell ({x}, {y})");
        }
    }

    // The border is always wall
    let (r, g, b) = CellColor::Wall.to_rgb();
    assert_eq!(buffer[(1, 1)].bg, Color::Rgb(r, g, b));

    let text = buffer_text(&buffer);
    assert!(text.contains("classic dungeon"));
    assert!(text.contains("classic #1 | Done"));
    assert!(text.contains("q: quit"));
}

#[test]
fn test_render_idle() {
    let app = classic_app();
    let backend = TestBackend::new(44, 20);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| app.render(frame)).unwrap();
    let text = buffer_text(terminal.backend().buffer());
    assert!(text.contains("classic | idle"));
}

#[test]
fn test_render_narrow_terminal_uses_single_columns() {
    let config = GrowingConfig {
        width: 31,
        height: 15,
        instant: true,
        ..Default::default()
    };
    let generator = Generator::with_seed(config, 3).unwrap();
    let mut app = App::new(Dungeons::Growing(generator), Theme::dark());
    app.regenerate(false, Instant::now());

    // Too narrow for 62 columns
    let backend = TestBackend::new(40, 20);
    let mut terminal = Terminal::new(backend).unwrap();
    terminal.draw(|frame| app.render(frame)).unwrap();
    let buffer = terminal.backend().buffer().clone();

    let view = app.dungeons().view().unwrap();
    let (r, g, b) = view.color(15, 7).to_rgb();
    // The seed room centre is main
    assert_eq!(view.color(15, 7), CellColor::Main);
    assert_eq!(buffer[(16, 8)].bg, Color::Rgb(r, g, b));
    let text = buffer_text(&buffer);
    assert!(text.contains("growing #1 | Done"));
}
