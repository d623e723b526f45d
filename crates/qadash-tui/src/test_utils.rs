//! Test utilities for TUI rendering verification
//!
//! Widgets render into a plain [`Buffer`]; full screens go through
//! ratatui's `TestBackend` via [`TestTerminal`].

use ratatui::backend::TestBackend;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::widgets::Widget;
use ratatui::{Frame, Terminal};

/// Standard test terminal size
pub const TEST_WIDTH: u16 = 120;
pub const TEST_HEIGHT: u16 = 30;

/// Render `widget` into a fresh `width` x `height` buffer.
pub fn render_widget(widget: impl Widget, width: u16, height: u16) -> Buffer {
    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    widget.render(area, &mut buf);
    buf
}

/// Buffer content as text, one line per row.
pub fn buffer_text(buf: &Buffer) -> String {
    let area = buf.area;
    let mut text = String::new();
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let Some(cell) = buf.cell((x, y)) {
                text.push_str(cell.symbol());
            }
        }
        text.push('\n');
    }
    text
}

/// Wrapper around a `TestBackend` terminal for full-frame rendering.
pub struct TestTerminal {
    terminal: Terminal<TestBackend>,
}

impl TestTerminal {
    pub fn new() -> Self {
        Self::with_size(TEST_WIDTH, TEST_HEIGHT)
    }

    pub fn with_size(width: u16, height: u16) -> Self {
        let terminal = Terminal::new(TestBackend::new(width, height))
            .expect("TestBackend terminal creation cannot fail");
        Self { terminal }
    }

    /// Draw one frame with `f`.
    pub fn draw_with<F>(&mut self, f: F)
    where
        F: FnOnce(&mut Frame),
    {
        self.terminal
            .draw(f)
            .expect("drawing to TestBackend cannot fail");
    }

    pub fn content(&self) -> String {
        buffer_text(self.terminal.backend().buffer())
    }

    pub fn buffer_contains(&self, text: &str) -> bool {
        self.content().contains(text)
    }
}
