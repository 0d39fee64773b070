use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::Widget,
};

use crate::layout::KeyLayout;

const KEY_WIDTH: u16 = 5;
const ROW_OFFSETS: [u16; 3] = [0, 2, 4];

/// Three staggered rows of key caps showing the current scrambled layout.
/// Key positions are physical (qwerty); the cap text is whatever letter
/// the scramble put there. The highlight marks the physical key that will
/// produce the next expected character; the pressed mark echoes the key
/// the user hit last.
pub struct KeyboardDiagram<'a> {
    layout: &'a KeyLayout,
    highlight: Option<char>,
    pressed: Option<char>,
}

impl<'a> KeyboardDiagram<'a> {
    pub fn new(layout: &'a KeyLayout, highlight: Option<char>, pressed: Option<char>) -> Self {
        Self {
            layout,
            highlight,
            pressed,
        }
    }

    /// Rendered height in terminal rows.
    pub fn height() -> u16 {
        3
    }
}

impl Widget for KeyboardDiagram<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        if area.height < Self::height() {
            return;
        }

        let reference = KeyLayout::qwerty();
        let full_width = ROW_OFFSETS[0] + 10 * KEY_WIDTH;
        let left = area.x + area.width.saturating_sub(full_width) / 2;

        let highlight = self.highlight.map(|c| c.to_ascii_uppercase());
        let pressed = self.pressed.map(|c| c.to_ascii_uppercase());

        for (row_idx, keys) in self.layout.rows().iter().enumerate() {
            let y = area.y + row_idx as u16;
            if y >= area.y + area.height {
                break;
            }

            for (col_idx, &cap) in keys.iter().enumerate() {
                let x = left + ROW_OFFSETS[row_idx] + col_idx as u16 * KEY_WIDTH;
                if x + KEY_WIDTH > area.x + area.width {
                    break;
                }

                let physical = reference.key_at(row_idx, col_idx);
                let style = if highlight == Some(physical) {
                    Style::default()
                        .fg(Color::Black)
                        .bg(Color::Yellow)
                        .add_modifier(Modifier::BOLD)
                } else if pressed == Some(physical) {
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::Gray)
                };

                let display = format!("[ {} ]", cap.to_ascii_lowercase());
                buf.set_string(x, y, &display, style);
            }
        }
    }
}
