pub mod keyboard;

use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use unicode_width::UnicodeWidthStr;

use crate::session::CharClass;
use crate::stats::format_time;
use crate::ui::keyboard::KeyboardDiagram;
use crate::{App, AppState};

const HORIZONTAL_MARGIN: u16 = 5;
const VERTICAL_MARGIN: u16 = 2;

impl Widget for &App {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let session = &self.session;
        // styles
        let bold_style = Style::default().add_modifier(Modifier::BOLD);

        let green_bold_style = Style::default().patch(bold_style).fg(Color::Green);
        let red_bold_style = Style::default().patch(bold_style).fg(Color::Red);
        let orange_bold_style = Style::default().patch(bold_style).fg(Color::Rgb(255, 165, 0));

        let dim_bold_style = Style::default()
            .patch(bold_style)
            .add_modifier(Modifier::DIM);

        let underlined_dim_bold_style = Style::default()
            .patch(dim_bold_style)
            .add_modifier(Modifier::UNDERLINED);

        let italic_style = Style::default().add_modifier(Modifier::ITALIC);

        match self.state {
            AppState::Typing => {
                let text: String = session.text().iter().collect();
                let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
                let mut prompt_occupied_lines =
                    ((text.width() as f64 / max_chars_per_line as f64).ceil() + 1.0) as u16;

                if text.width() <= max_chars_per_line as usize {
                    prompt_occupied_lines = 1;
                }

                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .horizontal_margin(HORIZONTAL_MARGIN)
                    .vertical_margin(VERTICAL_MARGIN)
                    .constraints(
                        [
                            Constraint::Length(1), // stats bar
                            Constraint::Min(1),    // padding
                            Constraint::Length(prompt_occupied_lines),
                            Constraint::Min(1), // padding
                            Constraint::Length(KeyboardDiagram::height()),
                            Constraint::Length(1), // padding
                        ]
                        .as_ref(),
                    )
                    .split(area);

                let stats_bar = Paragraph::new(Span::styled(
                    format!(
                        "{}   {} wpm   {}% acc   {} keys",
                        format_time(session.elapsed_ms()),
                        session.wpm(),
                        session.accuracy(),
                        session.keystrokes(),
                    ),
                    bold_style,
                ))
                .alignment(Alignment::Center);
                stats_bar.render(chunks[0], buf);

                let spans = session
                    .text()
                    .iter()
                    .enumerate()
                    .map(|(idx, &expected)| match session.char_class(idx) {
                        CharClass::Current => Span::styled(
                            expected.to_string(),
                            underlined_dim_bold_style,
                        ),
                        CharClass::Unseen => {
                            Span::styled(expected.to_string(), dim_bold_style)
                        }
                        CharClass::Correct => {
                            Span::styled(expected.to_string(), green_bold_style)
                        }
                        CharClass::Corrected => {
                            Span::styled(expected.to_string(), orange_bold_style)
                        }
                        CharClass::Incorrect => Span::styled(
                            match expected {
                                ' ' => "·".to_owned(),
                                c => c.to_string(),
                            },
                            red_bold_style,
                        ),
                    })
                    .collect::<Vec<Span>>();

                let prompt = Paragraph::new(Line::from(spans))
                    .alignment(if prompt_occupied_lines == 1 {
                        Alignment::Center
                    } else {
                        Alignment::Left
                    })
                    .wrap(Wrap { trim: true });
                prompt.render(chunks[2], buf);

                let diagram = KeyboardDiagram::new(
                    session.layout(),
                    session.next_physical_key(),
                    session.last_physical_key(),
                );
                diagram.render(chunks[4], buf);
            }
            AppState::Results => {
                let summary = session.summary();

                let chunks = Layout::default()
                    .direction(Direction::Vertical)
                    .horizontal_margin(HORIZONTAL_MARGIN)
                    .vertical_margin(VERTICAL_MARGIN)
                    .constraints(
                        [
                            Constraint::Min(1),    // padding
                            Constraint::Length(1), // headline
                            Constraint::Length(1), // padding
                            Constraint::Length(1), // detail
                            Constraint::Min(1),    // padding
                            Constraint::Length(1), // legend
                        ]
                        .as_ref(),
                    )
                    .split(area);

                let headline = Paragraph::new(Span::styled(
                    format!("{} wpm   {}% acc", summary.wpm, summary.accuracy),
                    bold_style,
                ))
                .alignment(Alignment::Center);
                headline.render(chunks[1], buf);

                let detail = Paragraph::new(Span::styled(
                    format!(
                        "{}   {} correct chars   {} keystrokes",
                        format_time(summary.elapsed_ms),
                        summary.correct,
                        summary.keystrokes,
                    ),
                    dim_bold_style,
                ))
                .alignment(Alignment::Center);
                detail.render(chunks[3], buf);

                let legend = Paragraph::new(Span::styled(
                    "(r)etry / (n)ew / (esc)ape",
                    italic_style,
                ))
                .alignment(Alignment::Center);
                legend.render(chunks[5], buf);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::{backend::TestBackend, Terminal};

    fn buffer_content(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn typing_screen_shows_prompt_and_keyboard() {
        let mut app = App::with_text("hello");
        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();

        terminal.draw(|f| f.render_widget(&app, f.area())).unwrap();

        let content = buffer_content(&terminal);
        assert!(content.contains("hello"));
        assert!(content.contains("0 keys"));
        // Qwerty caps before any keystroke
        assert!(content.contains("[ q ]"));

        // Still renders after input without panicking
        app.session.type_char('h');
        terminal.draw(|f| f.render_widget(&app, f.area())).unwrap();
    }

    #[test]
    fn results_screen_shows_summary_and_legend() {
        let mut app = App::with_text("hi");
        app.session.type_char('h');
        app.session.type_char('q');
        assert!(app.session.has_finished());
        app.state = AppState::Results;

        let backend = TestBackend::new(80, 24);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| f.render_widget(&app, f.area())).unwrap();

        let content = buffer_content(&terminal);
        assert!(content.contains("wpm"));
        assert!(content.contains("% acc"));
        assert!(content.contains("(r)etry / (n)ew / (esc)ape"));
    }

    #[test]
    fn tiny_terminal_does_not_panic() {
        let app = App::with_text("hello world");
        let backend = TestBackend::new(20, 5);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal.draw(|f| f.render_widget(&app, f.area())).unwrap();
    }
}
