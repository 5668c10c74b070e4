use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use rust_i18n::t;

use crate::session::state::SessionState;
use crate::ui::theme::Theme;

/// Shown when the player pauses or finishes every word.
pub struct Summary<'a> {
    pub player_name: &'a str,
    pub state: &'a SessionState,
    pub complete: bool,
    pub theme: &'a Theme,
}

impl Widget for Summary<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let status = if self.complete {
            t!("summary.complete")
        } else {
            t!("summary.paused")
        };
        let stat = |label: String, value: String| {
            Line::from(vec![
                Span::styled(format!("{label}: "), Style::default().fg(colors.fg())),
                Span::styled(
                    value,
                    Style::default()
                        .fg(colors.accent())
                        .add_modifier(Modifier::BOLD),
                ),
            ])
        };

        let lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                t!("summary.title", name = self.player_name).to_string(),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                status.to_string(),
                Style::default().fg(colors.text_dim()),
            )),
            Line::from(""),
            stat(
                t!("summary.score").to_string(),
                format!("{:.0}", self.state.score.round()),
            ),
            stat(
                t!("summary.answered").to_string(),
                self.state.answered.to_string(),
            ),
            stat(
                t!("summary.correct").to_string(),
                format!("{} ({:.0}%)", self.state.correct, self.state.accuracy()),
            ),
            stat(
                t!("summary.max_combo").to_string(),
                self.state.max_combo.to_string(),
            ),
        ];

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}
