use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Cell, Paragraph, Row, Table, Widget};
use rust_i18n::t;
use uuid::Uuid;

use crate::leaderboard::LeaderboardEntry;
use crate::ui::theme::Theme;

pub struct LeaderboardTable<'a> {
    pub title: String,
    pub entries: &'a [LeaderboardEntry],
    /// Row to highlight.
    pub player_id: Option<Uuid>,
    pub players_today: Option<usize>,
    pub theme: &'a Theme,
}

impl Widget for LeaderboardTable<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let mut block = Block::bordered()
            .title(format!(" {} ", self.title))
            .border_style(Style::default().fg(colors.border()));
        if let Some(count) = self.players_today {
            block = block.title_bottom(Line::from(format!(
                " {} ",
                t!("leaderboard.players_today", count = count)
            )));
        }
        let inner = block.inner(area);
        block.render(area, buf);

        if self.entries.is_empty() {
            Paragraph::new(t!("leaderboard.empty").to_string())
                .style(Style::default().fg(colors.text_dim()))
                .centered()
                .render(inner, buf);
            return;
        }

        let header = Row::new(vec![
            Cell::from(t!("leaderboard.rank").to_string()),
            Cell::from(t!("leaderboard.player").to_string()),
            Cell::from(t!("leaderboard.score").to_string()),
            Cell::from(t!("leaderboard.accuracy").to_string()),
        ])
        .style(
            Style::default()
                .fg(colors.accent())
                .add_modifier(Modifier::BOLD),
        );

        let rows = self.entries.iter().enumerate().map(|(i, entry)| {
            let style = if Some(entry.player_id) == self.player_id {
                Style::default()
                    .fg(colors.combo())
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(colors.fg())
            };
            Row::new(vec![
                Cell::from(format!("{}", i + 1)),
                Cell::from(entry.name.clone()),
                Cell::from(format!("{:.0}", entry.score.round())),
                Cell::from(format!("{}%", entry.accuracy_percent())),
            ])
            .style(style)
        });

        let widths = [
            Constraint::Length(5),
            Constraint::Min(8),
            Constraint::Length(8),
            Constraint::Length(9),
        ];
        Table::new(rows, widths)
            .header(header)
            .column_spacing(1)
            .render(inner, buf);
    }
}
