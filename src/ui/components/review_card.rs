use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use rust_i18n::t;

use crate::engine::review::ReviewMode;
use crate::ui::theme::Theme;
use crate::words::pool::WordPair;

/// Difficult-word card. The translation grows more emphatic with each reveal.
pub struct ReviewCard<'a> {
    pub review: &'a ReviewMode,
    pub last_completed: Option<&'a WordPair>,
    pub bonus: f64,
    pub theme: &'a Theme,
}

impl ReviewCard<'_> {
    fn reveal_style(&self, level: u8) -> Style {
        let colors = &self.theme.colors;
        match level {
            0 => Style::default().fg(colors.text_dim()),
            1 => Style::default().fg(colors.review_soft()),
            2 => Style::default()
                .fg(colors.review_strong())
                .add_modifier(Modifier::BOLD),
            _ => Style::default()
                .fg(colors.review_strong())
                .add_modifier(Modifier::BOLD | Modifier::UNDERLINED | Modifier::REVERSED),
        }
    }
}

impl Widget for ReviewCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(
                " {} · {} ",
                t!("review.title"),
                t!("review.remaining", count = self.review.remaining())
            ))
            .border_style(Style::default().fg(colors.review_soft()));
        let inner = block.inner(area);
        block.render(area, buf);

        let mut lines = vec![Line::from("")];
        if let Some(word) = self.review.current() {
            let level = self.review.reveals();
            lines.push(Line::from(Span::styled(
                word.source.as_str(),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));
            let target = if level == 0 {
                t!("review.hidden").to_string()
            } else {
                word.target.clone()
            };
            lines.push(Line::from(Span::styled(target, self.reveal_style(level))));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                t!("review.bonus", points = format!("{:.0}", self.bonus)).to_string(),
                Style::default().fg(colors.text_dim()),
            )));
        }
        if let Some(done) = self.last_completed {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                t!("review.done", word = format!("{} = {}", done.source, done.target)).to_string(),
                self.reveal_style(3),
            )));
        }

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}
