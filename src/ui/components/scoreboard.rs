use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Widget};
use rust_i18n::t;

use crate::session::state::SessionState;
use crate::ui::theme::Theme;

/// Header strip: game title, score, combo badge and counters.
pub struct Scoreboard<'a> {
    pub title: &'a str,
    pub state: &'a SessionState,
    pub pool_len: usize,
    pub sound_enabled: bool,
    pub compact: bool,
    pub theme: &'a Theme,
}

impl Widget for Scoreboard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        let base = Style::default().bg(colors.header_bg());

        let mut spans = vec![
            Span::styled(
                format!(" {} ", self.title),
                base.fg(colors.header_fg()).add_modifier(Modifier::BOLD),
            ),
            Span::styled(
                format!("| {} {:.0} ", t!("game.score"), self.state.score.round()),
                base.fg(colors.header_fg()),
            ),
        ];

        // Badge only once a streak is going.
        if self.state.combo > 1 {
            spans.push(Span::styled(
                format!(" {} ", t!("game.combo", combo = self.state.combo)),
                base.fg(colors.combo()).add_modifier(Modifier::BOLD),
            ));
        }

        if self.compact {
            spans.push(Span::styled(
                format!(
                    "| {} | {:.0}% ",
                    t!("game.answered", answered = self.state.answered, total = self.pool_len),
                    self.state.accuracy()
                ),
                base.fg(colors.text_dim()),
            ));
        }

        let sound = if self.sound_enabled {
            t!("game.sound_on")
        } else {
            t!("game.sound_off")
        };
        spans.push(Span::styled(format!("| {sound} "), base.fg(colors.text_dim())));

        let lines = vec![Line::from(""), Line::from(spans)];
        Paragraph::new(lines).style(base).render(area, buf);
    }
}
