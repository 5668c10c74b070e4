use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget};
use rust_i18n::t;

use crate::player::Gender;
use crate::ui::line_input::LineInput;
use crate::ui::theme::Theme;

pub struct PlayerSetup<'a> {
    pub name: &'a LineInput,
    pub gender: Option<Gender>,
    pub error: Option<&'a str>,
    pub theme: &'a Theme,
}

impl Widget for PlayerSetup<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", t!("app.title")))
            .border_style(Style::default().fg(colors.border_focused()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let (before, at, after) = self.name.render_parts();
        let cursor_style = Style::default().fg(colors.bg()).bg(colors.fg());
        let name_line = Line::from(vec![
            Span::styled(
                format!("{}: ", t!("setup.name_label")),
                Style::default().fg(colors.text_dim()),
            ),
            Span::styled(before, Style::default().fg(colors.fg())),
            Span::styled(at.map_or(" ".to_string(), String::from), cursor_style),
            Span::styled(after, Style::default().fg(colors.fg())),
        ]);

        let choice = |gender: Gender, label: String| {
            let selected = self.gender == Some(gender);
            let style = if selected {
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD | Modifier::REVERSED)
            } else {
                Style::default().fg(colors.fg())
            };
            Span::styled(format!(" {label} "), style)
        };
        let gender_line = Line::from(vec![
            Span::styled(
                format!("{}: ", t!("setup.gender_label")),
                Style::default().fg(colors.text_dim()),
            ),
            choice(Gender::Boy, t!("setup.boy").to_string()),
            Span::raw("  "),
            choice(Gender::Girl, t!("setup.girl").to_string()),
        ]);

        let mut lines = vec![
            Line::from(""),
            Line::from(Span::styled(
                t!("setup.title").to_string(),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                t!("setup.subtitle").to_string(),
                Style::default().fg(colors.text_dim()),
            )),
            Line::from(""),
            name_line,
            Line::from(""),
            gender_line,
            Line::from(""),
            Line::from(Span::styled(
                format!("[Enter] {}", t!("setup.start")),
                Style::default().fg(colors.accent()),
            )),
        ];
        if let Some(error) = self.error {
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                error,
                Style::default().fg(colors.incorrect()),
            )));
        }

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}
