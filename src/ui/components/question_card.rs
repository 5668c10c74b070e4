use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};
use rust_i18n::t;

use crate::session::machine::{Feedback, FeedbackKind};
use crate::session::round::RoundQuestion;
use crate::ui::theme::Theme;

pub struct QuestionCard<'a> {
    pub round: &'a RoundQuestion,
    pub feedback: Option<&'a Feedback>,
    /// Encouragement or try-again line under the options.
    pub message: Option<&'a str>,
    pub theme: &'a Theme,
}

impl QuestionCard<'_> {
    fn option_style(&self, text: &str, is_correct: bool) -> (Style, &'static str) {
        let colors = &self.theme.colors;
        let Some(feedback) = self.feedback else {
            return (Style::default().fg(colors.fg()), "  ");
        };
        let selected = feedback.selected.as_deref() == Some(text);
        if is_correct {
            (
                Style::default()
                    .fg(colors.correct())
                    .add_modifier(Modifier::BOLD),
                "✓ ",
            )
        } else if selected {
            (
                Style::default()
                    .fg(colors.incorrect())
                    .add_modifier(Modifier::CROSSED_OUT),
                "✗ ",
            )
        } else {
            (Style::default().fg(colors.text_dim()), "  ")
        }
    }
}

impl Widget for QuestionCard<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", t!("game.translate")))
            .border_style(Style::default().fg(if self.feedback.is_some() {
                colors.border()
            } else {
                colors.border_focused()
            }));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(self.round.options.len() as u16 * 2),
                Constraint::Min(0),
            ])
            .split(inner);

        let prompt = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(
                self.round.prompt.as_str(),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )),
        ])
        .alignment(Alignment::Center);
        prompt.render(layout[0], buf);

        let mut option_lines = Vec::with_capacity(self.round.options.len() * 2);
        for (i, option) in self.round.options.iter().enumerate() {
            let (style, mark) = self.option_style(&option.text, option.is_correct);
            option_lines.push(Line::from(vec![
                Span::styled(format!("  {mark}[{}] ", i + 1), Style::default().fg(colors.text_dim())),
                Span::styled(option.text.as_str(), style),
            ]));
            option_lines.push(Line::from(""));
        }
        Paragraph::new(option_lines).render(layout[1], buf);

        let mut footer = Vec::new();
        if let Some(feedback) = self.feedback {
            let line = match &feedback.kind {
                FeedbackKind::Correct { points } => Span::styled(
                    t!("game.points", points = format!("{points:.0}")).to_string(),
                    Style::default()
                        .fg(colors.correct())
                        .add_modifier(Modifier::BOLD),
                ),
                FeedbackKind::Wrong => Span::styled(
                    t!("game.answer_was", answer = feedback.correct_text.as_str()).to_string(),
                    Style::default().fg(colors.incorrect()),
                ),
                FeedbackKind::DontKnow => Span::styled(
                    t!("game.dont_know", answer = feedback.correct_text.as_str()).to_string(),
                    Style::default().fg(colors.warning()),
                ),
            };
            footer.push(Line::from(line));
        }
        if let Some(message) = self.message {
            footer.push(Line::from(Span::styled(
                message,
                Style::default().fg(colors.accent()),
            )));
        }
        Paragraph::new(footer)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true })
            .render(layout[2], buf);
    }
}
