use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget};

use crate::engine::quiz::{QuizPhase, QuizSession};
use crate::ui::line_input::LineInput;
use crate::ui::theme::Theme;

pub struct QuizPanel<'a> {
    quiz: &'a QuizSession,
    input: &'a LineInput,
    theme: &'a Theme,
}

impl<'a> QuizPanel<'a> {
    pub fn new(quiz: &'a QuizSession, input: &'a LineInput, theme: &'a Theme) -> Self {
        Self { quiz, input, theme }
    }
}

impl Widget for QuizPanel<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        Clear.render(area, buf);

        let block = Block::bordered()
            .title(" Typing Quiz ")
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let dim = Style::default().fg(colors.placeholder());
        let mut lines = vec![Line::from("")];

        if self.quiz.is_finished() {
            lines.push(Line::from(Span::styled(
                "Quiz complete",
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                format!(
                    "Score: {}/{} ({}%)",
                    self.quiz.score(),
                    self.quiz.total(),
                    self.quiz.percentage()
                ),
                Style::default().fg(colors.fg()),
            )));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled("[r] Restart  [Esc] Close", dim)));
        } else {
            lines.push(Line::from(Span::styled(
                format!(
                    "Word {} of {}   Score {}",
                    self.quiz.current_index() + 1,
                    self.quiz.total(),
                    self.quiz.score()
                ),
                dim,
            )));
            lines.push(Line::from(""));
            lines.push(Line::from(Span::styled(
                self.quiz.current_word().unwrap_or_default().to_string(),
                Style::default()
                    .fg(colors.accent())
                    .add_modifier(Modifier::BOLD),
            )));
            lines.push(Line::from(""));

            let (before, cursor_ch, after) = self.input.render_parts();
            let cursor_style = Style::default().fg(colors.bg()).bg(colors.fg());
            lines.push(Line::from(vec![
                Span::styled("> ", dim),
                Span::styled(before.to_string(), Style::default().fg(colors.fg())),
                Span::styled(cursor_ch.unwrap_or(' ').to_string(), cursor_style),
                Span::styled(after.to_string(), Style::default().fg(colors.fg())),
            ]));
            lines.push(Line::from(""));

            let feedback = match self.quiz.phase() {
                QuizPhase::Feedback { correct: true } => {
                    Span::styled("Correct!", Style::default().fg(colors.success()))
                }
                QuizPhase::Feedback { correct: false } => Span::styled(
                    format!(
                        "Incorrect, it was \"{}\"",
                        self.quiz.current_word().unwrap_or_default()
                    ),
                    Style::default().fg(colors.error()),
                ),
                _ => Span::styled("[Enter] Submit  [Esc] Close", dim),
            };
            lines.push(Line::from(feedback));
        }

        Paragraph::new(lines)
            .alignment(Alignment::Center)
            .render(inner, buf);
    }
}
