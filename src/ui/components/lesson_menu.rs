use ratatui::buffer::Buffer;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Clear, Paragraph, Widget};

use crate::engine::lesson::Lesson;
use crate::ui::theme::Theme;

pub struct LessonMenu<'a> {
    lessons: &'a [Lesson],
    selected: usize,
    theme: &'a Theme,
}

impl<'a> LessonMenu<'a> {
    pub fn new(lessons: &'a [Lesson], selected: usize, theme: &'a Theme) -> Self {
        Self {
            lessons,
            selected,
            theme,
        }
    }
}

impl Widget for LessonMenu<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        Clear.render(area, buf);

        let block = Block::bordered()
            .title(" Lessons ")
            .border_style(Style::default().fg(colors.accent()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(inner);

        let item_layout = Layout::default()
            .direction(Direction::Vertical)
            .constraints(
                self.lessons
                    .iter()
                    .map(|_| Constraint::Length(2))
                    .collect::<Vec<_>>(),
            )
            .split(layout[0]);

        for (i, lesson) in self.lessons.iter().enumerate() {
            let is_selected = i == self.selected;
            let indicator = if is_selected { ">" } else { " " };

            let label_text = format!(" {indicator} [{}] {}", i + 1, lesson.title);
            let keys_text = format!("       keys: {}", lesson.keys);

            let lines = vec![
                Line::from(Span::styled(
                    label_text,
                    Style::default()
                        .fg(if is_selected {
                            colors.accent()
                        } else {
                            colors.fg()
                        })
                        .add_modifier(if is_selected {
                            Modifier::BOLD
                        } else {
                            Modifier::empty()
                        }),
                )),
                Line::from(Span::styled(
                    keys_text,
                    Style::default().fg(colors.placeholder()),
                )),
            ];

            if let Some(rect) = item_layout.get(i) {
                Paragraph::new(lines).render(*rect, buf);
            }
        }

        Paragraph::new(Line::from(Span::styled(
            " [Up/Down] Move  [Enter] Start  [Esc] Back",
            Style::default().fg(colors.placeholder()),
        )))
        .render(layout[1], buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::lesson::LESSONS;

    #[test]
    fn test_marks_selected_lesson() {
        let area = Rect::new(0, 0, 50, 18);
        let mut buf = Buffer::empty(area);
        LessonMenu::new(LESSONS, 1, &Theme::default()).render(area, &mut buf);
        let rows: Vec<String> = (0..area.height)
            .map(|y| (0..area.width).map(|x| buf[(x, y)].symbol()).collect())
            .collect();
        assert!(rows.iter().any(|r| r.contains("> [2] Top Row")));
        assert!(rows.iter().any(|r| r.contains("  [1] Home Row")));
    }
}
