use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph, Widget, Wrap};

use crate::session::buffer::OutputBuffer;
use crate::ui::layout::wrapped_line_count;
use crate::ui::theme::Theme;

pub struct OutputArea<'a> {
    buffer: &'a OutputBuffer,
    title: &'a str,
    theme: &'a Theme,
}

impl<'a> OutputArea<'a> {
    pub fn new(buffer: &'a OutputBuffer, title: &'a str, theme: &'a Theme) -> Self {
        Self {
            buffer,
            title,
            theme,
        }
    }
}

/// Split text into display lines. Newlines end a line with a visible `↵`;
/// tabs expand to the next multiple of four columns as `→···`.
pub fn display_lines(text: &str) -> Vec<String> {
    let mut lines = vec![String::new()];
    let mut col = 0usize;

    for ch in text.chars() {
        let Some(current) = lines.last_mut() else {
            break;
        };
        match ch {
            '\n' => {
                current.push('\u{21b5}');
                lines.push(String::new());
                col = 0;
            }
            '\t' => {
                let tab_width = 4 - (col % 4);
                current.push('\u{2192}');
                for _ in 1..tab_width {
                    current.push('\u{00b7}');
                }
                col += tab_width;
            }
            _ => {
                current.push(ch);
                col += 1;
            }
        }
    }

    lines
}

impl Widget for OutputArea<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;

        let block = Block::bordered()
            .title(format!(" {} ", self.title))
            .border_style(Style::default().fg(colors.border()))
            .style(Style::default().bg(colors.bg()));
        let inner = block.inner(area);
        block.render(area, buf);

        let cursor = Span::styled(" ", Style::default().bg(colors.accent()));

        if self.buffer.is_empty() {
            let mut spans = vec![cursor];
            if let Some(placeholder) = self.buffer.placeholder() {
                spans.push(Span::styled(
                    placeholder.to_string(),
                    Style::default()
                        .fg(colors.placeholder())
                        .add_modifier(Modifier::ITALIC),
                ));
            }
            Paragraph::new(Line::from(spans))
                .wrap(Wrap { trim: false })
                .render(inner, buf);
            return;
        }

        let texts = display_lines(self.buffer.text());
        let last = texts.len() - 1;
        let mut wrapped = 0usize;
        let lines: Vec<Line> = texts
            .into_iter()
            .enumerate()
            .map(|(i, text)| {
                let mut width = text.chars().count();
                let mut spans = vec![Span::styled(text, Style::default().fg(colors.fg()))];
                if i == last {
                    spans.push(cursor.clone());
                    width += 1;
                }
                wrapped += wrapped_line_count(&" ".repeat(width), inner.width as usize);
                Line::from(spans)
            })
            .collect();

        // Keep the end of the text in view.
        let scroll = wrapped.saturating_sub(inner.height as usize) as u16;
        Paragraph::new(lines)
            .wrap(Wrap { trim: false })
            .scroll((scroll, 0))
            .render(inner, buf);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_lines_marks_whitespace() {
        assert_eq!(display_lines("ab\ncd"), vec!["ab\u{21b5}", "cd"]);
        assert_eq!(display_lines("a\tb"), vec!["a\u{2192}\u{b7}\u{b7}b"]);
        assert_eq!(display_lines(""), vec![""]);
    }

    #[test]
    fn test_placeholder_shown_when_empty() {
        let mut output = OutputBuffer::new();
        output.set_placeholder(Some("asdf jkl;".to_string()));
        let area = Rect::new(0, 0, 30, 3);
        let mut buf = Buffer::empty(area);
        OutputArea::new(&output, "Output", &Theme::default()).render(area, &mut buf);
        let row: String = (0..30).map(|x| buf[(x, 1)].symbol()).collect();
        assert!(row.contains("asdf jkl;"));
    }

    #[test]
    fn test_scrolls_to_last_line() {
        let mut output = OutputBuffer::new();
        output.push_str("one\ntwo\nthree\nfour");
        let area = Rect::new(0, 0, 20, 4);
        let mut buf = Buffer::empty(area);
        OutputArea::new(&output, "Output", &Theme::default()).render(area, &mut buf);
        let row: String = (0..20).map(|x| buf[(x, 2)].symbol()).collect();
        assert!(row.contains("four"));
    }
}
