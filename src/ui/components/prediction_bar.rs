use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Modifier, Style};
use ratatui::widgets::Widget;

use crate::ui::theme::Theme;

const SEPARATOR: &str = " \u{2502} ";

pub struct PredictionBar<'a> {
    predictions: &'a [String],
    enabled: bool,
    theme: &'a Theme,
}

impl<'a> PredictionBar<'a> {
    pub fn new(predictions: &'a [String], enabled: bool, theme: &'a Theme) -> Self {
        Self {
            predictions,
            enabled,
            theme,
        }
    }
}

fn candidate_label(index: usize, word: &str) -> String {
    format!("{} {word}", index + 1)
}

/// Screen rectangle of each candidate when the bar is drawn into `area`.
pub fn candidate_rects(predictions: &[String], area: Rect) -> Vec<Rect> {
    let mut rects = Vec::new();
    let mut x = area.x + 1;
    let end = area.x + area.width;
    for (i, word) in predictions.iter().enumerate() {
        let width = candidate_label(i, word).chars().count() as u16;
        if x + width > end {
            break;
        }
        rects.push(Rect::new(x, area.y, width, 1));
        x += width + SEPARATOR.chars().count() as u16;
    }
    rects
}

/// Index of the candidate under the terminal cell `(column, row)`.
pub fn candidate_at(predictions: &[String], area: Rect, column: u16, row: u16) -> Option<usize> {
    candidate_rects(predictions, area)
        .into_iter()
        .position(|r| row == r.y && column >= r.x && column < r.x + r.width)
}

impl Widget for PredictionBar<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let colors = &self.theme.colors;
        buf.set_style(area, Style::default().bg(colors.bg()));

        if !self.enabled {
            buf.set_string(
                area.x + 1,
                area.y,
                "predictions off",
                Style::default().fg(colors.placeholder()),
            );
            return;
        }

        let rects = candidate_rects(self.predictions, area);
        for (i, rect) in rects.iter().enumerate() {
            if i > 0 {
                buf.set_string(
                    rect.x - SEPARATOR.chars().count() as u16,
                    rect.y,
                    SEPARATOR,
                    Style::default().fg(colors.border()),
                );
            }
            let label = candidate_label(i, &self.predictions[i]);
            buf.set_string(
                rect.x,
                rect.y,
                label,
                Style::default()
                    .fg(colors.prediction())
                    .add_modifier(Modifier::BOLD),
            );
        }
    }
}
