use ratatui::layout::{Constraint, Direction, Layout, Rect};

use crate::keyboard::layout::{LayoutTier, QWERTY};

/// Lines above and below the keyboard that must stay visible: header,
/// at least three output lines, prediction bar, footer.
const MIN_CHROME_HEIGHT: u16 = 8;

pub struct AppLayout {
    pub header: Rect,
    pub output: Rect,
    pub predictions: Rect,
    pub keyboard: Rect,
    pub footer: Rect,
}

impl AppLayout {
    pub fn new(area: Rect, tier: LayoutTier) -> Self {
        let keyboard_height = keyboard_height(tier, area.height);

        let vertical = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(1),
                Constraint::Length(keyboard_height),
                Constraint::Length(1),
            ])
            .split(area);

        Self {
            header: vertical[0],
            output: vertical[1],
            predictions: vertical[2],
            keyboard: vertical[3],
            footer: vertical[4],
        }
    }
}

/// Height of the bordered keyboard panel: three-line keys on the larger tiers
/// when the terminal is tall enough, single-line keys otherwise.
pub fn keyboard_height(tier: LayoutTier, available: u16) -> u16 {
    let rows = QWERTY.len() as u16;
    let tall = rows * 3 + 2;
    if !tier.is_small() && available >= tall + MIN_CHROME_HEIGHT {
        tall
    } else {
        rows + 2
    }
}

pub fn wrapped_line_count(text: &str, width: usize) -> usize {
    if width == 0 {
        return 0;
    }
    let chars = text.chars().count().max(1);
    chars.div_ceil(width)
}

pub fn pack_hint_lines(hints: &[&str], width: usize) -> Vec<String> {
    if width == 0 || hints.is_empty() {
        return Vec::new();
    }

    let prefix = " ";
    let separator = "  ";
    let mut out: Vec<String> = Vec::new();
    let mut current = prefix.to_string();
    let mut has_hint = false;

    for hint in hints {
        if hint.is_empty() {
            continue;
        }
        let candidate = if has_hint {
            format!("{current}{separator}{hint}")
        } else {
            format!("{current}{hint}")
        };
        if candidate.chars().count() <= width {
            current = candidate;
            has_hint = true;
        } else {
            if has_hint {
                out.push(current);
            }
            current = format!("{prefix}{hint}");
            has_hint = true;
        }
    }

    if has_hint {
        out.push(current);
    }
    out
}

pub fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    const MIN_POPUP_WIDTH: u16 = 40;
    const MIN_POPUP_HEIGHT: u16 = 12;

    let requested_w = area.width.saturating_mul(percent_x.min(100)) / 100;
    let requested_h = area.height.saturating_mul(percent_y.min(100)) / 100;

    let target_w = requested_w.max(MIN_POPUP_WIDTH).min(area.width);
    let target_h = requested_h.max(MIN_POPUP_HEIGHT).min(area.height);

    let left = area
        .x
        .saturating_add((area.width.saturating_sub(target_w)) / 2);
    let top = area
        .y
        .saturating_add((area.height.saturating_sub(target_h)) / 2);

    Rect::new(left, top, target_w, target_h)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tall_terminal_gets_three_line_keys() {
        let layout = AppLayout::new(Rect::new(0, 0, 120, 40), LayoutTier::Desktop);
        assert_eq!(layout.keyboard.height, 17);
        assert_eq!(layout.header.height, 1);
        assert_eq!(layout.footer.y, 39);
        assert!(layout.output.height >= 3);
    }

    #[test]
    fn test_short_or_small_gets_single_line_keys() {
        assert_eq!(keyboard_height(LayoutTier::Desktop, 20), 7);
        assert_eq!(keyboard_height(LayoutTier::SmallMobile, 60), 7);
        assert_eq!(keyboard_height(LayoutTier::Mobile, 25), 17);
    }

    #[test]
    fn test_pack_hint_lines_wraps() {
        let lines = pack_hint_lines(&["[F2] Theme", "[F3] Sound", "[Esc] Quit"], 24);
        assert_eq!(lines, vec![" [F2] Theme  [F3] Sound", " [Esc] Quit"]);
    }

    #[test]
    fn test_centered_rect_fits_area() {
        let area = Rect::new(0, 0, 30, 10);
        let popup = centered_rect(50, 50, area);
        assert_eq!(popup, area);
    }

    #[test]
    fn test_wrapped_line_count() {
        assert_eq!(wrapped_line_count("", 10), 1);
        assert_eq!(wrapped_line_count("abcdefghijk", 10), 2);
        assert_eq!(wrapped_line_count("abc", 0), 0);
    }
}
