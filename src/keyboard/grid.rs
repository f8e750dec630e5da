use std::collections::HashMap;

use ratatui::layout::Rect;

use crate::keyboard::display::normalize_for_lookup;
use crate::keyboard::layout::{Breakpoints, KeyClass, LayoutTier, QWERTY, row_spans};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyId {
    pub row: usize,
    pub col: usize,
}

/// Render state of one key at the current layout tier.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedKey {
    pub id: KeyId,
    pub key: &'static str,
    pub shifted: Option<char>,
    pub label: &'static str,
    pub class: KeyClass,
    pub span: u16,
    pub pressed: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct GridSettings {
    pub breakpoints: Breakpoints,
    /// Width change (pixels) that must be exceeded before the grid is rebuilt.
    pub resize_threshold: u32,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            breakpoints: Breakpoints::default(),
            resize_threshold: 100,
        }
    }
}

/// Viewport width in pixels: the terminal's reported pixel width, or the
/// column count scaled by a nominal cell width when the terminal reports none.
pub fn viewport_width(columns: u16, pixel_width: u16, cell_width_px: u32) -> u32 {
    if pixel_width > 0 {
        pixel_width as u32
    } else {
        columns as u32 * cell_width_px
    }
}

/// The rendered keyboard: key render state addressed by [`KeyId`], plus an
/// index from normalized key name to every key carrying that name.
#[derive(Clone, Debug)]
pub struct KeyGrid {
    rows: Vec<Vec<RenderedKey>>,
    index: HashMap<String, Vec<KeyId>>,
    tier: LayoutTier,
    last_width: u32,
    settings: GridSettings,
}

impl KeyGrid {
    pub fn new(width: u32, settings: GridSettings) -> Self {
        let tier = LayoutTier::from_width(width, &settings.breakpoints);
        let (rows, index) = build(tier);
        Self {
            rows,
            index,
            tier,
            last_width: width,
            settings,
        }
    }

    /// Rebuild for a new viewport width, but only when it moved by more than
    /// the resize threshold. Returns whether a rebuild happened.
    pub fn on_resize(&mut self, width: u32) -> bool {
        if width.abs_diff(self.last_width) <= self.settings.resize_threshold {
            return false;
        }
        self.last_width = width;
        self.tier = LayoutTier::from_width(width, &self.settings.breakpoints);
        let (rows, index) = build(self.tier);
        self.rows = rows;
        self.index = index;
        log::debug!("keyboard re-laid out at {width}px ({})", self.tier.as_str());
        true
    }

    pub fn tier(&self) -> LayoutTier {
        self.tier
    }

    pub fn last_width(&self) -> u32 {
        self.last_width
    }

    pub fn rows(&self) -> &[Vec<RenderedKey>] {
        &self.rows
    }

    pub fn key(&self, id: KeyId) -> Option<&RenderedKey> {
        self.rows.get(id.row).and_then(|row| row.get(id.col))
    }

    /// Every rendered key matching `name` (case-insensitive, with aliases).
    pub fn find(&self, name: &str) -> &[KeyId] {
        self.index
            .get(&normalize_for_lookup(name))
            .map(|ids| ids.as_slice())
            .unwrap_or(&[])
    }

    /// Set the pressed flag on every key matching `name`. Returns how many
    /// keys matched.
    pub fn set_pressed(&mut self, name: &str, pressed: bool) -> usize {
        let ids = self.find(name).to_vec();
        for id in &ids {
            self.set_pressed_id(*id, pressed);
        }
        ids.len()
    }

    pub fn set_pressed_id(&mut self, id: KeyId, pressed: bool) {
        if let Some(key) = self.rows.get_mut(id.row).and_then(|row| row.get_mut(id.col)) {
            key.pressed = pressed;
        }
    }

    pub fn clear_pressed(&mut self) {
        for key in self.rows.iter_mut().flatten() {
            key.pressed = false;
        }
    }

    pub fn any_pressed(&self) -> bool {
        self.rows.iter().flatten().any(|k| k.pressed)
    }

    /// Width of the grid in span units: the widest row.
    pub fn total_columns(&self) -> u16 {
        row_spans(self.tier).into_iter().max().unwrap_or(1).max(1)
    }

    /// Height of one key row when drawn into `area`: three lines (bordered
    /// keys) when the tier and area allow it, one line otherwise.
    pub fn row_height(&self, area: Rect) -> u16 {
        let rows = self.rows.len() as u16;
        if !self.tier.is_small() && area.height >= rows * 3 {
            3
        } else {
            1
        }
    }

    /// Screen rectangle of every key that fits in `area`. Rows are centered
    /// horizontally on a grid whose unit is `area.width / total_columns`.
    pub fn layout(&self, area: Rect) -> Vec<(KeyId, Rect)> {
        let unit = (area.width / self.total_columns()).max(1);
        let row_height = self.row_height(area);
        let mut placed = Vec::new();

        for (row_idx, row) in self.rows.iter().enumerate() {
            let y = area.y + row_idx as u16 * row_height;
            if y + row_height > area.y + area.height {
                break;
            }
            let row_span: u16 = row.iter().map(|k| k.span).sum();
            let row_width = row_span.saturating_mul(unit);
            let mut x = area.x + area.width.saturating_sub(row_width) / 2;

            for key in row {
                let width = key.span.saturating_mul(unit);
                if x + width > area.x + area.width {
                    break;
                }
                placed.push((key.id, Rect::new(x, y, width, row_height)));
                x += width;
            }
        }

        placed
    }

    /// Key under the terminal cell `(column, row)` when drawn into `area`.
    pub fn hit_test(&self, area: Rect, column: u16, row: u16) -> Option<KeyId> {
        self.layout(area).into_iter().find_map(|(id, rect)| {
            let inside = column >= rect.x
                && column < rect.x + rect.width
                && row >= rect.y
                && row < rect.y + rect.height;
            inside.then_some(id)
        })
    }
}

fn build(tier: LayoutTier) -> (Vec<Vec<RenderedKey>>, HashMap<String, Vec<KeyId>>) {
    let mut index: HashMap<String, Vec<KeyId>> = HashMap::new();
    let rows = QWERTY
        .iter()
        .enumerate()
        .map(|(row_idx, row)| {
            row.iter()
                .enumerate()
                .map(|(col_idx, def)| {
                    let id = KeyId {
                        row: row_idx,
                        col: col_idx,
                    };
                    index.entry(def.key.to_lowercase()).or_default().push(id);
                    RenderedKey {
                        id,
                        key: def.key,
                        shifted: def.shifted,
                        label: def.label(),
                        class: def.class,
                        span: def.span.resolve(tier),
                        pressed: false,
                    }
                })
                .collect()
        })
        .collect();
    (rows, index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn desktop() -> KeyGrid {
        KeyGrid::new(1024, GridSettings::default())
    }

    #[test]
    fn test_rendered_keys_expose_base_and_shifted() {
        let grid = desktop();
        let one = grid.key(KeyId { row: 0, col: 1 }).unwrap();
        assert_eq!(one.key, "1");
        assert_eq!(one.shifted, Some('!'));
        let q = grid.key(KeyId { row: 1, col: 1 }).unwrap();
        assert_eq!(q.key, "q");
        assert_eq!(q.shifted, None);
    }

    #[test]
    fn test_find_is_case_insensitive_with_aliases() {
        let grid = desktop();
        assert_eq!(grid.find("Q"), &[KeyId { row: 1, col: 1 }]);
        assert_eq!(grid.find("capslock"), &[KeyId { row: 2, col: 0 }]);
        assert_eq!(grid.find(" "), &[KeyId { row: 4, col: 2 }]);
        assert_eq!(grid.find("Space"), &[KeyId { row: 4, col: 2 }]);
        assert_eq!(grid.find("shift").len(), 2);
        assert!(grid.find("F1").is_empty());
    }

    #[test]
    fn test_set_pressed_and_clear() {
        let mut grid = desktop();
        assert_eq!(grid.set_pressed("Shift", true), 2);
        assert!(grid.key(KeyId { row: 3, col: 0 }).unwrap().pressed);
        assert!(grid.key(KeyId { row: 3, col: 11 }).unwrap().pressed);
        grid.set_pressed("shift", false);
        assert!(!grid.any_pressed());
        grid.set_pressed("a", true);
        grid.clear_pressed();
        assert!(!grid.any_pressed());
    }

    #[test]
    fn test_resize_below_threshold_is_ignored() {
        let mut grid = desktop();
        assert!(!grid.on_resize(1024 - 100));
        assert_eq!(grid.last_width(), 1024);
        assert_eq!(grid.tier(), LayoutTier::Desktop);
    }

    #[test]
    fn test_resize_above_threshold_rebuilds_spans() {
        let mut grid = desktop();
        assert_eq!(grid.key(KeyId { row: 4, col: 2 }).unwrap().span, 6);
        assert!(grid.on_resize(400));
        assert_eq!(grid.tier(), LayoutTier::SmallMobile);
        assert_eq!(grid.key(KeyId { row: 4, col: 2 }).unwrap().span, 3);
        assert_eq!(grid.key(KeyId { row: 0, col: 13 }).unwrap().span, 1);
        assert!(grid.on_resize(200));
        assert_eq!(grid.key(KeyId { row: 4, col: 2 }).unwrap().span, 2);
    }

    #[test]
    fn test_rebuild_drops_pressed_state() {
        let mut grid = desktop();
        grid.set_pressed("a", true);
        grid.on_resize(300);
        assert!(!grid.any_pressed());
    }

    #[test]
    fn test_viewport_width_prefers_pixels() {
        assert_eq!(viewport_width(100, 1400, 8), 1400);
        assert_eq!(viewport_width(100, 0, 8), 800);
    }

    #[test]
    fn test_layout_places_every_key_in_wide_area() {
        let grid = desktop();
        let area = Rect::new(0, 0, 150, 15);
        let placed = grid.layout(area);
        let total: usize = grid.rows().iter().map(|r| r.len()).sum();
        assert_eq!(placed.len(), total);
        assert_eq!(grid.row_height(area), 3);
        // 15 columns at 10 cells each: the first row fills the width exactly.
        let (_, first) = placed[0];
        assert_eq!(first, Rect::new(0, 0, 10, 3));
        let backspace = placed
            .iter()
            .find(|(id, _)| *id == KeyId { row: 0, col: 13 })
            .unwrap()
            .1;
        assert_eq!(backspace.width, 20);
    }

    #[test]
    fn test_layout_uses_single_lines_in_short_area() {
        let grid = desktop();
        let area = Rect::new(0, 0, 150, 5);
        assert_eq!(grid.row_height(area), 1);
        assert_eq!(grid.layout(area).last().unwrap().1.y, 4);
    }

    #[test]
    fn test_hit_test_finds_clicked_key() {
        let grid = desktop();
        let area = Rect::new(0, 0, 150, 15);
        assert_eq!(grid.hit_test(area, 5, 1), Some(KeyId { row: 0, col: 0 }));
        assert_eq!(grid.hit_test(area, 15, 4), Some(KeyId { row: 1, col: 0 }));
        // Bottom row spans 12 of 15 columns and is centered, so its left edge
        // is empty.
        assert_eq!(grid.hit_test(area, 2, 13), None);
        assert_eq!(grid.hit_test(area, 200, 1), None);
    }
}
