//! Input plumbing: normalized events, click targets and hit testing.
//!
//! The DOM side (`main.rs`) turns a pixel position into a terminal cell and
//! asks [`ClickState::hit_test`] which action lives there. Screens register
//! their targets while rendering, so the map always matches what is drawn.

use ratzilla::ratatui::layout::Rect;

/// Keyboard, mouse and touch input after normalization.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A printable character.
    Key(char),
    /// A click/tap on a registered target, carrying its action ID.
    Click(u16),
    Enter,
    Escape,
    Backspace,
    Tab,
}

#[derive(Debug, Clone)]
pub struct ClickTarget {
    /// Hit region in terminal cells.
    pub rect: Rect,
    pub action_id: u16,
}

/// Shared between the draw callback (which fills it) and the mouse callback.
pub struct ClickState {
    pub targets: Vec<ClickTarget>,
    pub terminal_cols: u16,
    pub terminal_rows: u16,
}

impl ClickState {
    pub fn new() -> Self {
        Self {
            targets: Vec::new(),
            terminal_cols: 0,
            terminal_rows: 0,
        }
    }

    /// Start a new frame with the given terminal size.
    pub fn reset(&mut self, cols: u16, rows: u16) {
        self.terminal_cols = cols;
        self.terminal_rows = rows;
        self.targets.clear();
    }

    pub fn add_click_target(&mut self, rect: Rect, action_id: u16) {
        if rect.width > 0 && rect.height > 0 {
            self.targets.push(ClickTarget { rect, action_id });
        }
    }

    /// One full-width row of `area`. Rows outside the area are ignored.
    pub fn add_row_target(&mut self, area: Rect, row: u16, action_id: u16) {
        if row >= area.y && row < area.y + area.height {
            self.add_click_target(Rect::new(area.x, row, area.width, 1), action_id);
        }
    }

    /// Targets for a row of tabs laid out left to right inside `area`.
    ///
    /// `tabs` holds `(display_width, action_id)` for each padded label. Each
    /// target covers its label plus half of each neighbouring separator; the
    /// first and last tabs stretch to the area edges so there are no dead
    /// cells between tabs.
    pub fn register_tabs(&mut self, tabs: &[(u16, u16)], separator_width: u16, area: Rect) {
        if tabs.is_empty() || area.width == 0 {
            return;
        }

        let mut spans: Vec<(u16, u16)> = Vec::with_capacity(tabs.len());
        let mut cursor = 0u16;
        for &(w, _) in tabs {
            spans.push((cursor, cursor + w));
            cursor += w + separator_width;
        }

        let last = tabs.len() - 1;
        for (i, &(_, action_id)) in tabs.iter().enumerate() {
            let left = if i == 0 {
                0
            } else {
                let gap_start = spans[i - 1].1;
                gap_start + (spans[i].0 - gap_start) / 2
            };
            let right = if i == last {
                area.width
            } else {
                let gap_start = spans[i].1;
                gap_start + (spans[i + 1].0 - gap_start) / 2
            }
            .min(area.width);
            if right > left {
                self.add_click_target(
                    Rect::new(area.x + left, area.y, right - left, area.height),
                    action_id,
                );
            }
        }
    }

    /// Action at a cell. Later targets sit on top of earlier ones, so a modal
    /// drawn last wins over the screen beneath it.
    pub fn hit_test(&self, col: u16, row: u16) -> Option<u16> {
        self.targets
            .iter()
            .rev()
            .find(|t| {
                let r = t.rect;
                col >= r.x && col < r.x + r.width && row >= r.y && row < r.y + r.height
            })
            .map(|t| t.action_id)
    }
}

/// Phones and narrow windows get a stacked layout.
pub fn is_narrow_layout(width: u16) -> bool {
    width < 60
}

/// Map a pixel offset along one axis of the grid to a cell index.
///
/// `offset` is relative to the grid's leading edge, `extent` is the grid's
/// pixel size on that axis and `cells` the number of rows or columns.
pub fn pixel_to_cell(offset: f64, extent: f64, cells: u16) -> Option<u16> {
    if extent <= 0.0 || cells == 0 || offset < 0.0 {
        return None;
    }
    let cell = (offset / (extent / cells as f64)) as u16;
    if cell >= cells {
        None
    } else {
        Some(cell)
    }
}
