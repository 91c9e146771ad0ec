//! Clickable UI components shared by every screen.
//!
//! Each component draws itself and registers the click targets for what it
//! drew, so the hit map can never drift from the rendered layout.
//!
//! - [`TabBar`]: one row of labels (navigation bar, filter tabs, plan picker).
//! - [`ClickableList`]: lines of text where some lines are buttons.

use ratzilla::ratatui::layout::Rect;
use ratzilla::ratatui::style::{Color, Style};
use ratzilla::ratatui::text::{Line, Span};
use ratzilla::ratatui::widgets::{Block, Paragraph};
use ratzilla::ratatui::Frame;

use crate::input::ClickState;

// ── TabBar ─────────────────────────────────────────────────────

/// ```ignore
/// TabBar::new(" │ ")
///     .tab("Marketplace", nav_style(View::Marketplace), NAV_MARKETPLACE)
///     .tab("EGP", currency_style, TOGGLE_CURRENCY)
///     .render(f, area, &mut cs);
/// ```
pub struct TabBar<'a> {
    tabs: Vec<(String, Style, u16)>,
    separator: &'a str,
    block: Option<Block<'a>>,
}

impl<'a> TabBar<'a> {
    pub fn new(separator: &'a str) -> Self {
        Self {
            tabs: Vec::new(),
            separator,
            block: None,
        }
    }

    pub fn tab(mut self, label: impl Into<String>, style: Style, action_id: u16) -> Self {
        self.tabs.push((label.into(), style, action_id));
        self
    }

    /// Borders are accounted for when placing targets.
    pub fn block(mut self, block: Block<'a>) -> Self {
        self.block = Some(block);
        self
    }

    pub fn render(self, f: &mut Frame, area: Rect, cs: &mut ClickState) {
        let sep_width = Line::from(self.separator).width() as u16;
        let mut spans: Vec<Span> = Vec::with_capacity(self.tabs.len() * 2);
        let mut widths: Vec<(u16, u16)> = Vec::with_capacity(self.tabs.len());

        for (i, (label, style, action_id)) in self.tabs.into_iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled(
                    self.separator,
                    Style::default().fg(Color::DarkGray),
                ));
            }
            let padded = format!(" {} ", label);
            widths.push((Line::from(padded.as_str()).width() as u16, action_id));
            spans.push(Span::styled(padded, style));
        }

        let inner = self.block.as_ref().map(|b| b.inner(area)).unwrap_or(area);
        let paragraph = match self.block {
            Some(block) => Paragraph::new(Line::from(spans)).block(block),
            None => Paragraph::new(Line::from(spans)),
        };
        f.render_widget(paragraph, area);

        // Horizontal extent from the inner area; full outer height so the
        // border rows are tappable too.
        cs.register_tabs(
            &widths,
            sep_width,
            Rect::new(inner.x, area.y, inner.width, area.height.max(1)),
        );
    }
}

// ── ClickableList ──────────────────────────────────────────────

/// Lines paired with optional click actions.
///
/// Push lines in display order, render [`into_lines`](ClickableList::into_lines)
/// inside a `Paragraph`, and call
/// [`register_targets`](ClickableList::register_targets) with the same area.
pub struct ClickableList<'a> {
    lines: Vec<Line<'a>>,
    /// `(line index, action id)`
    actions: Vec<(usize, u16)>,
}

impl<'a> ClickableList<'a> {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn push(&mut self, line: Line<'a>) {
        self.lines.push(line);
    }

    pub fn push_clickable(&mut self, line: Line<'a>, action_id: u16) {
        self.actions.push((self.lines.len(), action_id));
        self.lines.push(line);
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn into_lines(self) -> Vec<Line<'a>> {
        self.lines
    }

    /// Register targets for every clickable line.
    ///
    /// * `top` / `bottom`: rows taken by borders (or padding) above and below.
    /// * `scroll`: visual rows scrolled off the top.
    /// * `wrap_width`: content width when the paragraph wraps, `0` when it
    ///   does not (one row per line).
    pub fn register_targets(
        &self,
        area: Rect,
        cs: &mut ClickState,
        top: u16,
        bottom: u16,
        scroll: u16,
        wrap_width: u16,
    ) {
        let first_row = area.y + top;
        let end_row = area.y + area.height.saturating_sub(bottom);

        // Visual row where each logical line starts, and how many rows it takes.
        let mut starts = Vec::with_capacity(self.lines.len());
        let mut row = 0u16;
        for line in &self.lines {
            let height = match wrap_width {
                0 => 1,
                w => (line.width().max(1)).div_ceil(w as usize) as u16,
            };
            starts.push((row, height));
            row += height;
        }

        for &(idx, action_id) in &self.actions {
            let Some(&(start, height)) = starts.get(idx) else {
                continue;
            };
            for visual in start..start + height {
                if visual < scroll {
                    continue;
                }
                let screen_row = first_row + (visual - scroll);
                if screen_row >= end_row {
                    break;
                }
                cs.add_row_target(area, screen_row, action_id);
            }
        }
    }
}
