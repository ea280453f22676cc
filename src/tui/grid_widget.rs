//! Grid widget: draws the [`GridView`] as a table of cells and maps mouse
//! positions back to cells.

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::grid_view::{CellView, GridView};
use super::AppState;
use crate::models::row_label;

/// Character size of one grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellSize {
    /// Columns per cell, including the one-column gap
    pub width: u16,
    /// Lines drawn per cell
    pub height: u16,
    /// Blank lines between rows
    pub gap_y: u16,
}

impl CellSize {
    /// Regular cells: badge line plus two text lines.
    pub const NORMAL: Self = Self {
        width: 9,
        height: 3,
        gap_y: 1,
    };
    /// Narrow cells for small terminals: badge line plus one text line.
    pub const COMPACT: Self = Self {
        width: 5,
        height: 2,
        gap_y: 0,
    };

    /// Size for the compact flag.
    #[must_use]
    pub const fn for_compact(compact: bool) -> Self {
        if compact {
            Self::COMPACT
        } else {
            Self::NORMAL
        }
    }

    const fn pitch_y(self) -> u16 {
        self.height + self.gap_y
    }
}

/// Width of the row label column.
const LABEL_WIDTH: u16 = 3;
/// Height of the column header line.
const HEADER_HEIGHT: u16 = 1;

/// Screen placement of the grid inside the widget area.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridGeometry {
    inner: Rect,
    origin_x: u16,
    origin_y: u16,
    cell: CellSize,
    rows: usize,
    cols: usize,
}

impl GridGeometry {
    /// Geometry of a `rows` x `cols` grid drawn inside the bordered `area`.
    #[must_use]
    pub fn new(area: Rect, (rows, cols): (usize, usize), compact: bool) -> Self {
        let inner = Block::default().borders(Borders::ALL).inner(area);
        Self {
            inner,
            origin_x: inner.x.saturating_add(LABEL_WIDTH),
            origin_y: inner.y.saturating_add(HEADER_HEIGHT),
            cell: CellSize::for_compact(compact),
            rows,
            cols,
        }
    }

    /// Rectangle of `width` cells starting at `(row, col)`, clipped to the widget.
    #[must_use]
    pub fn cell_rect(&self, row: usize, col: usize, width: usize) -> Rect {
        let x = u32::from(self.origin_x) + col as u32 * u32::from(self.cell.width);
        let y = u32::from(self.origin_y) + row as u32 * u32::from(self.cell.pitch_y());
        let w = (width as u32 * u32::from(self.cell.width)).saturating_sub(1);
        let h = u32::from(self.cell.height);

        let clamp = |v: u32| u16::try_from(v).unwrap_or(u16::MAX);
        Rect::new(clamp(x), clamp(y), clamp(w), clamp(h)).intersection(self.inner)
    }

    /// Cell under the screen position `(x, y)`, if any.
    #[must_use]
    pub fn hit_test(&self, x: u16, y: u16) -> Option<(usize, usize)> {
        let inside = x >= self.inner.x
            && x < self.inner.right()
            && y >= self.inner.y
            && y < self.inner.bottom();
        if !inside || x < self.origin_x || y < self.origin_y {
            return None;
        }

        let dy = y - self.origin_y;
        if dy % self.cell.pitch_y() >= self.cell.height {
            return None;
        }
        let row = usize::from(dy / self.cell.pitch_y());
        let col = usize::from((x - self.origin_x) / self.cell.width);
        (row < self.rows && col < self.cols).then_some((row, col))
    }
}

/// Grid widget renders the schema grid
pub struct GridWidget;

impl GridWidget {
    /// Render the grid widget
    pub fn render(f: &mut Frame, area: Rect, state: &AppState) {
        let theme = &state.theme;
        let view = &state.grid_view;

        if view.is_empty() {
            let hint = Paragraph::new(vec![
                Line::from(""),
                Line::from("No schema yet."),
                Line::from(vec![
                    Span::raw("Press "),
                    Span::styled(
                        "n",
                        Style::default()
                            .fg(theme.accent)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Span::raw(" to create one."),
                ]),
            ])
            .alignment(Alignment::Center)
            .style(Style::default().fg(theme.text_secondary))
            .block(
                Block::default()
                    .title(" Schema ")
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(theme.primary)),
            );
            f.render_widget(hint, area);
            return;
        }

        let (rows, cols) = view.dimensions();
        let block = Block::default()
            .title(format!(" Schema {rows}x{cols} "))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(theme.primary))
            .style(Style::default().bg(theme.background));
        f.render_widget(block, area);

        let geometry = GridGeometry::new(area, (rows, cols), state.compact);
        Self::render_headers(f, &geometry, state);

        for r in 0..rows {
            for c in 0..cols {
                Self::render_cell(f, &geometry, view, r, c, state);
            }
        }
    }

    fn render_headers(f: &mut Frame, geometry: &GridGeometry, state: &AppState) {
        let style = Style::default().fg(state.theme.text_secondary);
        let (cursor_row, cursor_col) = state.cursor;

        for c in 0..geometry.cols {
            let mut rect = geometry.cell_rect(0, c, 1);
            rect.y = geometry.inner.y;
            rect.height = 1;
            let style = if c == cursor_col {
                style.fg(state.theme.accent)
            } else {
                style
            };
            let header = Paragraph::new((c + 1).to_string())
                .alignment(Alignment::Center)
                .style(style);
            let rect = rect.intersection(geometry.inner);
            if !rect.is_empty() {
                f.render_widget(header, rect);
            }
        }

        for r in 0..geometry.rows {
            let mut rect = geometry.cell_rect(r, 0, 1);
            rect.x = geometry.inner.x;
            rect.width = LABEL_WIDTH.min(geometry.inner.width);
            let style = if r == cursor_row {
                style.fg(state.theme.accent)
            } else {
                style
            };
            let label = Paragraph::new(row_label(r).to_string()).style(style);
            let rect = rect.intersection(geometry.inner);
            if !rect.is_empty() {
                f.render_widget(label, rect);
            }
        }
    }

    fn render_cell(
        f: &mut Frame,
        geometry: &GridGeometry,
        view: &GridView,
        row: usize,
        col: usize,
        state: &AppState,
    ) {
        let theme = &state.theme;
        let is_cursor = state.cursor == (row, col);

        match view.cell(row, col) {
            Some(CellView::Empty { label }) => {
                let rect = geometry.cell_rect(row, col, 1);
                if rect.is_empty() {
                    return;
                }
                let style = if is_cursor {
                    Style::default().fg(theme.background).bg(theme.accent)
                } else {
                    Style::default().fg(theme.text_muted).bg(theme.surface)
                };
                let cell = Paragraph::new(label.as_str())
                    .alignment(Alignment::Center)
                    .style(style);
                f.render_widget(cell, rect);
            }
            Some(CellView::Anchor {
                width,
                background,
                foreground,
                phase,
                text,
            }) => {
                let rect = geometry.cell_rect(row, col, *width);
                if rect.is_empty() {
                    return;
                }
                let style = Style::default()
                    .fg(foreground.to_ratatui_color())
                    .bg(background.to_ratatui_color());

                let mut lines = vec![Line::from(Span::styled(
                    phase.as_str(),
                    style.add_modifier(Modifier::BOLD),
                ))
                .alignment(Alignment::Right)];
                lines.extend(text.lines().map(|l| Line::from(l.to_string())));

                let module = Paragraph::new(lines)
                    .style(style)
                    .wrap(Wrap { trim: true });
                f.render_widget(module, rect);

                let (cursor_row, cursor_col) = state.cursor;
                if cursor_row == row && (col..col + width).contains(&cursor_col) {
                    Self::render_cursor_marker(f, geometry, row, cursor_col, state);
                }
            }
            // Drawn by the anchor
            Some(CellView::Continuation { .. }) | None => {}
        }
    }

    fn render_cursor_marker(
        f: &mut Frame,
        geometry: &GridGeometry,
        row: usize,
        col: usize,
        state: &AppState,
    ) {
        let mut rect = geometry.cell_rect(row, col, 1);
        if rect.is_empty() {
            return;
        }
        rect.width = 1;
        rect.height = 1;
        let marker = Paragraph::new("▶").style(
            Style::default()
                .fg(state.theme.accent)
                .bg(state.theme.background)
                .add_modifier(Modifier::BOLD),
        );
        f.render_widget(marker, rect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area() -> Rect {
        Rect::new(0, 6, 160, 40)
    }

    #[test]
    fn test_cell_rect_normal() {
        let geometry = GridGeometry::new(area(), (3, 10), false);
        // Border (1) + row labels (3), border (1) + header (1)
        assert_eq!(geometry.cell_rect(0, 0, 1), Rect::new(4, 8, 8, 3));
        assert_eq!(geometry.cell_rect(1, 2, 2), Rect::new(22, 12, 17, 3));
    }

    #[test]
    fn test_cell_rect_compact() {
        let geometry = GridGeometry::new(area(), (3, 10), true);
        assert_eq!(geometry.cell_rect(2, 1, 3), Rect::new(9, 12, 14, 2));
    }

    #[test]
    fn test_cell_rect_is_clipped() {
        let geometry = GridGeometry::new(Rect::new(0, 0, 30, 10), (8, 15), false);
        let rect = geometry.cell_rect(0, 14, 1);
        assert!(rect.is_empty() || rect.right() <= 29);
    }

    #[test]
    fn test_hit_test() {
        let geometry = GridGeometry::new(area(), (3, 10), false);
        assert_eq!(geometry.hit_test(4, 8), Some((0, 0)));
        assert_eq!(geometry.hit_test(12, 10), Some((0, 0)));
        assert_eq!(geometry.hit_test(13, 8), Some((0, 1)));
        assert_eq!(geometry.hit_test(22, 12), Some((1, 2)));
        // Gap line between rows
        assert_eq!(geometry.hit_test(4, 11), None);
        // Row labels and header
        assert_eq!(geometry.hit_test(2, 8), None);
        assert_eq!(geometry.hit_test(4, 7), None);
        // Past the last row / column
        assert_eq!(geometry.hit_test(4, 20), None);
        assert_eq!(geometry.hit_test(4 + 9 * 10, 8), None);
    }

    #[test]
    fn test_hit_test_matches_cell_rect() {
        for compact in [false, true] {
            let geometry = GridGeometry::new(area(), (4, 8), compact);
            for r in 0..4 {
                for c in 0..8 {
                    let rect = geometry.cell_rect(r, c, 1);
                    assert_eq!(geometry.hit_test(rect.x, rect.y), Some((r, c)));
                    assert_eq!(
                        geometry.hit_test(rect.right() - 1, rect.bottom() - 1),
                        Some((r, c))
                    );
                }
            }
        }
    }
}
