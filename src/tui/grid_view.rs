//! View model of the schema grid.
//!
//! The widget never reads [`GridState`] directly. Structural changes (new
//! schema, load, clear) rebuild the view; placements patch only the row
//! segment they touched.

use std::ops::Range;

use crate::models::{cell_label, GridState, PhaseLabel, RgbColor};
use crate::services::Span;

/// What a single cell displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CellView {
    /// No module; shows the cell's label (`A1`, `B3`, ...)
    Empty {
        /// Cell label
        label: String,
    },
    /// Leftmost cell of a module; the widget draws the whole module from here
    Anchor {
        /// Spanned cells
        width: usize,
        /// Module background
        background: RgbColor,
        /// Readable text color for `background`
        foreground: RgbColor,
        /// Phase badge
        phase: PhaseLabel,
        /// Annotation or default label
        text: String,
    },
    /// Covered by the module anchored at `anchor`
    Continuation {
        /// Anchor column
        anchor: usize,
    },
}

/// Cell-by-cell view of the current schema.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GridView {
    rows: usize,
    cols: usize,
    cells: Vec<Vec<CellView>>,
}

impl GridView {
    /// Builds the view for `grid`, or an empty view when no schema exists.
    #[must_use]
    pub fn build(grid: Option<&GridState>) -> Self {
        let mut view = Self::default();
        view.rebuild(grid);
        view
    }

    /// Discards every cell and rebuilds from `grid`.
    pub fn rebuild(&mut self, grid: Option<&GridState>) {
        let Some(grid) = grid else {
            *self = Self::default();
            return;
        };
        let (rows, cols) = grid.dimensions();
        self.rows = rows;
        self.cols = cols;
        self.cells = (0..rows)
            .map(|r| (0..cols).map(|c| cell_view(grid, r, c)).collect())
            .collect();
    }

    /// Re-derives the cells of `row` in `columns`, widened to whole modules.
    ///
    /// Falls back to a full rebuild if the grid dimensions changed.
    pub fn refresh_segment(&mut self, grid: &GridState, row: usize, columns: Range<usize>) {
        if grid.dimensions() != (self.rows, self.cols) {
            self.rebuild(Some(grid));
            return;
        }
        if row >= self.rows {
            return;
        }

        let columns = self.widen(grid, row, columns);
        for c in columns {
            self.cells[row][c] = cell_view(grid, row, c);
        }
    }

    /// Patches the cells reported by a placement.
    pub fn apply(&mut self, grid: &GridState, span: &Span) {
        self.refresh_segment(grid, span.row, span.columns.clone());
    }

    /// `(rows, cols)`; `(0, 0)` without a schema.
    #[must_use]
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Whether a schema is being shown.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.rows == 0
    }

    /// Cell at `(row, col)`.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> Option<&CellView> {
        self.cells.get(row).and_then(|r| r.get(col))
    }

    /// Columns of the module shown at `(row, col)` in the current view.
    fn shown_span(&self, row: usize, col: usize) -> Option<Range<usize>> {
        match self.cell(row, col)? {
            CellView::Empty { .. } => None,
            CellView::Anchor { width, .. } => Some(col..col + width),
            CellView::Continuation { anchor } => match self.cell(row, *anchor)? {
                CellView::Anchor { width, .. } => Some(*anchor..anchor + width),
                _ => Some(*anchor..col + 1),
            },
        }
    }

    fn widen(&self, grid: &GridState, row: usize, columns: Range<usize>) -> Range<usize> {
        let mut start = columns.start.min(self.cols);
        let mut end = columns.end.min(self.cols);
        if start >= end {
            return start..start;
        }

        // Old modules (view) and new ones (grid) touching either edge.
        let first = self
            .shown_span(row, start)
            .into_iter()
            .chain(grid.get(row, start).map(|m| m.columns()));
        for span in first {
            start = start.min(span.start);
            end = end.max(span.end);
        }
        let last = self
            .shown_span(row, end - 1)
            .into_iter()
            .chain(grid.get(row, end - 1).map(|m| m.columns()));
        for span in last {
            end = end.max(span.end);
        }

        start..end.min(self.cols)
    }
}

fn cell_view(grid: &GridState, row: usize, col: usize) -> CellView {
    match grid.get(row, col) {
        None => CellView::Empty {
            label: cell_label(row, col),
        },
        Some(module) if module.anchor_column == col => CellView::Anchor {
            width: module.width,
            background: module.color,
            foreground: module.color.text_contrast(),
            phase: module.phase_label,
            text: module.display_text(),
        },
        Some(module) => CellView::Continuation {
            anchor: module.anchor_column,
        },
    }
}
