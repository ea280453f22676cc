//! Grid state store: the single source of truth for the panel layout.
//!
//! Cells hold either nothing or a shared reference to the module spanning
//! them. All cells covered by one module point at the same `Rc<Module>`.
//! This store performs no validation; placement rules live in
//! [`crate::services::placement`].

use std::rc::Rc;

use crate::models::Module;

/// Maximum number of rows in a panel schema.
pub const MAX_ROWS: usize = 8;
/// Maximum number of columns in a panel schema.
pub const MAX_COLS: usize = 15;
/// Rows used when the requested count is missing or zero.
pub const DEFAULT_ROWS: usize = 3;
/// Columns used when the requested count is missing or zero.
pub const DEFAULT_COLS: usize = 10;

/// Grid size, always within `1..=MAX_ROWS` x `1..=MAX_COLS` when built via [`GridDimensions::clamped`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridDimensions {
    /// Row count
    pub rows: usize,
    /// Column count
    pub cols: usize,
}

impl GridDimensions {
    /// Clamps requested dimensions into the supported range.
    ///
    /// Zero falls back to the defaults (3 rows, 10 columns); larger values
    /// are capped at 8 rows and 15 columns.
    #[must_use]
    pub fn clamped(rows: usize, cols: usize) -> Self {
        let rows = if rows == 0 { DEFAULT_ROWS } else { rows.min(MAX_ROWS) };
        let cols = if cols == 0 { DEFAULT_COLS } else { cols.min(MAX_COLS) };
        Self { rows, cols }
    }
}

impl Default for GridDimensions {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
        }
    }
}

/// Row-major table of cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridState {
    rows: usize,
    cols: usize,
    cells: Vec<Vec<Option<Rc<Module>>>>,
}

impl GridState {
    /// Creates an all-empty grid.
    #[must_use]
    pub fn new(dims: GridDimensions) -> Self {
        Self {
            rows: dims.rows,
            cols: dims.cols,
            cells: vec![vec![None; dims.cols]; dims.rows],
        }
    }

    /// Returns `(rows, cols)`.
    #[must_use]
    pub const fn dimensions(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Module occupying `(row, col)`, if any. Out-of-range cells read as empty.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Option<&Rc<Module>> {
        self.cells.get(row)?.get(col)?.as_ref()
    }

    /// Stores `module` (or nothing) at `(row, col)`. Out-of-range writes are ignored.
    pub fn set(&mut self, row: usize, col: usize, module: Option<Rc<Module>>) {
        if let Some(cell) = self.cells.get_mut(row).and_then(|r| r.get_mut(col)) {
            *cell = module;
        }
    }

    /// Whether `(row, col)` lies inside the grid.
    #[must_use]
    pub const fn contains(&self, row: usize, col: usize) -> bool {
        row < self.rows && col < self.cols
    }

    /// Iterates every placed module once, at its anchor cell, in row-major order.
    pub fn modules(&self) -> impl Iterator<Item = &Rc<Module>> + '_ {
        self.cells.iter().flat_map(|row| {
            row.iter()
                .enumerate()
                .filter_map(|(col, cell)| cell.as_ref().filter(|m| m.anchor_column == col))
        })
    }

    /// Number of placed modules.
    #[must_use]
    pub fn module_count(&self) -> usize {
        self.modules().count()
    }

    /// Whether no module is placed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.iter().flatten().all(Option::is_none)
    }
}

/// Row letter: `A` for row 0.
#[must_use]
pub fn row_label(row: usize) -> char {
    u8::try_from(row)
        .ok()
        .filter(|r| *r < 26)
        .map_or('?', |r| char::from(b'A' + r))
}

/// Spreadsheet-style cell label: row letter plus 1-based column, e.g. `A1`.
#[must_use]
pub fn cell_label(row: usize, col: usize) -> String {
    format!("{}{}", row_label(row), col + 1)
}

/// Parses a label like `B3` back to zero-based `(row, col)`.
#[must_use]
pub fn parse_cell_label(label: &str) -> Option<(usize, usize)> {
    let label = label.trim();
    let mut chars = label.chars();
    let letter = chars.next()?.to_ascii_uppercase();
    if !letter.is_ascii_uppercase() {
        return None;
    }
    let col: usize = chars.as_str().parse().ok()?;
    if col == 0 {
        return None;
    }
    Some(((letter as u8 - b'A') as usize, col - 1))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ModuleKind, PhaseLabel, RgbColor};

    fn sample_module(row: usize, anchor: usize, kind: ModuleKind) -> Rc<Module> {
        Rc::new(Module {
            kind,
            width: kind.width(),
            color: RgbColor::WHITE,
            phase_label: PhaseLabel::L1,
            annotation_text: String::new(),
            anchor_column: anchor,
            row,
        })
    }

    #[test]
    fn test_new_grid_is_empty_for_all_valid_sizes() {
        for rows in 1..=MAX_ROWS {
            for cols in 1..=MAX_COLS {
                let grid = GridState::new(GridDimensions::clamped(rows, cols));
                assert_eq!(grid.dimensions(), (rows, cols));
                let empty = (0..rows)
                    .flat_map(|r| (0..cols).map(move |c| (r, c)))
                    .filter(|&(r, c)| grid.get(r, c).is_none())
                    .count();
                assert_eq!(empty, rows * cols);
                assert!(grid.is_empty());
                assert_eq!(grid.module_count(), 0);
            }
        }
    }

    #[test]
    fn test_dimensions_are_clamped() {
        assert_eq!(GridDimensions::clamped(20, 40), GridDimensions { rows: 8, cols: 15 });
        assert_eq!(GridDimensions::clamped(0, 0), GridDimensions { rows: 3, cols: 10 });
        assert_eq!(GridDimensions::clamped(1, 1), GridDimensions { rows: 1, cols: 1 });
    }

    #[test]
    fn test_get_set_out_of_range() {
        let mut grid = GridState::new(GridDimensions::clamped(2, 2));
        grid.set(5, 5, Some(sample_module(5, 5, ModuleKind::SinglePole)));
        assert!(grid.get(5, 5).is_none());
        assert!(grid.is_empty());
    }

    #[test]
    fn test_modules_iterates_anchors_once() {
        let mut grid = GridState::new(GridDimensions::clamped(2, 6));
        let wide = sample_module(0, 1, ModuleKind::TriplePole);
        for col in 1..4 {
            grid.set(0, col, Some(Rc::clone(&wide)));
        }
        grid.set(1, 0, Some(sample_module(1, 0, ModuleKind::Rcd)));

        let anchors: Vec<(usize, usize)> =
            grid.modules().map(|m| (m.row, m.anchor_column)).collect();
        assert_eq!(anchors, vec![(0, 1), (1, 0)]);
        assert_eq!(grid.module_count(), 2);
    }

    #[test]
    fn test_cell_labels() {
        assert_eq!(cell_label(0, 0), "A1");
        assert_eq!(cell_label(2, 9), "C10");
        assert_eq!(row_label(7), 'H');
        assert_eq!(row_label(30), '?');
        assert_eq!(parse_cell_label("a1"), Some((0, 0)));
        assert_eq!(parse_cell_label("H15"), Some((7, 14)));
        assert_eq!(parse_cell_label("A0"), None);
        assert_eq!(parse_cell_label("1A"), None);
        assert_eq!(parse_cell_label(""), None);
    }
}
