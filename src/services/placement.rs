//! Placement engine: validated module placement and removal on a [`GridState`].
//!
//! All functions here are pure state transitions. They never render and never
//! persist; callers decide what to redraw (using the returned [`Span`]) and
//! when to save.
//!
//! Collision policy is overwrite: any module overlapping the target run is
//! removed in full before the new module is stored.

use std::ops::Range;
use std::rc::Rc;

use thiserror::Error;
use tracing::debug;

use crate::models::{GridState, Module, ModuleKind, Selection, Tool};

/// Errors that can occur while placing a module.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlacementError {
    /// The module would not fit inside the grid.
    #[error("A {width}-wide module at row {row}, column {col} does not fit in a {rows}x{cols} grid")]
    OutOfBounds {
        /// Requested row
        row: usize,
        /// Requested anchor column
        col: usize,
        /// Module width
        width: usize,
        /// Grid row count
        rows: usize,
        /// Grid column count
        cols: usize,
    },
}

/// Contiguous run of cells in one row touched by an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
    /// Row index
    pub row: usize,
    /// Touched columns
    pub columns: Range<usize>,
}

impl Span {
    fn merge(&mut self, columns: &Range<usize>) {
        self.columns = self.columns.start.min(columns.start)..self.columns.end.max(columns.end);
    }
}

/// Outcome of a grid activation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Placement {
    /// A module was placed; `span` also covers any modules it displaced.
    Placed {
        /// The new module, shared by all its cells
        module: Rc<Module>,
        /// Cells that changed
        span: Span,
    },
    /// A module was removed by the clear tool.
    Cleared(Span),
    /// Nothing changed (clear tool on an empty cell).
    Unchanged,
}

impl Placement {
    /// Cells that changed, if any.
    #[must_use]
    pub const fn span(&self) -> Option<&Span> {
        match self {
            Self::Placed { span, .. } | Self::Cleared(span) => Some(span),
            Self::Unchanged => None,
        }
    }
}

/// Anchor column of the module covering `(row, col)`.
#[must_use]
pub fn owning_anchor(grid: &GridState, row: usize, col: usize) -> Option<usize> {
    grid.get(row, col).map(|module| module.anchor_column)
}

/// Removes the whole module covering `(row, col)`.
///
/// Returns the cleared span, or `None` when the cell was already empty.
pub fn clear(grid: &mut GridState, row: usize, col: usize) -> Option<Span> {
    let module = Rc::clone(grid.get(row, col)?);
    let columns = module.columns();
    for c in columns.clone() {
        grid.set(row, c, None);
    }
    debug!(row, anchor = module.anchor_column, width = module.width, "cleared module");
    Some(Span { row, columns })
}

/// Applies the selection's tool at `(row, col)`.
///
/// With a placing tool, a fresh module of the selected kind is anchored at
/// `col`. Modules overlapping `[col, col + width)` are removed first. With
/// the clear tool, this behaves like [`clear`].
///
/// # Errors
///
/// Returns [`PlacementError::OutOfBounds`] when the module would extend past
/// the last column (or the row is outside the grid). The grid is unchanged.
pub fn place(
    grid: &mut GridState,
    row: usize,
    col: usize,
    selection: &Selection,
) -> Result<Placement, PlacementError> {
    let kind = match selection.tool {
        Tool::Clear => {
            return Ok(clear(grid, row, col).map_or(Placement::Unchanged, Placement::Cleared));
        }
        Tool::Place(kind) => kind,
    };

    let width = kind.width();
    let (rows, cols) = grid.dimensions();
    if row >= rows || col + width > cols {
        return Err(PlacementError::OutOfBounds {
            row,
            col,
            width,
            rows,
            cols,
        });
    }

    let mut span = Span {
        row,
        columns: col..col + width,
    };
    for c in col..col + width {
        if let Some(displaced) = clear(grid, row, c) {
            span.merge(&displaced.columns);
        }
    }

    let module = Rc::new(build_module(kind, row, col, selection));
    for c in module.columns() {
        grid.set(row, c, Some(Rc::clone(&module)));
    }
    debug!(row, col, width, kind = %kind, "placed module");

    Ok(Placement::Placed { module, span })
}

/// Replays a saved module through [`place`], so restored and interactive
/// placements share the same rules.
pub fn restore(grid: &mut GridState, module: &Module) -> Result<Placement, PlacementError> {
    let selection = Selection {
        tool: Tool::Place(module.kind),
        color: module.color,
        phase: module.phase_label,
        text: module.annotation_text.clone(),
    };
    place(grid, module.row, module.anchor_column, &selection)
}

fn build_module(kind: ModuleKind, row: usize, col: usize, selection: &Selection) -> Module {
    Module {
        kind,
        width: kind.width(),
        color: kind.forced_color().unwrap_or(selection.color),
        phase_label: selection.phase,
        annotation_text: selection.text.clone(),
        anchor_column: col,
        row,
    }
}
