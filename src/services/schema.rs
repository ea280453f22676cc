//! Schema editor: owns the current grid and keeps the saved snapshot in sync.
//!
//! Mutations are applied to a copy of the grid, saved, and only then
//! committed, so a failed save leaves both the grid and the store as they were.

use std::path::Path;

use thiserror::Error;
use tracing::info;

use crate::export::{self, RasterError};
use crate::models::{GridDimensions, GridState, Selection};
use crate::services::persistence::{KeyValueStore, PersistenceError, SchemaStore};
use crate::services::placement::{self, Placement, PlacementError, Span};

/// Errors surfaced by editor operations.
#[derive(Debug, Error)]
pub enum EditorError {
    /// A grid operation was requested before any schema was created.
    #[error("No schema exists yet. Create one first")]
    NoSchema,

    /// Placement rejected.
    #[error(transparent)]
    Placement(#[from] PlacementError),

    /// Saving or deleting the snapshot failed.
    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    /// Export failed.
    #[error(transparent)]
    Raster(#[from] RasterError),
}

impl EditorError {
    /// Whether the error stems from user input rather than the environment.
    #[must_use]
    pub const fn is_user_error(&self) -> bool {
        matches!(
            self,
            Self::NoSchema | Self::Placement(_) | Self::Raster(RasterError::Empty)
        )
    }
}

/// Current schema plus its persistent store.
#[derive(Debug)]
pub struct SchemaEditor<S> {
    store: SchemaStore<S>,
    grid: Option<GridState>,
}

impl<S: KeyValueStore> SchemaEditor<S> {
    /// Opens the editor, restoring any saved schema.
    ///
    /// # Errors
    ///
    /// Returns an error only if the store cannot be read. A malformed snapshot
    /// is logged and ignored.
    pub fn open(store: S) -> Result<Self, PersistenceError> {
        let store = SchemaStore::new(store);
        let grid = store.load()?;
        if let Some(grid) = &grid {
            let (rows, cols) = grid.dimensions();
            info!(rows, cols, modules = grid.module_count(), "restored saved schema");
        }
        Ok(Self { store, grid })
    }

    /// Current grid, if a schema exists.
    #[must_use]
    pub const fn grid(&self) -> Option<&GridState> {
        self.grid.as_ref()
    }

    /// Backing schema store.
    pub const fn store(&self) -> &SchemaStore<S> {
        &self.store
    }

    /// Replaces the schema with an empty `rows` x `cols` grid (clamped) and saves it.
    ///
    /// # Errors
    ///
    /// Returns an error if saving fails; the previous schema is kept.
    pub fn create(&mut self, rows: usize, cols: usize) -> Result<GridDimensions, PersistenceError> {
        let dims = GridDimensions::clamped(rows, cols);
        let grid = GridState::new(dims);
        self.store.save(&grid)?;
        self.grid = Some(grid);
        info!(rows = dims.rows, cols = dims.cols, "created schema");
        Ok(dims)
    }

    /// Applies the selection's tool at `(row, col)` and saves on change.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NoSchema`] without a grid,
    /// [`EditorError::Placement`] when the module does not fit (state is
    /// unchanged), or a persistence error if saving fails (state is
    /// unchanged as well).
    pub fn activate(
        &mut self,
        row: usize,
        col: usize,
        selection: &Selection,
    ) -> Result<Placement, EditorError> {
        let mut next = self.grid.clone().ok_or(EditorError::NoSchema)?;
        let placement = placement::place(&mut next, row, col, selection)?;
        if placement.span().is_some() {
            self.commit(next)?;
        }
        Ok(placement)
    }

    /// Removes the module covering `(row, col)` and saves on change.
    ///
    /// # Errors
    ///
    /// Returns [`EditorError::NoSchema`] without a grid, or a persistence error
    /// if saving fails, in which case the module stays.
    pub fn clear_cell(&mut self, row: usize, col: usize) -> Result<Option<Span>, EditorError> {
        let mut next = self.grid.clone().ok_or(EditorError::NoSchema)?;
        let span = placement::clear(&mut next, row, col);
        if span.is_some() {
            self.commit(next)?;
        }
        Ok(span)
    }

    /// Saves `grid` and makes it current once the store accepted it.
    fn commit(&mut self, grid: GridState) -> Result<(), PersistenceError> {
        self.store.save(&grid)?;
        self.grid = Some(grid);
        Ok(())
    }

    /// Drops the schema and deletes the snapshot.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be deleted; the schema is kept.
    pub fn clear_schema(&mut self) -> Result<(), PersistenceError> {
        self.store.delete()?;
        self.grid = None;
        info!("cleared schema");
        Ok(())
    }

    /// Renders the schema to PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::Empty`] without a grid.
    pub fn render_png(&self) -> Result<Vec<u8>, RasterError> {
        export::render_png(self.grid.as_ref())
    }

    /// Renders the schema and writes it to `path`.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::Empty`] without a grid, or an error if rendering
    /// or writing fails.
    pub fn export_png(&self, path: &Path) -> Result<(), RasterError> {
        export::write_png(self.grid.as_ref(), path)
    }
}
