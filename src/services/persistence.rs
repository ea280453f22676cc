//! Schema persistence on top of a small key-value store.
//!
//! The snapshot is JSON of the form `{rowCount, colCount, grid}` where
//! `grid[r][c]` is non-null only at a module's anchor cell. Loading replays
//! every stored module through the placement engine, so restored layouts obey
//! the same rules as interactive edits.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::models::{GridDimensions, GridState, Module};
use crate::services::placement;

/// Storage key of the persisted schema.
pub const SCHEMA_KEY: &str = "electricalSchema";

/// Errors raised by the persistence layer.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Reading or writing the backing store failed.
    #[error("Failed to access {}: {source}", path.display())]
    Io {
        /// File that could not be accessed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// The stored snapshot is not valid JSON of the expected shape.
    #[error("Malformed schema snapshot: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Minimal string key-value store.
pub trait KeyValueStore {
    /// Value under `key`, or `None` when absent.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Io`] if the backing store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Stores `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Io`] if the backing store cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError>;

    /// Removes `key`. Removing a missing key succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Io`] if the backing store cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), PersistenceError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistenceError> {
        (**self).remove(key)
    }
}

/// Directory-backed store: each key is a `<key>.json` file.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store rooted at `dir`. The directory is created on first write.
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`.
    #[must_use]
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> PersistenceError + '_ {
    move |source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(io_error(&path)(err)),
        }
    }

    /// Writes through a temp file and rename.
    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        fs::create_dir_all(&self.dir).map_err(io_error(&self.dir))?;

        let path = self.path_for(key);
        let temp_path = path.with_extension("json.tmp");
        fs::write(&temp_path, value).map_err(io_error(&temp_path))?;
        fs::rename(&temp_path, &path).map_err(io_error(&path))?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistenceError> {
        let path = self.path_for(key);
        match fs::remove_file(&path) {
            Err(err) if err.kind() != io::ErrorKind::NotFound => Err(io_error(&path)(err)),
            _ => Ok(()),
        }
    }
}

/// In-memory store, used by tests and dry runs.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistenceError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SnapshotRef<'a> {
    row_count: usize,
    col_count: usize,
    grid: Vec<Vec<Option<&'a Module>>>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct Snapshot {
    #[serde(alias = "rows", default, deserialize_with = "lenient_count")]
    row_count: usize,
    #[serde(alias = "cols", default, deserialize_with = "lenient_count")]
    col_count: usize,
    #[serde(alias = "gridState", default)]
    grid: Vec<Vec<Option<Module>>>,
}

/// Counts were historically stored as strings; unparseable values become 0
/// and then fall back to the default dimensions.
fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Count {
        Number(i64),
        Text(String),
    }

    Ok(match Count::deserialize(deserializer)? {
        Count::Number(n) => usize::try_from(n).unwrap_or(0),
        Count::Text(s) => s.trim().parse().unwrap_or(0),
    })
}

/// Serializes `grid` to its de-duplicated JSON snapshot.
///
/// # Errors
///
/// Returns [`PersistenceError::Parse`] if serialization fails.
pub fn encode(grid: &GridState) -> Result<String, PersistenceError> {
    let (rows, cols) = grid.dimensions();
    let cells = (0..rows)
        .map(|r| {
            (0..cols)
                .map(|c| {
                    grid.get(r, c)
                        .filter(|m| m.anchor_column == c)
                        .map(|m| &**m)
                })
                .collect()
        })
        .collect();
    let snapshot = SnapshotRef {
        row_count: rows,
        col_count: cols,
        grid: cells,
    };
    Ok(serde_json::to_string(&snapshot)?)
}

/// Rebuilds a grid from a JSON snapshot.
///
/// Dimensions are clamped. Duplicate copies of a module at non-anchor cells
/// are ignored, and modules that no longer fit are skipped with a warning.
///
/// # Errors
///
/// Returns [`PersistenceError::Parse`] if `json` is not a snapshot.
pub fn decode(json: &str) -> Result<GridState, PersistenceError> {
    let snapshot: Snapshot = serde_json::from_str(json)?;
    let mut grid = GridState::new(GridDimensions::clamped(
        snapshot.row_count,
        snapshot.col_count,
    ));

    for (r, row) in snapshot.grid.into_iter().enumerate() {
        for (c, cell) in row.into_iter().enumerate() {
            let Some(mut module) = cell else { continue };
            if module.anchor_column != c {
                continue;
            }
            module.row = r;
            if let Err(err) = placement::restore(&mut grid, &module) {
                warn!("Skipping saved module: {err}");
            }
        }
    }

    Ok(grid)
}

/// Saves, loads and deletes the schema snapshot in a [`KeyValueStore`].
#[derive(Debug, Clone)]
pub struct SchemaStore<S> {
    store: S,
}

impl<S: KeyValueStore> SchemaStore<S> {
    /// Wraps a key-value store.
    pub const fn new(store: S) -> Self {
        Self { store }
    }

    /// Backing store.
    pub const fn inner(&self) -> &S {
        &self.store
    }

    /// Writes the snapshot of `grid`.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the store write fails.
    pub fn save(&mut self, grid: &GridState) -> Result<(), PersistenceError> {
        let json = encode(grid)?;
        self.store.set(SCHEMA_KEY, &json)?;
        debug!(modules = grid.module_count(), "saved schema");
        Ok(())
    }

    /// Loads the saved schema.
    ///
    /// A missing snapshot yields `Ok(None)`. A malformed one is logged and also
    /// treated as absent.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Io`] if the store cannot be read.
    pub fn load(&self) -> Result<Option<GridState>, PersistenceError> {
        let Some(json) = self.store.get(SCHEMA_KEY)? else {
            return Ok(None);
        };
        match decode(&json) {
            Ok(grid) => {
                debug!(modules = grid.module_count(), "loaded schema");
                Ok(Some(grid))
            }
            Err(err) => {
                warn!("Ignoring saved schema: {err}");
                Ok(None)
            }
        }
    }

    /// Raw snapshot JSON, if any.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Io`] if the store cannot be read.
    pub fn raw(&self) -> Result<Option<String>, PersistenceError> {
        self.store.get(SCHEMA_KEY)
    }

    /// Deletes the saved schema.
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Io`] if the store cannot be written.
    pub fn delete(&mut self) -> Result<(), PersistenceError> {
        self.store.remove(SCHEMA_KEY)
    }
}
