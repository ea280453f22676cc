//! Service layer for business logic.
//!
//! Pure placement transitions, snapshot persistence, and the schema editor
//! that coordinates them.

pub mod persistence;
pub mod placement;
pub mod schema;

// Re-export commonly used types and functions
pub use persistence::{FileStore, KeyValueStore, MemoryStore, PersistenceError, SchemaStore};
pub use placement::{Placement, PlacementError, Span};
pub use schema::{EditorError, SchemaEditor};
