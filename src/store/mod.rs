//! Persistence boundary for the club document

pub mod snapshot;

pub use snapshot::{InMemoryStore, JsonFileStore, SnapshotStore};
