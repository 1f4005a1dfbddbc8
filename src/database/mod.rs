//! Visibility store database layer.
//!
//! Provides SQLite connection management, schema migrations and the async
//! [`PersistentStore`] the engine talks to.
//!
//! # Usage
//!
//! ```no_run
//! use exercise_visibility::database::PersistentStore;
//!
//! // Open a persistent store
//! let store = PersistentStore::open("ExerciseVisibilityDB.sqlite3").expect("failed to open store");
//!
//! // Or use an in-memory store for testing
//! let store = PersistentStore::open_in_memory().expect("failed to open in-memory store");
//!
//! // The reconciler takes the one state writer
//! let writer = store.take_state_writer().expect("writer already claimed");
//! ```

pub mod connection;
pub mod migrations;
pub mod store;

pub use connection::Database;
pub use store::{PersistentStore, StateStoreTrait, StateWriter};
