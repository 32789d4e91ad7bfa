//! Persistence primitives.
//!
//! - Atomic JSON file operations
//! - A key/value storage document addressed by namespaced keys

mod atomic;
mod local;

pub use atomic::{atomic_read_json, atomic_write_json};
pub use local::LocalStorage;
