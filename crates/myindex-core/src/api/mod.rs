//! API implementation submodules.
//!
//! Each submodule contains `impl MyIndexApi` blocks that extend the public API
//! with domain-specific methods. The struct definition remains in `lib.rs`.

mod builder;
mod content;
mod player;
mod preferences;

pub use builder::MyIndexApiBuilder;
