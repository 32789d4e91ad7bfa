//! Data models for MyIndex.
//!
//! These types are serialized as-is into persisted storage and RPC
//! responses, so field names match what the page shell reads.

mod github;
mod music;
mod preferences;
mod saying;

pub use github::*;
pub use music::*;
pub use preferences::*;
pub use saying::*;
