//! Store layer.
//!
//! - Preferences and fetched content held in one [`GlobalStore`]
//! - Per-slice refresh metadata and the throttle check

mod content;
mod global;
mod throttle;

pub use content::{ContentState, Slice, UpdatedAt};
pub use global::{GlobalState, GlobalStore};
pub use throttle::{is_throttled, now_millis};
