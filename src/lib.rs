//! Split date/time accessors in Rust
//!
//! Web forms often submit a timestamp in pieces: a date field, an hour
//! `<select>`, a minute `<select>`. This crate merges those pieces into a
//! single `Option<chrono::NaiveDateTime>` field on a model struct, exposing
//! one derived accessor per component (`date`, `year`, `month`, `day`,
//! `hour`, `min`, `time`). Each write replaces exactly the addressed
//! component and preserves every other one; blank inputs are no-ops, so a
//! half-filled form never corrupts stored data.

pub mod component;
pub mod config;
pub mod error;
pub mod forms;
pub mod parse;
pub mod split;

mod macros;

// Re-export main types
pub use component::{Component, ComponentValue};
pub use config::SplitConfig;
pub use error::{SplitError, SplitResult};
pub use split::{Split, SplitView};
