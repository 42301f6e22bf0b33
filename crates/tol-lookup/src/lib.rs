//! Query engine over canonical territory records.
//!
//! Queries are evaluated from scratch on every call, so an interactive front
//! end can re-run them per keystroke without tracking incremental state.

mod index;

pub use index::{LookupIndex, lookup};
