//! CLI library components for territory lookup.

#![allow(missing_docs)]

pub mod commands;
pub mod logging;
pub mod repl;
pub mod settings;
pub mod summary;
