//! Shared utilities for rl-rotate CLI binaries.
//!
//! Argument enums, logging setup and output rendering used by `rl-rotate`.

pub mod args;
pub mod format;
pub mod logging;

pub use args::{LogLevel, OutputFormat};
pub use format::{format_number, write_items};
pub use logging::init_logging;
