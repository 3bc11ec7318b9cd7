//! Structured logging setup.

mod format;

pub use format::{ErrorLine, StructuredLogger};
