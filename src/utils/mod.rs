//! Utility functions and helpers.
//!
//! # Submodules
//!
//! - `logging`: Tracing and logging initialization with secret masking.

pub mod logging;
