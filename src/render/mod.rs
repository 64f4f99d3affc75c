//! Result rendering for analysis responses.
//!
//! # Submodules
//!
//! - `summary`: Pure mapping from the typed analysis result to display
//!   structures (formatted captions, sorted tags, concatenated text).
//! - `overlay`: Bounding-box and polygon overlays drawn on a copy of the
//!   input image.

pub mod overlay;
pub mod summary;

pub use summary::{render, RenderedResult};
