//! Common test utilities and helpers.
//!
//! Provides synthetic implementations of the backend seams (document
//! source, page renderer, assembler) plus raster inspection helpers, so
//! engine behavior can be tested without a real PDF.

pub mod fixtures;

pub use fixtures::*;
