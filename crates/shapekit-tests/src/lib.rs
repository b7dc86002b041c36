//! shapekit End-to-End Test Infrastructure
//!
//! This crate provides integration tests for the bake-critical flows:
//!
//! - Bake pipeline: keyed and keyless objects, collection grouping,
//!   warning downgrades, and state restoration
//! - Scene documents: JSON round trips, canonical hashing, validation
//! - CLI flows: validate -> bake -> re-validate against files on disk
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p shapekit-tests
//! ```
//!
//! The fixtures use dyadic coordinates (0.25, 0.5, 1.0) throughout so
//! linear modifier math is exact under f32 and geometry can be compared
//! with `assert_eq!` instead of tolerances.

pub mod fixtures;
pub mod harness;

// Re-export commonly used items
pub use harness::{assert_positions_close, assert_positions_eq, read_report, shape_key_names};
