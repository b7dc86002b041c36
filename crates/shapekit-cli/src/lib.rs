//! shapekit CLI library.
//!
//! This crate provides the command implementations behind the `shapekit`
//! binary: scene loading, validation, and the shape-key-aware bake.

pub mod commands;
pub mod input;
