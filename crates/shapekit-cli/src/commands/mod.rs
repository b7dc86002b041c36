//! CLI command implementations

pub mod bake;
pub mod inspect;
pub mod json_output;
pub mod validate;

mod reporting;
