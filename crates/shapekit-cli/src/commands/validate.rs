//! Validate command implementation
//!
//! Validates a scene file and prints errors and warnings with their
//! stable codes.

use anyhow::{Context, Result};
use colored::Colorize;
use shapekit_scene::{canonical_scene_hash, validate_scene, ValidationResult};
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;

use super::json_output::{
    input_error_to_json, validation_error_to_json, validation_warning_to_json, JsonError,
    JsonWarning, ValidateOutput,
};
use crate::input::{load_scene, LoadResult};

/// Run the validate command
///
/// # Arguments
/// * `scene_path` - Path to the scene file (JSON)
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 if valid, 1 if invalid
pub fn run(scene_path: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(scene_path)
    } else {
        run_human(scene_path)
    }
}

/// Run validate with human-readable (colored) output
fn run_human(scene_path: &str) -> Result<ExitCode> {
    let start = Instant::now();

    println!("{} {}", "Validating:".cyan().bold(), scene_path);

    let LoadResult { scene, source_hash } = load_scene(Path::new(scene_path))
        .with_context(|| format!("Failed to load scene file: {}", scene_path))?;

    println!("{} json ({})", "Source:".dimmed(), &source_hash[..16]);

    let result = validate_scene(&scene);
    let duration_ms = start.elapsed().as_millis() as u64;

    print_validation_results(&result);

    if result.is_ok() {
        println!(
            "\n{} Scene is valid ({}ms)",
            "SUCCESS".green().bold(),
            duration_ms
        );
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "\n{} Scene has {} error(s) ({}ms)",
            "FAILED".red().bold(),
            result.errors.len(),
            duration_ms
        );
        Ok(ExitCode::from(1))
    }
}

/// Run validate with machine-readable JSON output
fn run_json(scene_path: &str) -> Result<ExitCode> {
    let start = Instant::now();

    let LoadResult { scene, source_hash } = match load_scene(Path::new(scene_path)) {
        Ok(loaded) => loaded,
        Err(e) => {
            let duration_ms = start.elapsed().as_millis() as u64;
            let error = input_error_to_json(&e, Some(scene_path));
            let output = ValidateOutput::failure(vec![error], vec![], None, duration_ms);
            let json = serde_json::to_string_pretty(&output)
                .expect("ValidateOutput serialization should not fail");
            println!("{}", json);
            return Ok(ExitCode::from(1));
        }
    };

    let result = validate_scene(&scene);
    let duration_ms = start.elapsed().as_millis() as u64;

    let warnings: Vec<JsonWarning> =
        result.warnings.iter().map(validation_warning_to_json).collect();

    let output = if result.is_ok() {
        let scene_hash = canonical_scene_hash(&scene)?;
        ValidateOutput::success(warnings, scene_hash, source_hash, duration_ms)
    } else {
        let errors: Vec<JsonError> = result.errors.iter().map(validation_error_to_json).collect();
        ValidateOutput::failure(errors, warnings, Some(source_hash), duration_ms)
    };

    let json = serde_json::to_string_pretty(&output)
        .expect("ValidateOutput serialization should not fail");
    println!("{}", json);

    if output.success {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

/// Print validation results to the console
fn print_validation_results(result: &ValidationResult) {
    if !result.errors.is_empty() {
        println!("\n{}", "Errors:".red().bold());
        for error in &result.errors {
            let path_info = error
                .path
                .as_ref()
                .map(|p| format!(" at {}", p))
                .unwrap_or_default();
            println!(
                "  {} [{}]{}: {}",
                "x".red(),
                error.code.code().red(),
                path_info.dimmed(),
                error.message
            );
        }
    }

    if !result.warnings.is_empty() {
        println!("\n{}", "Warnings:".yellow().bold());
        for warning in &result.warnings {
            let path_info = warning
                .path
                .as_ref()
                .map(|p| format!(" at {}", p))
                .unwrap_or_default();
            println!(
                "  {} [{}]{}: {}",
                "!".yellow(),
                warning.code.code().yellow(),
                path_info.dimmed(),
                warning.message
            );
        }
    }
}
