//! Bake command implementation
//!
//! Loads a scene, bakes a named modifier into a named object while
//! preserving its shape keys, then writes the baked scene and a report.

use anyhow::{Context, Result};
use colored::Colorize;
use shapekit_bake::{bake_with_config, BakeConfig, BakeOutcome};
use shapekit_scene::{ObjectId, Scene};
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{
    bake_warning_to_json, error_codes, input_error_to_json, BakeOutput, BakeResultSummary,
    JsonError, JsonWarning,
};
use super::reporting;
use crate::input::{load_scene, LoadResult};

/// Run the bake command
///
/// # Arguments
/// * `scene_path` - Path to the scene file (JSON)
/// * `object_name` - Name of the object to bake (default: the scene's active object)
/// * `modifier_name` - Name of the modifier to bake
/// * `collection` - Whether to group intermediate duplicates into a sub-collection
/// * `output` - Output scene path (default: `.baked.json` sibling of the input)
/// * `report` - Report path (default: `{object}.bake.report.json` next to the input)
/// * `json_output` - Whether to output machine-readable JSON diagnostics
///
/// # Returns
/// Exit code: 0 on success (warnings allowed), 1 on fatal failure
#[allow(clippy::too_many_arguments)]
pub fn run(
    scene_path: &str,
    object_name: Option<&str>,
    modifier_name: &str,
    collection: bool,
    output: Option<&str>,
    report: Option<&str>,
    json_output: bool,
) -> Result<ExitCode> {
    if json_output {
        run_json(
            scene_path,
            object_name,
            modifier_name,
            collection,
            output,
            report,
        )
    } else {
        run_human(
            scene_path,
            object_name,
            modifier_name,
            collection,
            output,
            report,
        )
    }
}

/// Run bake with human-readable (colored) output
fn run_human(
    scene_path: &str,
    object_name: Option<&str>,
    modifier_name: &str,
    collection: bool,
    output: Option<&str>,
    report: Option<&str>,
) -> Result<ExitCode> {
    let LoadResult { mut scene, .. } = load_scene(Path::new(scene_path))
        .with_context(|| format!("Failed to load scene file: {}", scene_path))?;

    let id = resolve_object(&scene, object_name).map_err(anyhow::Error::msg)?;
    let object_label = scene.object(id)?.name.clone();

    println!(
        "{} '{}' into '{}' ({})",
        "Baking:".cyan().bold(),
        modifier_name,
        object_label,
        scene_path
    );

    let config = BakeConfig::new().with_collection_grouping(collection);
    let outcome = bake_with_config(&mut scene, id, modifier_name, &config)
        .with_context(|| format!("Failed to bake '{}' into '{}'", modifier_name, object_label))?;

    for warning in &outcome.report.warnings {
        let shape_info = warning
            .shape
            .as_ref()
            .map(|s| format!(" shape '{}':", s))
            .unwrap_or_default();
        println!(
            "  {} [{}]{} {}",
            "!".yellow(),
            warning.code.yellow(),
            shape_info.dimmed(),
            warning.message
        );
    }

    let scene_out = output
        .map(|s| s.to_string())
        .unwrap_or_else(|| reporting::baked_scene_path(scene_path));
    let report_out = report
        .map(|s| s.to_string())
        .unwrap_or_else(|| reporting::report_path(scene_path, &outcome.report.object));

    reporting::write_scene(&scene.to_json_pretty()?, &scene_out)?;
    reporting::write_report(&outcome.report, &report_out)?;

    println!("\n{} {}", "Scene written to:".dimmed(), scene_out);
    println!("{} {}", "Report written to:".dimmed(), report_out);
    println!(
        "\n{} Baked '{}' into '{}' ({} shape key(s), {}ms)",
        "SUCCESS".green().bold(),
        modifier_name,
        outcome.report.object,
        outcome.report.shape_keys,
        outcome.report.duration_ms
    );
    Ok(ExitCode::SUCCESS)
}

/// Run bake with machine-readable JSON output
fn run_json(
    scene_path: &str,
    object_name: Option<&str>,
    modifier_name: &str,
    collection: bool,
    output: Option<&str>,
    report: Option<&str>,
) -> Result<ExitCode> {
    let LoadResult { mut scene, .. } = match load_scene(Path::new(scene_path)) {
        Ok(loaded) => loaded,
        Err(e) => {
            return print_failure(vec![input_error_to_json(&e, Some(scene_path))], vec![]);
        }
    };

    let id = match resolve_object(&scene, object_name) {
        Ok(id) => id,
        Err(message) => {
            let error =
                JsonError::new(error_codes::OBJECT_NOT_FOUND, message).with_file(scene_path);
            return print_failure(vec![error], vec![]);
        }
    };

    let config = BakeConfig::new().with_collection_grouping(collection);
    let outcome = match bake_with_config(&mut scene, id, modifier_name, &config) {
        Ok(outcome) => outcome,
        Err(e) => {
            return print_failure(vec![JsonError::new(e.code(), e.to_string())], vec![]);
        }
    };

    let warnings: Vec<JsonWarning> = outcome
        .report
        .warnings
        .iter()
        .map(bake_warning_to_json)
        .collect();

    let scene_out = output
        .map(|s| s.to_string())
        .unwrap_or_else(|| reporting::baked_scene_path(scene_path));
    let report_out = report
        .map(|s| s.to_string())
        .unwrap_or_else(|| reporting::report_path(scene_path, &outcome.report.object));

    if let Err(e) = write_outputs(&scene, &outcome, &scene_out, &report_out) {
        let error = JsonError::new(error_codes::FILE_WRITE, e.to_string());
        return print_failure(vec![error], warnings);
    }

    let result = BakeResultSummary {
        object: outcome.report.object.clone(),
        modifier: outcome.report.modifier.clone(),
        shape_keys: outcome.report.shape_keys,
        scene_path: scene_out,
        report_path: report_out,
        scene_hash: outcome.report.scene_hash.clone(),
        duration_ms: outcome.report.duration_ms,
    };
    let output = BakeOutput::success(result, warnings);
    let json = serde_json::to_string_pretty(&output)
        .expect("BakeOutput serialization should not fail");
    println!("{}", json);
    Ok(ExitCode::SUCCESS)
}

/// Resolves the object to bake: the named object, or the scene's active
/// object when no name is given.
fn resolve_object(scene: &Scene, object_name: Option<&str>) -> Result<ObjectId, String> {
    match object_name {
        Some(name) => scene
            .object_by_name(name)
            .ok_or_else(|| format!("object '{}' not found in scene", name)),
        None => scene
            .active()
            .ok_or_else(|| "no object specified and the scene has no active object".to_string()),
    }
}

fn write_outputs(
    scene: &Scene,
    outcome: &BakeOutcome,
    scene_out: &str,
    report_out: &str,
) -> Result<()> {
    reporting::write_scene(&scene.to_json_pretty()?, scene_out)?;
    reporting::write_report(&outcome.report, report_out)?;
    Ok(())
}

fn print_failure(errors: Vec<JsonError>, warnings: Vec<JsonWarning>) -> Result<ExitCode> {
    let output = BakeOutput::failure(errors, warnings);
    let json = serde_json::to_string_pretty(&output)
        .expect("BakeOutput serialization should not fail");
    println!("{}", json);
    Ok(ExitCode::from(1))
}
