//! Inspect command implementation
//!
//! Prints a summary of a scene file: objects, shape keys, modifier stacks,
//! and the collection tree.

use anyhow::{Context, Result};
use colored::Colorize;
use shapekit_scene::{canonical_scene_hash, CollectionId, Scene};
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{input_error_to_json, scene_summary, InspectOutput};
use crate::input::{load_scene, LoadResult};

/// Run the inspect command
///
/// # Arguments
/// * `scene_path` - Path to the scene file (JSON)
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success, 1 if the scene cannot be loaded
pub fn run(scene_path: &str, json_output: bool) -> Result<ExitCode> {
    if json_output {
        run_json(scene_path)
    } else {
        run_human(scene_path)
    }
}

/// Run inspect with human-readable (colored) output
fn run_human(scene_path: &str) -> Result<ExitCode> {
    let LoadResult { scene, source_hash } = load_scene(Path::new(scene_path))
        .with_context(|| format!("Failed to load scene file: {}", scene_path))?;

    println!("{} {}", "Scene:".cyan().bold(), scene.name);
    println!("{} json ({})", "Source:".dimmed(), &source_hash[..16]);
    println!(
        "{} {} object(s), {} collection(s)",
        "Contents:".dimmed(),
        scene.object_count(),
        scene.collection_count()
    );

    println!("\n{}", "Collections:".bold());
    print_collection(&scene, scene.root(), 2)?;

    for (_, object) in scene.objects() {
        println!("\n{}", object.name.bold());
        println!(
            "  {} vertices, {} triangles",
            object.mesh.vertex_count(),
            object.mesh.triangle_count()
        );
        if object.mesh.has_shape_keys() {
            println!("  shape keys:");
            for (index, key) in object.mesh.shape_keys.iter().enumerate() {
                println!("    [{}] {}", index, key.name);
            }
        }
        for modifier in &object.modifiers {
            let state = if modifier.show_viewport {
                "".normal()
            } else {
                " (disabled)".yellow()
            };
            println!(
                "  modifier: {} [{}]{}",
                modifier.name,
                modifier.kind.kind_name().dimmed(),
                state
            );
        }
    }

    let scene_hash = canonical_scene_hash(&scene)?;
    println!("\n{} {}", "Scene hash:".dimmed(), &scene_hash[..16]);
    Ok(ExitCode::SUCCESS)
}

/// Run inspect with machine-readable JSON output
fn run_json(scene_path: &str) -> Result<ExitCode> {
    let LoadResult { scene, source_hash } = match load_scene(Path::new(scene_path)) {
        Ok(loaded) => loaded,
        Err(e) => {
            let output = InspectOutput::failure(vec![input_error_to_json(&e, Some(scene_path))]);
            let json = serde_json::to_string_pretty(&output)
                .expect("InspectOutput serialization should not fail");
            println!("{}", json);
            return Ok(ExitCode::from(1));
        }
    };

    let scene_hash = canonical_scene_hash(&scene)?;
    let output = InspectOutput::success(scene_summary(&scene, scene_hash, source_hash));
    let json = serde_json::to_string_pretty(&output)
        .expect("InspectOutput serialization should not fail");
    println!("{}", json);
    Ok(ExitCode::SUCCESS)
}

fn print_collection(scene: &Scene, id: CollectionId, indent: usize) -> Result<()> {
    let collection = scene.collection(id)?;
    println!(
        "{}{} ({} object(s))",
        " ".repeat(indent),
        collection.name,
        collection.objects.len()
    );
    for child in &collection.children {
        print_collection(scene, *child, indent + 2)?;
    }
    Ok(())
}
