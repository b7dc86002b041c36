//! shapekit CLI - bake modifiers into meshes without losing shape keys
//!
//! This binary provides commands for inspecting, validating, and baking
//! scene files.

use clap::{Parser, Subcommand};
use std::process::ExitCode;

// Use modules from the library crate
use shapekit_cli::commands;

/// shapekit - Shape-Key-Aware Modifier Baking
#[derive(Parser)]
#[command(name = "shapekit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print a summary of a scene file (objects, shape keys, modifiers)
    Inspect {
        /// Path to the scene file (JSON)
        #[arg(short, long)]
        scene: String,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Validate a scene file without baking
    Validate {
        /// Path to the scene file (JSON)
        #[arg(short, long)]
        scene: String,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Bake a modifier into an object, preserving its shape keys
    Bake {
        /// Path to the scene file (JSON)
        #[arg(short, long)]
        scene: String,

        /// Name of the object to bake (default: the scene's active object)
        #[arg(short, long)]
        object: Option<String>,

        /// Name of the modifier to bake
        #[arg(short, long)]
        modifier: String,

        /// Group intermediate duplicates into a "{object} Shapekeys" collection
        #[arg(long)]
        collection: bool,

        /// Output scene path (default: ".baked.json" sibling of the input)
        #[arg(long)]
        output: Option<String>,

        /// Report file path (default: "{object}.bake.report.json" next to the input)
        #[arg(long)]
        report: Option<String>,

        /// Output machine-readable JSON diagnostics (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Inspect { scene, json } => commands::inspect::run(&scene, json),
        Commands::Validate { scene, json } => commands::validate::run(&scene, json),
        Commands::Bake {
            scene,
            object,
            modifier,
            collection,
            output,
            report,
            json,
        } => commands::bake::run(
            &scene,
            object.as_deref(),
            &modifier,
            collection,
            output.as_deref(),
            report.as_deref(),
            json,
        ),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("{}: {}", colored::Colorize::red("error"), e);
            ExitCode::from(1)
        }
    }
}
