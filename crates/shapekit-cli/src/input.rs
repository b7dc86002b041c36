//! Input abstraction for loading scene files.
//!
//! Scenes are stored as JSON documents. Loading dispatches by file
//! extension and returns the parsed scene together with a source hash for
//! provenance in reports.

use std::path::{Path, PathBuf};

use shapekit_scene::Scene;

/// Recognized scene file extensions.
pub const SCENE_EXTENSIONS: &[&str] = &["json"];

/// Result of loading a scene from disk.
#[derive(Debug)]
pub struct LoadResult {
    /// The parsed scene.
    pub scene: Scene,
    /// BLAKE3 hash of the source file content (hex string).
    pub source_hash: String,
}

/// Errors that can occur during scene loading.
#[derive(Debug)]
pub enum InputError {
    /// File could not be read.
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    /// Unknown file extension.
    UnknownExtension { extension: Option<String> },

    /// Scene document failed to parse or validate structurally.
    SceneParse { message: String },
}

impl std::fmt::Display for InputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputError::FileRead { path, source } => {
                write!(f, "failed to read file '{}': {}", path.display(), source)
            }
            InputError::UnknownExtension { extension } => match extension {
                Some(ext) => write!(f, "unknown file extension '.{}' (expected .json)", ext),
                None => write!(f, "file has no extension (expected .json)"),
            },
            InputError::SceneParse { message } => {
                write!(f, "scene parse error: {}", message)
            }
        }
    }
}

impl std::error::Error for InputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InputError::FileRead { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Load a scene from a file path.
///
/// # Example
/// ```no_run
/// use std::path::Path;
/// use shapekit_cli::input::load_scene;
///
/// let result = load_scene(Path::new("scene.json")).unwrap();
/// println!("Loaded scene '{}'", result.scene.name);
/// ```
pub fn load_scene(path: &Path) -> Result<LoadResult, InputError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|s| s.to_lowercase());

    match extension.as_deref() {
        Some(ext) if SCENE_EXTENSIONS.contains(&ext) => load_json_scene(path),
        _ => Err(InputError::UnknownExtension { extension }),
    }
}

fn load_json_scene(path: &Path) -> Result<LoadResult, InputError> {
    let content = std::fs::read_to_string(path).map_err(|e| InputError::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let source_hash = blake3::hash(content.as_bytes()).to_hex().to_string();

    let scene = Scene::from_json(&content).map_err(|e| InputError::SceneParse {
        message: e.to_string(),
    })?;

    Ok(LoadResult { scene, source_hash })
}
