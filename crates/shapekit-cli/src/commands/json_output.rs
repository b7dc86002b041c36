//! JSON output types for machine-readable CLI output.
//!
//! This module provides structured output types for the `--json` flag on
//! `inspect`, `validate`, and `bake`. Scene validation errors pass through
//! their own stable codes (`E001`...); failures at the CLI boundary use the
//! `CLI_xxx` codes below.

use serde::{Deserialize, Serialize};
use shapekit_bake::BakeWarning;
use shapekit_scene::{Object, Scene, ValidationError, ValidationWarning};

use crate::input::InputError;

/// Error codes for CLI-level failures.
pub mod error_codes {
    /// File could not be read
    pub const FILE_READ: &str = "CLI_001";
    /// Unknown file extension
    pub const UNKNOWN_EXTENSION: &str = "CLI_002";
    /// Scene document parse error
    pub const SCENE_PARSE: &str = "CLI_003";
    /// Named object does not exist in the scene
    pub const OBJECT_NOT_FOUND: &str = "CLI_004";
    /// Output file could not be written
    pub const FILE_WRITE: &str = "CLI_005";
}

/// A structured error in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonError {
    /// Stable error code (e.g., "CLI_001", "E001", "BAKE_002")
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Path to the problematic element (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// Source file path (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<String>,
}

impl JsonError {
    /// Creates a new error with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
            file: None,
        }
    }

    /// Sets the element path for this error.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Sets the file path for this error.
    pub fn with_file(mut self, file: impl Into<String>) -> Self {
        self.file = Some(file.into());
        self
    }
}

/// A structured warning in JSON output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct JsonWarning {
    /// Stable warning code (e.g., "W001")
    pub code: String,
    /// Human-readable warning message
    pub message: String,
    /// Path to the element concerned (if applicable)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl JsonWarning {
    /// Creates a new warning with code and message.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            path: None,
        }
    }

    /// Sets the element path for this warning.
    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }
}

/// Converts a scene load error into a structured JSON error.
pub fn input_error_to_json(error: &InputError, file: Option<&str>) -> JsonError {
    let code = match error {
        InputError::FileRead { .. } => error_codes::FILE_READ,
        InputError::UnknownExtension { .. } => error_codes::UNKNOWN_EXTENSION,
        InputError::SceneParse { .. } => error_codes::SCENE_PARSE,
    };
    let mut json = JsonError::new(code, error.to_string());
    if let Some(file) = file {
        json = json.with_file(file);
    }
    json
}

/// Converts a validation error into a structured JSON error.
pub fn validation_error_to_json(error: &ValidationError) -> JsonError {
    let mut json = JsonError::new(error.code.code(), error.message.clone());
    if let Some(path) = &error.path {
        json = json.with_path(path.clone());
    }
    json
}

/// Converts a validation warning into a structured JSON warning.
pub fn validation_warning_to_json(warning: &ValidationWarning) -> JsonWarning {
    let mut json = JsonWarning::new(warning.code.code(), warning.message.clone());
    if let Some(path) = &warning.path {
        json = json.with_path(path.clone());
    }
    json
}

/// Converts a bake warning into a structured JSON warning.
pub fn bake_warning_to_json(warning: &BakeWarning) -> JsonWarning {
    let mut json = JsonWarning::new(warning.code.clone(), warning.message.clone());
    if let Some(shape) = &warning.shape {
        json = json.with_path(format!("shape_keys[\"{}\"]", shape));
    }
    json
}

/// Envelope for `inspect --json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectOutput {
    /// Whether the scene loaded successfully
    pub success: bool,
    /// Load errors
    pub errors: Vec<JsonError>,
    /// Scene summary (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene: Option<SceneSummary>,
}

impl InspectOutput {
    /// Creates a successful inspect output.
    pub fn success(scene: SceneSummary) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            scene: Some(scene),
        }
    }

    /// Creates a failed inspect output.
    pub fn failure(errors: Vec<JsonError>) -> Self {
        Self {
            success: false,
            errors,
            scene: None,
        }
    }
}

/// Flat description of a scene for machine consumption.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneSummary {
    /// Scene name
    pub name: String,
    /// Number of objects
    pub object_count: usize,
    /// Number of collections, root included
    pub collection_count: usize,
    /// Canonical scene hash
    pub scene_hash: String,
    /// BLAKE3 hash of the source file
    pub source_hash: String,
    /// Per-object summaries in handle order
    pub objects: Vec<ObjectSummary>,
}

/// Flat description of one object.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObjectSummary {
    /// Object name
    pub name: String,
    /// Vertex count
    pub vertex_count: usize,
    /// Triangle count
    pub triangle_count: usize,
    /// Shape key names in order
    pub shape_keys: Vec<String>,
    /// Modifier stack in order
    pub modifiers: Vec<ModifierSummary>,
}

impl ObjectSummary {
    /// Builds a summary from an object.
    pub fn from_object(object: &Object) -> Self {
        Self {
            name: object.name.clone(),
            vertex_count: object.mesh.vertex_count(),
            triangle_count: object.mesh.triangle_count(),
            shape_keys: object
                .mesh
                .shape_keys
                .iter()
                .map(|k| k.name.clone())
                .collect(),
            modifiers: object
                .modifiers
                .iter()
                .map(|m| ModifierSummary {
                    name: m.name.clone(),
                    kind: m.kind.kind_name().to_string(),
                    enabled: m.show_viewport,
                })
                .collect(),
        }
    }
}

/// Flat description of one modifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifierSummary {
    /// Modifier name
    pub name: String,
    /// Kind tag (displace, smooth, subdivide, mirror, array)
    pub kind: String,
    /// Whether the modifier is enabled
    pub enabled: bool,
}

/// Envelope for `validate --json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateOutput {
    /// Whether validation succeeded (no errors)
    pub success: bool,
    /// Validation errors
    pub errors: Vec<JsonError>,
    /// Validation warnings
    pub warnings: Vec<JsonWarning>,
    /// Canonical scene hash
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene_hash: Option<String>,
    /// BLAKE3 hash of the source file
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_hash: Option<String>,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

impl ValidateOutput {
    /// Creates a successful validate output.
    pub fn success(
        warnings: Vec<JsonWarning>,
        scene_hash: String,
        source_hash: String,
        duration_ms: u64,
    ) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            warnings,
            scene_hash: Some(scene_hash),
            source_hash: Some(source_hash),
            duration_ms,
        }
    }

    /// Creates a failed validate output.
    pub fn failure(
        errors: Vec<JsonError>,
        warnings: Vec<JsonWarning>,
        source_hash: Option<String>,
        duration_ms: u64,
    ) -> Self {
        Self {
            success: false,
            errors,
            warnings,
            scene_hash: None,
            source_hash,
            duration_ms,
        }
    }
}

/// Envelope for `bake --json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BakeOutput {
    /// Whether the bake succeeded
    pub success: bool,
    /// Fatal errors
    pub errors: Vec<JsonError>,
    /// Non-fatal per-shape warnings
    pub warnings: Vec<JsonWarning>,
    /// Bake result details (on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<BakeResultSummary>,
}

impl BakeOutput {
    /// Creates a successful bake output.
    pub fn success(result: BakeResultSummary, warnings: Vec<JsonWarning>) -> Self {
        Self {
            success: true,
            errors: Vec::new(),
            warnings,
            result: Some(result),
        }
    }

    /// Creates a failed bake output.
    pub fn failure(errors: Vec<JsonError>, warnings: Vec<JsonWarning>) -> Self {
        Self {
            success: false,
            errors,
            warnings,
            result: None,
        }
    }
}

/// Result details of a successful bake.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BakeResultSummary {
    /// Baked object name
    pub object: String,
    /// Baked modifier name
    pub modifier: String,
    /// Shape keys on the result object
    pub shape_keys: usize,
    /// Path the baked scene was written to
    pub scene_path: String,
    /// Path the report was written to
    pub report_path: String,
    /// Canonical hash of the baked scene
    pub scene_hash: String,
    /// Duration in milliseconds
    pub duration_ms: u64,
}

/// Builds the scene summary `inspect` renders.
pub fn scene_summary(scene: &Scene, scene_hash: String, source_hash: String) -> SceneSummary {
    SceneSummary {
        name: scene.name.clone(),
        object_count: scene.object_count(),
        collection_count: scene.collection_count(),
        scene_hash,
        source_hash,
        objects: scene
            .objects()
            .map(|(_, object)| ObjectSummary::from_object(object))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use shapekit_scene::{ErrorCode, Mesh, WarningCode};

    #[test]
    fn test_json_error_builders() {
        let error = JsonError::new("CLI_001", "failed to read")
            .with_file("scene.json")
            .with_path("objects[0]");
        assert_eq!(error.code, "CLI_001");
        assert_eq!(error.file.as_deref(), Some("scene.json"));
        assert_eq!(error.path.as_deref(), Some("objects[0]"));
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let error = JsonError::new("CLI_003", "bad scene");
        let json = serde_json::to_string(&error).unwrap();
        assert!(!json.contains("path"));
        assert!(!json.contains("file"));
    }

    #[test]
    fn test_validation_error_passthrough() {
        let error = ValidationError::with_path(
            ErrorCode::TriangleIndexOutOfRange,
            "triangle references vertex 9",
            "objects[\"Cube\"].triangles[2]",
        );
        let json = validation_error_to_json(&error);
        assert_eq!(json.code, "E001");
        assert_eq!(json.path.as_deref(), Some("objects[\"Cube\"].triangles[2]"));
    }

    #[test]
    fn test_validation_warning_passthrough() {
        let warning = ValidationWarning::new(WarningCode::EmptyMesh, "mesh has no vertices");
        let json = validation_warning_to_json(&warning);
        assert_eq!(json.code, "W002");
        assert!(json.path.is_none());
    }

    #[test]
    fn test_bake_warning_maps_shape_to_path() {
        let warning = BakeWarning::modifier_disabled("Smile");
        let json = bake_warning_to_json(&warning);
        assert_eq!(json.code, "W001");
        assert_eq!(json.path.as_deref(), Some("shape_keys[\"Smile\"]"));
    }

    #[test]
    fn test_object_summary() {
        let mut mesh = Mesh::new(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            vec![[0, 1, 2]],
        );
        mesh.add_shape_key();
        let object = Object::new("Tri", mesh);

        let summary = ObjectSummary::from_object(&object);
        assert_eq!(summary.name, "Tri");
        assert_eq!(summary.vertex_count, 3);
        assert_eq!(summary.triangle_count, 1);
        assert_eq!(summary.shape_keys, vec!["Basis"]);
        assert!(summary.modifiers.is_empty());
    }

    #[test]
    fn test_inspect_output_failure_omits_scene() {
        let output = InspectOutput::failure(vec![JsonError::new("CLI_001", "no such file")]);
        let json = serde_json::to_string(&output).unwrap();
        assert!(!json.contains("\"scene\""));
        assert!(json.contains("\"success\":false"));
    }
}
