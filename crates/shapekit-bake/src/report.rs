//! Bake reports: the machine-readable record of one bake run.

use serde::{Deserialize, Serialize};
use shapekit_scene::{BoundingBox, Mesh};

use crate::error::BakeResult;

/// Current report format version.
pub const REPORT_VERSION: u32 = 1;

/// Warning text for a disabled modifier, emitted once per affected shape.
pub const DISABLED_MODIFIER_MESSAGE: &str = "Modifier is disabled, skipping apply";

/// A non-fatal problem encountered while baking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BakeWarning {
    /// Stable warning code.
    pub code: String,
    /// Human-readable message.
    pub message: String,
    /// Shape key whose duplicate was affected.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<String>,
}

impl BakeWarning {
    /// Warning for a disabled modifier on one duplicate.
    pub fn modifier_disabled(shape: impl Into<String>) -> Self {
        Self {
            code: "W001".to_string(),
            message: DISABLED_MODIFIER_MESSAGE.to_string(),
            shape: Some(shape.into()),
        }
    }

    /// Warning for a modifier missing from one duplicate's stack.
    pub fn modifier_not_found(modifier: &str, shape: impl Into<String>) -> Self {
        Self {
            code: "W002".to_string(),
            message: format!("Modifier '{}' not found, skipping apply", modifier),
            shape: Some(shape.into()),
        }
    }
}

/// Size metrics of the baked mesh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeshMetrics {
    /// Number of vertices.
    pub vertex_count: usize,
    /// Number of triangles.
    pub triangle_count: usize,
    /// Bounding box of the base positions; absent for an empty mesh.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bounding_box: Option<BoundingBox>,
}

impl MeshMetrics {
    /// Measures a mesh.
    pub fn from_mesh(mesh: &Mesh) -> Self {
        Self {
            vertex_count: mesh.vertex_count(),
            triangle_count: mesh.triangle_count(),
            bounding_box: mesh.bounding_box(),
        }
    }
}

/// Record of one bake run, written next to the output scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BakeReport {
    /// Report format version.
    pub report_version: u32,
    /// Whether the bake completed. Warnings do not clear this.
    pub ok: bool,
    /// Final name of the baked object.
    pub object: String,
    /// Name of the modifier that was baked.
    pub modifier: String,
    /// Shape keys on the baked object.
    pub shape_keys: usize,
    /// Non-fatal problems, one per affected duplicate.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<BakeWarning>,
    /// Wall-clock duration of the bake.
    pub duration_ms: u64,
    /// Canonical hash of the output scene.
    pub scene_hash: String,
    /// Metrics of the baked mesh.
    pub metrics: MeshMetrics,
}

impl BakeReport {
    /// Conventional report filename for an object: `{object}.bake.report.json`.
    pub fn filename(object: &str) -> String {
        format!("{}.bake.report.json", object)
    }

    /// Serializes the report as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> BakeResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Parses a report from JSON.
    pub fn from_json(json: &str) -> BakeResult<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
