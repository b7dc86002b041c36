//! Error types for the bake backend.

use shapekit_scene::SceneError;
use thiserror::Error;

/// Result type for bake operations.
pub type BakeResult<T> = Result<T, BakeError>;

/// Errors that can occur while applying or baking modifiers.
///
/// The bake pipeline downgrades [`BakeError::ModifierNotFound`] and
/// [`BakeError::ModifierDisabled`] to per-duplicate warnings; everything
/// else propagates as fatal.
#[derive(Debug, Error)]
pub enum BakeError {
    /// The named modifier is not on the object's stack.
    #[error("Modifier '{modifier}' not found on object '{object}'")]
    ModifierNotFound { object: String, modifier: String },

    /// The named modifier is disabled.
    #[error("Modifier '{modifier}' on object '{object}' is disabled")]
    ModifierDisabled { object: String, modifier: String },

    /// The host restriction this crate exists to work around: a modifier
    /// cannot be applied while the mesh carries shape keys.
    #[error("Cannot apply a modifier to a mesh with shape keys")]
    MeshHasShapeKeys,

    /// A triangle references a vertex outside the position buffer.
    #[error("Triangle references vertex {index} but the mesh has {vertex_count} vertices")]
    TriangleIndexOutOfRange { index: u32, vertex_count: usize },

    /// A scene operation failed.
    #[error(transparent)]
    Scene(#[from] SceneError),

    /// Failed to serialize a bake report.
    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

impl BakeError {
    /// Creates a modifier-not-found error.
    pub fn modifier_not_found(object: impl Into<String>, modifier: impl Into<String>) -> Self {
        Self::ModifierNotFound {
            object: object.into(),
            modifier: modifier.into(),
        }
    }

    /// Creates a modifier-disabled error.
    pub fn modifier_disabled(object: impl Into<String>, modifier: impl Into<String>) -> Self {
        Self::ModifierDisabled {
            object: object.into(),
            modifier: modifier.into(),
        }
    }

    /// Stable error code for reports and CLI output.
    pub fn code(&self) -> &'static str {
        match self {
            BakeError::ModifierNotFound { .. } => "BAKE_001",
            BakeError::ModifierDisabled { .. } => "BAKE_002",
            BakeError::MeshHasShapeKeys => "BAKE_003",
            BakeError::Scene(_) => "BAKE_004",
            BakeError::Json(_) => "BAKE_005",
            BakeError::TriangleIndexOutOfRange { .. } => "BAKE_006",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BakeError::modifier_not_found("Cube", "Mirror");
        assert!(err.to_string().contains("Mirror"));
        assert!(err.to_string().contains("Cube"));

        let err = BakeError::MeshHasShapeKeys;
        assert!(err.to_string().contains("shape keys"));
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(BakeError::modifier_not_found("a", "b").code(), "BAKE_001");
        assert_eq!(BakeError::modifier_disabled("a", "b").code(), "BAKE_002");
        assert_eq!(BakeError::MeshHasShapeKeys.code(), "BAKE_003");
        assert_eq!(
            BakeError::TriangleIndexOutOfRange {
                index: 9,
                vertex_count: 3
            }
            .code(),
            "BAKE_006"
        );
    }

    #[test]
    fn test_scene_error_converts() {
        let scene_err = SceneError::object_not_found("Ghost");
        let err: BakeError = scene_err.into();
        assert_eq!(err.code(), "BAKE_004");
        assert!(err.to_string().contains("Ghost"));
    }
}
