//! Error types for the scene model, and the validation result surface.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// Errors that can occur while building or mutating a scene.
#[derive(Debug, Error)]
pub enum SceneError {
    /// Lookup of an object handle or name failed.
    #[error("Object not found in scene: {object}")]
    ObjectNotFound { object: String },

    /// Lookup of a collection handle or name failed.
    #[error("Collection not found in scene: {collection}")]
    CollectionNotFound { collection: String },

    /// An object is not linked into any collection.
    #[error("Object '{object}' is not linked into any collection")]
    ObjectNotInCollection { object: String },

    /// A shape-key index was outside the key list.
    #[error("Shape key index {index} out of range (object has {len} keys)")]
    ShapeKeyIndexOutOfRange { index: usize, len: usize },

    /// A shape key's offset buffer does not match the mesh vertex count.
    #[error("Shape key '{key}' has {found} offsets but the mesh has {expected} vertices")]
    ShapeKeyLengthMismatch {
        key: String,
        expected: usize,
        found: usize,
    },

    /// Joining one object into another as a shape requires equal vertex counts.
    #[error("Cannot join as shape: target has {expected} vertices, source has {found}")]
    VertexCountMismatch { expected: usize, found: usize },

    /// A scene document failed structural checks beyond JSON syntax.
    #[error("Invalid scene document: {message}")]
    InvalidDocument { message: String },

    /// Failed to parse or serialize scene JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl SceneError {
    /// Creates a new object-not-found error.
    pub fn object_not_found(object: impl Into<String>) -> Self {
        Self::ObjectNotFound {
            object: object.into(),
        }
    }

    /// Creates a new collection-not-found error.
    pub fn collection_not_found(collection: impl Into<String>) -> Self {
        Self::CollectionNotFound {
            collection: collection.into(),
        }
    }

    /// Creates a new invalid-document error.
    pub fn invalid_document(message: impl Into<String>) -> Self {
        Self::InvalidDocument {
            message: message.into(),
        }
    }
}

/// Stable validation error codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    /// A triangle references a vertex index outside the position buffer.
    TriangleIndexOutOfRange,
    /// A shape key's offset buffer length differs from the vertex count.
    ShapeKeyLengthMismatch,
    /// Two objects share a name.
    DuplicateObjectName,
    /// A collection, selection, or active-object reference does not resolve.
    DanglingReference,
    /// An object is not linked into any collection.
    UnlinkedObject,
    /// A modifier has an empty name.
    EmptyModifierName,
    /// Two modifiers on one object share a name.
    DuplicateModifierName,
    /// The active shape-key index is outside the key list.
    ActiveShapeKeyOutOfRange,
}

impl ErrorCode {
    /// Short stable code for reports and CLI output.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorCode::TriangleIndexOutOfRange => "E001",
            ErrorCode::ShapeKeyLengthMismatch => "E002",
            ErrorCode::DuplicateObjectName => "E003",
            ErrorCode::DanglingReference => "E004",
            ErrorCode::UnlinkedObject => "E005",
            ErrorCode::EmptyModifierName => "E006",
            ErrorCode::DuplicateModifierName => "E007",
            ErrorCode::ActiveShapeKeyOutOfRange => "E008",
        }
    }
}

/// Stable validation warning codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningCode {
    /// The basis key carries nonzero offsets.
    BasisWithOffsets,
    /// A mesh has no vertices.
    EmptyMesh,
    /// Two collections share a name.
    DuplicateCollectionName,
}

impl WarningCode {
    /// Short stable code for reports and CLI output.
    pub fn code(&self) -> &'static str {
        match self {
            WarningCode::BasisWithOffsets => "W001",
            WarningCode::EmptyMesh => "W002",
            WarningCode::DuplicateCollectionName => "W003",
        }
    }
}

/// A single validation error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationError {
    /// Stable error code.
    pub code: ErrorCode,
    /// Human-readable message.
    pub message: String,
    /// Path to the offending element, e.g. `objects["Cube"].triangles[4]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ValidationError {
    /// Creates an error without a path.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates an error with a path.
    pub fn with_path(code: ErrorCode, message: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

/// A single validation warning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationWarning {
    /// Stable warning code.
    pub code: WarningCode,
    /// Human-readable message.
    pub message: String,
    /// Path to the element concerned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

impl ValidationWarning {
    /// Creates a warning without a path.
    pub fn new(code: WarningCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            path: None,
        }
    }

    /// Creates a warning with a path.
    pub fn with_path(
        code: WarningCode,
        message: impl Into<String>,
        path: impl Into<String>,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            path: Some(path.into()),
        }
    }
}

/// Outcome of validating a scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationResult {
    /// True when no errors were recorded; warnings do not clear this.
    pub ok: bool,
    /// Validation errors.
    pub errors: Vec<ValidationError>,
    /// Validation warnings.
    pub warnings: Vec<ValidationWarning>,
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self {
            ok: true,
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }
}

impl ValidationResult {
    /// Records an error and marks the result failed.
    pub fn add_error(&mut self, error: ValidationError) {
        self.ok = false;
        self.errors.push(error);
    }

    /// Records a warning.
    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// True when validation passed (warnings allowed).
    pub fn is_ok(&self) -> bool {
        self.ok
    }
}
