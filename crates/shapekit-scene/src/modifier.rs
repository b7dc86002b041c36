//! Modifier stack types.
//!
//! These describe WHAT sits on an object's stack; the geometry evaluation
//! lives in the bake crate.

use serde::{Deserialize, Serialize};

/// A named entry on an object's modifier stack.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Modifier {
    /// Stack-unique modifier name (what the bake entry point looks up).
    pub name: String,
    /// The modifier's parameters.
    pub kind: ModifierKind,
    /// Whether the modifier is enabled. Disabled modifiers are skipped with
    /// a warning by the bake pipeline.
    #[serde(default = "default_true", skip_serializing_if = "is_true")]
    pub show_viewport: bool,
}

impl Modifier {
    /// Creates an enabled modifier.
    pub fn new(name: impl Into<String>, kind: ModifierKind) -> Self {
        Self {
            name: name.into(),
            kind,
            show_viewport: true,
        }
    }
}

fn default_true() -> bool {
    true
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_true(value: &bool) -> bool {
    *value
}

/// Mesh modifier parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ModifierKind {
    /// Push vertices along an axis or their normals.
    Displace {
        /// Displacement distance.
        strength: f32,
        /// Direction to displace along.
        direction: DisplaceDirection,
    },
    /// Laplacian smoothing.
    Smooth {
        /// Blend factor toward the neighbor average (0.0 to 1.0).
        factor: f32,
        /// Number of smoothing passes.
        iterations: u32,
    },
    /// Midpoint subdivision.
    Subdivide {
        /// Subdivision levels; each level quadruples the triangle count.
        levels: u32,
    },
    /// Mirror across an axis plane through the origin.
    Mirror {
        /// Mirror plane normal axis.
        axis: Axis,
        /// Source vertices within this distance of the plane weld to their
        /// own mirror image instead of duplicating.
        merge_threshold: f32,
    },
    /// Repeat the geometry along a fixed offset.
    Array {
        /// Total number of copies, including the original.
        count: u32,
        /// Offset between consecutive copies.
        offset: [f32; 3],
    },
}

impl ModifierKind {
    /// The kind's tag string, matching the serialized `type` field.
    pub fn kind_name(&self) -> &'static str {
        match self {
            ModifierKind::Displace { .. } => "displace",
            ModifierKind::Smooth { .. } => "smooth",
            ModifierKind::Subdivide { .. } => "subdivide",
            ModifierKind::Mirror { .. } => "mirror",
            ModifierKind::Array { .. } => "array",
        }
    }
}

/// Cartesian axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    /// X axis.
    X,
    /// Y axis.
    Y,
    /// Z axis.
    Z,
}

impl Axis {
    /// Index of this axis into an `[x, y, z]` triple.
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Displacement direction for [`ModifierKind::Displace`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplaceDirection {
    /// Along the X axis.
    X,
    /// Along the Y axis.
    Y,
    /// Along the Z axis.
    Z,
    /// Along per-vertex normals accumulated from triangles.
    Normal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_modifier_roundtrip() {
        let modifier = Modifier::new(
            "Mirror",
            ModifierKind::Mirror {
                axis: Axis::X,
                merge_threshold: 0.001,
            },
        );
        let json = serde_json::to_string(&modifier).unwrap();
        let back: Modifier = serde_json::from_str(&json).unwrap();
        assert_eq!(modifier, back);
    }

    #[test]
    fn test_kind_tag_names() {
        let kind = ModifierKind::Displace {
            strength: 0.5,
            direction: DisplaceDirection::Normal,
        };
        let json = serde_json::to_value(&kind).unwrap();
        assert_eq!(json["type"], "displace");
        assert_eq!(json["direction"], "normal");

        let kind = ModifierKind::Subdivide { levels: 2 };
        let json = serde_json::to_value(&kind).unwrap();
        assert_eq!(json["type"], "subdivide");
    }

    #[test]
    fn test_kind_name_matches_serialized_tag() {
        let kind = ModifierKind::Mirror {
            axis: Axis::Z,
            merge_threshold: 0.0,
        };
        let json = serde_json::to_value(&kind).unwrap();
        assert_eq!(json["type"], kind.kind_name());
        assert_eq!(kind.kind_name(), "mirror");
    }

    #[test]
    fn test_show_viewport_defaults_to_enabled() {
        let json = r#"{"name":"Grow","kind":{"type":"array","count":3,"offset":[1.0,0.0,0.0]}}"#;
        let modifier: Modifier = serde_json::from_str(json).unwrap();
        assert!(modifier.show_viewport);
    }

    #[test]
    fn test_disabled_survives_roundtrip() {
        let mut modifier = Modifier::new(
            "Smooth",
            ModifierKind::Smooth {
                factor: 0.5,
                iterations: 2,
            },
        );
        modifier.show_viewport = false;
        let json = serde_json::to_string(&modifier).unwrap();
        let back: Modifier = serde_json::from_str(&json).unwrap();
        assert!(!back.show_viewport);
    }

    #[test]
    fn test_axis_index() {
        assert_eq!(Axis::X.index(), 0);
        assert_eq!(Axis::Y.index(), 1);
        assert_eq!(Axis::Z.index(), 2);
    }
}
