//! Mesh geometry: vertex positions, triangles, and the shape-key list.

use serde::{Deserialize, Serialize};

use crate::shape_key::ShapeKey;

/// Triangle-list mesh data owned by an object.
///
/// Positions are absolute base coordinates. Shape keys layer per-vertex
/// offsets on top of them; see [`ShapeKey`] for the removal semantics the
/// bake pipeline relies on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Mesh {
    /// Base vertex positions, one `[x, y, z]` per vertex.
    pub positions: Vec<[f32; 3]>,
    /// Triangle indices into `positions`.
    pub triangles: Vec<[u32; 3]>,
    /// Ordered shape-key list; entry 0 is the basis when present.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shape_keys: Vec<ShapeKey>,
}

impl Mesh {
    /// Creates a mesh from position and triangle buffers, with no shape keys.
    pub fn new(positions: Vec<[f32; 3]>, triangles: Vec<[u32; 3]>) -> Self {
        Self {
            positions,
            triangles,
            shape_keys: Vec::new(),
        }
    }

    /// Number of vertices.
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.triangles.len()
    }

    /// True when the mesh carries at least one shape key.
    pub fn has_shape_keys(&self) -> bool {
        !self.shape_keys.is_empty()
    }

    /// Axis-aligned bounding box of the base positions.
    ///
    /// Returns `None` for an empty mesh.
    pub fn bounding_box(&self) -> Option<BoundingBox> {
        BoundingBox::from_positions(&self.positions)
    }

    /// Largest vertex index referenced by any triangle, or `None` when there
    /// are no triangles.
    pub fn max_triangle_index(&self) -> Option<u32> {
        self.triangles.iter().flat_map(|t| t.iter().copied()).max()
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BoundingBox {
    /// Minimum corner `[x, y, z]`.
    pub min: [f32; 3],
    /// Maximum corner `[x, y, z]`.
    pub max: [f32; 3],
}

impl BoundingBox {
    /// Computes the bounding box of a position buffer.
    ///
    /// Returns `None` for an empty buffer.
    pub fn from_positions(positions: &[[f32; 3]]) -> Option<Self> {
        let first = positions.first()?;
        let mut min = *first;
        let mut max = *first;
        for p in &positions[1..] {
            for axis in 0..3 {
                min[axis] = min[axis].min(p[axis]);
                max[axis] = max[axis].max(p[axis]);
            }
        }
        Some(Self { min, max })
    }

    /// Extent along each axis.
    pub fn size(&self) -> [f32; 3] {
        [
            self.max[0] - self.min[0],
            self.max[1] - self.min[1],
            self.max[2] - self.min[2],
        ]
    }
}
