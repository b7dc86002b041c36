//! Shape keys and their removal semantics.
//!
//! Keys are stored as per-vertex offsets relative to the basis (entry 0),
//! which itself stores zero offsets. Removal follows the host rules the bake
//! pipeline depends on:
//!
//! - removing a non-basis key while others remain only drops the entry;
//! - removing the basis promotes the next key: base positions advance by the
//!   promoted key's offsets and every remaining key is re-expressed relative
//!   to the new basis, so each key's absolute geometry is preserved;
//! - removing the sole remaining key commits its shape into the base
//!   positions without changing the displayed geometry.

use serde::{Deserialize, Serialize};

use crate::error::{SceneError, SceneResult};
use crate::mesh::Mesh;

/// A named per-vertex deformation layered over the mesh base positions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ShapeKey {
    /// Key name, restored verbatim by the bake pipeline.
    pub name: String,
    /// Per-vertex `[dx, dy, dz]` offsets relative to the basis.
    pub offsets: Vec<[f32; 3]>,
}

impl ShapeKey {
    /// Creates a shape key from a name and offset buffer.
    pub fn new(name: impl Into<String>, offsets: Vec<[f32; 3]>) -> Self {
        Self {
            name: name.into(),
            offsets,
        }
    }

    /// Creates a shape key with zero offsets for `vertex_count` vertices.
    pub fn zero(name: impl Into<String>, vertex_count: usize) -> Self {
        Self::new(name, vec![[0.0; 3]; vertex_count])
    }

    /// True when every offset is exactly zero.
    pub fn is_identity(&self) -> bool {
        self.offsets.iter().all(|o| *o == [0.0; 3])
    }
}

impl Mesh {
    /// Appends a new shape key with zero offsets and returns its index.
    ///
    /// The first key added to a keyless mesh is the basis, named "Basis";
    /// later keys default to "Key 1", "Key 2", and so on.
    pub fn add_shape_key(&mut self) -> usize {
        let index = self.shape_keys.len();
        let name = if index == 0 {
            "Basis".to_string()
        } else {
            format!("Key {}", index)
        };
        self.shape_keys
            .push(ShapeKey::zero(name, self.positions.len()));
        index
    }

    /// Removes the shape key at `index` and returns it.
    ///
    /// Applies the promotion and commit rules described in the module docs.
    pub fn remove_shape_key(&mut self, index: usize) -> SceneResult<ShapeKey> {
        let len = self.shape_keys.len();
        if index >= len {
            return Err(SceneError::ShapeKeyIndexOutOfRange { index, len });
        }

        if len == 1 {
            // Sole key: commit its shape into the base positions.
            self.ensure_key_length(0)?;
            let key = self.shape_keys.remove(0);
            for (p, o) in self.positions.iter_mut().zip(&key.offsets) {
                p[0] += o[0];
                p[1] += o[1];
                p[2] += o[2];
            }
            return Ok(key);
        }

        if index == 0 {
            // Basis removal: promote the next key and re-express the rest.
            for i in 1..len {
                self.ensure_key_length(i)?;
            }
            let key = self.shape_keys.remove(0);
            let promoted = self.shape_keys[0].offsets.clone();
            for (p, o) in self.positions.iter_mut().zip(&promoted) {
                p[0] += o[0];
                p[1] += o[1];
                p[2] += o[2];
            }
            for remaining in &mut self.shape_keys {
                for (o, d) in remaining.offsets.iter_mut().zip(&promoted) {
                    o[0] -= d[0];
                    o[1] -= d[1];
                    o[2] -= d[2];
                }
            }
            return Ok(key);
        }

        Ok(self.shape_keys.remove(index))
    }

    /// Renames the shape key at `index`.
    pub fn rename_shape_key(&mut self, index: usize, name: impl Into<String>) -> SceneResult<()> {
        let len = self.shape_keys.len();
        let key = self
            .shape_keys
            .get_mut(index)
            .ok_or(SceneError::ShapeKeyIndexOutOfRange { index, len })?;
        key.name = name.into();
        Ok(())
    }

    /// Absolute vertex positions of the key at `index` (base plus offsets).
    pub fn key_absolute_positions(&self, index: usize) -> SceneResult<Vec<[f32; 3]>> {
        let len = self.shape_keys.len();
        if index >= len {
            return Err(SceneError::ShapeKeyIndexOutOfRange { index, len });
        }
        self.ensure_key_length(index)?;
        let key = &self.shape_keys[index];
        Ok(self
            .positions
            .iter()
            .zip(&key.offsets)
            .map(|(p, o)| [p[0] + o[0], p[1] + o[1], p[2] + o[2]])
            .collect())
    }

    /// Appends a shape key whose absolute geometry is `positions`, expressed
    /// as offsets relative to the basis. Returns the new key's index.
    ///
    /// Errors when the vertex counts differ or the mesh has no basis yet.
    pub fn append_shape_key_from(
        &mut self,
        name: impl Into<String>,
        positions: &[[f32; 3]],
    ) -> SceneResult<usize> {
        if self.shape_keys.is_empty() {
            return Err(SceneError::ShapeKeyIndexOutOfRange { index: 0, len: 0 });
        }
        if positions.len() != self.positions.len() {
            return Err(SceneError::VertexCountMismatch {
                expected: self.positions.len(),
                found: positions.len(),
            });
        }
        let basis_absolute = self.key_absolute_positions(0)?;
        let offsets = positions
            .iter()
            .zip(&basis_absolute)
            .map(|(p, b)| [p[0] - b[0], p[1] - b[1], p[2] - b[2]])
            .collect();
        let index = self.shape_keys.len();
        self.shape_keys.push(ShapeKey::new(name, offsets));
        Ok(index)
    }

    fn ensure_key_length(&self, index: usize) -> SceneResult<()> {
        let key = &self.shape_keys[index];
        if key.offsets.len() != self.positions.len() {
            return Err(SceneError::ShapeKeyLengthMismatch {
                key: key.name.clone(),
                expected: self.positions.len(),
                found: key.offsets.len(),
            });
        }
        Ok(())
    }
}
