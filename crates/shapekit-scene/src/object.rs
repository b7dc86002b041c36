//! Objects: named carriers of mesh data plus a modifier stack.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::SceneResult;
use crate::mesh::Mesh;
use crate::modifier::Modifier;
use crate::shape_key::ShapeKey;

/// Stable handle to an object within one [`Scene`](crate::scene::Scene).
///
/// Handles are never reused within a scene, so a handle to a deleted object
/// stays dangling instead of aliasing a later object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ObjectId(pub(crate) u32);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A mesh-bearing scene object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Object {
    /// Scene-unique object name.
    pub name: String,
    /// The object's geometry data.
    pub mesh: Mesh,
    /// Modifier stack, evaluated top to bottom.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modifiers: Vec<Modifier>,
    /// Index of the active shape key; ignored while the key list is empty.
    #[serde(default, skip_serializing_if = "index_is_zero")]
    pub active_shape_key: usize,
}

fn index_is_zero(index: &usize) -> bool {
    *index == 0
}

impl Object {
    /// Creates an object with an empty modifier stack.
    pub fn new(name: impl Into<String>, mesh: Mesh) -> Self {
        Self {
            name: name.into(),
            mesh,
            modifiers: Vec::new(),
            active_shape_key: 0,
        }
    }

    /// Looks up a modifier by name.
    pub fn modifier(&self, name: &str) -> Option<&Modifier> {
        self.modifiers.iter().find(|m| m.name == name)
    }

    /// Position of a modifier in the stack, by name.
    pub fn modifier_index(&self, name: &str) -> Option<usize> {
        self.modifiers.iter().position(|m| m.name == name)
    }

    /// Removes a modifier from the stack by name and returns it.
    pub fn remove_modifier(&mut self, name: &str) -> Option<Modifier> {
        let index = self.modifier_index(name)?;
        Some(self.modifiers.remove(index))
    }

    /// The currently displayed vertex positions: the active key's absolute
    /// geometry, or the base positions when there are no keys.
    ///
    /// An out-of-range active index is clamped to the last key, matching the
    /// host's behavior.
    pub fn evaluated_positions(&self) -> SceneResult<Vec<[f32; 3]>> {
        if !self.mesh.has_shape_keys() {
            return Ok(self.mesh.positions.clone());
        }
        let index = self.active_shape_key.min(self.mesh.shape_keys.len() - 1);
        self.mesh.key_absolute_positions(index)
    }

    /// Appends a shape key (see [`Mesh::add_shape_key`]) and makes it active.
    pub fn add_shape_key(&mut self) -> usize {
        let index = self.mesh.add_shape_key();
        self.active_shape_key = index;
        index
    }

    /// Removes the shape key at `index` and clamps the active index back
    /// into range.
    pub fn remove_shape_key(&mut self, index: usize) -> SceneResult<ShapeKey> {
        let removed = self.mesh.remove_shape_key(index)?;
        let len = self.mesh.shape_keys.len();
        if len == 0 {
            self.active_shape_key = 0;
        } else if self.active_shape_key >= len {
            self.active_shape_key = len - 1;
        }
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modifier::ModifierKind;
    use pretty_assertions::assert_eq;

    fn test_object() -> Object {
        let mut mesh = Mesh::new(vec![[0.0; 3], [1.0, 0.0, 0.0]], vec![]);
        mesh.add_shape_key();
        mesh.shape_keys.push(ShapeKey::new(
            "Wide",
            vec![[0.0, 1.0, 0.0], [0.0, 1.0, 0.0]],
        ));
        Object::new("Thing", mesh)
    }

    #[test]
    fn test_evaluated_positions_without_keys() {
        let object = Object::new("Flat", Mesh::new(vec![[2.0, 0.0, 0.0]], vec![]));
        assert_eq!(object.evaluated_positions().unwrap(), vec![[2.0, 0.0, 0.0]]);
    }

    #[test]
    fn test_evaluated_positions_follow_active_key() {
        let mut object = test_object();
        object.active_shape_key = 1;
        assert_eq!(
            object.evaluated_positions().unwrap(),
            vec![[0.0, 1.0, 0.0], [1.0, 1.0, 0.0]]
        );
    }

    #[test]
    fn test_evaluated_positions_clamp_active_index() {
        let mut object = test_object();
        object.active_shape_key = 10;
        // Clamped to the last key ("Wide").
        assert_eq!(
            object.evaluated_positions().unwrap(),
            vec![[0.0, 1.0, 0.0], [1.0, 1.0, 0.0]]
        );
    }

    #[test]
    fn test_remove_shape_key_clamps_active() {
        let mut object = test_object();
        object.active_shape_key = 1;
        object.remove_shape_key(1).unwrap();
        assert_eq!(object.active_shape_key, 0);
        object.remove_shape_key(0).unwrap();
        assert_eq!(object.active_shape_key, 0);
        assert!(!object.mesh.has_shape_keys());
    }

    #[test]
    fn test_modifier_lookup_and_removal() {
        let mut object = test_object();
        object.modifiers.push(Modifier::new(
            "Grow",
            ModifierKind::Displace {
                strength: 1.0,
                direction: crate::modifier::DisplaceDirection::X,
            },
        ));
        assert!(object.modifier("Grow").is_some());
        assert_eq!(object.modifier_index("Grow"), Some(0));
        assert!(object.modifier("Missing").is_none());

        let removed = object.remove_modifier("Grow").unwrap();
        assert_eq!(removed.name, "Grow");
        assert!(object.modifiers.is_empty());
    }

    #[test]
    fn test_add_shape_key_sets_active() {
        let mut object = Object::new("Fresh", Mesh::new(vec![[0.0; 3]], vec![]));
        assert_eq!(object.add_shape_key(), 0);
        assert_eq!(object.add_shape_key(), 1);
        assert_eq!(object.active_shape_key, 1);
    }
}
