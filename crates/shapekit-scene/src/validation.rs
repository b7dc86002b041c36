//! Scene validation logic.

use std::collections::HashSet;

use crate::error::{ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode};
use crate::object::{Object, ObjectId};
use crate::scene::Scene;

/// Validates a scene and returns a validation result.
///
/// Errors mark states the bake pipeline cannot operate on (out-of-range
/// indices, dangling references, name collisions); warnings mark suspicious
/// but workable states.
pub fn validate_scene(scene: &Scene) -> ValidationResult {
    let mut result = ValidationResult::default();

    for (_, object) in scene.objects() {
        validate_object(object, &mut result);
    }
    validate_object_names(scene, &mut result);
    validate_links(scene, &mut result);
    validate_collection_names(scene, &mut result);

    result
}

/// Validates one object's mesh and modifier stack.
fn validate_object(object: &Object, result: &mut ValidationResult) {
    let mesh = &object.mesh;
    let vertex_count = mesh.vertex_count();

    if vertex_count == 0 {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::EmptyMesh,
            format!("object '{}' has no vertices", object.name),
            format!("objects[\"{}\"].mesh", object.name),
        ));
    }

    for (i, triangle) in mesh.triangles.iter().enumerate() {
        if triangle.iter().any(|v| *v as usize >= vertex_count) {
            result.add_error(ValidationError::with_path(
                ErrorCode::TriangleIndexOutOfRange,
                format!(
                    "triangle {:?} references a vertex outside the {} vertices of '{}'",
                    triangle, vertex_count, object.name
                ),
                format!("objects[\"{}\"].mesh.triangles[{}]", object.name, i),
            ));
        }
    }

    for (i, key) in mesh.shape_keys.iter().enumerate() {
        if key.offsets.len() != vertex_count {
            result.add_error(ValidationError::with_path(
                ErrorCode::ShapeKeyLengthMismatch,
                format!(
                    "shape key '{}' has {} offsets but '{}' has {} vertices",
                    key.name,
                    key.offsets.len(),
                    object.name,
                    vertex_count
                ),
                format!("objects[\"{}\"].mesh.shape_keys[{}]", object.name, i),
            ));
        }
    }

    if let Some(basis) = mesh.shape_keys.first() {
        if !basis.is_identity() {
            result.add_warning(ValidationWarning::with_path(
                WarningCode::BasisWithOffsets,
                format!("basis key '{}' on '{}' has nonzero offsets", basis.name, object.name),
                format!("objects[\"{}\"].mesh.shape_keys[0]", object.name),
            ));
        }
    }

    if object.active_shape_key != 0 && object.active_shape_key >= mesh.shape_keys.len() {
        result.add_error(ValidationError::with_path(
            ErrorCode::ActiveShapeKeyOutOfRange,
            format!(
                "active shape key {} out of range ({} keys on '{}')",
                object.active_shape_key,
                mesh.shape_keys.len(),
                object.name
            ),
            format!("objects[\"{}\"].active_shape_key", object.name),
        ));
    }

    let mut modifier_names: HashSet<&str> = HashSet::new();
    for (i, modifier) in object.modifiers.iter().enumerate() {
        if modifier.name.is_empty() {
            result.add_error(ValidationError::with_path(
                ErrorCode::EmptyModifierName,
                format!("modifier {} on '{}' has an empty name", i, object.name),
                format!("objects[\"{}\"].modifiers[{}].name", object.name, i),
            ));
        } else if !modifier_names.insert(&modifier.name) {
            result.add_error(ValidationError::with_path(
                ErrorCode::DuplicateModifierName,
                format!("duplicate modifier name '{}' on '{}'", modifier.name, object.name),
                format!("objects[\"{}\"].modifiers[{}].name", object.name, i),
            ));
        }
    }
}

/// Flags objects that share a name.
fn validate_object_names(scene: &Scene, result: &mut ValidationResult) {
    let mut seen: HashSet<&str> = HashSet::new();
    for (_, object) in scene.objects() {
        if !seen.insert(&object.name) {
            result.add_error(ValidationError::with_path(
                ErrorCode::DuplicateObjectName,
                format!("two objects named '{}'", object.name),
                format!("objects[\"{}\"]", object.name),
            ));
        }
    }
}

/// Checks collection membership and reference integrity.
fn validate_links(scene: &Scene, result: &mut ValidationResult) {
    let mut linked: HashSet<ObjectId> = HashSet::new();

    for (_, collection) in scene.collections() {
        for (i, object_id) in collection.objects.iter().enumerate() {
            if scene.object(*object_id).is_err() {
                result.add_error(ValidationError::with_path(
                    ErrorCode::DanglingReference,
                    format!(
                        "collection '{}' links missing object {}",
                        collection.name, object_id
                    ),
                    format!("collections[\"{}\"].objects[{}]", collection.name, i),
                ));
            } else {
                linked.insert(*object_id);
            }
        }
        for (i, child) in collection.children.iter().enumerate() {
            if scene.collection(*child).is_err() {
                result.add_error(ValidationError::with_path(
                    ErrorCode::DanglingReference,
                    format!(
                        "collection '{}' references missing child {}",
                        collection.name, child
                    ),
                    format!("collections[\"{}\"].children[{}]", collection.name, i),
                ));
            }
        }
    }

    for (id, object) in scene.objects() {
        if !linked.contains(&id) {
            result.add_error(ValidationError::with_path(
                ErrorCode::UnlinkedObject,
                format!("object '{}' is not linked into any collection", object.name),
                format!("objects[\"{}\"]", object.name),
            ));
        }
    }

    if let Some(active) = scene.active() {
        if scene.object(active).is_err() {
            result.add_error(ValidationError::with_path(
                ErrorCode::DanglingReference,
                format!("active object {} does not exist", active),
                "active_object",
            ));
        }
    }
    for id in scene.selected_ids() {
        if scene.object(id).is_err() {
            result.add_error(ValidationError::with_path(
                ErrorCode::DanglingReference,
                format!("selected object {} does not exist", id),
                "selected_objects",
            ));
        }
    }
}

/// Flags collections that share a name.
fn validate_collection_names(scene: &Scene, result: &mut ValidationResult) {
    let mut seen: HashSet<&str> = HashSet::new();
    for (_, collection) in scene.collections() {
        if !seen.insert(&collection.name) {
            result.add_warning(ValidationWarning::with_path(
                WarningCode::DuplicateCollectionName,
                format!("two collections named '{}'", collection.name),
                format!("collections[\"{}\"]", collection.name),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::Mesh;
    use crate::modifier::{Modifier, ModifierKind};
    use crate::shape_key::ShapeKey;

    fn valid_scene() -> Scene {
        let mut scene = Scene::new("Test");
        let root = scene.root();
        let mut mesh = Mesh::new(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            vec![[0, 1, 2]],
        );
        mesh.add_shape_key();
        mesh.shape_keys
            .push(ShapeKey::new("Up", vec![[0.0, 0.0, 1.0]; 3]));
        scene.add_object(root, Object::new("Tri", mesh)).unwrap();
        scene
    }

    #[test]
    fn test_valid_scene_passes() {
        let result = validate_scene(&valid_scene());
        assert!(result.is_ok(), "unexpected errors: {:?}", result.errors);
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_triangle_index_out_of_range() {
        let mut scene = valid_scene();
        let id = scene.object_by_name("Tri").unwrap();
        scene.object_mut(id).unwrap().mesh.triangles.push([0, 1, 9]);

        let result = validate_scene(&scene);
        assert!(!result.is_ok());
        assert_eq!(result.errors[0].code, ErrorCode::TriangleIndexOutOfRange);
    }

    #[test]
    fn test_shape_key_length_mismatch() {
        let mut scene = valid_scene();
        let id = scene.object_by_name("Tri").unwrap();
        scene
            .object_mut(id)
            .unwrap()
            .mesh
            .shape_keys
            .push(ShapeKey::new("Short", vec![[0.0; 3]]));

        let result = validate_scene(&scene);
        assert_eq!(result.errors[0].code, ErrorCode::ShapeKeyLengthMismatch);
    }

    #[test]
    fn test_duplicate_object_name_via_direct_edit() {
        let mut scene = valid_scene();
        let root = scene.root();
        let other = scene
            .add_object(root, Object::new("Other", Mesh::new(vec![[0.0; 3]], vec![])))
            .unwrap();
        // Bypass rename_object's dedup.
        scene.object_mut(other).unwrap().name = "Tri".to_string();

        let result = validate_scene(&scene);
        assert!(result
            .errors
            .iter()
            .any(|e| e.code == ErrorCode::DuplicateObjectName));
    }

    #[test]
    fn test_unlinked_object_detected() {
        let mut scene = valid_scene();
        let id = scene.object_by_name("Tri").unwrap();
        let root = scene.root();
        scene.collection_mut(root).unwrap().unlink(id);

        let result = validate_scene(&scene);
        assert!(result
            .errors
            .iter()
            .any(|e| e.code == ErrorCode::UnlinkedObject));
    }

    #[test]
    fn test_basis_with_offsets_warns() {
        let mut scene = valid_scene();
        let id = scene.object_by_name("Tri").unwrap();
        scene.object_mut(id).unwrap().mesh.shape_keys[0].offsets[0] = [1.0, 0.0, 0.0];

        let result = validate_scene(&scene);
        assert!(result.is_ok());
        assert_eq!(result.warnings[0].code, WarningCode::BasisWithOffsets);
    }

    #[test]
    fn test_active_shape_key_out_of_range() {
        let mut scene = valid_scene();
        let id = scene.object_by_name("Tri").unwrap();
        scene.object_mut(id).unwrap().active_shape_key = 5;

        let result = validate_scene(&scene);
        assert!(result
            .errors
            .iter()
            .any(|e| e.code == ErrorCode::ActiveShapeKeyOutOfRange));
    }

    #[test]
    fn test_duplicate_modifier_name() {
        let mut scene = valid_scene();
        let id = scene.object_by_name("Tri").unwrap();
        let object = scene.object_mut(id).unwrap();
        let kind = ModifierKind::Subdivide { levels: 1 };
        object.modifiers.push(Modifier::new("Sub", kind.clone()));
        object.modifiers.push(Modifier::new("Sub", kind));

        let result = validate_scene(&scene);
        assert!(result
            .errors
            .iter()
            .any(|e| e.code == ErrorCode::DuplicateModifierName));
    }

    #[test]
    fn test_empty_mesh_warns() {
        let mut scene = Scene::new("Test");
        let root = scene.root();
        scene
            .add_object(root, Object::new("Nothing", Mesh::default()))
            .unwrap();

        let result = validate_scene(&scene);
        assert!(result.is_ok());
        assert!(result
            .warnings
            .iter()
            .any(|w| w.code == WarningCode::EmptyMesh));
    }
}
