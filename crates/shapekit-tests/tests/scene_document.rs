//! End-to-End Scene Document Tests
//!
//! Tests verify:
//! - Deep collection trees survive JSON round trips byte-stably
//! - Canonical hashing is independent of how a scene was produced
//! - Validation codes surface from documents loaded off disk
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p shapekit-tests --test scene_document
//! ```

use std::fs;

use shapekit_scene::{
    canonical_scene_hash, validate_scene, ErrorCode, Object, Scene, WarningCode,
};
use shapekit_tests::fixtures::{
    add_flat_prop, add_keyed_head, quad_mesh, SceneDirFixture,
};

/// Scene with a three-level collection tree and objects at every level.
fn deep_scene() -> Scene {
    let mut scene = Scene::new("Stage");
    let root = scene.root();
    add_flat_prop(&mut scene, "Floor");

    let cast = scene.add_collection(root, "Cast").unwrap();
    let heads = scene.add_collection(cast, "Heads").unwrap();
    let body = scene
        .add_object(cast, Object::new("Body", quad_mesh()))
        .unwrap();
    let face = add_keyed_head(&mut scene, "Face");
    scene.move_to_collection(face, heads).unwrap();

    scene.set_active(face).unwrap();
    scene.select(face).unwrap();
    scene.select(body).unwrap();
    scene
}

// ============================================================================
// Round Trips
// ============================================================================

/// Test that a nested collection tree survives a round trip with hierarchy,
/// membership, and scene state intact.
#[test]
fn test_deep_tree_round_trips() {
    let scene = deep_scene();
    let json = scene.to_json_pretty().unwrap();
    let back = Scene::from_json(&json).unwrap();

    assert_eq!(back.object_count(), 3);
    assert_eq!(back.collection_count(), 3);

    let face = back.object_by_name("Face").unwrap();
    let heads = back.collection(back.collection_of(face).unwrap()).unwrap();
    assert_eq!(heads.name, "Heads");

    let body = back.object_by_name("Body").unwrap();
    let cast = back.collection(back.collection_of(body).unwrap()).unwrap();
    assert_eq!(cast.name, "Cast");

    assert_eq!(back.active(), Some(face));
    assert_eq!(back.selected_ids().len(), 2);

    // A second round trip is byte-stable.
    assert_eq!(back.to_json_pretty().unwrap(), json);
}

/// Test that a scene written to disk and read back hashes identically.
#[test]
fn test_disk_round_trip_preserves_hash() {
    let scene = deep_scene();
    let fixture = SceneDirFixture::new();
    let path = fixture.write_scene("stage", &scene);

    let content = fs::read_to_string(&path).unwrap();
    let back = Scene::from_json(&content).unwrap();

    assert_eq!(
        canonical_scene_hash(&back).unwrap(),
        canonical_scene_hash(&scene).unwrap()
    );
}

// ============================================================================
// Canonical Hashing
// ============================================================================

/// Test that the hash does not depend on whether a scene was built
/// programmatically or parsed from a document.
#[test]
fn test_hash_is_construction_independent() {
    let built = deep_scene();
    let parsed = Scene::from_json(&built.to_json_pretty().unwrap()).unwrap();
    assert_eq!(
        canonical_scene_hash(&built).unwrap(),
        canonical_scene_hash(&parsed).unwrap()
    );
}

/// Test that moving a single vertex changes the hash.
#[test]
fn test_hash_tracks_geometry() {
    let mut scene = deep_scene();
    let before = canonical_scene_hash(&scene).unwrap();

    let face = scene.object_by_name("Face").unwrap();
    scene.object_mut(face).unwrap().mesh.positions[0] = [8.0, 0.0, 0.0];

    let after = canonical_scene_hash(&scene).unwrap();
    assert_ne!(before, after);
}

/// Test that renaming a shape key changes the hash.
#[test]
fn test_hash_tracks_key_names() {
    let mut scene = deep_scene();
    let before = canonical_scene_hash(&scene).unwrap();

    let face = scene.object_by_name("Face").unwrap();
    scene
        .object_mut(face)
        .unwrap()
        .mesh
        .rename_shape_key(1, "Grin")
        .unwrap();

    let after = canonical_scene_hash(&scene).unwrap();
    assert_ne!(before, after);
}

// ============================================================================
// Validation from Documents
// ============================================================================

/// Test that validation codes surface from a document loaded off disk.
#[test]
fn test_validation_codes_surface_from_disk() {
    let json = r#"{
        "scene_version": 1,
        "name": "Broken",
        "root": {
            "name": "Scene Collection",
            "objects": [
                {
                    "name": "Bent",
                    "mesh": {
                        "positions": [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
                        "triangles": [[0, 1, 9]],
                        "shape_keys": [
                            { "name": "Basis", "offsets": [[0.0, 0.0, 0.0], [0.0, 0.0, 0.0], [0.0, 0.0, 0.0]] },
                            { "name": "Short", "offsets": [[0.0, 0.0, 1.0]] }
                        ]
                    }
                }
            ]
        }
    }"#;

    let fixture = SceneDirFixture::new();
    let path = fixture.write_file("broken.json", json);
    let scene = Scene::from_json(&fs::read_to_string(&path).unwrap()).unwrap();

    let result = validate_scene(&scene);
    assert!(!result.is_ok());
    let codes: Vec<ErrorCode> = result.errors.iter().map(|e| e.code).collect();
    assert!(codes.contains(&ErrorCode::TriangleIndexOutOfRange));
    assert!(codes.contains(&ErrorCode::ShapeKeyLengthMismatch));
}

/// Test that a nonzero basis parses fine but draws a warning.
#[test]
fn test_nonzero_basis_warns_but_parses() {
    let json = r#"{
        "scene_version": 1,
        "name": "Odd",
        "root": {
            "name": "Scene Collection",
            "objects": [
                {
                    "name": "Drift",
                    "mesh": {
                        "positions": [[0.0, 0.0, 0.0]],
                        "triangles": [],
                        "shape_keys": [
                            { "name": "Basis", "offsets": [[1.0, 0.0, 0.0]] }
                        ]
                    }
                }
            ]
        }
    }"#;

    let scene = Scene::from_json(json).unwrap();
    let result = validate_scene(&scene);
    assert!(result.is_ok());
    assert!(result
        .warnings
        .iter()
        .any(|w| w.code == WarningCode::BasisWithOffsets));
}

/// Test that structurally invalid JSON never produces a scene.
#[test]
fn test_malformed_documents_rejected() {
    // Truncated JSON.
    assert!(Scene::from_json("{\"scene_version\": 1").is_err());
    // Unknown field at the top level.
    assert!(Scene::from_json(
        r#"{"scene_version": 1, "name": "X", "root": {"name": "R"}, "mystery": true}"#
    )
    .is_err());
    // Future document version.
    let future = r#"{"scene_version": 2, "name": "X", "root": {"name": "R"}}"#;
    assert!(Scene::from_json(future).is_err());
}
