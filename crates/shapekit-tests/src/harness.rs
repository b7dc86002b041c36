//! Assertion helpers shared by the integration suites.

use std::fs;
use std::path::Path;

use shapekit_bake::BakeReport;
use shapekit_scene::{ObjectId, Scene};

/// Shape-key names of an object, in storage order.
pub fn shape_key_names(scene: &Scene, id: ObjectId) -> Vec<String> {
    scene
        .object(id)
        .expect("object should exist")
        .mesh
        .shape_keys
        .iter()
        .map(|k| k.name.clone())
        .collect()
}

/// Every object name in the scene, sorted for set comparison.
pub fn object_names_sorted(scene: &Scene) -> Vec<String> {
    let mut names: Vec<String> = scene.objects().map(|(_, o)| o.name.clone()).collect();
    names.sort();
    names
}

/// Asserts two position buffers are bit-identical, reporting the first
/// differing vertex.
pub fn assert_positions_eq(actual: &[[f32; 3]], expected: &[[f32; 3]]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "vertex count mismatch: {} vs {}",
        actual.len(),
        expected.len()
    );
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        assert_eq!(a, e, "vertex {} differs", i);
    }
}

/// Asserts two position buffers agree within `tolerance` per component.
pub fn assert_positions_close(actual: &[[f32; 3]], expected: &[[f32; 3]], tolerance: f32) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "vertex count mismatch: {} vs {}",
        actual.len(),
        expected.len()
    );
    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        for axis in 0..3 {
            let delta = (a[axis] - e[axis]).abs();
            assert!(
                delta <= tolerance,
                "vertex {} axis {} differs by {}: {:?} vs {:?}",
                i,
                axis,
                delta,
                a,
                e
            );
        }
    }
}

/// Reads a bake report back from disk.
pub fn read_report(path: &Path) -> BakeReport {
    let content = fs::read_to_string(path).expect("Failed to read report file");
    BakeReport::from_json(&content).expect("Failed to parse report")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions_eq_accepts_identical() {
        let buffer = [[0.0, 0.5, 1.0], [2.0, 0.0, 0.0]];
        assert_positions_eq(&buffer, &buffer);
    }

    #[test]
    #[should_panic(expected = "vertex 1 differs")]
    fn test_positions_eq_reports_vertex_index() {
        let a = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]];
        let b = [[0.0, 0.0, 0.0], [1.0, 0.5, 0.0]];
        assert_positions_eq(&a, &b);
    }

    #[test]
    fn test_positions_close_within_tolerance() {
        let a = [[0.0, 0.0, 0.0]];
        let b = [[0.0005, 0.0, 0.0]];
        assert_positions_close(&a, &b, 1e-3);
    }
}
