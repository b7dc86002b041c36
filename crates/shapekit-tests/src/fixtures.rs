//! Test fixture utilities for building synthetic scenes.

use std::fs;
use std::path::{Path, PathBuf};

use tempfile::TempDir;

use shapekit_scene::{
    DisplaceDirection, Mesh, Modifier, ModifierKind, Object, ObjectId, Scene, ShapeKey,
};

/// Dyadic quad: four corners, two triangles sharing the 0-2 diagonal.
pub fn quad_mesh() -> Mesh {
    Mesh::new(
        vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ],
        vec![[0, 1, 2], [0, 2, 3]],
    )
}

/// Single dyadic triangle.
pub fn triangle_mesh() -> Mesh {
    Mesh::new(
        vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        vec![[0, 1, 2]],
    )
}

/// Enabled displace modifier along a fixed axis.
pub fn displace_modifier(name: &str, direction: DisplaceDirection, strength: f32) -> Modifier {
    Modifier::new(name, ModifierKind::Displace {
        strength,
        direction,
    })
}

/// Adds a quad object with keys "Basis", "Smile" (+0.5 z), "Frown"
/// (-0.5 z) and an enabled displace modifier "Push" (+0.25 x).
pub fn add_keyed_head(scene: &mut Scene, name: &str) -> ObjectId {
    let root = scene.root();
    let mut mesh = quad_mesh();
    mesh.add_shape_key();
    mesh.shape_keys
        .push(ShapeKey::new("Smile", vec![[0.0, 0.0, 0.5]; 4]));
    mesh.shape_keys
        .push(ShapeKey::new("Frown", vec![[0.0, 0.0, -0.5]; 4]));
    let mut object = Object::new(name, mesh);
    object
        .modifiers
        .push(displace_modifier("Push", DisplaceDirection::X, 0.25));
    scene
        .add_object(root, object)
        .expect("Failed to add fixture object")
}

/// Adds a keyless quad object with the same "Push" modifier.
pub fn add_flat_prop(scene: &mut Scene, name: &str) -> ObjectId {
    let root = scene.root();
    let mut object = Object::new(name, quad_mesh());
    object
        .modifiers
        .push(displace_modifier("Push", DisplaceDirection::X, 0.25));
    scene
        .add_object(root, object)
        .expect("Failed to add fixture object")
}

/// A temp directory for file-based flows.
pub struct SceneDirFixture {
    pub root: TempDir,
}

impl SceneDirFixture {
    /// Create a new empty fixture directory.
    pub fn new() -> Self {
        Self {
            root: TempDir::new().expect("Failed to create temp dir"),
        }
    }

    /// Get the fixture directory path.
    pub fn path(&self) -> &Path {
        self.root.path()
    }

    /// Serialize `scene` to `{name}.json` inside the fixture directory.
    pub fn write_scene(&self, name: &str, scene: &Scene) -> PathBuf {
        let path = self.path().join(format!("{}.json", name));
        let json = scene
            .to_json_pretty()
            .expect("Failed to serialize fixture scene");
        fs::write(&path, json).expect("Failed to write scene file");
        path
    }

    /// Write raw file content, for malformed-input cases.
    pub fn write_file(&self, name: &str, content: &str) -> PathBuf {
        let path = self.path().join(name);
        fs::write(&path, content).expect("Failed to write file");
        path
    }
}

impl Default for SceneDirFixture {
    fn default() -> Self {
        Self::new()
    }
}
