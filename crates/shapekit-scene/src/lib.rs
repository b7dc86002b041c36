//! Scene model for shapekit.
//!
//! This crate holds the data types and host-style operations the bake
//! pipeline works against: triangle meshes with ordered shape keys, named
//! modifier stacks, a collection tree, and explicit-handle scene mutation
//! (duplicate, rename, join-as-shape, lookup-or-create collections).
//!
//! Scenes load from and save to versioned JSON documents, validate against
//! stable error codes, and hash canonically for determinism checks.
//!
//! # Example
//!
//! ```
//! use shapekit_scene::{Mesh, Object, Scene};
//!
//! let mut scene = Scene::new("Demo");
//! let root = scene.root();
//! let mesh = Mesh::new(
//!     vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
//!     vec![[0, 1, 2]],
//! );
//! let id = scene.add_object(root, Object::new("Tri", mesh)).unwrap();
//!
//! // Give the object a shape key and read back the displayed geometry.
//! scene.object_mut(id).unwrap().add_shape_key();
//! let displayed = scene.object(id).unwrap().evaluated_positions().unwrap();
//! assert_eq!(displayed.len(), 3);
//! ```

pub mod collection;
pub mod document;
pub mod error;
pub mod hash;
pub mod mesh;
pub mod modifier;
pub mod object;
pub mod scene;
pub mod shape_key;
pub mod validation;

pub use collection::{Collection, CollectionId};
pub use document::{CollectionNode, SceneDocument, SCENE_VERSION};
pub use error::{
    ErrorCode, SceneError, SceneResult, ValidationError, ValidationResult, ValidationWarning,
    WarningCode,
};
pub use hash::{canonical_scene_hash, canonical_value_hash};
pub use mesh::{BoundingBox, Mesh};
pub use modifier::{Axis, DisplaceDirection, Modifier, ModifierKind};
pub use object::{Object, ObjectId};
pub use scene::{Scene, ROOT_COLLECTION_NAME};
pub use shape_key::ShapeKey;
pub use validation::validate_scene;
