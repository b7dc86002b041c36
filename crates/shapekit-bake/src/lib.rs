//! Shape-key-aware modifier baking for shapekit.
//!
//! The host scene model refuses to apply a modifier to a mesh that carries
//! shape keys. This crate implements the workaround as a pipeline: one
//! duplicate per shape key, each reduced to a single committed shape, the
//! modifier applied per duplicate, then everything joined back into one
//! object whose shape keys keep their original names and order.
//!
//! [`bake`] is the entry point; [`bake_with_config`] adds the variant that
//! groups intermediate duplicates into a named sub-collection. Each run
//! produces a [`BakeReport`] with warnings, timings, and a canonical scene
//! hash.
//!
//! # Example
//!
//! ```
//! use shapekit_bake::bake;
//! use shapekit_scene::{DisplaceDirection, Mesh, Modifier, ModifierKind, Object, Scene};
//!
//! let mut scene = Scene::new("Demo");
//! let root = scene.root();
//! let mut mesh = Mesh::new(
//!     vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
//!     vec![[0, 1, 2]],
//! );
//! mesh.add_shape_key();
//! let mut object = Object::new("Tri", mesh);
//! object.modifiers.push(Modifier::new(
//!     "Push",
//!     ModifierKind::Displace {
//!         strength: 0.5,
//!         direction: DisplaceDirection::X,
//!     },
//! ));
//! let id = scene.add_object(root, object).unwrap();
//!
//! let outcome = bake(&mut scene, id, "Push").unwrap();
//! assert_eq!(outcome.report.shape_keys, 1);
//! assert!(outcome.report.warnings.is_empty());
//! ```

pub mod error;
pub mod eval;
pub mod pipeline;
pub mod report;

pub use error::{BakeError, BakeResult};
pub use eval::{apply_kind, vertex_normals};
pub use pipeline::{apply_object_modifier, bake, bake_with_config, BakeConfig, BakeOutcome};
pub use report::{BakeReport, BakeWarning, MeshMetrics, DISABLED_MODIFIER_MESSAGE, REPORT_VERSION};
