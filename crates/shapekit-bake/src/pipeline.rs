//! The shape-key-aware bake pipeline.
//!
//! The host refuses to apply a modifier to a mesh with shape keys, so the
//! pipeline works around it: duplicate the object once per key, isolate a
//! different key on each duplicate, commit the key into base geometry,
//! apply the modifier to the keyless duplicate, then join the duplicates
//! back into one object as shape keys with their recorded names.

use std::time::Instant;

use shapekit_scene::{canonical_scene_hash, ObjectId, Scene};

use crate::error::{BakeError, BakeResult};
use crate::eval;
use crate::report::{BakeReport, BakeWarning, MeshMetrics, REPORT_VERSION};

/// Options for a bake run.
#[derive(Debug, Clone, Default)]
pub struct BakeConfig {
    /// Move renamed duplicates into a `{basename} Shapekeys` sub-collection
    /// under the object's original collection while they exist.
    pub group_into_collection: bool,
}

impl BakeConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Enables or disables collection grouping of intermediate duplicates.
    pub fn with_collection_grouping(mut self, enabled: bool) -> Self {
        self.group_into_collection = enabled;
        self
    }
}

/// Result of a successful bake.
#[derive(Debug)]
pub struct BakeOutcome {
    /// Handle of the baked object, now active and the sole selection.
    pub object: ObjectId,
    /// Record of the run.
    pub report: BakeReport,
}

/// One entry of the immutable per-shape plan captured before any mutation.
#[derive(Debug, Clone)]
struct PlannedKey {
    /// Original position in the shape-key list.
    index: usize,
    /// Recorded name, restored verbatim during reassembly.
    name: String,
}

/// Bakes `modifier_name` into `object` with default options.
pub fn bake(scene: &mut Scene, object: ObjectId, modifier_name: &str) -> BakeResult<BakeOutcome> {
    bake_with_config(scene, object, modifier_name, &BakeConfig::default())
}

/// Bakes `modifier_name` into `object`.
///
/// With no shape keys this is a plain apply; failures there are fatal. With
/// keys, a missing or disabled modifier downgrades to one warning per
/// duplicate and the pipeline continues, so the key structure is preserved
/// even when the modifier never runs. Any other failure propagates and may
/// leave intermediate duplicates in the scene.
pub fn bake_with_config(
    scene: &mut Scene,
    object: ObjectId,
    modifier_name: &str,
    config: &BakeConfig,
) -> BakeResult<BakeOutcome> {
    let started = Instant::now();
    let basename = scene.object(object)?.name.clone();
    let key_count = scene.object(object)?.mesh.shape_keys.len();
    let mut warnings = Vec::new();

    let baked = if key_count == 0 {
        apply_object_modifier(scene, object, modifier_name)?;
        object
    } else {
        bake_keyed(scene, object, modifier_name, &basename, config, &mut warnings)?
    };

    let final_name = scene.rename_object(baked, basename)?;
    scene.select_only(baked)?;
    scene.set_active(baked)?;

    let scene_hash = canonical_scene_hash(scene)?;
    let mesh = &scene.object(baked)?.mesh;
    let report = BakeReport {
        report_version: REPORT_VERSION,
        ok: true,
        object: final_name,
        modifier: modifier_name.to_string(),
        shape_keys: mesh.shape_keys.len(),
        warnings,
        duration_ms: started.elapsed().as_millis() as u64,
        scene_hash,
        metrics: MeshMetrics::from_mesh(mesh),
    };
    Ok(BakeOutcome {
        object: baked,
        report,
    })
}

/// Applies the named modifier to a keyless object and removes it from the
/// stack. This is the host-level apply the fast path uses directly.
pub fn apply_object_modifier(
    scene: &mut Scene,
    object: ObjectId,
    modifier_name: &str,
) -> BakeResult<()> {
    let object_ref = scene.object_mut(object)?;
    let index = object_ref
        .modifier_index(modifier_name)
        .ok_or_else(|| BakeError::modifier_not_found(object_ref.name.clone(), modifier_name))?;
    if !object_ref.modifiers[index].show_viewport {
        return Err(BakeError::modifier_disabled(
            object_ref.name.clone(),
            modifier_name,
        ));
    }
    let kind = object_ref.modifiers[index].kind.clone();
    eval::apply_kind(&mut object_ref.mesh, &kind)?;
    object_ref.modifiers.remove(index);
    Ok(())
}

fn bake_keyed(
    scene: &mut Scene,
    object: ObjectId,
    modifier_name: &str,
    basename: &str,
    config: &BakeConfig,
    warnings: &mut Vec<BakeWarning>,
) -> BakeResult<ObjectId> {
    // Immutable plan and home collection, captured before any mutation.
    let plan: Vec<PlannedKey> = scene
        .object(object)?
        .mesh
        .shape_keys
        .iter()
        .enumerate()
        .map(|(index, key)| PlannedKey {
            index,
            name: key.name.clone(),
        })
        .collect();
    let home = scene.collection_of(object)?;

    // One duplicate per shape key; the original is entry 0.
    let mut duplicates = vec![object];
    for _ in 1..plan.len() {
        duplicates.push(scene.duplicate_object(object)?);
    }

    for (duplicate, planned) in duplicates.iter().zip(&plan) {
        isolate_shape(scene, *duplicate, planned.index, plan.len())?;

        match apply_object_modifier(scene, *duplicate, modifier_name) {
            Ok(()) => {}
            Err(BakeError::ModifierDisabled { .. }) => {
                warnings.push(BakeWarning::modifier_disabled(&planned.name));
            }
            Err(BakeError::ModifierNotFound { .. }) => {
                warnings.push(BakeWarning::modifier_not_found(modifier_name, &planned.name));
            }
            Err(fatal) => return Err(fatal),
        }

        if planned.index > 0 {
            scene.rename_object(*duplicate, format!("{}_{}", basename, planned.name))?;
            if config.group_into_collection {
                let group = scene
                    .child_collection_or_create(home, &format!("{} Shapekeys", basename))?;
                scene.move_to_collection(*duplicate, group)?;
            }
        }
    }

    // Reassemble: fresh basis on the original, then join every duplicate
    // back in increasing shape order under its recorded name.
    let target = duplicates[0];
    {
        let target_ref = scene.object_mut(target)?;
        let basis = target_ref.add_shape_key();
        target_ref.mesh.rename_shape_key(basis, plan[0].name.clone())?;
    }
    for (duplicate, planned) in duplicates.iter().zip(&plan).skip(1) {
        let key = scene.join_as_shape(target, *duplicate)?;
        scene
            .object_mut(target)?
            .mesh
            .rename_shape_key(key, planned.name.clone())?;
    }

    for duplicate in &duplicates[1..] {
        scene.remove_object(*duplicate)?;
    }
    Ok(target)
}

/// Reduces a duplicate to the single shape originally at `index`, committed
/// into its base geometry.
fn isolate_shape(
    scene: &mut Scene,
    object: ObjectId,
    index: usize,
    total: usize,
) -> BakeResult<()> {
    // Keys above the target, highest first.
    for above in ((index + 1)..total).rev() {
        scene.object_mut(object)?.remove_shape_key(above)?;
    }
    // Promote past every key below the target.
    for _ in 0..index {
        scene.object_mut(object)?.remove_shape_key(0)?;
    }
    // Removing the last key commits the displayed shape.
    scene.object_mut(object)?.remove_shape_key(0)?;
    Ok(())
}
