//! The scene: an arena of objects and collections with explicit handles.
//!
//! Every operation takes [`ObjectId`] / [`CollectionId`] handles; there is no
//! implicit "current" object. The active object and the selection set are
//! modeled as plain scene state that callers read and write deliberately.

use std::collections::{BTreeMap, BTreeSet};

use crate::collection::{Collection, CollectionId};
use crate::error::{SceneError, SceneResult};
use crate::object::{Object, ObjectId};

/// Name of the collection every scene is rooted at.
pub const ROOT_COLLECTION_NAME: &str = "Scene Collection";

/// An in-memory scene: objects, a collection tree, selection state.
#[derive(Debug, Clone)]
pub struct Scene {
    /// Scene name.
    pub name: String,
    objects: BTreeMap<ObjectId, Object>,
    collections: BTreeMap<CollectionId, Collection>,
    root: CollectionId,
    active: Option<ObjectId>,
    selected: BTreeSet<ObjectId>,
    next_object: u32,
    next_collection: u32,
}

impl Scene {
    /// Creates an empty scene with a root collection.
    pub fn new(name: impl Into<String>) -> Self {
        let root = CollectionId(0);
        let mut collections = BTreeMap::new();
        collections.insert(root, Collection::new(ROOT_COLLECTION_NAME));
        Self {
            name: name.into(),
            objects: BTreeMap::new(),
            collections,
            root,
            active: None,
            selected: BTreeSet::new(),
            next_object: 0,
            next_collection: 1,
        }
    }

    /// Handle of the root collection.
    pub fn root(&self) -> CollectionId {
        self.root
    }

    /// Borrows an object.
    pub fn object(&self, id: ObjectId) -> SceneResult<&Object> {
        self.objects
            .get(&id)
            .ok_or_else(|| SceneError::object_not_found(id.to_string()))
    }

    /// Mutably borrows an object.
    pub fn object_mut(&mut self, id: ObjectId) -> SceneResult<&mut Object> {
        self.objects
            .get_mut(&id)
            .ok_or_else(|| SceneError::object_not_found(id.to_string()))
    }

    /// Borrows a collection.
    pub fn collection(&self, id: CollectionId) -> SceneResult<&Collection> {
        self.collections
            .get(&id)
            .ok_or_else(|| SceneError::collection_not_found(id.to_string()))
    }

    /// Mutably borrows a collection.
    pub fn collection_mut(&mut self, id: CollectionId) -> SceneResult<&mut Collection> {
        self.collections
            .get_mut(&id)
            .ok_or_else(|| SceneError::collection_not_found(id.to_string()))
    }

    /// Finds an object handle by name.
    pub fn object_by_name(&self, name: &str) -> Option<ObjectId> {
        self.objects
            .iter()
            .find(|(_, o)| o.name == name)
            .map(|(id, _)| *id)
    }

    /// Iterates objects in handle order.
    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &Object)> {
        self.objects.iter().map(|(id, o)| (*id, o))
    }

    /// Iterates collections in handle order.
    pub fn collections(&self) -> impl Iterator<Item = (CollectionId, &Collection)> {
        self.collections.iter().map(|(id, c)| (*id, c))
    }

    /// Number of objects in the scene.
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    /// Number of collections in the scene, root included.
    pub fn collection_count(&self) -> usize {
        self.collections.len()
    }

    /// Inserts `object` into `collection`, deduplicating its name with the
    /// host's numeric-suffix scheme (`Cube` → `Cube.001`).
    pub fn add_object(
        &mut self,
        collection: CollectionId,
        mut object: Object,
    ) -> SceneResult<ObjectId> {
        // Fail before allocating a handle if the collection is stale.
        self.collection(collection)?;
        object.name = self.unique_object_name(&object.name);
        let id = ObjectId(self.next_object);
        self.next_object += 1;
        self.objects.insert(id, object);
        self.collection_mut(collection)?.objects.push(id);
        Ok(id)
    }

    /// Deep-copies an object into the collection that contains it.
    ///
    /// The copy gets a suffixed name and is neither selected nor active;
    /// selection stays wherever the caller put it.
    pub fn duplicate_object(&mut self, id: ObjectId) -> SceneResult<ObjectId> {
        let collection = self.collection_of(id)?;
        let copy = self.object(id)?.clone();
        self.add_object(collection, copy)
    }

    /// Removes an object from the scene, unlinking it from every collection
    /// and dropping it from the selection.
    pub fn remove_object(&mut self, id: ObjectId) -> SceneResult<Object> {
        let object = self
            .objects
            .remove(&id)
            .ok_or_else(|| SceneError::object_not_found(id.to_string()))?;
        for collection in self.collections.values_mut() {
            collection.unlink(id);
        }
        self.selected.remove(&id);
        if self.active == Some(id) {
            self.active = None;
        }
        Ok(object)
    }

    /// Renames an object, deduplicating against other objects' names.
    ///
    /// Returns the name actually assigned.
    pub fn rename_object(&mut self, id: ObjectId, name: impl Into<String>) -> SceneResult<String> {
        let name = name.into();
        let current = &self.object(id)?.name;
        if *current == name {
            return Ok(name);
        }
        let unique = match self.object_by_name(&name) {
            Some(holder) if holder != id => self.unique_object_name(&name),
            _ => name,
        };
        self.object_mut(id)?.name = unique.clone();
        Ok(unique)
    }

    /// First collection (in handle order) that contains `object`.
    pub fn collection_of(&self, object: ObjectId) -> SceneResult<CollectionId> {
        let name = self.object(object)?.name.clone();
        self.collections
            .iter()
            .find(|(_, c)| c.contains(object))
            .map(|(id, _)| *id)
            .ok_or(SceneError::ObjectNotInCollection { object: name })
    }

    /// Creates a new child collection under `parent`.
    pub fn add_collection(
        &mut self,
        parent: CollectionId,
        name: impl Into<String>,
    ) -> SceneResult<CollectionId> {
        self.collection(parent)?;
        let id = CollectionId(self.next_collection);
        self.next_collection += 1;
        self.collections.insert(id, Collection::new(name));
        self.collection_mut(parent)?.children.push(id);
        Ok(id)
    }

    /// Looks up a child collection of `parent` by name, creating it when
    /// absent. The create-or-reuse helper the grouping variant builds on.
    pub fn child_collection_or_create(
        &mut self,
        parent: CollectionId,
        name: &str,
    ) -> SceneResult<CollectionId> {
        let children = self.collection(parent)?.children.clone();
        for child in children {
            if self.collection(child)?.name == name {
                return Ok(child);
            }
        }
        self.add_collection(parent, name)
    }

    /// Moves an object: unlinks it from every collection, links it into
    /// `collection`.
    pub fn move_to_collection(
        &mut self,
        object: ObjectId,
        collection: CollectionId,
    ) -> SceneResult<()> {
        self.object(object)?;
        self.collection(collection)?;
        for c in self.collections.values_mut() {
            c.unlink(object);
        }
        self.collection_mut(collection)?.objects.push(object);
        Ok(())
    }

    /// Appends `source`'s displayed geometry to `target` as a new shape key,
    /// named after the source object.
    ///
    /// A keyless target receives a basis first, as the host does. Returns
    /// the new key's index; vertex-count mismatches are an error.
    pub fn join_as_shape(&mut self, target: ObjectId, source: ObjectId) -> SceneResult<usize> {
        let source_positions = self.object(source)?.evaluated_positions()?;
        let source_name = self.object(source)?.name.clone();
        let target_object = self.object_mut(target)?;
        if !target_object.mesh.has_shape_keys() {
            target_object.add_shape_key();
        }
        target_object
            .mesh
            .append_shape_key_from(source_name, &source_positions)
    }

    /// The active object, if any.
    pub fn active(&self) -> Option<ObjectId> {
        self.active
    }

    /// Makes `id` the active object.
    pub fn set_active(&mut self, id: ObjectId) -> SceneResult<()> {
        self.object(id)?;
        self.active = Some(id);
        Ok(())
    }

    /// Adds `id` to the selection.
    pub fn select(&mut self, id: ObjectId) -> SceneResult<()> {
        self.object(id)?;
        self.selected.insert(id);
        Ok(())
    }

    /// Clears the selection.
    pub fn deselect_all(&mut self) {
        self.selected.clear();
    }

    /// Makes `id` the only selected object.
    pub fn select_only(&mut self, id: ObjectId) -> SceneResult<()> {
        self.object(id)?;
        self.selected.clear();
        self.selected.insert(id);
        Ok(())
    }

    /// True when `id` is selected.
    pub fn is_selected(&self, id: ObjectId) -> bool {
        self.selected.contains(&id)
    }

    /// Selected object handles in handle order.
    pub fn selected_ids(&self) -> Vec<ObjectId> {
        self.selected.iter().copied().collect()
    }

    /// Picks a free object name, stripping any existing numeric suffix
    /// before counting up (`Cube.001` collides into `Cube.002`).
    fn unique_object_name(&self, desired: &str) -> String {
        if self.object_by_name(desired).is_none() {
            return desired.to_string();
        }
        let stem = strip_numeric_suffix(desired);
        let mut counter = 1u32;
        loop {
            let candidate = format!("{}.{:03}", stem, counter);
            if self.object_by_name(&candidate).is_none() {
                return candidate;
            }
            counter += 1;
        }
    }
}

/// Strips a trailing `.NNN` (three or more digits) suffix.
fn strip_numeric_suffix(name: &str) -> &str {
    match name.rsplit_once('.') {
        Some((stem, suffix))
            if suffix.len() >= 3 && suffix.chars().all(|c| c.is_ascii_digit()) =>
        {
            stem
        }
        _ => name,
    }
}
