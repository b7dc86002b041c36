//! Versioned JSON scene documents.
//!
//! The on-disk form is a nested collection tree with objects embedded in the
//! collection that links them; the active object and selection are stored by
//! name, since object names are scene-unique.

use serde::{Deserialize, Serialize};

use crate::collection::CollectionId;
use crate::error::{SceneError, SceneResult};
use crate::object::Object;
use crate::scene::Scene;

/// Current scene document version.
pub const SCENE_VERSION: u32 = 1;

/// Root of a scene document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneDocument {
    /// Document format version; must equal [`SCENE_VERSION`].
    pub scene_version: u32,
    /// Scene name.
    pub name: String,
    /// The collection tree, rooted at the scene collection.
    pub root: CollectionNode,
    /// Name of the active object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_object: Option<String>,
    /// Names of selected objects.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub selected_objects: Vec<String>,
}

/// One collection in the document tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollectionNode {
    /// Collection name.
    pub name: String,
    /// Objects linked into this collection.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub objects: Vec<Object>,
    /// Child collections.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<CollectionNode>,
}

impl SceneDocument {
    /// Parses a document from JSON.
    pub fn from_json(json: &str) -> SceneResult<Self> {
        let doc: SceneDocument = serde_json::from_str(json)?;
        if doc.scene_version != SCENE_VERSION {
            return Err(SceneError::invalid_document(format!(
                "unsupported scene_version {} (expected {})",
                doc.scene_version, SCENE_VERSION
            )));
        }
        Ok(doc)
    }

    /// Serializes the document as pretty-printed JSON.
    pub fn to_json_pretty(&self) -> SceneResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serializes the document as a JSON value.
    pub fn to_value(&self) -> SceneResult<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

impl Scene {
    /// Parses a scene from document JSON.
    pub fn from_json(json: &str) -> SceneResult<Self> {
        Self::from_document(SceneDocument::from_json(json)?)
    }

    /// Serializes the scene as pretty-printed document JSON.
    pub fn to_json_pretty(&self) -> SceneResult<String> {
        self.to_document()?.to_json_pretty()
    }

    /// Builds a scene from a parsed document.
    pub fn from_document(doc: SceneDocument) -> SceneResult<Self> {
        if doc.scene_version != SCENE_VERSION {
            return Err(SceneError::invalid_document(format!(
                "unsupported scene_version {} (expected {})",
                doc.scene_version, SCENE_VERSION
            )));
        }
        let mut scene = Scene::new(doc.name);
        let root = scene.root();
        scene.collection_mut(root)?.name = doc.root.name.clone();
        link_node(&mut scene, root, doc.root)?;

        if let Some(name) = &doc.active_object {
            let id = scene.object_by_name(name).ok_or_else(|| {
                SceneError::invalid_document(format!("active_object '{}' not found", name))
            })?;
            scene.set_active(id)?;
        }
        for name in &doc.selected_objects {
            let id = scene.object_by_name(name).ok_or_else(|| {
                SceneError::invalid_document(format!("selected object '{}' not found", name))
            })?;
            scene.select(id)?;
        }
        Ok(scene)
    }

    /// Writes the scene out as a document.
    ///
    /// Only objects linked into the collection tree appear; that is every
    /// object in a well-formed scene.
    pub fn to_document(&self) -> SceneResult<SceneDocument> {
        let root = self.write_node(self.root())?;
        let active_object = match self.active() {
            Some(id) => Some(self.object(id)?.name.clone()),
            None => None,
        };
        let mut selected_objects = Vec::new();
        for id in self.selected_ids() {
            selected_objects.push(self.object(id)?.name.clone());
        }
        Ok(SceneDocument {
            scene_version: SCENE_VERSION,
            name: self.name.clone(),
            root,
            active_object,
            selected_objects,
        })
    }

    fn write_node(&self, id: CollectionId) -> SceneResult<CollectionNode> {
        let collection = self.collection(id)?;
        let mut objects = Vec::new();
        for object_id in &collection.objects {
            objects.push(self.object(*object_id)?.clone());
        }
        let mut children = Vec::new();
        for child in &collection.children {
            children.push(self.write_node(*child)?);
        }
        Ok(CollectionNode {
            name: collection.name.clone(),
            objects,
            children,
        })
    }
}

fn link_node(scene: &mut Scene, id: CollectionId, node: CollectionNode) -> SceneResult<()> {
    for object in node.objects {
        scene.add_object(id, object)?;
    }
    for child in node.children {
        let child_id = scene.add_collection(id, child.name.clone())?;
        link_node(scene, child_id, child)?;
    }
    Ok(())
}
