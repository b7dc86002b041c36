//! Collections: the named tree that objects are linked into.

use std::fmt;

use crate::object::ObjectId;

/// Stable handle to a collection within one [`Scene`](crate::scene::Scene).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CollectionId(pub(crate) u32);

impl fmt::Display for CollectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A node in the scene's collection tree.
///
/// Membership lives on the collection side, as in the host model: an object
/// knows nothing about where it is linked.
#[derive(Debug, Clone, Default)]
pub struct Collection {
    /// Collection name.
    pub name: String,
    /// Objects linked into this collection.
    pub objects: Vec<ObjectId>,
    /// Child collections.
    pub children: Vec<CollectionId>,
}

impl Collection {
    /// Creates an empty collection.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            objects: Vec::new(),
            children: Vec::new(),
        }
    }

    /// True when `object` is linked into this collection.
    pub fn contains(&self, object: ObjectId) -> bool {
        self.objects.contains(&object)
    }

    /// Unlinks `object` if present; returns whether it was linked.
    pub fn unlink(&mut self, object: ObjectId) -> bool {
        let before = self.objects.len();
        self.objects.retain(|o| *o != object);
        self.objects.len() != before
    }
}
