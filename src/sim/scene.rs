//! Scene store
//!
//! A flat arena standing in for the host engine's scene graph. Transforms are
//! world space; `parent`/`children` only carry the authored hierarchy so the
//! rig can be resolved by name once at start-up.

use std::fmt;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use super::bounds::Aabb;
use crate::error::{Result, ShadowError};

/// Opaque handle to a scene object
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct ObjectId(pub u32);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Collision shape state the shadow logic is allowed to touch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collider {
    pub enabled: bool,
}

impl Default for Collider {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// A scene object (occluder, shadow proxy, container, player, ...)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneObject {
    pub id: ObjectId,
    pub name: String,
    pub parent: Option<ObjectId>,
    /// Children in authored order
    pub children: Vec<ObjectId>,
    pub position: Vec3,
    pub scale: Vec3,
    /// Half-size of the mesh at unit scale
    pub half_size: Vec3,
    pub collider: Option<Collider>,
}

impl SceneObject {
    /// World-space bounds
    pub fn bounds(&self) -> Aabb {
        Aabb::new(self.position, self.half_size * self.scale)
    }
}

/// All objects in the scene, indexed by id
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scene {
    objects: Vec<SceneObject>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Add an empty container (no mesh, no collider)
    pub fn add_group(&mut self, name: &str, parent: Option<ObjectId>) -> ObjectId {
        self.add_object(name, parent, Vec3::ZERO, Vec3::ONE, Vec3::ZERO, None)
    }

    /// Add a box-shaped object with a unit mesh of the given half-size
    pub fn add_box(
        &mut self,
        name: &str,
        parent: Option<ObjectId>,
        position: Vec3,
        scale: Vec3,
        half_size: Vec3,
    ) -> ObjectId {
        self.add_object(name, parent, position, scale, half_size, Some(Collider::default()))
    }

    pub fn add_object(
        &mut self,
        name: &str,
        parent: Option<ObjectId>,
        position: Vec3,
        scale: Vec3,
        half_size: Vec3,
        collider: Option<Collider>,
    ) -> ObjectId {
        let id = ObjectId(self.objects.len() as u32);
        self.objects.push(SceneObject {
            id,
            name: name.to_string(),
            parent,
            children: Vec::new(),
            position,
            scale,
            half_size,
            collider,
        });
        if let Some(parent) = parent.and_then(|p| self.objects.get_mut(p.0 as usize)) {
            parent.children.push(id);
        }
        id
    }

    pub fn get(&self, id: ObjectId) -> Option<&SceneObject> {
        self.objects.get(id.0 as usize)
    }

    pub fn get_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        self.objects.get_mut(id.0 as usize)
    }

    /// Like [`Scene::get`] but as a resolution error
    pub fn require(&self, id: ObjectId) -> Result<&SceneObject> {
        self.get(id).ok_or(ShadowError::MissingObject(id))
    }

    pub fn iter(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects.iter()
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Name of an object's parent, if it has one
    pub fn parent_name(&self, id: ObjectId) -> Option<&str> {
        self.get(id)
            .and_then(|o| o.parent)
            .and_then(|p| self.get(p))
            .map(|p| p.name.as_str())
    }

    /// Direct child of `parent` with the given name
    pub fn find_child(&self, parent: ObjectId, name: &str) -> Option<ObjectId> {
        self.get(parent)?
            .children
            .iter()
            .copied()
            .find(|&c| self.get(c).is_some_and(|o| o.name == name))
    }

    /// First object with the given name, anywhere in the scene
    pub fn find_by_name(&self, name: &str) -> Option<ObjectId> {
        self.objects.iter().find(|o| o.name == name).map(|o| o.id)
    }

    pub fn set_position(&mut self, id: ObjectId, position: Vec3) {
        if let Some(obj) = self.get_mut(id) {
            obj.position = position;
        }
    }

    pub fn collider_enabled(&self, id: ObjectId) -> Option<bool> {
        self.get(id)?.collider.map(|c| c.enabled)
    }

    pub fn set_collider_enabled(&mut self, id: ObjectId, enabled: bool) {
        if let Some(collider) = self.get_mut(id).and_then(|o| o.collider.as_mut()) {
            collider.enabled = enabled;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hierarchy_lookup() {
        let mut scene = Scene::new();
        let root = scene.add_group("Level", None);
        let diorama = scene.add_group("Diorama", Some(root));
        let rock = scene.add_box("Rock", Some(diorama), Vec3::ZERO, Vec3::ONE, Vec3::splat(0.5));

        assert_eq!(scene.len(), 3);
        assert_eq!(scene.parent_name(rock), Some("Diorama"));
        assert_eq!(scene.parent_name(root), None);
        assert_eq!(scene.find_child(diorama, "Rock"), Some(rock));
        assert_eq!(scene.find_child(root, "Rock"), None);
        assert_eq!(scene.find_by_name("Diorama"), Some(diorama));
        assert!(scene.require(ObjectId(42)).is_err());
    }

    #[test]
    fn test_bounds_follow_scale() {
        let mut scene = Scene::new();
        let id = scene.add_box(
            "Crate",
            None,
            Vec3::new(1.0, 0.5, 2.0),
            Vec3::new(2.0, 1.0, 1.0),
            Vec3::splat(0.5),
        );
        let bounds = scene.get(id).unwrap().bounds();
        assert_eq!(bounds.extents, Vec3::new(1.0, 0.5, 0.5));
        assert_eq!(bounds.min(), Vec3::new(0.0, 0.0, 1.5));
    }

    #[test]
    fn test_collider_toggle() {
        let mut scene = Scene::new();
        let group = scene.add_group("Group", None);
        let id = scene.add_box("Crate", None, Vec3::ZERO, Vec3::ONE, Vec3::ONE);

        assert_eq!(scene.collider_enabled(id), Some(true));
        scene.set_collider_enabled(id, false);
        assert_eq!(scene.collider_enabled(id), Some(false));

        // Groups have no collider to toggle
        scene.set_collider_enabled(group, false);
        assert_eq!(scene.collider_enabled(group), None);
    }
}
