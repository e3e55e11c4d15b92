use std::cell::Cell;
use std::fmt;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

use glam::Vec3;

use crate::math::AABB;
use crate::scene::{Scene, SceneState};

static NEXT_MESH_ID: AtomicU64 = AtomicU64::new(0);

/// Mesh identity, unique across every scene in the process and never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshId(pub(crate) u64);

impl MeshId {
    pub(crate) fn next() -> Self {
        MeshId(NEXT_MESH_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for MeshId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "mesh#{}", self.0)
    }
}

/// Mesh state shared between the `Mesh` handle and the scene registry
#[derive(Debug)]
pub(crate) struct MeshData {
    pub(crate) id: MeshId,
    pub(crate) name: String,
    pub(crate) bounds: Cell<Option<AABB>>,
    pub(crate) position: Cell<Vec3>,
    pub(crate) pickable: Cell<bool>,
    pub(crate) enabled: Cell<bool>,
}

impl MeshData {
    pub(crate) fn new(id: MeshId, name: String) -> Self {
        Self {
            id,
            name,
            bounds: Cell::new(None),
            position: Cell::new(Vec3::ZERO),
            pickable: Cell::new(true),
            enabled: Cell::new(true),
        }
    }

    pub(crate) fn world_bounds(&self) -> Option<AABB> {
        self.bounds
            .get()
            .map(|bounds| bounds.translated(self.position.get()))
    }

    /// Whether a pick ray may select this mesh
    pub(crate) fn is_pick_target(&self) -> bool {
        self.enabled.get() && self.pickable.get() && self.bounds.get().is_some()
    }
}

/// Named mesh registered with a scene.
///
/// A fresh mesh has no bounds and cannot be picked until `set_bounds` is
/// called. Dropping the handle unregisters the mesh.
pub struct Mesh {
    data: Rc<MeshData>,
    scene: Weak<SceneState>,
}

impl Mesh {
    pub fn new(name: impl Into<String>, scene: &Scene) -> Self {
        let data = scene.state().register_mesh(name.into());
        Self {
            data,
            scene: scene.downgrade(),
        }
    }

    pub fn with_bounds(name: impl Into<String>, scene: &Scene, bounds: AABB) -> Self {
        let mesh = Self::new(name, scene);
        mesh.set_bounds(bounds);
        mesh
    }

    pub fn id(&self) -> MeshId {
        self.data.id
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    /// Local-space pick volume
    pub fn bounds(&self) -> Option<AABB> {
        self.data.bounds.get()
    }

    pub fn set_bounds(&self, bounds: AABB) {
        self.data.bounds.set(Some(bounds));
    }

    pub fn position(&self) -> Vec3 {
        self.data.position.get()
    }

    pub fn set_position(&self, position: Vec3) {
        self.data.position.set(position);
    }

    pub fn world_bounds(&self) -> Option<AABB> {
        self.data.world_bounds()
    }

    pub fn is_pickable(&self) -> bool {
        self.data.pickable.get()
    }

    pub fn set_pickable(&self, pickable: bool) {
        self.data.pickable.set(pickable);
    }

    pub fn is_enabled(&self) -> bool {
        self.data.enabled.get()
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.data.enabled.set(enabled);
    }

    /// Owning scene, if it is still alive
    pub fn scene(&self) -> Option<Scene> {
        self.scene.upgrade().map(Scene::from_state)
    }

    pub fn is_registered(&self) -> bool {
        self.scene
            .upgrade()
            .is_some_and(|state| state.contains_mesh(self.data.id))
    }

    pub fn dispose(self) {
        // Drop unregisters
    }
}

impl Drop for Mesh {
    fn drop(&mut self) {
        if let Some(state) = self.scene.upgrade() {
            state.unregister_mesh(self.data.id);
        }
    }
}

impl fmt::Debug for Mesh {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Mesh")
            .field("id", &self.data.id)
            .field("name", &self.data.name)
            .field("bounds", &self.bounds())
            .field("position", &self.position())
            .finish()
    }
}
