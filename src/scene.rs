use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use glam::Vec2;
use log::debug;

use crate::camera::{Camera, Viewport};
use crate::core::observable::Observable;
use crate::math::Ray;
use crate::mesh::{MeshData, MeshId};
use crate::pointer::{PickInfo, PointerEventType, PointerInfo};

pub(crate) struct SceneState {
    meshes: RefCell<Vec<Rc<MeshData>>>,
    pick_on_move: Cell<bool>,
    pointer_observable: Observable<PointerInfo>,
}

impl SceneState {
    pub(crate) fn register_mesh(&self, name: String) -> Rc<MeshData> {
        let id = MeshId::next();

        debug!("Registering {} ({:?})", id, name);
        let data = Rc::new(MeshData::new(id, name));
        self.meshes.borrow_mut().push(Rc::clone(&data));
        data
    }

    pub(crate) fn unregister_mesh(&self, id: MeshId) -> bool {
        let mut meshes = self.meshes.borrow_mut();
        let before = meshes.len();
        meshes.retain(|m| m.id != id);
        let removed = meshes.len() != before;
        if removed {
            debug!("Unregistered {}", id);
        }
        removed
    }

    pub(crate) fn contains_mesh(&self, id: MeshId) -> bool {
        self.meshes.borrow().iter().any(|m| m.id == id)
    }
}

/// Container for meshes and the source of pointer-event dispatch.
///
/// `Scene` is a cheap handle; clones refer to the same scene.
#[derive(Clone)]
pub struct Scene {
    state: Rc<SceneState>,
}

impl Scene {
    pub fn new() -> Self {
        Self {
            state: Rc::new(SceneState {
                meshes: RefCell::new(Vec::new()),
                pick_on_move: Cell::new(false),
                pointer_observable: Observable::new(),
            }),
        }
    }

    pub(crate) fn from_state(state: Rc<SceneState>) -> Self {
        Self { state }
    }

    pub(crate) fn state(&self) -> &SceneState {
        &self.state
    }

    pub(crate) fn downgrade(&self) -> Weak<SceneState> {
        Rc::downgrade(&self.state)
    }

    /// Stream of every pointer event dispatched through this scene
    pub fn on_pointer_observable(&self) -> &Observable<PointerInfo> {
        &self.state.pointer_observable
    }

    pub fn mesh_count(&self) -> usize {
        self.state.meshes.borrow().len()
    }

    pub fn contains_mesh(&self, id: MeshId) -> bool {
        self.state.contains_mesh(id)
    }

    /// Registration order
    pub fn mesh_ids(&self) -> Vec<MeshId> {
        self.state.meshes.borrow().iter().map(|m| m.id).collect()
    }

    /// First registered mesh with this name
    pub fn get_mesh_by_name(&self, name: &str) -> Option<MeshId> {
        self.state
            .meshes
            .borrow()
            .iter()
            .find(|m| m.name == name)
            .map(|m| m.id)
    }

    pub fn pick_on_move(&self) -> bool {
        self.state.pick_on_move.get()
    }

    /// Attach pick results to move events as well (off by default)
    pub fn set_pick_on_move(&self, enabled: bool) {
        self.state.pick_on_move.set(enabled);
    }

    /// Nearest enabled, pickable mesh along `ray`. Ties keep the earlier mesh.
    pub fn pick_with_ray(&self, ray: &Ray) -> PickInfo {
        let meshes = self.state.meshes.borrow();
        let nearest = meshes
            .iter()
            .filter(|m| m.is_pick_target())
            .filter_map(|m| {
                let bounds = m.world_bounds()?;
                ray.intersect_aabb(&bounds).map(|t| (m.id, t))
            })
            .fold(None, |best: Option<(MeshId, f32)>, (id, t)| match best {
                Some((_, best_t)) if best_t <= t => best,
                _ => Some((id, t)),
            });

        match nearest {
            Some((id, t)) => PickInfo::hit(id, *ray, t),
            None => PickInfo::miss(Some(*ray)),
        }
    }

    /// Pick through pixel `(x, y)` of `viewport` as seen by `camera`.
    /// An empty viewport has no pixels and always misses.
    pub fn pick(&self, x: f32, y: f32, camera: &Camera, viewport: Viewport) -> PickInfo {
        if viewport.is_empty() {
            debug!("Pick at ({}, {}) skipped: empty viewport", x, y);
            return PickInfo::miss(None);
        }
        let ray = camera.screen_ray(x, y, viewport);
        self.pick_with_ray(&ray)
    }

    /// Deliver `info` to observers whose mask includes its event type
    pub fn dispatch_pointer_event(&self, info: &PointerInfo) -> usize {
        let notified = self
            .state
            .pointer_observable
            .notify_with_mask(info, info.event_type.mask());
        debug!(
            "Dispatched {:?} (picked: {:?}) to {} observer(s)",
            info.event_type,
            info.picked_mesh(),
            notified
        );
        notified
    }

    /// Whether events of this type carry a pick result
    fn picks_on(&self, event_type: PointerEventType) -> bool {
        match event_type {
            PointerEventType::Move => self.pick_on_move(),
            PointerEventType::Wheel => false,
            _ => true,
        }
    }

    /// Build a pointer event at `(x, y)`, pick if the event type calls for it,
    /// and dispatch it. Returns the dispatched record.
    pub fn simulate_pointer(
        &self,
        event_type: PointerEventType,
        x: f32,
        y: f32,
        camera: &Camera,
        viewport: Viewport,
    ) -> PointerInfo {
        let pick_info = self
            .picks_on(event_type)
            .then(|| self.pick(x, y, camera, viewport));
        let info = PointerInfo::new(event_type, pick_info).at(Vec2::new(x, y));
        self.dispatch_pointer_event(&info);
        info
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Scene")
            .field("meshes", &self.mesh_count())
            .field("pointer_observers", &self.on_pointer_observable().observer_count())
            .field("pick_on_move", &self.pick_on_move())
            .finish()
    }
}
