use std::cell::Cell;
use std::rc::Rc;

use log::debug;

use crate::core::observable::Subscription;
use crate::mesh::{Mesh, MeshId};
use crate::pointer::{PointerEventType, PointerInfo};
use crate::scene::Scene;

/// Mesh that records whether it has been clicked.
///
/// The `rotating` flag flips to `true` on the first pointer-down whose pick
/// result is this mesh and never goes back. The pointer subscription lives
/// exactly as long as the mesh.
pub struct ClickTrackableMesh {
    mesh: Mesh,
    rotating: Rc<Cell<bool>>,
    _pointer_subscription: Subscription,
}

impl ClickTrackableMesh {
    pub fn new(name: impl Into<String>, scene: &Scene) -> Self {
        let mesh = Mesh::new(name, scene);
        let rotating = Rc::new(Cell::new(false));

        let id = mesh.id();
        let name = mesh.name().to_owned();
        let flag = Rc::clone(&rotating);
        let subscription = scene
            .on_pointer_observable()
            .add(move |info: &PointerInfo| {
                if is_click_on(info, id) && !flag.replace(true) {
                    debug!("{} ({:?}) clicked, rotating", id, name);
                }
            });

        Self {
            mesh,
            rotating,
            _pointer_subscription: subscription,
        }
    }

    pub fn is_rotating(&self) -> bool {
        self.rotating.get()
    }

    pub fn id(&self) -> MeshId {
        self.mesh.id()
    }

    pub fn name(&self) -> &str {
        self.mesh.name()
    }

    /// Underlying mesh, for bounds, position and pickability
    pub fn mesh(&self) -> &Mesh {
        &self.mesh
    }

    /// Unregister the mesh and release its pointer subscription
    pub fn dispose(self) {}
}

/// Pointer-down carrying a pick result that names `id`
fn is_click_on(info: &PointerInfo, id: MeshId) -> bool {
    match &info.pick_info {
        Some(pick) => info.event_type == PointerEventType::Down && pick.picked_mesh == Some(id),
        None => false,
    }
}

impl std::fmt::Debug for ClickTrackableMesh {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClickTrackableMesh")
            .field("mesh", &self.mesh)
            .field("rotating", &self.is_rotating())
            .finish()
    }
}
