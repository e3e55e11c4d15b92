use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

use crate::math::Ray;
use crate::mesh::MeshId;

/// Pointer event kinds. Values are bit flags so they can be OR-ed into observer masks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[repr(u32)]
pub enum PointerEventType {
    Down = 0x01,
    Up = 0x02,
    Move = 0x04,
    Wheel = 0x08,
    Pick = 0x10,
    Tap = 0x20,
    DoubleTap = 0x40,
}

impl PointerEventType {
    pub const ALL: [PointerEventType; 7] = [
        PointerEventType::Down,
        PointerEventType::Up,
        PointerEventType::Move,
        PointerEventType::Wheel,
        PointerEventType::Pick,
        PointerEventType::Tap,
        PointerEventType::DoubleTap,
    ];

    pub const fn mask(self) -> u32 {
        self as u32
    }

    /// Look up a raw event tag
    pub fn from_tag(tag: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.mask() == tag)
    }
}

/// Result of casting a ray into the scene
#[derive(Debug, Clone, PartialEq)]
pub struct PickInfo {
    pub hit: bool,
    pub picked_mesh: Option<MeshId>,
    pub distance: f32,
    pub picked_point: Option<Vec3>,
    pub ray: Option<Ray>,
}

impl PickInfo {
    pub fn miss(ray: Option<Ray>) -> Self {
        Self {
            hit: false,
            picked_mesh: None,
            distance: 0.0,
            picked_point: None,
            ray,
        }
    }

    pub fn hit(mesh: MeshId, ray: Ray, distance: f32) -> Self {
        Self {
            hit: true,
            picked_mesh: Some(mesh),
            distance,
            picked_point: Some(ray.at(distance)),
            ray: Some(ray),
        }
    }

    /// Pick record naming `mesh` without a ray, for events built by hand
    pub fn for_mesh(mesh: MeshId) -> Self {
        Self {
            hit: true,
            picked_mesh: Some(mesh),
            distance: 0.0,
            picked_point: None,
            ray: None,
        }
    }
}

/// A pointer notification as delivered to scene observers
#[derive(Debug, Clone, PartialEq)]
pub struct PointerInfo {
    pub event_type: PointerEventType,
    pub pick_info: Option<PickInfo>,
    pub position: Option<Vec2>,
}

impl PointerInfo {
    pub fn new(event_type: PointerEventType, pick_info: Option<PickInfo>) -> Self {
        Self {
            event_type,
            pick_info,
            position: None,
        }
    }

    pub fn at(mut self, position: Vec2) -> Self {
        self.position = Some(position);
        self
    }

    /// Mesh under the pointer, if the event carries a pick result that hit one
    pub fn picked_mesh(&self) -> Option<MeshId> {
        self.pick_info.as_ref().and_then(|pick| pick.picked_mesh)
    }
}
