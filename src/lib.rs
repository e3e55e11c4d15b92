pub mod camera;
pub mod cli;
pub mod click_trackable;
pub mod core;
pub mod math;
pub mod mesh;
pub mod pointer;
pub mod scene;
pub mod script;

pub use camera::{Camera, Viewport};
pub use click_trackable::ClickTrackableMesh;
pub use crate::core::{Observable, PointerInputAdapter, Subscription};
pub use mesh::{Mesh, MeshId};
pub use pointer::{PickInfo, PointerEventType, PointerInfo};
pub use scene::Scene;
