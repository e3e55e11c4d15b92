use glam::Vec2;
use log::{debug, warn};
use winit::event::{ElementState, MouseButton, WindowEvent};

use crate::camera::{Camera, Viewport};
use crate::pointer::{PointerEventType, PointerInfo};
use crate::scene::Scene;

/// Adapter that turns Winit window events into scene pointer events
#[derive(Debug, Clone)]
pub struct PointerInputAdapter {
    /// Surface size pointer coordinates are measured against
    viewport: Viewport,
    /// Last known cursor position (relative to window)
    cursor: Option<Vec2>,
    /// Mouse buttons currently held
    pressed: Vec<MouseButton>,
}

impl PointerInputAdapter {
    pub fn new(viewport: Viewport) -> Self {
        Self {
            viewport,
            cursor: None,
            pressed: Vec::new(),
        }
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn cursor_position(&self) -> Option<Vec2> {
        self.cursor
    }

    pub fn is_pressed(&self, button: MouseButton) -> bool {
        self.pressed.contains(&button)
    }

    /// Process a Winit WindowEvent, dispatching a pointer event when it maps to one
    pub fn process_event(
        &mut self,
        event: &WindowEvent,
        scene: &Scene,
        camera: &Camera,
    ) -> Option<PointerInfo> {
        match event {
            WindowEvent::CursorMoved { position, .. } => {
                let position = Vec2::new(position.x as f32, position.y as f32);
                Some(self.handle_cursor_moved(position, scene, camera))
            }
            WindowEvent::CursorLeft { .. } => {
                self.cursor = None;
                None
            }
            WindowEvent::MouseInput { state, button, .. } => {
                self.handle_mouse_button(*state, *button, scene, camera)
            }
            WindowEvent::MouseWheel { .. } => self.handle_wheel(scene, camera),
            WindowEvent::Resized(size) => {
                let viewport = Viewport::new(size.width as f32, size.height as f32);
                // Minimized windows report 0x0; keep the last usable size
                if viewport.is_empty() {
                    debug!("Ignoring resize to {}x{}", size.width, size.height);
                } else {
                    self.viewport = viewport;
                    debug!("Pointer viewport resized to {}x{}", size.width, size.height);
                }
                None
            }
            _ => None,
        }
    }

    pub fn handle_cursor_moved(&mut self, position: Vec2, scene: &Scene, camera: &Camera) -> PointerInfo {
        self.cursor = Some(position);
        self.dispatch(PointerEventType::Move, position, scene, camera)
    }

    /// Button press/release at the current cursor. Ignored while the cursor position is unknown.
    pub fn handle_mouse_button(
        &mut self,
        state: ElementState,
        button: MouseButton,
        scene: &Scene,
        camera: &Camera,
    ) -> Option<PointerInfo> {
        match state {
            ElementState::Pressed => {
                if !self.pressed.contains(&button) {
                    self.pressed.push(button);
                }
            }
            ElementState::Released => self.pressed.retain(|&b| b != button),
        }

        let Some(position) = self.cursor else {
            warn!("Ignoring {:?} {:?}: cursor position unknown", button, state);
            return None;
        };
        Some(self.dispatch(Self::event_type_for(state), position, scene, camera))
    }

    pub fn handle_wheel(&mut self, scene: &Scene, camera: &Camera) -> Option<PointerInfo> {
        let position = self.cursor?;
        Some(self.dispatch(PointerEventType::Wheel, position, scene, camera))
    }

    /// Map a button state to its pointer event type
    pub fn event_type_for(state: ElementState) -> PointerEventType {
        match state {
            ElementState::Pressed => PointerEventType::Down,
            ElementState::Released => PointerEventType::Up,
        }
    }

    fn dispatch(
        &self,
        event_type: PointerEventType,
        position: Vec2,
        scene: &Scene,
        camera: &Camera,
    ) -> PointerInfo {
        scene.simulate_pointer(event_type, position.x, position.y, camera, self.viewport)
    }
}

impl Default for PointerInputAdapter {
    fn default() -> Self {
        Self::new(Viewport::default())
    }
}
