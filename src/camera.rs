use glam::Vec3;
use serde::Deserialize;

use crate::math::Ray;

pub const DEFAULT_FOV: f32 = std::f32::consts::FRAC_PI_4; // π/4 = 45 degrees
pub const DEFAULT_VIEWPORT_WIDTH: f32 = 800.0;
pub const DEFAULT_VIEWPORT_HEIGHT: f32 = 600.0;

/// Pixel dimensions of the surface pointer coordinates refer to
#[derive(Copy, Clone, Debug, PartialEq, Deserialize)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWPORT_WIDTH, DEFAULT_VIEWPORT_HEIGHT)
    }
}

/// Yaw/pitch camera used to turn pointer positions into pick rays
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    /// Vertical field of view in radians
    pub fov: f32,
}

impl Camera {
    pub fn new(position: Vec3, yaw: f32, pitch: f32) -> Self {
        Self {
            position,
            yaw,
            pitch,
            fov: DEFAULT_FOV,
        }
    }

    pub fn with_fov(mut self, fov: f32) -> Self {
        self.fov = fov;
        self
    }

    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.sin() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.cos() * self.pitch.cos(),
        )
        .normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize()
    }

    pub fn up(&self) -> Vec3 {
        self.right().cross(self.forward()).normalize()
    }

    /// Ray from the camera through pixel `(x, y)`, measured from the top-left corner.
    pub fn screen_ray(&self, x: f32, y: f32, viewport: Viewport) -> Ray {
        let half_height = (self.fov / 2.0).tan();
        let half_width = half_height * viewport.aspect();

        let ndc_x = 2.0 * x / viewport.width - 1.0;
        let ndc_y = 1.0 - 2.0 * y / viewport.height;

        let dir = self.forward()
            + self.right() * (ndc_x * half_width)
            + self.up() * (ndc_y * half_height);

        Ray::new(self.position, dir)
    }
}

impl Default for Camera {
    /// Ten units back on +Z, looking at the origin
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 0.0, 10.0), std::f32::consts::PI, 0.0)
    }
}
