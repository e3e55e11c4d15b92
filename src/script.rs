use std::collections::HashSet;
use std::path::Path;

use anyhow::{bail, ensure, Context, Result};
use glam::Vec3;
use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::camera::{Camera, Viewport, DEFAULT_FOV};
use crate::click_trackable::ClickTrackableMesh;
use crate::math::AABB;
use crate::pointer::PointerEventType;
use crate::scene::Scene;

/// A scene description plus the pointer events to replay against it
#[derive(Debug, Clone, Deserialize)]
pub struct SceneScript {
    #[serde(default)]
    pub viewport: Viewport,
    #[serde(default)]
    pub camera: CameraSpec,
    #[serde(default)]
    pub pick_on_move: bool,
    pub meshes: Vec<MeshSpec>,
    #[serde(default)]
    pub events: Vec<ScriptEvent>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CameraSpec {
    pub position: [f32; 3],
    pub yaw: f32,
    pub pitch: f32,
    #[serde(default = "default_fov_degrees")]
    pub fov_degrees: f32,
}

fn default_fov_degrees() -> f32 {
    DEFAULT_FOV.to_degrees()
}

impl Default for CameraSpec {
    fn default() -> Self {
        let camera = Camera::default();
        Self {
            position: camera.position.to_array(),
            yaw: camera.yaw,
            pitch: camera.pitch,
            fov_degrees: default_fov_degrees(),
        }
    }
}

impl From<&CameraSpec> for Camera {
    fn from(spec: &CameraSpec) -> Self {
        Camera::new(Vec3::from_array(spec.position), spec.yaw, spec.pitch)
            .with_fov(spec.fov_degrees.to_radians())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MeshSpec {
    pub name: String,
    pub min: [f32; 3],
    pub max: [f32; 3],
    #[serde(default)]
    pub position: [f32; 3],
    #[serde(default = "default_pickable")]
    pub pickable: bool,
}

fn default_pickable() -> bool {
    true
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ScriptEvent {
    #[serde(rename = "type")]
    pub event_type: PointerEventType,
    pub x: f32,
    pub y: f32,
}

/// Final state of one mesh after a replay
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeshState {
    pub name: String,
    pub rotating: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReplayOutcome {
    pub events: usize,
    pub meshes: Vec<MeshState>,
}

impl ReplayOutcome {
    pub fn state_of(&self, name: &str) -> Option<&MeshState> {
        self.meshes.iter().find(|m| m.name == name)
    }
}

pub fn load_script(path: impl AsRef<Path>) -> Result<SceneScript> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read scene script: {:?}", path))?;
    parse_script(&text).with_context(|| format!("Invalid scene script: {:?}", path))
}

pub fn parse_script(text: &str) -> Result<SceneScript> {
    let script: SceneScript = serde_json::from_str(text).context("Failed to parse scene script JSON")?;
    validate(&script)?;
    Ok(script)
}

fn validate(script: &SceneScript) -> Result<()> {
    ensure!(
        !script.viewport.is_empty(),
        "viewport must be non-empty, got {}x{}",
        script.viewport.width,
        script.viewport.height
    );

    let mut seen = HashSet::new();
    for (index, mesh) in script.meshes.iter().enumerate() {
        if mesh.name.is_empty() {
            bail!("mesh #{} has an empty name", index);
        }
        if !seen.insert(mesh.name.as_str()) {
            bail!("duplicate mesh name {:?}", mesh.name);
        }
        let bounds = AABB::new(Vec3::from_array(mesh.min), Vec3::from_array(mesh.max));
        ensure!(
            bounds.is_valid(),
            "mesh {:?} has inverted bounds (min {:?}, max {:?})",
            mesh.name,
            mesh.min,
            mesh.max
        );
    }
    Ok(())
}

/// Build the scene, replay every event in order and report each mesh's flag
pub fn replay(script: &SceneScript) -> Result<ReplayOutcome> {
    validate(script)?;

    let scene = Scene::new();
    scene.set_pick_on_move(script.pick_on_move);
    let camera = Camera::from(&script.camera);

    let meshes: Vec<ClickTrackableMesh> = script
        .meshes
        .iter()
        .map(|spec| {
            let mesh = ClickTrackableMesh::new(spec.name.clone(), &scene);
            mesh.mesh()
                .set_bounds(AABB::new(Vec3::from_array(spec.min), Vec3::from_array(spec.max)));
            mesh.mesh().set_position(Vec3::from_array(spec.position));
            mesh.mesh().set_pickable(spec.pickable);
            mesh
        })
        .collect();

    for event in &script.events {
        let info = scene.simulate_pointer(event.event_type, event.x, event.y, &camera, script.viewport);
        debug!(
            "{:?} at ({}, {}) picked {:?}",
            event.event_type,
            event.x,
            event.y,
            info.picked_mesh()
        );
    }

    let states: Vec<MeshState> = meshes
        .iter()
        .map(|mesh| MeshState {
            name: mesh.name().to_owned(),
            rotating: mesh.is_rotating(),
        })
        .collect();

    info!(
        "Replayed {} event(s) over {} mesh(es), {} clicked",
        script.events.len(),
        states.len(),
        states.iter().filter(|s| s.rotating).count()
    );

    Ok(ReplayOutcome {
        events: script.events.len(),
        meshes: states,
    })
}
