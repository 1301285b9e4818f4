use glam::{EulerRot, Quat, Vec3};
use serde::Serialize;

use crate::constants::TRACKED_BUTTONS;
use crate::math::ClipPlane;
use crate::mesh::SceneNode;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: f32,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: 1.0,
        }
    }
}

/// The currently placed object: transform, content, and the interaction
/// state the controllers keep on it between frames.
#[derive(Clone, Debug)]
pub struct SceneObjectHandle {
    pub transform: Transform,
    pub node: SceneNode,
    pub placement_locked: bool,
    pub clip_enabled: bool,
    pub clip_height: f32,
    pub clip_yaw: f32,
    pub previous_buttons: [bool; TRACKED_BUTTONS],
}

impl SceneObjectHandle {
    pub fn new(node: SceneNode) -> Self {
        Self {
            transform: Transform::default(),
            node,
            placement_locked: false,
            clip_enabled: false,
            clip_height: 0.0,
            clip_yaw: 0.0,
            previous_buttons: [false; TRACKED_BUTTONS],
        }
    }

    pub fn position(&self) -> Vec3 {
        self.transform.position
    }

    pub fn scale(&self) -> f32 {
        self.transform.scale
    }

    pub fn set_scale(&mut self, scale: f32, min: f32, max: f32) {
        self.transform.scale = scale.clamp(min, max);
    }

    /// Add pitch (about X) and yaw (about Y) to the current XYZ Euler angles.
    pub fn add_euler(&mut self, pitch: f32, yaw: f32) {
        let (x, y, z) = self.transform.rotation.to_euler(EulerRot::XYZ);
        self.transform.rotation = Quat::from_euler(EulerRot::XYZ, x + pitch, y + yaw, z);
    }

    /// Scale, rotation and clip offsets back to neutral. Position and the
    /// lock/clip flags are kept.
    pub fn reset_transform(&mut self) {
        self.transform.scale = 1.0;
        self.transform.rotation = Quat::IDENTITY;
        self.clip_height = 0.0;
        self.clip_yaw = 0.0;
    }

    pub fn clip_plane(&self) -> Option<ClipPlane> {
        self.clip_enabled
            .then(|| ClipPlane::from_height_yaw(self.clip_height, self.clip_yaw))
    }

    /// Swap the content for a new node, keeping transform and flags. Any
    /// active clip plane is carried over to the new surfaces.
    pub fn replace_node(&mut self, node: SceneNode) {
        self.node = node;
        let plane = self.clip_plane();
        self.node.set_clip_plane(plane);
    }

    pub fn readout(&self) -> Readout {
        Readout {
            scale_percent: (self.transform.scale * 100.0).round() as i32,
            clipping: self.clip_enabled,
            locked: self.placement_locked,
        }
    }
}

/// Values the UI shows next to the status line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Readout {
    pub scale_percent: i32,
    pub clipping: bool,
    pub locked: bool,
}

impl std::fmt::Display for Readout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Scale: {}%", self.scale_percent)?;
        if self.clipping {
            write!(f, " | Clipping: ON")?;
        }
        if self.locked {
            write!(f, " | Locked")?;
        }
        Ok(())
    }
}
