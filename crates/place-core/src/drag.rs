//! Drag gesture: trigger or mouse button held means "follow my pose".

use glam::{Quat, Vec3};

use crate::handle::SceneObjectHandle;
use crate::hit_test::SurfacePose;
use crate::math::{Camera, FloorPlane, Ray};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DragEvent {
    /// Controller trigger pressed (XR `selectstart`) or primary mouse down.
    Press,
    /// Controller trigger released (XR `selectend`) or mouse up.
    Release,
}

impl DragState {
    pub fn on_event(self, event: DragEvent) -> DragState {
        match event {
            DragEvent::Press => DragState::Dragging,
            DragEvent::Release => DragState::Idle,
        }
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self, DragState::Dragging)
    }
}

/// Where the dragged object should go this update. Floor-ray targets carry
/// no orientation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragTarget {
    pub position: Vec3,
    pub orientation: Option<Quat>,
}

impl DragTarget {
    pub fn from_surface(surface: &SurfacePose) -> Option<Self> {
        surface.found.then_some(DragTarget {
            position: surface.position,
            orientation: Some(surface.orientation),
        })
    }

    /// Cast against the floor; `None` when the ray never reaches it.
    pub fn from_floor_ray(floor: &FloorPlane, ray: &Ray) -> Option<Self> {
        floor.intersect(ray).map(|position| DragTarget {
            position,
            orientation: None,
        })
    }

    /// Desktop variant: ray from the camera through the cursor.
    pub fn from_cursor(floor: &FloorPlane, camera: &Camera, ndc: glam::Vec2) -> Option<Self> {
        Self::from_floor_ray(floor, &camera.ray_from_ndc(ndc))
    }
}

#[derive(Debug)]
pub struct DragController {
    state: DragState,
    follow_blend: f32,
}

impl DragController {
    pub fn new(follow_blend: f32) -> Self {
        Self {
            state: DragState::Idle,
            follow_blend,
        }
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state.is_dragging()
    }

    pub fn press(&mut self) {
        self.state = self.state.on_event(DragEvent::Press);
    }

    pub fn release(&mut self) {
        self.state = self.state.on_event(DragEvent::Release);
    }

    /// Move the handle toward `target` if a drag is active and placement is
    /// unlocked. Position is copied; orientation covers `follow_blend` of the
    /// remaining angle. Returns whether anything was written.
    pub fn apply(&self, handle: &mut SceneObjectHandle, target: Option<DragTarget>) -> bool {
        if !self.is_dragging() || handle.placement_locked {
            return false;
        }
        let Some(target) = target else {
            return false;
        };
        handle.transform.position = target.position;
        if let Some(orientation) = target.orientation {
            handle.transform.rotation = handle
                .transform
                .rotation
                .slerp(orientation, self.follow_blend)
                .normalize();
        }
        true
    }
}
