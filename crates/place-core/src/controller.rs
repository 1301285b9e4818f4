//! One placement controller per viewer.
//!
//! Owns the placed object, the session state and the three per-frame
//! stages. Platform glue feeds it events and frames; it hands back a
//! snapshot for the renderer.

use glam::{Vec2, Vec3};
use serde::Serialize;

use crate::config::PlacementConfig;
use crate::constants::{DEFAULT_FRAME_DT, VR_START_POSITION};
use crate::drag::{DragController, DragTarget};
use crate::error::PlacementError;
use crate::gamepad::{GamepadController, InputSource};
use crate::handle::{Readout, SceneObjectHandle};
use crate::hit_test::{HitTestFrame, SurfacePose, SurfaceTracker};
use crate::math::{Camera, FloorPlane, Pose};
use crate::mesh::{NodeKind, SceneNode};
use crate::session::{transition, SessionEvent, SessionState, ViewerMode, XrMode};
use crate::status::Status;

/// Turns frame timestamps (milliseconds) into step lengths (seconds).
#[derive(Debug, Default)]
pub struct FrameClock {
    last_ms: Option<f64>,
}

impl FrameClock {
    pub fn tick(&mut self, now_ms: f64) -> f32 {
        let dt = match self.last_ms {
            Some(last) if now_ms > last => ((now_ms - last) / 1000.0) as f32,
            Some(_) => 0.0,
            None => DEFAULT_FRAME_DT,
        };
        self.last_ms = Some(now_ms);
        dt
    }

    pub fn reset(&mut self) {
        self.last_ms = None;
    }
}

/// Everything one frame needs from the platform.
pub struct FrameInput<'a, F> {
    pub frame: Option<&'a F>,
    pub dt: f32,
    pub input_sources: &'a [InputSource],
    /// World transform of the primary controller's target ray (VR).
    pub controller_pose: Option<Pose>,
}

impl<'a, F> FrameInput<'a, F> {
    /// Frame without XR data, as the desktop preview runs.
    pub fn desktop(dt: f32) -> Self {
        Self {
            frame: None,
            dt,
            input_sources: &[],
            controller_pose: None,
        }
    }
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ObjectSnapshot {
    pub position: [f32; 3],
    pub rotation: [f32; 4],
    pub scale: f32,
    pub placeholder: bool,
    pub clip_plane: Option<[f32; 4]>,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SceneSnapshot {
    pub object: Option<ObjectSnapshot>,
    pub reticle: Option<[f32; 16]>,
    pub floor_grid: bool,
    pub status: String,
    pub readout: Option<Readout>,
}

pub struct PlacementController<Sp, Src> {
    config: PlacementConfig,
    mode: ViewerMode,
    session: SessionState<Sp, Src>,
    tracker: SurfaceTracker,
    drag: DragController,
    gamepad: GamepadController,
    floor: FloorPlane,
    handle: Option<SceneObjectHandle>,
    status: Status,
    last_surface: SurfacePose,
}

impl<Sp, Src> PlacementController<Sp, Src> {
    pub fn new(config: PlacementConfig, mode: ViewerMode) -> Result<Self, PlacementError> {
        config.validate()?;
        Ok(Self {
            drag: DragController::new(config.follow_blend),
            floor: FloorPlane::new(config.floor_height),
            config,
            mode,
            session: SessionState::Idle,
            tracker: SurfaceTracker::new(),
            gamepad: GamepadController::new(),
            handle: None,
            status: Status::Ready(mode),
            last_surface: SurfacePose::NOT_FOUND,
        })
    }

    pub fn config(&self) -> &PlacementConfig {
        &self.config
    }

    pub fn mode(&self) -> ViewerMode {
        self.mode
    }

    pub fn session(&self) -> &SessionState<Sp, Src> {
        &self.session
    }

    pub fn handle(&self) -> Option<&SceneObjectHandle> {
        self.handle.as_ref()
    }

    pub fn handle_mut(&mut self) -> Option<&mut SceneObjectHandle> {
        self.handle.as_mut()
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn readout(&self) -> Option<Readout> {
        self.handle.as_ref().map(SceneObjectHandle::readout)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn reticle_visible(&self) -> bool {
        self.tracker.reticle().visible
    }

    // ---------------- session ----------------

    pub fn on_session_event(&mut self, event: SessionEvent<Sp, Src>) {
        let started = matches!(event, SessionEvent::Started);
        let ended = matches!(event, SessionEvent::Ended);
        let state = std::mem::take(&mut self.session);
        let (next, status) = transition(state, event);
        self.session = next;
        if let Some(status) = status {
            self.status = status;
        }
        if ended {
            self.tracker.clear();
            self.last_surface = SurfacePose::NOT_FOUND;
        }
        if started {
            self.move_to_vr_start();
        }
    }

    /// In VR the object starts in front of the viewer unless it is held.
    fn move_to_vr_start(&mut self) {
        if self.session.mode() != Some(XrMode::ImmersiveVr)
            || !self.session.is_active()
            || self.drag.is_dragging()
        {
            return;
        }
        if let Some(h) = self.handle.as_mut() {
            h.transform.position = Vec3::from_array(VR_START_POSITION);
        }
    }

    /// Result of the mesh load started alongside a session. Failures put the
    /// placeholder cube in place (if nothing is placed yet) and never surface
    /// as errors.
    pub fn on_mesh_loaded(&mut self, result: Result<SceneNode, PlacementError>) {
        let created = self.handle.is_none();
        match result {
            Ok(node) => {
                match self.handle.as_mut() {
                    Some(h) => h.replace_node(node),
                    None => self.handle = Some(SceneObjectHandle::new(node)),
                }
                log::info!("[mesh] model attached");
                if !self.session.is_active() {
                    self.status = Status::ModelLoaded;
                }
            }
            Err(e) => {
                log::warn!("[mesh] {}; using placeholder cube", e);
                ensure_handle(&mut self.handle);
            }
        }
        // VR loads the model after the session is up
        if created {
            self.move_to_vr_start();
        }
    }

    /// Remove the placed object entirely. The next placement gesture creates
    /// a fresh one.
    pub fn reset(&mut self) {
        if self.handle.take().is_some() {
            log::info!("[placement] object removed");
            self.status = Status::Reset;
        }
    }

    // ---------------- drag ----------------

    /// XR `selectstart`. Starts a drag and places immediately at the current
    /// reticle (AR) or controller floor ray (VR).
    pub fn select_start(&mut self, controller_pose: Option<Pose>) {
        self.drag.press();
        let target = self.xr_drag_target(controller_pose);
        self.drag.apply(ensure_handle(&mut self.handle), target);
    }

    pub fn select_end(&mut self) {
        self.drag.release();
    }

    /// Desktop left-button press at `ndc`.
    pub fn pointer_down(&mut self, camera: &Camera, ndc: Vec2) {
        self.drag.press();
        let target = DragTarget::from_cursor(&self.floor, camera, ndc);
        self.drag.apply(ensure_handle(&mut self.handle), target);
    }

    pub fn pointer_move(&mut self, camera: &Camera, ndc: Vec2) {
        if !self.drag.is_dragging() {
            return;
        }
        let target = DragTarget::from_cursor(&self.floor, camera, ndc);
        if let Some(handle) = self.handle.as_mut() {
            self.drag.apply(handle, target);
        }
    }

    pub fn pointer_up(&mut self) {
        self.drag.release();
    }

    fn xr_drag_target(&self, controller_pose: Option<Pose>) -> Option<DragTarget> {
        match self.session.mode() {
            Some(XrMode::ImmersiveVr) => {
                controller_pose.and_then(|p| DragTarget::from_floor_ray(&self.floor, &p.forward_ray()))
            }
            _ => DragTarget::from_surface(&self.last_surface),
        }
    }

    // ---------------- frame ----------------

    /// One render frame: hit-test, then drag, then gamepad. The render call
    /// is the caller's, using the returned snapshot.
    pub fn frame<F>(&mut self, input: FrameInput<'_, F>) -> SceneSnapshot
    where
        F: HitTestFrame<Space = Sp, Source = Src>,
    {
        let uses_hit_test = self.session.mode().is_some_and(|m| m.uses_hit_test());
        self.last_surface = if uses_hit_test {
            self.tracker.update(input.frame, self.session.resources())
        } else {
            SurfacePose::NOT_FOUND
        };

        if self.drag.is_dragging() && self.session.is_active() {
            let target = self.xr_drag_target(input.controller_pose);
            if let Some(handle) = self.handle.as_mut() {
                self.drag.apply(handle, target);
            }
        }

        if let Some(handle) = self.handle.as_mut() {
            self.gamepad
                .update(handle, input.input_sources, &self.config, input.dt);
        }

        self.snapshot()
    }

    pub fn snapshot(&self) -> SceneSnapshot {
        let reticle = self.tracker.reticle();
        SceneSnapshot {
            object: self.handle.as_ref().map(|h| ObjectSnapshot {
                position: h.transform.position.to_array(),
                rotation: h.transform.rotation.to_array(),
                scale: h.transform.scale * node_fit_scale(&h.node),
                placeholder: h.node.is_placeholder(),
                clip_plane: h.clip_plane().map(|p| p.to_array()),
            }),
            reticle: reticle.visible.then(|| reticle.pose.to_matrix().to_cols_array()),
            floor_grid: self.mode.shows_floor_grid(),
            status: self.status.to_string(),
            readout: self.readout(),
        }
    }
}

fn ensure_handle(slot: &mut Option<SceneObjectHandle>) -> &mut SceneObjectHandle {
    slot.get_or_insert_with(|| {
        log::info!("[placement] creating placeholder object");
        SceneObjectHandle::new(SceneNode::placeholder())
    })
}

fn node_fit_scale(node: &SceneNode) -> f32 {
    match node.kind {
        NodeKind::Mesh { fit_scale, .. } => fit_scale,
        NodeKind::Placeholder { .. } => 1.0,
    }
}
