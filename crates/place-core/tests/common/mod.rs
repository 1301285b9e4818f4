// Shared fakes for the placement tests: a scripted XR frame and gamepad
// builders.

#![allow(dead_code)]

use std::cell::Cell;

use glam::{Quat, Vec3};
use place_core::*;

pub type Space = &'static str;
pub type Source = u32;
pub type Controller = PlacementController<Space, Source>;

/// Frame whose hit-test results are fixed up front. Counts platform queries.
pub struct ScriptedFrame {
    pub hits: Vec<Option<Pose>>,
    pub queries: Cell<usize>,
}

impl ScriptedFrame {
    pub fn with_hit(position: Vec3) -> Self {
        Self {
            hits: vec![Some(Pose::new(position, Quat::IDENTITY))],
            queries: Cell::new(0),
        }
    }

    pub fn with_pose(pose: Pose) -> Self {
        Self {
            hits: vec![Some(pose)],
            queries: Cell::new(0),
        }
    }

    pub fn empty() -> Self {
        Self {
            hits: Vec::new(),
            queries: Cell::new(0),
        }
    }
}

impl HitTestFrame for ScriptedFrame {
    type Space = Space;
    type Source = Source;
    type Hit = Option<Pose>;

    fn hit_test_results(&self, _source: &Source) -> Vec<Option<Pose>> {
        self.queries.set(self.queries.get() + 1);
        self.hits.clone()
    }

    fn hit_pose(&self, hit: &Option<Pose>, _space: &Space) -> Option<Pose> {
        *hit
    }
}

pub fn full_resources() -> SessionResources<Space, Source> {
    SessionResources {
        local_space: Some("local"),
        viewer_space: Some("viewer"),
        hit_test_source: Some(7),
    }
}

/// Controller in AR mode with a running session and a hit-test source.
pub fn active_ar_controller() -> Controller {
    let mut c = Controller::new(PlacementConfig::default(), ViewerMode::Ar).unwrap();
    c.on_session_event(SessionEvent::StartRequested(XrMode::ImmersiveAr));
    c.on_session_event(SessionEvent::Started);
    c.on_session_event(SessionEvent::ResourcesReady(full_resources()));
    c
}

pub fn frame_input<'a>(
    frame: &'a ScriptedFrame,
    sources: &'a [InputSource],
    dt: f32,
) -> FrameInput<'a, ScriptedFrame> {
    FrameInput {
        frame: Some(frame),
        dt,
        input_sources: sources,
        controller_pose: None,
    }
}

pub fn gamepad_with_buttons(pressed: &[usize]) -> InputSource {
    let mut buttons = vec![GamepadButton::default(); 6];
    for &i in pressed {
        buttons[i] = GamepadButton::pressed();
    }
    InputSource {
        handedness: Handedness::Right,
        gamepad: Some(Gamepad {
            axes: vec![0.0; 4],
            buttons,
        }),
    }
}

pub fn gamepad_with_axes(axes: [f32; 4]) -> InputSource {
    InputSource {
        handedness: Handedness::Left,
        gamepad: Some(Gamepad {
            axes: axes.to_vec(),
            buttons: vec![GamepadButton::default(); 6],
        }),
    }
}

pub fn placeholder_handle() -> SceneObjectHandle {
    SceneObjectHandle::new(SceneNode::placeholder())
}

pub fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}
