//! Gamepad-driven rotate, scale and clip adjustments.
//!
//! Every connected input source contributes; deltas are summed across sources
//! and applied to the handle once per frame. Toggles fire on the released to
//! pressed edge only.

use crate::config::PlacementConfig;
use crate::constants::TRACKED_BUTTONS;
use crate::handle::SceneObjectHandle;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Handedness {
    Left,
    Right,
    #[default]
    Unknown,
}

impl Handedness {
    pub fn parse(s: &str) -> Self {
        match s {
            "left" => Handedness::Left,
            "right" => Handedness::Right,
            _ => Handedness::Unknown,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GamepadButton {
    pub pressed: bool,
    pub value: f32,
}

impl GamepadButton {
    pub fn pressed() -> Self {
        Self {
            pressed: true,
            value: 1.0,
        }
    }
}

/// Snapshot of one gamepad. Out-of-range reads return 0 / not pressed.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Gamepad {
    pub axes: Vec<f32>,
    pub buttons: Vec<GamepadButton>,
}

impl Gamepad {
    pub fn axis(&self, index: usize) -> f32 {
        match self.axes.get(index) {
            Some(v) if v.is_finite() => *v,
            _ => 0.0,
        }
    }

    pub fn is_pressed(&self, index: usize) -> bool {
        self.buttons.get(index).is_some_and(|b| b.pressed)
    }

    pub fn any_pressed(&self, indices: &[usize]) -> bool {
        indices.iter().any(|&i| self.is_pressed(i))
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InputSource {
    pub handedness: Handedness,
    pub gamepad: Option<Gamepad>,
}

/// Sums of all sources' contributions for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FrameDeltas {
    pub pitch: f32,
    pub yaw: f32,
    pub scale: f32,
    pub clip_height: f32,
    pub clip_yaw: f32,
    pub pressed: [bool; TRACKED_BUTTONS],
}

impl FrameDeltas {
    pub fn collect(sources: &[InputSource], config: &PlacementConfig, dt: f32) -> Self {
        let map = &config.buttons;
        let mut d = FrameDeltas::default();
        for gp in sources.iter().filter_map(|s| s.gamepad.as_ref()) {
            let (rx, ry) = map.rotate_axes;
            d.yaw += gp.axis(rx) * config.rotation_sensitivity * dt;
            d.pitch += -gp.axis(ry) * config.rotation_sensitivity * dt;

            if gp.any_pressed(&map.scale_up) {
                d.scale += config.scale_step;
            }
            if gp.any_pressed(&map.scale_down) {
                d.scale -= config.scale_step;
            }

            let (cx, cy) = map.clip_axes;
            d.clip_height += -gp.axis(cy) * config.clip_height_step;
            d.clip_yaw += gp.axis(cx) * config.clip_turn_step * dt;

            for (i, slot) in d.pressed.iter_mut().enumerate() {
                *slot |= gp.is_pressed(i);
            }
        }
        d
    }
}

/// Which toggles fired this frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Toggles {
    pub lock: bool,
    pub clip: bool,
    pub reset: bool,
}

#[derive(Debug, Default)]
pub struct GamepadController;

impl GamepadController {
    pub fn new() -> Self {
        Self
    }

    /// One frame of gamepad manipulation on `handle`. Returns the toggles
    /// that fired so callers can log or react.
    pub fn update(
        &self,
        handle: &mut SceneObjectHandle,
        sources: &[InputSource],
        config: &PlacementConfig,
        dt: f32,
    ) -> Toggles {
        let d = FrameDeltas::collect(sources, config, dt);
        let map = &config.buttons;
        let rising = |i: usize| d.pressed[i] && !handle.previous_buttons[i];
        let toggles = Toggles {
            lock: rising(map.lock_toggle),
            clip: rising(map.clip_toggle),
            reset: rising(map.reset),
        };

        if d.pitch != 0.0 || d.yaw != 0.0 {
            handle.add_euler(d.pitch, d.yaw);
        }
        if d.scale != 0.0 {
            let scaled = handle.scale() * (1.0 + d.scale);
            handle.set_scale(scaled, config.min_scale, config.max_scale);
        }
        handle.clip_height += d.clip_height;
        handle.clip_yaw += d.clip_yaw;

        if toggles.lock {
            handle.placement_locked = !handle.placement_locked;
            log::info!("[gamepad] placement locked={}", handle.placement_locked);
        }
        if toggles.clip {
            handle.clip_enabled = !handle.clip_enabled;
            log::info!("[gamepad] clipping enabled={}", handle.clip_enabled);
        }
        if toggles.reset {
            handle.reset_transform();
            log::info!("[gamepad] transform reset");
        }

        let plane = handle.clip_plane();
        handle.node.set_clip_plane(plane);

        handle.previous_buttons = d.pressed;
        toggles
    }
}
