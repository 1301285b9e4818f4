use smallvec::{smallvec, SmallVec};

use crate::constants::*;
use crate::error::PlacementError;

/// Logical-button to gamepad-index table.
///
/// Browsers disagree on where A/B/X/Y land, so scale buttons accept several
/// indices and count as held when any of them reads pressed. Toggles take a
/// single index because their edges are tracked in a fixed-size snapshot.
#[derive(Clone, Debug, PartialEq)]
pub struct ButtonMapping {
    pub scale_up: SmallVec<[usize; 2]>,
    pub scale_down: SmallVec<[usize; 2]>,
    pub lock_toggle: usize,
    pub clip_toggle: usize,
    pub reset: usize,
    pub rotate_axes: (usize, usize),
    pub clip_axes: (usize, usize),
}

impl Default for ButtonMapping {
    fn default() -> Self {
        Self {
            scale_up: smallvec![BUTTON_SCALE_UP[0], BUTTON_SCALE_UP[1]],
            scale_down: smallvec![BUTTON_SCALE_DOWN[0], BUTTON_SCALE_DOWN[1]],
            lock_toggle: BUTTON_LOCK_TOGGLE,
            clip_toggle: BUTTON_CLIP_TOGGLE,
            reset: BUTTON_RESET,
            rotate_axes: ROTATE_AXES,
            clip_axes: CLIP_AXES,
        }
    }
}

/// Tunables for one viewer instance.
#[derive(Clone, Debug, PartialEq)]
pub struct PlacementConfig {
    pub min_scale: f32,
    pub max_scale: f32,
    pub rotation_sensitivity: f32,
    pub scale_step: f32,
    pub clip_height_step: f32,
    pub clip_turn_step: f32,
    pub follow_blend: f32,
    pub floor_height: f32,
    pub model_fit_size: f32,
    pub buttons: ButtonMapping,
}

impl Default for PlacementConfig {
    fn default() -> Self {
        Self {
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            rotation_sensitivity: ROTATION_SENSITIVITY,
            scale_step: SCALE_STEP,
            clip_height_step: CLIP_HEIGHT_STEP,
            clip_turn_step: CLIP_TURN_STEP,
            follow_blend: FOLLOW_BLEND,
            floor_height: FLOOR_HEIGHT,
            model_fit_size: MODEL_FIT_SIZE,
            buttons: ButtonMapping::default(),
        }
    }
}

impl PlacementConfig {
    pub fn validate(&self) -> Result<(), PlacementError> {
        if !(self.min_scale > 0.0 && self.min_scale <= 1.0 && self.max_scale >= 1.0) {
            return Err(PlacementError::InvalidConfig(format!(
                "scale bounds [{}, {}] must be positive and contain 1",
                self.min_scale, self.max_scale
            )));
        }
        if !(0.0..=1.0).contains(&self.follow_blend) {
            return Err(PlacementError::InvalidConfig(format!(
                "follow blend {} outside [0, 1]",
                self.follow_blend
            )));
        }
        if self.model_fit_size <= 0.0 {
            return Err(PlacementError::InvalidConfig(
                "model fit size must be positive".to_string(),
            ));
        }
        let b = &self.buttons;
        for (name, idx) in [
            ("lock toggle", b.lock_toggle),
            ("clip toggle", b.clip_toggle),
            ("reset", b.reset),
        ] {
            if idx >= TRACKED_BUTTONS {
                return Err(PlacementError::InvalidConfig(format!(
                    "{} button index {} exceeds tracked range 0..{}",
                    name, idx, TRACKED_BUTTONS
                )));
            }
        }
        Ok(())
    }

    pub fn clamp_scale(&self, scale: f32) -> f32 {
        scale.clamp(self.min_scale, self.max_scale)
    }
}
