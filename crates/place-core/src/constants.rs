// Tuning constants for placement and manipulation. `PlacementConfig::default()`
// is built from these; the per-frame code reads the config, never these directly.

// Transform bounds
pub const MIN_SCALE: f32 = 0.05;
pub const MAX_SCALE: f32 = 10.0;

// Gamepad manipulation
pub const ROTATION_SENSITIVITY: f32 = 1.5; // radians/sec at full deflection
pub const SCALE_STEP: f32 = 0.02; // per frame while a scale button is held
pub const CLIP_HEIGHT_STEP: f32 = 0.01; // meters per frame at full deflection
pub const CLIP_TURN_STEP: f32 = 1.2; // radians/sec at full deflection

// Number of gamepad buttons tracked for edge detection
pub const TRACKED_BUTTONS: usize = 6;

// Default button layout (Quest-style mapping with generic fallbacks)
pub const BUTTON_SCALE_UP: [usize; 2] = [4, 0];
pub const BUTTON_SCALE_DOWN: [usize; 2] = [5, 1];
pub const BUTTON_LOCK_TOGGLE: usize = 2;
pub const BUTTON_CLIP_TOGGLE: usize = 1;
pub const BUTTON_RESET: usize = 3;

// Stick layout: (x, y) axis indices
pub const ROTATE_AXES: (usize, usize) = (0, 1);
pub const CLIP_AXES: (usize, usize) = (2, 3);

// Drag follow: fraction of the remaining angular distance covered per update
pub const FOLLOW_BLEND: f32 = 0.8;

// Floor plane used by the VR and desktop ray casts
pub const FLOOR_HEIGHT: f32 = 0.0;

// Where a VR session puts an object the user is not currently dragging
pub const VR_START_POSITION: [f32; 3] = [0.0, 0.0, -1.0];

// Placeholder cube and mesh normalization
pub const PLACEHOLDER_CUBE_SIZE: f32 = 0.2; // meters per edge
pub const PLACEHOLDER_COLOR_RGB: [f32; 3] = [0.231, 0.510, 0.965]; // #3b82f6
pub const MODEL_FIT_SIZE: f32 = 0.25; // largest loaded-model dimension, meters

// Frame timing
pub const DEFAULT_FRAME_DT: f32 = 0.016; // used for the first frame

// Desktop preview camera
pub const DESKTOP_EYE: [f32; 3] = [0.6, 1.6, 2.2];
pub const DESKTOP_TARGET: [f32; 3] = [0.0, 1.0, 0.0];
pub const DESKTOP_FOVY_DEG: f32 = 70.0;
pub const DESKTOP_ZNEAR: f32 = 0.01;
pub const DESKTOP_ZFAR: f32 = 20.0;
