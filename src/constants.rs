// Page wiring for the viewer: element ids, query keys and the names the XR
// platform expects. Tuning values for placement itself live in
// `place_core::constants`.

// Elements the page must provide
pub const CANVAS_ID: &str = "xr-canvas";
pub const START_BUTTON_ID: &str = "start-xr";
pub const RESET_BUTTON_ID: &str = "reset-model";
pub const STATUS_ID: &str = "status";
pub const READOUT_ID: &str = "readout";
// DOM overlay root handed to immersive-ar sessions
pub const OVERLAY_ROOT_ID: &str = "overlay";

// Query string keys selecting the model
pub const QUERY_MODEL: &str = "model";
pub const QUERY_STL: &str = "stl";

// Global the host page installs before the wasm module starts
pub const SCENE_HOST_GLOBAL: &str = "sceneHost";

// Reference spaces
pub const LOCAL_SPACE: &str = "local";
pub const VIEWER_SPACE: &str = "viewer";

// MouseEvent.button for the primary (left) button
pub const PRIMARY_MOUSE_BUTTON: i16 = 0;

// CSS class toggled on hidden controls
pub const HIDDEN_CLASS: &str = "hidden";
