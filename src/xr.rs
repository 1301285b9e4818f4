//! WebXR access by property lookup.
//!
//! Session, frame, space and input-source objects are handled as plain
//! `JsValue`s and read through `Reflect`, so a browser that leaves a field out
//! yields `None` instead of throwing.

use js_sys::{Array, Float32Array, Function, Object, Promise, Reflect};
use place_core::{
    Gamepad, GamepadButton, Handedness, HitTestFrame, InputSource, PlacementError, Pose,
    SessionResources, XrMode,
};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

use crate::constants::{LOCAL_SPACE, VIEWER_SPACE};
use crate::dom::js_error_message;

pub type XrResources = SessionResources<JsValue, JsValue>;

fn prop(target: &JsValue, key: &str) -> Option<JsValue> {
    Reflect::get(target, &JsValue::from_str(key))
        .ok()
        .filter(|v| !v.is_undefined() && !v.is_null())
}

fn call(target: &JsValue, method: &str, args: &[&JsValue]) -> Result<JsValue, JsValue> {
    let f: Function = prop(target, method)
        .ok_or_else(|| JsValue::from_str(&format!("{} is not available", method)))?
        .dyn_into()?;
    let argv: Array = args.iter().collect();
    f.apply(target, &argv)
}

async fn call_async(target: &JsValue, method: &str, args: &[&JsValue]) -> Result<JsValue, JsValue> {
    let value = call(target, method, args)?;
    JsFuture::from(Promise::resolve(&value)).await
}

fn set(target: &Object, key: &str, value: &JsValue) -> Result<(), JsValue> {
    Reflect::set(target, &JsValue::from_str(key), value).map(|_| ())
}

/// `navigator.xr`, when the browser exposes WebXR at all.
pub fn navigator_xr(window: &web::Window) -> Option<JsValue> {
    let navigator: JsValue = window.navigator().into();
    prop(&navigator, "xr")
}

pub async fn is_session_supported(xr: &JsValue, mode: XrMode) -> bool {
    match call_async(xr, "isSessionSupported", &[&JsValue::from_str(mode.as_str())]).await {
        Ok(v) => v.as_bool().unwrap_or(false),
        Err(e) => {
            log::debug!("[xr] isSessionSupported({}) threw: {}", mode, js_error_message(&e));
            false
        }
    }
}

fn session_init(mode: XrMode, overlay_root: Option<&web::Element>) -> Result<Object, JsValue> {
    let init = Object::new();
    let required: Array = mode.required_features().iter().map(|f| JsValue::from_str(f)).collect();
    let optional: Array = mode.optional_features().iter().map(|f| JsValue::from_str(f)).collect();
    set(&init, "requiredFeatures", &required)?;
    set(&init, "optionalFeatures", &optional)?;
    if let (XrMode::ImmersiveAr, Some(root)) = (mode, overlay_root) {
        let overlay = Object::new();
        set(&overlay, "root", root.as_ref())?;
        set(&init, "domOverlay", &overlay)?;
    }
    Ok(init)
}

pub async fn request_session(
    xr: &JsValue,
    mode: XrMode,
    overlay_root: Option<&web::Element>,
) -> Result<JsValue, PlacementError> {
    let rejected = |e: JsValue| PlacementError::SessionRejected(js_error_message(&e));
    let init = session_init(mode, overlay_root).map_err(rejected)?;
    call_async(xr, "requestSession", &[&JsValue::from_str(mode.as_str()), init.as_ref()])
        .await
        .map_err(rejected)
}

async fn reference_space(session: &JsValue, kind: &str) -> Result<JsValue, JsValue> {
    call_async(session, "requestReferenceSpace", &[&JsValue::from_str(kind)]).await
}

/// Local space, then (AR only) viewer space and a hit-test source cast from
/// it. Stops at the first failure and hands back what was acquired so far.
pub async fn acquire_resources(
    session: &JsValue,
    mode: XrMode,
) -> Result<XrResources, (XrResources, PlacementError)> {
    let failed = |what: &'static str, e: JsValue| PlacementError::ResourceAcquisition {
        what,
        reason: js_error_message(&e),
    };
    let mut res = XrResources::default();

    match reference_space(session, LOCAL_SPACE).await {
        Ok(space) => res.local_space = Some(space),
        Err(e) => return Err((res, failed("local reference space", e))),
    }
    if !mode.uses_hit_test() {
        return Ok(res);
    }

    let viewer = match reference_space(session, VIEWER_SPACE).await {
        Ok(space) => space,
        Err(e) => return Err((res, failed("viewer reference space", e))),
    };
    res.viewer_space = Some(viewer.clone());

    let opts = Object::new();
    if let Err(e) = set(&opts, "space", &viewer) {
        return Err((res, failed("hit-test source", e)));
    }
    match call_async(session, "requestHitTestSource", &[opts.as_ref()]).await {
        Ok(source) => res.hit_test_source = Some(source),
        Err(e) => return Err((res, failed("hit-test source", e))),
    }
    log::info!("[xr] hit-test source ready");
    Ok(res)
}

/// Rigid transform of an `XRPose` (its `transform.matrix`).
pub fn pose_from_xr_pose(pose: &JsValue) -> Option<Pose> {
    let transform = prop(pose, "transform")?;
    let matrix = prop(&transform, "matrix")?.dyn_into::<Float32Array>().ok()?;
    if matrix.length() != 16 {
        return None;
    }
    let mut cols = [0.0_f32; 16];
    matrix.copy_to(&mut cols);
    Some(Pose::from_cols_array(&cols))
}

/// `frame.getPose(space, base)`.
pub fn frame_pose(frame: &JsValue, space: &JsValue, base: &JsValue) -> Option<Pose> {
    call(frame, "getPose", &[space, base])
        .ok()
        .and_then(|p| pose_from_xr_pose(&p))
}

fn handedness_of(source: &JsValue) -> Handedness {
    prop(source, "handedness")
        .and_then(|h| h.as_string())
        .map(|h| Handedness::parse(&h))
        .unwrap_or_default()
}

fn read_gamepad(gp: &JsValue) -> Gamepad {
    let axes = prop(gp, "axes")
        .map(|a| {
            Array::from(&a)
                .iter()
                .map(|v| v.as_f64().unwrap_or(0.0) as f32)
                .collect()
        })
        .unwrap_or_default();
    let buttons = prop(gp, "buttons")
        .map(|b| {
            Array::from(&b)
                .iter()
                .map(|btn| GamepadButton {
                    pressed: prop(&btn, "pressed").and_then(|p| p.as_bool()).unwrap_or(false),
                    value: prop(&btn, "value").and_then(|v| v.as_f64()).unwrap_or(0.0) as f32,
                })
                .collect()
        })
        .unwrap_or_default();
    Gamepad { axes, buttons }
}

fn source_list(session: &JsValue) -> Vec<JsValue> {
    prop(session, "inputSources")
        .map(|list| Array::from(&list).to_vec())
        .unwrap_or_default()
}

/// Snapshot of every input source's gamepad for this frame.
pub fn input_sources(session: &JsValue) -> Vec<InputSource> {
    source_list(session)
        .iter()
        .map(|src| InputSource {
            handedness: handedness_of(src),
            gamepad: prop(src, "gamepad").map(|gp| read_gamepad(&gp)),
        })
        .collect()
}

/// Target-ray pose of the primary controller (right hand when present).
pub fn controller_pose(frame: &JsValue, session: &JsValue, local_space: &JsValue) -> Option<Pose> {
    let sources = source_list(session);
    let primary = sources
        .iter()
        .find(|s| handedness_of(s) == Handedness::Right)
        .or_else(|| sources.first())?;
    let ray_space = prop(primary, "targetRaySpace")?;
    frame_pose(frame, &ray_space, local_space)
}

/// Pose of the input source that fired a `select*` event.
pub fn select_event_pose(event: &JsValue, local_space: &JsValue) -> Option<Pose> {
    let frame = prop(event, "frame")?;
    let source = prop(event, "inputSource")?;
    let ray_space = prop(&source, "targetRaySpace")?;
    frame_pose(&frame, &ray_space, local_space)
}

pub fn request_animation_frame(session: &JsValue, callback: &JsValue) {
    if let Err(e) = call(session, "requestAnimationFrame", &[callback]) {
        log::warn!("[xr] requestAnimationFrame failed: {}", js_error_message(&e));
    }
}

/// Hit-test view over one `XRFrame`.
pub struct XrFrameView<'a> {
    frame: &'a JsValue,
}

impl<'a> XrFrameView<'a> {
    pub fn new(frame: &'a JsValue) -> Self {
        Self { frame }
    }
}

impl HitTestFrame for XrFrameView<'_> {
    type Space = JsValue;
    type Source = JsValue;
    type Hit = JsValue;

    fn hit_test_results(&self, source: &JsValue) -> Vec<JsValue> {
        call(self.frame, "getHitTestResults", &[source])
            .map(|v| Array::from(&v).to_vec())
            .unwrap_or_default()
    }

    fn hit_pose(&self, hit: &JsValue, space: &JsValue) -> Option<Pose> {
        call(hit, "getPose", &[space])
            .ok()
            .and_then(|p| pose_from_xr_pose(&p))
    }
}
