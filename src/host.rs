//! Bridge to the page's scene host: the JS object that owns the renderer and
//! the mesh loaders. The placement logic never touches either directly.

use js_sys::{Promise, Reflect, Uint8Array};
use place_core::{MeshBounds, MeshSource, PlacementError, SceneNode, SceneSnapshot};
use serde::Deserialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

use crate::constants::SCENE_HOST_GLOBAL;
use crate::dom::js_error_message;

#[wasm_bindgen]
extern "C" {
    pub type SceneHost;

    /// Resolves to `{ surfaces, min, max }` once the model is parsed and
    /// attached (hidden) to the host scene.
    #[wasm_bindgen(method, catch, js_name = loadMesh)]
    fn load_mesh(this: &SceneHost, source: &JsValue, format: &str) -> Result<Promise, JsValue>;

    #[wasm_bindgen(method, catch, js_name = renderFrame)]
    fn render_frame(this: &SceneHost, snapshot: &JsValue, frame: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method, catch, js_name = attachSession)]
    pub fn attach_session(this: &SceneHost, session: &JsValue) -> Result<(), JsValue>;

    #[wasm_bindgen(method, js_name = setDesktopCamera)]
    pub fn set_desktop_camera(this: &SceneHost, eye: &[f32], target: &[f32], fovy_deg: f32);
}

/// What the host reports about a loaded model.
#[derive(Debug, Deserialize)]
struct LoadedMesh {
    #[serde(default)]
    surfaces: usize,
    min: [f32; 3],
    max: [f32; 3],
}

pub fn scene_host(window: &web::Window) -> anyhow::Result<SceneHost> {
    let value = Reflect::get(window, &JsValue::from_str(SCENE_HOST_GLOBAL))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    if value.is_undefined() || value.is_null() {
        anyhow::bail!("window.{} is not set", SCENE_HOST_GLOBAL);
    }
    Ok(value.unchecked_into())
}

/// Load the model through the host and describe it as a scene node sized to
/// `fit_size` meters.
pub async fn load_mesh(host: &SceneHost, source: &MeshSource, fit_size: f32) -> Result<SceneNode, PlacementError> {
    let format = source.format();
    let arg: JsValue = match source {
        MeshSource::Url(url) => JsValue::from_str(url),
        MeshSource::Bytes(bytes) => Uint8Array::from(bytes.as_slice()).into(),
    };
    log::info!("[mesh] loading {} as {}", source.describe(), format.as_str());

    let failed = |e: JsValue| PlacementError::MeshLoad(js_error_message(&e));
    let promise = host.load_mesh(&arg, format.as_str()).map_err(failed)?;
    let value = JsFuture::from(promise).await.map_err(failed)?;
    let loaded: LoadedMesh =
        serde_wasm_bindgen::from_value(value).map_err(|e| PlacementError::MeshLoad(e.to_string()))?;

    let bounds = MeshBounds::new(loaded.min.into(), loaded.max.into());
    log::info!(
        "[mesh] {} surfaces, size {:.3?}, fit scale {:.4}",
        loaded.surfaces,
        bounds.size(),
        bounds.fit_scale(fit_size)
    );
    Ok(SceneNode::from_mesh(format, loaded.surfaces, bounds, fit_size))
}

pub fn render(host: &SceneHost, snapshot: &SceneSnapshot, frame: &JsValue) {
    let value = match serde_wasm_bindgen::to_value(snapshot) {
        Ok(v) => v,
        Err(e) => {
            log::warn!("[render] snapshot not serializable: {}", e);
            return;
        }
    };
    if let Err(e) = host.render_frame(&value, frame) {
        log::warn!("[render] renderFrame threw: {}", js_error_message(&e));
    }
}
