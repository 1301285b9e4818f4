#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use std::rc::Rc;

use place_core::{
    MeshSource, PlacementConfig, PlacementController, PlacementError, SessionEvent, ViewerMode,
    XrMode, DESKTOP_EYE, DESKTOP_FOVY_DEG, DESKTOP_TARGET,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod host;
mod input;
mod overlay;
mod xr;

use constants::*;

pub(crate) type Controller = PlacementController<JsValue, JsValue>;

/// Handles every callback shares. Cheap to clone.
#[derive(Clone)]
pub(crate) struct Viewer {
    pub controller: Rc<RefCell<Controller>>,
    pub host: host::SceneHost,
    pub document: web::Document,
    pub mesh_source: Rc<MeshSource>,
    pub xr_system: Option<JsValue>,
}

impl Viewer {
    pub fn refresh_overlay(&self) {
        let controller = self.controller.borrow();
        overlay::set_status(&self.document, &controller.status().to_string());
        overlay::set_readout(&self.document, controller.readout());
    }

    /// Ask the host for the model unless one is already attached.
    fn load_model_if_needed(&self) {
        let needed = self
            .controller
            .borrow()
            .handle()
            .map_or(true, |h| h.node.is_placeholder());
        if !needed {
            return;
        }
        let viewer = self.clone();
        spawn_local(async move {
            let fit = viewer.controller.borrow().config().model_fit_size;
            let result = host::load_mesh(&viewer.host, &viewer.mesh_source, fit).await;
            viewer.controller.borrow_mut().on_mesh_loaded(result);
            viewer.refresh_overlay();
        });
    }
}

fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    dom::sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        dom::sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

fn wire_reset_button(viewer: &Viewer) {
    let v = viewer.clone();
    dom::add_click_listener(&viewer.document, RESET_BUTTON_ID, move || {
        v.controller.borrow_mut().reset();
        v.refresh_overlay();
    });
}

fn wire_start_button(viewer: &Viewer, mode: XrMode) {
    overlay::set_start_label(&viewer.document, &format!("Start {}", mode.short_name()));
    let v = viewer.clone();
    dom::add_click_listener(&viewer.document, START_BUTTON_ID, move || {
        if !v.controller.borrow().session().can_start() {
            log::debug!("[xr] session already starting or running");
            return;
        }
        // leave Idle before yielding so a second click is refused
        v.controller
            .borrow_mut()
            .on_session_event(SessionEvent::StartRequested(mode));
        v.refresh_overlay();
        spawn_local(start_session(v.clone(), mode));
    });
}

/// Request an immersive session and bring it up: listeners, render loop,
/// model, then reference spaces and hit-testing. The caller has already
/// moved the controller to `Starting`.
async fn start_session(viewer: Viewer, mode: XrMode) {
    let Some(xr_system) = viewer.xr_system.clone() else {
        viewer
            .controller
            .borrow_mut()
            .on_session_event(SessionEvent::Rejected(PlacementError::Unsupported(mode)));
        viewer.refresh_overlay();
        return;
    };

    let overlay_root = viewer.document.get_element_by_id(OVERLAY_ROOT_ID);
    let session = match xr::request_session(&xr_system, mode, overlay_root.as_ref()).await {
        Ok(s) => s,
        Err(e) => {
            viewer
                .controller
                .borrow_mut()
                .on_session_event(SessionEvent::Rejected(e));
            viewer.refresh_overlay();
            return;
        }
    };

    if let Err(e) = viewer.host.attach_session(&session) {
        log::warn!("[xr] host could not attach session: {}", dom::js_error_message(&e));
    }
    viewer
        .controller
        .borrow_mut()
        .on_session_event(SessionEvent::Started);
    viewer.refresh_overlay();
    overlay::hide_start(&viewer.document);

    events::wire_session_events(&session, &viewer);
    let ctx = Rc::new(RefCell::new(frame::FrameContext::new(viewer.clone())));
    frame::start_xr_loop(session.clone(), ctx);
    viewer.load_model_if_needed();

    let event = match xr::acquire_resources(&session, mode).await {
        Ok(resources) => SessionEvent::ResourcesReady(resources),
        Err((partial, error)) => SessionEvent::ResourcesFailed { partial, error },
    };
    viewer.controller.borrow_mut().on_session_event(event);
    viewer.refresh_overlay();
}

fn start_desktop(viewer: &Viewer, canvas: &web::HtmlCanvasElement) {
    overlay::hide_start(&viewer.document);
    viewer
        .host
        .set_desktop_camera(&DESKTOP_EYE, &DESKTOP_TARGET, DESKTOP_FOVY_DEG);
    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        viewer: viewer.clone(),
    });
    viewer.load_model_if_needed();
    frame::start_desktop_loop(Rc::new(RefCell::new(frame::FrameContext::new(viewer.clone()))));
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("place-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas_el = document
        .get_element_by_id(CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", CANVAS_ID))?;
    let canvas: web::HtmlCanvasElement = canvas_el
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    wire_canvas_resize(&canvas);

    let host = host::scene_host(&window)?;

    let xr_system = xr::navigator_xr(&window);
    let (ar, vr) = match &xr_system {
        Some(xr) => (
            xr::is_session_supported(xr, XrMode::ImmersiveAr).await,
            xr::is_session_supported(xr, XrMode::ImmersiveVr).await,
        ),
        None => (false, false),
    };
    let mode = ViewerMode::select(ar, vr);
    log::info!("[xr] ar={} vr={} -> {:?}", ar, vr, mode);

    let controller = Controller::new(PlacementConfig::default(), mode)?;
    let mesh_source = MeshSource::from_params(
        dom::query_param(QUERY_MODEL).as_deref(),
        dom::query_param(QUERY_STL).as_deref(),
    );
    log::info!(
        "[mesh] source {} ({})",
        mesh_source.describe(),
        mesh_source.format().as_str()
    );

    let viewer = Viewer {
        controller: Rc::new(RefCell::new(controller)),
        host,
        document,
        mesh_source: Rc::new(mesh_source),
        xr_system,
    };
    viewer.refresh_overlay();
    wire_reset_button(&viewer);

    match mode.xr_mode() {
        Some(xr_mode) => wire_start_button(&viewer, xr_mode),
        None => start_desktop(&viewer, &canvas),
    }
    Ok(())
}
