use std::cell::RefCell;
use std::rc::Rc;

use place_core::{FrameClock, FrameInput, Readout, SceneSnapshot};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

use crate::{host, overlay, xr, Viewer};

pub struct FrameContext {
    pub viewer: Viewer,
    pub clock: FrameClock,
    shown: Option<(String, Option<Readout>)>,
}

impl FrameContext {
    pub fn new(viewer: Viewer) -> Self {
        Self {
            viewer,
            clock: FrameClock::default(),
            shown: None,
        }
    }

    /// One immersive frame: gather input, run the controller, hand the
    /// snapshot to the host together with the `XRFrame` it should draw.
    pub fn xr_frame(&mut self, session: &JsValue, time_ms: f64, frame: &JsValue) {
        let dt = self.clock.tick(time_ms);
        let sources = xr::input_sources(session);
        let snapshot = {
            let mut controller = self.viewer.controller.borrow_mut();
            let local_space = controller
                .session()
                .resources()
                .and_then(|r| r.local_space.clone());
            let controller_pose = local_space
                .as_ref()
                .and_then(|space| xr::controller_pose(frame, session, space));
            let view = xr::XrFrameView::new(frame);
            controller.frame(FrameInput {
                frame: Some(&view),
                dt,
                input_sources: &sources,
                controller_pose,
            })
        };
        self.present(&snapshot, frame);
    }

    pub fn desktop_frame(&mut self, now_ms: f64) {
        let dt = self.clock.tick(now_ms);
        let snapshot = self
            .viewer
            .controller
            .borrow_mut()
            .frame::<xr::XrFrameView<'static>>(FrameInput::desktop(dt));
        self.present(&snapshot, &JsValue::NULL);
    }

    fn present(&mut self, snapshot: &SceneSnapshot, frame: &JsValue) {
        host::render(&self.viewer.host, snapshot, frame);
        // touch the DOM only when the text changes
        let shown = (snapshot.status.clone(), snapshot.readout);
        if self.shown.as_ref() != Some(&shown) {
            overlay::set_status(&self.viewer.document, &shown.0);
            overlay::set_readout(&self.viewer.document, shown.1);
            self.shown = Some(shown);
        }
    }
}

/// Drive `ctx` from the session's own animation frames until it ends.
pub fn start_xr_loop(session: JsValue, ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut(f64, JsValue)>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let session_tick = session.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move |time: f64, frame: JsValue| {
        let mut ctx = ctx.borrow_mut();
        if !ctx.viewer.controller.borrow().session().is_active() {
            log::info!("[frame] xr loop stopped");
            return;
        }
        ctx.xr_frame(&session_tick, time, &frame);
        if let Some(cb) = tick_clone.borrow().as_ref() {
            xr::request_animation_frame(&session_tick, cb.as_ref());
        }
    }) as Box<dyn FnMut(f64, JsValue)>));
    if let Some(cb) = tick.borrow().as_ref() {
        xr::request_animation_frame(&session, cb.as_ref());
    }
    log::info!("[frame] xr loop started");
}

/// Window animation frames for the desktop preview.
pub fn start_desktop_loop(ctx: Rc<RefCell<FrameContext>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        ctx.borrow_mut().desktop_frame(instant::now());
        if let (Some(w), Some(cb)) = (web::window(), tick_clone.borrow().as_ref()) {
            _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
        }
    }) as Box<dyn FnMut()>));
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
