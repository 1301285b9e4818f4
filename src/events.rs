use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys as web;

use crate::{input, overlay, xr, Viewer};

// ---------------- desktop mouse ----------------

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub viewer: Viewer,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_mousedown(&w);
    wire_mousemove(&w);
    wire_mouseup(&w);
}

fn wire_mousedown(w: &InputWiring) {
    let w = w.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        if !input::is_primary_button(ev.button()) {
            return;
        }
        let Some(ndc) = input::mouse_ndc(&ev, &w.canvas) else {
            return;
        };
        let camera = input::desktop_camera(&w.canvas);
        w.viewer.controller.borrow_mut().pointer_down(&camera, ndc);
        log::info!("[mouse] begin drag at ({:.2}, {:.2})", ndc.x, ndc.y);
        w.viewer.refresh_overlay();
    }) as Box<dyn FnMut(web::MouseEvent)>);
    _ = w
        .canvas
        .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_mousemove(w: &InputWiring) {
    let w = w.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        if !w.viewer.controller.borrow().is_dragging() {
            return;
        }
        if let Some(ndc) = input::mouse_ndc(&ev, &w.canvas) {
            let camera = input::desktop_camera(&w.canvas);
            w.viewer.controller.borrow_mut().pointer_move(&camera, ndc);
        }
    }) as Box<dyn FnMut(web::MouseEvent)>);
    _ = w
        .canvas
        .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_mouseup(w: &InputWiring) {
    let w = w.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
        if !input::is_primary_button(ev.button()) {
            return;
        }
        let mut controller = w.viewer.controller.borrow_mut();
        if controller.is_dragging() {
            controller.pointer_up();
            log::info!("[mouse] end drag");
        }
    }) as Box<dyn FnMut(web::MouseEvent)>);
    // released outside the canvas still ends the drag
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("mouseup", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

// ---------------- XR session ----------------

fn on_session_event(session: &JsValue, name: &str, handler: impl FnMut(JsValue) + 'static) {
    let mut handler = handler;
    let closure = Closure::wrap(Box::new(move |ev: JsValue| handler(ev)) as Box<dyn FnMut(JsValue)>);
    let target: &web::EventTarget = session.unchecked_ref();
    if let Err(e) = target.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref()) {
        log::warn!("[xr] could not listen for {}: {:?}", name, e);
    }
    closure.forget();
}

/// `selectstart`/`selectend` drive the drag; `end` closes the session.
pub fn wire_session_events(session: &JsValue, viewer: &Viewer) {
    let v = viewer.clone();
    on_session_event(session, "selectstart", move |ev| {
        let pose = {
            let controller = v.controller.borrow();
            controller
                .session()
                .resources()
                .and_then(|r| r.local_space.as_ref())
                .and_then(|space| xr::select_event_pose(&ev, space))
        };
        v.controller.borrow_mut().select_start(pose);
        log::info!("[xr] select start");
        v.refresh_overlay();
    });

    let v = viewer.clone();
    on_session_event(session, "selectend", move |_| {
        v.controller.borrow_mut().select_end();
        log::info!("[xr] select end");
    });

    let v = viewer.clone();
    on_session_event(session, "end", move |_| {
        v.controller
            .borrow_mut()
            .on_session_event(place_core::SessionEvent::Ended);
        v.refresh_overlay();
        overlay::show_start(&v.document);
    });
}
