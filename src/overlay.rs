use place_core::Readout;
use web_sys as web;

use crate::constants::*;
use crate::dom;

#[inline]
pub fn set_status(document: &web::Document, text: &str) {
    dom::set_text(document, STATUS_ID, text);
}

/// Scale / clipping / lock line. Cleared while nothing is placed.
pub fn set_readout(document: &web::Document, readout: Option<Readout>) {
    let text = readout.map(|r| r.to_string()).unwrap_or_default();
    dom::set_text(document, READOUT_ID, &text);
}

#[inline]
pub fn set_start_label(document: &web::Document, label: &str) {
    dom::set_text(document, START_BUTTON_ID, label);
}

#[inline]
pub fn show_start(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(START_BUTTON_ID) {
        _ = el.class_list().remove_1(HIDDEN_CLASS);
        // fallback for pages without the CSS class
        _ = el.set_attribute("style", "");
    }
}

#[inline]
pub fn hide_start(document: &web::Document) {
    if let Some(el) = document.get_element_by_id(START_BUTTON_ID) {
        _ = el.class_list().add_1(HIDDEN_CLASS);
        _ = el.set_attribute("style", "display:none");
    }
}
