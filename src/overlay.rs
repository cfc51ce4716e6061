use crate::constants::{FPS_ID, INFO_ID, LOADING_ID, PARTICLE_COUNT_ID};
use web_sys as web;

#[inline]
fn show(document: &web::Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        _ = el.class_list().remove_1("hidden");
        // fallback for environments without CSS class
        _ = el.set_attribute("style", "");
    }
}

#[inline]
fn hide(document: &web::Document, id: &str) {
    if let Some(el) = document.get_element_by_id(id) {
        _ = el.class_list().add_1("hidden");
        // fallback
        _ = el.set_attribute("style", "display:none");
    }
}

#[inline]
fn is_hidden(document: &web::Document, id: &str) -> bool {
    if let Some(el) = document.get_element_by_id(id) {
        if el.class_list().contains("hidden") {
            return true;
        }
        return el
            .get_attribute("style")
            .map(|s| s.contains("display:none"))
            .unwrap_or(false);
    }
    false
}

pub fn hide_loading(document: &web::Document) {
    hide(document, LOADING_ID);
}

/// Writes an initialization failure into the loading element and keeps it visible.
pub fn show_error(document: &web::Document, message: &str) {
    if let Some(el) = document.get_element_by_id(LOADING_ID) {
        el.set_text_content(Some(message));
    }
    show(document, LOADING_ID);
}

pub fn toggle_info(document: &web::Document) {
    if is_hidden(document, INFO_ID) {
        show(document, INFO_ID);
    } else {
        hide(document, INFO_ID);
    }
}

pub fn set_particle_count(document: &web::Document, count: usize) {
    if let Some(el) = document.get_element_by_id(PARTICLE_COUNT_ID) {
        el.set_text_content(Some(&count.to_string()));
    }
}

pub fn set_fps(document: &web::Document, fps: f32) {
    if let Some(el) = document.get_element_by_id(FPS_ID) {
        el.set_text_content(Some(&format!("{:.0}", fps)));
    }
}
