use crate::dom;
use crate::keymap::{self, KeyAction};
use crate::overlay;
use nebula_core::{NebulaConfig, ParticleField};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct KeyWiring {
    pub document: web::Document,
    pub field: Rc<RefCell<ParticleField>>,
    /// Startup configuration; export writes it back with the live animation values.
    pub config: Rc<NebulaConfig>,
}

fn export_settings(w: &KeyWiring) {
    let mut cfg = (*w.config).clone();
    cfg.animation = *w.field.borrow().params();
    match cfg.to_json_pretty() {
        Ok(json) => log::info!("[keys] settings:\n{}", json),
        Err(e) => log::warn!("[keys] export failed: {}", e),
    }
}

pub fn handle_global_keydown(ev: &web::KeyboardEvent, w: &KeyWiring) {
    if ev.ctrl_key() || ev.meta_key() || ev.alt_key() {
        return;
    }
    let key = ev.key();
    let Some(action) = keymap::action_for_key(&key) else {
        return;
    };
    let handled = keymap::apply(action, &mut w.field.borrow_mut());
    if handled {
        let field = w.field.borrow();
        let p = field.params();
        log::info!(
            "[keys] {:?}: mode={:?} curl={:.2} noise={:.2} size={:.1}",
            action,
            p.mode,
            p.curl.curl_strength,
            p.curl.noise_scale,
            p.point_size
        );
        return;
    }
    match action {
        KeyAction::ToggleFullscreen => dom::toggle_fullscreen(&w.document),
        KeyAction::ToggleInfo => overlay::toggle_info(&w.document),
        KeyAction::ExportSettings => export_settings(w),
        _ => {}
    }
}

pub fn wire_global_keydown(w: KeyWiring) {
    let closure = Closure::wrap(Box::new(move |ev: web::KeyboardEvent| {
        handle_global_keydown(&ev, &w);
    }) as Box<dyn FnMut(_)>);
    if let Some(window) = web::window() {
        _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}
