use crate::constants::CONFIG_SCRIPT_ID;
use nebula_core::{params::clamp_pixel_ratio, NebulaConfig};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

/// devicePixelRatio capped the way the particle sizes expect.
pub fn pixel_ratio() -> f32 {
    web::window()
        .map(|w| clamp_pixel_ratio(w.device_pixel_ratio() as f32))
        .unwrap_or(1.0)
}

pub fn sync_canvas_backing_size(canvas: &web::HtmlCanvasElement) {
    let dpr = pixel_ratio() as f64;
    let rect = canvas.get_bounding_client_rect();
    let w_px = (rect.width() * dpr) as u32;
    let h_px = (rect.height() * dpr) as u32;
    canvas.set_width(w_px.max(1));
    canvas.set_height(h_px.max(1));
}

pub fn wire_canvas_resize(canvas: &web::HtmlCanvasElement) {
    sync_canvas_backing_size(canvas);
    let canvas_resize = canvas.clone();
    let resize_closure = Closure::wrap(Box::new(move || {
        sync_canvas_backing_size(&canvas_resize);
    }) as Box<dyn FnMut()>);
    if let Some(window) = web::window() {
        _ = window
            .add_event_listener_with_callback("resize", resize_closure.as_ref().unchecked_ref());
    }
    resize_closure.forget();
}

pub fn is_mobile() -> bool {
    web::window()
        .and_then(|w| w.navigator().user_agent().ok())
        .map(|ua| is_mobile_user_agent(&ua))
        .unwrap_or(false)
}

pub fn is_mobile_user_agent(ua: &str) -> bool {
    const MARKERS: [&str; 8] = [
        "Android",
        "webOS",
        "iPhone",
        "iPad",
        "iPod",
        "BlackBerry",
        "IEMobile",
        "Opera Mini",
    ];
    MARKERS.iter().any(|m| ua.contains(m))
}

/// Base defaults for this device, overridden by the optional
/// `<script id="nebula-config" type="application/json">` document.
pub fn load_config(document: &web::Document) -> NebulaConfig {
    let base = if is_mobile() {
        NebulaConfig::mobile()
    } else {
        NebulaConfig::default()
    };
    let Some(text) = document
        .get_element_by_id(CONFIG_SCRIPT_ID)
        .and_then(|el| el.text_content())
    else {
        return base;
    };
    match base.merged_with_json(&text) {
        Ok(cfg) => {
            log::info!("[config] loaded #{}", CONFIG_SCRIPT_ID);
            cfg
        }
        Err(e) => {
            log::warn!("[config] ignoring #{}: {}", CONFIG_SCRIPT_ID, e);
            base
        }
    }
}

pub fn toggle_fullscreen(document: &web::Document) {
    if document.fullscreen_element().is_some() {
        document.exit_fullscreen();
    } else if let Some(root) = document.document_element() {
        if let Err(e) = root.request_fullscreen() {
            log::warn!("[keys] fullscreen refused: {:?}", e);
        }
    }
}
