use glam::Vec2;
use nebula_core::PointerTracker;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

#[derive(Clone)]
pub struct InputWiring {
    pub canvas: web::HtmlCanvasElement,
    pub document: web::Document,
    pub tracker: Rc<RefCell<PointerTracker>>,
}

pub fn wire_input_handlers(w: InputWiring) {
    wire_pointermove(&w);
    wire_enter(&w);
    wire_leave(&w);
    wire_touch(&w);
}

/// Client coordinates relative to the canvas, with the canvas CSS size.
fn canvas_local(canvas: &web::HtmlCanvasElement, client_x: f64, client_y: f64) -> (Vec2, Vec2) {
    let rect = canvas.get_bounding_client_rect();
    let local = Vec2::new(
        (client_x - rect.left()) as f32,
        (client_y - rect.top()) as f32,
    );
    (local, Vec2::new(rect.width() as f32, rect.height() as f32))
}

fn feed_move(w: &InputWiring, client_x: f64, client_y: f64) {
    let (local, viewport) = canvas_local(&w.canvas, client_x, client_y);
    w.tracker
        .borrow_mut()
        .on_pointer_move(local.x, local.y, viewport);
}

fn wire_pointermove(w: &InputWiring) {
    let w2 = w.clone();
    let closure = Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        feed_move(&w2, ev.client_x() as f64, ev.client_y() as f64);
    }) as Box<dyn FnMut(_)>);
    if let Some(wnd) = web::window() {
        _ = wnd.add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    }
    closure.forget();
}

/// Entering the canvas activates the pointer even before it moves.
fn wire_enter(w: &InputWiring) {
    for name in ["pointerenter", "mouseenter"] {
        let w2 = w.clone();
        let closure = Closure::wrap(Box::new(move |ev: web::MouseEvent| {
            feed_move(&w2, ev.client_x() as f64, ev.client_y() as f64);
        }) as Box<dyn FnMut(_)>);
        _ = w
            .canvas
            .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

fn wire_leave(w: &InputWiring) {
    for name in ["pointerleave", "mouseleave"] {
        let tracker = w.tracker.clone();
        let closure = Closure::wrap(Box::new(move |_ev: web::Event| {
            tracker.borrow_mut().on_pointer_leave_or_end();
        }) as Box<dyn FnMut(_)>);
        _ = w
            .document
            .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

fn wire_touch(w: &InputWiring) {
    let w2 = w.clone();
    let on_move = Closure::wrap(Box::new(move |ev: web::TouchEvent| {
        if let Some(touch) = ev.touches().get(0) {
            ev.prevent_default();
            feed_move(&w2, touch.client_x() as f64, touch.client_y() as f64);
        }
    }) as Box<dyn FnMut(_)>);
    // not passive: the default pan/zoom is suppressed while steering
    let opts = web::AddEventListenerOptions::new();
    opts.set_passive(false);
    _ = w
        .canvas
        .add_event_listener_with_callback_and_add_event_listener_options(
            "touchmove",
            on_move.as_ref().unchecked_ref(),
            &opts,
        );
    on_move.forget();

    for name in ["touchend", "touchcancel"] {
        let tracker = w.tracker.clone();
        let closure = Closure::wrap(Box::new(move |_ev: web::TouchEvent| {
            tracker.borrow_mut().on_pointer_leave_or_end();
        }) as Box<dyn FnMut(_)>);
        _ = w
            .canvas
            .add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
        closure.forget();
    }
}
