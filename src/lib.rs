#![cfg(target_arch = "wasm32")]
use nebula_core::{Camera, Clock, FrameDriver, ParticleField, PointerTracker};
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod keymap;
mod lifecycle;
mod overlay;
mod render;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("nebula-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
            if let Some(document) = dom::window_document() {
                overlay::show_error(&document, &format!("Unable to start: {}", e));
            }
        }
    });
    Ok(())
}

fn handle_page_transition(frame_loop: &frame::FrameLoop, transition: lifecycle::PageTransition) {
    use lifecycle::PageTransition;
    match transition {
        PageTransition::Suspend => frame_loop.suspend(),
        PageTransition::Dispose => frame_loop.dispose(),
        PageTransition::Resume => frame_loop.resume(),
        PageTransition::Ignore => {}
    }
}

/// Suspends on a cached `pagehide` and resumes on the matching `pageshow`;
/// a real unload disposes GPU resources.
fn wire_page_lifecycle(frame_loop: frame::FrameLoop) {
    let Some(window) = web::window() else {
        return;
    };

    let hide_loop = frame_loop.clone();
    let on_hide = Closure::wrap(Box::new(move |e: web::PageTransitionEvent| {
        handle_page_transition(&hide_loop, lifecycle::on_page_hide(e.persisted()));
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("pagehide", on_hide.as_ref().unchecked_ref());
    on_hide.forget();

    let on_show = Closure::wrap(Box::new(move |e: web::PageTransitionEvent| {
        handle_page_transition(&frame_loop, lifecycle::on_page_show(e.persisted()));
    }) as Box<dyn FnMut(_)>);
    _ = window.add_event_listener_with_callback("pageshow", on_show.as_ref().unchecked_ref());
    on_show.forget();
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .get_element_by_id(constants::CANVAS_ID)
        .ok_or_else(|| anyhow::anyhow!("missing #{}", constants::CANVAS_ID))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;

    // Maintain canvas internal pixel size to match CSS size * devicePixelRatio
    dom::wire_canvas_resize(&canvas);

    let config = dom::load_config(&document);
    let mut params = config.animation;
    params.pixel_ratio = dom::pixel_ratio();

    let field = ParticleField::new(config.grid, params)?;
    overlay::set_particle_count(&document, field.particle_count());

    let aspect = canvas.width() as f32 / canvas.height().max(1) as f32;
    let camera = Camera::from_settings(&config.camera, aspect);
    let tracker = PointerTracker::new(config.pointer);

    let mut gpu = render::GpuState::new(&canvas, config.post).await?;
    let driver = FrameDriver::new();
    driver.attach(&field, &mut gpu);
    log::info!(
        "[field] {} particles, post={}",
        field.particle_count(),
        gpu.has_post()
    );

    let field = Rc::new(RefCell::new(field));
    let tracker = Rc::new(RefCell::new(tracker));
    let clock = Rc::new(RefCell::new(Clock::new()));

    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        document: document.clone(),
        tracker: tracker.clone(),
    });
    events::wire_global_keydown(events::KeyWiring {
        document: document.clone(),
        field: field.clone(),
        config: Rc::new(config),
    });
    frame::wire_visibility(&document, clock.clone());

    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        document: document.clone(),
        canvas,
        camera,
        field,
        tracker,
        clock,
        driver,
        gpu,
        fps_timer: 0.0,
    }));
    overlay::hide_loading(&document);

    let frame_loop = frame::start_loop(frame_ctx);
    wire_page_lifecycle(frame_loop);
    Ok(())
}
