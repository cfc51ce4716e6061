use crate::constants::FPS_REFRESH_SEC;
use crate::overlay;
use crate::render::GpuState;
use nebula_core::{Camera, Clock, FrameDriver, FrameOutcome, ParticleField, PointerTracker};
use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

pub struct FrameContext {
    pub document: web::Document,
    pub canvas: web::HtmlCanvasElement,
    pub camera: Camera,
    pub field: Rc<RefCell<ParticleField>>,
    pub tracker: Rc<RefCell<PointerTracker>>,
    pub clock: Rc<RefCell<Clock>>,
    pub driver: FrameDriver,
    pub gpu: GpuState,
    pub fps_timer: f32,
}

impl FrameContext {
    /// Runs one frame. Returns `false` once the driver no longer runs.
    pub fn frame(&mut self) -> bool {
        let dt = self.clock.borrow_mut().tick();

        let w = self.canvas.width();
        let h = self.canvas.height();
        self.gpu.resize_if_needed(w, h);
        self.camera.set_viewport(w as f32, h as f32);
        self.gpu.set_camera(&self.camera);

        let outcome = {
            let mut tracker = self.tracker.borrow_mut();
            let mut field = self.field.borrow_mut();
            self.driver
                .frame(dt, &mut tracker, &mut field, &self.camera, &mut self.gpu)
        };
        if outcome == FrameOutcome::Skipped {
            return self.driver.is_running();
        }

        self.fps_timer += dt;
        if self.fps_timer >= FPS_REFRESH_SEC {
            self.fps_timer = 0.0;
            overlay::set_fps(&self.document, self.clock.borrow().fps());
        }
        true
    }

    pub fn dispose(&mut self) {
        let mut field = self.field.borrow_mut();
        self.driver.dispose(&mut field, &mut self.gpu);
    }
}

type TickClosure = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// Handle to a running `requestAnimationFrame` loop.
#[derive(Clone)]
pub struct FrameLoop {
    ctx: Rc<RefCell<FrameContext>>,
    pending: Rc<Cell<Option<i32>>>,
    tick: TickClosure,
}

fn request_frame(tick: &TickClosure) -> Option<i32> {
    let window = web::window()?;
    let tick = tick.borrow();
    let callback = tick.as_ref()?;
    window
        .request_animation_frame(callback.as_ref().unchecked_ref())
        .ok()
}

pub fn start_loop(ctx: Rc<RefCell<FrameContext>>) -> FrameLoop {
    let pending: Rc<Cell<Option<i32>>> = Rc::new(Cell::new(None));
    let tick: TickClosure = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let ctx_tick = ctx.clone();
    let pending_tick = pending.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        pending_tick.set(None);
        if !ctx_tick.borrow_mut().frame() {
            log::info!("[frame] loop ended");
            return;
        }
        pending_tick.set(request_frame(&tick_clone));
    }) as Box<dyn FnMut()>));
    pending.set(request_frame(&tick));
    FrameLoop { ctx, pending, tick }
}

impl FrameLoop {
    /// Cancels the pending callback and stops the driver.
    pub fn stop(&self) {
        if let Some(id) = self.pending.take() {
            if let Some(w) = web::window() {
                _ = w.cancel_animation_frame(id);
            }
        }
        self.ctx.borrow_mut().driver.stop();
    }

    /// Stops rendering but keeps GPU resources for a later `resume`.
    pub fn suspend(&self) {
        self.stop();
        let ctx = self.ctx.borrow();
        let mut clock = ctx.clock.borrow_mut();
        clock.pause();
        log::info!("[frame] suspended at {:.1}s", clock.elapsed());
    }

    /// Restarts a suspended loop. A disposed loop stays down.
    pub fn resume(&self) {
        let mut ctx = self.ctx.borrow_mut();
        ctx.driver.start();
        if !ctx.driver.is_running() {
            return;
        }
        {
            let mut clock = ctx.clock.borrow_mut();
            if clock.is_paused() {
                clock.resume();
            }
        }
        drop(ctx);
        if self.pending.get().is_none() {
            self.pending.set(request_frame(&self.tick));
            log::info!("[frame] resumed");
        }
    }

    pub fn dispose(&self) {
        self.stop();
        self.ctx.borrow_mut().dispose();
    }
}

/// Pauses the clock while the tab is hidden so the first visible frame does
/// not see the whole hidden interval as its delta.
pub fn wire_visibility(document: &web::Document, clock: Rc<RefCell<Clock>>) {
    let doc = document.clone();
    let closure = Closure::wrap(Box::new(move || {
        let mut clock = clock.borrow_mut();
        if doc.hidden() {
            clock.pause();
            log::debug!("[frame] hidden, clock paused");
        } else {
            clock.resume();
            log::debug!("[frame] visible, clock resumed");
        }
    }) as Box<dyn FnMut()>);
    _ = document
        .add_event_listener_with_callback("visibilitychange", closure.as_ref().unchecked_ref());
    closure.forget();
}
