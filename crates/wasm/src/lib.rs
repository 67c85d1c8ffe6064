#![deny(unsafe_code)]
//! Browser bindings for the folio animations.
//!
//! Each exported view owns an engine behind a [`Controller`], a
//! `requestAnimationFrame` scheduler and a [`DomView`]. Event listeners and
//! the frame callback hold weak references, so dropping the view (`free()`
//! from JS) cancels the pending frame and detaches every listener.

mod scheduler;
mod view;

use folio_core::{Controller, Engine, EngineError, Input, Viewport};
use folio_particles::{canvas_width, ParticleArt, ParticleParams};
use folio_rocket::params::RocketParams;
use folio_rocket::Rocket;
use scheduler::RafScheduler;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use view::DomView;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, EventTarget, MouseEvent, Window};

fn js_err(e: EngineError) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn report(e: &JsValue) {
    web_sys::console::error_1(e);
}

fn window() -> Result<Window, JsValue> {
    web_sys::window().ok_or_else(|| JsValue::from_str("no global window"))
}

fn window_size(window: &Window) -> Result<(f64, f64), JsValue> {
    let dimension = |v: JsValue, name: &str| {
        v.as_f64()
            .ok_or_else(|| JsValue::from_str(&format!("{name} is not a number")))
    };
    Ok((
        dimension(window.inner_width()?, "innerWidth")?,
        dimension(window.inner_height()?, "innerHeight")?,
    ))
}

fn parse_params(params_json: Option<String>) -> Result<serde_json::Value, JsValue> {
    match params_json {
        None => Ok(serde_json::json!({})),
        Some(text) => serde_json::from_str(&text)
            .map_err(|e| JsValue::from_str(&format!("invalid params JSON: {e}"))),
    }
}

/// Pointer position relative to an element's top-left corner.
fn local_point(client_x: f64, client_y: f64, left: f64, top: f64) -> (f64, f64) {
    (client_x - left, client_y - top)
}

struct Animation<E: Engine> {
    controller: Controller<E>,
    scheduler: RafScheduler,
    view: DomView,
}

impl<E: Engine> Animation<E> {
    /// The rAF callback. A frame that fires is always the pending one, as
    /// cancelled frames never fire.
    fn frame(&mut self) -> Result<(), JsValue> {
        let Some(handle) = self.controller.pending_frame() else {
            return Ok(());
        };
        if self
            .controller
            .on_frame(handle, &mut self.scheduler)
            .map_err(js_err)?
        {
            self.view.render(&self.controller.engine().scene())?;
        }
        Ok(())
    }

    fn apply(&mut self, input: &Input) -> Result<(), JsValue> {
        self.controller.apply(input).map_err(js_err)
    }

    fn start(&mut self) -> Result<(), JsValue> {
        self.controller.start(&mut self.scheduler).map_err(js_err)?;
        Ok(())
    }

    fn stop(&mut self) -> Result<(), JsValue> {
        self.controller.stop(&mut self.scheduler).map_err(js_err)
    }
}

impl Animation<ParticleArt> {
    /// New particle set sized to the container as it is now; the old loop's
    /// pending frame is cancelled before the new loop requests its first one.
    fn regenerate(&mut self) -> Result<(), JsValue> {
        let width = canvas_width(self.view.container().client_width() as f64);
        let next = self
            .controller
            .engine_mut()
            .next_generation(width)
            .map_err(js_err)?;
        self.controller
            .replace(next, &mut self.scheduler)
            .map_err(js_err)?;
        self.view.render(&self.controller.engine().scene())
    }
}

impl<E: Engine> Drop for Animation<E> {
    fn drop(&mut self) {
        let _ = self.controller.stop(&mut self.scheduler);
        self.view.clear();
    }
}

type Shared<E> = Rc<RefCell<Animation<E>>>;

/// Wires the frame callback, draws the first frame and starts the loop.
fn launch<E: Engine + 'static>(engine: E, view: DomView, window: Window) -> Result<Shared<E>, JsValue> {
    let animation = Rc::new(RefCell::new(Animation {
        controller: Controller::new(engine),
        scheduler: RafScheduler::new(window),
        view,
    }));
    let weak = Rc::downgrade(&animation);
    let callback = Closure::<dyn FnMut(f64)>::new(move |_timestamp: f64| {
        if let Some(animation) = weak.upgrade() {
            if let Err(e) = animation.borrow_mut().frame() {
                report(&e);
            }
        }
    });
    {
        let mut guard = animation.borrow_mut();
        let anim = &mut *guard;
        anim.scheduler.set_callback(callback);
        anim.view.render(&anim.controller.engine().scene())?;
        anim.start()?;
    }
    Ok(animation)
}

/// Runs `f` on the animation if it is still alive, logging failures.
fn with_animation<E: Engine>(
    weak: &Weak<RefCell<Animation<E>>>,
    f: impl FnOnce(&mut Animation<E>) -> Result<(), JsValue>,
) {
    if let Some(animation) = weak.upgrade() {
        if let Err(e) = f(&mut animation.borrow_mut()) {
            report(&e);
        }
    }
}

/// An event listener removed from its target on drop.
struct Listener {
    target: EventTarget,
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

impl Listener {
    fn attach(
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, JsValue> {
        let callback = Closure::<dyn FnMut(Event)>::new(handler);
        target.add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())?;
        Ok(Self {
            target: target.clone(),
            kind,
            callback,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.callback.as_ref().unchecked_ref());
    }
}

/// The rocket layer: follows the mouse anywhere on the page and regenerates
/// its wells when the window is resized.
#[wasm_bindgen]
pub struct RocketView {
    // Listeners go first so they detach before the animation drops.
    _listeners: Vec<Listener>,
    animation: Shared<Rocket>,
}

#[wasm_bindgen]
impl RocketView {
    /// `params_json` is an optional JSON object of rocket parameter overrides.
    #[wasm_bindgen(constructor)]
    pub fn new(container_id: &str, seed: u32, params_json: Option<String>) -> Result<RocketView, JsValue> {
        let window = window()?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let view = DomView::attach(document.clone(), container_id)?;
        let (width, height) = window_size(&window)?;
        let params = RocketParams::from_json(&parse_params(params_json)?).map_err(js_err)?;
        let engine = Rocket::new(Viewport::new(width, height).map_err(js_err)?, seed.into(), params)
            .map_err(js_err)?;
        let animation = launch(engine, view, window.clone())?;

        let weak = Rc::downgrade(&animation);
        let on_move = Listener::attach(&document, "mousemove", move |event: Event| {
            let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let input = Input::PointerMove {
                x: mouse.client_x() as f64,
                y: mouse.client_y() as f64,
            };
            with_animation(&weak, |anim| anim.apply(&input));
        })?;

        let weak = Rc::downgrade(&animation);
        let resize_window = window.clone();
        let on_resize = Listener::attach(&window, "resize", move |_event: Event| {
            with_animation(&weak, |anim| {
                let (width, height) = window_size(&resize_window)?;
                anim.apply(&Input::Resize { width, height })
            });
        })?;

        Ok(RocketView {
            _listeners: vec![on_move, on_resize],
            animation,
        })
    }

    pub fn stop(&self) -> Result<(), JsValue> {
        self.animation.borrow_mut().stop()
    }

    pub fn start(&self) -> Result<(), JsValue> {
        self.animation.borrow_mut().start()
    }

    /// Engine state as a JSON string, for debugging from the console.
    pub fn state(&self) -> String {
        self.animation.borrow().controller.engine().state().to_string()
    }
}

/// The particle art: particles orbit the mouse inside the container, return
/// to its centre when the mouse leaves, and regenerate on click.
#[wasm_bindgen]
pub struct ParticleView {
    _listeners: Vec<Listener>,
    animation: Shared<ParticleArt>,
}

#[wasm_bindgen]
impl ParticleView {
    #[wasm_bindgen(constructor)]
    pub fn new(container_id: &str, seed: u32, params_json: Option<String>) -> Result<ParticleView, JsValue> {
        let window = window()?;
        let document = window
            .document()
            .ok_or_else(|| JsValue::from_str("no document"))?;
        let view = DomView::attach(document, container_id)?;
        let container = view.container().clone();
        let width = canvas_width(container.client_width() as f64);
        let params = ParticleParams::from_json(&parse_params(params_json)?).map_err(js_err)?;
        let engine = ParticleArt::new(width, seed.into(), params).map_err(js_err)?;
        let animation = launch(engine, view, window)?;

        let weak = Rc::downgrade(&animation);
        let rect_source = container.clone();
        let on_move = Listener::attach(&container, "mousemove", move |event: Event| {
            let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let rect = rect_source.get_bounding_client_rect();
            let (x, y) = local_point(
                mouse.client_x() as f64,
                mouse.client_y() as f64,
                rect.left(),
                rect.top(),
            );
            with_animation(&weak, |anim| anim.apply(&Input::PointerMove { x, y }));
        })?;

        let weak = Rc::downgrade(&animation);
        let on_leave = Listener::attach(&container, "mouseleave", move |_event: Event| {
            with_animation(&weak, |anim| anim.apply(&Input::PointerLeave));
        })?;

        let weak = Rc::downgrade(&animation);
        let on_click = Listener::attach(&container, "click", move |_event: Event| {
            with_animation(&weak, Animation::<ParticleArt>::regenerate);
        })?;

        Ok(ParticleView {
            _listeners: vec![on_move, on_leave, on_click],
            animation,
        })
    }

    pub fn regenerate(&self) -> Result<(), JsValue> {
        self.animation.borrow_mut().regenerate()
    }

    pub fn stop(&self) -> Result<(), JsValue> {
        self.animation.borrow_mut().stop()
    }

    pub fn start(&self) -> Result<(), JsValue> {
        self.animation.borrow_mut().start()
    }
}
