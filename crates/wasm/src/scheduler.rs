//! [`FrameScheduler`] backed by `requestAnimationFrame`.

use folio_core::{EngineError, FrameHandle, FrameScheduler};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys::Window;

pub type FrameCallback = Closure<dyn FnMut(f64)>;

/// Every frame it requests invokes the same callback, installed once with
/// [`set_callback`](Self::set_callback).
pub struct RafScheduler {
    window: Window,
    callback: Option<FrameCallback>,
}

impl RafScheduler {
    pub fn new(window: Window) -> Self {
        Self {
            window,
            callback: None,
        }
    }

    pub fn set_callback(&mut self, callback: FrameCallback) {
        self.callback = Some(callback);
    }
}

fn browser_error(what: &str, e: wasm_bindgen::JsValue) -> EngineError {
    EngineError::Scheduler(format!("{what}: {e:?}"))
}

impl FrameScheduler for RafScheduler {
    fn request_frame(&mut self) -> Result<FrameHandle, EngineError> {
        let callback = self
            .callback
            .as_ref()
            .ok_or_else(|| EngineError::Scheduler("no frame callback installed".into()))?;
        let id = self
            .window
            .request_animation_frame(callback.as_ref().unchecked_ref())
            .map_err(|e| browser_error("requestAnimationFrame", e))?;
        // rAF ids are positive i32s.
        Ok(FrameHandle::new(id as u64))
    }

    fn cancel_frame(&mut self, handle: FrameHandle) -> Result<(), EngineError> {
        let id = i32::try_from(handle.id())
            .map_err(|_| EngineError::Scheduler(format!("frame id {} out of range", handle.id())))?;
        self.window
            .cancel_animation_frame(id)
            .map_err(|e| browser_error("cancelAnimationFrame", e))
    }
}
