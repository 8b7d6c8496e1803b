use std::cell::{Cell, RefCell};
use std::rc::Rc;

use monolith_core::FrameStatus;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::SceneState;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut()>>>>;

/// requestAnimationFrame-driven loop around the scene's `FrameLoop`.
pub struct AnimationLoop {
    callback: FrameCallback,
    handle: Rc<Cell<Option<i32>>>,
}

fn request_frame(callback: &FrameCallback) -> Option<i32> {
    let window = web::window()?;
    let cb = callback.borrow();
    let closure = cb.as_ref()?;
    window
        .request_animation_frame(closure.as_ref().unchecked_ref())
        .ok()
}

fn run_frame(state: &Rc<RefCell<SceneState>>) -> FrameStatus {
    let mut st = state.borrow_mut();
    let SceneState {
        frames,
        renderer,
        canvas,
    } = &mut *st;
    match frames.tick(renderer) {
        Ok(status) => status,
        Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
            renderer.resize(canvas.width(), canvas.height());
            FrameStatus::Continue
        }
        Err(wgpu::SurfaceError::OutOfMemory) => {
            log::error!("[frame] surface out of memory, stopping");
            frames.dispose(renderer);
            FrameStatus::Stopped
        }
        Err(e) => {
            log::warn!("[frame] dropped frame: {:?}", e);
            FrameStatus::Continue
        }
    }
}

impl AnimationLoop {
    pub fn start(state: Rc<RefCell<SceneState>>) -> Self {
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let handle = Rc::new(Cell::new(None));
        let cb = callback.clone();
        let h = handle.clone();
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            h.set(None);
            if run_frame(&state) == FrameStatus::Continue {
                h.set(request_frame(&cb));
            }
        }) as Box<dyn FnMut()>));
        handle.set(request_frame(&callback));
        Self { callback, handle }
    }

    /// Cancels the pending frame and drops the callback, which also breaks
    /// the callback's reference cycle to itself. Must not be called from
    /// inside the callback.
    pub fn cancel(&self) {
        if let Some(id) = self.handle.take() {
            if let Some(w) = web::window() {
                let _ = w.cancel_animation_frame(id);
            }
        }
        self.callback.borrow_mut().take();
    }
}
