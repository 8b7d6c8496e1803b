//! DOM listeners that feed the scene. Every listener is kept so it can be
//! removed again when the scene is stopped.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::{dom, input, SceneState};

struct Listener {
    target: web::EventTarget,
    kind: &'static str,
    closure: Closure<dyn FnMut(web::Event)>,
}

#[derive(Default)]
pub struct Listeners {
    entries: Vec<Listener>,
}

impl Listeners {
    pub fn listen(
        &mut self,
        target: &web::EventTarget,
        kind: &'static str,
        handler: impl FnMut(web::Event) + 'static,
    ) -> anyhow::Result<()> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web::Event)>);
        target
            .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
            .map_err(|e| anyhow::anyhow!("add {} listener: {:?}", kind, e))?;
        self.entries.push(Listener {
            target: target.clone(),
            kind,
            closure,
        });
        Ok(())
    }

    pub fn detach_all(&mut self) {
        for l in self.entries.drain(..) {
            let _ = l
                .target
                .remove_event_listener_with_callback(l.kind, l.closure.as_ref().unchecked_ref());
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Drop for Listeners {
    fn drop(&mut self) {
        self.detach_all();
    }
}

/// Pointer and touch listeners go on the window so a drag that leaves the
/// canvas keeps steering. Handlers only touch the pointer target and the
/// viewport; geometry is left to the frame loop.
pub fn attach_scene_listeners(
    state: &Rc<RefCell<SceneState>>,
    window: &web::Window,
    listeners: &mut Listeners,
) -> anyhow::Result<()> {
    let s = state.clone();
    listeners.listen(window, "pointermove", move |ev| {
        let Some(ev) = ev.dyn_ref::<web::PointerEvent>() else {
            return;
        };
        let mut st = s.borrow_mut();
        if let Some(p) = input::pointer_canvas_px(ev, &st.canvas) {
            st.frames.scene_mut().pointer_moved(p.x, p.y);
        }
    })?;

    let s = state.clone();
    listeners.listen(window, "touchmove", move |ev| {
        let Some(ev) = ev.dyn_ref::<web::TouchEvent>() else {
            return;
        };
        let mut st = s.borrow_mut();
        if let Some(p) = input::first_touch_canvas_px(ev, &st.canvas) {
            st.frames.scene_mut().touch_moved(&[p]);
        }
    })?;

    let s = state.clone();
    listeners.listen(window, "resize", move |_| {
        let mut st = s.borrow_mut();
        let (w, h) = dom::sync_canvas_backing_size(&st.canvas);
        let scene = st.frames.scene_mut();
        // zooming changes devicePixelRatio and fires resize
        scene.set_scale_factor(dom::device_pixel_ratio() as f32);
        if scene.resized(w, h) {
            st.renderer.resize(w, h);
        }
    })?;

    log::info!("[events] attached {} listeners", listeners.len());
    Ok(())
}
