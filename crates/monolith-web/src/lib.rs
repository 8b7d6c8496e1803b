#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use std::rc::Rc;

use monolith_core::render::GpuRenderer;
use monolith_core::{FrameLoop, Scene};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

pub mod dom;
pub mod events;
pub mod frame;
pub mod input;

use events::Listeners;
use frame::AnimationLoop;

/// Everything the frame callback and the event handlers share.
pub struct SceneState {
    pub frames: FrameLoop,
    pub renderer: GpuRenderer<'static>,
    pub canvas: web::HtmlCanvasElement,
}

struct WebApp {
    state: Rc<RefCell<SceneState>>,
    listeners: Listeners,
    animation: AnimationLoop,
}

impl WebApp {
    fn shutdown(mut self) {
        self.animation.cancel();
        self.listeners.detach_all();
        let mut st = self.state.borrow_mut();
        let SceneState { frames, renderer, .. } = &mut *st;
        frames.dispose(renderer);
        log::info!("[web] scene stopped after {} frames", frames.frames());
    }
}

thread_local! {
    static APP: RefCell<Option<WebApp>> = const { RefCell::new(None) };
}

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("monolith-web starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

/// Stops the frame loop, removes every listener and releases GPU buffers.
#[wasm_bindgen]
pub fn stop_scene() {
    match APP.with(|slot| slot.borrow_mut().take()) {
        Some(app) => app.shutdown(),
        None => log::warn!("[web] stop_scene called with no running scene"),
    }
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = dom::window_document().ok_or_else(|| anyhow::anyhow!("no document"))?;
    let canvas = dom::canvas_by_id(&document, dom::CANVAS_ID)?;
    let preset = dom::preset_from_attribute(canvas.get_attribute("data-preset").as_deref());

    let (width, height) = dom::sync_canvas_backing_size(&canvas);
    let mut scene = Scene::new(preset.config(), width, height)?;
    scene.set_scale_factor(dom::device_pixel_ratio() as f32);

    let instance = wgpu::Instance::default();
    let surface = instance.create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))?;
    let renderer = GpuRenderer::new(&instance, surface, width, height, &scene).await?;
    log::info!("[web] preset {} on {}x{} canvas", preset, width, height);

    let state = Rc::new(RefCell::new(SceneState {
        frames: FrameLoop::with_wall_clock(scene),
        renderer,
        canvas,
    }));
    let mut listeners = Listeners::default();
    events::attach_scene_listeners(&state, &window, &mut listeners)?;
    let animation = AnimationLoop::start(state.clone());

    let previous = APP.with(|slot| {
        slot.borrow_mut().replace(WebApp {
            state,
            listeners,
            animation,
        })
    });
    if let Some(old) = previous {
        old.shutdown();
    }
    Ok(())
}
