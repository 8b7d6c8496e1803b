use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use glam::Vec2;
use winit::{
    event::*,
    event_loop::EventLoop,
    keyboard::{Key, NamedKey},
    window::WindowBuilder,
};

use monolith_core::render::GpuRenderer;
use monolith_core::{FirstTouch, FrameLoop, FrameStatus, Preset, Scene, SceneConfig};

/// Ambient monolith scene in a desktop window.
#[derive(Parser, Debug)]
#[command(name = "monolith", version, about)]
struct Cli {
    /// Built-in scene variant: lilac, twin, triplet, ember or tilt.
    #[arg(long, default_value = "lilac")]
    preset: Preset,

    /// TOML scene description; takes precedence over --preset.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Initial window width in logical pixels.
    #[arg(long, default_value_t = 1280)]
    width: u32,

    /// Initial window height in logical pixels.
    #[arg(long, default_value_t = 720)]
    height: u32,
}

impl Cli {
    fn scene_config(&self) -> anyhow::Result<SceneConfig> {
        match &self.config {
            Some(path) => SceneConfig::load(path)
                .with_context(|| format!("loading scene config {}", path.display())),
            None => Ok(self.preset.config()),
        }
    }
}

fn touch_phase(phase: TouchPhase) -> monolith_core::TouchPhase {
    match phase {
        TouchPhase::Started => monolith_core::TouchPhase::Started,
        TouchPhase::Moved => monolith_core::TouchPhase::Moved,
        TouchPhase::Ended => monolith_core::TouchPhase::Ended,
        TouchPhase::Cancelled => monolith_core::TouchPhase::Cancelled,
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cli = Cli::parse();
    let config = cli.scene_config()?;

    let event_loop = EventLoop::new()?;
    let window = Arc::new(
        WindowBuilder::new()
            .with_title("Monolith")
            .with_inner_size(winit::dpi::LogicalSize::new(cli.width, cli.height))
            .build(&event_loop)?,
    );
    let size = window.inner_size();
    let mut scene = Scene::new(config, size.width, size.height)?;
    scene.set_scale_factor(window.scale_factor() as f32);

    let instance = wgpu::Instance::default();
    let surface = instance.create_surface(Arc::clone(&window))?;
    let mut renderer = pollster::block_on(GpuRenderer::new(
        &instance,
        surface,
        size.width,
        size.height,
        &scene,
    ))?;
    let mut frames = FrameLoop::with_wall_clock(scene);
    let mut touch = FirstTouch::default();
    match &cli.config {
        Some(path) => log::info!("[native] scene from {}", path.display()),
        None => log::info!("[native] preset {}", cli.preset),
    }

    event_loop.run(move |event, elwt| match event {
        Event::WindowEvent { event, .. } => match event {
            WindowEvent::CloseRequested
            | WindowEvent::KeyboardInput {
                event:
                    KeyEvent {
                        logical_key: Key::Named(NamedKey::Escape),
                        state: ElementState::Pressed,
                        ..
                    },
                ..
            } => {
                frames.dispose(&mut renderer);
                elwt.exit();
            }
            WindowEvent::Resized(size) => {
                if frames.scene_mut().resized(size.width, size.height) {
                    renderer.resize(size.width, size.height);
                }
            }
            WindowEvent::ScaleFactorChanged { scale_factor, .. } => {
                frames.scene_mut().set_scale_factor(scale_factor as f32);
            }
            WindowEvent::CursorMoved { position, .. } => {
                frames
                    .scene_mut()
                    .pointer_moved(position.x as f32, position.y as f32);
            }
            WindowEvent::Touch(t) => {
                let at = Vec2::new(t.location.x as f32, t.location.y as f32);
                if let Some(p) = touch.update(t.id, touch_phase(t.phase), at) {
                    frames.scene_mut().touch_moved(&[p]);
                }
            }
            WindowEvent::RedrawRequested => match frames.tick(&mut renderer) {
                Ok(FrameStatus::Continue) => {}
                Ok(FrameStatus::Stopped) => elwt.exit(),
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    let size = window.inner_size();
                    renderer.resize(size.width, size.height);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("[native] surface out of memory, shutting down");
                    frames.dispose(&mut renderer);
                    elwt.exit();
                }
                Err(e) => log::warn!("[native] dropped frame: {:?}", e),
            },
            _ => {}
        },
        Event::AboutToWait => {
            if frames.is_running() {
                window.request_redraw();
            }
        }
        _ => {}
    })?;
    Ok(())
}
