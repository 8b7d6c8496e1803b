//! The scene context: every component's state in one owned struct.
//!
//! Host event callbacks go through `pointer_moved`, `touch_moved` and
//! `resized`; they only ever touch the pointer target and the camera bounds.
//! Geometry is mutated exclusively by `advance`, called from the frame loop.

use glam::Vec2;

use crate::camera::{OrthoCamera, ViewportController};
use crate::config::{ConfigError, ParticleConfig, SceneConfig};
use crate::director::{ShapeState, TransformDirector};
use crate::frame::{FrameView, RenderTarget};
use crate::input::{InputTracker, PointerState};
use crate::particles::{Particle, ParticleSystem};
use crate::smoothing::SmoothingFilter;
use crate::wave::WaveField;

pub struct Scene {
    config: SceneConfig,
    pointer: PointerState,
    tracker: InputTracker,
    filter: SmoothingFilter,
    director: TransformDirector,
    shapes: Vec<ShapeState>,
    waves: WaveField,
    particles: ParticleSystem,
    viewport: ViewportController,
    time: f32,
}

impl Scene {
    pub fn new(config: SceneConfig, width: u32, height: u32) -> Result<Self, ConfigError> {
        config.validate()?;
        let filter = SmoothingFilter::new(config.smoothing)?;
        let shapes = config.shapes.iter().map(ShapeState::from_config).collect();
        let waves = WaveField::new(&config.waves);
        let particles = ParticleSystem::new(&config.particles);
        log::info!(
            "[scene] shapes={} strands={}x{} particles={} input={:?}",
            config.shapes.len(),
            config.waves.strand_count,
            config.waves.samples,
            match &config.particles {
                ParticleConfig::Drift(d) => format!("drift({})", d.count),
                ParticleConfig::Emitter(e) => format!("emitter(decay={})", e.decay),
            },
            config.input,
        );
        Ok(Self {
            pointer: PointerState::default(),
            tracker: InputTracker::new(config.input),
            filter,
            director: TransformDirector::new(&config.shapes),
            shapes,
            waves,
            particles,
            viewport: ViewportController::new(&config, width, height),
            time: 0.0,
            config,
        })
    }

    pub fn pointer_moved(&mut self, x: f32, y: f32) {
        let viewport = self.viewport.viewport();
        self.tracker.pointer_moved(&mut self.pointer, x, y, viewport);
    }

    /// Touch positions in pixels, in the order the host reports them.
    pub fn touch_moved(&mut self, touches: &[Vec2]) {
        let viewport = self.viewport.viewport();
        self.tracker.touch_moved(&mut self.pointer, touches, viewport);
    }

    /// Viewport size in device pixels.
    pub fn resized(&mut self, width: u32, height: u32) -> bool {
        self.viewport.resize(width, height)
    }

    /// Device pixels per logical pixel, for the mobile breakpoint.
    pub fn set_scale_factor(&mut self, scale_factor: f32) -> bool {
        self.viewport.set_scale_factor(scale_factor)
    }

    /// Runs one frame of animation for clock value `time`:
    /// smoothing, transforms, waves, then particles.
    pub fn advance(&mut self, time: f32) {
        self.time = time;
        let input_seen = self.tracker.take_event_count() > 0;
        self.filter.step(&mut self.pointer);
        self.director.apply(self.pointer.current, time, &mut self.shapes);
        self.waves.update(time);
        let spawn_at = self.viewport.camera().unproject(self.pointer.current);
        self.particles.step(spawn_at, input_seen);
    }

    /// Hands every dirty strand to `target` and acknowledges each successful upload.
    pub fn upload_pending<R: RenderTarget>(&mut self, target: &mut R) -> Result<usize, R::Error> {
        let mut uploaded = 0;
        for index in 0..self.waves.strands().len() {
            let strand = &self.waves.strands()[index];
            if !strand.is_dirty() {
                continue;
            }
            target.upload_strand(index, strand)?;
            self.waves.acknowledge(index);
            uploaded += 1;
        }
        Ok(uploaded)
    }

    pub fn view(&self) -> FrameView<'_> {
        FrameView {
            time: self.time,
            camera: self.viewport.camera(),
            shapes: &self.shapes,
            strands: self.waves.strands(),
            particles: self.particles.particles(),
            particle_color: match &self.config.particles {
                ParticleConfig::Drift(d) => d.color,
                ParticleConfig::Emitter(e) => e.color,
            },
            lighting: &self.config.lighting,
            clear_color: self.config.clear_color,
        }
    }

    pub(crate) fn clear_particles(&mut self) {
        self.particles.clear();
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    pub fn shapes(&self) -> &[ShapeState] {
        &self.shapes
    }

    pub fn waves(&self) -> &WaveField {
        &self.waves
    }

    pub fn particles(&self) -> &[Particle] {
        self.particles.particles()
    }

    pub fn particle_capacity(&self) -> usize {
        self.particles.capacity_hint()
    }

    pub fn camera(&self) -> &OrthoCamera {
        self.viewport.camera()
    }

    pub fn viewport(&self) -> &ViewportController {
        &self.viewport
    }

    pub fn time(&self) -> f32 {
        self.time
    }
}
