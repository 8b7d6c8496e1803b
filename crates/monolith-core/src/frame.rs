//! The per-frame driver and the boundary it renders through.

use crate::camera::OrthoCamera;
use crate::clock::{Clock, SceneClock};
use crate::color::Rgb;
use crate::config::LightingConfig;
use crate::director::ShapeState;
use crate::particles::Particle;
use crate::scene::Scene;
use crate::wave::WaveStrand;

/// Everything a renderer needs to draw one frame.
pub struct FrameView<'a> {
    pub time: f32,
    pub camera: &'a OrthoCamera,
    pub shapes: &'a [ShapeState],
    pub strands: &'a [WaveStrand],
    pub particles: &'a [Particle],
    pub particle_color: Rgb,
    pub lighting: &'a LightingConfig,
    pub clear_color: Rgb,
}

/// The rendering engine as seen from the animation core.
pub trait RenderTarget {
    type Error;

    /// Copy a strand's vertices to wherever the renderer keeps them. The strand
    /// is only acknowledged, and stops being re-sent, once this returns `Ok`.
    fn upload_strand(&mut self, index: usize, strand: &WaveStrand) -> Result<(), Self::Error>;

    fn draw(&mut self, view: &FrameView<'_>) -> Result<(), Self::Error>;

    /// Drop GPU-side buffers. Called once when the loop is disposed.
    fn release(&mut self);
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FrameStatus {
    /// The frame ran; the host should schedule another one.
    Continue,
    /// The loop has been stopped; the host should not schedule again.
    Stopped,
}

/// Owns the scene and the clock, and holds the only mutable path into them
/// while a frame runs.
pub struct FrameLoop<C: Clock = SceneClock> {
    scene: Scene,
    clock: C,
    running: bool,
    frames: u64,
}

impl FrameLoop<SceneClock> {
    pub fn with_wall_clock(scene: Scene) -> Self {
        Self::new(scene, SceneClock::new())
    }
}

impl<C: Clock> FrameLoop<C> {
    pub fn new(scene: Scene, clock: C) -> Self {
        Self {
            scene,
            clock,
            running: true,
            frames: 0,
        }
    }

    /// Clock tick, animation step, strand uploads, draw.
    pub fn tick<R: RenderTarget>(&mut self, target: &mut R) -> Result<FrameStatus, R::Error> {
        if !self.running {
            return Ok(FrameStatus::Stopped);
        }
        let time = self.clock.tick();
        self.scene.advance(time);
        self.scene.upload_pending(target)?;
        target.draw(&self.scene.view())?;
        self.frames += 1;
        Ok(FrameStatus::Continue)
    }

    /// Later ticks become no-ops that report `Stopped`.
    pub fn stop(&mut self) {
        if self.running {
            log::info!("[frame] stopped after {} frames", self.frames);
        }
        self.running = false;
    }

    /// Stop and let the render target free its buffers.
    pub fn dispose<R: RenderTarget>(&mut self, target: &mut R) {
        self.stop();
        self.scene.clear_particles();
        target.release();
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// For host event callbacks between frames.
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.scene
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }
}
