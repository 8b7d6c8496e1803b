pub mod camera;
pub mod clock;
pub mod color;
pub mod config;
pub mod constants;
pub mod director;
pub mod frame;
pub mod input;
pub mod particles;
pub mod presets;
pub mod scene;
pub mod smoothing;
pub mod wave;

#[cfg(feature = "gpu")]
pub mod render;

pub static SCENE_WGSL: &str = include_str!("../shaders/scene.wgsl");

pub use camera::{Frustum, OrthoCamera, ViewportController};
pub use clock::{Clock, FixedStepClock, SceneClock};
pub use color::Rgb;
pub use config::*;
pub use constants::*;
pub use director::{ShapeState, TransformDirector};
pub use frame::{FrameLoop, FrameStatus, FrameView, RenderTarget};
pub use input::{
    normalize_pointer, FirstTouch, InputPolicy, InputTracker, PointerState, TouchPhase,
};
pub use particles::{wrap_axis, DriftPool, Emitter, Particle, ParticleSystem};
pub use presets::{Preset, UnknownPreset};
pub use scene::Scene;
pub use smoothing::SmoothingFilter;
pub use wave::{displacement, WaveField, WaveStrand};
