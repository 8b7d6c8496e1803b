//! Declarative scene configuration.
//!
//! Every visual variant is one `SceneConfig`: shape table, wave coefficients,
//! particle policy, camera presets and lights. Configs come from the built-in
//! presets or from a TOML file; either way they pass through `validate` before
//! a scene is built from them, so the frame loop never sees a bad value.

use std::path::Path;

use glam::Vec3;
use serde::Deserialize;
use smallvec::{smallvec, SmallVec};
use thiserror::Error;

use crate::color::Rgb;
use crate::constants::*;
use crate::input::InputPolicy;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("smoothing alpha must be in (0, 1], was given {0}")]
    InvalidSmoothing(f32),
    #[error("strands need at least 2 samples, was given {0}")]
    TooFewSamples(usize),
    #[error("the wave field takes 1 to 3 terms, was given {0}")]
    WaveTermCount(usize),
    #[error("particle fade decay must be strictly positive, was given {0}")]
    NonPositiveDecay(f32),
    #[error("particle fade decay must be at least {min}, was given {given}")]
    DecayTooSmall { min: f32, given: f32 },
    #[error("at most {max} particles can spawn per frame, was given {given}")]
    TooManySpawns { max: u32, given: u32 },
    #[error("camera half-height must be positive, was given {0}")]
    NonPositiveHalfHeight(f32),
    #[error("drift bound must be positive on every axis, was given {0:?}")]
    InvalidDriftBound([f32; 3]),
    #[error("camera near plane ({near}) must be in front of the far plane ({far})")]
    InvalidDepthRange { near: f32, far: f32 },
    #[error("camera eye and target must not coincide")]
    DegenerateCamera,
    #[error("at most {max} point lights are supported, was given {given}")]
    TooManyLights { max: usize, given: usize },
    #[error("`{0}` must be finite")]
    NonFinite(&'static str),
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    pub smoothing: f32,
    pub input: InputPolicy,
    pub clear_color: Rgb,
    pub camera: CameraConfig,
    pub shapes: Vec<ShapeConfig>,
    pub waves: WaveConfig,
    pub particles: ParticleConfig,
    pub lighting: LightingConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            smoothing: SMOOTHING_ALPHA,
            input: InputPolicy::Mouse,
            clear_color: Rgb::BLACK,
            camera: CameraConfig::default(),
            shapes: vec![ShapeConfig::default()],
            waves: WaveConfig::default(),
            particles: ParticleConfig::default(),
            lighting: LightingConfig::default(),
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraConfig {
    pub half_height: f32,
    /// Used instead of `half_height` while the viewport is narrower than `mobile_breakpoint`.
    pub mobile_half_height: Option<f32>,
    pub mobile_breakpoint: u32,
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            half_height: HALF_HEIGHT_DESKTOP,
            mobile_half_height: None,
            mobile_breakpoint: MOBILE_BREAKPOINT_PX,
            eye: camera_eye_vec3(),
            target: Vec3::ZERO,
            up: Vec3::Y,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShapeConfig {
    pub size: Vec3,
    pub position: Vec3,
    pub base_rotation: Vec3,
    pub color: Rgb,
    pub emissive: Rgb,
    pub emissive_intensity: f32,
    pub shininess: f32,
    pub motion: MotionConfig,
}

impl Default for ShapeConfig {
    fn default() -> Self {
        Self {
            size: Vec3::from(MONOLITH_SIZE),
            position: Vec3::ZERO,
            base_rotation: Vec3::ZERO,
            color: Rgb::from_hex(0xc8a2c8),
            emissive: Rgb::from_hex(0xff00ff),
            emissive_intensity: 0.4,
            shininess: 100.0,
            motion: MotionConfig::default(),
        }
    }
}

/// Per-shape mapping from the smoothed pointer and the clock onto a transform.
#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MotionConfig {
    /// Radians of rotation about Y per unit of `current.x`.
    pub yaw_gain: f32,
    /// Radians of rotation about X per unit of `current.y`.
    pub pitch_gain: f32,
    /// Negates both pointer terms, for a companion that turns the other way.
    pub mirrored: bool,
    /// Idle spin in radians per second about X, Y and Z.
    pub spin: Vec3,
    pub bob: Option<BobConfig>,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            yaw_gain: MONOLITH_YAW_GAIN,
            pitch_gain: MONOLITH_PITCH_GAIN,
            mirrored: false,
            spin: Vec3::ZERO,
            bob: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BobConfig {
    pub amplitude: f32,
    pub rate: f32,
    #[serde(default)]
    pub phase: f32,
}

/// One `amplitude * sin(frequency * x + time_rate * t + phase)` term.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WaveTerm {
    pub amplitude: f32,
    pub frequency: f32,
    pub time_rate: f32,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WaveConfig {
    pub strand_count: usize,
    pub samples: usize,
    /// Horizontal extent of every strand, centered on the group origin.
    pub span: f32,
    /// Strands are stacked evenly over this height.
    pub vertical_spread: f32,
    pub phase_step: f32,
    pub origin: Vec3,
    pub terms: SmallVec<[WaveTerm; 3]>,
    pub hue_start: f32,
    pub hue_step: f32,
    pub saturation: f32,
    pub lightness: f32,
    pub opacity: f32,
}

impl Default for WaveConfig {
    fn default() -> Self {
        Self {
            strand_count: STRAND_COUNT,
            samples: STRAND_SEGMENTS + 1,
            span: STRAND_SPAN,
            vertical_spread: STRAND_VERTICAL_SPREAD,
            phase_step: STRAND_PHASE_STEP,
            origin: Vec3::new(0.0, 0.0, STRAND_GROUP_Z),
            terms: smallvec![WaveTerm {
                amplitude: 1.2,
                frequency: 0.3,
                time_rate: 1.5,
            }],
            hue_start: 0.5,
            hue_step: 0.005,
            saturation: 0.8,
            lightness: 0.5,
            opacity: 0.4,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParticleConfig {
    Drift(DriftConfig),
    Emitter(EmitterConfig),
}

impl Default for ParticleConfig {
    fn default() -> Self {
        ParticleConfig::Drift(DriftConfig::default())
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DriftConfig {
    pub count: usize,
    /// Half-extent of the wraparound box on each axis.
    pub bound: Vec3,
    /// World units per frame.
    pub velocity: Vec3,
    /// Per-axis random spread added to `velocity` for each particle.
    pub jitter: f32,
    pub seed: u64,
    pub size: f32,
    pub color: Rgb,
    pub opacity: f32,
}

impl Default for DriftConfig {
    fn default() -> Self {
        Self {
            count: DRIFT_PARTICLE_COUNT,
            bound: Vec3::splat(DRIFT_BOUND),
            velocity: Vec3::new(DRIFT_SPEED, 0.0, 0.0),
            jitter: 0.0,
            seed: 42,
            size: PARTICLE_SIZE,
            color: Rgb::WHITE,
            opacity: 0.9,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpawnTrigger {
    #[default]
    EveryFrame,
    /// Only frames that received at least one pointer or touch event.
    OnInput,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmitterConfig {
    /// Life lost per frame. Must be > 0 or the live set would grow forever.
    pub decay: f32,
    pub spawn_per_frame: u32,
    pub trigger: SpawnTrigger,
    /// World units per frame.
    pub velocity: Vec3,
    pub jitter: f32,
    pub seed: u64,
    pub size: f32,
    pub color: Rgb,
    pub opacity: f32,
}

impl Default for EmitterConfig {
    fn default() -> Self {
        Self {
            decay: EMITTER_DECAY,
            spawn_per_frame: 1,
            trigger: SpawnTrigger::EveryFrame,
            velocity: Vec3::ZERO,
            jitter: 0.0,
            seed: 7,
            size: PARTICLE_SIZE * 3.0,
            color: Rgb::WHITE,
            opacity: 1.0,
        }
    }
}

#[derive(Clone, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LightingConfig {
    pub ambient: Rgb,
    pub point_lights: Vec<PointLightConfig>,
}

impl Default for LightingConfig {
    fn default() -> Self {
        Self {
            ambient: Rgb::from_hex(0x222222),
            point_lights: vec![
                PointLightConfig {
                    position: Vec3::new(5.0, 5.0, 10.0),
                    color: Rgb::from_hex(0xff00ff),
                    intensity: 5.0,
                    range: 50.0,
                },
                PointLightConfig {
                    position: Vec3::new(-10.0, -2.0, 5.0),
                    color: Rgb::from_hex(0x00ffff),
                    intensity: 4.0,
                    range: 50.0,
                },
            ],
        }
    }
}

#[derive(Clone, Copy, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PointLightConfig {
    pub position: Vec3,
    pub color: Rgb,
    pub intensity: f32,
    /// Distance at which the light has faded out; 0 means no falloff.
    #[serde(default)]
    pub range: f32,
}

fn finite(value: f32, name: &'static str) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite(name))
    }
}

fn finite_vec(value: Vec3, name: &'static str) -> Result<(), ConfigError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NonFinite(name))
    }
}

impl SceneConfig {
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: SceneConfig = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Rejects every configuration the frame loop cannot run indefinitely.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.smoothing.is_finite() || self.smoothing <= 0.0 || self.smoothing > 1.0 {
            return Err(ConfigError::InvalidSmoothing(self.smoothing));
        }

        let cam = &self.camera;
        for half in std::iter::once(cam.half_height).chain(cam.mobile_half_height) {
            if !half.is_finite() || half <= 0.0 {
                return Err(ConfigError::NonPositiveHalfHeight(half));
            }
        }
        finite_vec(cam.eye, "camera.eye")?;
        finite_vec(cam.target, "camera.target")?;
        finite_vec(cam.up, "camera.up")?;
        finite(cam.near, "camera.near")?;
        finite(cam.far, "camera.far")?;
        if cam.near >= cam.far {
            return Err(ConfigError::InvalidDepthRange {
                near: cam.near,
                far: cam.far,
            });
        }
        let view_dir = cam.target - cam.eye;
        if view_dir.length_squared() <= f32::EPSILON
            || view_dir.cross(cam.up).length_squared() <= f32::EPSILON
        {
            return Err(ConfigError::DegenerateCamera);
        }

        for shape in &self.shapes {
            finite_vec(shape.size, "shapes.size")?;
            finite_vec(shape.position, "shapes.position")?;
            finite_vec(shape.motion.spin, "shapes.motion.spin")?;
            finite(shape.motion.yaw_gain, "shapes.motion.yaw_gain")?;
            finite(shape.motion.pitch_gain, "shapes.motion.pitch_gain")?;
        }

        let waves = &self.waves;
        if waves.samples < 2 {
            return Err(ConfigError::TooFewSamples(waves.samples));
        }
        if waves.terms.is_empty() || waves.terms.len() > 3 {
            return Err(ConfigError::WaveTermCount(waves.terms.len()));
        }
        for term in &waves.terms {
            finite(term.amplitude, "waves.terms.amplitude")?;
            finite(term.frequency, "waves.terms.frequency")?;
            finite(term.time_rate, "waves.terms.time_rate")?;
        }
        finite(waves.span, "waves.span")?;
        finite(waves.phase_step, "waves.phase_step")?;

        match &self.particles {
            ParticleConfig::Drift(drift) => {
                if !drift.bound.is_finite() || drift.bound.min_element() <= 0.0 {
                    return Err(ConfigError::InvalidDriftBound(drift.bound.to_array()));
                }
                finite_vec(drift.velocity, "particles.velocity")?;
                finite(drift.jitter, "particles.jitter")?;
            }
            ParticleConfig::Emitter(emitter) => {
                if !emitter.decay.is_finite() || emitter.decay <= 0.0 {
                    return Err(ConfigError::NonPositiveDecay(emitter.decay));
                }
                // bounds the live set, and with it the particle instance buffer
                if emitter.decay < MIN_EMITTER_DECAY {
                    return Err(ConfigError::DecayTooSmall {
                        min: MIN_EMITTER_DECAY,
                        given: emitter.decay,
                    });
                }
                if emitter.spawn_per_frame > MAX_SPAWN_PER_FRAME {
                    return Err(ConfigError::TooManySpawns {
                        max: MAX_SPAWN_PER_FRAME,
                        given: emitter.spawn_per_frame,
                    });
                }
                finite_vec(emitter.velocity, "particles.velocity")?;
                finite(emitter.jitter, "particles.jitter")?;
            }
        }

        let lights = self.lighting.point_lights.len();
        if lights > MAX_POINT_LIGHTS {
            return Err(ConfigError::TooManyLights {
                max: MAX_POINT_LIGHTS,
                given: lights,
            });
        }
        Ok(())
    }
}
