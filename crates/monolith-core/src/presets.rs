//! Built-in scene variants. Each one is plain data fed to the same engine.

use std::fmt;
use std::str::FromStr;

use glam::Vec3;
use smallvec::smallvec;

use crate::color::Rgb;
use crate::config::*;
use crate::constants::*;
use crate::input::InputPolicy;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Preset {
    /// Single lilac monolith, silk strands, drifting dust.
    Lilac,
    /// Two monoliths turning in opposite directions.
    Twin,
    /// Three independently animated slabs over a three-term wave field.
    Triplet,
    /// Pointer leaves a trail of fading embers.
    Ember,
    /// Lilac read with the tilt input convention (screen-down is +y).
    Tilt,
}

impl Preset {
    pub const ALL: [Preset; 5] = [
        Preset::Lilac,
        Preset::Twin,
        Preset::Triplet,
        Preset::Ember,
        Preset::Tilt,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Preset::Lilac => "lilac",
            Preset::Twin => "twin",
            Preset::Triplet => "triplet",
            Preset::Ember => "ember",
            Preset::Tilt => "tilt",
        }
    }

    pub fn config(self) -> SceneConfig {
        match self {
            Preset::Lilac => SceneConfig::default(),
            Preset::Twin => twin(),
            Preset::Triplet => triplet(),
            Preset::Ember => ember(),
            Preset::Tilt => tilt(),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownPreset(pub String);

impl fmt::Display for UnknownPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = Preset::ALL.iter().map(|p| p.name()).collect();
        write!(f, "unknown preset `{}` (expected one of: {})", self.0, names.join(", "))
    }
}

impl std::error::Error for UnknownPreset {}

impl FromStr for Preset {
    type Err = UnknownPreset;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Preset::ALL
            .into_iter()
            .find(|p| p.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownPreset(s.to_string()))
    }
}

fn twin() -> SceneConfig {
    let left = ShapeConfig {
        size: Vec3::new(1.2, 4.4, 1.2),
        position: Vec3::new(-2.2, 0.0, 0.0),
        color: Rgb::from_hex(0x9fb8ff),
        emissive: Rgb::from_hex(0x2040ff),
        ..ShapeConfig::default()
    };
    let right = ShapeConfig {
        position: Vec3::new(2.2, 0.0, 0.0),
        color: Rgb::from_hex(0xffb0d0),
        emissive: Rgb::from_hex(0xff2080),
        motion: MotionConfig {
            mirrored: true,
            ..left.motion.clone()
        },
        ..left.clone()
    };
    SceneConfig {
        smoothing: SMOOTHING_ALPHA_SNAPPY,
        camera: CameraConfig {
            half_height: 6.0,
            mobile_half_height: Some(9.0),
            ..CameraConfig::default()
        },
        shapes: vec![left, right],
        waves: WaveConfig {
            strand_count: 40,
            hue_start: 0.6,
            hue_step: 0.004,
            terms: smallvec![
                WaveTerm {
                    amplitude: 0.9,
                    frequency: 0.25,
                    time_rate: 1.2,
                },
                WaveTerm {
                    amplitude: 0.3,
                    frequency: 0.9,
                    time_rate: 2.1,
                },
            ],
            ..WaveConfig::default()
        },
        ..SceneConfig::default()
    }
}

fn triplet() -> SceneConfig {
    let slab = |x: f32, height: f32, hex: u32, motion: MotionConfig| ShapeConfig {
        size: Vec3::new(1.0, height, 1.0),
        position: Vec3::new(x, 0.0, 0.0),
        color: Rgb::from_hex(hex),
        emissive: Rgb::from_hex(hex),
        emissive_intensity: 0.25,
        shininess: 60.0,
        motion,
        ..ShapeConfig::default()
    };
    SceneConfig {
        camera: CameraConfig {
            half_height: 6.5,
            mobile_half_height: Some(10.0),
            ..CameraConfig::default()
        },
        shapes: vec![
            slab(
                -3.0,
                3.2,
                0x7fffd4,
                MotionConfig {
                    yaw_gain: 2.0,
                    pitch_gain: 0.3,
                    spin: Vec3::new(0.0, 0.2, 0.0),
                    ..MotionConfig::default()
                },
            ),
            slab(
                0.0,
                4.5,
                0xe6e6fa,
                MotionConfig {
                    yaw_gain: 3.5,
                    pitch_gain: 0.5,
                    bob: Some(BobConfig {
                        amplitude: 0.25,
                        rate: 0.8,
                        phase: 0.0,
                    }),
                    ..MotionConfig::default()
                },
            ),
            slab(
                3.0,
                3.2,
                0xffdab9,
                MotionConfig {
                    yaw_gain: 2.0,
                    pitch_gain: 0.3,
                    mirrored: true,
                    spin: Vec3::new(0.0, -0.2, 0.0),
                    ..MotionConfig::default()
                },
            ),
        ],
        waves: WaveConfig {
            strand_count: 48,
            phase_step: 0.2,
            terms: smallvec![
                WaveTerm {
                    amplitude: 0.8,
                    frequency: 0.3,
                    time_rate: 1.5,
                },
                WaveTerm {
                    amplitude: 0.35,
                    frequency: 0.7,
                    time_rate: -0.9,
                },
                WaveTerm {
                    amplitude: 0.15,
                    frequency: 1.6,
                    time_rate: 2.4,
                },
            ],
            ..WaveConfig::default()
        },
        particles: ParticleConfig::Drift(DriftConfig {
            count: 400,
            bound: Vec3::new(20.0, 12.0, 20.0),
            velocity: Vec3::new(0.0, 0.004, 0.0),
            jitter: 0.003,
            ..DriftConfig::default()
        }),
        ..SceneConfig::default()
    }
}

fn ember() -> SceneConfig {
    SceneConfig {
        smoothing: SMOOTHING_ALPHA_SNAPPY,
        clear_color: Rgb::from_hex(0x05020a),
        shapes: vec![ShapeConfig {
            color: Rgb::from_hex(0x2b2b2b),
            emissive: Rgb::from_hex(0xff5a00),
            emissive_intensity: 0.3,
            shininess: 20.0,
            motion: MotionConfig {
                spin: Vec3::new(0.0, 0.1, 0.0),
                ..MotionConfig::default()
            },
            ..ShapeConfig::default()
        }],
        waves: WaveConfig {
            strand_count: 30,
            hue_start: 0.02,
            hue_step: 0.002,
            saturation: 0.9,
            opacity: 0.3,
            ..WaveConfig::default()
        },
        particles: ParticleConfig::Emitter(EmitterConfig {
            decay: EMITTER_DECAY,
            spawn_per_frame: 2,
            trigger: SpawnTrigger::EveryFrame,
            velocity: Vec3::new(0.0, 0.01, 0.0),
            jitter: 0.006,
            color: Rgb::from_hex(0xffa040),
            ..EmitterConfig::default()
        }),
        lighting: LightingConfig {
            ambient: Rgb::from_hex(0x1a0d05),
            point_lights: vec![PointLightConfig {
                position: Vec3::new(4.0, 6.0, 10.0),
                color: Rgb::from_hex(0xff7a20),
                intensity: 6.0,
                range: 60.0,
            }],
        },
        ..SceneConfig::default()
    }
}

fn tilt() -> SceneConfig {
    SceneConfig {
        input: InputPolicy::Tilt,
        camera: CameraConfig {
            mobile_half_height: Some(HALF_HEIGHT_MOBILE),
            ..CameraConfig::default()
        },
        shapes: vec![ShapeConfig {
            motion: MotionConfig {
                spin: Vec3::new(0.0, 0.15, 0.0),
                ..MotionConfig::default()
            },
            ..ShapeConfig::default()
        }],
        ..SceneConfig::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_round_trip_through_from_str() {
        for p in Preset::ALL {
            assert_eq!(p.name().parse::<Preset>().unwrap(), p);
        }
        assert_eq!("  TWIN ".parse::<Preset>().unwrap(), Preset::Twin);
    }

    #[test]
    fn unknown_name_lists_choices() {
        let err = "nope".parse::<Preset>().unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("nope"));
        assert!(msg.contains("lilac"));
    }
}
