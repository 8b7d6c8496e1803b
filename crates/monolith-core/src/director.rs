use glam::{EulerRot, Mat4, Quat, Vec2, Vec3};

use crate::color::Rgb;
use crate::config::{MotionConfig, ShapeConfig};

/// Transform and material of one centerpiece shape for the current frame.
#[derive(Clone, Debug)]
pub struct ShapeState {
    pub position: Vec3,
    /// Euler angles in radians, applied X then Y then Z.
    pub rotation: Vec3,
    pub size: Vec3,
    pub color: Rgb,
    pub emissive: Rgb,
    pub emissive_intensity: f32,
    pub shininess: f32,
}

impl ShapeState {
    pub fn from_config(config: &ShapeConfig) -> Self {
        Self {
            position: config.position,
            rotation: config.base_rotation,
            size: config.size,
            color: config.color,
            emissive: config.emissive,
            emissive_intensity: config.emissive_intensity,
            shininess: config.shininess,
        }
    }

    pub fn model_matrix(&self) -> Mat4 {
        let r = self.rotation;
        Mat4::from_scale_rotation_translation(
            self.size,
            Quat::from_euler(EulerRot::XYZ, r.x, r.y, r.z),
            self.position,
        )
    }
}

/// Per-shape motion policy resolved from config.
#[derive(Clone, Debug)]
struct Motion {
    base_position: Vec3,
    base_rotation: Vec3,
    policy: MotionConfig,
}

/// Maps the smoothed pointer and the clock onto shape transforms.
#[derive(Clone, Debug)]
pub struct TransformDirector {
    motions: Vec<Motion>,
}

impl TransformDirector {
    pub fn new(shapes: &[ShapeConfig]) -> Self {
        let motions = shapes
            .iter()
            .map(|s| Motion {
                base_position: s.position,
                base_rotation: s.base_rotation,
                policy: s.motion.clone(),
            })
            .collect();
        Self { motions }
    }

    pub fn apply(&self, current: Vec2, time: f32, shapes: &mut [ShapeState]) {
        for (motion, shape) in self.motions.iter().zip(shapes.iter_mut()) {
            let p = &motion.policy;
            let sign = if p.mirrored { -1.0 } else { 1.0 };
            let base = motion.base_rotation;
            shape.rotation = Vec3::new(
                base.x + sign * current.y * p.pitch_gain + time * p.spin.x,
                base.y + sign * current.x * p.yaw_gain + time * p.spin.y,
                base.z + time * p.spin.z,
            );
            shape.position = motion.base_position;
            if let Some(bob) = p.bob {
                shape.position.y += bob.amplitude * (time * bob.rate + bob.phase).sin();
            }
        }
    }
}
