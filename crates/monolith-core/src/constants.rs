use glam::Vec3;

// Shared tuning defaults used by the presets and by both frontends.

// Input smoothing
pub const SMOOTHING_ALPHA: f32 = 0.05; // per-frame low-pass coefficient
pub const SMOOTHING_ALPHA_SNAPPY: f32 = 0.08;

// Camera
pub const HALF_HEIGHT_DESKTOP: f32 = 5.0; // world units from center to top edge
pub const HALF_HEIGHT_MOBILE: f32 = 7.0;
pub const MOBILE_BREAKPOINT_PX: u32 = 768; // widths below this use the mobile preset
pub const CAMERA_NEAR: f32 = 1.0;
pub const CAMERA_FAR: f32 = 1000.0;
pub const CAMERA_EYE: [f32; 3] = [10.0, 10.0, 20.0];

// Centerpiece
pub const MONOLITH_SIZE: [f32; 3] = [1.6, 4.0, 1.6];
pub const MONOLITH_YAW_GAIN: f32 = 3.5; // radians of yaw per unit of pointer x
pub const MONOLITH_PITCH_GAIN: f32 = 0.5;

// Wave strands
pub const STRAND_COUNT: usize = 60;
pub const STRAND_SEGMENTS: usize = 100; // samples per strand = segments + 1
pub const STRAND_SPAN: f32 = 40.0; // horizontal extent, wide enough to reach the edges
pub const STRAND_VERTICAL_SPREAD: f32 = 6.0;
pub const STRAND_PHASE_STEP: f32 = 0.15;
pub const STRAND_GROUP_Z: f32 = -6.0;

// Particles
pub const DRIFT_PARTICLE_COUNT: usize = 250;
pub const DRIFT_BOUND: f32 = 20.0;
pub const DRIFT_SPEED: f32 = 0.01; // world units per frame along +x
pub const PARTICLE_SIZE: f32 = 0.08;
pub const EMITTER_DECAY: f32 = 0.02; // life lost per frame
pub const MIN_EMITTER_DECAY: f32 = 0.001; // a particle lives at most ~1000 frames
pub const MAX_SPAWN_PER_FRAME: u32 = 64;

// Renderer
pub const MAX_POINT_LIGHTS: usize = 4;

#[inline]
pub fn camera_eye_vec3() -> Vec3 {
    Vec3::from(CAMERA_EYE)
}
