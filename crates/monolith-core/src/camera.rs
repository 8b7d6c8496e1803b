//! Orthographic camera whose horizontal extent follows the viewport aspect.

use glam::{Mat4, Vec2, Vec3};

use crate::config::SceneConfig;

/// Orthographic frustum bounds in view space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frustum {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    pub near: f32,
    pub far: f32,
}

impl Frustum {
    pub fn half_width(&self) -> f32 {
        self.right
    }

    pub fn half_height(&self) -> f32 {
        self.top
    }
}

/// Right-handed look-at camera with an orthographic projection.
#[derive(Clone, Debug)]
pub struct OrthoCamera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub frustum: Frustum,
}

impl OrthoCamera {
    /// Compute the clip-space projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        let f = &self.frustum;
        Mat4::orthographic_rh(f.left, f.right, f.bottom, f.top, f.near, f.far)
    }

    /// Compute the view matrix that transforms world to view space.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    pub fn forward(&self) -> Vec3 {
        (self.target - self.eye).normalize()
    }

    /// Screen-right in world space; billboards use it with `up_axis`.
    pub fn right_axis(&self) -> Vec3 {
        self.forward().cross(self.up).normalize()
    }

    pub fn up_axis(&self) -> Vec3 {
        self.right_axis().cross(self.forward())
    }

    /// World position under normalized device coordinates on the focal plane
    /// (the plane through `target` facing the camera).
    pub fn unproject(&self, ndc: Vec2) -> Vec3 {
        self.target
            + self.right_axis() * (ndc.x * self.frustum.half_width())
            + self.up_axis() * (ndc.y * self.frustum.half_height())
    }
}

/// Keeps the camera frustum in sync with the viewport.
#[derive(Clone, Debug)]
pub struct ViewportController {
    camera: OrthoCamera,
    viewport: (u32, u32),
    half_height_desktop: f32,
    half_height_mobile: Option<f32>,
    /// Compared against logical pixels, not device pixels.
    mobile_breakpoint: u32,
    /// Device pixels per logical pixel.
    scale_factor: f32,
}

impl ViewportController {
    pub fn new(config: &SceneConfig, width: u32, height: u32) -> Self {
        let cam = &config.camera;
        let mut controller = Self {
            camera: OrthoCamera {
                eye: cam.eye,
                target: cam.target,
                up: cam.up,
                frustum: Frustum {
                    left: -cam.half_height,
                    right: cam.half_height,
                    top: cam.half_height,
                    bottom: -cam.half_height,
                    near: cam.near,
                    far: cam.far,
                },
            },
            viewport: (0, 0),
            half_height_desktop: cam.half_height,
            half_height_mobile: cam.mobile_half_height,
            mobile_breakpoint: cam.mobile_breakpoint,
            scale_factor: 1.0,
        };
        controller.resize(width, height);
        controller
    }

    /// Recompute left/right/top/bottom for a new viewport in device pixels.
    /// Near, far and the camera pose are left alone. A zero-sized viewport is
    /// ignored.
    ///
    /// Returns whether the frustum was updated.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if width == 0 || height == 0 {
            log::warn!("ignoring degenerate viewport {}x{}", width, height);
            return false;
        }
        let half_height = self.half_height_for_width(width);
        let aspect = width as f32 / height as f32;
        let half_width = half_height * aspect;
        let f = &mut self.camera.frustum;
        f.left = -half_width;
        f.right = half_width;
        f.top = half_height;
        f.bottom = -half_height;
        self.viewport = (width, height);
        log::debug!(
            "viewport {}x{} -> frustum half extents ({:.3}, {:.3})",
            width,
            height,
            half_width,
            half_height
        );
        true
    }

    /// Half-height preset for a viewport `width` device pixels wide.
    pub fn half_height_for_width(&self, width: u32) -> f32 {
        let logical_width = width as f32 / self.scale_factor;
        match self.half_height_mobile {
            Some(mobile) if logical_width < self.mobile_breakpoint as f32 => mobile,
            _ => self.half_height_desktop,
        }
    }

    /// Hosts report sizes in device pixels; the breakpoint is in logical ones.
    /// Non-positive or non-finite factors are ignored. Re-evaluates the
    /// frustum for the current viewport and returns whether it was updated.
    pub fn set_scale_factor(&mut self, scale_factor: f32) -> bool {
        if !scale_factor.is_finite() || scale_factor <= 0.0 {
            log::warn!("ignoring scale factor {}", scale_factor);
            return false;
        }
        self.scale_factor = scale_factor;
        let (width, height) = self.viewport;
        self.resize(width, height)
    }

    pub fn scale_factor(&self) -> f32 {
        self.scale_factor
    }

    pub fn camera(&self) -> &OrthoCamera {
        &self.camera
    }

    pub fn frustum(&self) -> Frustum {
        self.camera.frustum
    }

    /// Last accepted viewport size in pixels; `(0, 0)` until a valid resize.
    pub fn viewport(&self) -> (u32, u32) {
        self.viewport
    }

    pub fn aspect(&self) -> f32 {
        self.camera.frustum.right / self.camera.frustum.top
    }
}
