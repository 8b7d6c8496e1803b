//! Pointer and touch normalization.
//!
//! Raw pixel coordinates are mapped into a viewport-independent space where
//! the viewport spans `[-1, 1]` on both axes. Values are never clamped: a drag
//! that leaves the window keeps extrapolating, and downstream consumers are
//! expected to tolerate that.

use glam::Vec2;
use serde::Deserialize;

/// How the vertical pixel axis maps onto the normalized vector.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputPolicy {
    /// Screen-up is positive y.
    #[default]
    Mouse,
    /// Screen-down is positive y, as the "tilt" scenes read it.
    Tilt,
}

/// Pointer vectors consumed by the smoothing filter and the director.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PointerState {
    pub target: Vec2,
    pub current: Vec2,
}

/// Maps pixel `(x, y)` in a `width x height` viewport into normalized space.
///
/// Returns `None` for a degenerate viewport so the caller keeps its last target.
#[inline]
pub fn normalize_pointer(
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    policy: InputPolicy,
) -> Option<Vec2> {
    if width <= 0.0 || height <= 0.0 {
        return None;
    }
    let nx = 2.0 * x / width - 1.0;
    let ny = 2.0 * y / height - 1.0;
    Some(match policy {
        InputPolicy::Mouse => Vec2::new(nx, -ny),
        InputPolicy::Tilt => Vec2::new(nx, ny),
    })
}

/// Writes pointer events into `PointerState::target` (last write wins).
#[derive(Clone, Copy, Debug)]
pub struct InputTracker {
    policy: InputPolicy,
    events_since_frame: u32,
}

impl InputTracker {
    pub fn new(policy: InputPolicy) -> Self {
        Self {
            policy,
            events_since_frame: 0,
        }
    }

    pub fn policy(&self) -> InputPolicy {
        self.policy
    }

    pub fn pointer_moved(
        &mut self,
        state: &mut PointerState,
        x: f32,
        y: f32,
        viewport: (u32, u32),
    ) {
        let (w, h) = viewport;
        if let Some(target) = normalize_pointer(x, y, w as f32, h as f32, self.policy) {
            state.target = target;
            self.events_since_frame += 1;
        }
    }

    /// Only the first touch point steers the scene; the rest are ignored.
    pub fn touch_moved(
        &mut self,
        state: &mut PointerState,
        touches: &[Vec2],
        viewport: (u32, u32),
    ) {
        if let Some(first) = touches.first() {
            self.pointer_moved(state, first.x, first.y, viewport);
        }
    }

    /// Number of accepted events since the last frame; resets the counter.
    pub fn take_event_count(&mut self) -> u32 {
        std::mem::take(&mut self.events_since_frame)
    }
}

/// Phase of a touch contact as reported by the host windowing layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TouchPhase {
    Started,
    Moved,
    Ended,
    Cancelled,
}

/// Follows the touch that went down first while no other touch was active.
///
/// Hosts that report every contact separately (winit) use this to get the
/// "first touch point only" behaviour browsers give through `touches[0]`.
#[derive(Clone, Copy, Debug, Default)]
pub struct FirstTouch {
    active: Option<u64>,
}

impl FirstTouch {
    /// Returns the position to feed the tracker, if this contact is the tracked one.
    pub fn update(&mut self, id: u64, phase: TouchPhase, position: Vec2) -> Option<Vec2> {
        match phase {
            TouchPhase::Started => {
                if self.active.is_none() {
                    self.active = Some(id);
                    return Some(position);
                }
                None
            }
            TouchPhase::Moved => (self.active == Some(id)).then_some(position),
            TouchPhase::Ended | TouchPhase::Cancelled => {
                if self.active == Some(id) {
                    self.active = None;
                }
                None
            }
        }
    }

    pub fn tracked_id(&self) -> Option<u64> {
        self.active
    }
}
