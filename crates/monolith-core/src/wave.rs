//! Traveling-wave strands.
//!
//! Each strand is a polyline whose samples keep a fixed x coordinate; only the
//! y displacement is recomputed per frame. Recomputing marks the strand dirty
//! and it stays dirty until the render boundary acknowledges an upload, since
//! GPU-side copies are never re-synced implicitly.

use glam::Vec3;
use smallvec::SmallVec;

use crate::color::Rgb;
use crate::config::{WaveConfig, WaveTerm};

/// Sum of the wave terms at static coordinate `x`.
#[inline]
pub fn displacement(terms: &[WaveTerm], x: f32, time: f32, phase_offset: f32) -> f32 {
    terms
        .iter()
        .map(|t| t.amplitude * (t.frequency * x + t.time_rate * time + phase_offset).sin())
        .sum()
}

#[derive(Clone, Debug)]
pub struct WaveStrand {
    vertices: Vec<[f32; 3]>,
    phase_offset: f32,
    origin: Vec3,
    color: [f32; 4],
    dirty: bool,
}

impl WaveStrand {
    /// `count` samples spread evenly over `[-span/2, span/2]`.
    pub fn new(count: usize, span: f32, phase_offset: f32, origin: Vec3, color: [f32; 4]) -> Self {
        let last = (count.max(2) - 1) as f32;
        let vertices = (0..count)
            .map(|i| [(i as f32 / last - 0.5) * span, 0.0, 0.0])
            .collect();
        Self {
            vertices,
            phase_offset,
            origin,
            color,
            dirty: true,
        }
    }

    /// Local-space sample positions `(x, displacement, 0)`, ready for upload.
    pub fn vertices(&self) -> &[[f32; 3]] {
        &self.vertices
    }

    pub fn phase_offset(&self) -> f32 {
        self.phase_offset
    }

    /// World-space offset of the strand's local origin.
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    pub fn color(&self) -> [f32; 4] {
        self.color
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn recompute(&mut self, terms: &[WaveTerm], time: f32) {
        let phase = self.phase_offset;
        for v in &mut self.vertices {
            v[1] = displacement(terms, v[0], time, phase);
        }
        self.dirty = true;
    }
}

/// All strands of one scene, sharing the same wave terms.
#[derive(Clone, Debug)]
pub struct WaveField {
    terms: SmallVec<[WaveTerm; 3]>,
    strands: Vec<WaveStrand>,
}

impl WaveField {
    pub fn new(config: &WaveConfig) -> Self {
        let n = config.strand_count;
        let strands = (0..n)
            .map(|j| {
                let y = (j as f32 / n as f32 - 0.5) * config.vertical_spread;
                let hue = config.hue_start + j as f32 * config.hue_step;
                let color = Rgb::from_hsl(hue, config.saturation, config.lightness)
                    .with_alpha(config.opacity);
                WaveStrand::new(
                    config.samples,
                    config.span,
                    j as f32 * config.phase_step,
                    config.origin + Vec3::new(0.0, y, 0.0),
                    color,
                )
            })
            .collect();
        Self {
            terms: config.terms.clone(),
            strands,
        }
    }

    /// Recompute every sample of every strand for `time`. O(total samples).
    pub fn update(&mut self, time: f32) {
        let terms = &self.terms;
        for strand in &mut self.strands {
            strand.recompute(terms, time);
        }
    }

    pub fn terms(&self) -> &[WaveTerm] {
        &self.terms
    }

    pub fn strands(&self) -> &[WaveStrand] {
        &self.strands
    }

    pub fn sample_count(&self) -> usize {
        self.strands.iter().map(|s| s.vertices.len()).sum()
    }

    /// Strands whose contents changed since their last acknowledged upload.
    pub fn pending_uploads(&self) -> impl Iterator<Item = (usize, &WaveStrand)> + '_ {
        self.strands.iter().enumerate().filter(|(_, s)| s.dirty)
    }

    /// Called by the render boundary once strand `index` has been uploaded.
    pub fn acknowledge(&mut self, index: usize) {
        if let Some(strand) = self.strands.get_mut(index) {
            strand.dirty = false;
        }
    }
}
