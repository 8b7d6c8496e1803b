//! Particle kinematics: an ambient drift pool or a spawn-and-fade emitter.
//!
//! The policy is picked once from the config and never mixed at runtime.

use glam::Vec3;
use rand::prelude::*;

use crate::config::{DriftConfig, EmitterConfig, ParticleConfig, SpawnTrigger};

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    pub position: Vec3,
    /// World units per frame.
    pub velocity: Vec3,
    /// Remaining life in `(0, 1]`. Drift particles stay at 1.
    pub life: f32,
    pub scale: f32,
    pub opacity: f32,
}

/// Wraps `p` back into `[-bound, bound]`; values already inside are unchanged.
#[inline]
pub fn wrap_axis(p: f32, bound: f32) -> f32 {
    if (-bound..=bound).contains(&p) {
        return p;
    }
    (p + bound).rem_euclid(2.0 * bound) - bound
}

fn jittered(rng: &mut StdRng, base: Vec3, jitter: f32) -> Vec3 {
    if jitter == 0.0 {
        return base;
    }
    base + Vec3::new(
        rng.gen_range(-1.0..=1.0),
        rng.gen_range(-1.0..=1.0),
        rng.gen_range(-1.0..=1.0),
    ) * jitter
}

/// Fixed-size pool that drifts at constant velocity and wraps at the bounds.
#[derive(Clone, Debug)]
pub struct DriftPool {
    particles: Vec<Particle>,
    bound: Vec3,
}

impl DriftPool {
    pub fn new(config: &DriftConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(config.seed);
        let b = config.bound;
        let particles = (0..config.count)
            .map(|_| Particle {
                position: Vec3::new(
                    rng.gen_range(-b.x..=b.x),
                    rng.gen_range(-b.y..=b.y),
                    rng.gen_range(-b.z..=b.z),
                ),
                velocity: jittered(&mut rng, config.velocity, config.jitter),
                life: 1.0,
                scale: config.size,
                opacity: config.opacity,
            })
            .collect();
        Self {
            particles,
            bound: config.bound,
        }
    }

    pub fn step(&mut self) {
        let b = self.bound;
        for p in &mut self.particles {
            let next = p.position + p.velocity;
            p.position = Vec3::new(
                wrap_axis(next.x, b.x),
                wrap_axis(next.y, b.y),
                wrap_axis(next.z, b.z),
            );
        }
    }

    pub fn bound(&self) -> Vec3 {
        self.bound
    }
}

/// Unbounded creation, bounded lifetime.
#[derive(Clone, Debug)]
pub struct Emitter {
    particles: Vec<Particle>,
    config: EmitterConfig,
    rng: StdRng,
}

impl Emitter {
    /// `config.decay` must already be validated as strictly positive.
    pub fn new(config: &EmitterConfig) -> Self {
        Self {
            particles: Vec::new(),
            config: config.clone(),
            rng: StdRng::seed_from_u64(config.seed),
        }
    }

    /// Fade and cull existing particles, then spawn new ones at `spawn_at`.
    pub fn step(&mut self, spawn_at: Vec3, input_seen: bool) {
        let decay = self.config.decay;
        let (size, opacity) = (self.config.size, self.config.opacity);
        self.particles.retain_mut(|p| {
            p.life -= decay;
            if p.life <= 0.0 {
                return false;
            }
            p.position += p.velocity;
            p.scale = size * p.life;
            p.opacity = opacity * p.life;
            true
        });

        let spawn = match self.config.trigger {
            SpawnTrigger::EveryFrame => true,
            SpawnTrigger::OnInput => input_seen,
        };
        if spawn {
            for _ in 0..self.config.spawn_per_frame {
                let velocity = jittered(&mut self.rng, self.config.velocity, self.config.jitter);
                self.particles.push(Particle {
                    position: spawn_at,
                    velocity,
                    life: 1.0,
                    scale: size,
                    opacity,
                });
            }
        }
    }

    /// Upper bound on the live set: a particle survives `ceil(1 / decay)` steps,
    /// plus one when repeated f32 subtraction leaves a sliver of life behind.
    pub fn capacity_hint(&self) -> usize {
        let frames = ((1.0 / self.config.decay).ceil() as usize).saturating_add(1);
        frames.saturating_mul(self.config.spawn_per_frame as usize)
    }
}

#[derive(Clone, Debug)]
pub enum ParticleSystem {
    Drift(DriftPool),
    Emitter(Emitter),
}

impl ParticleSystem {
    pub fn new(config: &ParticleConfig) -> Self {
        match config {
            ParticleConfig::Drift(c) => ParticleSystem::Drift(DriftPool::new(c)),
            ParticleConfig::Emitter(c) => ParticleSystem::Emitter(Emitter::new(c)),
        }
    }

    /// One kinematics step. `spawn_at` is only used by the emitter.
    pub fn step(&mut self, spawn_at: Vec3, input_seen: bool) {
        match self {
            ParticleSystem::Drift(pool) => pool.step(),
            ParticleSystem::Emitter(emitter) => emitter.step(spawn_at, input_seen),
        }
    }

    pub fn particles(&self) -> &[Particle] {
        match self {
            ParticleSystem::Drift(pool) => &pool.particles,
            ParticleSystem::Emitter(emitter) => &emitter.particles,
        }
    }

    /// Most particles that can be alive at once, for sizing GPU buffers.
    pub fn capacity_hint(&self) -> usize {
        match self {
            ParticleSystem::Drift(pool) => pool.particles.len(),
            ParticleSystem::Emitter(emitter) => emitter.capacity_hint(),
        }
    }

    pub fn clear(&mut self) {
        match self {
            ParticleSystem::Drift(pool) => pool.particles.clear(),
            ParticleSystem::Emitter(emitter) => emitter.particles.clear(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_keeps_inside_values() {
        assert_eq!(wrap_axis(4.9, 5.0), 4.9);
        assert_eq!(wrap_axis(-5.0, 5.0), -5.0);
        assert_eq!(wrap_axis(5.0, 5.0), 5.0);
    }

    #[test]
    fn wrap_crosses_to_opposite_side() {
        assert!((wrap_axis(5.01, 5.0) + 4.99).abs() < 1e-5);
        assert!((wrap_axis(-5.5, 5.0) - 4.5).abs() < 1e-5);
        // more than a full box per step still lands inside
        assert!((wrap_axis(27.0, 5.0) + 3.0).abs() < 1e-5);
    }

    #[test]
    fn drift_pool_is_deterministic_per_seed() {
        let a = DriftPool::new(&DriftConfig::default());
        let b = DriftPool::new(&DriftConfig::default());
        assert_eq!(a.particles, b.particles);
        let c = DriftPool::new(&DriftConfig {
            seed: 9,
            ..DriftConfig::default()
        });
        assert_ne!(a.particles, c.particles);
    }

    #[test]
    fn emitter_spawns_only_on_input_when_asked() {
        let mut e = Emitter::new(&EmitterConfig {
            trigger: SpawnTrigger::OnInput,
            ..EmitterConfig::default()
        });
        e.step(Vec3::ZERO, false);
        assert!(e.particles.is_empty());
        e.step(Vec3::ONE, true);
        assert_eq!(e.particles.len(), 1);
        assert_eq!(e.particles[0].position, Vec3::ONE);
    }

    #[test]
    fn capacity_hint_saturates_instead_of_overflowing() {
        let e = Emitter::new(&EmitterConfig {
            decay: 1e-30,
            spawn_per_frame: 4,
            ..EmitterConfig::default()
        });
        assert_eq!(e.capacity_hint(), usize::MAX);
    }

    #[test]
    fn emitter_capacity_hint_bounds_live_set() {
        let mut e = Emitter::new(&EmitterConfig {
            decay: 0.1,
            spawn_per_frame: 3,
            ..EmitterConfig::default()
        });
        for _ in 0..200 {
            e.step(Vec3::ZERO, false);
            assert!(e.particles.len() <= e.capacity_hint());
        }
    }
}
