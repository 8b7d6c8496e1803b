use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::{Vec2, Vec3};
use monolith_core::{
    EmitterConfig, ParticleConfig, ParticleSystem, Preset, Scene, WaveConfig, WaveField,
};

/// Benchmark: full wave recompute at increasing strand counts
fn bench_wave_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("wave_update");
    for strands in [15usize, 60, 240] {
        let mut field = WaveField::new(&WaveConfig {
            strand_count: strands,
            ..WaveConfig::default()
        });
        group.bench_with_input(BenchmarkId::from_parameter(strands), &strands, |b, _| {
            let mut t = 0.0f32;
            b.iter(|| {
                t += 1.0 / 60.0;
                field.update(black_box(t));
            })
        });
    }
    group.finish();
}

/// Benchmark: drift pool and a saturated emitter
fn bench_particles(c: &mut Criterion) {
    let mut drift = ParticleSystem::new(&ParticleConfig::default());
    c.bench_function("drift_step_250", |b| {
        b.iter(|| drift.step(black_box(Vec3::ZERO), false))
    });

    let mut emitter = ParticleSystem::new(&ParticleConfig::Emitter(EmitterConfig {
        spawn_per_frame: 4,
        jitter: 0.01,
        ..EmitterConfig::default()
    }));
    for _ in 0..200 {
        emitter.step(Vec3::ZERO, true);
    }
    c.bench_function("emitter_step_saturated", |b| {
        b.iter(|| emitter.step(black_box(Vec3::X), true))
    });
}

/// Benchmark: one animation frame per preset, without rendering
fn bench_scene_advance(c: &mut Criterion) {
    let mut group = c.benchmark_group("scene_advance");
    for preset in Preset::ALL {
        let Ok(mut scene) = Scene::new(preset.config(), 1280, 720) else {
            continue;
        };
        group.bench_function(preset.name(), |b| {
            let mut t = 0.0f32;
            b.iter(|| {
                t += 1.0 / 60.0;
                scene.pointer_moved(640.0 + 300.0 * t.sin(), 360.0);
                scene.advance(black_box(t));
                black_box(scene.pointer().current == Vec2::ZERO)
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_wave_update, bench_particles, bench_scene_advance);
criterion_main!(benches);
