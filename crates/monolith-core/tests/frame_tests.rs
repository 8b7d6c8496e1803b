use glam::Vec2;
use monolith_core::{
    EmitterConfig, FixedStepClock, FrameLoop, FrameStatus, FrameView, ParticleConfig,
    RenderTarget, Scene, SceneConfig, SpawnTrigger, WaveConfig, WaveStrand,
};

#[derive(Default)]
struct Recorder {
    uploads: Vec<usize>,
    draws: usize,
    last_particles: usize,
    released: bool,
    fail_on: Option<usize>,
}

impl RenderTarget for Recorder {
    type Error = String;

    fn upload_strand(&mut self, index: usize, _strand: &WaveStrand) -> Result<(), String> {
        if self.fail_on == Some(index) {
            return Err(format!("upload {index} failed"));
        }
        self.uploads.push(index);
        Ok(())
    }

    fn draw(&mut self, view: &FrameView<'_>) -> Result<(), String> {
        self.draws += 1;
        self.last_particles = view.particles.len();
        Ok(())
    }

    fn release(&mut self) {
        self.released = true;
    }
}

fn small_config() -> SceneConfig {
    SceneConfig {
        waves: WaveConfig {
            strand_count: 4,
            samples: 8,
            ..WaveConfig::default()
        },
        ..SceneConfig::default()
    }
}

fn frame_loop(config: SceneConfig) -> FrameLoop<FixedStepClock> {
    let scene = Scene::new(config, 1000, 500).unwrap();
    FrameLoop::new(scene, FixedStepClock::sixty_hz())
}

#[test]
fn tick_uploads_every_recomputed_strand_then_draws() {
    let mut frames = frame_loop(small_config());
    let mut target = Recorder::default();
    assert_eq!(frames.tick(&mut target), Ok(FrameStatus::Continue));
    assert_eq!(target.uploads, vec![0, 1, 2, 3]);
    assert_eq!(target.draws, 1);
    assert_eq!(frames.scene().waves().pending_uploads().count(), 0);

    frames.tick(&mut target).unwrap();
    assert_eq!(target.uploads.len(), 8);
    assert_eq!(frames.frames(), 2);
    assert!((frames.scene().time() - 2.0 / 60.0).abs() < 1e-6);
}

#[test]
fn failed_upload_leaves_strand_pending() {
    let mut frames = frame_loop(small_config());
    let mut target = Recorder {
        fail_on: Some(2),
        ..Recorder::default()
    };
    assert!(frames.tick(&mut target).is_err());
    assert_eq!(target.uploads, vec![0, 1]);
    assert_eq!(target.draws, 0);
    let pending: Vec<usize> = frames.scene().waves().pending_uploads().map(|(i, _)| i).collect();
    assert_eq!(pending, vec![2, 3]);
    assert_eq!(frames.frames(), 0);
}

#[test]
fn stop_makes_ticks_no_ops() {
    let mut frames = frame_loop(small_config());
    let mut target = Recorder::default();
    frames.tick(&mut target).unwrap();
    frames.stop();
    assert!(!frames.is_running());
    assert_eq!(frames.tick(&mut target), Ok(FrameStatus::Stopped));
    assert_eq!(target.draws, 1);
    assert_eq!(frames.frames(), 1);
}

#[test]
fn dispose_releases_target_and_particles() {
    let mut frames = frame_loop(small_config());
    let mut target = Recorder::default();
    frames.tick(&mut target).unwrap();
    assert!(!frames.scene().particles().is_empty());
    frames.dispose(&mut target);
    assert!(target.released);
    assert!(frames.scene().particles().is_empty());
    assert_eq!(frames.tick(&mut target), Ok(FrameStatus::Stopped));
}

#[test]
fn pointer_events_only_move_target_until_next_frame() {
    let mut frames = frame_loop(small_config());
    let mut target = Recorder::default();
    frames.scene_mut().pointer_moved(1000.0, 250.0);
    frames.scene_mut().pointer_moved(750.0, 0.0);
    let pointer = *frames.scene().pointer();
    assert_eq!(pointer.target, Vec2::new(0.5, 1.0));
    assert_eq!(pointer.current, Vec2::ZERO);
    let rest = frames.scene().shapes()[0].rotation;

    frames.tick(&mut target).unwrap();
    let pointer = *frames.scene().pointer();
    assert!(pointer.current.abs_diff_eq(Vec2::new(0.025, 0.05), 1e-6));
    let rot = frames.scene().shapes()[0].rotation;
    assert!((rot.y - (rest.y + 0.025 * 3.5)).abs() < 1e-6);
    assert!((rot.x - (rest.x + 0.05 * 0.5)).abs() < 1e-6);
}

#[test]
fn first_touch_steers_and_others_are_ignored() {
    let mut frames = frame_loop(small_config());
    frames
        .scene_mut()
        .touch_moved(&[Vec2::new(0.0, 500.0), Vec2::new(1000.0, 0.0)]);
    assert_eq!(frames.scene().pointer().target, Vec2::new(-1.0, -1.0));
    frames.scene_mut().touch_moved(&[]);
    assert_eq!(frames.scene().pointer().target, Vec2::new(-1.0, -1.0));
}

#[test]
fn pointer_outside_viewport_is_not_clamped() {
    let mut frames = frame_loop(small_config());
    frames.scene_mut().pointer_moved(1500.0, -250.0);
    assert_eq!(frames.scene().pointer().target, Vec2::new(2.0, 2.0));
}

#[test]
fn zero_viewport_ignores_pointer_events() {
    let scene = Scene::new(small_config(), 0, 0).unwrap();
    let mut frames = FrameLoop::new(scene, FixedStepClock::sixty_hz());
    frames.scene_mut().pointer_moved(10.0, 10.0);
    assert_eq!(frames.scene().pointer().target, Vec2::ZERO);
    assert!(frames.scene_mut().resized(200, 100));
    frames.scene_mut().pointer_moved(200.0, 0.0);
    assert_eq!(frames.scene().pointer().target, Vec2::new(1.0, 1.0));
}

#[test]
fn on_input_emitter_spawns_under_the_pointer() {
    let config = SceneConfig {
        smoothing: 1.0,
        particles: ParticleConfig::Emitter(EmitterConfig {
            trigger: SpawnTrigger::OnInput,
            ..EmitterConfig::default()
        }),
        ..small_config()
    };
    let mut frames = frame_loop(config);
    let mut target = Recorder::default();

    frames.tick(&mut target).unwrap();
    assert_eq!(target.last_particles, 0);

    frames.scene_mut().pointer_moved(1000.0, 250.0);
    frames.tick(&mut target).unwrap();
    assert_eq!(target.last_particles, 1);
    let expected = frames.scene().camera().unproject(Vec2::new(1.0, 0.0));
    let spawned = frames.scene().particles()[0].position;
    assert!(spawned.abs_diff_eq(expected, 1e-5), "{spawned:?} vs {expected:?}");

    frames.tick(&mut target).unwrap();
    assert_eq!(target.last_particles, 1);
}

#[test]
fn invalid_config_is_rejected_at_setup() {
    let config = SceneConfig {
        particles: ParticleConfig::Emitter(EmitterConfig {
            decay: 0.0,
            ..EmitterConfig::default()
        }),
        ..SceneConfig::default()
    };
    assert!(Scene::new(config, 800, 600).is_err());
}
