use glam::Vec3;
use monolith_core::{
    CameraConfig, ConfigError, EmitterConfig, InputPolicy, ParticleConfig, Preset, Rgb, Scene,
    SceneConfig, SpawnTrigger,
};

#[test]
fn every_preset_validates_and_builds() {
    for preset in Preset::ALL {
        let config = preset.config();
        config
            .validate()
            .unwrap_or_else(|e| panic!("{preset} failed validation: {e}"));
        let scene = monolith_core::Scene::new(config, 1280, 720).unwrap();
        assert!(!scene.shapes().is_empty(), "{preset} has no shapes");
    }
}

#[test]
fn presets_cover_single_twin_and_triplet() {
    assert_eq!(Preset::Lilac.config().shapes.len(), 1);
    let twin = Preset::Twin.config();
    assert_eq!(twin.shapes.len(), 2);
    assert!(!twin.shapes[0].motion.mirrored);
    assert!(twin.shapes[1].motion.mirrored);
    assert_eq!(Preset::Triplet.config().shapes.len(), 3);
    assert_eq!(Preset::Tilt.config().input, InputPolicy::Tilt);
    assert!(matches!(Preset::Ember.config().particles, ParticleConfig::Emitter(_)));
}

#[test]
fn lilac_defaults() {
    let config = SceneConfig::default();
    assert_eq!(config.smoothing, 0.05);
    assert_eq!(config.camera.half_height, 5.0);
    assert_eq!(config.waves.strand_count, 60);
    assert_eq!(config.waves.samples, 101);
    assert_eq!(config.shapes[0].size, Vec3::new(1.6, 4.0, 1.6));
    assert_eq!(config.lighting.point_lights.len(), 2);
}

#[test]
fn parses_toml_with_hex_and_triple_colors() {
    let source = r#"
        smoothing = 0.1
        input = "tilt"
        clear_color = [0.1, 0.0, 0.2]

        [camera]
        half_height = 6.0
        mobile_half_height = 8.0

        [[shapes]]
        position = [-1.0, 0.0, 0.0]
        color = 0x336699

        [shapes.motion]
        yaw_gain = 2.0
        spin = [0.0, 0.5, 0.0]

        [waves]
        strand_count = 12
        terms = [
            { amplitude = 1.0, frequency = 0.5, time_rate = 2.0 },
            { amplitude = 0.2, frequency = 1.5, time_rate = -1.0 },
        ]

        [particles]
        kind = "emitter"
        decay = 0.05
        trigger = "on_input"
    "#;
    let config = SceneConfig::from_toml_str(source).unwrap();
    assert_eq!(config.smoothing, 0.1);
    assert_eq!(config.input, InputPolicy::Tilt);
    assert_eq!(config.clear_color, Rgb([0.1, 0.0, 0.2]));
    assert_eq!(config.camera.mobile_half_height, Some(8.0));
    assert_eq!(config.shapes.len(), 1);
    assert_eq!(config.shapes[0].color, Rgb::from_hex(0x336699));
    assert_eq!(config.shapes[0].motion.yaw_gain, 2.0);
    // unspecified fields fall back to the defaults
    assert_eq!(config.shapes[0].motion.pitch_gain, 0.5);
    assert_eq!(config.waves.terms.len(), 2);
    assert_eq!(config.waves.samples, 101);
    match config.particles {
        ParticleConfig::Emitter(e) => {
            assert_eq!(e.decay, 0.05);
            assert_eq!(e.trigger, SpawnTrigger::OnInput);
        }
        other => panic!("expected emitter, got {other:?}"),
    }
}

#[test]
fn rejects_unknown_fields() {
    let err = SceneConfig::from_toml_str("smoothin = 0.1").unwrap_err();
    assert!(matches!(err, ConfigError::Parse(_)));
}

fn emitter_toml(body: &str) -> String {
    format!("[particles]\nkind = \"emitter\"\n{body}\n")
}

#[test]
fn rejects_non_positive_decay() {
    let err = SceneConfig::from_toml_str(&emitter_toml("decay = 0.0")).unwrap_err();
    assert!(matches!(err, ConfigError::NonPositiveDecay(d) if d == 0.0));
    let err = SceneConfig::from_toml_str(&emitter_toml("decay = -0.1")).unwrap_err();
    assert!(matches!(err, ConfigError::NonPositiveDecay(_)));
}

#[test]
fn rejects_vanishing_decay_before_sizing_buffers() {
    let err = SceneConfig::from_toml_str(&emitter_toml("decay = 1e-30")).unwrap_err();
    assert!(matches!(err, ConfigError::DecayTooSmall { .. }));

    let config = SceneConfig {
        particles: ParticleConfig::Emitter(EmitterConfig {
            decay: 1e-8,
            spawn_per_frame: 4,
            ..EmitterConfig::default()
        }),
        ..SceneConfig::default()
    };
    assert!(Scene::new(config, 800, 600).is_err());
}

#[test]
fn smallest_accepted_emitter_has_a_modest_capacity() {
    let config = SceneConfig {
        particles: ParticleConfig::Emitter(EmitterConfig {
            decay: monolith_core::MIN_EMITTER_DECAY,
            spawn_per_frame: monolith_core::MAX_SPAWN_PER_FRAME,
            ..EmitterConfig::default()
        }),
        ..SceneConfig::default()
    };
    let scene = Scene::new(config, 800, 600).unwrap();
    assert!(scene.particle_capacity() <= 1_100 * 64);
}

#[test]
fn rejects_too_many_spawns_per_frame() {
    let err = SceneConfig::from_toml_str(&emitter_toml("spawn_per_frame = 100000")).unwrap_err();
    assert!(matches!(err, ConfigError::TooManySpawns { max: 64, given: 100000 }));
}

#[test]
fn rejects_collapsed_depth_range() {
    for (near, far) in [(10.0, 10.0), (50.0, 1.0)] {
        let config = SceneConfig {
            camera: CameraConfig {
                near,
                far,
                ..CameraConfig::default()
            },
            ..SceneConfig::default()
        };
        assert!(matches!(
            Scene::new(config, 800, 600),
            Err(ConfigError::InvalidDepthRange { .. })
        ));
    }
    let err = SceneConfig::from_toml_str("[camera]\nnear = 5.0\nfar = 5.0\n").unwrap_err();
    assert!(matches!(err, ConfigError::InvalidDepthRange { .. }));
}

#[test]
fn every_preset_projection_is_finite() {
    for preset in Preset::ALL {
        let scene = Scene::new(preset.config(), 1280, 720).unwrap();
        assert!(scene.camera().projection_matrix().is_finite(), "{preset}");
    }
}

#[test]
fn rejects_bad_smoothing_and_camera() {
    assert!(matches!(
        SceneConfig::from_toml_str("smoothing = 1.5").unwrap_err(),
        ConfigError::InvalidSmoothing(_)
    ));
    assert!(matches!(
        SceneConfig::from_toml_str("[camera]\nhalf_height = 0.0\n").unwrap_err(),
        ConfigError::NonPositiveHalfHeight(_)
    ));
    assert!(matches!(
        SceneConfig::from_toml_str("[camera]\neye = [0.0, 0.0, 0.0]\n").unwrap_err(),
        ConfigError::DegenerateCamera
    ));
}

#[test]
fn rejects_bad_wave_shape() {
    assert!(matches!(
        SceneConfig::from_toml_str("[waves]\nsamples = 1\n").unwrap_err(),
        ConfigError::TooFewSamples(1)
    ));
    assert!(matches!(
        SceneConfig::from_toml_str("[waves]\nterms = []\n").unwrap_err(),
        ConfigError::WaveTermCount(0)
    ));
}

#[test]
fn rejects_too_many_lights() {
    let mut config = SceneConfig::default();
    let light = config.lighting.point_lights[0];
    config.lighting.point_lights = vec![light; 5];
    assert!(matches!(
        config.validate(),
        Err(ConfigError::TooManyLights { max: 4, given: 5 })
    ));
}

#[test]
fn load_reports_missing_file() {
    let err = SceneConfig::load("/definitely/not/here.toml").unwrap_err();
    assert!(matches!(err, ConfigError::Io(_)));
}
