use monolith_core::{displacement, WaveConfig, WaveField, WaveTerm};
use smallvec::smallvec;
use std::f32::consts::PI;

fn lilac_term() -> WaveTerm {
    WaveTerm {
        amplitude: 1.2,
        frequency: 0.3,
        time_rate: 1.5,
    }
}

#[test]
fn displacement_at_origin_and_time_zero() {
    assert_eq!(displacement(&[lilac_term()], 0.0, 0.0, 0.0), 0.0);
}

#[test]
fn displacement_is_periodic_in_time() {
    let term = lilac_term();
    let period = 2.0 * PI / term.time_rate;
    for &x in &[-20.0, -3.5, 0.0, 7.25, 20.0] {
        for &t in &[0.0, 0.4, 3.0] {
            let a = displacement(&[term], x, t, 0.45);
            let b = displacement(&[term], x, t + period, 0.45);
            assert!((a - b).abs() < 1e-4, "x={x} t={t}: {a} vs {b}");
        }
    }
}

#[test]
fn terms_sum() {
    let a = lilac_term();
    let b = WaveTerm {
        amplitude: 0.5,
        frequency: 1.0,
        time_rate: 0.0,
    };
    let x = 1.3;
    let expected = displacement(&[a], x, 2.0, 0.0) + displacement(&[b], x, 2.0, 0.0);
    assert!((displacement(&[a, b], x, 2.0, 0.0) - expected).abs() < 1e-6);
}

#[test]
fn update_rewrites_only_displacement() {
    let mut field = WaveField::new(&WaveConfig::default());
    let xs: Vec<f32> = field.strands()[3].vertices().iter().map(|v| v[0]).collect();
    field.update(1.7);
    field.update(4.2);
    let strand = &field.strands()[3];
    for (v, x) in strand.vertices().iter().zip(&xs) {
        assert_eq!(v[0], *x);
        assert_eq!(v[2], 0.0);
        let expected = displacement(field.terms(), *x, 4.2, strand.phase_offset());
        assert!((v[1] - expected).abs() < 1e-6);
    }
}

#[test]
fn strands_stay_dirty_until_acknowledged() {
    let mut field = WaveField::new(&WaveConfig {
        strand_count: 3,
        samples: 5,
        terms: smallvec![lilac_term()],
        ..WaveConfig::default()
    });
    assert_eq!(field.pending_uploads().count(), 3);
    field.acknowledge(0);
    field.acknowledge(2);
    let pending: Vec<usize> = field.pending_uploads().map(|(i, _)| i).collect();
    assert_eq!(pending, vec![1]);

    field.update(0.5);
    assert_eq!(field.pending_uploads().count(), 3);
}

#[test]
fn acknowledge_out_of_range_is_ignored() {
    let mut field = WaveField::new(&WaveConfig {
        strand_count: 2,
        ..WaveConfig::default()
    });
    field.acknowledge(99);
    assert_eq!(field.pending_uploads().count(), 2);
}
