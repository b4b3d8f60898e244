use flare_core::{FlareParams, FrameBuffer, SampleFilter};
use flare_effects::{apply, tap_decay, AnamorphicFlare, FLARE_TINT, SAMPLE_OFFSETS};
use glam::Vec3;

// ── Helpers ──────────────────────────────────────────────────────

const EPS: f32 = 1e-4;

fn approx_eq(a: Vec3, b: Vec3) -> bool {
    (a - b).abs().max_element() < EPS
}

/// Deterministic pseudo-random frame with channels in `[0, max)`.
fn noise_frame(width: u32, height: u32, max: f32, seed: u64) -> FrameBuffer {
    let mut state = seed;
    let mut next = move || {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        ((state >> 33) as f32 / (1u64 << 31) as f32) * max
    };
    let pixels = (0..width * height)
        .map(|_| Vec3::new(next(), next(), next()))
        .collect();
    FrameBuffer::from_pixels(width, height, pixels).unwrap()
}

/// Spread that places each tap exactly one column apart.
fn one_texel_spread(width: u32) -> f32 {
    1.0 / width as f32
}

// ── 1. Below-threshold identity ──────────────────────────────────

#[test]
fn dim_frame_passes_through_unchanged() {
    let frame = noise_frame(48, 6, 0.5, 7);
    let params = FlareParams { threshold: 0.6, scale: 4.0, intensity: 4.0, ..Default::default() };

    for filter in [SampleFilter::Nearest, SampleFilter::Linear] {
        let out = AnamorphicFlare::new(filter).apply(&frame, &params);
        assert_eq!(out, frame, "{:?} filter changed a dim frame", filter);
    }
}

#[test]
fn threshold_above_max_channel_is_identity() {
    let frame = noise_frame(64, 4, 1.0, 42);
    let params = FlareParams { threshold: 2.0, ..Default::default() };
    assert_eq!(apply(&frame, &params), frame);
}

// ── 2. Monotonic gain ────────────────────────────────────────────

fn assert_non_decreasing(frames: &[FrameBuffer], label: &str) {
    for pair in frames.windows(2) {
        for (a, b) in pair[0].pixels().iter().zip(pair[1].pixels()) {
            assert!(
                b.x >= a.x && b.y >= a.y && b.z >= a.z,
                "{label}: {:?} decreased to {:?}",
                a,
                b
            );
        }
    }
}

#[test]
fn increasing_scale_never_darkens() {
    let frame = noise_frame(40, 5, 1.0, 3);
    let outputs: Vec<FrameBuffer> = [0.0, 0.5, 1.0, 2.0, 4.0]
        .iter()
        .map(|&scale| apply(&frame, &FlareParams { threshold: 0.5, scale, ..Default::default() }))
        .collect();
    assert_non_decreasing(&outputs, "scale");
}

#[test]
fn increasing_intensity_never_darkens() {
    let frame = noise_frame(40, 5, 1.0, 11);
    let outputs: Vec<FrameBuffer> = [0.0, 0.25, 1.0, 3.0, 4.0]
        .iter()
        .map(|&intensity| {
            apply(&frame, &FlareParams { threshold: 0.5, intensity, ..Default::default() })
        })
        .collect();
    assert_non_decreasing(&outputs, "intensity");
}

#[test]
fn zero_gain_is_identity() {
    let frame = noise_frame(32, 3, 1.5, 5);
    let params = FlareParams { threshold: 0.0, scale: 0.0, ..Default::default() };
    assert_eq!(apply(&frame, &params), frame);
}

// ── 3. Symmetry and falloff ──────────────────────────────────────

#[test]
fn symmetric_input_gives_symmetric_taps() {
    let width = 33;
    let center = 16;
    let mut frame = FrameBuffer::new(width, 1);
    for (d, color) in [(2, Vec3::new(1.0, 0.3, 0.2)), (5, Vec3::ONE), (7, Vec3::splat(1.4))] {
        frame.set(center - d, 0, color);
        frame.set(center + d, 0, color);
    }

    let params = FlareParams { threshold: 0.9, spread: one_texel_spread(width), ..Default::default() };
    let flare = AnamorphicFlare::new(SampleFilter::Linear);

    for i in 1..=8 {
        let left = flare.tap_contribution(&frame, &params, center, 0, -i);
        let right = flare.tap_contribution(&frame, &params, center, 0, i);
        assert!(approx_eq(left, right), "tap ±{i}: {:?} vs {:?}", left, right);
    }
}

#[test]
fn nearest_tap_outweighs_farthest() {
    let frame = FrameBuffer::filled(64, 1, Vec3::ONE);
    let params = FlareParams { threshold: 0.5, spread: one_texel_spread(64), ..Default::default() };
    let flare = AnamorphicFlare::default();

    let near = flare.tap_contribution(&frame, &params, 32, 0, 1);
    let far = flare.tap_contribution(&frame, &params, 32, 0, 8);
    assert!(near.length() >= far.length());
    assert!(tap_decay(1) >= tap_decay(8));

    let mut previous = f32::INFINITY;
    for i in 1..=8 {
        let d = tap_decay(i);
        assert!(d <= previous, "decay increased at |i| = {i}");
        previous = d;
    }
}

#[test]
fn contribution_is_tinted_toward_blue() {
    let frame = FrameBuffer::filled(16, 1, Vec3::ONE);
    let params = FlareParams::default();
    let flare = AnamorphicFlare::default().flare_at(&frame, &params, 8, 0);
    assert!(flare.x > 0.0);
    assert!((flare.x - flare.y).abs() < EPS);
    assert!((flare.z - 2.0 * flare.x).abs() < EPS);
}

// ── 4. End-to-end scenarios ──────────────────────────────────────

#[test]
fn black_frame_stays_black() {
    let frame = FrameBuffer::new(50, 20);
    let cases = [
        FlareParams::default(),
        FlareParams { threshold: 0.0, scale: 4.0, spread: 0.02, intensity: 4.0 },
        FlareParams { threshold: 2.0, scale: 0.0, spread: 0.001, intensity: 0.0 },
    ];
    for params in cases {
        for filter in [SampleFilter::Nearest, SampleFilter::Linear] {
            let out = AnamorphicFlare::new(filter).apply(&frame, &params);
            assert_eq!(out.max_channel(), 0.0, "{:?} with {:?}", filter, params);
        }
    }
}

#[test]
fn single_white_pixel_streaks_blue() {
    // 250 columns at spread 0.004 puts each tap exactly one column apart.
    let width = 250;
    let bright = 100;
    let mut frame = FrameBuffer::new(width, 3);
    frame.set(bright, 1, Vec3::ONE);

    let params = FlareParams { threshold: 0.9, scale: 0.6, spread: 0.004, intensity: 1.0 };
    let out = apply(&frame, &params);

    // The bright pixel has no bright neighbors: unchanged.
    assert!(approx_eq(out.get(bright, 1), Vec3::ONE));

    for k in 1..=8 {
        let expected = FLARE_TINT * tap_decay(k as i32) * 0.6;
        let right = out.get(bright + k, 1);
        let left = out.get(bright - k, 1);
        assert!(approx_eq(right, expected), "right +{k}: {:?} vs {:?}", right, expected);
        assert!(approx_eq(left, expected), "left -{k}: {:?} vs {:?}", left, expected);
        assert!(right.z > right.x, "streak at +{k} is not blue-biased");
    }

    // Beyond the tap reach, and on other rows, nothing changes.
    assert_eq!(out.get(bright + 9, 1), Vec3::ZERO);
    assert_eq!(out.get(bright - 9, 1), Vec3::ZERO);
    assert_eq!(out.get(bright + 1, 0), Vec3::ZERO);
    assert_eq!(out.get(bright, 2), Vec3::ZERO);
}

#[test]
fn output_is_not_clamped() {
    let frame = FrameBuffer::filled(32, 1, Vec3::ONE);
    let params = FlareParams { threshold: 0.0, scale: 4.0, intensity: 4.0, ..Default::default() };
    let out = apply(&frame, &params);
    assert!(out.max_channel() > 1.0);
}

#[test]
fn edge_pixels_sample_clamped_edge() {
    // Only the leftmost column is bright. Pixel 0's left taps all clamp
    // onto itself, so it receives the eight left-side contributions.
    let width = 32;
    let mut frame = FrameBuffer::new(width, 1);
    frame.set(0, 0, Vec3::ONE);
    let params = FlareParams { spread: one_texel_spread(width), ..Default::default() };

    let flare = AnamorphicFlare::new(SampleFilter::Nearest).flare_at(&frame, &params, 0, 0);
    let expected: Vec3 = SAMPLE_OFFSETS
        .iter()
        .filter(|&&i| i < 0)
        .map(|&i| FLARE_TINT * tap_decay(i) * params.scale * params.intensity)
        .sum();
    assert!(approx_eq(flare, expected), "{:?} vs {:?}", flare, expected);
}

#[test]
fn wider_spread_reaches_farther() {
    let width = 200;
    let mut frame = FrameBuffer::new(width, 1);
    frame.set(100, 0, Vec3::ONE);
    let probe = 100 + 12;

    let narrow = FlareParams { spread: one_texel_spread(width), ..Default::default() };
    let wide = FlareParams { spread: 2.0 * one_texel_spread(width), ..Default::default() };

    let flare = AnamorphicFlare::new(SampleFilter::Nearest);
    assert_eq!(flare.flare_at(&frame, &narrow, probe, 0), Vec3::ZERO);
    assert!(flare.flare_at(&frame, &wide, probe, 0).z > 0.0);
}

#[test]
fn extreme_spread_degrades_without_panicking() {
    let frame = noise_frame(16, 4, 2.0, 11);

    for spread in [1.0e30, -1.0e30, f32::INFINITY, f32::NEG_INFINITY, f32::NAN] {
        let params = FlareParams { spread, ..Default::default() };
        for filter in [SampleFilter::Linear, SampleFilter::Nearest] {
            let out = AnamorphicFlare::new(filter).apply(&frame, &params);
            assert_eq!(out.dimensions(), frame.dimensions(), "spread {spread}, {filter:?}");
        }
    }
}

#[test]
fn huge_spread_samples_the_edge_columns() {
    // Every tap lands far outside the row, so each side reads its edge column.
    let width = 8;
    let mut frame = FrameBuffer::new(width, 1);
    frame.set(width - 1, 0, Vec3::ONE);
    let params = FlareParams { spread: 1.0e30, ..Default::default() };

    let flare = AnamorphicFlare::new(SampleFilter::Linear).flare_at(&frame, &params, 3, 0);
    let expected: Vec3 = SAMPLE_OFFSETS
        .iter()
        .filter(|&&i| i > 0)
        .map(|&i| FLARE_TINT * tap_decay(i) * params.scale * params.intensity)
        .sum();
    assert!(approx_eq(flare, expected), "{:?} vs {:?}", flare, expected);
}
