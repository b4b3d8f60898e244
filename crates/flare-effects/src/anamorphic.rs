use flare_core::{FlareParams, FrameBuffer, SampleFilter};
use glam::Vec3;

/// Horizontal tap offsets, in units of `spread`. The center pixel is not a tap.
pub const SAMPLE_OFFSETS: [i32; 16] = [-8, -7, -6, -5, -4, -3, -2, -1, 1, 2, 3, 4, 5, 6, 7, 8];

/// Color bias of the streak, toward blue/cyan.
pub const FLARE_TINT: Vec3 = Vec3::new(0.5, 0.5, 1.0);

/// Per-tap distance falloff: `decay = 1 / max(|i| * DECAY_FALLOFF, 1)`.
pub const DECAY_FALLOFF: f32 = 1.5;

/// Attenuation for the tap at `offset`. The nearest taps (|i| = 1) get 2/3;
/// the floor of 1.0 only applies at offset 0.
pub fn tap_decay(offset: i32) -> f32 {
    1.0 / (offset.unsigned_abs() as f32 * DECAY_FALLOFF).max(1.0)
}

/// Brightness as seen by the threshold test: the largest channel.
pub fn brightness(color: Vec3) -> f32 {
    color.max_element()
}

/// Anamorphic flare filter.
///
/// Each output pixel is its input color plus a tinted streak gathered from
/// sixteen horizontal neighbors. Neighbors whose brightest channel reaches
/// `threshold` contribute their color, attenuated by distance and scaled by
/// `scale * intensity`. The result is not clamped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AnamorphicFlare {
    pub filter: SampleFilter,
}

impl AnamorphicFlare {
    pub fn new(filter: SampleFilter) -> Self {
        Self { filter }
    }

    /// Contribution of a single tap to pixel `(x, y)`.
    pub fn tap_contribution(
        &self,
        frame: &FrameBuffer,
        params: &FlareParams,
        x: u32,
        y: u32,
        offset: i32,
    ) -> Vec3 {
        let neighbor = frame.sample_horizontal(x, y, offset as f32 * params.spread, self.filter);
        // Hard step, not smoothstep.
        let weight = if brightness(neighbor) >= params.threshold { 1.0 } else { 0.0 };
        neighbor * weight * tap_decay(offset) * params.scale * params.intensity * FLARE_TINT
    }

    /// The streak term for pixel `(x, y)`, without the base color.
    pub fn flare_at(&self, frame: &FrameBuffer, params: &FlareParams, x: u32, y: u32) -> Vec3 {
        SAMPLE_OFFSETS
            .iter()
            .fold(Vec3::ZERO, |flare, &offset| {
                flare + self.tap_contribution(frame, params, x, y, offset)
            })
    }

    /// Filter `frame` into a new buffer of the same size.
    pub fn apply(&self, frame: &FrameBuffer, params: &FlareParams) -> FrameBuffer {
        let mut out = FrameBuffer::new(frame.width(), frame.height());
        self.apply_into(frame, params, &mut out);
        out
    }

    /// Filter `frame` into `out`, reallocating `out` first if its size
    /// differs from `frame`.
    pub fn apply_into(&self, frame: &FrameBuffer, params: &FlareParams, out: &mut FrameBuffer) {
        if out.resize(frame.width(), frame.height()) {
            log::debug!("flare output reallocated to {}x{}", frame.width(), frame.height());
        }

        for y in 0..frame.height() {
            for x in 0..frame.width() {
                let base = frame.get(x, y);
                out.set(x, y, base + self.flare_at(frame, params, x, y));
            }
        }
    }
}

/// Filter `frame` with linear sampling.
pub fn apply(frame: &FrameBuffer, params: &FlareParams) -> FrameBuffer {
    AnamorphicFlare::default().apply(frame, params)
}

/// Reusable filter state: keeps the output buffer alive between frames and
/// follows the input size.
#[derive(Debug, Clone)]
pub struct FlareProcessor {
    flare: AnamorphicFlare,
    output: FrameBuffer,
}

impl FlareProcessor {
    pub fn new(filter: SampleFilter) -> Self {
        Self {
            flare: AnamorphicFlare::new(filter),
            output: FrameBuffer::new(0, 0),
        }
    }

    pub fn filter(&self) -> SampleFilter {
        self.flare.filter
    }

    pub fn set_filter(&mut self, filter: SampleFilter) {
        self.flare.filter = filter;
    }

    /// Reallocate the output buffer ahead of the next frame.
    pub fn resize(&mut self, width: u32, height: u32) {
        if self.output.resize(width, height) {
            log::debug!("flare processor resized to {}x{}", width, height);
        }
    }

    /// Filter one frame. The returned buffer is valid until the next call.
    pub fn process(&mut self, frame: &FrameBuffer, params: &FlareParams) -> &FrameBuffer {
        self.flare.apply_into(frame, params, &mut self.output);
        &self.output
    }

    pub fn output(&self) -> &FrameBuffer {
        &self.output
    }
}

impl Default for FlareProcessor {
    fn default() -> Self {
        Self::new(SampleFilter::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offsets_skip_center() {
        assert_eq!(SAMPLE_OFFSETS.len(), 16);
        assert!(!SAMPLE_OFFSETS.contains(&0));
        assert_eq!(SAMPLE_OFFSETS.iter().sum::<i32>(), 0);
    }

    #[test]
    fn test_tap_decay_values() {
        assert_eq!(tap_decay(1), 1.0 / 1.5);
        assert_eq!(tap_decay(-1), tap_decay(1));
        assert!((tap_decay(2) - 1.0 / 3.0).abs() < 1e-6);
        assert!((tap_decay(8) - 1.0 / 12.0).abs() < 1e-6);
        assert_eq!(tap_decay(0), 1.0);
    }

    #[test]
    fn test_brightness_is_max_channel() {
        assert_eq!(brightness(Vec3::new(0.2, 0.9, 0.4)), 0.9);
    }

    #[test]
    fn test_apply_preserves_dimensions() {
        let frame = FrameBuffer::filled(7, 3, Vec3::splat(0.2));
        let out = apply(&frame, &FlareParams::default());
        assert_eq!(out.dimensions(), (7, 3));
    }

    #[test]
    fn test_apply_into_reallocates_mismatched_output() {
        let frame = FrameBuffer::filled(5, 2, Vec3::ONE);
        let mut out = FrameBuffer::new(1, 1);
        AnamorphicFlare::default().apply_into(&frame, &FlareParams::default(), &mut out);
        assert_eq!(out.dimensions(), (5, 2));
        assert!(out.get(4, 1).z > 1.0);
    }

    #[test]
    fn test_processor_follows_input_size() {
        let mut processor = FlareProcessor::default();
        let small = FrameBuffer::new(4, 4);
        let large = FrameBuffer::new(16, 9);
        let params = FlareParams::default();

        assert_eq!(processor.process(&small, &params).dimensions(), (4, 4));
        assert_eq!(processor.process(&large, &params).dimensions(), (16, 9));

        processor.resize(2, 2);
        assert_eq!(processor.output().dimensions(), (2, 2));
        processor.set_filter(SampleFilter::Nearest);
        assert_eq!(processor.filter(), SampleFilter::Nearest);
    }
}
