use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::{FlareError, Result};

/// How a frame is read between texel centers.
///
/// Both modes clamp to the edge texel when a sample falls outside the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SampleFilter {
    /// Take the texel containing the sample position.
    Nearest,
    /// Interpolate between the two closest texel centers.
    #[default]
    Linear,
}

impl SampleFilter {
    pub fn name(&self) -> &'static str {
        match self {
            SampleFilter::Nearest => "Nearest",
            SampleFilter::Linear => "Linear",
        }
    }
}

/// A 2D grid of RGB samples, row-major, one per pixel.
///
/// Values are linear and unbounded: nothing here clamps to [0, 1].
#[derive(Debug, Clone, PartialEq)]
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: Vec<Vec3>,
}

impl FrameBuffer {
    /// Create a black frame.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Vec3::ZERO)
    }

    /// Create a frame where every pixel has the same color.
    pub fn filled(width: u32, height: u32, color: Vec3) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    /// Wrap existing pixels. The vector length must equal `width * height`.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Vec3>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(FlareError::DimensionMismatch {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self { width, height, pixels })
    }

    /// Build a frame from interleaved `[r, g, b, r, g, b, ...]` data.
    pub fn from_rgb_f32(width: u32, height: u32, data: &[f32]) -> Result<Self> {
        let expected = width as usize * height as usize;
        if data.len() != expected * 3 {
            return Err(FlareError::DimensionMismatch {
                width,
                height,
                expected,
                actual: data.len() / 3,
            });
        }
        let pixels = data
            .chunks_exact(3)
            .map(|c| Vec3::new(c[0], c[1], c[2]))
            .collect();
        Ok(Self { width, height, pixels })
    }

    /// Interleaved `[r, g, b, ...]` copy of the frame.
    pub fn to_rgb_f32(&self) -> Vec<f32> {
        self.pixels.iter().flat_map(|p| p.to_array()).collect()
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    pub fn pixels(&self) -> &[Vec3] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Vec3] {
        &mut self.pixels
    }

    /// One row of pixels.
    pub fn row(&self, y: u32) -> &[Vec3] {
        let start = y as usize * self.width as usize;
        &self.pixels[start..start + self.width as usize]
    }

    pub fn get(&self, x: u32, y: u32) -> Vec3 {
        self.pixels[self.index(x, y)]
    }

    pub fn set(&mut self, x: u32, y: u32, color: Vec3) {
        let idx = self.index(x, y);
        self.pixels[idx] = color;
    }

    /// Fill every pixel with one color.
    pub fn fill(&mut self, color: Vec3) {
        self.pixels.fill(color);
    }

    /// Reallocate to new dimensions. Returns `true` if the size changed, in
    /// which case the contents are reset to black.
    pub fn resize(&mut self, width: u32, height: u32) -> bool {
        if self.width == width && self.height == height {
            return false;
        }
        self.width = width;
        self.height = height;
        self.pixels = vec![Vec3::ZERO; width as usize * height as usize];
        true
    }

    /// Largest channel value anywhere in the frame, 0.0 for an empty frame.
    pub fn max_channel(&self) -> f32 {
        self.pixels
            .iter()
            .map(|p| p.max_element())
            .fold(0.0, f32::max)
    }

    /// Normalized horizontal texture coordinate of the center of column `x`.
    pub fn texel_u(&self, x: u32) -> f32 {
        (x as f32 + 0.5) / self.width as f32
    }

    /// Sample row `y` at the center of column `x` shifted by `offset_u`
    /// normalized texture units along the horizontal axis.
    ///
    /// Out-of-range positions clamp to the edge column, including huge or
    /// infinite offsets. An empty frame samples as black.
    pub fn sample_horizontal(&self, x: u32, y: u32, offset_u: f32, filter: SampleFilter) -> Vec3 {
        if self.is_empty() {
            return Vec3::ZERO;
        }
        let last = self.width as i64 - 1;
        // Texel space: column centers sit on integers. Anything past one
        // texel beyond either edge samples the same as the edge itself.
        let t = (x as f32 + offset_u * self.width as f32).clamp(-1.0, last as f32 + 1.0);
        let row = self.row(y);

        match filter {
            SampleFilter::Nearest => {
                let i = ((t + 0.5).floor() as i64).clamp(0, last) as usize;
                row[i]
            }
            SampleFilter::Linear => {
                let base = t.floor();
                let frac = t - base;
                let i0 = (base as i64).clamp(0, last) as usize;
                let i1 = (base as i64 + 1).clamp(0, last) as usize;
                row[i0].lerp(row[i1], frac)
            }
        }
    }

    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        y as usize * self.width as usize + x as usize
    }
}
