use glam::{Vec2, Vec3};
use glow::HasContext;

use crate::error::{RenderError, Result};
use crate::program::{compile_fullscreen_program, uniform};
use crate::quad::FullscreenQuad;
use crate::shaders;

/// Must match `BLOB_COUNT` in the scene shader.
pub const BLOB_COUNT: usize = 6;

/// A bright emissive disc in the procedural scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blob {
    /// Center in UV space.
    pub center: Vec2,
    /// Radius as a fraction of the frame height.
    pub radius: f32,
    pub emission: f32,
    pub color: Vec3,
}

struct BlobPath {
    anchor: Vec2,
    orbit: Vec2,
    speed: f32,
    phase: f32,
    radius: f32,
    emission: f32,
    color: Vec3,
}

const BLOB_PATHS: [BlobPath; BLOB_COUNT] = [
    BlobPath { anchor: Vec2::new(0.30, 0.62), orbit: Vec2::new(0.12, 0.05), speed: 0.35, phase: 0.0, radius: 0.018, emission: 3.0, color: Vec3::new(1.0, 0.95, 0.85) },
    BlobPath { anchor: Vec2::new(0.68, 0.70), orbit: Vec2::new(0.08, 0.06), speed: 0.22, phase: 1.7, radius: 0.012, emission: 4.0, color: Vec3::new(1.0, 0.6, 0.25) },
    BlobPath { anchor: Vec2::new(0.52, 0.45), orbit: Vec2::new(0.20, 0.03), speed: 0.15, phase: 3.1, radius: 0.025, emission: 2.0, color: Vec3::new(0.55, 0.85, 1.0) },
    BlobPath { anchor: Vec2::new(0.20, 0.30), orbit: Vec2::new(0.05, 0.10), speed: 0.40, phase: 4.4, radius: 0.008, emission: 5.0, color: Vec3::new(1.0, 1.0, 1.0) },
    BlobPath { anchor: Vec2::new(0.80, 0.35), orbit: Vec2::new(0.10, 0.08), speed: 0.28, phase: 2.2, radius: 0.015, emission: 2.5, color: Vec3::new(1.0, 0.45, 0.8) },
    BlobPath { anchor: Vec2::new(0.45, 0.82), orbit: Vec2::new(0.15, 0.04), speed: 0.18, phase: 5.3, radius: 0.010, emission: 3.5, color: Vec3::new(1.0, 0.95, 0.55) },
];

/// Blob positions at `time` seconds. Every blob stays inside the frame.
pub fn blobs_at(time: f32) -> [Blob; BLOB_COUNT] {
    BLOB_PATHS.map(|path| {
        let angle = path.speed * time + path.phase;
        let drift = Vec2::new(angle.cos(), angle.sin()) * path.orbit;
        Blob {
            center: (path.anchor + drift).clamp(Vec2::ZERO, Vec2::ONE),
            radius: path.radius,
            emission: path.emission,
            color: path.color,
        }
    })
}

struct SceneImage {
    texture: glow::Texture,
    width: u32,
    height: u32,
}

/// Draws the frame that the flare pass reads: either the procedural scene
/// or a loaded still image, into whichever target is currently bound.
pub struct SceneRenderer {
    procedural: glow::Program,
    loc_aspect: glow::UniformLocation,
    loc_blobs: glow::UniformLocation,
    loc_blob_colors: glow::UniformLocation,
    blit: glow::Program,
    loc_image: glow::UniformLocation,
    image: Option<SceneImage>,
}

impl SceneRenderer {
    pub fn new(gl: &glow::Context) -> Result<Self> {
        let procedural = compile_fullscreen_program(gl, shaders::SCENE_FRAGMENT)?;
        let blit = compile_fullscreen_program(gl, shaders::BLIT_FRAGMENT)?;

        Ok(Self {
            procedural,
            loc_aspect: uniform(gl, procedural, "u_aspect")?,
            loc_blobs: uniform(gl, procedural, "u_blobs")?,
            loc_blob_colors: uniform(gl, procedural, "u_blob_colors")?,
            blit,
            loc_image: uniform(gl, blit, "u_image")?,
            image: None,
        })
    }

    /// Upload an image to draw instead of the procedural scene.
    pub fn set_image(&mut self, gl: &glow::Context, image: &image::RgbaImage) -> Result<()> {
        let (width, height) = image.dimensions();
        let texture = unsafe {
            let texture = gl.create_texture().map_err(RenderError::Resource)?;
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                glow::RGBA8 as i32,
                width as i32,
                height as i32,
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(image.as_raw().as_slice())),
            );
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, glow::LINEAR as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, glow::LINEAR as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::CLAMP_TO_EDGE as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::CLAMP_TO_EDGE as i32);
            gl.bind_texture(glow::TEXTURE_2D, None);
            texture
        };

        self.clear_image(gl);
        self.image = Some(SceneImage { texture, width, height });
        log::info!("scene image uploaded ({}x{})", width, height);
        Ok(())
    }

    /// Go back to the procedural scene.
    pub fn clear_image(&mut self, gl: &glow::Context) {
        if let Some(image) = self.image.take() {
            unsafe { gl.delete_texture(image.texture); }
        }
    }

    pub fn image_size(&self) -> Option<(u32, u32)> {
        self.image.as_ref().map(|i| (i.width, i.height))
    }

    /// Draw into the bound target. `aspect` is the target's width / height.
    pub fn render(&self, gl: &glow::Context, time: f32, aspect: f32, quad: &FullscreenQuad) {
        unsafe {
            gl.disable(glow::BLEND);
            match &self.image {
                Some(image) => {
                    gl.use_program(Some(self.blit));
                    gl.active_texture(glow::TEXTURE0);
                    gl.bind_texture(glow::TEXTURE_2D, Some(image.texture));
                    gl.uniform_1_i32(Some(&self.loc_image), 0);
                }
                None => {
                    let blobs = blobs_at(time);
                    let mut packed = [0.0f32; BLOB_COUNT * 4];
                    let mut colors = [0.0f32; BLOB_COUNT * 3];
                    for (i, blob) in blobs.iter().enumerate() {
                        packed[i * 4..i * 4 + 4].copy_from_slice(&[
                            blob.center.x,
                            blob.center.y,
                            blob.radius,
                            blob.emission,
                        ]);
                        colors[i * 3..i * 3 + 3].copy_from_slice(&blob.color.to_array());
                    }

                    gl.use_program(Some(self.procedural));
                    gl.uniform_1_f32(Some(&self.loc_aspect), aspect);
                    gl.uniform_4_f32_slice(Some(&self.loc_blobs), &packed);
                    gl.uniform_3_f32_slice(Some(&self.loc_blob_colors), &colors);
                }
            }
            quad.draw(gl);
            gl.use_program(None);
        }
    }

    pub fn destroy(&mut self, gl: &glow::Context) {
        self.clear_image(gl);
        unsafe {
            gl.delete_program(self.procedural);
            gl.delete_program(self.blit);
        }
    }
}
