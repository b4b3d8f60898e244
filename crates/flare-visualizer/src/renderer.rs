use flare_core::FlareParams;
use glow::HasContext;
use image::RgbaImage;
use std::num::NonZeroU32;

use crate::error::Result;
use crate::fbo::RenderTarget;
use crate::flare_pass::FlarePass;
use crate::quad::FullscreenQuad;
use crate::scene::SceneRenderer;
use crate::settings::ViewerSettings;

/// Saved OpenGL state so we can restore egui's GL context after custom rendering.
struct SavedGlState {
    framebuffer: Option<glow::Framebuffer>,
    viewport: [i32; 4],
    blend_enabled: bool,
    blend_src_rgb: i32,
    blend_dst_rgb: i32,
    blend_src_alpha: i32,
    blend_dst_alpha: i32,
    blend_eq_rgb: i32,
    blend_eq_alpha: i32,
    program: Option<glow::Program>,
    vao: Option<glow::VertexArray>,
    scissor_enabled: bool,
    active_texture: i32,
    bound_texture: Option<glow::Texture>,
}

fn gl_name(id: i32) -> Option<NonZeroU32> {
    NonZeroU32::new(id as u32)
}

impl SavedGlState {
    unsafe fn save(gl: &glow::Context) -> Self {
        let framebuffer = gl_name(gl.get_parameter_i32(glow::FRAMEBUFFER_BINDING)).map(glow::NativeFramebuffer);

        let mut viewport = [0i32; 4];
        gl.get_parameter_i32_slice(glow::VIEWPORT, &mut viewport);

        let program = gl_name(gl.get_parameter_i32(glow::CURRENT_PROGRAM)).map(glow::NativeProgram);
        let vao = gl_name(gl.get_parameter_i32(glow::VERTEX_ARRAY_BINDING)).map(glow::NativeVertexArray);

        let active_texture = gl.get_parameter_i32(glow::ACTIVE_TEXTURE);
        // Every pass here samples from unit 0 only.
        gl.active_texture(glow::TEXTURE0);
        let bound_texture = gl_name(gl.get_parameter_i32(glow::TEXTURE_BINDING_2D)).map(glow::NativeTexture);
        gl.active_texture(active_texture as u32);

        Self {
            framebuffer,
            viewport,
            blend_enabled: gl.is_enabled(glow::BLEND),
            blend_src_rgb: gl.get_parameter_i32(glow::BLEND_SRC_RGB),
            blend_dst_rgb: gl.get_parameter_i32(glow::BLEND_DST_RGB),
            blend_src_alpha: gl.get_parameter_i32(glow::BLEND_SRC_ALPHA),
            blend_dst_alpha: gl.get_parameter_i32(glow::BLEND_DST_ALPHA),
            blend_eq_rgb: gl.get_parameter_i32(glow::BLEND_EQUATION_RGB),
            blend_eq_alpha: gl.get_parameter_i32(glow::BLEND_EQUATION_ALPHA),
            program,
            vao,
            scissor_enabled: gl.is_enabled(glow::SCISSOR_TEST),
            active_texture,
            bound_texture,
        }
    }

    unsafe fn restore(&self, gl: &glow::Context) {
        gl.bind_framebuffer(glow::FRAMEBUFFER, self.framebuffer);
        gl.viewport(self.viewport[0], self.viewport[1], self.viewport[2], self.viewport[3]);

        if self.blend_enabled {
            gl.enable(glow::BLEND);
        } else {
            gl.disable(glow::BLEND);
        }
        gl.blend_func_separate(
            self.blend_src_rgb as u32,
            self.blend_dst_rgb as u32,
            self.blend_src_alpha as u32,
            self.blend_dst_alpha as u32,
        );
        gl.blend_equation_separate(self.blend_eq_rgb as u32, self.blend_eq_alpha as u32);

        gl.use_program(self.program);
        gl.bind_vertex_array(self.vao);

        if self.scissor_enabled {
            gl.enable(glow::SCISSOR_TEST);
        } else {
            gl.disable(glow::SCISSOR_TEST);
        }

        gl.active_texture(glow::TEXTURE0);
        gl.bind_texture(glow::TEXTURE_2D, self.bound_texture);
        gl.active_texture(self.active_texture as u32);
    }
}

/// Size of the offscreen scene target for a `[x, y, width, height]` viewport.
/// Never zero, so a collapsed panel still has a valid target.
pub fn target_size(viewport: [i32; 4]) -> (u32, u32) {
    (viewport[2].max(1) as u32, viewport[3].max(1) as u32)
}

/// Flip RGBA8 rows read from OpenGL (bottom-left origin) to top-down order.
pub fn flip_rows(pixels: &[u8], width: u32, height: u32) -> Vec<u8> {
    let row_bytes = width as usize * 4;
    let mut flipped = Vec::with_capacity(pixels.len());
    for row in pixels.chunks_exact(row_bytes).take(height as usize).rev() {
        flipped.extend_from_slice(row);
    }
    flipped
}

/// Orchestrates one frame: scene into an offscreen target, then the flare
/// pass from that target into the caller's framebuffer.
pub struct FlareRenderer {
    scene_target: RenderTarget,
    scene: SceneRenderer,
    flare: FlarePass,
    quad: FullscreenQuad,
    capture_requested: bool,
    captured: Option<RgbaImage>,
}

impl FlareRenderer {
    /// Create a new renderer. Must be called with a valid GL context.
    pub fn new(gl: &glow::Context, settings: &ViewerSettings) -> Result<Self> {
        Ok(Self {
            scene_target: RenderTarget::new(gl, 1, 1, settings.filter)?,
            scene: SceneRenderer::new(gl)?,
            flare: FlarePass::new(gl)?,
            quad: FullscreenQuad::new(gl)?,
            capture_requested: false,
            captured: None,
        })
    }

    /// Render one frame into the region `viewport` (`[x, y, width, height]`
    /// in physical pixels, bottom-left origin) of the bound framebuffer.
    ///
    /// `params` is read once for the whole frame.
    pub fn render(
        &mut self,
        gl: &glow::Context,
        params: &FlareParams,
        settings: &ViewerSettings,
        viewport: [i32; 4],
        time: f32,
    ) {
        let (width, height) = target_size(viewport);

        unsafe {
            // 1. Save egui's GL state
            let saved = SavedGlState::save(gl);
            gl.disable(glow::SCISSOR_TEST);

            // 2. Match the scene target to the viewport before anything reads it
            if self.scene_target.resize(gl, width, height) {
                log::debug!("scene target reallocated to {}x{}", width, height);
            }
            self.scene_target.set_filter(gl, settings.filter);

            // 3. Scene into the offscreen target
            self.scene_target.bind(gl);
            gl.clear_color(0.0, 0.0, 0.0, 1.0);
            gl.clear(glow::COLOR_BUFFER_BIT);
            self.scene.render(gl, time, width as f32 / height as f32, &self.quad);

            // 4. Flare from the scene target into egui's framebuffer
            gl.bind_framebuffer(glow::FRAMEBUFFER, saved.framebuffer);
            gl.viewport(viewport[0], viewport[1], viewport[2], viewport[3]);
            self.flare.render(gl, self.scene_target.texture, params, settings.flare_enabled, &self.quad);

            if self.capture_requested {
                self.capture_requested = false;
                self.captured = self.read_viewport(gl, viewport);
            }

            // 5. Restore all GL state
            saved.restore(gl);
        }
    }

    /// Upload a still image as the scene source.
    pub fn set_scene_image(&mut self, gl: &glow::Context, image: &RgbaImage) -> Result<()> {
        self.scene.set_image(gl, image)
    }

    /// Switch back to the procedural scene.
    pub fn clear_scene_image(&mut self, gl: &glow::Context) {
        self.scene.clear_image(gl);
    }

    /// Current size of the offscreen scene target.
    pub fn scene_size(&self) -> (u32, u32) {
        (self.scene_target.width, self.scene_target.height)
    }

    /// Read back the composited viewport at the end of the next frame.
    pub fn request_capture(&mut self) {
        self.capture_requested = true;
    }

    /// The image captured by the last frame that had a capture pending.
    pub fn take_capture(&mut self) -> Option<RgbaImage> {
        self.captured.take()
    }

    unsafe fn read_viewport(&self, gl: &glow::Context, viewport: [i32; 4]) -> Option<RgbaImage> {
        let (width, height) = target_size(viewport);
        let mut pixels = vec![0u8; width as usize * height as usize * 4];
        gl.pixel_store_i32(glow::PACK_ALIGNMENT, 1);
        gl.read_pixels(
            viewport[0],
            viewport[1],
            width as i32,
            height as i32,
            glow::RGBA,
            glow::UNSIGNED_BYTE,
            glow::PixelPackData::Slice(Some(pixels.as_mut_slice())),
        );
        let image = RgbaImage::from_raw(width, height, flip_rows(&pixels, width, height));
        if image.is_none() {
            log::error!("viewport capture has the wrong size for {}x{}", width, height);
        }
        image
    }

    pub fn destroy(&mut self, gl: &glow::Context) {
        self.scene_target.destroy(gl);
        self.scene.destroy(gl);
        self.flare.destroy(gl);
        self.quad.destroy(gl);
    }
}
