use flare_core::FlareParams;
use glow::HasContext;

use crate::error::Result;
use crate::program::{compile_fullscreen_program, uniform};
use crate::quad::FullscreenQuad;
use crate::shaders;

/// GPU anamorphic flare: one fullscreen pass reading the scene texture and
/// writing `scene + flare` into the currently bound framebuffer.
pub struct FlarePass {
    program: glow::Program,
    loc_scene: glow::UniformLocation,
    loc_threshold: glow::UniformLocation,
    loc_scale: glow::UniformLocation,
    loc_spread: glow::UniformLocation,
    loc_intensity: glow::UniformLocation,
    loc_enabled: glow::UniformLocation,
}

impl FlarePass {
    pub fn new(gl: &glow::Context) -> Result<Self> {
        let program = compile_fullscreen_program(gl, shaders::FLARE_FRAGMENT)?;
        let loc = |name: &str| uniform(gl, program, name);

        Ok(Self {
            program,
            loc_scene: loc("u_scene")?,
            loc_threshold: loc("u_threshold")?,
            loc_scale: loc("u_scale")?,
            loc_spread: loc("u_spread")?,
            loc_intensity: loc("u_intensity")?,
            loc_enabled: loc("u_enabled")?,
        })
    }

    pub fn render(
        &self,
        gl: &glow::Context,
        scene_texture: glow::Texture,
        params: &FlareParams,
        enabled: bool,
        quad: &FullscreenQuad,
    ) {
        unsafe {
            gl.use_program(Some(self.program));
            gl.disable(glow::BLEND);

            gl.active_texture(glow::TEXTURE0);
            gl.bind_texture(glow::TEXTURE_2D, Some(scene_texture));
            gl.uniform_1_i32(Some(&self.loc_scene), 0);

            gl.uniform_1_f32(Some(&self.loc_threshold), params.threshold);
            gl.uniform_1_f32(Some(&self.loc_scale), params.scale);
            gl.uniform_1_f32(Some(&self.loc_spread), params.spread);
            gl.uniform_1_f32(Some(&self.loc_intensity), params.intensity);
            gl.uniform_1_i32(Some(&self.loc_enabled), enabled as i32);

            quad.draw(gl);

            gl.use_program(None);
        }
    }

    pub fn destroy(&self, gl: &glow::Context) {
        unsafe { gl.delete_program(self.program); }
    }
}
