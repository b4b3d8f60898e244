use glow::HasContext;

use crate::error::{RenderError, Result};
use crate::shaders;

/// Compile and link a program from the shared fullscreen vertex shader and
/// the given fragment shader.
pub fn compile_fullscreen_program(gl: &glow::Context, frag_src: &str) -> Result<glow::Program> {
    unsafe {
        let vert = compile_shader(gl, glow::VERTEX_SHADER, "vertex", shaders::FULLSCREEN_VERTEX)?;
        let frag = match compile_shader(gl, glow::FRAGMENT_SHADER, "fragment", frag_src) {
            Ok(frag) => frag,
            Err(e) => {
                gl.delete_shader(vert);
                return Err(e);
            }
        };

        let program = gl.create_program().map_err(RenderError::Resource)?;
        gl.attach_shader(program, vert);
        gl.attach_shader(program, frag);
        gl.link_program(program);

        gl.detach_shader(program, vert);
        gl.detach_shader(program, frag);
        gl.delete_shader(vert);
        gl.delete_shader(frag);

        if !gl.get_program_link_status(program) {
            let log = gl.get_program_info_log(program);
            gl.delete_program(program);
            return Err(RenderError::ProgramLink(log));
        }
        Ok(program)
    }
}

unsafe fn compile_shader(
    gl: &glow::Context,
    kind: u32,
    stage: &'static str,
    src: &str,
) -> Result<glow::Shader> {
    let shader = gl.create_shader(kind).map_err(RenderError::Resource)?;
    gl.shader_source(shader, src);
    gl.compile_shader(shader);
    if !gl.get_shader_compile_status(shader) {
        let log = gl.get_shader_info_log(shader);
        gl.delete_shader(shader);
        return Err(RenderError::ShaderCompile { stage, log });
    }
    Ok(shader)
}

/// Look up a uniform, failing if the driver optimized it away or it is misspelled.
pub fn uniform(gl: &glow::Context, program: glow::Program, name: &str) -> Result<glow::UniformLocation> {
    unsafe { gl.get_uniform_location(program, name) }
        .ok_or_else(|| RenderError::MissingUniform(name.to_string()))
}
