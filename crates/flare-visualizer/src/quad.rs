use glow::HasContext;

use crate::error::{RenderError, Result};

/// Two triangles covering [-1,1] with UV [0,1].
#[rustfmt::skip]
const VERTICES: [f32; 24] = [
    // pos       uv
    -1.0, -1.0,  0.0, 0.0,
     1.0, -1.0,  1.0, 0.0,
     1.0,  1.0,  1.0, 1.0,
    -1.0, -1.0,  0.0, 0.0,
     1.0,  1.0,  1.0, 1.0,
    -1.0,  1.0,  0.0, 1.0,
];

/// Fullscreen quad for post-processing passes.
pub struct FullscreenQuad {
    vao: glow::VertexArray,
    vbo: glow::Buffer,
}

impl FullscreenQuad {
    pub fn new(gl: &glow::Context) -> Result<Self> {
        unsafe {
            let vao = gl.create_vertex_array().map_err(RenderError::Resource)?;
            let vbo = gl.create_buffer().map_err(RenderError::Resource)?;

            gl.bind_vertex_array(Some(vao));
            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(&VERTICES),
                glow::STATIC_DRAW,
            );

            let float_size = std::mem::size_of::<f32>() as i32;
            let stride = 4 * float_size;
            // location 0: position
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 2, glow::FLOAT, false, stride, 0);
            // location 1: uv
            gl.enable_vertex_attrib_array(1);
            gl.vertex_attrib_pointer_f32(1, 2, glow::FLOAT, false, stride, 2 * float_size);

            gl.bind_vertex_array(None);
            gl.bind_buffer(glow::ARRAY_BUFFER, None);

            Ok(Self { vao, vbo })
        }
    }

    /// Draw the fullscreen quad.
    pub fn draw(&self, gl: &glow::Context) {
        unsafe {
            gl.bind_vertex_array(Some(self.vao));
            gl.draw_arrays(glow::TRIANGLES, 0, 6);
            gl.bind_vertex_array(None);
        }
    }

    pub fn destroy(&self, gl: &glow::Context) {
        unsafe {
            gl.delete_vertex_array(self.vao);
            gl.delete_buffer(self.vbo);
        }
    }
}
