use flare_core::SampleFilter;
use glow::HasContext;

use crate::error::{RenderError, Result};

/// A framebuffer object with an RGBA16F color texture attachment.
///
/// The texture clamps to edge on both axes, so the flare pass gets
/// clamp-to-edge sampling for taps that fall off the frame.
pub struct RenderTarget {
    pub fbo: glow::Framebuffer,
    pub texture: glow::Texture,
    pub width: u32,
    pub height: u32,
    filter: SampleFilter,
}

impl RenderTarget {
    /// Create a new render target with the given dimensions.
    pub fn new(gl: &glow::Context, width: u32, height: u32, filter: SampleFilter) -> Result<Self> {
        unsafe {
            let texture = gl.create_texture().map_err(RenderError::Resource)?;
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            allocate_storage(gl, width, height);
            apply_filter(gl, filter);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::CLAMP_TO_EDGE as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::CLAMP_TO_EDGE as i32);

            let fbo = match gl.create_framebuffer() {
                Ok(fbo) => fbo,
                Err(e) => {
                    gl.delete_texture(texture);
                    return Err(RenderError::Resource(e));
                }
            };
            gl.bind_framebuffer(glow::FRAMEBUFFER, Some(fbo));
            gl.framebuffer_texture_2d(
                glow::FRAMEBUFFER,
                glow::COLOR_ATTACHMENT0,
                glow::TEXTURE_2D,
                Some(texture),
                0,
            );

            let status = gl.check_framebuffer_status(glow::FRAMEBUFFER);
            if status != glow::FRAMEBUFFER_COMPLETE {
                log::error!("Framebuffer incomplete: 0x{:X}", status);
            }

            gl.bind_framebuffer(glow::FRAMEBUFFER, None);
            gl.bind_texture(glow::TEXTURE_2D, None);

            Ok(Self { fbo, texture, width, height, filter })
        }
    }

    pub fn matches(&self, width: u32, height: u32) -> bool {
        self.width == width && self.height == height
    }

    pub fn filter(&self) -> SampleFilter {
        self.filter
    }

    /// Reallocate the color storage if the size changed. Returns `true` when
    /// the target was reallocated; its contents are undefined afterwards.
    pub fn resize(&mut self, gl: &glow::Context, width: u32, height: u32) -> bool {
        if self.matches(width, height) {
            return false;
        }
        unsafe {
            gl.bind_texture(glow::TEXTURE_2D, Some(self.texture));
            allocate_storage(gl, width, height);
            gl.bind_texture(glow::TEXTURE_2D, None);
        }
        self.width = width;
        self.height = height;
        true
    }

    /// Switch between nearest and linear sampling of the color texture.
    pub fn set_filter(&mut self, gl: &glow::Context, filter: SampleFilter) {
        if self.filter == filter {
            return;
        }
        unsafe {
            gl.bind_texture(glow::TEXTURE_2D, Some(self.texture));
            apply_filter(gl, filter);
            gl.bind_texture(glow::TEXTURE_2D, None);
        }
        self.filter = filter;
    }

    /// Bind this render target and set its viewport.
    pub fn bind(&self, gl: &glow::Context) {
        unsafe {
            gl.bind_framebuffer(glow::FRAMEBUFFER, Some(self.fbo));
            gl.viewport(0, 0, self.width as i32, self.height as i32);
        }
    }

    /// Destroy GPU resources.
    pub fn destroy(&self, gl: &glow::Context) {
        unsafe {
            gl.delete_framebuffer(self.fbo);
            gl.delete_texture(self.texture);
        }
    }
}

/// GL filter enum for a sample filter.
pub fn gl_filter(filter: SampleFilter) -> i32 {
    match filter {
        SampleFilter::Nearest => glow::NEAREST as i32,
        SampleFilter::Linear => glow::LINEAR as i32,
    }
}

/// Expects the target texture to be bound to TEXTURE_2D.
unsafe fn allocate_storage(gl: &glow::Context, width: u32, height: u32) {
    gl.tex_image_2d(
        glow::TEXTURE_2D,
        0,
        glow::RGBA16F as i32,
        width as i32,
        height as i32,
        0,
        glow::RGBA,
        glow::FLOAT,
        glow::PixelUnpackData::Slice(None),
    );
}

unsafe fn apply_filter(gl: &glow::Context, filter: SampleFilter) {
    gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MIN_FILTER, gl_filter(filter));
    gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_MAG_FILTER, gl_filter(filter));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gl_filter_mapping() {
        assert_eq!(gl_filter(SampleFilter::Nearest), glow::NEAREST as i32);
        assert_eq!(gl_filter(SampleFilter::Linear), glow::LINEAR as i32);
    }
}
