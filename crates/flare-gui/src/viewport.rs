use egui::Vec2;
use flare_core::{FlareParams, SharedFlareParams};
use flare_visualizer::{FlareRenderer, ViewerSettings};
use image::RgbaImage;
use std::sync::{Arc, Mutex};

/// Shared state for the GPU flare viewport, accessed from both
/// the egui layout code and the glow paint callback.
pub struct ViewportState {
    pub renderer: Option<FlareRenderer>,
    pub settings: ViewerSettings,
    /// Seconds on the procedural scene's clock.
    pub time: f32,
    /// Image to upload as the scene on the next paint.
    pending_image: Option<RgbaImage>,
    clear_image: bool,
    capture_requested: bool,
    captured: Option<RgbaImage>,
    /// Set when the renderer could not be created or fed.
    pub last_error: Option<String>,
}

impl Default for ViewportState {
    fn default() -> Self {
        Self::new(ViewerSettings::default())
    }
}

impl ViewportState {
    pub fn new(settings: ViewerSettings) -> Self {
        Self {
            renderer: None,
            settings,
            time: 0.0,
            pending_image: None,
            clear_image: false,
            capture_requested: false,
            captured: None,
            last_error: None,
        }
    }

    /// Advance the scene clock when animation is on.
    pub fn advance_clock(&mut self, dt: f32) {
        if self.settings.animate && dt.is_finite() && dt > 0.0 {
            self.time += dt;
        }
    }

    /// Queue an image to become the scene. Replaces any queued clear.
    pub fn queue_image(&mut self, image: RgbaImage) {
        self.pending_image = Some(image);
        self.clear_image = false;
    }

    /// Queue a switch back to the procedural scene.
    pub fn queue_clear_image(&mut self) {
        self.pending_image = None;
        self.clear_image = true;
    }

    pub fn request_capture(&mut self) {
        self.capture_requested = true;
    }

    pub fn take_capture(&mut self) -> Option<RgbaImage> {
        self.captured.take()
    }

    /// Render one frame. Called from the paint callback with egui's GL context current.
    pub fn paint(&mut self, gl: &glow::Context, params: &FlareParams, viewport: [i32; 4]) {
        // Lazy-initialize the renderer on first use
        if self.renderer.is_none() {
            match FlareRenderer::new(gl, &self.settings) {
                Ok(renderer) => {
                    log::info!("GPU flare renderer initialized");
                    self.renderer = Some(renderer);
                    self.last_error = None;
                }
                Err(e) => {
                    if self.last_error.is_none() {
                        log::error!("failed to initialize flare renderer: {}", e);
                    }
                    self.last_error = Some(e.to_string());
                    return;
                }
            }
        }

        let Some(renderer) = self.renderer.as_mut() else {
            return;
        };

        if self.clear_image {
            self.clear_image = false;
            renderer.clear_scene_image(gl);
            self.last_error = None;
        }
        if let Some(image) = self.pending_image.take() {
            self.last_error = upload_error(renderer.set_scene_image(gl, &image));
        }
        if self.capture_requested {
            self.capture_requested = false;
            renderer.request_capture();
        }

        renderer.render(gl, params, &self.settings, viewport, self.time);

        if let Some(image) = renderer.take_capture() {
            self.captured = Some(image);
        }
    }

    /// Release GL resources. Call with the context that created them.
    pub fn destroy(&mut self, gl: &glow::Context) {
        if let Some(mut renderer) = self.renderer.take() {
            renderer.destroy(gl);
        }
    }
}

/// Error to show after a scene image upload. A successful upload clears
/// whatever an earlier one left behind.
fn upload_error(result: flare_visualizer::error::Result<()>) -> Option<String> {
    match result {
        Ok(()) => None,
        Err(e) => {
            log::error!("failed to upload scene image: {}", e);
            Some(e.to_string())
        }
    }
}

/// Draw the GPU-accelerated flare viewport using `egui::PaintCallback`.
/// Fills all remaining space in `ui`.
pub fn draw_flare_viewport(
    ui: &mut egui::Ui,
    params: Arc<SharedFlareParams>,
    viewport_state: Arc<Mutex<ViewportState>>,
) {
    let desired_size = ui.available_size().max(Vec2::splat(1.0));
    let (rect, _response) = ui.allocate_exact_size(desired_size, egui::Sense::hover());

    let cb = egui_glow::CallbackFn::new(move |info, painter| {
        let gl = painter.gl();

        let vp = info.viewport_in_pixels();
        let viewport = [vp.left_px, vp.from_bottom_px, vp.width_px, vp.height_px];

        // One snapshot per frame; slider writes land on the next frame.
        let frame_params = params.snapshot();

        match viewport_state.lock() {
            Ok(mut state) => state.paint(gl, &frame_params, viewport),
            Err(_) => log::error!("viewport state lock poisoned"),
        }
    });

    ui.painter().add(egui::PaintCallback {
        rect,
        callback: Arc::new(cb),
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use flare_visualizer::RenderError;

    #[test]
    fn test_clock_advances_only_when_animating() {
        let mut state = ViewportState::default();
        state.advance_clock(0.5);
        assert_eq!(state.time, 0.5);

        state.settings.animate = false;
        state.advance_clock(0.5);
        assert_eq!(state.time, 0.5);
    }

    #[test]
    fn test_clock_ignores_bad_deltas() {
        let mut state = ViewportState::default();
        state.advance_clock(-1.0);
        state.advance_clock(f32::NAN);
        assert_eq!(state.time, 0.0);
    }

    #[test]
    fn test_queued_image_and_clear_replace_each_other() {
        let mut state = ViewportState::default();
        state.queue_clear_image();
        state.queue_image(RgbaImage::new(2, 2));
        assert!(!state.clear_image);
        assert!(state.pending_image.is_some());

        state.queue_clear_image();
        assert!(state.clear_image);
        assert!(state.pending_image.is_none());
    }

    #[test]
    fn test_upload_error_follows_latest_upload() {
        let failed = upload_error(Err(RenderError::Resource("texture".to_string())));
        assert_eq!(failed.as_deref(), Some(RenderError::Resource("texture".to_string()).to_string().as_str()));
        assert_eq!(upload_error(Ok(())), None);
    }

    #[test]
    fn test_no_capture_without_renderer() {
        let mut state = ViewportState::default();
        state.request_capture();
        assert!(state.take_capture().is_none());
    }
}
