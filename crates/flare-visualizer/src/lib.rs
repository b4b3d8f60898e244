pub mod error;
pub mod fbo;
pub mod flare_pass;
pub mod image_io;
pub mod program;
pub mod quad;
pub mod renderer;
pub mod scene;
pub mod settings;
pub mod shaders;
pub mod snapshot;

pub use error::RenderError;
pub use renderer::FlareRenderer;
pub use settings::{SceneSource, ViewerSettings};
