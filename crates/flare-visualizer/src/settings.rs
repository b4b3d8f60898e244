use flare_core::SampleFilter;
use std::path::PathBuf;

/// Where the frame fed to the flare pass comes from.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SceneSource {
    /// Animated emissive blobs over a darkened grayscale backdrop.
    #[default]
    Procedural,
    /// A still image loaded from disk.
    Image(PathBuf),
}

impl SceneSource {
    pub fn label(&self) -> String {
        match self {
            SceneSource::Procedural => "Procedural".to_string(),
            SceneSource::Image(path) => path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string()),
        }
    }
}

/// Viewer options that are not flare parameters.
#[derive(Debug, Clone)]
pub struct ViewerSettings {
    pub scene: SceneSource,
    /// Filtering used when the flare pass samples the scene target.
    pub filter: SampleFilter,
    /// Advance the procedural scene's clock.
    pub animate: bool,
    /// When off, the scene is presented without the flare.
    pub flare_enabled: bool,
}

impl Default for ViewerSettings {
    fn default() -> Self {
        Self {
            scene: SceneSource::Procedural,
            filter: SampleFilter::Linear,
            animate: true,
            flare_enabled: true,
        }
    }
}
