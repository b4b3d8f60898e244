use flare_core::FlareError;
use flare_visualizer::RenderError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ViewerError {
    #[error("unknown argument `{0}`")]
    UnknownArgument(String),

    #[error("`{0}` needs a value")]
    MissingValue(String),

    #[error("--input and --output must be given together")]
    IncompleteHeadless,

    #[error(transparent)]
    Flare(#[from] FlareError),

    #[error(transparent)]
    Render(#[from] RenderError),

    #[error("window: {0}")]
    Window(#[from] eframe::Error),
}

pub type Result<T> = std::result::Result<T, ViewerError>;
