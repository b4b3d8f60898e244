use thiserror::Error;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("GL resource creation failed: {0}")]
    Resource(String),

    #[error("{stage} shader failed to compile:\n{log}")]
    ShaderCompile { stage: &'static str, log: String },

    #[error("program linking failed:\n{0}")]
    ProgramLink(String),

    #[error("uniform '{0}' not found in program")]
    MissingUniform(String),

    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RenderError>;
