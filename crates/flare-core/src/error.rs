use thiserror::Error;

#[derive(Error, Debug)]
pub enum FlareError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("pixel data has {actual} samples, expected {expected} for a {width}x{height} frame")]
    DimensionMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },

    #[error("unsupported config version {found} (newest supported is {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },
}

pub type Result<T> = std::result::Result<T, FlareError>;
