pub mod config;
pub mod error;
pub mod frame;
pub mod parameter;

pub use config::{load_config, save_config, FlareConfig, CONFIG_VERSION};
pub use error::{FlareError, Result};
pub use frame::{FrameBuffer, SampleFilter};
pub use parameter::{AtomicF32, FlareParamId, FlareParameter, FlareParams, SharedFlareParams};
