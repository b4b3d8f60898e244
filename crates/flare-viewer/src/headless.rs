use flare_core::{load_config, FlareConfig, SampleFilter};
use flare_effects::FlareProcessor;
use flare_visualizer::image_io::{load_frame, save_frame};
use std::path::Path;
use std::time::Instant;

use crate::error::Result;

/// Apply the CPU flare to `input` and write the result to `output`.
pub fn run(input: &Path, output: &Path, config: Option<&Path>, nearest: bool) -> Result<()> {
    let config = match config {
        Some(path) => load_config(path)?,
        None => FlareConfig::default(),
    };
    let filter = if nearest { SampleFilter::Nearest } else { config.filter };

    let frame = load_frame(input)?;
    let mut processor = FlareProcessor::new(filter);

    let start = Instant::now();
    let flared = processor.process(&frame, &config.params);
    log::info!(
        "flare applied ({} sampling) in {:.1} ms",
        filter.name(),
        start.elapsed().as_secs_f64() * 1000.0
    );

    save_frame(output, flared)?;
    Ok(())
}
