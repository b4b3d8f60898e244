use std::path::PathBuf;

use crate::error::ViewerError;

pub const USAGE: &str = "\
usage:
  flare-viewer [--config preset.json] [--image scene.png] [--nearest]
  flare-viewer --input in.png --output out.png [--config preset.json] [--nearest]

options:
  --input <path>    image to process without opening a window
  --output <path>   where the processed image is written
  --config <path>   flare preset (JSON) to start from
  --image <path>    still image to use as the viewer's scene
  --nearest         sample neighbours with nearest filtering
  -h, --help        print this message";

/// Parsed command line.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CliArgs {
    pub input: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub image: Option<PathBuf>,
    pub nearest: bool,
    pub help: bool,
}

/// What the binary should do.
#[derive(Debug, Clone, PartialEq)]
pub enum Mode {
    Help,
    Viewer,
    Headless { input: PathBuf, output: PathBuf },
}

/// Parse arguments, excluding the program name.
pub fn parse_args<I>(args: I) -> Result<CliArgs, ViewerError>
where
    I: IntoIterator<Item = String>,
{
    let mut parsed = CliArgs::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--input" => parsed.input = Some(path_value(&arg, args.next())?),
            "--output" => parsed.output = Some(path_value(&arg, args.next())?),
            "--config" => parsed.config = Some(path_value(&arg, args.next())?),
            "--image" => parsed.image = Some(path_value(&arg, args.next())?),
            "--nearest" => parsed.nearest = true,
            "-h" | "--help" => parsed.help = true,
            _ => return Err(ViewerError::UnknownArgument(arg)),
        }
    }

    Ok(parsed)
}

fn path_value(flag: &str, value: Option<String>) -> Result<PathBuf, ViewerError> {
    match value {
        Some(v) if !v.starts_with("--") => Ok(PathBuf::from(v)),
        _ => Err(ViewerError::MissingValue(flag.to_string())),
    }
}

impl CliArgs {
    pub fn mode(&self) -> Result<Mode, ViewerError> {
        if self.help {
            return Ok(Mode::Help);
        }
        match (&self.input, &self.output) {
            (Some(input), Some(output)) => Ok(Mode::Headless {
                input: input.clone(),
                output: output.clone(),
            }),
            (None, None) => Ok(Mode::Viewer),
            _ => Err(ViewerError::IncompleteHeadless),
        }
    }
}
