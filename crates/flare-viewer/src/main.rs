mod app;
mod cli;
mod error;
mod headless;

use app::{FlareViewerApp, ViewerOptions};
use cli::Mode;
use error::Result;
use std::process::ExitCode;

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let args = cli::parse_args(std::env::args().skip(1))?;

    match args.mode()? {
        Mode::Help => {
            println!("{}", cli::USAGE);
            Ok(())
        }
        Mode::Headless { input, output } => {
            headless::run(&input, &output, args.config.as_deref(), args.nearest)
        }
        Mode::Viewer => {
            let options = ViewerOptions {
                config: args.config,
                image: args.image,
                nearest: args.nearest,
            };
            run_viewer(options)
        }
    }
}

fn run_viewer(options: ViewerOptions) -> Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("Anamorphic Flare")
            .with_inner_size([1280.0, 760.0])
            .with_min_inner_size([480.0, 320.0]),
        renderer: eframe::Renderer::Glow,
        ..Default::default()
    };

    eframe::run_native(
        "flare-viewer",
        native_options,
        Box::new(move |cc| {
            flare_gui::theme::apply(&cc.egui_ctx);
            if cc.gl.is_none() {
                log::warn!("no OpenGL context; the viewport will stay empty");
            }
            Ok(Box::new(FlareViewerApp::new(&options)))
        }),
    )?;
    Ok(())
}
