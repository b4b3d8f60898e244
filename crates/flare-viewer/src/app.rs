use crossbeam::channel::Receiver;
use flare_core::{load_config, save_config, FlareConfig, FlareParams, SharedFlareParams};
use flare_gui::{dialogs, MenuAction, MenuState, StatusLine, UiCommand, ViewerSharedState, ViewportState};
use flare_visualizer::snapshot::{SnapshotJob, SnapshotResult, SnapshotWriter};
use flare_visualizer::{SceneSource, ViewerSettings};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Startup options resolved from the command line.
#[derive(Debug, Clone, Default)]
pub struct ViewerOptions {
    pub config: Option<PathBuf>,
    pub image: Option<PathBuf>,
    pub nearest: bool,
}

pub struct FlareViewerApp {
    shared: ViewerSharedState,
    command_rx: Receiver<UiCommand>,
    viewport: Arc<Mutex<ViewportState>>,
    menu: MenuState,
    status: StatusLine,
    snapshot_writer: Option<SnapshotWriter>,
    /// Destination of a capture requested but not yet read back.
    pending_snapshot: Option<PathBuf>,
}

impl FlareViewerApp {
    pub fn new(options: &ViewerOptions) -> Self {
        let (command_tx, command_rx) = flare_gui::command_channel();
        let params = Arc::new(SharedFlareParams::default());

        let snapshot_writer = match SnapshotWriter::start() {
            Ok(writer) => Some(writer),
            Err(e) => {
                log::error!("snapshot writer unavailable: {}", e);
                None
            }
        };

        let mut app = Self {
            shared: ViewerSharedState::new(params, command_tx),
            command_rx,
            viewport: Arc::new(Mutex::new(ViewportState::new(ViewerSettings::default()))),
            menu: MenuState::default(),
            status: StatusLine::default(),
            snapshot_writer,
            pending_snapshot: None,
        };

        if let Some(path) = &options.config {
            app.handle_command(UiCommand::LoadPreset(path.clone()));
        }
        if let Some(path) = &options.image {
            app.handle_command(UiCommand::OpenImage(path.clone()));
        }
        if options.nearest {
            app.with_viewport(|state| state.settings.filter = flare_core::SampleFilter::Nearest);
        }
        app
    }

    fn with_viewport<R>(&self, f: impl FnOnce(&mut ViewportState) -> R) -> Option<R> {
        match self.viewport.lock() {
            Ok(mut state) => Some(f(&mut state)),
            Err(_) => {
                log::error!("viewport state lock poisoned");
                None
            }
        }
    }

    fn settings(&self) -> ViewerSettings {
        self.with_viewport(|state| state.settings.clone()).unwrap_or_default()
    }

    /// Turn a menu or shortcut action into a command, asking for paths as needed.
    fn dispatch_action(&mut self, action: MenuAction) {
        let command = match action {
            MenuAction::None => None,
            MenuAction::LoadPreset => dialogs::pick_preset_to_load().map(UiCommand::LoadPreset),
            MenuAction::SavePreset => dialogs::pick_preset_to_save().map(UiCommand::SavePreset),
            MenuAction::OpenImage => dialogs::pick_image().map(UiCommand::OpenImage),
            MenuAction::UseProceduralScene => Some(UiCommand::UseProceduralScene),
            MenuAction::SaveSnapshot => dialogs::pick_snapshot_path().map(UiCommand::SaveSnapshot),
            MenuAction::ResetParams => Some(UiCommand::ResetParams),
        };
        if let Some(command) = command {
            self.shared.send(command);
        }
    }

    fn handle_command(&mut self, command: UiCommand) {
        log::debug!("command: {:?}", command);
        match command {
            UiCommand::LoadPreset(path) => self.load_preset(&path),
            UiCommand::SavePreset(path) => self.save_preset(&path),
            UiCommand::OpenImage(path) => self.open_image(path),
            UiCommand::UseProceduralScene => {
                self.with_viewport(|state| {
                    state.queue_clear_image();
                    state.settings.scene = SceneSource::Procedural;
                });
                self.status = StatusLine::info("Procedural scene");
            }
            UiCommand::SaveSnapshot(path) => {
                if self.snapshot_writer.is_none() {
                    self.status = StatusLine::error("Snapshots are unavailable");
                    return;
                }
                self.with_viewport(|state| state.request_capture());
                self.pending_snapshot = Some(path);
            }
            UiCommand::ResetParams => {
                self.shared.params.store_all(&FlareParams::default());
                self.status = StatusLine::info("Parameters reset");
            }
        }
    }

    fn load_preset(&mut self, path: &Path) {
        match load_config(path) {
            Ok(config) => {
                self.shared.params.store_all(&config.params.clamped());
                self.with_viewport(|state| state.settings.filter = config.filter);
                log::info!("loaded preset {}", path.display());
                self.status = StatusLine::info(format!("Loaded {}", path.display()));
            }
            Err(e) => {
                log::warn!("failed to load preset {}: {}", path.display(), e);
                self.status = StatusLine::error(format!("Load failed: {}", e));
            }
        }
    }

    fn save_preset(&mut self, path: &Path) {
        let config = FlareConfig {
            params: self.shared.params.snapshot(),
            filter: self.settings().filter,
            ..FlareConfig::default()
        };
        match save_config(path, &config) {
            Ok(()) => {
                log::info!("saved preset {}", path.display());
                self.status = StatusLine::info(format!("Saved {}", path.display()));
            }
            Err(e) => {
                log::warn!("failed to save preset {}: {}", path.display(), e);
                self.status = StatusLine::error(format!("Save failed: {}", e));
            }
        }
    }

    fn open_image(&mut self, path: PathBuf) {
        match image::open(&path) {
            Ok(image) => {
                let rgba = image.to_rgba8();
                log::info!("opened {} ({}x{})", path.display(), rgba.width(), rgba.height());
                self.status = StatusLine::info(format!("Scene: {}", path.display()));
                self.with_viewport(move |state| {
                    state.queue_image(rgba);
                    state.settings.scene = SceneSource::Image(path);
                });
            }
            Err(e) => {
                log::warn!("failed to open {}: {}", path.display(), e);
                self.status = StatusLine::error(format!("Open failed: {}", e));
            }
        }
    }

    /// Hand a finished capture to the writer and collect write results.
    fn pump_snapshots(&mut self) {
        if self.pending_snapshot.is_some() {
            if let Some(image) = self.with_viewport(|state| state.take_capture()).flatten() {
                if let (Some(path), Some(writer)) = (self.pending_snapshot.take(), &self.snapshot_writer) {
                    if !writer.submit(SnapshotJob { image, path }) {
                        self.status = StatusLine::error("Snapshot queue is full");
                    }
                }
            }
        }

        let results = match &self.snapshot_writer {
            Some(writer) => writer.drain_results(),
            None => Vec::new(),
        };
        for result in results {
            self.status = match result {
                SnapshotResult::Saved(path) => StatusLine::info(format!("Snapshot {}", path.display())),
                SnapshotResult::Failed { path, reason } => {
                    StatusLine::error(format!("Snapshot {} failed: {}", path.display(), reason))
                }
            };
        }
    }
}

impl eframe::App for FlareViewerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let dt = ctx.input(|i| i.stable_dt);
        self.with_viewport(|state| state.advance_clock(dt));

        self.pump_snapshots();

        let action = flare_gui::draw_viewer(ctx, &self.shared, &self.viewport, &mut self.menu, &self.status);
        self.dispatch_action(action);

        let commands: Vec<UiCommand> = self.command_rx.try_iter().collect();
        for command in commands {
            self.handle_command(command);
        }

        let animating = self.settings().animate;
        if animating || self.pending_snapshot.is_some() {
            ctx.request_repaint();
        }
    }

    fn on_exit(&mut self, gl: Option<&glow::Context>) {
        if let Some(gl) = gl {
            self.with_viewport(|state| state.destroy(gl));
        }
        if let Some(mut writer) = self.snapshot_writer.take() {
            writer.stop();
        }
        log::info!("flare viewer closed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use flare_core::{FlareParamId, SampleFilter};

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("flare-app-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_reset_restores_defaults() {
        let mut app = FlareViewerApp::new(&ViewerOptions::default());
        app.shared.params.store(FlareParamId::Scale, 2.5);
        app.handle_command(UiCommand::ResetParams);
        assert_eq!(app.shared.params.snapshot(), FlareParams::default());
    }

    #[test]
    fn test_preset_save_then_load() {
        let path = temp_path("preset.json");
        let mut app = FlareViewerApp::new(&ViewerOptions::default());
        app.shared.params.store(FlareParamId::Threshold, 1.25);
        app.with_viewport(|state| state.settings.filter = SampleFilter::Nearest);
        app.handle_command(UiCommand::SavePreset(path.clone()));

        let loaded = FlareViewerApp::new(&ViewerOptions { config: Some(path.clone()), ..Default::default() });
        std::fs::remove_file(&path).ok();

        assert_eq!(loaded.shared.params.load(FlareParamId::Threshold), 1.25);
        assert_eq!(loaded.settings().filter, SampleFilter::Nearest);
        assert!(!loaded.status.is_error);
    }

    #[test]
    fn test_missing_preset_reports_error() {
        let mut app = FlareViewerApp::new(&ViewerOptions::default());
        app.handle_command(UiCommand::LoadPreset(PathBuf::from("/nonexistent/preset.json")));
        assert!(app.status.is_error);
        assert_eq!(app.shared.params.snapshot(), FlareParams::default());
    }

    #[test]
    fn test_procedural_scene_command() {
        let mut app = FlareViewerApp::new(&ViewerOptions::default());
        app.with_viewport(|state| state.settings.scene = SceneSource::Image(PathBuf::from("a.png")));
        app.handle_command(UiCommand::UseProceduralScene);
        assert_eq!(app.settings().scene, SceneSource::Procedural);
    }

    #[test]
    fn test_nearest_option() {
        let app = FlareViewerApp::new(&ViewerOptions { nearest: true, ..Default::default() });
        assert_eq!(app.settings().filter, SampleFilter::Nearest);
    }

    #[test]
    fn test_actions_become_commands() {
        let mut app = FlareViewerApp::new(&ViewerOptions::default());
        app.dispatch_action(MenuAction::ResetParams);
        app.dispatch_action(MenuAction::UseProceduralScene);
        app.dispatch_action(MenuAction::None);
        let commands: Vec<UiCommand> = app.command_rx.try_iter().collect();
        assert_eq!(commands, vec![UiCommand::ResetParams, UiCommand::UseProceduralScene]);
    }
}
