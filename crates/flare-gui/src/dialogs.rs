use std::path::PathBuf;

use crate::menu_bar::SHORTCUTS;

/// Preset path used when no file dialog is available.
pub const DEFAULT_PRESET_PATH: &str = "flare-preset.json";
/// Snapshot path used when no file dialog is available.
pub const DEFAULT_SNAPSHOT_PATH: &str = "flare-snapshot.png";

/// Draw the About dialog window.
pub fn draw_about_dialog(ctx: &egui::Context, open: &mut bool) {
    egui::Window::new("About flare-viewer")
        .open(open)
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("flare-viewer");
                ui.label(format!("Version {}", env!("CARGO_PKG_VERSION")));
                ui.add_space(8.0);
                ui.label("Anamorphic lens flare post-processor");
                ui.label("Bright pixels bleed into blue horizontal streaks");
                ui.label("over a live scene or a still image.");
                ui.add_space(8.0);
                ui.label("License: GPL-3.0");
            });
        });
}

/// Draw the Keyboard Shortcuts dialog window.
pub fn draw_shortcuts_dialog(ctx: &egui::Context, open: &mut bool) {
    egui::Window::new("Keyboard Shortcuts")
        .open(open)
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui| {
            egui::Grid::new("shortcuts_grid")
                .num_columns(2)
                .spacing([40.0, 4.0])
                .show(ui, |ui| {
                    for (key, desc) in SHORTCUTS {
                        ui.label(egui::RichText::new(key).monospace());
                        ui.label(desc);
                        ui.end_row();
                    }
                });
        });
}

#[cfg(feature = "file-dialog")]
pub fn pick_preset_to_load() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .add_filter("Flare preset", &["json"])
        .pick_file()
}

#[cfg(feature = "file-dialog")]
pub fn pick_preset_to_save() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .add_filter("Flare preset", &["json"])
        .set_file_name(DEFAULT_PRESET_PATH)
        .save_file()
}

#[cfg(feature = "file-dialog")]
pub fn pick_image() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .add_filter("Images", &["png", "jpg", "jpeg"])
        .pick_file()
}

#[cfg(feature = "file-dialog")]
pub fn pick_snapshot_path() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .add_filter("PNG image", &["png"])
        .set_file_name(DEFAULT_SNAPSHOT_PATH)
        .save_file()
}

#[cfg(not(feature = "file-dialog"))]
pub fn pick_preset_to_load() -> Option<PathBuf> {
    Some(PathBuf::from(DEFAULT_PRESET_PATH))
}

#[cfg(not(feature = "file-dialog"))]
pub fn pick_preset_to_save() -> Option<PathBuf> {
    Some(PathBuf::from(DEFAULT_PRESET_PATH))
}

#[cfg(not(feature = "file-dialog"))]
pub fn pick_image() -> Option<PathBuf> {
    log::warn!("opening images needs the file-dialog feature; use --image instead");
    None
}

#[cfg(not(feature = "file-dialog"))]
pub fn pick_snapshot_path() -> Option<PathBuf> {
    Some(PathBuf::from(DEFAULT_SNAPSHOT_PATH))
}
