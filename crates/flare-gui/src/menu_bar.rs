use egui::{Key, KeyboardShortcut, Modifiers};

/// Tracks which dialogs are currently open.
#[derive(Default)]
pub struct MenuState {
    pub show_about: bool,
    pub show_shortcuts: bool,
}

/// Actions returned from the menu bar that require processing by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    None,
    LoadPreset,
    SavePreset,
    OpenImage,
    UseProceduralScene,
    SaveSnapshot,
    ResetParams,
}

const LOAD_PRESET: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::O);
const SAVE_PRESET: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::S);
const OPEN_IMAGE: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::I);
const SAVE_SNAPSHOT: KeyboardShortcut = KeyboardShortcut::new(Modifiers::NONE, Key::F12);
const RESET_PARAMS: KeyboardShortcut = KeyboardShortcut::new(Modifiers::COMMAND, Key::R);

/// Key bindings with their descriptions, for the shortcuts dialog.
pub const SHORTCUTS: [(&str, &str); 5] = [
    ("Ctrl+O", "Load Preset"),
    ("Ctrl+S", "Save Preset"),
    ("Ctrl+I", "Open Image"),
    ("F12", "Save Snapshot"),
    ("Ctrl+R", "Reset Parameters"),
];

/// Draw the menu bar inside a `TopBottomPanel`. Returns a `MenuAction` if a file
/// operation was requested.
pub fn draw_menu_bar(ui: &mut egui::Ui, state: &mut MenuState) -> MenuAction {
    let mut action = MenuAction::None;

    egui::menu::bar(ui, |ui| {
        ui.menu_button("File", |ui| {
            if ui
                .add(egui::Button::new("Load Preset...").shortcut_text("Ctrl+O"))
                .clicked()
            {
                action = MenuAction::LoadPreset;
                ui.close_menu();
            }
            if ui
                .add(egui::Button::new("Save Preset...").shortcut_text("Ctrl+S"))
                .clicked()
            {
                action = MenuAction::SavePreset;
                ui.close_menu();
            }
            ui.separator();
            if ui
                .add(egui::Button::new("Open Image...").shortcut_text("Ctrl+I"))
                .clicked()
            {
                action = MenuAction::OpenImage;
                ui.close_menu();
            }
            if ui.button("Procedural Scene").clicked() {
                action = MenuAction::UseProceduralScene;
                ui.close_menu();
            }
            ui.separator();
            if ui
                .add(egui::Button::new("Save Snapshot...").shortcut_text("F12"))
                .clicked()
            {
                action = MenuAction::SaveSnapshot;
                ui.close_menu();
            }
        });

        ui.menu_button("Help", |ui| {
            if ui.button("Keyboard Shortcuts").clicked() {
                state.show_shortcuts = true;
                ui.close_menu();
            }
            if ui.button("About flare-viewer").clicked() {
                state.show_about = true;
                ui.close_menu();
            }
        });
    });

    action
}

/// Consume a pressed keyboard shortcut, if any.
pub fn shortcut_action(ctx: &egui::Context) -> MenuAction {
    ctx.input_mut(|input| {
        if input.consume_shortcut(&LOAD_PRESET) {
            MenuAction::LoadPreset
        } else if input.consume_shortcut(&SAVE_PRESET) {
            MenuAction::SavePreset
        } else if input.consume_shortcut(&OPEN_IMAGE) {
            MenuAction::OpenImage
        } else if input.consume_shortcut(&SAVE_SNAPSHOT) {
            MenuAction::SaveSnapshot
        } else if input.consume_shortcut(&RESET_PARAMS) {
            MenuAction::ResetParams
        } else {
            MenuAction::None
        }
    })
}
