pub mod dialogs;
pub mod flare_panel;
pub mod menu_bar;
pub mod state;
pub mod theme;
pub mod viewport;

pub use menu_bar::{MenuAction, MenuState};
pub use state::{command_channel, StatusLine, UiCommand, ViewerSharedState};
pub use viewport::ViewportState;

use std::sync::{Arc, Mutex};

/// Draw the complete viewer UI: menu bar, flare panel and GPU viewport.
///
/// Returns the menu or shortcut action the caller should carry out.
pub fn draw_viewer(
    ctx: &egui::Context,
    shared: &ViewerSharedState,
    viewport_state: &Arc<Mutex<ViewportState>>,
    menu_state: &mut MenuState,
    status: &StatusLine,
) -> MenuAction {
    let mut action = menu_bar::shortcut_action(ctx);

    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        let menu_action = menu_bar::draw_menu_bar(ui, menu_state);
        if menu_action != MenuAction::None {
            action = menu_action;
        }
    });

    egui::SidePanel::left("flare_panel")
        .resizable(true)
        .default_width(260.0)
        .show(ctx, |ui| {
            egui::ScrollArea::vertical().show(ui, |ui| match viewport_state.lock() {
                Ok(mut state) => {
                    let error = state.last_error.clone();
                    flare_panel::draw_flare_panel(ui, shared, &mut state.settings, status);
                    if let Some(error) = error {
                        ui.colored_label(ui.visuals().error_fg_color, error);
                    }
                }
                Err(_) => {
                    ui.label("Viewer state unavailable");
                }
            });
        });

    egui::CentralPanel::default()
        .frame(egui::Frame::NONE)
        .show(ctx, |ui| {
            viewport::draw_flare_viewport(ui, shared.params.clone(), viewport_state.clone());
        });

    dialogs::draw_about_dialog(ctx, &mut menu_state.show_about);
    dialogs::draw_shortcuts_dialog(ctx, &mut menu_state.show_shortcuts);

    action
}
