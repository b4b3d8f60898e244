use egui::Ui;
use flare_core::{FlareParameter, SampleFilter, SharedFlareParams};
use flare_visualizer::ViewerSettings;

use crate::state::{StatusLine, UiCommand, ViewerSharedState};

/// Draw the flare debug panel: parameter sliders and viewer options.
pub fn draw_flare_panel(
    ui: &mut Ui,
    shared: &ViewerSharedState,
    settings: &mut ViewerSettings,
    status: &StatusLine,
) {
    ui.heading("Anamorphic Flare");
    ui.separator();

    let current = shared.params.snapshot();
    for param in FlareParameter::from_params(&current) {
        draw_param_slider(ui, &shared.params, &param);
    }

    ui.horizontal(|ui| {
        if ui.button("Reset").clicked() {
            shared.send(UiCommand::ResetParams);
        }
        ui.checkbox(&mut settings.flare_enabled, "Enabled");
    });

    ui.add_space(8.0);

    // -- Scene --
    ui.heading("Scene");
    ui.separator();

    ui.horizontal(|ui| {
        ui.label("Source:");
        ui.label(settings.scene.label());
    });
    if ui.button("Use procedural scene").clicked() {
        shared.send(UiCommand::UseProceduralScene);
    }
    ui.checkbox(&mut settings.animate, "Animate");

    egui::ComboBox::from_label("Sampling")
        .selected_text(settings.filter.name())
        .show_ui(ui, |ui| {
            for filter in [SampleFilter::Linear, SampleFilter::Nearest] {
                ui.selectable_value(&mut settings.filter, filter, filter.name());
            }
        });

    if !status.message.is_empty() {
        ui.add_space(8.0);
        ui.separator();
        let text = egui::RichText::new(&status.message).small();
        if status.is_error {
            ui.colored_label(ui.visuals().error_fg_color, text);
        } else {
            ui.label(text);
        }
    }
}

/// One slider bound to a shared parameter. The slider clamps to the
/// descriptor's range; stored values are otherwise left alone.
fn draw_param_slider(ui: &mut Ui, params: &SharedFlareParams, param: &FlareParameter) {
    let mut value = param.value;
    let slider = egui::Slider::new(&mut value, param.min..=param.max)
        .text(&param.name)
        .step_by(param.step as f64)
        .max_decimals(decimals_for_step(param.step));

    let response = ui.add(slider).on_hover_text(&param.description);
    if response.changed() {
        params.store(param.id, value);
    }
}

/// Decimal places needed to show every step of a slider.
fn decimals_for_step(step: f32) -> usize {
    let mut decimals = 0;
    let mut scaled = step as f64;
    while decimals < 6 && (scaled - scaled.round()).abs() > 1e-6 {
        scaled *= 10.0;
        decimals += 1;
    }
    decimals
}
