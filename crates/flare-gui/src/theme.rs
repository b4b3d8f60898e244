use egui::{Color32, Stroke};

// Dracula palette
const BACKGROUND: Color32 = Color32::from_rgb(40, 42, 54);
const CURRENT_LINE: Color32 = Color32::from_rgb(68, 71, 90);
const FOREGROUND: Color32 = Color32::from_rgb(248, 248, 242);
const COMMENT: Color32 = Color32::from_rgb(98, 114, 164);
const CYAN: Color32 = Color32::from_rgb(139, 233, 253);
const ORANGE: Color32 = Color32::from_rgb(255, 184, 108);
const PINK: Color32 = Color32::from_rgb(255, 121, 198);
const PURPLE: Color32 = Color32::from_rgb(189, 147, 249);
const RED: Color32 = Color32::from_rgb(255, 85, 85);
const EXTREME_BG: Color32 = Color32::from_rgb(30, 31, 41);

/// Dark visuals for the viewer. The flare tint is blue, so widgets stay
/// in the purple/pink range to keep the viewport the brightest thing on screen.
pub fn visuals() -> egui::Visuals {
    let mut visuals = egui::Visuals::dark();

    visuals.panel_fill = BACKGROUND;
    visuals.window_fill = BACKGROUND;
    visuals.faint_bg_color = CURRENT_LINE;
    visuals.extreme_bg_color = EXTREME_BG;

    visuals.selection.bg_fill = PURPLE;
    visuals.selection.stroke = Stroke::new(1.0, FOREGROUND);

    visuals.hyperlink_color = CYAN;
    visuals.warn_fg_color = ORANGE;
    visuals.error_fg_color = RED;

    visuals.widgets.inactive.bg_fill = CURRENT_LINE;
    visuals.widgets.inactive.weak_bg_fill = CURRENT_LINE;
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, COMMENT);
    visuals.widgets.inactive.bg_stroke = Stroke::new(0.0, COMMENT);

    visuals.widgets.hovered.bg_fill = COMMENT;
    visuals.widgets.hovered.weak_bg_fill = COMMENT;
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.5, FOREGROUND);
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, PURPLE);

    visuals.widgets.active.bg_fill = PURPLE;
    visuals.widgets.active.weak_bg_fill = PURPLE;
    visuals.widgets.active.fg_stroke = Stroke::new(2.0, FOREGROUND);
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, PINK);

    visuals.widgets.noninteractive.bg_fill = BACKGROUND;
    visuals.widgets.noninteractive.weak_bg_fill = BACKGROUND;
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, FOREGROUND);
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(0.0, CURRENT_LINE);

    visuals.window_stroke = Stroke::new(1.0, COMMENT);
    visuals
}

/// Apply the theme to the egui context.
pub fn apply(ctx: &egui::Context) {
    ctx.set_visuals(visuals());
}
