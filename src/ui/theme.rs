use egui::{Color32, FontId, Rounding, Stroke, Visuals};

// ── Palette ──────────────────────────────────────────────────────────────────

pub const BG_DARK: Color32 = Color32::from_rgb(22, 24, 29);
pub const BG_PANEL: Color32 = Color32::from_rgb(29, 31, 37);
pub const BG_HEADER: Color32 = Color32::from_rgb(35, 38, 45);
/// Fill of every second subcontractor row.
pub const BG_ROW_ALT: Color32 = Color32::from_rgb(26, 28, 34);

pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(52, 56, 66);
/// Outline of the selected or dragged bar.
pub const BORDER_ACCENT: Color32 = Color32::from_rgb(245, 180, 60);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(228, 230, 235);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(150, 156, 170);
pub const TEXT_DIM: Color32 = Color32::from_rgb(98, 104, 118);
pub const TEXT_ON_BAR: Color32 = Color32::WHITE;

/// Bar color for a row without a subcontractor.
pub const ACCENT: Color32 = Color32::from_rgb(59, 130, 246);
pub const TODAY_LINE: Color32 = Color32::from_rgb(239, 68, 68);
pub const GRID_LINE: Color32 = Color32::from_rgb(38, 41, 49);
/// Line between Sunday and Monday.
pub const GRID_LINE_WEEK: Color32 = Color32::from_rgb(62, 66, 78);
pub const DELETE_BG: Color32 = Color32::from_rgb(254, 226, 226);
pub const DELETE_FG: Color32 = Color32::from_rgb(220, 38, 38);

// ── Sizes ────────────────────────────────────────────────────────────────────

pub const HEADER_HEIGHT: f32 = 50.0;
pub const LABEL_WIDTH: f32 = 240.0;
pub const RESIZE_HANDLE_WIDTH: f32 = 10.0;
pub const MIN_BAR_WIDTH: f32 = 10.0;
/// Horizontal gap left between a bar and the next day column.
pub const BAR_INSET: f32 = 4.0;
pub const BAR_ROUNDING: f32 = 5.0;
pub const STATUS_BAR_HEIGHT: f32 = 24.0;

// ── Fonts ────────────────────────────────────────────────────────────────────

pub fn font_header() -> FontId {
    FontId::proportional(12.0)
}

pub fn font_sub() -> FontId {
    FontId::proportional(10.5)
}

pub fn font_bar() -> FontId {
    FontId::proportional(11.5)
}

pub fn font_small() -> FontId {
    FontId::proportional(9.5)
}

pub fn font_row_title() -> FontId {
    FontId::proportional(13.0)
}

/// Dark visuals with the timeline palette on panels, menus and buttons.
pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::dark();
    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_PANEL;
    visuals.window_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.window_rounding = Rounding::same(6.0);

    let widgets = &mut visuals.widgets;
    widgets.noninteractive.bg_fill = BG_PANEL;
    widgets.noninteractive.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    for (state, fill, edge) in [
        (&mut widgets.inactive, BG_HEADER, BORDER_SUBTLE),
        (&mut widgets.hovered, BORDER_SUBTLE, ACCENT),
        (&mut widgets.active, BORDER_SUBTLE, BORDER_ACCENT),
    ] {
        state.bg_fill = fill;
        state.weak_bg_fill = fill;
        state.bg_stroke = Stroke::new(1.0, edge);
    }

    visuals.selection.bg_fill = ACCENT.linear_multiply(0.35);
    visuals.selection.stroke = Stroke::new(1.0, ACCENT);
    ctx.set_visuals(visuals);
}
