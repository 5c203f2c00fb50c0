use egui::{Color32, FontId, Rounding, Stroke, Visuals};
use hack_planner::model::PhaseKind;

// ── Palette ──────────────────────────────────────────────────────────────────

pub const BG_DARK: Color32 = Color32::from_rgb(13, 11, 26);
pub const BG_PANEL: Color32 = Color32::from_rgb(22, 19, 40);
pub const BG_HEADER: Color32 = Color32::from_rgb(30, 26, 52);
pub const BG_HEADER_SUB: Color32 = Color32::from_rgb(24, 21, 44);
pub const BG_FIELD: Color32 = Color32::from_rgb(16, 14, 30);
pub const BG_WEEKEND: Color32 = Color32::from_rgba_premultiplied(255, 255, 255, 5);
pub const BG_TODAY: Color32 = Color32::from_rgba_premultiplied(90, 70, 200, 40);
pub const BG_ROW_HOVER: Color32 = Color32::from_rgba_premultiplied(255, 255, 255, 10);

pub const BORDER_SUBTLE: Color32 = Color32::from_rgb(48, 42, 76);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(232, 230, 245);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(160, 154, 190);
pub const TEXT_DIM: Color32 = Color32::from_rgb(104, 98, 136);
pub const TEXT_ON_BAR: Color32 = Color32::from_rgb(20, 16, 10);

pub const ACCENT: Color32 = Color32::from_rgb(124, 77, 255);
pub const TODAY_LINE: Color32 = Color32::from_rgb(244, 63, 94);
pub const GRID_LINE: Color32 = Color32::from_rgb(34, 30, 58);
pub const MONTH_LINE: Color32 = Color32::from_rgb(70, 62, 110);

// ── Sizes ────────────────────────────────────────────────────────────────────

pub const ROW_LABEL_WIDTH: f32 = 130.0;
pub const ROW_HEIGHT: f32 = 40.0;
pub const MONTH_HEADER_HEIGHT: f32 = 28.0;
pub const DAY_HEADER_HEIGHT: f32 = 24.0;
pub const DAYNAME_HEADER_HEIGHT: f32 = 20.0;
pub const HEADER_HEIGHT: f32 = MONTH_HEADER_HEIGHT + DAY_HEADER_HEIGHT + DAYNAME_HEADER_HEIGHT;
pub const BAR_ROUNDING: f32 = 5.0;
pub const BAR_INSET: f32 = 8.0; // vertical inset so bars don't touch row edges
pub const SIDE_PANEL_WIDTH: f32 = 300.0;
pub const STATUS_BAR_HEIGHT: f32 = 24.0;

// ── Phases ───────────────────────────────────────────────────────────────────

/// Base and highlight colour for a phase bar.
pub fn phase_colors(kind: PhaseKind) -> (Color32, Color32) {
    match kind {
        PhaseKind::Pre => (Color32::from_rgb(230, 184, 0), Color32::from_rgb(255, 214, 51)),
        PhaseKind::Hack => (Color32::from_rgb(34, 197, 94), Color32::from_rgb(74, 222, 128)),
        PhaseKind::Post => (Color32::from_rgb(249, 115, 22), Color32::from_rgb(251, 146, 60)),
    }
}

// ── Fonts ────────────────────────────────────────────────────────────────────

pub fn font_header() -> FontId {
    FontId::proportional(12.5)
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

// ── Apply custom visuals ─────────────────────────────────────────────────────

pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::dark();

    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_PANEL;
    visuals.extreme_bg_color = BG_FIELD;
    visuals.faint_bg_color = BG_HEADER_SUB;

    visuals.widgets.noninteractive.bg_fill = BG_PANEL;
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, TEXT_SECONDARY);
    visuals.widgets.noninteractive.rounding = Rounding::same(4.0);

    visuals.widgets.inactive.bg_fill = Color32::from_rgb(38, 33, 66);
    visuals.widgets.inactive.weak_bg_fill = Color32::from_rgb(38, 33, 66);
    visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.inactive.rounding = Rounding::same(4.0);

    visuals.widgets.hovered.bg_fill = Color32::from_rgb(50, 44, 86);
    visuals.widgets.hovered.weak_bg_fill = Color32::from_rgb(50, 44, 86);
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, TEXT_PRIMARY);
    visuals.widgets.hovered.rounding = Rounding::same(4.0);

    visuals.widgets.active.bg_fill = Color32::from_rgb(60, 52, 100);
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.widgets.active.fg_stroke = Stroke::new(2.0, Color32::WHITE);
    visuals.widgets.active.rounding = Rounding::same(4.0);

    visuals.selection.bg_fill = Color32::from_rgba_premultiplied(124, 77, 255, 60);
    visuals.selection.stroke = Stroke::new(1.0, ACCENT);

    visuals.window_rounding = Rounding::same(8.0);
    visuals.window_stroke = Stroke::new(1.0, BORDER_SUBTLE);
    visuals.striped = false;

    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 4.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
    ctx.set_style(style);
}
