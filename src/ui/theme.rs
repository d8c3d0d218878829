use egui::{Color32, FontId, Rounding, Stroke, Visuals};

// ── Palette ──────────────────────────────────────────────────────────────────

pub const BG_CANVAS: Color32 = Color32::from_rgb(255, 255, 255);
pub const BG_PANEL: Color32 = Color32::from_rgb(246, 247, 250);
pub const BG_HEADER: Color32 = Color32::from_rgb(250, 250, 252);
pub const BG_LANE_ALT: Color32 = Color32::from_rgb(249, 250, 252);

pub const BORDER: Color32 = Color32::from_rgb(214, 218, 226);
pub const ACCENT: Color32 = Color32::from_rgb(59, 130, 246);

pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(30, 32, 38);
pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(88, 94, 108);
pub const TEXT_ON_BAR: Color32 = Color32::from_rgb(17, 17, 17);
pub const TEXT_ERROR: Color32 = Color32::from_rgb(200, 40, 40);

pub const GRID_MAJOR: Color32 = Color32::from_rgb(209, 213, 219);
pub const GRID_MINOR: Color32 = Color32::from_rgb(233, 235, 239);
pub const TODAY_LINE: Color32 = Color32::from_rgb(239, 68, 68);

// ── Sizes ────────────────────────────────────────────────────────────────────

pub const HEADER_HEIGHT: f32 = 56.0;
/// Vertical distance between task lanes.
pub const LANE_HEIGHT: f32 = 60.0;
pub const BAR_HEIGHT: f32 = 48.0;
pub const BAR_ROUNDING: f32 = 6.0;
pub const HATCH_SPACING: f32 = 10.0;
pub const STATUS_BAR_HEIGHT: f32 = 22.0;

// ── Fonts ────────────────────────────────────────────────────────────────────

pub fn font_grid_label() -> FontId {
    FontId::proportional(12.0)
}

pub fn font_bar_title() -> FontId {
    FontId::proportional(12.5)
}

pub fn font_bar_dates() -> FontId {
    FontId::proportional(10.5)
}

pub fn font_status() -> FontId {
    FontId::proportional(11.0)
}

// ── Task colours ─────────────────────────────────────────────────────────────

/// Colours cycled through for newly added tasks.
pub const TASK_COLORS: &[Color32] = &[
    Color32::from_rgb(0x4A, 0x90, 0xE2),
    Color32::from_rgb(0x50, 0xC8, 0x78),
    Color32::from_rgb(0xFF, 0x7F, 0x50),
    Color32::from_rgb(0x93, 0x70, 0xDB),
    Color32::from_rgb(0xFF, 0x6B, 0x6B),
    Color32::from_rgb(0x4E, 0xCD, 0xC4),
];

pub fn task_color(index: usize) -> Color32 {
    TASK_COLORS[index % TASK_COLORS.len()]
}

/// Semi-transparent variant of a task colour, used for buffer hatching.
pub fn buffer_tint(color: Color32, alpha: u8) -> Color32 {
    let [r, g, b, _] = color.to_srgba_unmultiplied();
    Color32::from_rgba_unmultiplied(r, g, b, alpha)
}

// ── Apply custom visuals ─────────────────────────────────────────────────────

pub fn apply_theme(ctx: &egui::Context) {
    let mut visuals = Visuals::light();

    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.panel_fill = BG_PANEL;
    visuals.window_fill = BG_CANVAS;
    visuals.extreme_bg_color = BG_CANVAS;

    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, BORDER);
    for widget in [
        &mut visuals.widgets.inactive,
        &mut visuals.widgets.hovered,
        &mut visuals.widgets.active,
    ] {
        widget.rounding = Rounding::same(4.0);
    }
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, ACCENT);
    visuals.selection.stroke = Stroke::new(1.0, ACCENT);
    visuals.window_rounding = Rounding::same(8.0);

    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 4.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
    ctx.set_style(style);
}
