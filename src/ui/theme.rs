//! Accessor layer over the active [`ThemeDefinition`].
//!
//! The app calls [`set_active`] once per frame before drawing; everything
//! else reads individual values through the functions below so call sites
//! stay as terse as with plain constants.

use std::cell::RefCell;

use egui::{Color32, FontId, Rounding, Stroke, Visuals};

use super::theme_def::{ThemeDefinition, ThemeLayout};

thread_local! {
    static ACTIVE: RefCell<ThemeDefinition> = RefCell::new(ThemeDefinition::default());
}

pub fn set_active(def: &ThemeDefinition) {
    ACTIVE.with(|t| *t.borrow_mut() = def.clone());
}

fn with<T>(f: impl FnOnce(&ThemeDefinition) -> T) -> T {
    ACTIVE.with(|t| f(&t.borrow()))
}

// ── Colors ───────────────────────────────────────────────────────────────────

pub fn bg_dark() -> Color32 {
    with(|t| t.colors.bg_dark)
}

pub fn bg_panel() -> Color32 {
    with(|t| t.colors.bg_panel)
}

pub fn bg_gutter() -> Color32 {
    with(|t| t.colors.bg_gutter)
}

pub fn bg_selected() -> Color32 {
    with(|t| t.colors.bg_selected)
}

pub fn border_subtle() -> Color32 {
    with(|t| t.colors.border_subtle)
}

pub fn border_accent() -> Color32 {
    with(|t| t.colors.border_accent)
}

pub fn text_primary() -> Color32 {
    with(|t| t.colors.text_primary)
}

pub fn text_secondary() -> Color32 {
    with(|t| t.colors.text_secondary)
}

pub fn text_dim() -> Color32 {
    with(|t| t.colors.text_dim)
}

pub fn text_on_block() -> Color32 {
    with(|t| t.colors.text_on_block)
}

pub fn accent() -> Color32 {
    with(|t| t.colors.accent)
}

pub fn now_line() -> Color32 {
    with(|t| t.colors.now_line)
}

pub fn hour_line() -> Color32 {
    with(|t| t.colors.hour_line)
}

pub fn half_hour_line() -> Color32 {
    with(|t| t.colors.half_hour_line)
}

pub fn handle_color() -> Color32 {
    with(|t| t.colors.handle_color)
}

pub fn status_bar_bg() -> Color32 {
    with(|t| t.colors.status_bar_bg)
}

/// Block fill for the selection at `index`; the palette repeats.
pub fn block_color(index: usize) -> Color32 {
    with(|t| {
        let palette = &t.colors.block_palette;
        if palette.is_empty() {
            t.colors.accent
        } else {
            palette[index % palette.len()]
        }
    })
}

// ── Fonts ────────────────────────────────────────────────────────────────────

pub fn font_hour() -> FontId {
    FontId::proportional(with(|t| t.typography.font_hour_size))
}

pub fn font_block() -> FontId {
    FontId::proportional(with(|t| t.typography.font_block_size))
}

pub fn font_small() -> FontId {
    FontId::proportional(with(|t| t.typography.font_small_size))
}

pub fn font_menu() -> FontId {
    FontId::proportional(with(|t| t.typography.font_menu_size))
}

pub fn font_status() -> FontId {
    FontId::proportional(with(|t| t.typography.font_status_size))
}

// ── Sizes & layout ───────────────────────────────────────────────────────────

pub fn block_rounding() -> f32 {
    with(|t| t.sizing.block_rounding)
}

pub fn block_inset() -> f32 {
    with(|t| t.sizing.block_inset)
}

pub fn status_bar_height() -> f32 {
    with(|t| t.sizing.status_bar_height)
}

pub fn side_panel_default_width() -> f32 {
    with(|t| t.sizing.side_panel_default_width)
}

pub fn side_panel_min_width() -> f32 {
    with(|t| t.sizing.side_panel_min_width)
}

pub fn layout() -> ThemeLayout {
    with(|t| t.layout.clone())
}

// ── Apply to egui ────────────────────────────────────────────────────────────

pub fn apply_theme(ctx: &egui::Context) {
    let (def, mut visuals) = with(|t| {
        let base = if t.meta.variant == "light" {
            Visuals::light()
        } else {
            Visuals::dark()
        };
        (t.clone(), base)
    });

    let widget_rounding = Rounding::same(def.sizing.widget_rounding);

    visuals.override_text_color = Some(def.colors.text_primary);
    visuals.panel_fill = def.colors.bg_panel;
    visuals.window_fill = def.colors.bg_panel;
    visuals.extreme_bg_color = def.colors.extreme_bg;
    visuals.faint_bg_color = def.colors.faint_bg;

    visuals.widgets.noninteractive.bg_fill = def.colors.bg_panel;
    visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, def.colors.border_subtle);
    visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, def.colors.text_secondary);
    visuals.widgets.noninteractive.rounding = widget_rounding;

    visuals.widgets.inactive.bg_fill = def.colors.widget_bg_inactive;
    visuals.widgets.inactive.bg_stroke = Stroke::new(1.0, def.colors.border_subtle);
    visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, def.colors.text_primary);
    visuals.widgets.inactive.rounding = widget_rounding;

    visuals.widgets.hovered.bg_fill = def.colors.widget_bg_hovered;
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, def.colors.accent);
    visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, def.colors.text_primary);
    visuals.widgets.hovered.rounding = widget_rounding;

    visuals.widgets.active.bg_fill = def.colors.widget_bg_active;
    visuals.widgets.active.bg_stroke = Stroke::new(1.0, def.colors.accent);
    visuals.widgets.active.fg_stroke = Stroke::new(2.0, def.colors.text_on_block);
    visuals.widgets.active.rounding = widget_rounding;

    visuals.widgets.open.bg_fill = def.colors.widget_bg_open;
    visuals.widgets.open.bg_stroke = Stroke::new(1.0, def.colors.accent);
    visuals.widgets.open.fg_stroke = Stroke::new(1.0, def.colors.text_primary);
    visuals.widgets.open.rounding = widget_rounding;

    visuals.selection.bg_fill = def.colors.bg_selected;
    visuals.selection.stroke = Stroke::new(1.0, def.colors.accent);

    visuals.window_rounding = Rounding::same(def.sizing.window_rounding);
    visuals.window_stroke = Stroke::new(1.0, def.colors.border_subtle);

    visuals.striped = false;

    ctx.set_visuals(visuals);

    let mut style = (*ctx.style()).clone();
    style.spacing.item_spacing = egui::vec2(8.0, 4.0);
    style.spacing.button_padding = egui::vec2(8.0, 4.0);
    ctx.set_style(style);
}
