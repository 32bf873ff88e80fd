use crate::app::PlannerApp;
use crate::ui::theme;
use egui::{Context, RichText, Window};

/// Render the "About" dialog.
pub fn show_about_dialog(app: &mut PlannerApp, ctx: &Context) {
    let mut should_close = false;
    let layout = theme::layout();
    Window::new("About")
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([layout.about_dialog_width, layout.about_dialog_height])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading(RichText::new("Rust Day Planner").strong());
                ui.add_space(2.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme::text_secondary()),
                );
                ui.add_space(10.0);
                ui.label("A day-planning application");
                ui.label("built with Rust and egui.");
                ui.add_space(14.0);
                if ui.add_sized([100.0, 28.0], egui::Button::new("Close")).clicked() {
                    should_close = true;
                }
            });
        });
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_about = false;
    }
}

/// Render the "How to Use" help dialog.
pub fn show_help_dialog(app: &mut PlannerApp, ctx: &Context) {
    let mut should_close = false;
    let layout = theme::layout();

    Window::new(RichText::new("How to Use").strong().size(14.0))
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([layout.dialog_width * 1.4, 0.0])
        .show(ctx, |ui| {
            ui.add_space(4.0);

            ui.label(RichText::new("Creating").strong());
            ui.label("Click or drag on empty space to create a selection. A plain click leaves a half-hour slot; keep dragging to stretch it.");
            ui.add_space(8.0);

            ui.label(RichText::new("Moving").strong());
            ui.label("Drag a selection's body to move it. The move is blocked while it would overlap a neighbour.");
            ui.add_space(8.0);

            ui.label(RichText::new("Resizing").strong());
            ui.label("Drag the bottom edge of a selection to change its end time. The edge stays grabbable a few minutes past the boundary, and a selection can never shrink below 30 minutes.");
            ui.add_space(8.0);

            ui.label(RichText::new("Notes").strong());
            ui.add_space(2.0);
            let notes = [
                "• Selections snap to 5-minute steps, rounding toward the start of the day.",
                "• Selections may touch but never overlap.",
                "• Each day stands alone: switching days starts from a blank slate.",
                "• Export the current day via File → Export CSV.",
            ];
            for note in &notes {
                ui.label(RichText::new(*note).small());
            }

            ui.add_space(6.0);
            ui.separator();
            ui.add_space(4.0);
            ui.horizontal(|ui| {
                if ui.add_sized([80.0, 28.0], egui::Button::new("Close")).clicked() {
                    should_close = true;
                }
            });
            ui.add_space(2.0);
        });

    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_help = false;
    }
}
