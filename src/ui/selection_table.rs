use egui::{RichText, Ui};

use crate::model::DayPlanner;
use crate::ui::theme;

/// Render the left-side panel listing the day's selections.
///
/// Read-only by design: every mutation goes through the planner's pointer
/// events, so the table is purely a second view of the same state.
pub fn show_selection_table(planner: &DayPlanner, ui: &mut Ui) {
    let selections = planner.selections();

    ui.add_space(2.0);
    ui.horizontal(|ui| {
        ui.label(
            RichText::new(format!("{}  Selections", egui_phosphor::regular::CLOCK))
                .strong()
                .size(15.0)
                .color(theme::text_primary()),
        );
        ui.add_space(4.0);
        ui.label(
            RichText::new(format!("({})", selections.len()))
                .size(11.0)
                .color(theme::text_dim()),
        );
    });
    ui.add_space(4.0);
    ui.separator();
    ui.add_space(2.0);

    if selections.is_empty() {
        ui.add_space(8.0);
        ui.label(
            RichText::new("Drag on the day to carve out a time slot.")
                .size(11.0)
                .color(theme::text_dim()),
        );
        return;
    }

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            for (i, sel) in selections.iter().enumerate() {
                let is_active = planner.active_index() == Some(i);

                let row_bg = if is_active {
                    theme::bg_selected()
                } else if i % 2 == 0 {
                    theme::bg_panel()
                } else {
                    theme::bg_dark()
                };

                let frame = egui::Frame {
                    fill: row_bg,
                    rounding: egui::Rounding::same(4.0),
                    inner_margin: egui::Margin::symmetric(6.0, 4.0),
                    outer_margin: egui::Margin::ZERO,
                    stroke: egui::Stroke::NONE,
                    shadow: egui::epaint::Shadow::NONE,
                };

                frame.show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.spacing_mut().item_spacing.x = 6.0;

                        // Color dot matching the block on the canvas
                        let (dot_rect, _) =
                            ui.allocate_exact_size(egui::vec2(6.0, 6.0), egui::Sense::hover());
                        ui.painter()
                            .circle_filled(dot_rect.center(), 3.0, theme::block_color(i));

                        ui.label(
                            RichText::new(format!(
                                "{} – {}",
                                sel.start.format("%H:%M"),
                                sel.end.format("%H:%M")
                            ))
                            .size(12.0)
                            .color(theme::text_primary()),
                        );

                        ui.with_layout(
                            egui::Layout::right_to_left(egui::Align::Center),
                            |ui| {
                                ui.label(
                                    RichText::new(super::format_duration(sel.duration()))
                                        .size(10.0)
                                        .color(theme::text_secondary()),
                                );
                            },
                        );
                    });
                });

                ui.add_space(1.0);
            }

            ui.add_space(6.0);
            ui.separator();
            ui.horizontal(|ui| {
                ui.label(
                    RichText::new("Planned")
                        .size(10.0)
                        .color(theme::text_dim()),
                );
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        RichText::new(super::format_duration(selections.total_duration()))
                            .size(10.0)
                            .strong()
                            .color(theme::accent()),
                    );
                });
            });
        });
}
