use crate::app::PlannerApp;
use crate::ui::theme;
use egui::{menu, RichText, Ui};

/// Render the top toolbar / menu bar.
pub fn show_toolbar(app: &mut PlannerApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  ").font(theme::font_menu()), |ui| {
            if ui.button("  Load Sample Day").clicked() {
                app.load_sample_day();
                ui.close_menu();
            }
            if ui.button("  Clear Day").clicked() {
                app.clear_day();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Export CSV...          Ctrl+E").clicked() {
                app.export_csv();
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  View  ").font(theme::font_menu()), |ui| {
            if ui.button("  Previous Day      Ctrl+←").clicked() {
                app.step_day(-1);
                ui.close_menu();
            }
            if ui.button("  Next Day            Ctrl+→").clicked() {
                app.step_day(1);
                ui.close_menu();
            }
            if ui.button("  Today").clicked() {
                app.go_to_today();
                ui.close_menu();
            }
            ui.separator();
            ui.label(RichText::new("Theme").small().weak());
            let themes = app.theme_manager.list();
            let active_idx = app.theme_manager.active_index();
            for (idx, name) in &themes {
                let selected = *idx == active_idx;
                if ui.radio(selected, name).clicked() {
                    app.theme_manager.set_active(*idx);
                    ui.close_menu();
                }
            }
            ui.separator();
            if ui.button("  Reload Themes").clicked() {
                app.theme_manager.reload_user_themes();
                ui.close_menu();
            }
            if ui.button("  Open Themes Folder").clicked() {
                let dir = app.theme_manager.themes_dir().clone();
                let _ = open::that(&dir);
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  Help  ").font(theme::font_menu()), |ui| {
            if ui.button("How to Use").clicked() {
                app.show_help = true;
                ui.close_menu();
            }
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        ui.separator();

        // Inline day navigation
        if ui.button("◀").on_hover_text("Previous day (Ctrl+←)").clicked() {
            app.step_day(-1);
        }
        ui.add(egui_extras::DatePickerButton::new(&mut app.picker_day).id_salt("tb_dp_day"));
        if ui.button("▶").on_hover_text("Next day (Ctrl+→)").clicked() {
            app.step_day(1);
        }
        if ui.button("Today").clicked() {
            app.go_to_today();
        }

        // Right-aligned current day
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            ui.label(
                RichText::new(app.planner.day().format("%A, %-d %B %Y").to_string())
                    .size(11.0)
                    .weak(),
            );
            ui.label(
                RichText::new(egui_phosphor::regular::CALENDAR_BLANK)
                    .size(11.0)
                    .weak(),
            );
        });
    });
}
