use chrono::NaiveDate;

use crate::model::{DayPlanner, Selection, SelectionSet};
use crate::ui;
use crate::ui::theme_manager::ThemeManager;

/// Main application state.
pub struct PlannerApp {
    /// Interaction engine for the day currently on screen. Replaced wholesale
    /// when the day changes: selections never travel between days.
    pub planner: DayPlanner,
    /// Backing field for the toolbar's date picker.
    pub picker_day: NaiveDate,

    // Dialog state
    pub show_about: bool,
    pub show_help: bool,

    // Status message
    pub status_message: String,

    // Theme engine + persisted settings
    pub theme_manager: ThemeManager,
}

impl PlannerApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        // Register Phosphor icon font as a fallback so icons render inline with text
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);

        let theme_manager = ThemeManager::new();
        let scale = theme_manager.day_scale();
        let today = chrono::Local::now().date_naive();

        Self {
            planner: DayPlanner::new(today, scale),
            picker_day: today,
            show_about: false,
            show_help: false,
            status_message: "Ready".to_string(),
            theme_manager,
        }
    }

    /// A demonstration day: a morning focus block, lunch, and a review slot.
    fn sample_day(day: NaiveDate) -> SelectionSet {
        let slot = |h1, m1, h2, m2| -> Option<Selection> {
            Some(Selection::new(
                day.and_hms_opt(h1, m1, 0)?,
                day.and_hms_opt(h2, m2, 0)?,
            ))
        };
        SelectionSet::new(
            [
                slot(9, 0, 10, 30),
                slot(12, 30, 13, 0),
                slot(15, 0, 16, 0),
            ]
            .into_iter()
            .flatten()
            .collect(),
        )
    }

    // --- Day navigation ---

    pub fn go_to_day(&mut self, day: NaiveDate) {
        if day == self.planner.day() {
            return;
        }
        log::info!("switching to {}", day);
        self.planner = DayPlanner::new(day, self.planner.scale());
        self.picker_day = day;
        self.status_message = format!("Viewing {}", day.format("%A, %-d %B %Y"));
    }

    pub fn step_day(&mut self, days: i64) {
        self.go_to_day(self.planner.day() + chrono::Duration::days(days));
    }

    pub fn go_to_today(&mut self) {
        self.go_to_day(chrono::Local::now().date_naive());
    }

    // --- Day operations ---

    pub fn clear_day(&mut self) {
        self.planner = DayPlanner::new(self.planner.day(), self.planner.scale());
        self.status_message = "Day cleared".to_string();
    }

    pub fn load_sample_day(&mut self) {
        let day = self.planner.day();
        self.planner =
            DayPlanner::with_selections(day, self.planner.scale(), Self::sample_day(day));
        self.status_message = "Sample day loaded".to_string();
    }

    pub fn export_csv(&mut self) {
        if self.planner.selections().is_empty() {
            self.status_message = "Nothing to export — the day has no selections".to_string();
            return;
        }

        let default_name = format!("{}.csv", self.planner.day().format("%Y-%m-%d"));
        if let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(&default_name)
            .save_file()
        {
            match crate::io::csv_export::export_csv(
                self.planner.day(),
                self.planner.selections(),
                &path,
            ) {
                Ok(count) => {
                    log::info!("exported {} selections to {:?}", count, path);
                    self.status_message = format!("Exported {} selections to CSV", count);
                }
                Err(e) => {
                    self.status_message = format!("CSV export failed: {}", e);
                }
            }
        }
    }
}

impl eframe::App for PlannerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ui::theme::set_active(self.theme_manager.active());
        ui::theme::apply_theme(ctx);

        // Handle keyboard shortcuts outside closures to avoid borrow issues
        let step_back =
            ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::ArrowLeft));
        let step_forward =
            ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::ArrowRight));
        let do_export = ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::E));
        if !self.planner.is_dragging() {
            if step_back {
                self.step_day(-1);
            }
            if step_forward {
                self.step_day(1);
            }
        }
        if do_export {
            self.export_csv();
        }

        // The date picker writes into picker_day; pick up the change here
        if self.picker_day != self.planner.day() {
            let day = self.picker_day;
            self.go_to_day(day);
        }

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::status_bar_height())
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::status_bar_bg())
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .font(ui::theme::font_status())
                            .color(ui::theme::text_secondary()),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!(
                                "Planned: {}",
                                ui::format_duration(self.planner.selections().total_duration())
                            ))
                            .size(10.5)
                            .color(ui::theme::text_dim()),
                        );
                        ui.label(
                            egui::RichText::new(" · ")
                                .size(10.5)
                                .color(ui::theme::text_dim()),
                        );
                        ui.label(
                            egui::RichText::new(format!(
                                "Selections: {}",
                                self.planner.selections().len()
                            ))
                            .size(10.5)
                            .color(ui::theme::text_dim()),
                        );
                    });
                });
            });

        // Left panel: selection list
        egui::SidePanel::left("selection_panel")
            .default_width(ui::theme::side_panel_default_width())
            .min_width(ui::theme::side_panel_min_width())
            .max_width(ui::theme::side_panel_default_width() * 2.0)
            .resizable(true)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::bg_panel())
                    .inner_margin(egui::Margin::same(ui::theme::layout().panel_inner_margin))
                    .stroke(egui::Stroke::new(1.0, ui::theme::border_subtle())),
            )
            .show(ctx, |ui| {
                ui::selection_table::show_selection_table(&self.planner, ui);
            });

        // Central panel: day canvas
        let canvas_frame = egui::Frame::default()
            .fill(ui::theme::bg_dark())
            .inner_margin(egui::Margin::ZERO);
        egui::CentralPanel::default().frame(canvas_frame).show(ctx, |ui| {
            let interaction = ui::day_canvas::show_day_canvas(&mut self.planner, ui);
            if interaction.changed {
                if let Some(sel) = self
                    .planner
                    .active_index()
                    .and_then(|i| self.planner.selections().get(i))
                {
                    self.status_message = format!(
                        "Selection {} – {} ({})",
                        sel.start.format("%H:%M"),
                        sel.end.format("%H:%M"),
                        ui::format_duration(sel.duration())
                    );
                }
            }
        });

        // Dialogs
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
        if self.show_help {
            ui::dialogs::show_help_dialog(self, ctx);
        }
    }
}
