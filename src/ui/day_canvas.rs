use chrono::Timelike;
use egui::{Color32, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};

use crate::model::{DayPlanner, Grip};
use crate::ui::theme;

/// Result details from interactions in the day canvas.
#[derive(Debug, Clone, Default)]
pub struct CanvasInteraction {
    pub changed: bool,
}

/// Render the day column (central panel): hour grid, now-line, selection
/// blocks, and the pointer plumbing that feeds the planner.
///
/// The canvas owns coordinate translation only: every press, move, and
/// release (including the pointer leaving the canvas, which counts as a
/// release) is forwarded to the planner as an offset from the top of the day
/// column, and the blocks are redrawn from the planner's state.
pub fn show_day_canvas(planner: &mut DayPlanner, ui: &mut Ui) -> CanvasInteraction {
    let scale = planner.scale();
    let gutter_w = theme::layout().hour_gutter_width;
    let inset = theme::block_inset();

    let mut interaction = CanvasInteraction::default();

    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let canvas_width = ui.available_width().max(gutter_w + 160.0);
            let (response, painter) = ui.allocate_painter(
                Vec2::new(canvas_width, scale.day_height()),
                Sense::click_and_drag(),
            );
            let origin = response.rect.min;
            let right = response.rect.right();

            // Backgrounds: hour gutter on the left, day column on the right
            painter.rect_filled(response.rect, 0.0, theme::bg_dark());
            painter.rect_filled(
                Rect::from_min_size(origin, Vec2::new(gutter_w, scale.day_height())),
                0.0,
                theme::bg_gutter(),
            );
            painter.line_segment(
                [
                    Pos2::new(origin.x + gutter_w, origin.y),
                    Pos2::new(origin.x + gutter_w, origin.y + scale.day_height()),
                ],
                Stroke::new(1.0, theme::border_subtle()),
            );

            draw_hour_grid(&painter, origin, right, planner);
            draw_now_line(&painter, origin, right, planner);

            // Hover affordance: what would a press at the pointer grab?
            let hover_hit = response.hover_pos().and_then(|pos| {
                if pos.x < origin.x + gutter_w {
                    return None;
                }
                let instant = scale.time_at(planner.day(), pos.y - origin.y);
                planner
                    .selections()
                    .find_at(instant, scale.edge_tolerance())
            });

            match planner.active_grip().or(hover_hit.map(|h| h.grip)) {
                Some(Grip::TrailingEdge) => {
                    ui.ctx().set_cursor_icon(egui::CursorIcon::ResizeVertical)
                }
                Some(Grip::Body) => ui.ctx().set_cursor_icon(egui::CursorIcon::Grab),
                None => {}
            }

            // Selection blocks
            for (i, sel) in planner.selections().iter().enumerate() {
                let top = origin.y + scale.position_of(sel.start);
                let bottom = origin.y + scale.position_of(sel.end);
                let block_rect = Rect::from_min_max(
                    Pos2::new(origin.x + gutter_w + inset, top),
                    Pos2::new(right - inset, bottom),
                );
                let rounding = Rounding::same(theme::block_rounding());
                let color = theme::block_color(i);
                let is_active = planner.active_index() == Some(i);

                // Soft shadow
                let shadow_rect = block_rect.translate(Vec2::new(1.0, 2.0));
                painter.rect_filled(shadow_rect, rounding, Color32::from_black_alpha(35));

                painter.rect_filled(block_rect, rounding, color);
                // Lighter top highlight
                let highlight_rect = Rect::from_min_size(
                    block_rect.min,
                    Vec2::new(block_rect.width(), (block_rect.height() * 0.45).max(4.0)),
                );
                painter.rect_filled(
                    highlight_rect,
                    Rounding {
                        nw: theme::block_rounding(),
                        ne: theme::block_rounding(),
                        sw: 0.0,
                        se: 0.0,
                    },
                    Color32::from_white_alpha(25),
                );

                if is_active {
                    painter.rect_stroke(
                        block_rect.expand(1.5),
                        Rounding::same(theme::block_rounding() + 1.5),
                        Stroke::new(2.0, theme::border_accent()),
                    );
                }

                // Time range on the block
                if block_rect.height() > 16.0 {
                    painter.text(
                        Pos2::new(block_rect.left() + 6.0, block_rect.top() + 3.0),
                        egui::Align2::LEFT_TOP,
                        format!(
                            "{:02}:{:02} – {:02}:{:02}",
                            sel.start.hour(),
                            sel.start.minute(),
                            sel.end.hour(),
                            sel.end.minute()
                        ),
                        theme::font_block(),
                        theme::text_on_block(),
                    );
                }
                if block_rect.height() > 34.0 {
                    painter.text(
                        Pos2::new(block_rect.left() + 6.0, block_rect.top() + 18.0),
                        egui::Align2::LEFT_TOP,
                        super::format_duration(sel.duration()),
                        theme::font_small(),
                        theme::text_on_block().linear_multiply(0.7),
                    );
                }

                // Trailing-edge handle pill when grabbable or being stretched
                let edge_hovered = hover_hit
                    .map(|h| h.index == i && h.grip == Grip::TrailingEdge)
                    .unwrap_or(false);
                if edge_hovered || (is_active && planner.active_grip() == Some(Grip::TrailingEdge))
                {
                    let handle_w = (block_rect.width() * 0.4).min(42.0);
                    let handle = Rect::from_center_size(
                        Pos2::new(block_rect.center().x, block_rect.bottom() - 1.0),
                        Vec2::new(handle_w, 4.0),
                    );
                    painter.rect_filled(handle, Rounding::same(2.0), theme::handle_color());
                }

                // Tooltip on hover
                if response
                    .hover_pos()
                    .map(|p| block_rect.contains(p))
                    .unwrap_or(false)
                {
                    egui::show_tooltip_at_pointer(
                        ui.ctx(),
                        ui.layer_id(),
                        egui::Id::new(("block-tip", i)),
                        |ui| {
                            ui.strong(format!(
                                "{} – {}",
                                sel.start.format("%H:%M"),
                                sel.end.format("%H:%M")
                            ));
                            ui.label(super::format_duration(sel.duration()));
                        },
                    );
                }
            }

            // ── Pointer plumbing ────────────────────────────────────────
            let revision_before = planner.revision();
            let to_offset = |pos: Pos2| (pos.y - origin.y).clamp(0.0, scale.day_height());

            if response.drag_started() {
                let pos = ui
                    .input(|i| i.pointer.press_origin())
                    .or_else(|| response.interact_pointer_pos());
                if let Some(pos) = pos {
                    if pos.x >= origin.x + gutter_w {
                        planner.pointer_down(to_offset(pos));
                    }
                }
            } else if response.dragged() {
                if let Some(pos) = response.interact_pointer_pos() {
                    if response.rect.contains(pos) {
                        planner.pointer_move(to_offset(pos));
                    } else {
                        // Leaving the canvas ends the gesture, like a release.
                        planner.pointer_up();
                    }
                }
            }
            if response.drag_stopped() {
                planner.pointer_up();
            }
            if response.clicked() {
                // A click without movement still creates a default selection.
                if let Some(pos) = response.interact_pointer_pos() {
                    if pos.x >= origin.x + gutter_w {
                        planner.pointer_down(to_offset(pos));
                        planner.pointer_up();
                    }
                }
            }

            interaction.changed = planner.revision() != revision_before;
        });

    interaction
}

fn draw_hour_grid(painter: &egui::Painter, origin: Pos2, right: f32, planner: &DayPlanner) {
    let scale = planner.scale();
    let gutter_w = theme::layout().hour_gutter_width;

    for hour in 0..24u32 {
        let y = origin.y + hour as f32 * scale.pixels_per_hour;

        painter.line_segment(
            [Pos2::new(origin.x, y), Pos2::new(right, y)],
            Stroke::new(0.5, theme::hour_line()),
        );
        painter.text(
            Pos2::new(origin.x + gutter_w - 6.0, y + 3.0),
            egui::Align2::RIGHT_TOP,
            format!("{:02}:00", hour),
            theme::font_hour(),
            theme::text_dim(),
        );

        let half_y = y + scale.pixels_per_hour / 2.0;
        painter.line_segment(
            [
                Pos2::new(origin.x + gutter_w, half_y),
                Pos2::new(right, half_y),
            ],
            Stroke::new(0.5, theme::half_hour_line()),
        );
    }
}

fn draw_now_line(painter: &egui::Painter, origin: Pos2, right: f32, planner: &DayPlanner) {
    let now = chrono::Local::now().naive_local();
    if now.date() != planner.day() {
        return;
    }
    let gutter_w = theme::layout().hour_gutter_width;
    let y = origin.y + planner.scale().position_of(now);

    painter.line_segment(
        [Pos2::new(origin.x + gutter_w, y), Pos2::new(right, y)],
        Stroke::new(1.5, theme::now_line()),
    );
    painter.circle_filled(Pos2::new(origin.x + gutter_w, y), 3.0, theme::now_line());
}
