use crate::model::{
    bounds_of, grid_lines, position_of, reschedule, GridKind, Task, ViewportRange, ZoomController,
};
use crate::ui::theme;
use chrono::NaiveDate;
use egui::{Align2, Color32, Id, Painter, Pos2, Rect, Rounding, Sense, Stroke, Ui, Vec2};

const HEADER_HEIGHT: f32 = theme::HEADER_HEIGHT;
const LANE_HEIGHT: f32 = theme::LANE_HEIGHT;
const BAR_HEIGHT: f32 = theme::BAR_HEIGHT;

/// In-flight bar drag, kept in egui temp memory.
#[derive(Debug, Clone, Copy)]
struct DragSnapshot {
    start_pointer_x: f32,
    /// Latest horizontal offset from `start_pointer_x`.
    delta_x: f32,
}

/// What the user did on the timeline this frame.
#[derive(Debug, Clone, Default)]
pub struct TimelineAction {
    /// A bar was dropped at a new date; replace the stored record with this one.
    pub rescheduled: Option<Task>,
    /// A bar was clicked.
    pub edit: Option<String>,
}

/// Render the roadmap timeline (central panel).
pub fn show_timeline(tasks: &[Task], zoom: &mut ZoomController, ui: &mut Ui) -> TimelineAction {
    let mut action = TimelineAction::default();

    // Ctrl+scroll or pinch to zoom
    if ui.rect_contains_pointer(ui.max_rect()) {
        let zoom_delta = ui.input(|i| i.zoom_delta());
        if zoom_delta > 1.0 {
            zoom.zoom_in();
        } else if zoom_delta < 1.0 {
            zoom.zoom_out();
        }
    }

    let scale = zoom.scale();
    let range = bounds_of(tasks);
    let available = ui.available_size();
    let width = range.total_width(scale).max(available.x);
    let height = (HEADER_HEIGHT + tasks.len() as f32 * LANE_HEIGHT + 32.0).max(available.y);

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            let (response, painter) =
                ui.allocate_painter(Vec2::new(width, height), Sense::hover());
            let origin = response.rect.min;

            painter.rect_filled(response.rect, 0.0, theme::BG_CANVAS);
            for i in (1..tasks.len()).step_by(2) {
                let y = origin.y + HEADER_HEIGHT + i as f32 * LANE_HEIGHT;
                painter.rect_filled(
                    Rect::from_min_size(Pos2::new(origin.x, y), Vec2::new(width, LANE_HEIGHT)),
                    0.0,
                    theme::BG_LANE_ALT,
                );
            }

            draw_grid(&painter, origin, &range, zoom, width, height);
            draw_today_line(&painter, origin, &range, scale, height);

            for (i, task) in tasks.iter().enumerate() {
                let lane_top = origin.y + HEADER_HEIGHT + i as f32 * LANE_HEIGHT;
                let bar_top = lane_top + (LANE_HEIGHT - BAR_HEIGHT) / 2.0;
                let base = position_of(task, range.start, scale);
                let hit_rect = Rect::from_min_size(
                    Pos2::new(origin.x + base.left, bar_top),
                    Vec2::new(base.width.max(6.0), BAR_HEIGHT),
                );

                let bar_response = ui.interact(
                    hit_rect,
                    ui.make_persistent_id(("task-bar", &task.id)),
                    Sense::click_and_drag(),
                );

                if bar_response.clicked() {
                    action.edit = Some(task.id.clone());
                }

                if bar_response.drag_started() {
                    let ptr_x = bar_response.interact_pointer_pos().map(|p| p.x).unwrap_or(0.0);
                    ui.ctx().data_mut(|data| {
                        data.insert_temp(
                            drag_id(&task.id),
                            DragSnapshot {
                                start_pointer_x: ptr_x,
                                delta_x: 0.0,
                            },
                        );
                    });
                }

                // Provisional record while the gesture is in flight; nothing is
                // committed until the drag ends.
                let mut shown = None;
                if bar_response.dragged() || bar_response.drag_stopped() {
                    let snapshot = ui
                        .ctx()
                        .data_mut(|data| data.get_temp::<DragSnapshot>(drag_id(&task.id)));
                    if let Some(mut snapshot) = snapshot {
                        if let Some(ptr) = bar_response.interact_pointer_pos() {
                            snapshot.delta_x = ptr.x - snapshot.start_pointer_x;
                            ui.ctx()
                                .data_mut(|data| data.insert_temp(drag_id(&task.id), snapshot));
                        }
                        shown = Some(reschedule(task, snapshot.delta_x, scale));
                    }
                }

                if bar_response.dragged() {
                    ui.ctx().set_cursor_icon(egui::CursorIcon::Grabbing);
                } else if bar_response.hovered() {
                    ui.ctx().set_cursor_icon(egui::CursorIcon::Grab);
                }

                if bar_response.drag_stopped() {
                    ui.ctx().data_mut(|data| {
                        data.remove::<DragSnapshot>(drag_id(&task.id));
                    });
                    if let Some(moved) = shown.take() {
                        if moved.start != task.start {
                            tracing::debug!(
                                task = %task.name,
                                from = %task.start,
                                to = %moved.start,
                                "bar dropped"
                            );
                            action.rescheduled = Some(moved);
                        }
                    }
                }

                let display = shown.as_ref().unwrap_or(task);
                draw_task_bar(&painter, origin, &range, scale, display, bar_top);

                if bar_response.hovered() && !bar_response.dragged() {
                    egui::show_tooltip_at_pointer(
                        ui.ctx(),
                        ui.layer_id(),
                        Id::new(("task-popover", &task.id)),
                        |ui| show_task_popover(task, ui),
                    );
                }
            }
        });

    action
}

fn drag_id(task_id: &str) -> Id {
    Id::new(("drag", task_id))
}

fn draw_grid(
    painter: &Painter,
    origin: Pos2,
    range: &ViewportRange,
    zoom: &ZoomController,
    width: f32,
    height: f32,
) {
    painter.rect_filled(
        Rect::from_min_size(origin, Vec2::new(width, HEADER_HEIGHT)),
        0.0,
        theme::BG_HEADER,
    );

    let scale = zoom.scale();
    for line in grid_lines(range.start, range.end, zoom.granularity()) {
        let x = origin.x + line.position as f32 * scale;
        if x < origin.x {
            continue;
        }
        let (color, tick_top) = match line.kind {
            GridKind::Major => (theme::GRID_MAJOR, origin.y + HEADER_HEIGHT - 16.0),
            GridKind::Minor => (theme::GRID_MINOR, origin.y + HEADER_HEIGHT - 8.0),
        };
        painter.line_segment(
            [Pos2::new(x, tick_top), Pos2::new(x, origin.y + height)],
            Stroke::new(1.0, color),
        );

        if !line.label.is_empty() {
            let text_color = match line.kind {
                GridKind::Major => theme::TEXT_PRIMARY,
                GridKind::Minor => theme::TEXT_SECONDARY,
            };
            painter.text(
                Pos2::new(x, origin.y + 18.0),
                Align2::CENTER_CENTER,
                &line.label,
                theme::font_grid_label(),
                text_color,
            );
        }
    }

    painter.line_segment(
        [
            Pos2::new(origin.x, origin.y + HEADER_HEIGHT),
            Pos2::new(origin.x + width, origin.y + HEADER_HEIGHT),
        ],
        Stroke::new(1.0, theme::BORDER),
    );
}

fn draw_today_line(
    painter: &Painter,
    origin: Pos2,
    range: &ViewportRange,
    scale: f32,
    height: f32,
) {
    let today = chrono::Local::now().date_naive();
    if !range.contains(today) {
        return;
    }
    let x = origin.x + range.date_to_x(today, scale);
    painter.line_segment(
        [
            Pos2::new(x, origin.y + HEADER_HEIGHT),
            Pos2::new(x, origin.y + height),
        ],
        Stroke::new(1.5, theme::TODAY_LINE),
    );
}

fn draw_task_bar(
    painter: &Painter,
    origin: Pos2,
    range: &ViewportRange,
    scale: f32,
    task: &Task,
    top: f32,
) {
    let pos = position_of(task, range.start, scale);
    let left = origin.x + pos.left;
    let main_left = origin.x + pos.main_left();
    let rounding = Rounding::same(theme::BAR_ROUNDING);

    if pos.buffer_before_width > 0.0 {
        let rect = Rect::from_min_size(
            Pos2::new(left, top),
            Vec2::new(pos.buffer_before_width, BAR_HEIGHT),
        );
        draw_hatched(painter, rect, task.color);
    }

    let main_rect = Rect::from_min_size(
        Pos2::new(main_left, top),
        Vec2::new(pos.main_width.max(2.0), BAR_HEIGHT),
    );
    painter.rect_filled(main_rect, rounding, task.color);

    if pos.buffer_after_width > 0.0 {
        let rect = Rect::from_min_size(
            Pos2::new(main_rect.right(), top),
            Vec2::new(pos.buffer_after_width, BAR_HEIGHT),
        );
        draw_hatched(painter, rect, task.color);
    }

    // Title and dates are not clipped so long names can overflow the bar.
    painter.text(
        Pos2::new(main_left + 8.0, top + 6.0),
        Align2::LEFT_TOP,
        &task.name,
        theme::font_bar_title(),
        theme::TEXT_ON_BAR,
    );
    painter.text(
        Pos2::new(main_left + 8.0, top + 26.0),
        Align2::LEFT_TOP,
        date_range_text(task.start, task.end),
        theme::font_bar_dates(),
        theme::TEXT_ON_BAR,
    );
}

/// Diagonal stripes in two tints of the task colour.
fn draw_hatched(painter: &Painter, rect: Rect, color: Color32) {
    painter.rect_filled(rect, 0.0, theme::buffer_tint(color, 0x44));
    let clipped = painter.with_clip_rect(rect.intersect(painter.clip_rect()));
    let stroke = Stroke::new(theme::HATCH_SPACING / 2.0, theme::buffer_tint(color, 0x88));
    let h = rect.height();
    let mut x = rect.left() - h;
    while x < rect.right() {
        clipped.line_segment(
            [Pos2::new(x, rect.bottom()), Pos2::new(x + h, rect.top())],
            stroke,
        );
        x += theme::HATCH_SPACING * 2.0;
    }
}

fn date_range_text(start: NaiveDate, end: NaiveDate) -> String {
    format!("{} – {}", start.format("%Y-%m-%d"), end.format("%Y-%m-%d"))
}

fn show_task_popover(task: &Task, ui: &mut Ui) {
    ui.strong(&task.name);
    ui.label(format!(
        "Period: {} – {}",
        task.start.format("%B %-d, %Y"),
        task.end.format("%B %-d, %Y")
    ));
    if task.buffer_before > 0 {
        ui.label(format!("Buffer before: {} days", task.buffer_before));
    }
    if task.buffer_after > 0 {
        ui.label(format!("Buffer after: {} days", task.buffer_after));
    }
    ui.horizontal(|ui| {
        ui.label("Colour:");
        let (rect, _) = ui.allocate_exact_size(Vec2::splat(12.0), Sense::hover());
        ui.painter().rect_filled(rect, Rounding::same(2.0), task.color);
    });
}
