use chrono::{Datelike, NaiveDate, Weekday};
use egui::{
    Align2, Color32, CursorIcon, Key, PointerButton, Pos2, Rect, Response, Rounding, Sense,
    Stroke, Ui, Vec2,
};
use uuid::Uuid;

use crate::interaction::{DragController, DragMode, DragOutcome};
use crate::layout::{RowModel, TASK_GAP, TASK_HEIGHT, TASK_TOP_OFFSET};
use crate::model::dates::{diff_in_days, format_date, pixel_days};
use crate::model::{SiteTask, Subcontractor, Task, TimelineViewport};
use crate::ui::theme;

const HEADER_HEIGHT: f32 = theme::HEADER_HEIGHT;
const LABEL_WIDTH: f32 = theme::LABEL_WIDTH;
const HANDLE_WIDTH: f32 = theme::RESIZE_HANDLE_WIDTH;

/// Where one task bar sits, relative to the top-left of the timeline body.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BarRect {
    pub task_id: Uuid,
    pub row: usize,
    pub lane: usize,
    /// Dates the bar represents (the drag preview for the dragged task).
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub left: f32,
    pub top: f32,
    pub width: f32,
    pub height: f32,
}

/// Position every task of every row.
pub fn layout_bars<P>(
    rows: &[RowModel<P>],
    viewport: &TimelineViewport,
    drag: &DragController,
) -> Vec<BarRect> {
    let mut bars = Vec::with_capacity(rows.iter().map(|r| r.tasks.len()).sum());
    let mut row_top = 0.0;
    for (row_index, row) in rows.iter().enumerate() {
        for task in &row.tasks {
            let (start, end) = drag.project_visual_span(task);
            let lane = row.lane_of(task.id);
            bars.push(BarRect {
                task_id: task.id,
                row: row_index,
                lane,
                start,
                end,
                left: viewport.date_to_x(start),
                top: row_top + TASK_TOP_OFFSET + lane as f32 * (TASK_HEIGHT + TASK_GAP),
                width: pixel_days(diff_in_days(end, start) + 1).max(theme::MIN_BAR_WIDTH),
                height: TASK_HEIGHT,
            });
        }
        row_top += row.height;
    }
    bars
}

/// What the user did with the timeline this frame.
#[derive(Debug, Clone, PartialEq)]
pub enum TimelineAction {
    None,
    /// A drag finished; persist these dates.
    Commit(Task),
    /// A bar was clicked without being dragged.
    Clicked(Uuid),
    Delete(Uuid),
}

/// Render the timeline for one project.
///
/// `subcontractors[i]` labels `rows[i]`.
pub fn show_timeline(
    ui: &mut Ui,
    subcontractors: &[&Subcontractor],
    rows: &[RowModel<SiteTask>],
    viewport: &TimelineViewport,
    drag: &mut DragController,
    selected_task: Option<Uuid>,
) -> TimelineAction {
    let mut action = TimelineAction::None;
    track_active_drag(ui, drag);

    let body_height: f32 = rows.iter().map(|r| r.height).sum();
    let available = ui.available_size();
    let chart_width = (LABEL_WIDTH + viewport.total_width()).max(available.x);
    let chart_height = (HEADER_HEIGHT + body_height).max(available.y);

    egui::ScrollArea::both()
        .auto_shrink([false, false])
        .drag_to_scroll(false)
        .show(ui, |ui| {
            let (response, painter) =
                ui.allocate_painter(Vec2::new(chart_width, chart_height), Sense::hover());
            let origin = response.rect.min;
            let grid_origin = Pos2::new(origin.x + LABEL_WIDTH, origin.y);

            painter.rect_filled(response.rect, 0.0, theme::BG_DARK);
            draw_row_bands(&painter, origin, rows, chart_width);
            draw_grid(&painter, grid_origin, viewport, chart_height);
            draw_header(&painter, origin, grid_origin, viewport, chart_width);
            draw_today_line(&painter, grid_origin, viewport, chart_height);
            draw_row_labels(&painter, origin, rows, subcontractors);

            if rows.is_empty() {
                painter.text(
                    Pos2::new(origin.x + 16.0, origin.y + HEADER_HEIGHT + 24.0),
                    Align2::LEFT_CENTER,
                    "No subcontractors added yet.",
                    theme::font_sub(),
                    theme::TEXT_DIM,
                );
            }

            let body_origin = Pos2::new(grid_origin.x, grid_origin.y + HEADER_HEIGHT);
            for bar in layout_bars(rows, viewport, drag) {
                let Some(task) = rows[bar.row].tasks.iter().find(|t| t.id == bar.task_id) else {
                    continue;
                };
                let color = subcontractors
                    .get(bar.row)
                    .map_or(theme::ACCENT, |s| s.color);
                let rect = Rect::from_min_size(
                    body_origin + Vec2::new(bar.left, bar.top),
                    Vec2::new(bar.width, bar.height),
                );
                if let Some(bar_action) =
                    show_bar(ui, &painter, task, &bar, rect, color, drag, selected_task)
                {
                    action = bar_action;
                }
            }
        });

    if let Some(finished) = finish_active_drag(ui, rows, drag) {
        action = finished;
    }
    action
}

/// Follow the pointer anywhere in the window while a drag is active.
fn track_active_drag(ui: &Ui, drag: &mut DragController) {
    if !drag.is_dragging() {
        return;
    }
    let (pointer, escape, focused) = ui.input(|i| {
        (
            i.pointer.latest_pos(),
            i.key_pressed(Key::Escape),
            i.focused,
        )
    });
    if escape || !focused {
        drag.cancel_drag();
        return;
    }
    if let Some(pos) = pointer {
        drag.update_drag(pos.x);
    }
}

/// Commit when the primary button comes up, wherever the pointer is.
/// Other buttons never end a drag.
fn finish_active_drag(
    ui: &Ui,
    rows: &[RowModel<SiteTask>],
    drag: &mut DragController,
) -> Option<TimelineAction> {
    let released = ui.input(|i| i.pointer.button_released(PointerButton::Primary));
    if !drag.is_dragging() || !released {
        return None;
    }
    match drag.end_drag(rows.iter().flat_map(|r| r.tasks.iter())) {
        DragOutcome::Commit(task) => Some(TimelineAction::Commit(task)),
        DragOutcome::Click(id) => Some(TimelineAction::Clicked(id)),
        DragOutcome::Vanished(_) | DragOutcome::Idle => None,
    }
}

#[allow(clippy::too_many_arguments)]
fn show_bar(
    ui: &mut Ui,
    painter: &egui::Painter,
    task: &Task<SiteTask>,
    bar: &BarRect,
    rect: Rect,
    color: Color32,
    drag: &mut DragController,
    selected_task: Option<Uuid>,
) -> Option<TimelineAction> {
    let is_dragged = drag.dragged_task() == Some(task.id);
    paint_bar(painter, task, rect, color, is_dragged, selected_task == Some(task.id));

    let handle_w = HANDLE_WIDTH.min(rect.width() / 3.0);
    let left_rect = Rect::from_min_max(rect.min, Pos2::new(rect.left() + handle_w, rect.bottom()));
    let right_rect = Rect::from_min_max(Pos2::new(rect.right() - handle_w, rect.top()), rect.max);
    let body_rect = Rect::from_min_max(
        Pos2::new(left_rect.right(), rect.top()),
        Pos2::new(right_rect.left(), rect.bottom()),
    );

    let body = ui.interact(
        body_rect,
        ui.make_persistent_id(("task-body", task.id)),
        Sense::click_and_drag(),
    );
    let left = ui.interact(
        left_rect,
        ui.make_persistent_id(("task-resize-start", task.id)),
        Sense::drag(),
    );
    let right = ui.interact(
        right_rect,
        ui.make_persistent_id(("task-resize-end", task.id)),
        Sense::drag(),
    );

    for (response, mode) in [
        (&left, DragMode::ResizeStart),
        (&right, DragMode::ResizeEnd),
        (&body, DragMode::Move),
    ] {
        if response.drag_started() {
            begin_drag(ui, drag, task, mode, response);
        }
    }

    if is_dragged {
        let icon = match drag.session().map(|s| s.mode) {
            Some(DragMode::Move) => CursorIcon::Grabbing,
            _ => CursorIcon::ResizeHorizontal,
        };
        ui.ctx().set_cursor_icon(icon);
    } else if left.hovered() || right.hovered() {
        ui.ctx().set_cursor_icon(CursorIcon::ResizeHorizontal);
    } else if body.hovered() {
        ui.ctx().set_cursor_icon(CursorIcon::Grab);
    }

    let mut action = None;
    if body.clicked() {
        action = Some(TimelineAction::Clicked(task.id));
    }

    if drag.is_dragging() {
        return action;
    }

    if body.hovered() || left.hovered() || right.hovered() {
        egui::show_tooltip_at_pointer(
            ui.ctx(),
            ui.layer_id(),
            egui::Id::new(("task-tip", task.id)),
            |ui| {
                ui.strong(&task.payload.name);
                ui.label(format!("{} → {}", format_date(bar.start), format_date(bar.end)));
                ui.label(format!(
                    "{} · ${:.0}",
                    task.payload.status.label(),
                    task.payload.estimated_cost
                ));
            },
        );
    }

    // Hover delete button on the top-right corner.
    if ui.rect_contains_pointer(rect.expand(8.0)) {
        let center = Pos2::new(rect.right() - 2.0, rect.top() - 2.0);
        let button_rect = Rect::from_center_size(center, Vec2::splat(16.0));
        let delete = ui.interact(
            button_rect,
            ui.make_persistent_id(("task-delete", task.id)),
            Sense::click(),
        );
        painter.circle_filled(center, 8.0, theme::DELETE_BG);
        painter.text(
            center,
            Align2::CENTER_CENTER,
            egui_phosphor::regular::X,
            theme::font_small(),
            theme::DELETE_FG,
        );
        if delete.hovered() {
            ui.ctx().set_cursor_icon(CursorIcon::PointingHand);
        }
        if delete.clicked() {
            action = Some(TimelineAction::Delete(task.id));
        }
    }

    action
}

fn begin_drag(
    ui: &Ui,
    drag: &mut DragController,
    task: &Task<SiteTask>,
    mode: DragMode,
    response: &Response,
) {
    let (press_origin, button) = ui.input(|i| (i.pointer.press_origin(), pressed_button(i)));
    let anchor_x = press_origin
        .or_else(|| response.interact_pointer_pos())
        .map_or(0.0, |p| p.x);
    if let Err(e) = drag.begin_drag(task, mode, anchor_x, button) {
        tracing::trace!(%e, "drag not started");
    }
}

fn pressed_button(input: &egui::InputState) -> PointerButton {
    [
        PointerButton::Primary,
        PointerButton::Secondary,
        PointerButton::Middle,
    ]
    .into_iter()
    .find(|&b| input.pointer.button_down(b))
    .unwrap_or(PointerButton::Primary)
}

fn paint_bar(
    painter: &egui::Painter,
    task: &Task<SiteTask>,
    rect: Rect,
    color: Color32,
    is_dragged: bool,
    is_selected: bool,
) {
    // Leave a small gap before the next day column.
    let visual = Rect::from_min_size(
        rect.min,
        Vec2::new((rect.width() - theme::BAR_INSET).max(theme::MIN_BAR_WIDTH), rect.height()),
    );
    let rounding = Rounding::same(theme::BAR_ROUNDING);

    let shadow_alpha = if is_dragged { 80 } else { 35 };
    painter.rect_filled(
        visual.translate(Vec2::new(1.0, 2.0)),
        rounding,
        Color32::from_black_alpha(shadow_alpha),
    );
    painter.rect_filled(visual, rounding, color);
    painter.rect_filled(
        Rect::from_min_size(visual.min, Vec2::new(visual.width(), visual.height() * 0.45)),
        Rounding {
            nw: theme::BAR_ROUNDING,
            ne: theme::BAR_ROUNDING,
            sw: 0.0,
            se: 0.0,
        },
        Color32::from_white_alpha(25),
    );

    if is_dragged || is_selected {
        painter.rect_stroke(
            visual.expand(1.5),
            Rounding::same(theme::BAR_ROUNDING + 1.5),
            Stroke::new(2.0, theme::BORDER_ACCENT),
        );
    }

    if visual.width() > 30.0 {
        let galley = painter.layout_no_wrap(
            task.payload.name.clone(),
            theme::font_bar(),
            theme::TEXT_ON_BAR,
        );
        let text_y = visual.top() + (visual.height() - galley.size().y) / 2.0;
        painter.with_clip_rect(visual.shrink(2.0)).galley(
            Pos2::new(visual.left() + HANDLE_WIDTH, text_y),
            galley,
            Color32::TRANSPARENT,
        );
    }
}

fn draw_row_bands<P>(painter: &egui::Painter, origin: Pos2, rows: &[RowModel<P>], width: f32) {
    let mut y = origin.y + HEADER_HEIGHT;
    for (i, row) in rows.iter().enumerate() {
        let fill = if i % 2 == 0 {
            theme::BG_DARK
        } else {
            theme::BG_ROW_ALT
        };
        painter.rect_filled(
            Rect::from_min_size(Pos2::new(origin.x, y), Vec2::new(width, row.height)),
            0.0,
            fill,
        );
        y += row.height;
        painter.line_segment(
            [Pos2::new(origin.x, y), Pos2::new(origin.x + width, y)],
            Stroke::new(0.5, theme::BORDER_SUBTLE),
        );
    }
}

fn draw_row_labels<P>(
    painter: &egui::Painter,
    origin: Pos2,
    rows: &[RowModel<P>],
    subcontractors: &[&Subcontractor],
) {
    // Opaque label column over the grid lines.
    let body_height: f32 = rows.iter().map(|r| r.height).sum();
    painter.rect_filled(
        Rect::from_min_size(
            Pos2::new(origin.x, origin.y + HEADER_HEIGHT),
            Vec2::new(LABEL_WIDTH, body_height),
        ),
        0.0,
        theme::BG_PANEL,
    );
    painter.line_segment(
        [
            Pos2::new(origin.x + LABEL_WIDTH, origin.y),
            Pos2::new(origin.x + LABEL_WIDTH, origin.y + HEADER_HEIGHT + body_height),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );

    let mut y = origin.y + HEADER_HEIGHT;
    for (row, sub) in rows.iter().zip(subcontractors) {
        let mid = y + row.height / 2.0;
        painter.circle_filled(Pos2::new(origin.x + 18.0, mid - 8.0), 5.0, sub.color);
        painter.text(
            Pos2::new(origin.x + 30.0, mid - 8.0),
            Align2::LEFT_CENTER,
            &sub.name,
            theme::font_row_title(),
            theme::TEXT_PRIMARY,
        );
        let trade = if sub.trade.is_empty() {
            "Unassigned Trade"
        } else {
            sub.trade.as_str()
        };
        painter.text(
            Pos2::new(origin.x + 30.0, mid + 9.0),
            Align2::LEFT_CENTER,
            trade,
            theme::font_sub(),
            theme::TEXT_SECONDARY,
        );
        painter.line_segment(
            [
                Pos2::new(origin.x, y + row.height),
                Pos2::new(origin.x + LABEL_WIDTH, y + row.height),
            ],
            Stroke::new(0.5, theme::BORDER_SUBTLE),
        );
        y += row.height;
    }
}

fn draw_grid(painter: &egui::Painter, grid_origin: Pos2, viewport: &TimelineViewport, height: f32) {
    for date in viewport.days() {
        let x = grid_origin.x + viewport.date_to_x(date) + pixel_days(1);
        let color = if date.weekday() == Weekday::Sun {
            // the line closing Sunday opens the next Monday
            theme::GRID_LINE_WEEK
        } else {
            theme::GRID_LINE
        };
        painter.line_segment(
            [
                Pos2::new(x, grid_origin.y + HEADER_HEIGHT),
                Pos2::new(x, grid_origin.y + height),
            ],
            Stroke::new(0.5, color),
        );
    }
}

fn draw_header(
    painter: &egui::Painter,
    origin: Pos2,
    grid_origin: Pos2,
    viewport: &TimelineViewport,
    width: f32,
) {
    painter.rect_filled(
        Rect::from_min_size(origin, Vec2::new(width, HEADER_HEIGHT)),
        0.0,
        theme::BG_HEADER,
    );
    painter.line_segment(
        [
            Pos2::new(origin.x, origin.y + HEADER_HEIGHT),
            Pos2::new(origin.x + width, origin.y + HEADER_HEIGHT),
        ],
        Stroke::new(1.0, theme::BORDER_SUBTLE),
    );
    painter.text(
        Pos2::new(origin.x + 16.0, origin.y + 18.0),
        Align2::LEFT_CENTER,
        "Subcontractors",
        theme::font_header(),
        theme::TEXT_PRIMARY,
    );
    painter.text(
        Pos2::new(origin.x + 16.0, origin.y + 36.0),
        Align2::LEFT_CENTER,
        "Drag center to move · Drag edges to trim or extend",
        theme::font_small(),
        theme::TEXT_DIM,
    );

    for date in viewport.days() {
        let x = grid_origin.x + viewport.date_to_x(date);
        painter.line_segment(
            [Pos2::new(x, origin.y), Pos2::new(x, origin.y + HEADER_HEIGHT)],
            Stroke::new(0.5, theme::BORDER_SUBTLE),
        );
        let is_weekend = date.weekday().num_days_from_monday() >= 5;
        painter.text(
            Pos2::new(x + 4.0, origin.y + 18.0),
            Align2::LEFT_CENTER,
            date.day().to_string(),
            theme::font_header(),
            if is_weekend {
                theme::TEXT_DIM
            } else {
                theme::TEXT_PRIMARY
            },
        );
        painter.text(
            Pos2::new(x + 4.0, origin.y + 36.0),
            Align2::LEFT_CENTER,
            date.format("%b").to_string(),
            theme::font_sub(),
            theme::TEXT_SECONDARY,
        );
    }
}

fn draw_today_line(
    painter: &egui::Painter,
    grid_origin: Pos2,
    viewport: &TimelineViewport,
    height: f32,
) {
    let today = chrono::Local::now().date_naive();
    if today < viewport.start || today > viewport.end {
        return;
    }
    let x = grid_origin.x + viewport.date_to_x(today) + pixel_days(1) / 2.0;
    painter.line_segment(
        [
            Pos2::new(x, grid_origin.y + HEADER_HEIGHT),
            Pos2::new(x, grid_origin.y + height),
        ],
        Stroke::new(1.5, theme::TODAY_LINE),
    );

    let badge_w = 42.0;
    let badge_rect = Rect::from_min_size(
        Pos2::new(x - badge_w / 2.0, grid_origin.y + HEADER_HEIGHT - 1.0),
        Vec2::new(badge_w, 14.0),
    );
    painter.rect_filled(badge_rect, Rounding::same(3.0), theme::TODAY_LINE);
    painter.text(
        badge_rect.center(),
        Align2::CENTER_CENTER,
        "Today",
        theme::font_small(),
        Color32::WHITE,
    );
}
