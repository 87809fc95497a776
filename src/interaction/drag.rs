//! Pointer-driven move and resize of task bars.
//!
//! A [`DragController`] is either idle or holds exactly one [`DragSession`].
//! Pointer movement only changes the session's day offset; dates are computed
//! from the snapshot taken at pointer-down, and the only mutation leaves the
//! controller once, on pointer-up.

use std::cell::Cell;
use std::rc::Rc;

use chrono::NaiveDate;
use egui::PointerButton;
use uuid::Uuid;

use crate::model::dates::{add_days, day_offset};
use crate::model::Task;

/// Which part of the bar was grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragMode {
    /// Body: shift both ends.
    Move,
    /// Left handle: shift the start only.
    ResizeStart,
    /// Right handle: shift the end only.
    ResizeEnd,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DragError {
    #[error("task {active} is already being dragged")]
    AlreadyDragging { active: Uuid },
    #[error("drags start with the primary button, got {0:?}")]
    NotPrimaryButton(PointerButton),
}

/// Result of releasing the pointer.
#[derive(Debug, Clone, PartialEq)]
pub enum DragOutcome<P> {
    /// No drag was in progress.
    Idle,
    /// Released without a net day offset.
    Click(Uuid),
    /// The task with its new dates.
    Commit(Task<P>),
    /// The task disappeared from the store while it was being dragged.
    Vanished(Uuid),
}

impl<P> DragOutcome<P> {
    /// The update to hand to the store, if any.
    pub fn into_update(self) -> Option<Task<P>> {
        match self {
            DragOutcome::Commit(task) => Some(task),
            _ => None,
        }
    }

    pub fn clicked(&self) -> Option<Uuid> {
        match self {
            DragOutcome::Click(id) => Some(*id),
            _ => None,
        }
    }
}

/// Stands for the window-wide pointer-move/pointer-up listeners of a session.
/// Dropping it releases them.
#[derive(Debug)]
struct PointerGrab {
    active: Rc<Cell<usize>>,
}

impl PointerGrab {
    fn acquire(active: &Rc<Cell<usize>>) -> Self {
        active.set(active.get() + 1);
        Self {
            active: Rc::clone(active),
        }
    }
}

impl Drop for PointerGrab {
    fn drop(&mut self) {
        self.active.set(self.active.get().saturating_sub(1));
        tracing::trace!("pointer grab released");
    }
}

/// An in-progress gesture.
#[derive(Debug)]
pub struct DragSession {
    pub task_id: Uuid,
    pub mode: DragMode,
    pub anchor_x: f32,
    pub original_start: NaiveDate,
    pub original_end: NaiveDate,
    pub day_offset: i64,
    _grab: PointerGrab,
}

impl DragSession {
    /// Dates the task would have if released now.
    pub fn span(&self) -> (NaiveDate, NaiveDate) {
        project_span(self.mode, self.original_start, self.original_end, self.day_offset)
    }
}

/// Shift a span by `offset` days according to `mode`, never inverting it.
pub fn project_span(
    mode: DragMode,
    start: NaiveDate,
    end: NaiveDate,
    offset: i64,
) -> (NaiveDate, NaiveDate) {
    match mode {
        DragMode::Move => (add_days(start, offset), add_days(end, offset)),
        DragMode::ResizeStart => (add_days(start, offset).min(end), end),
        DragMode::ResizeEnd => (start, add_days(end, offset).max(start)),
    }
}

/// Owns the single drag session of a timeline.
#[derive(Debug, Default)]
pub struct DragController {
    session: Option<DragSession>,
    grabs: Rc<Cell<usize>>,
}

impl DragController {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a gesture on `task`. Refused while another one is active or for
    /// any button but the primary one. The snapshot never has `end < start`,
    /// so no commit can invert a span.
    pub fn begin_drag<P>(
        &mut self,
        task: &Task<P>,
        mode: DragMode,
        pointer_x: f32,
        button: PointerButton,
    ) -> Result<(), DragError> {
        if let Some(active) = &self.session {
            return Err(DragError::AlreadyDragging {
                active: active.task_id,
            });
        }
        if button != PointerButton::Primary {
            return Err(DragError::NotPrimaryButton(button));
        }

        tracing::debug!(task = %task.id, ?mode, pointer_x, "drag started");
        self.session = Some(DragSession {
            task_id: task.id,
            mode,
            anchor_x: pointer_x,
            original_start: task.start,
            // an inverted span is treated as the single day `start`
            original_end: task.end.max(task.start),
            day_offset: 0,
            _grab: PointerGrab::acquire(&self.grabs),
        });
        Ok(())
    }

    /// Track the pointer. Returns true when the snapped offset changed.
    pub fn update_drag(&mut self, pointer_x: f32) -> bool {
        let Some(session) = self.session.as_mut() else {
            return false;
        };
        let offset = day_offset(pointer_x - session.anchor_x);
        if offset == session.day_offset {
            return false;
        }
        session.day_offset = offset;
        true
    }

    /// Dates to draw for `task`: the live preview while it is being dragged,
    /// otherwise its stored dates.
    pub fn project_visual_span<P>(&self, task: &Task<P>) -> (NaiveDate, NaiveDate) {
        match &self.session {
            Some(session) if session.task_id == task.id => session.span(),
            _ => (task.start, task.end),
        }
    }

    /// Finish the gesture. The current record of the task is looked up in
    /// `tasks` so that payload edits made elsewhere during the drag survive.
    /// Always returns the controller to idle.
    pub fn end_drag<'a, P>(&mut self, tasks: impl IntoIterator<Item = &'a Task<P>>) -> DragOutcome<P>
    where
        P: Clone + 'a,
    {
        let Some(session) = self.session.take() else {
            return DragOutcome::Idle;
        };
        if session.day_offset == 0 {
            tracing::trace!(task = %session.task_id, "released without offset");
            return DragOutcome::Click(session.task_id);
        }

        let (start, end) = session.span();
        match tasks.into_iter().find(|t| t.id == session.task_id) {
            Some(task) => {
                tracing::debug!(
                    task = %task.id,
                    mode = ?session.mode,
                    offset = session.day_offset,
                    %start,
                    %end,
                    "drag committed"
                );
                DragOutcome::Commit(task.with_span(start, end))
            }
            None => {
                tracing::warn!(task = %session.task_id, "dragged task no longer exists");
                DragOutcome::Vanished(session.task_id)
            }
        }
    }

    /// Abandon the gesture without emitting anything.
    pub fn cancel_drag(&mut self) -> bool {
        match self.session.take() {
            Some(session) => {
                tracing::debug!(task = %session.task_id, "drag cancelled");
                true
            }
            None => false,
        }
    }

    pub fn is_dragging(&self) -> bool {
        self.session.is_some()
    }

    pub fn session(&self) -> Option<&DragSession> {
        self.session.as_ref()
    }

    pub fn dragged_task(&self) -> Option<Uuid> {
        self.session.as_ref().map(|s| s.task_id)
    }

    /// Pointer grabs currently held; 0 or 1.
    pub fn active_grabs(&self) -> usize {
        self.grabs.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::dates::{parse_date, DAY_WIDTH};

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    fn task(start: &str, end: &str) -> Task<String> {
        Task::new(Uuid::new_v4(), d(start), d(end), "Plumbing Rough-in".to_string())
    }

    fn drag_by_days(
        controller: &mut DragController,
        task: &Task<String>,
        mode: DragMode,
        days: f32,
    ) -> DragOutcome<String> {
        controller
            .begin_drag(task, mode, 100.0, PointerButton::Primary)
            .unwrap();
        controller.update_drag(100.0 + days * DAY_WIDTH);
        controller.end_drag(std::slice::from_ref(task))
    }

    #[test]
    fn move_shifts_both_ends() {
        let mut controller = DragController::new();
        let t = task("2023-11-20", "2023-12-05");
        let update = drag_by_days(&mut controller, &t, DragMode::Move, 5.0)
            .into_update()
            .unwrap();
        assert_eq!(update.start, d("2023-11-25"));
        assert_eq!(update.end, d("2023-12-10"));
        assert_eq!(update.id, t.id);
        assert_eq!(update.group, t.group);
        assert_eq!(update.payload, t.payload);
    }

    #[test]
    fn move_of_inverted_span_commits_valid_span() {
        let mut controller = DragController::new();
        let t = task("2023-10-10", "2023-10-05");
        let update = drag_by_days(&mut controller, &t, DragMode::Move, 2.0)
            .into_update()
            .unwrap();
        assert_eq!((update.start, update.end), (d("2023-10-12"), d("2023-10-12")));
    }

    #[test]
    fn inverted_span_resizes_from_its_start_day() {
        let mut controller = DragController::new();
        let t = task("2023-10-10", "2023-10-05");
        let update = drag_by_days(&mut controller, &t, DragMode::ResizeEnd, 3.0)
            .into_update()
            .unwrap();
        assert_eq!((update.start, update.end), (d("2023-10-10"), d("2023-10-13")));

        let update = drag_by_days(&mut controller, &t, DragMode::ResizeStart, -4.0)
            .into_update()
            .unwrap();
        assert_eq!((update.start, update.end), (d("2023-10-06"), d("2023-10-10")));
    }

    #[test]
    fn resize_start_clamps_to_end() {
        let mut controller = DragController::new();
        let t = task("2023-10-13", "2023-10-20");
        let update = drag_by_days(&mut controller, &t, DragMode::ResizeStart, 30.0)
            .into_update()
            .unwrap();
        assert_eq!(update.start, d("2023-10-20"));
        assert_eq!(update.end, d("2023-10-20"));
    }

    #[test]
    fn resize_end_clamps_to_start() {
        let mut controller = DragController::new();
        let t = task("2023-10-13", "2023-10-20");
        let update = drag_by_days(&mut controller, &t, DragMode::ResizeEnd, -12.0)
            .into_update()
            .unwrap();
        assert_eq!(update.start, d("2023-10-13"));
        assert_eq!(update.end, d("2023-10-13"));
    }

    #[test]
    fn resize_end_extends() {
        let mut controller = DragController::new();
        let t = task("2023-10-13", "2023-10-20");
        let update = drag_by_days(&mut controller, &t, DragMode::ResizeEnd, 3.0)
            .into_update()
            .unwrap();
        assert_eq!((update.start, update.end), (d("2023-10-13"), d("2023-10-23")));
    }

    #[test]
    fn zero_offset_is_a_click() {
        let mut controller = DragController::new();
        let t = task("2023-10-13", "2023-10-20");
        controller
            .begin_drag(&t, DragMode::Move, 100.0, PointerButton::Primary)
            .unwrap();
        // wander off and come back: net offset is zero
        controller.update_drag(100.0 + 3.0 * DAY_WIDTH);
        controller.update_drag(100.0 + DAY_WIDTH * 0.3);
        let outcome = controller.end_drag(std::slice::from_ref(&t));
        assert_eq!(outcome.clicked(), Some(t.id));
        assert_eq!(outcome.into_update(), None);
        assert!(!controller.is_dragging());
    }

    #[test]
    fn preview_tracks_pointer_without_mutating() {
        let mut controller = DragController::new();
        let t = task("2023-10-13", "2023-10-20");
        let other = task("2023-10-01", "2023-10-02");
        controller
            .begin_drag(&t, DragMode::ResizeStart, 0.0, PointerButton::Primary)
            .unwrap();

        assert!(controller.update_drag(-2.0 * DAY_WIDTH));
        assert!(!controller.update_drag(-2.2 * DAY_WIDTH));
        assert_eq!(controller.project_visual_span(&t), (d("2023-10-11"), d("2023-10-20")));
        assert_eq!(controller.project_visual_span(&other), (other.start, other.end));

        controller.update_drag(50.0 * DAY_WIDTH);
        assert_eq!(controller.project_visual_span(&t), (d("2023-10-20"), d("2023-10-20")));
        assert_eq!(t.start, d("2023-10-13"));
    }

    #[test]
    fn only_one_session_at_a_time() {
        let mut controller = DragController::new();
        let a = task("2023-10-01", "2023-10-05");
        let b = task("2023-10-06", "2023-10-12");
        controller
            .begin_drag(&a, DragMode::Move, 0.0, PointerButton::Primary)
            .unwrap();
        assert_eq!(
            controller.begin_drag(&b, DragMode::Move, 0.0, PointerButton::Primary),
            Err(DragError::AlreadyDragging { active: a.id })
        );
        assert_eq!(controller.dragged_task(), Some(a.id));
        assert_eq!(controller.active_grabs(), 1);
    }

    #[test]
    fn secondary_button_does_not_start() {
        let mut controller = DragController::new();
        let t = task("2023-10-01", "2023-10-05");
        assert_eq!(
            controller.begin_drag(&t, DragMode::Move, 0.0, PointerButton::Secondary),
            Err(DragError::NotPrimaryButton(PointerButton::Secondary))
        );
        assert!(!controller.is_dragging());
        assert_eq!(controller.active_grabs(), 0);
    }

    #[test]
    fn grab_is_released_on_every_exit() {
        let mut controller = DragController::new();
        let t = task("2023-10-01", "2023-10-05");

        drag_by_days(&mut controller, &t, DragMode::Move, 2.0);
        assert_eq!(controller.active_grabs(), 0);

        drag_by_days(&mut controller, &t, DragMode::Move, 0.0);
        assert_eq!(controller.active_grabs(), 0);

        controller
            .begin_drag(&t, DragMode::Move, 0.0, PointerButton::Primary)
            .unwrap();
        assert!(controller.cancel_drag());
        assert_eq!(controller.active_grabs(), 0);
        assert!(!controller.cancel_drag());
    }

    #[test]
    fn cancel_emits_nothing() {
        let mut controller = DragController::new();
        let t = task("2023-10-01", "2023-10-05");
        controller
            .begin_drag(&t, DragMode::Move, 0.0, PointerButton::Primary)
            .unwrap();
        controller.update_drag(4.0 * DAY_WIDTH);
        controller.cancel_drag();
        assert_eq!(controller.end_drag(std::slice::from_ref(&t)), DragOutcome::Idle);
        assert_eq!(controller.project_visual_span(&t), (t.start, t.end));
    }

    #[test]
    fn commit_uses_current_record_and_handles_vanished_task() {
        let mut controller = DragController::new();
        let t = task("2023-10-01", "2023-10-05");
        controller
            .begin_drag(&t, DragMode::Move, 0.0, PointerButton::Primary)
            .unwrap();
        controller.update_drag(DAY_WIDTH);

        let mut renamed = t.clone();
        renamed.payload = "Renamed meanwhile".to_string();
        let update = controller
            .end_drag(std::slice::from_ref(&renamed))
            .into_update()
            .unwrap();
        assert_eq!(update.payload, "Renamed meanwhile");
        assert_eq!(update.start, d("2023-10-02"));

        controller
            .begin_drag(&t, DragMode::Move, 0.0, PointerButton::Primary)
            .unwrap();
        controller.update_drag(DAY_WIDTH);
        assert_eq!(controller.end_drag(std::iter::empty::<&Task<String>>()), DragOutcome::Vanished(t.id));
        assert!(!controller.is_dragging());
    }

    #[test]
    fn update_and_end_while_idle_are_no_ops() {
        let mut controller = DragController::new();
        assert!(!controller.update_drag(500.0));
        assert_eq!(controller.end_drag(std::iter::empty::<&Task<String>>()), DragOutcome::Idle);
    }
}
