use chrono::NaiveDate;
use tracing::debug;
use uuid::Uuid;

use crate::engine::propagate;
use crate::model::{Schedule, Timeline};

/// What part of the task bar a gesture grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureMode {
    /// Bar body: move the whole task, dependents follow rigidly.
    Move,
    /// Leading edge: trim the start date, nothing else moves.
    ResizeStart,
    /// Trailing edge: move the due date, dependents get pushed forward.
    ResizeEnd,
}

/// Snapshot taken at pointer-down. Every later frame is recomputed from
/// this state plus the accumulated pixel offset, never from the previous
/// frame, so pointer jitter cannot accumulate into drift.
#[derive(Debug, Clone)]
struct ActiveGesture {
    task_id: Uuid,
    mode: GestureMode,
    anchor: Schedule,
    anchor_start: NaiveDate,
    anchor_due: NaiveDate,
    origin_x: f32,
    pixels_per_day: f32,
}

/// The interaction controller: owns the working schedule, the timeline, and
/// at most one in-flight gesture.
///
/// The working collection belongs to the controller for the duration of a
/// gesture (single writer); the host reads frames through the references
/// returned by [`ScheduleEditor::update_gesture`] and persists the value
/// handed back by [`ScheduleEditor::end_gesture`].
#[derive(Debug, Clone)]
pub struct ScheduleEditor {
    schedule: Schedule,
    timeline: Timeline,
    gesture: Option<ActiveGesture>,
}

impl ScheduleEditor {
    pub fn new(schedule: Schedule, timeline: Timeline) -> Self {
        Self {
            schedule,
            timeline,
            gesture: None,
        }
    }

    /// The current working collection.
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    /// Mutable timeline access for zoom and scroll between gestures. The
    /// in-flight gesture keeps its own `pixels_per_day` snapshot, so
    /// zooming mid-drag does not re-scale the frames already computed.
    pub fn timeline_mut(&mut self) -> &mut Timeline {
        &mut self.timeline
    }

    pub fn gesture_active(&self) -> bool {
        self.gesture.is_some()
    }

    /// Start a drag or resize at pointer x-position `pointer_x` (host
    /// pixels). Returns `false` and does nothing for an unknown task id or
    /// when another gesture is already in flight.
    pub fn begin_gesture(&mut self, task_id: Uuid, mode: GestureMode, pointer_x: f32) -> bool {
        if self.gesture.is_some() {
            return false;
        }
        let Some(task) = self.schedule.get(task_id) else {
            return false;
        };
        debug!(task = %task.name, ?mode, "gesture started");
        self.gesture = Some(ActiveGesture {
            task_id,
            mode,
            anchor: self.schedule.clone(),
            anchor_start: task.start,
            anchor_due: task.due,
            origin_x: pointer_x,
            pixels_per_day: self.timeline.pixels_per_day,
        });
        true
    }

    /// Process one pointer movement and return the recomputed frame.
    ///
    /// The day delta comes from the total pixel offset since pointer-down,
    /// and the matching propagation rule runs against the anchor snapshot.
    /// Rejected frames (resize past the opposite edge) leave the collection
    /// as it was. With no gesture in flight this is a read.
    pub fn update_gesture(&mut self, pointer_x: f32) -> &Schedule {
        let Some(gesture) = &self.gesture else {
            return &self.schedule;
        };
        let total_delta_x = pointer_x - gesture.origin_x;
        let delta_days = (total_delta_x / gesture.pixels_per_day).round() as i64;
        let delta = chrono::Duration::days(delta_days);

        self.schedule = match gesture.mode {
            GestureMode::Move => propagate::shift(&gesture.anchor, gesture.task_id, delta_days),
            GestureMode::ResizeStart => {
                propagate::trim_start(&gesture.anchor, gesture.task_id, gesture.anchor_start + delta)
            }
            GestureMode::ResizeEnd => {
                propagate::push_due(&gesture.anchor, gesture.task_id, gesture.anchor_due + delta)
            }
        };
        &self.schedule
    }

    /// Finish the gesture and hand back the committed collection for the
    /// host to persist. With no gesture in flight this just clones the
    /// current collection.
    pub fn end_gesture(&mut self) -> Schedule {
        if let Some(gesture) = self.gesture.take() {
            debug!(task_id = %gesture.task_id, "gesture committed");
        }
        self.schedule.clone()
    }

    /// Abandon the gesture and restore the pre-gesture collection. Returns
    /// `false` if no gesture was in flight.
    pub fn cancel_gesture(&mut self) -> bool {
        match self.gesture.take() {
            Some(gesture) => {
                self.schedule = gesture.anchor;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Task;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, d).unwrap()
    }

    fn editor() -> (ScheduleEditor, Uuid, Uuid) {
        let a = Task::new("a", date(1), date(3));
        let mut b = Task::new("b", date(5), date(8));
        b.dependencies.push(a.id);
        let (a_id, b_id) = (a.id, b.id);
        let schedule = Schedule::new(vec![a, b]).unwrap();
        let mut timeline = Timeline::new(date(1), date(31));
        timeline.pixels_per_day = 10.0;
        (ScheduleEditor::new(schedule, timeline), a_id, b_id)
    }

    #[test]
    fn unknown_task_refuses_the_gesture() {
        let (mut editor, _, _) = editor();
        assert!(!editor.begin_gesture(Uuid::new_v4(), GestureMode::Move, 0.0));
        assert!(!editor.gesture_active());
    }

    #[test]
    fn only_one_gesture_at_a_time() {
        let (mut editor, a_id, b_id) = editor();
        assert!(editor.begin_gesture(a_id, GestureMode::Move, 0.0));
        assert!(!editor.begin_gesture(b_id, GestureMode::Move, 0.0));
    }

    #[test]
    fn frames_recompute_from_the_anchor_not_the_previous_frame() {
        let (mut editor, a_id, b_id) = editor();
        let anchor = editor.schedule().clone();
        editor.begin_gesture(a_id, GestureMode::Move, 100.0);

        // +30px at 10 px/day: both tasks slide 3 days.
        let frame = editor.update_gesture(130.0);
        assert_eq!(frame.get(a_id).unwrap().start, date(4));
        assert_eq!(frame.get(b_id).unwrap().start, date(8));

        // Back to +10px: 1 day from the anchor, not 1 day from the last
        // frame's position.
        let frame = editor.update_gesture(110.0);
        assert_eq!(frame.get(a_id).unwrap().start, date(2));
        assert_eq!(frame.get(b_id).unwrap().start, date(6));

        // Returning to the origin restores the anchor exactly.
        let frame = editor.update_gesture(100.0);
        assert_eq!(*frame, anchor);
    }

    #[test]
    fn end_gesture_commits_the_last_frame() {
        let (mut editor, a_id, _) = editor();
        editor.begin_gesture(a_id, GestureMode::Move, 0.0);
        editor.update_gesture(50.0);
        let committed = editor.end_gesture();

        assert!(!editor.gesture_active());
        assert_eq!(committed.get(a_id).unwrap().start, date(6));
        assert_eq!(committed, *editor.schedule());
    }

    #[test]
    fn resize_end_pushes_dependents_through_the_controller() {
        let (mut editor, a_id, b_id) = editor();
        editor.begin_gesture(a_id, GestureMode::ResizeEnd, 0.0);

        // Due moves 3 → 6, so B (start 5) is pushed to 7.
        let frame = editor.update_gesture(30.0);
        assert_eq!(frame.get(a_id).unwrap().due, date(6));
        assert_eq!(frame.get(b_id).unwrap().start, date(7));
        assert_eq!(frame.get(a_id).unwrap().start, date(1));
    }

    #[test]
    fn rejected_resize_frame_keeps_the_anchor_dates() {
        let (mut editor, a_id, _) = editor();
        let anchor = editor.schedule().clone();
        editor.begin_gesture(a_id, GestureMode::ResizeEnd, 0.0);

        // Due 3 dragged back past start 1: guard trips, frame unchanged.
        let frame = editor.update_gesture(-30.0);
        assert_eq!(*frame, anchor);
    }

    #[test]
    fn resize_start_moves_only_the_grabbed_task() {
        let (mut editor, a_id, b_id) = editor();
        editor.begin_gesture(a_id, GestureMode::ResizeStart, 0.0);

        let frame = editor.update_gesture(10.0);
        assert_eq!(frame.get(a_id).unwrap().start, date(2));
        assert_eq!(frame.get(a_id).unwrap().due, date(3));
        assert_eq!(frame.get(b_id).unwrap().start, date(5));
    }

    #[test]
    fn gesture_keeps_its_own_zoom_snapshot() {
        let (mut editor, a_id, _) = editor();
        editor.begin_gesture(a_id, GestureMode::Move, 0.0);
        // Zooming mid-gesture must not re-scale the drag.
        editor.timeline_mut().pixels_per_day = 80.0;

        let frame = editor.update_gesture(30.0);
        assert_eq!(frame.get(a_id).unwrap().start, date(4));
    }

    #[test]
    fn cancel_restores_the_pre_gesture_collection() {
        let (mut editor, a_id, _) = editor();
        let anchor = editor.schedule().clone();
        editor.begin_gesture(a_id, GestureMode::Move, 0.0);
        editor.update_gesture(70.0);

        assert!(editor.cancel_gesture());
        assert_eq!(*editor.schedule(), anchor);
        assert!(!editor.cancel_gesture());
    }
}
