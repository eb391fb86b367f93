use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single schedulable task on the timeline.
///
/// Dates are day-granular; time-of-day is never considered. The invariant
/// `due >= start` holds for every task the engine produces (zero-length
/// tasks are allowed).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub name: String,
    pub start: NaiveDate,
    pub due: NaiveDate,
    /// Predecessor task ids this task depends on, in declaration order.
    /// Ids that resolve to no task in the collection are tolerated and
    /// skipped during propagation.
    #[serde(default)]
    pub dependencies: Vec<Uuid>,
}

impl Task {
    /// Create a new task with a fresh id and no predecessors.
    pub fn new(name: impl Into<String>, start: NaiveDate, due: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            start,
            due,
            dependencies: Vec::new(),
        }
    }

    /// Duration in whole days (`due - start`). Zero for same-day tasks.
    pub fn duration_days(&self) -> i64 {
        (self.due - self.start).num_days()
    }

    /// Whether this task lists `id` as a predecessor.
    pub fn depends_on(&self, id: Uuid) -> bool {
        self.dependencies.contains(&id)
    }
}

/// A partial update to one task's dates. `None` fields keep the current
/// value, so a patch never has to restate what it does not change.
#[derive(Debug, Clone, Copy, Default)]
pub struct TaskPatch {
    pub start: Option<NaiveDate>,
    pub due: Option<NaiveDate>,
}

impl TaskPatch {
    /// Patch that replaces both dates.
    pub fn dates(start: NaiveDate, due: NaiveDate) -> Self {
        Self {
            start: Some(start),
            due: Some(due),
        }
    }

    /// Patch that shifts both dates by the same number of days,
    /// preserving duration.
    pub fn shifted(task: &Task, delta_days: i64) -> Self {
        let delta = chrono::Duration::days(delta_days);
        Self {
            start: Some(task.start + delta),
            due: Some(task.due + delta),
        }
    }
}
