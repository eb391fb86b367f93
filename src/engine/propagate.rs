use std::collections::{HashSet, VecDeque};

use chrono::NaiveDate;
use tracing::trace;
use uuid::Uuid;

use crate::model::{Schedule, TaskPatch};

/// Shift a task and its entire downstream chain by `delta_days`, preserving
/// every task's duration.
///
/// The affected set is the forward transitive closure over "depends on me"
/// edges starting at `task_id`, gathered breadth-first with a visited set
/// so each task moves exactly once. Tasks outside the closure, including
/// the moved task's own predecessors, are untouched. The rule is rigid on
/// purpose: the whole chain moves by the same delta regardless of slack,
/// which keeps a drag deterministic and exactly reversible.
pub fn shift(schedule: &Schedule, task_id: Uuid, delta_days: i64) -> Schedule {
    let mut next = schedule.clone();
    if delta_days == 0 || schedule.get(task_id).is_none() {
        return next;
    }

    let mut visited = HashSet::new();
    let mut queue = VecDeque::new();
    visited.insert(task_id);
    queue.push_back(task_id);

    while let Some(id) = queue.pop_front() {
        for dependent in schedule.dependents_of(id) {
            if visited.insert(dependent.id) {
                queue.push_back(dependent.id);
            }
        }
        if let Some(task) = schedule.get(id) {
            next.apply(id, TaskPatch::shifted(task, delta_days));
        }
    }
    next
}

/// Move a task's due date to `candidate` and push dependents forward as far
/// as needed to keep every dependent starting after its predecessor ends.
///
/// Guard: a candidate on or before the task's own start is rejected and the
/// collection comes back unchanged; the frame is simply dropped.
///
/// Dependents are resolved in topological order; a task constrained by
/// several adjusted predecessors in the same pass takes the latest bound
/// (max over `due + 1` of each), so the outcome does not depend on edge
/// declaration order. Dates are only ever delayed, never pulled earlier,
/// and a dependent that already clears its bound stops the cascade on that
/// branch.
pub fn push_due(schedule: &Schedule, task_id: Uuid, candidate: NaiveDate) -> Schedule {
    let mut next = schedule.clone();
    let Some(task) = schedule.get(task_id) else {
        return next;
    };
    if candidate <= task.start {
        trace!(task = %task.name, %candidate, "resize rejected: non-positive duration");
        return next;
    }

    next.apply(task_id, TaskPatch { start: None, due: Some(candidate) });

    let mut adjusted = HashSet::new();
    adjusted.insert(task_id);

    for id in schedule.topological_ids() {
        if id == task_id {
            continue;
        }
        let Some(current) = next.get(id) else { continue };

        // Latest finish among this task's adjusted predecessors; tasks with
        // none are outside the cascade.
        let bound = current
            .dependencies
            .iter()
            .filter(|dep| adjusted.contains(dep))
            .filter_map(|dep| next.get(*dep))
            .map(|parent| parent.due + chrono::Duration::days(1))
            .max();

        if let Some(bound) = bound {
            if current.start < bound {
                let delta = (bound - current.start).num_days();
                let patch = TaskPatch::shifted(current, delta);
                next.apply(id, patch);
                adjusted.insert(id);
            }
        }
    }
    next
}

/// Move a task's start date to `candidate` without touching anything else.
///
/// Guard: the candidate must be strictly earlier than the task's due date,
/// else the frame is rejected. Deliberately asymmetric with [`push_due`]:
/// dependents are constrained by when this task finishes, not when it
/// starts, so trimming the leading edge never cascades.
pub fn trim_start(schedule: &Schedule, task_id: Uuid, candidate: NaiveDate) -> Schedule {
    let mut next = schedule.clone();
    let Some(task) = schedule.get(task_id) else {
        return next;
    };
    if candidate >= task.due {
        trace!(task = %task.name, %candidate, "resize rejected: non-positive duration");
        return next;
    }
    next.apply(task_id, TaskPatch { start: Some(candidate), due: None });
    next
}
