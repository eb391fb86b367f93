use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use super::task::{Task, TaskPatch};

/// Errors raised when building a [`Schedule`].
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// The dependency graph contains a cycle. Propagation over a cyclic
    /// graph would be order-dependent and meaningless, so cyclic input is
    /// rejected up front.
    #[error("dependency cycle involving {count} task(s)")]
    DependencyCycle { count: usize },
}

/// An ordered collection of tasks plus their dependency edges.
///
/// The collection is a value: edits go through [`Schedule::with_patch`],
/// which returns a new collection and leaves the original untouched. The
/// interaction controller relies on this to recompute every drag frame
/// from the pre-gesture snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    tasks: Vec<Task>,
}

impl Schedule {
    /// Build a schedule, rejecting dependency cycles.
    ///
    /// Dependency ids that resolve to no task in `tasks` are tolerated;
    /// they simply never participate in propagation.
    pub fn new(tasks: Vec<Task>) -> Result<Self, ScheduleError> {
        let schedule = Self { tasks };
        let ordered = schedule.topological_ids();
        if ordered.len() < schedule.tasks.len() {
            return Err(ScheduleError::DependencyCycle {
                count: schedule.tasks.len() - ordered.len(),
            });
        }
        Ok(schedule)
    }

    /// All tasks in collection order. Row index on the timeline is the
    /// position in this slice.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Look up a task by id.
    pub fn get(&self, id: Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    /// Row index of a task in the collection, if present.
    pub fn row_of(&self, id: Uuid) -> Option<usize> {
        self.tasks.iter().position(|t| t.id == id)
    }

    /// Every task whose `dependencies` list contains `id`, in collection
    /// order. A dangling `id` yields nothing.
    pub fn dependents_of(&self, id: Uuid) -> impl Iterator<Item = &Task> {
        self.tasks.iter().filter(move |t| t.depends_on(id))
    }

    /// Return a new collection with one task's dates replaced. All other
    /// tasks are carried over unchanged; an unknown `id` returns an
    /// identical copy.
    pub fn with_patch(&self, id: Uuid, patch: TaskPatch) -> Schedule {
        let mut next = self.clone();
        next.apply(id, patch);
        next
    }

    /// In-place counterpart of [`Schedule::with_patch`] for engine-internal
    /// use on an already-cloned working copy.
    pub(crate) fn apply(&mut self, id: Uuid, patch: TaskPatch) {
        if let Some(task) = self.tasks.iter_mut().find(|t| t.id == id) {
            if let Some(start) = patch.start {
                task.start = start;
            }
            if let Some(due) = patch.due {
                task.due = due;
            }
        }
    }

    /// Earliest start and latest due date over all tasks, or `None` for an
    /// empty collection. Hosts use this to size the project window.
    pub fn date_bounds(&self) -> Option<(chrono::NaiveDate, chrono::NaiveDate)> {
        let min = self.tasks.iter().map(|t| t.start).min()?;
        let max = self.tasks.iter().map(|t| t.due).max()?;
        Some((min, max))
    }

    /// Task ids in topological order (predecessors before dependents),
    /// via Kahn's algorithm. Dangling dependency ids contribute no edge.
    /// Tasks caught in a cycle are absent from the result.
    pub(crate) fn topological_ids(&self) -> Vec<Uuid> {
        let mut in_degree: HashMap<Uuid, usize> = self
            .tasks
            .iter()
            .map(|t| {
                let present = t
                    .dependencies
                    .iter()
                    .filter(|dep| self.get(**dep).is_some())
                    .count();
                (t.id, present)
            })
            .collect();

        let mut ready: Vec<Uuid> = self
            .tasks
            .iter()
            .filter(|t| in_degree[&t.id] == 0)
            .map(|t| t.id)
            .collect();

        let mut ordered = Vec::with_capacity(self.tasks.len());
        while let Some(id) = ready.pop() {
            ordered.push(id);
            for dependent in self.dependents_of(id) {
                if let Some(degree) = in_degree.get_mut(&dependent.id) {
                    *degree -= 1;
                    if *degree == 0 {
                        ready.push(dependent.id);
                    }
                }
            }
        }
        ordered
    }
}
