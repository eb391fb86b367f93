use crate::model::{Schedule, Timeline};

/// One end of a dependency connector: normalized x along the timeline plus
/// the task's row in the collection. The host scales x by its chart width
/// and row by its row height; curves and arrowheads are its problem.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConnectorAnchor {
    pub x: f32,
    pub row: usize,
}

/// Connector geometry for one dependency edge, from the predecessor's
/// trailing edge to the dependent's leading edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connector {
    pub from: ConnectorAnchor,
    pub to: ConnectorAnchor,
}

/// Anchor pairs for every resolvable dependency edge, in collection order
/// of the dependent and declaration order of its predecessors. Edges whose
/// predecessor id is dangling are skipped.
pub fn connectors(schedule: &Schedule, timeline: &Timeline) -> Vec<Connector> {
    let mut edges = Vec::new();
    for (to_row, dependent) in schedule.tasks().iter().enumerate() {
        for dep_id in &dependent.dependencies {
            let Some(from_row) = schedule.row_of(*dep_id) else {
                continue;
            };
            let predecessor = &schedule.tasks()[from_row];
            edges.push(Connector {
                from: ConnectorAnchor {
                    x: timeline.offset_of(predecessor.due),
                    row: from_row,
                },
                to: ConnectorAnchor {
                    x: timeline.offset_of(dependent.start),
                    row: to_row,
                },
            });
        }
    }
    edges
}
