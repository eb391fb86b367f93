//! Interactive schedule editor engine.
//!
//! Keeps a directed dependency graph of tasks internally consistent while a
//! user drags or resizes task bars on a timeline:
//!
//! - **`model`**: the task collection ([`Schedule`]), the project window and
//!   date↔coordinate mapping ([`Timeline`]).
//! - **`engine`**: forward propagation over the dependency graph
//!   ([`engine::propagate`]), the drag/resize state machine
//!   ([`ScheduleEditor`]), and connector geometry for the renderer
//!   ([`engine::connectors`]).
//!
//! The crate draws nothing and stores nothing: the host captures pointer
//! events, feeds pixel offsets to the [`ScheduleEditor`], renders the frame
//! it gets back, and persists the collection returned at gesture end.

pub mod engine;
pub mod model;

pub use engine::{connectors, Connector, ConnectorAnchor, GestureMode, ScheduleEditor};
pub use model::{Schedule, ScheduleError, Task, TaskPatch, TaskSpan, Timeline};
