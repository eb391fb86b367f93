pub mod schedule;
pub mod task;
pub mod timeline;

pub use schedule::{Schedule, ScheduleError};
pub use task::{Task, TaskPatch};
pub use timeline::{TaskSpan, Timeline};
