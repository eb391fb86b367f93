pub mod geometry;
pub mod gesture;
pub mod propagate;

pub use geometry::{connectors, Connector, ConnectorAnchor};
pub use gesture::{GestureMode, ScheduleEditor};
