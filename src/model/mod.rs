pub mod drag;
pub mod grid;
pub mod roadmap;
pub mod task;
pub mod timeline;
pub mod zoom;

pub use drag::reschedule;
pub use grid::{grid_lines, GridKind};
pub use roadmap::Roadmap;
pub use task::Task;
pub use timeline::{bounds_of, position_of, ViewportRange};
pub use zoom::{Granularity, ZoomConfig, ZoomController};
