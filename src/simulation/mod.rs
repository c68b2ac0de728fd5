mod autopilot;
mod collision;
mod controls;
mod geometry;
mod level;
mod physics;
mod session_runner;

pub use autopilot::*;
pub use collision::*;
pub use controls::*;
pub use geometry::*;
pub use level::*;
pub use physics::*;
pub use session_runner::*;
