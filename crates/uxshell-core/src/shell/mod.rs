//! Shared window state and the bounds-fitting accumulator.

pub mod bounds;
pub mod spec;
pub mod types;

pub use spec::WindowSpec;
pub use types::{DockDirection, MonitorPreference, NativeHandles, Position, Rect, Size};
