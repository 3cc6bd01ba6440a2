//! Window controllers: bind a window's geometry and data store to its
//! background scheduler and draw content.

pub mod context;
pub mod errors;
pub mod operations;
pub mod types;

pub use context::{DrawContext, InitContext, WindowContent};
pub use errors::ControllerError;
pub use operations::WindowController;
pub use types::ControllerState;
