//! Display-less window provider for tests and the command line.

pub mod provider;
pub mod ui;

pub use provider::{HeadlessProvider, WindowRecord};
pub use ui::{DrawCommand, HeadlessUi, render_text};
