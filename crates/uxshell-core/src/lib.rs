//! uxshell-core: Core library for floating shell windows
//!
//! Applications declare chrome-less windows (status bars, popovers) whose
//! content is drawn every frame by an immediate-mode callback and whose data
//! is refreshed in the background by periodic fetchers.
//!
//! # Main Entry Points
//!
//! - [`backend`] - Window lifecycle manager and the provider boundary
//! - [`controller`] - Per-window controller and the draw-content trait
//! - [`scheduler`] - Background data refresh
//! - [`fetch`] - Fetcher definitions
//! - [`shell`] - Window geometry and bounds fitting
//! - [`headless`] - Display-less provider for tests and the CLI
//! - [`config`] - Configuration management

pub mod backend;
pub mod config;
pub mod controller;
pub mod errors;
pub mod events;
pub mod fetch;
pub mod headless;
pub mod logging;
pub mod process;
pub mod render;
pub mod scheduler;
pub mod shell;
pub mod store;
pub mod style;

// Re-export commonly used types at crate root for convenience
pub use backend::{Backend, BackendError, BackendHandle, RunSummary, WindowProvider};
pub use config::{CreationFailurePolicy, ShellConfig};
pub use controller::{
    ControllerError, ControllerState, DrawContext, InitContext, WindowContent, WindowController,
};
pub use fetch::{FetchError, Fetcher};
pub use headless::{HeadlessProvider, HeadlessUi};
pub use render::{Ui, Vec2, WindowFlags};
pub use shell::{DockDirection, MonitorPreference, Position, Rect, Size, WindowSpec};
pub use store::{SharedStore, StoreSnapshot};

// Re-export logging initialization
pub use logging::init_logging;
