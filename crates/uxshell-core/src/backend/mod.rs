//! Window lifecycle manager.
//!
//! A [`Backend`] owns a queue of pending windows and a list of live ones and
//! drives them through a single-threaded frame loop: create native
//! resources, poll input, draw, reconcile geometry, present, and release
//! windows whose close was requested. Native calls go through a
//! [`WindowProvider`].

pub mod errors;
pub mod lifecycle;
pub mod registry;
pub mod traits;

pub use errors::BackendError;
pub use lifecycle::{Backend, RunSummary};
pub use registry::BackendHandle;
pub use traits::{FontAtlasId, NativeWindow, ProviderError, WindowProvider, WindowRequest};
