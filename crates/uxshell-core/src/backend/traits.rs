//! Native window provider boundary.

use crate::render::Ui;
use crate::shell::{MonitorPreference, NativeHandles, Position, Rect};

/// Identifies a font atlas shared between immediate-mode contexts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontAtlasId(pub u64);

/// Parameters for creating a native window with its graphics context and
/// renderer.
#[derive(Debug, Clone)]
pub struct WindowRequest<'a> {
    pub title: &'a str,
    pub width: i32,
    pub height: i32,
    /// Reuse this atlas instead of building a new one; `None` for the first
    /// window a backend creates.
    pub share_fonts_with: Option<FontAtlasId>,
}

/// A freshly created native window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NativeWindow {
    pub handles: NativeHandles,
    pub fonts: FontAtlasId,
}

/// Failure reported by a provider.
#[derive(Debug, Clone, thiserror::Error, PartialEq, Eq)]
#[error("{message}")]
pub struct ProviderError {
    pub message: String,
}

impl ProviderError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Native windowing, graphics context and renderer.
///
/// All methods are called from the render thread only. Implementations are
/// free to be single-thread-affine.
pub trait WindowProvider {
    /// Create the native window, its graphics context and renderer, and make
    /// the context current.
    fn create_window(&mut self, request: &WindowRequest<'_>) -> Result<NativeWindow, ProviderError>;

    /// Release the renderer, the context and the native window.
    fn destroy_window(&mut self, handles: NativeHandles) -> Result<(), ProviderError>;

    fn make_current(&mut self, handles: NativeHandles);

    /// Pump platform events for all windows.
    fn poll_events(&mut self);

    /// Whether the platform asked this window to close.
    fn should_close(&self, handles: NativeHandles) -> bool;

    /// Feed pending input to the window's immediate-mode context.
    fn process_inputs(&mut self, handles: NativeHandles);

    /// Start a new immediate-mode frame for the window.
    fn new_frame(&mut self, handles: NativeHandles);

    /// The window's immediate-mode context.
    fn ui(&mut self, handles: NativeHandles) -> &mut dyn Ui;

    fn window_size(&self, handles: NativeHandles) -> (i32, i32);

    fn set_window_size(&mut self, handles: NativeHandles, width: i32, height: i32);

    fn window_pos(&self, handles: NativeHandles) -> Position;

    fn set_window_pos(&mut self, handles: NativeHandles, position: Position);

    /// Work area of the preferred monitor. `Unset` means the primary one.
    fn monitor_workarea(&self, monitor: MonitorPreference) -> Option<Rect>;

    /// Clear to transparent, render the frame's draw data and swap buffers.
    fn present(&mut self, handles: NativeHandles) -> Result<(), ProviderError>;

    /// Shut the platform layer down once no windows are left.
    fn terminate(&mut self);
}
