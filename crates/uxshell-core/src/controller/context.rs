//! What window content sees while drawing.

use std::sync::Arc;

use crate::backend::BackendHandle;
use crate::render::{Ui, Vec2, WindowFlags};
use crate::shell::{Rect, WindowSpec};
use crate::store::{SharedStore, StoreSnapshot};

/// Draw-content capability implemented by every application window.
///
/// `draw` runs on the render thread once per frame, between the frame reset
/// and geometry reconciliation. It must return quickly: slow work belongs in a
/// [`crate::fetch::Fetcher`].
pub trait WindowContent: Send + 'static {
    fn draw(&mut self, cx: &mut DrawContext<'_>);

    /// Runs once, after the first data has been fetched and the background
    /// scheduler has started.
    fn init_hook(&mut self, _cx: &mut InitContext<'_>) {}
}

/// Per-frame drawing context.
pub struct DrawContext<'a> {
    ui: &'a mut dyn Ui,
    spec: &'a mut WindowSpec,
    store: Arc<StoreSnapshot>,
    backend: &'a BackendHandle,
    workarea: Option<Rect>,
}

impl<'a> DrawContext<'a> {
    pub(crate) fn new(
        ui: &'a mut dyn Ui,
        spec: &'a mut WindowSpec,
        store: Arc<StoreSnapshot>,
        backend: &'a BackendHandle,
        workarea: Option<Rect>,
    ) -> Self {
        Self {
            ui,
            spec,
            store,
            backend,
            workarea,
        }
    }

    pub fn ui(&mut self) -> &mut dyn Ui {
        &mut *self.ui
    }

    pub fn spec(&self) -> &WindowSpec {
        &*self.spec
    }

    pub fn spec_mut(&mut self) -> &mut WindowSpec {
        &mut *self.spec
    }

    /// Data as of the start of this frame. Keys may be missing until their
    /// fetcher first succeeds; treat that as "no data yet".
    pub fn store(&self) -> &StoreSnapshot {
        &self.store
    }

    /// Handle for opening further windows from a click handler.
    pub fn backend(&self) -> &BackendHandle {
        self.backend
    }

    /// Work area of the monitor this window prefers, if the provider knows it.
    pub fn workarea(&self) -> Option<Rect> {
        self.workarea
    }

    pub fn propose_width(&mut self) {
        self.spec.propose_width(&mut *self.ui);
    }

    pub fn propose_height(&mut self) {
        self.spec.propose_height(&*self.ui);
    }

    /// Clamp the accumulated size and resize the immediate-mode window to it.
    pub fn fit_window(&mut self) {
        self.spec.apply_bounds();
        let size = self.spec.size();
        self.ui.set_window_size(Vec2::new(size.width, size.height));
    }

    /// Draw a chrome-less window at the origin of the native surface.
    /// Returns whatever `body` returns, or `None` if the window was collapsed.
    pub fn window<R>(
        &mut self,
        title: &str,
        body: impl FnOnce(&mut DrawContext<'a>) -> R,
    ) -> Option<R> {
        self.window_with_flags(title, WindowFlags::shell(), body)
    }

    pub fn window_with_flags<R>(
        &mut self,
        title: &str,
        flags: WindowFlags,
        body: impl FnOnce(&mut DrawContext<'a>) -> R,
    ) -> Option<R> {
        self.ui.set_next_window_pos(Vec2::ZERO);
        let visible = self.ui.begin_window(title, flags);
        let result = visible.then(|| body(self));
        self.ui.end_window();
        result
    }
}

/// Context handed to [`WindowContent::init_hook`].
pub struct InitContext<'a> {
    spec: &'a mut WindowSpec,
    store: &'a Arc<SharedStore>,
    backend: &'a BackendHandle,
}

impl<'a> InitContext<'a> {
    pub(crate) fn new(
        spec: &'a mut WindowSpec,
        store: &'a Arc<SharedStore>,
        backend: &'a BackendHandle,
    ) -> Self {
        Self {
            spec,
            store,
            backend,
        }
    }

    pub fn spec_mut(&mut self) -> &mut WindowSpec {
        &mut *self.spec
    }

    pub fn store(&self) -> &Arc<SharedStore> {
        self.store
    }

    pub fn backend(&self) -> &BackendHandle {
        self.backend
    }
}
