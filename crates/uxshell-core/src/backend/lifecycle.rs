//! The render-thread frame loop that creates, drives and tears down windows.

use tracing::{debug, error, info, warn};

use crate::backend::errors::BackendError;
use crate::backend::registry::{LiveWindow, PendingWindow, WindowRegistry};
use crate::backend::traits::{FontAtlasId, WindowProvider, WindowRequest};
use crate::backend::BackendHandle;
use crate::config::{CreationFailurePolicy, ShellConfig};
use crate::controller::WindowController;
use crate::shell::{NativeHandles, Size, WindowSpec};

/// Totals for one [`Backend::run`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Frames presented, summed over all windows.
    pub frames: u64,
    pub windows_opened: u64,
    pub windows_closed: u64,
}

/// Window lifecycle manager.
///
/// Owns its registry; several backends can exist side by side, each with
/// its own provider. [`Backend::run`] must be called on the thread the
/// provider is bound to.
pub struct Backend<P: WindowProvider> {
    provider: P,
    config: ShellConfig,
    registry: WindowRegistry,
    fonts: Option<FontAtlasId>,
    summary: RunSummary,
}

impl<P: WindowProvider> Backend<P> {
    pub fn new(provider: P, config: ShellConfig) -> Self {
        Self {
            provider,
            config,
            registry: WindowRegistry::new(),
            fonts: None,
            summary: RunSummary::default(),
        }
    }

    /// Handle for queueing windows from any thread, including from window
    /// content while the loop runs.
    pub fn handle(&self) -> BackendHandle {
        self.registry.handle().clone()
    }

    pub fn enqueue(&self, controller: WindowController) {
        self.registry.handle().enqueue(controller);
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn into_provider(self) -> P {
        self.provider
    }

    /// Titles of the live windows, in the order they are drawn.
    pub fn live_titles(&self) -> Vec<String> {
        self.registry
            .live
            .iter()
            .map(|window| window.controller.title().to_string())
            .collect()
    }

    /// Drive every window until none are pending or live.
    ///
    /// On a fatal error every live window is torn down before the error is
    /// returned.
    pub fn run(&mut self) -> Result<RunSummary, BackendError> {
        info!(event = "core.backend.run_started");

        let result = self.run_loop();
        if let Err(e) = &result {
            error!(event = "core.backend.run_failed", error = %e);
            self.teardown_all();
        }
        self.provider.terminate();

        info!(
            event = "core.backend.run_completed",
            frames = self.summary.frames,
            opened = self.summary.windows_opened,
            closed = self.summary.windows_closed,
        );
        result.map(|()| self.summary)
    }

    fn run_loop(&mut self) -> Result<(), BackendError> {
        while !self.registry.is_idle() {
            self.drain_pending()?;
            self.drive_live()?;
        }
        Ok(())
    }

    /// Create native resources for every queued window. Windows whose
    /// creation fails stay queued under the retry policy.
    fn drain_pending(&mut self) -> Result<(), BackendError> {
        let batch = self.registry.handle().take_pending();
        let mut retry = Vec::new();

        for mut pending in batch {
            match self.open(&mut pending.controller) {
                Ok(handles) => {
                    self.registry.live.push(LiveWindow {
                        controller: pending.controller,
                        handles,
                    });
                    self.summary.windows_opened += 1;
                }
                Err(BackendError::WindowCreationFailed { title, message }) => {
                    pending.attempts += 1;
                    if !self.should_retry(&pending) {
                        return Err(BackendError::WindowCreationFailed { title, message });
                    }
                    warn!(
                        event = "core.backend.window_create_retry",
                        window = %title,
                        attempt = pending.attempts,
                        error = %message,
                    );
                    retry.push(pending);
                }
                Err(e) => return Err(e),
            }
        }

        if !retry.is_empty() {
            self.registry.handle().requeue_front(retry);
        }
        Ok(())
    }

    fn should_retry(&self, pending: &PendingWindow) -> bool {
        let backend = &self.config.backend;
        backend.creation_failure == CreationFailurePolicy::Retry
            && pending.attempts < backend.max_creation_attempts
    }

    /// Create the native window, position it, then seed and start the
    /// controller.
    fn open(&mut self, controller: &mut WindowController) -> Result<NativeHandles, BackendError> {
        let title = controller.title().to_string();
        let (width, height) = controller.spec().native_size().to_device();
        let request = WindowRequest {
            title: &title,
            width,
            height,
            share_fonts_with: self.fonts,
        };

        let native = self.provider.create_window(&request).map_err(|e| {
            error!(event = "core.backend.window_create_failed", window = %title, error = %e);
            BackendError::WindowCreationFailed {
                title: title.clone(),
                message: e.message,
            }
        })?;
        self.fonts.get_or_insert(native.fonts);

        let handles = native.handles;
        controller
            .begin_initializing(handles)
            .map_err(|source| BackendError::Controller {
                title: title.clone(),
                source,
            })?;
        self.apply_monitor_preference(controller.spec(), handles);

        let activated = controller.activate(&self.config.scheduler, self.registry.handle());
        if let Err(source) = activated {
            if let Err(e) = self.release(controller, handles) {
                warn!(event = "core.backend.release_failed", window = %title, error = %e);
            }
            return Err(BackendError::Controller { title, source });
        }

        info!(
            event = "core.backend.window_created",
            window = %title,
            width = width,
            height = height,
        );
        Ok(handles)
    }

    /// Place a new window on its preferred monitor according to its dock
    /// direction.
    fn apply_monitor_preference(&mut self, spec: &WindowSpec, handles: NativeHandles) {
        let Some(workarea) = self.provider.monitor_workarea(spec.monitor()) else {
            debug!(event = "core.backend.workarea_unavailable", window = spec.title());
            return;
        };

        let docked = spec.docked_position(workarea);
        if docked.is_unset() {
            return;
        }

        let current = self.provider.window_pos(handles);
        let target = docked.resolve(current);
        if target != current {
            self.provider.set_window_pos(handles, target);
        }
    }

    /// One pass over the live set in insertion order.
    fn drive_live(&mut self) -> Result<(), BackendError> {
        let mut index = 0;
        while index < self.registry.live.len() {
            let handles = self.registry.live[index].handles;
            self.provider.make_current(handles);
            self.provider.poll_events();

            if self.provider.should_close(handles) {
                let mut window = self.registry.live.remove(index);
                self.release(&mut window.controller, handles)?;
                continue;
            }

            self.draw_window(index)?;
            index += 1;
        }
        Ok(())
    }

    fn draw_window(&mut self, index: usize) -> Result<(), BackendError> {
        let Self {
            provider,
            registry,
            summary,
            ..
        } = self;
        let backend = registry.handle().clone();
        let window = &mut registry.live[index];
        let handles = window.handles;
        let controller = &mut window.controller;
        let title = controller.title().to_string();

        provider.process_inputs(handles);
        provider.new_frame(handles);

        let frame_start = controller.spec().native_size();
        let workarea = provider.monitor_workarea(controller.spec().monitor());
        {
            let ui = provider.ui(handles);
            controller.begin_frame(&*ui);
            controller
                .draw_frame(ui, &backend, workarea)
                .map_err(|source| BackendError::Controller {
                    title: title.clone(),
                    source,
                })?;
        }

        reconcile_geometry(provider, handles, controller.spec(), frame_start);

        provider
            .present(handles)
            .map_err(|e| BackendError::Provider {
                title,
                message: e.message,
            })?;
        summary.frames += 1;
        Ok(())
    }

    /// Stop the window's scheduler, then release its native resources.
    fn release(
        &mut self,
        controller: &mut WindowController,
        handles: NativeHandles,
    ) -> Result<(), BackendError> {
        let title = controller.title().to_string();
        controller
            .close()
            .and_then(|()| controller.finish_destroy())
            .map_err(|source| BackendError::Controller {
                title: title.clone(),
                source,
            })?;

        self.provider
            .destroy_window(handles)
            .map_err(|e| BackendError::Provider {
                title: title.clone(),
                message: e.message,
            })?;

        self.summary.windows_closed += 1;
        info!(
            event = "core.backend.window_destroyed",
            window = %title,
            frames = controller.frames(),
        );
        Ok(())
    }

    /// Release every live window and drop queued ones. Errors are logged;
    /// the caller is already reporting a failure.
    fn teardown_all(&mut self) {
        let live = std::mem::take(&mut self.registry.live);
        for mut window in live {
            if let Err(e) = self.release(&mut window.controller, window.handles) {
                warn!(event = "core.backend.teardown_failed", error = %e);
            }
        }

        let dropped = self.registry.handle().take_pending().len();
        if dropped > 0 {
            warn!(event = "core.backend.pending_dropped", count = dropped);
        }
    }
}

/// Push the frame's computed geometry to the native window.
fn reconcile_geometry<P: WindowProvider>(
    provider: &mut P,
    handles: NativeHandles,
    spec: &WindowSpec,
    frame_start: Size,
) {
    let fresh = spec.native_size();
    let (width, height) = fresh.to_device();
    if fresh != frame_start || provider.window_size(handles) != (width, height) {
        provider.set_window_size(handles, width, height);
        debug!(
            event = "core.backend.window_resized",
            window = spec.title(),
            width = width,
            height = height,
        );
    }

    let requested = spec.requested_position();
    if requested.is_unset() {
        return;
    }

    let current = provider.window_pos(handles);
    let target = requested.resolve(current);
    if target != current {
        provider.set_window_pos(handles, target);
        debug!(
            event = "core.backend.window_moved",
            window = spec.title(),
            x = target.x,
            y = target.y,
        );
    }
}
