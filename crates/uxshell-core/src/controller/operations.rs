use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::backend::BackendHandle;
use crate::config::SchedulerConfig;
use crate::controller::context::{DrawContext, InitContext, WindowContent};
use crate::controller::errors::ControllerError;
use crate::controller::types::ControllerState;
use crate::fetch::Fetcher;
use crate::render::Ui;
use crate::scheduler::{RefreshScheduler, SchedulerHandle};
use crate::shell::{NativeHandles, Rect, WindowSpec};
use crate::store::SharedStore;

/// One application window: its geometry, data store, fetchers, background
/// scheduler and draw content.
pub struct WindowController {
    spec: WindowSpec,
    content: Box<dyn WindowContent>,
    store: Arc<SharedStore>,
    fetchers: Vec<Fetcher>,
    scheduler: Option<SchedulerHandle>,
    state: ControllerState,
    require_data_thread: Option<bool>,
    frames: u64,
}

impl WindowController {
    pub fn new(spec: WindowSpec, content: impl WindowContent) -> Self {
        let refresh_period = SchedulerConfig::default().refresh_period();
        Self {
            spec,
            content: Box::new(content),
            store: Arc::new(SharedStore::new(refresh_period)),
            fetchers: Vec::new(),
            scheduler: None,
            state: ControllerState::Queued,
            require_data_thread: None,
            frames: 0,
        }
    }

    /// Register a fetcher. Fetchers run in registration order and cannot be
    /// removed.
    pub fn attach_data(&mut self, fetcher: Fetcher) -> &mut Self {
        self.fetchers.push(fetcher);
        self
    }

    pub fn with_fetcher(mut self, fetcher: Fetcher) -> Self {
        self.attach_data(fetcher);
        self
    }

    /// Override the configured data-thread policy for this window.
    pub fn set_require_data_thread(&mut self, require: bool) {
        self.require_data_thread = Some(require);
    }

    /// The window's data store. Use it to set static values before the window
    /// is enqueued.
    pub fn store(&self) -> &Arc<SharedStore> {
        &self.store
    }

    pub fn spec(&self) -> &WindowSpec {
        &self.spec
    }

    pub fn spec_mut(&mut self) -> &mut WindowSpec {
        &mut self.spec
    }

    pub fn title(&self) -> &str {
        self.spec.title()
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn fetchers(&self) -> &[Fetcher] {
        &self.fetchers
    }

    /// Frames drawn so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// True while the background scheduler thread is running.
    pub fn data_thread_alive(&self) -> bool {
        self.scheduler.as_ref().is_some_and(SchedulerHandle::is_alive)
    }

    fn transition(&mut self, next: ControllerState) -> Result<(), ControllerError> {
        if !self.state.can_transition_to(next) {
            return Err(ControllerError::InvalidTransition {
                title: self.spec.title().to_string(),
                from: self.state,
                to: next,
            });
        }

        debug!(
            event = "core.controller.state_changed",
            window = self.spec.title(),
            from = %self.state,
            to = %next,
        );
        self.state = next;
        Ok(())
    }

    /// Native resources exist; record them and enter `Initializing`.
    pub(crate) fn begin_initializing(
        &mut self,
        handles: NativeHandles,
    ) -> Result<(), ControllerError> {
        self.transition(ControllerState::Initializing)?;
        self.spec.attach_native(handles);
        Ok(())
    }

    /// Seed every fetcher, start the background scheduler, run the init hook
    /// and enter `Active`. Blocks until seeding finishes.
    pub fn activate(
        &mut self,
        config: &SchedulerConfig,
        backend: &BackendHandle,
    ) -> Result<(), ControllerError> {
        if self.state != ControllerState::Initializing {
            return Err(ControllerError::InvalidTransition {
                title: self.spec.title().to_string(),
                from: self.state,
                to: ControllerState::Active,
            });
        }

        self.store.set_refresh_period(config.refresh_period());
        self.require_data_thread.get_or_insert(config.require_data_thread);

        let scheduler = RefreshScheduler::new(
            self.spec.title(),
            Arc::clone(&self.store),
            self.fetchers.clone(),
            config.fetch_timeout(),
        );
        self.scheduler = Some(scheduler.spawn()?);

        let mut cx = InitContext::new(&mut self.spec, &self.store, backend);
        self.content.init_hook(&mut cx);

        self.transition(ControllerState::Active)?;
        info!(
            event = "core.controller.activated",
            window = self.spec.title(),
            fetchers = self.fetchers.len(),
            statusbar = self.spec.is_statusbar(),
        );
        Ok(())
    }

    /// Start a new frame: reset the accumulated geometry.
    pub fn begin_frame(&mut self, ui: &dyn Ui) {
        self.spec.reset_for_frame(ui);
    }

    /// Run the draw content once and settle the window bounds.
    pub fn draw_frame(
        &mut self,
        ui: &mut dyn Ui,
        backend: &BackendHandle,
        workarea: Option<Rect>,
    ) -> Result<(), ControllerError> {
        if self.state != ControllerState::Active {
            return Err(ControllerError::InvalidTransition {
                title: self.spec.title().to_string(),
                from: self.state,
                to: ControllerState::Active,
            });
        }

        if self.require_data_thread.unwrap_or(true) && !self.data_thread_alive() {
            return Err(ControllerError::DataThreadVanished {
                title: self.spec.title().to_string(),
            });
        }

        let snapshot = self.store.snapshot();
        let mut cx = DrawContext::new(ui, &mut self.spec, snapshot, backend, workarea);
        self.content.draw(&mut cx);

        self.spec.apply_bounds();
        self.frames += 1;
        Ok(())
    }

    /// Enter `Closing` and stop the background scheduler, waiting for it to
    /// exit so nothing writes to the store afterwards.
    pub fn close(&mut self) -> Result<(), ControllerError> {
        self.transition(ControllerState::Closing)?;

        if let Some(mut scheduler) = self.scheduler.take()
            && let Err(e) = scheduler.shutdown()
        {
            warn!(
                event = "core.controller.scheduler_shutdown_failed",
                window = self.spec.title(),
                error = %e,
            );
        }
        Ok(())
    }

    /// Enter `Destroyed` and hand back the native handles for release.
    pub(crate) fn finish_destroy(&mut self) -> Result<Option<NativeHandles>, ControllerError> {
        self.transition(ControllerState::Destroyed)?;
        Ok(self.spec.detach_native())
    }
}

impl std::fmt::Debug for WindowController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WindowController")
            .field("title", &self.spec.title())
            .field("state", &self.state)
            .field("fetchers", &self.fetchers.len())
            .field("frames", &self.frames)
            .finish_non_exhaustive()
    }
}
