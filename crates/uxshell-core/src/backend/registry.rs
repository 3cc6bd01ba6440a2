//! Pending queue and live set of one lifecycle manager.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use crate::controller::WindowController;
use crate::shell::NativeHandles;

/// A controller waiting for native resources.
pub(crate) struct PendingWindow {
    pub(crate) controller: WindowController,
    pub(crate) attempts: u32,
}

/// A controller with native resources, driven every frame.
pub(crate) struct LiveWindow {
    pub(crate) controller: WindowController,
    pub(crate) handles: NativeHandles,
}

type PendingQueue = Arc<Mutex<VecDeque<PendingWindow>>>;

/// Thread-safe handle for queueing windows on a lifecycle manager.
///
/// Queueing never touches native resources; windows are created on the
/// render thread at the start of the next loop iteration.
#[derive(Clone, Default)]
pub struct BackendHandle {
    pending: PendingQueue,
}

impl BackendHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&self, controller: WindowController) {
        debug!(event = "core.backend.window_queued", window = controller.title());
        self.lock().push_back(PendingWindow {
            controller,
            attempts: 0,
        });
    }

    /// Windows queued but not yet created.
    pub fn pending_len(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, VecDeque<PendingWindow>> {
        // Every queue operation is a single call, so a poisoned queue is still valid.
        self.pending.lock().unwrap_or_else(|e| e.into_inner())
    }

    pub(crate) fn take_pending(&self) -> Vec<PendingWindow> {
        self.lock().drain(..).collect()
    }

    /// Put windows back at the front of the queue, keeping their order.
    pub(crate) fn requeue_front(&self, windows: Vec<PendingWindow>) {
        let mut queue = self.lock();
        for window in windows.into_iter().rev() {
            queue.push_front(window);
        }
    }
}

impl std::fmt::Debug for BackendHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BackendHandle")
            .field("pending", &self.pending_len())
            .finish()
    }
}

/// Owned registry of one backend's windows.
#[derive(Default)]
pub(crate) struct WindowRegistry {
    handle: BackendHandle,
    pub(crate) live: Vec<LiveWindow>,
}

impl WindowRegistry {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn handle(&self) -> &BackendHandle {
        &self.handle
    }

    /// No pending and no live windows: the loop is done.
    pub(crate) fn is_idle(&self) -> bool {
        self.live.is_empty() && self.handle.pending_len() == 0
    }
}
