//! End-to-end lifecycle tests against the headless provider.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use uxshell_core::backend::{
    BackendError, NativeWindow, ProviderError, WindowProvider, WindowRequest,
};
use uxshell_core::config::BackendConfig;
use uxshell_core::controller::ControllerError;
use uxshell_core::{
    Backend, CreationFailurePolicy, DockDirection, DrawContext, FetchError, Fetcher,
    HeadlessProvider, MonitorPreference, Position, Rect, ShellConfig, Size, Ui, WindowContent,
    WindowController, WindowSpec,
};
use uxshell_core::shell::NativeHandles;

/// Draws one line of text, fits the window to it, and counts its frames.
struct Counting {
    text: String,
    draws: Arc<AtomicUsize>,
}

impl WindowContent for Counting {
    fn draw(&mut self, cx: &mut DrawContext<'_>) {
        self.draws.fetch_add(1, Ordering::SeqCst);
        let text = self.text.clone();
        cx.window("content", |cx| {
            cx.ui().text(&text);
            cx.propose_width();
            cx.propose_height();
        });
    }
}

fn counting(title: &str, text: &str) -> (WindowController, Arc<AtomicUsize>) {
    let draws = Arc::new(AtomicUsize::new(0));
    let controller = WindowController::new(
        WindowSpec::new(title).with_min_size(Size::new(10.0, 10.0)),
        Counting {
            text: text.to_string(),
            draws: Arc::clone(&draws),
        },
    );
    (controller, draws)
}

fn retry_config(max_creation_attempts: u32) -> ShellConfig {
    ShellConfig {
        backend: BackendConfig {
            creation_failure: CreationFailurePolicy::Retry,
            max_creation_attempts,
        },
        ..ShellConfig::default()
    }
}

#[test]
fn test_close_request_removes_window_within_one_iteration() {
    let provider = HeadlessProvider::new()
        .close_window_after("short", 1)
        .close_window_after("long", 3);
    let mut backend = Backend::new(provider, ShellConfig::default());
    let (short, short_draws) = counting("short", "a");
    let (long, long_draws) = counting("long", "b");
    backend.enqueue(short);
    backend.enqueue(long);

    let summary = backend.run().unwrap();

    assert_eq!(short_draws.load(Ordering::SeqCst), 1);
    assert_eq!(long_draws.load(Ordering::SeqCst), 3);
    assert_eq!(summary.frames, 4);
    assert_eq!(summary.windows_opened, 2);
    assert_eq!(summary.windows_closed, 2);
    assert!(backend.live_titles().is_empty());
    assert!(backend.provider().is_terminated());
}

#[test]
fn test_creation_failure_is_retried_next_iteration() {
    let provider = HeadlessProvider::new()
        .fail_creation("bar", 1)
        .close_after_frames(2);
    let mut backend = Backend::new(provider, retry_config(3));
    let (bar, draws) = counting("bar", "status");
    backend.enqueue(bar);

    let summary = backend.run().unwrap();

    assert_eq!(backend.provider().creation_attempts("bar"), 2);
    assert_eq!(summary.windows_opened, 1);
    assert_eq!(draws.load(Ordering::SeqCst), 2);
}

#[test]
fn test_creation_failure_is_fatal_by_default() {
    let provider = HeadlessProvider::new()
        .fail_creation("bar", 1)
        .close_after_frames(2);
    let mut backend = Backend::new(provider, ShellConfig::default());
    let (bar, draws) = counting("bar", "status");
    backend.enqueue(bar);

    let err = backend.run().unwrap_err();

    assert!(matches!(err, BackendError::WindowCreationFailed { ref title, .. } if title == "bar"));
    assert_eq!(backend.provider().creation_attempts("bar"), 1);
    assert_eq!(draws.load(Ordering::SeqCst), 0);
    assert!(backend.provider().is_terminated());
}

#[test]
fn test_fatal_creation_failure_tears_down_live_windows() {
    let provider = HeadlessProvider::new()
        .fail_creation("bad", 1)
        .close_after_frames(100);
    let mut backend = Backend::new(provider, ShellConfig::default());
    backend.enqueue(counting("good", "fine").0);
    backend.enqueue(counting("bad", "never").0);

    assert!(backend.run().is_err());

    let closed = backend.provider().closed_windows();
    assert_eq!(closed.len(), 1);
    assert_eq!(closed[0].title, "good");
    assert!(backend.live_titles().is_empty());
}

#[test]
fn test_retry_gives_up_after_max_attempts() {
    let provider = HeadlessProvider::new().fail_creation("bar", 10);
    let mut backend = Backend::new(provider, retry_config(3));
    backend.enqueue(counting("bar", "status").0);

    let err = backend.run().unwrap_err();

    assert!(matches!(err, BackendError::WindowCreationFailed { .. }));
    assert_eq!(backend.provider().creation_attempts("bar"), 3);
}

#[test]
fn test_window_is_resized_to_fit_content() {
    let provider = HeadlessProvider::new().close_after_frames(2);
    let mut backend = Backend::new(provider, ShellConfig::default());
    // 20 glyphs at 7 units each
    backend.enqueue(counting("w", "12345678901234567890").0);

    backend.run().unwrap();

    let record = &backend.provider().closed_windows()[0];
    // content: padding 8 + text 140 + spacing 8 wide, padding 8 + line 13 + spacing 4 tall,
    // plus the window padding once more for the native size
    assert_eq!(record.size, (164, 33));
    assert_eq!(record.resizes, vec![(164, 33)]);
}

#[test]
fn test_new_window_is_docked_on_its_monitor() {
    struct Empty;

    impl WindowContent for Empty {
        fn draw(&mut self, _cx: &mut DrawContext<'_>) {}
    }

    let provider = HeadlessProvider::new().close_after_frames(1);
    let mut backend = Backend::new(provider, ShellConfig::default());
    backend.enqueue(WindowController::new(
        WindowSpec::new("popup")
            .with_min_size(Size::new(200.0, 100.0))
            .with_dock(DockDirection::CENTER),
        Empty,
    ));

    backend.run().unwrap();

    let record = &backend.provider().closed_windows()[0];
    assert_eq!(record.moves.first(), Some(&Position::new(860, 490)));
}

#[test]
fn test_requested_position_resolves_per_axis() {
    struct Pinned;

    impl WindowContent for Pinned {
        fn draw(&mut self, cx: &mut DrawContext<'_>) {
            cx.spec_mut()
                .request_position(Position::new(Position::KEEP, 500));
        }
    }

    let provider = HeadlessProvider::new().close_after_frames(3);
    let mut backend = Backend::new(provider, ShellConfig::default());
    backend.enqueue(WindowController::new(WindowSpec::new("pinned"), Pinned));

    backend.run().unwrap();

    let record = &backend.provider().closed_windows()[0];
    assert_eq!(record.moves, vec![Position::new(0, 500)]);
    assert_eq!(record.position, Position::new(0, 500));
}

#[test]
fn test_content_can_open_a_popup() {
    struct Opener;

    impl WindowContent for Opener {
        fn draw(&mut self, cx: &mut DrawContext<'_>) {
            let clicked = cx.window("main", |cx| cx.ui().button("Open"));
            if clicked == Some(true) {
                let (popup, _) = counting("popup", "hello");
                cx.backend().enqueue(popup);
            }
        }
    }

    let provider = HeadlessProvider::new()
        .click("main", "Open")
        .close_after_frames(2);
    let mut backend = Backend::new(provider, ShellConfig::default());
    backend.enqueue(WindowController::new(WindowSpec::new("main"), Opener));

    let summary = backend.run().unwrap();

    assert_eq!(summary.windows_opened, 2);
    let provider = backend.into_provider();
    let windows = provider.all_windows();
    assert_eq!(windows.len(), 2);
    assert_eq!(windows[1].title, "popup");
    assert_eq!(windows[0].fonts, windows[1].fonts);
    assert_eq!(provider.atlases_created(), 1);
    assert!(windows[1].last_frame_text().contains("hello"));
}

#[test]
fn test_enqueue_from_another_thread() {
    let provider = HeadlessProvider::new().close_after_frames(1);
    let mut backend = Backend::new(provider, ShellConfig::default());
    let handle = backend.handle();

    std::thread::spawn(move || handle.enqueue(counting("remote", "hi").0))
        .join()
        .unwrap();

    let summary = backend.run().unwrap();
    assert_eq!(summary.windows_opened, 1);
}

#[test]
fn test_fetched_data_is_drawn() {
    struct Clock;

    impl WindowContent for Clock {
        fn draw(&mut self, cx: &mut DrawContext<'_>) {
            let Some(time) = cx.store().get_as::<String>("time") else {
                return;
            };
            cx.window("clock", |cx| cx.ui().text(&time));
        }
    }

    let provider = HeadlessProvider::new().close_after_frames(1);
    let mut backend = Backend::new(provider, ShellConfig::default());
    backend.enqueue(
        WindowController::new(WindowSpec::new("clock"), Clock).with_fetcher(Fetcher::new(
            "time",
            Duration::from_secs(1),
            |_store| async { Ok::<_, FetchError>("12:34") },
        )),
    );

    backend.run().unwrap();

    let record = &backend.provider().closed_windows()[0];
    assert_eq!(record.last_frame_text(), "12:34");
}

#[test]
fn test_vanished_data_thread_stops_the_loop() {
    let calls = Arc::new(AtomicUsize::new(0));
    let fetcher = Fetcher::new("boom", Duration::from_millis(1), move |_store| {
        let n = calls.fetch_add(1, Ordering::SeqCst);
        async move {
            if n > 0 {
                panic!("fetcher fault");
            }
            Ok::<_, FetchError>(n)
        }
    });

    struct Slow;

    impl WindowContent for Slow {
        fn draw(&mut self, _cx: &mut DrawContext<'_>) {
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    let mut config = ShellConfig::default();
    config.scheduler.refresh_period_ms = 1;
    let provider = HeadlessProvider::new().close_after_frames(10_000);
    let mut backend = Backend::new(provider, config);
    backend.enqueue(WindowController::new(WindowSpec::new("w"), Slow).with_fetcher(fetcher));

    let err = backend.run().unwrap_err();

    assert!(matches!(
        err,
        BackendError::Controller {
            source: ControllerError::DataThreadVanished { .. },
            ..
        }
    ));
    assert_eq!(backend.provider().closed_windows().len(), 1);
}

#[test]
fn test_each_live_window_is_made_current_and_polled() {
    let provider = HeadlessProvider::new()
        .close_window_after("first", 2)
        .close_window_after("second", 3);
    let mut backend = Backend::new(provider, ShellConfig::default());
    let (first, first_draws) = counting("first", "a");
    let (second, second_draws) = counting("second", "b");
    backend.enqueue(first);
    backend.enqueue(second);

    // The headless provider refuses to present a window whose context is not
    // current, so a clean run means every frame was drawn into its own context.
    let summary = backend.run().unwrap();

    let draws = first_draws.load(Ordering::SeqCst) + second_draws.load(Ordering::SeqCst);
    assert_eq!(draws, 5);
    assert_eq!(summary.frames, 5);
    // One poll per live window per iteration: every draw, plus the two
    // iterations that found a close request instead.
    assert_eq!(backend.provider().polls(), 5 + 2);
    assert_eq!(backend.provider().current(), None);
}

/// Provider that checks, at destroy time, whether the window's fetcher is
/// still being run.
struct DestroyWatcher {
    inner: HeadlessProvider,
    fetches: Arc<AtomicUsize>,
    quiet_at_destroy: Arc<Mutex<Vec<bool>>>,
}

impl WindowProvider for DestroyWatcher {
    fn create_window(&mut self, request: &WindowRequest<'_>) -> Result<NativeWindow, ProviderError> {
        self.inner.create_window(request)
    }

    fn destroy_window(&mut self, handles: NativeHandles) -> Result<(), ProviderError> {
        let before = self.fetches.load(Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(30));
        let after = self.fetches.load(Ordering::SeqCst);
        self.quiet_at_destroy.lock().unwrap().push(before == after);
        self.inner.destroy_window(handles)
    }

    fn make_current(&mut self, handles: NativeHandles) {
        self.inner.make_current(handles);
    }

    fn poll_events(&mut self) {
        self.inner.poll_events();
    }

    fn should_close(&self, handles: NativeHandles) -> bool {
        self.inner.should_close(handles)
    }

    fn process_inputs(&mut self, handles: NativeHandles) {
        self.inner.process_inputs(handles);
    }

    fn new_frame(&mut self, handles: NativeHandles) {
        self.inner.new_frame(handles);
    }

    fn ui(&mut self, handles: NativeHandles) -> &mut dyn Ui {
        self.inner.ui(handles)
    }

    fn window_size(&self, handles: NativeHandles) -> (i32, i32) {
        self.inner.window_size(handles)
    }

    fn set_window_size(&mut self, handles: NativeHandles, width: i32, height: i32) {
        self.inner.set_window_size(handles, width, height);
    }

    fn window_pos(&self, handles: NativeHandles) -> Position {
        self.inner.window_pos(handles)
    }

    fn set_window_pos(&mut self, handles: NativeHandles, position: Position) {
        self.inner.set_window_pos(handles, position);
    }

    fn monitor_workarea(&self, monitor: MonitorPreference) -> Option<Rect> {
        self.inner.monitor_workarea(monitor)
    }

    fn present(&mut self, handles: NativeHandles) -> Result<(), ProviderError> {
        self.inner.present(handles)
    }

    fn terminate(&mut self) {
        self.inner.terminate();
    }
}

#[test]
fn test_data_thread_is_joined_before_native_window_is_destroyed() {
    let fetches = Arc::new(AtomicUsize::new(0));
    let quiet_at_destroy = Arc::new(Mutex::new(Vec::new()));
    let provider = DestroyWatcher {
        inner: HeadlessProvider::new().close_after_frames(3),
        fetches: Arc::clone(&fetches),
        quiet_at_destroy: Arc::clone(&quiet_at_destroy),
    };

    let fetcher_count = Arc::clone(&fetches);
    let fetcher = Fetcher::new("tick", Duration::ZERO, move |_store| {
        let count = Arc::clone(&fetcher_count);
        async move { Ok::<_, FetchError>(count.fetch_add(1, Ordering::SeqCst) + 1) }
    });

    let mut config = ShellConfig::default();
    config.scheduler.refresh_period_ms = 1;
    let mut backend = Backend::new(provider, config);
    let (window, _) = counting("ticking", "t");
    backend.enqueue(window.with_fetcher(fetcher));

    backend.run().unwrap();

    assert!(fetches.load(Ordering::SeqCst) >= 1);
    assert_eq!(*quiet_at_destroy.lock().unwrap(), vec![true]);
}
