//! A centred window that shows the output of `date`.

use std::time::Duration;

use uxshell_core::process::{CommandSpec, run_async};
use uxshell_core::{
    DockDirection, DrawContext, FetchError, Fetcher, MonitorPreference, WindowContent,
    WindowController, WindowSpec,
};

pub const TITLE: &str = "Simple Window";

async fn date_time() -> Result<String, FetchError> {
    let output = run_async(&CommandSpec::shell("date")).await?;
    Ok(output.stdout.trim().to_string())
}

struct SimpleWindow;

impl WindowContent for SimpleWindow {
    fn draw(&mut self, cx: &mut DrawContext<'_>) {
        let date = cx.store().get_as::<String>("date");

        cx.window(TITLE, |cx| {
            cx.ui().text("Simple window with simple text");
            cx.propose_width();
            if let Some(date) = &date {
                cx.ui().text(&format!("The time is {}", date));
                cx.propose_width();
            }
            cx.propose_height();
            cx.fit_window();
        });
    }
}

pub fn controller() -> WindowController {
    let spec = WindowSpec::new(TITLE)
        .with_dock(DockDirection::CENTER)
        .with_monitor(MonitorPreference::Primary);

    WindowController::new(spec, SimpleWindow).with_fetcher(Fetcher::new(
        "date",
        Duration::from_millis(1000),
        |_store| date_time(),
    ))
}
