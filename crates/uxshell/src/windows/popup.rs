use uxshell_core::{
    DockDirection, DrawContext, MonitorPreference, WindowContent, WindowController, WindowSpec,
};

pub const TITLE: &str = "Task window";

struct TaskPopup;

impl WindowContent for TaskPopup {
    fn draw(&mut self, cx: &mut DrawContext<'_>) {
        cx.window(TITLE, |cx| {
            cx.ui().text("This is a popup confirming ya clicked the bar");
            cx.propose_width();
            cx.ui().button("I understand");
            cx.propose_width();
            cx.ui().same_line();
            cx.ui().button("Cancel");
            cx.propose_height();
            cx.fit_window();
        });
    }
}

pub fn controller() -> WindowController {
    let spec = WindowSpec::new(TITLE)
        .with_dock(DockDirection::CENTER)
        .with_monitor(MonitorPreference::Primary);
    WindowController::new(spec, TaskPopup)
}
