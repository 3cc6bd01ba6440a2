//! A status bar docked to the bottom of the primary monitor.
//!
//! Three columns: a button that opens [`super::popup`], the spotify player
//! state, and the clock.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use uxshell_core::process::{CommandSpec, is_command_available, run_async};
use uxshell_core::style::parse_hex_color;
use uxshell_core::{
    DockDirection, DrawContext, FetchError, Fetcher, InitContext, Position, Size, Vec2,
    WindowContent, WindowController, WindowSpec,
};

use super::popup;

pub const TITLE: &str = "bottom bar";
pub const POPUP_BUTTON: &str = "Charm";
pub const BAR_SIZE: i32 = 32;

const PLAYING_COLOR: &str = "#50fa7b";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    Playing,
    Paused,
    Stopped,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpotifyStatus {
    pub state: PlayerState,
    pub title: String,
}

impl SpotifyStatus {
    fn not_running() -> Self {
        Self {
            state: PlayerState::Stopped,
            title: "spotify not running".to_string(),
        }
    }

    /// Text shown in the bar, with its highlight color if any.
    fn label(&self) -> (&str, Option<&'static str>) {
        match self.state {
            PlayerState::Stopped => ("[spotify not open]", None),
            PlayerState::Playing => (&self.title, Some(PLAYING_COLOR)),
            PlayerState::Paused => (&self.title, None),
        }
    }
}

async fn time() -> Result<String, FetchError> {
    let output = run_async(&CommandSpec::shell("date")).await?;
    Ok(output.stdout.trim().to_string())
}

async fn spotify() -> Result<SpotifyStatus, FetchError> {
    let status = run_async(&CommandSpec::shell("playerctl status -p spotify")).await?;
    if !status.success() {
        return Ok(SpotifyStatus::not_running());
    }

    let state = match status.stdout.trim() {
        "Playing" => PlayerState::Playing,
        "Paused" => PlayerState::Paused,
        _ => PlayerState::Stopped,
    };

    let metadata = run_async(&CommandSpec::shell(
        "playerctl metadata -p spotify --format '{{ artist }} - {{ title }}'",
    ))
    .await?;

    Ok(SpotifyStatus {
        state,
        title: metadata.stdout.trim().to_string(),
    })
}

struct StatusBar;

impl StatusBar {
    /// Pin the bar to the bottom edge of the work area, full width.
    fn setup_bar(cx: &mut DrawContext<'_>) {
        let Some(workarea) = cx.workarea() else {
            return;
        };
        let bar_size = cx.store().get_as::<i32>("bar_size").unwrap_or(BAR_SIZE);

        let spec = cx.spec_mut();
        let bounds = Size::new(workarea.width as f32, bar_size as f32);
        spec.set_min_size(bounds);
        spec.set_max_size(bounds);
        spec.request_position(Position::new(
            workarea.x,
            workarea.y + workarea.height - bar_size,
        ));
        spec.apply_bounds();

        let size = spec.size();
        cx.ui().set_next_window_size(Vec2::new(size.width, size.height));
    }

    fn left_controls(cx: &mut DrawContext<'_>) {
        if cx.ui().button(POPUP_BUTTON) {
            cx.backend().enqueue(popup::controller());
        }
        cx.ui().same_line();
    }

    fn center_controls(cx: &mut DrawContext<'_>) {
        let status = cx
            .store()
            .get_as::<SpotifyStatus>("spotify")
            .unwrap_or_else(SpotifyStatus::not_running);
        let (text, color) = status.label();

        let ui = cx.ui();
        let cursor = ui.cursor_pos();
        let text_width = ui.calc_text_size(text).x;
        let centered_x = (ui.column_width() / 2.0 - (text_width / 2.0).round()).max(0.0);
        ui.set_cursor_pos(Vec2::new(cursor.x + centered_x, cursor.y));

        match color.map(parse_hex_color) {
            Some(Ok(color)) => ui.text_colored(text, color),
            _ => ui.text(text),
        }
    }

    fn right_controls(cx: &mut DrawContext<'_>) {
        if let Some(time) = cx.store().get_as::<String>("time") {
            cx.ui().text(&time);
        }
    }
}

impl WindowContent for StatusBar {
    fn init_hook(&mut self, _cx: &mut InitContext<'_>) {
        if !is_command_available("playerctl") {
            warn!(event = "cli.statusbar.playerctl_missing", window = TITLE);
        }
    }

    fn draw(&mut self, cx: &mut DrawContext<'_>) {
        Self::setup_bar(cx);

        cx.window(TITLE, |cx| {
            cx.ui().columns(3, "bar");
            Self::left_controls(cx);
            cx.ui().next_column();
            Self::center_controls(cx);
            cx.ui().next_column();
            Self::right_controls(cx);
            cx.ui().columns(1, "bar");
        });
    }
}

pub fn controller() -> WindowController {
    let spec = WindowSpec::new(TITLE)
        .with_dock(DockDirection::BOTTOM)
        .statusbar();

    let controller = WindowController::new(spec, StatusBar)
        .with_fetcher(Fetcher::new("time", Duration::from_millis(100), |_store| {
            time()
        }))
        .with_fetcher(Fetcher::new(
            "spotify",
            Duration::from_millis(1000),
            |_store| spotify(),
        ));
    controller.store().set("bar_size", BAR_SIZE);
    controller
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stopped_label_ignores_title() {
        let status = SpotifyStatus::not_running();
        assert_eq!(status.label(), ("[spotify not open]", None));
    }

    #[test]
    fn test_playing_label_is_highlighted() {
        let status = SpotifyStatus {
            state: PlayerState::Playing,
            title: "Artist - Song".to_string(),
        };
        assert_eq!(status.label(), ("Artist - Song", Some(PLAYING_COLOR)));
        assert!(parse_hex_color(PLAYING_COLOR).is_ok());
    }

    #[test]
    fn test_controller_seeds_bar_size() {
        let controller = controller();
        assert_eq!(
            controller.store().snapshot().get_as::<i32>("bar_size"),
            Some(BAR_SIZE)
        );
        assert_eq!(controller.fetchers().len(), 2);
        assert!(controller.spec().is_statusbar());
    }
}
