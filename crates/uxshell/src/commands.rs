use clap::ArgMatches;
use serde::Serialize;
use tracing::{error, info, warn};

use uxshell_core::config::ShellConfig;
use uxshell_core::events;
use uxshell_core::headless::WindowRecord;
use uxshell_core::{Backend, HeadlessProvider, RunSummary, WindowController};

use crate::windows::{basic, statusbar};

/// Load configuration with warning on errors.
///
/// Falls back to defaults if config loading fails, but notifies the user via:
/// - stderr message for immediate visibility
/// - structured log event `cli.config.load_failed` for debugging
fn load_config_with_warning() -> ShellConfig {
    match ShellConfig::load_hierarchy() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Could not load config: {}. Using defaults.\n\
                 Tip: Check ~/.uxshell/config.toml and ./.uxshell/config.toml for syntax errors.",
                e
            );
            warn!(
                event = "cli.config.load_failed",
                error = %e,
            );
            ShellConfig::default()
        }
    }
}

/// Config from files with the command's overrides applied, validated.
fn config_for(matches: &ArgMatches) -> Result<ShellConfig, Box<dyn std::error::Error>> {
    let mut config = load_config_with_warning();
    if let Some(refresh_ms) = matches.get_one::<u64>("refresh-ms") {
        config.scheduler.refresh_period_ms = *refresh_ms;
    }
    config.validate()?;
    Ok(config)
}

#[derive(Serialize)]
struct WindowReport {
    title: String,
    frames: u64,
    width: i32,
    height: i32,
    x: i32,
    y: i32,
    text: String,
}

impl From<&WindowRecord> for WindowReport {
    fn from(record: &WindowRecord) -> Self {
        Self {
            title: record.title.clone(),
            frames: record.frames,
            width: record.size.0,
            height: record.size.1,
            x: record.position.x,
            y: record.position.y,
            text: record.last_frame_text(),
        }
    }
}

#[derive(Serialize)]
struct RunReport {
    frames: u64,
    windows_opened: u64,
    windows_closed: u64,
    windows: Vec<WindowReport>,
}

impl RunReport {
    fn new(summary: RunSummary, provider: &HeadlessProvider) -> Self {
        Self {
            frames: summary.frames,
            windows_opened: summary.windows_opened,
            windows_closed: summary.windows_closed,
            windows: provider.all_windows().into_iter().map(Into::into).collect(),
        }
    }

    fn print(&self) {
        for (index, window) in self.windows.iter().enumerate() {
            if index > 0 {
                println!();
            }
            println!(
                "== {} ({}x{} at {},{}, {} frames) ==",
                window.title, window.width, window.height, window.x, window.y, window.frames
            );
            if !window.text.is_empty() {
                println!("{}", window.text);
            }
        }
    }
}

pub fn run_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    events::log_shell_started();

    let result = match matches.subcommand() {
        Some(("basic", sub_matches)) => handle_basic_command(sub_matches),
        Some(("statusbar", sub_matches)) => handle_statusbar_command(sub_matches),
        _ => {
            error!(event = "cli.command_unknown");
            Err("Unknown command".into())
        }
    };

    events::log_shell_stopping();
    result
}

fn handle_basic_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let provider = HeadlessProvider::new().close_after_frames(frames(matches));
    run_windows("basic", matches, provider, vec![basic::controller()])
}

fn handle_statusbar_command(matches: &ArgMatches) -> Result<(), Box<dyn std::error::Error>> {
    let mut provider = HeadlessProvider::new().close_after_frames(frames(matches));
    if matches.get_flag("click") {
        provider = provider.click(statusbar::TITLE, statusbar::POPUP_BUTTON);
    }
    run_windows("statusbar", matches, provider, vec![statusbar::controller()])
}

fn frames(matches: &ArgMatches) -> u64 {
    matches.get_one::<u64>("frames").copied().unwrap_or(3)
}

fn run_windows(
    name: &str,
    matches: &ArgMatches,
    provider: HeadlessProvider,
    windows: Vec<WindowController>,
) -> Result<(), Box<dyn std::error::Error>> {
    let json_output = matches.get_flag("json");
    let config = config_for(matches)?;

    info!(
        event = "cli.run_started",
        demo = name,
        windows = windows.len(),
        refresh_period_ms = config.scheduler.refresh_period_ms,
    );

    let mut backend = Backend::new(provider, config);
    for window in windows {
        backend.enqueue(window);
    }

    match backend.run() {
        Ok(summary) => {
            let report = RunReport::new(summary, backend.provider());
            if json_output {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                report.print();
            }

            info!(
                event = "cli.run_completed",
                demo = name,
                frames = summary.frames,
                windows = summary.windows_opened,
            );
            Ok(())
        }
        Err(e) => {
            eprintln!("Failed to run {}: {}", name, e);

            events::log_shell_failed(&e);
            Err(e.into())
        }
    }
}
