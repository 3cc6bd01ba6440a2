//! In-memory window provider.

use std::collections::HashMap;

use tracing::debug;

use crate::backend::{FontAtlasId, NativeWindow, ProviderError, WindowProvider, WindowRequest};
use crate::headless::ui::{DrawCommand, HeadlessUi, render_text};
use crate::render::{Ui, Vec2};
use crate::shell::{MonitorPreference, NativeHandles, Position, Rect};

/// Everything the provider observed about one window.
#[derive(Debug, Clone)]
pub struct WindowRecord {
    pub title: String,
    pub handles: NativeHandles,
    pub fonts: FontAtlasId,
    pub size: (i32, i32),
    pub position: Position,
    /// Frames presented.
    pub frames: u64,
    pub resizes: Vec<(i32, i32)>,
    pub moves: Vec<Position>,
    /// Draw commands of the last presented frame.
    pub last_frame: Vec<DrawCommand>,
}

impl WindowRecord {
    pub fn last_frame_text(&self) -> String {
        render_text(&self.last_frame)
    }
}

#[derive(Debug)]
struct HeadlessWindow {
    record: WindowRecord,
    ui: HeadlessUi,
}

/// A [`WindowProvider`] with no display.
///
/// Windows are plain records; drawing goes to a [`HeadlessUi`] per window.
/// Close requests, creation failures and button clicks are scripted up
/// front.
#[derive(Debug)]
pub struct HeadlessProvider {
    next_id: u64,
    windows: Vec<HeadlessWindow>,
    closed: Vec<WindowRecord>,
    close_after: Option<u64>,
    close_after_by_title: HashMap<String, u64>,
    creation_failures: HashMap<String, u32>,
    creation_attempts: HashMap<String, u32>,
    clicks: HashMap<String, Vec<String>>,
    primary: Option<Rect>,
    active: Option<Rect>,
    atlases_created: u64,
    current: Option<NativeHandles>,
    polls: u64,
    terminated: bool,
    scratch: HeadlessUi,
}

impl Default for HeadlessProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessProvider {
    /// A provider with one 1920x1080 monitor that is both primary and active.
    pub fn new() -> Self {
        let monitor = Rect::new(0, 0, 1920, 1080);
        Self {
            next_id: 1,
            windows: Vec::new(),
            closed: Vec::new(),
            close_after: None,
            close_after_by_title: HashMap::new(),
            creation_failures: HashMap::new(),
            creation_attempts: HashMap::new(),
            clicks: HashMap::new(),
            primary: Some(monitor),
            active: Some(monitor),
            atlases_created: 0,
            current: None,
            polls: 0,
            terminated: false,
            scratch: HeadlessUi::default(),
        }
    }

    /// Request close of every window once it has presented `frames` frames.
    pub fn close_after_frames(mut self, frames: u64) -> Self {
        self.close_after = Some(frames);
        self
    }

    /// Per-window override of [`HeadlessProvider::close_after_frames`].
    pub fn close_window_after(mut self, title: impl Into<String>, frames: u64) -> Self {
        self.close_after_by_title.insert(title.into(), frames);
        self
    }

    /// Fail the next `times` attempts to create a window with this title.
    pub fn fail_creation(mut self, title: impl Into<String>, times: u32) -> Self {
        self.creation_failures.insert(title.into(), times);
        self
    }

    /// Click the button `label` in window `title` the next time it is drawn.
    pub fn click(mut self, title: impl Into<String>, label: impl Into<String>) -> Self {
        self.clicks.entry(title.into()).or_default().push(label.into());
        self
    }

    pub fn with_workarea(mut self, monitor: MonitorPreference, workarea: Option<Rect>) -> Self {
        match monitor {
            MonitorPreference::Active => self.active = workarea,
            MonitorPreference::Primary | MonitorPreference::Unset => self.primary = workarea,
        }
        self
    }

    /// Live window by title.
    pub fn window(&self, title: &str) -> Option<&WindowRecord> {
        self.windows
            .iter()
            .map(|window| &window.record)
            .find(|record| record.title == title)
    }

    pub fn closed_windows(&self) -> &[WindowRecord] {
        &self.closed
    }

    /// Every window ever created, in creation order.
    pub fn all_windows(&self) -> Vec<&WindowRecord> {
        let mut records: Vec<&WindowRecord> = self
            .closed
            .iter()
            .chain(self.windows.iter().map(|window| &window.record))
            .collect();
        records.sort_by_key(|record| record.handles.window);
        records
    }

    pub fn creation_attempts(&self, title: &str) -> u32 {
        self.creation_attempts.get(title).copied().unwrap_or(0)
    }

    pub fn atlases_created(&self) -> u64 {
        self.atlases_created
    }

    pub fn current(&self) -> Option<NativeHandles> {
        self.current
    }

    pub fn polls(&self) -> u64 {
        self.polls
    }

    pub fn is_terminated(&self) -> bool {
        self.terminated
    }

    fn find(&self, handles: NativeHandles) -> Option<&HeadlessWindow> {
        self.windows.iter().find(|w| w.record.handles == handles)
    }

    fn find_mut(&mut self, handles: NativeHandles) -> Option<&mut HeadlessWindow> {
        self.windows.iter_mut().find(|w| w.record.handles == handles)
    }

    fn unknown(handles: NativeHandles) -> ProviderError {
        ProviderError::new(format!("unknown window {}", handles.window))
    }
}

impl WindowProvider for HeadlessProvider {
    fn create_window(&mut self, request: &WindowRequest<'_>) -> Result<NativeWindow, ProviderError> {
        *self
            .creation_attempts
            .entry(request.title.to_string())
            .or_default() += 1;

        if let Some(remaining) = self.creation_failures.get_mut(request.title)
            && *remaining > 0
        {
            *remaining -= 1;
            return Err(ProviderError::new(format!(
                "could not create window '{}'",
                request.title
            )));
        }

        let id = self.next_id;
        self.next_id += 1;
        let fonts = match request.share_fonts_with {
            Some(fonts) => fonts,
            None => {
                self.atlases_created += 1;
                FontAtlasId(self.atlases_created)
            }
        };
        let handles = NativeHandles {
            window: id,
            context: id,
            renderer: id,
        };

        let size = (request.width, request.height);
        self.windows.push(HeadlessWindow {
            record: WindowRecord {
                title: request.title.to_string(),
                handles,
                fonts,
                size,
                position: Position::new(0, 0),
                frames: 0,
                resizes: Vec::new(),
                moves: Vec::new(),
                last_frame: Vec::new(),
            },
            ui: HeadlessUi::new(Vec2::new(size.0 as f32, size.1 as f32)),
        });
        self.current = Some(handles);
        debug!(event = "core.headless.window_created", window = request.title, id = id);

        Ok(NativeWindow { handles, fonts })
    }

    fn destroy_window(&mut self, handles: NativeHandles) -> Result<(), ProviderError> {
        let index = self
            .windows
            .iter()
            .position(|w| w.record.handles == handles)
            .ok_or_else(|| Self::unknown(handles))?;

        let window = self.windows.remove(index);
        if self.current == Some(handles) {
            self.current = None;
        }
        self.closed.push(window.record);
        Ok(())
    }

    fn make_current(&mut self, handles: NativeHandles) {
        self.current = Some(handles);
    }

    fn poll_events(&mut self) {
        self.polls += 1;
    }

    fn should_close(&self, handles: NativeHandles) -> bool {
        let Some(window) = self.find(handles) else {
            return false;
        };
        self.close_after_by_title
            .get(&window.record.title)
            .copied()
            .or(self.close_after)
            .is_some_and(|limit| window.record.frames >= limit)
    }

    fn process_inputs(&mut self, handles: NativeHandles) {
        let Some(title) = self.find(handles).map(|w| w.record.title.clone()) else {
            return;
        };
        let Some(labels) = self.clicks.remove(&title) else {
            return;
        };
        if let Some(window) = self.find_mut(handles) {
            for label in labels {
                window.ui.click(label);
            }
        }
    }

    fn new_frame(&mut self, handles: NativeHandles) {
        if let Some(window) = self.find_mut(handles) {
            let (width, height) = window.record.size;
            window
                .ui
                .set_display_size(Vec2::new(width as f32, height as f32));
            window.ui.begin_frame();
        }
    }

    fn ui(&mut self, handles: NativeHandles) -> &mut dyn Ui {
        // Unknown handles draw into a scratch context.
        match self.windows.iter_mut().find(|w| w.record.handles == handles) {
            Some(window) => &mut window.ui,
            None => &mut self.scratch,
        }
    }

    fn window_size(&self, handles: NativeHandles) -> (i32, i32) {
        self.find(handles).map(|w| w.record.size).unwrap_or((0, 0))
    }

    fn set_window_size(&mut self, handles: NativeHandles, width: i32, height: i32) {
        if let Some(window) = self.find_mut(handles) {
            window.record.size = (width, height);
            window.record.resizes.push((width, height));
        }
    }

    fn window_pos(&self, handles: NativeHandles) -> Position {
        self.find(handles)
            .map(|w| w.record.position)
            .unwrap_or(Position::new(0, 0))
    }

    fn set_window_pos(&mut self, handles: NativeHandles, position: Position) {
        if let Some(window) = self.find_mut(handles) {
            window.record.position = position;
            window.record.moves.push(position);
        }
    }

    fn monitor_workarea(&self, monitor: MonitorPreference) -> Option<Rect> {
        match monitor {
            MonitorPreference::Active => self.active.or(self.primary),
            MonitorPreference::Primary | MonitorPreference::Unset => self.primary,
        }
    }

    fn present(&mut self, handles: NativeHandles) -> Result<(), ProviderError> {
        if self.current != Some(handles) {
            return Err(ProviderError::new(format!(
                "context of window {} is not current",
                handles.window
            )));
        }
        let window = self.find_mut(handles).ok_or_else(|| Self::unknown(handles))?;
        window.record.last_frame = window.ui.commands().to_vec();
        window.record.frames += 1;
        Ok(())
    }

    fn terminate(&mut self) {
        self.terminated = true;
    }
}
