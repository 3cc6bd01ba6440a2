//! Recording immediate-mode context with fixed glyph metrics.

use crate::render::{Ui, Vec2, WindowFlags};
use crate::style::Rgba;

pub const GLYPH_WIDTH: f32 = 7.0;
pub const LINE_HEIGHT: f32 = 13.0;
pub const ITEM_SPACING: Vec2 = Vec2::new(8.0, 4.0);
pub const WINDOW_PADDING: Vec2 = Vec2::new(8.0, 8.0);
pub const FRAME_PADDING: Vec2 = Vec2::new(4.0, 3.0);

/// One recorded draw primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    BeginWindow {
        title: String,
        pos: Vec2,
        size: Vec2,
        flags: WindowFlags,
    },
    Text {
        pos: Vec2,
        text: String,
        color: Option<Rgba>,
    },
    Button {
        pos: Vec2,
        label: String,
    },
}

#[derive(Debug, Clone, Copy)]
struct Columns {
    count: usize,
    current: usize,
    width: f32,
    start_y: f32,
    max_y: f32,
}

/// [`Ui`] implementation that lays items out like a typical immediate-mode
/// library and records what was drawn.
///
/// Every item starts a new line unless [`Ui::same_line`] is called after it.
/// Text is `GLYPH_WIDTH` per character and `LINE_HEIGHT` tall.
#[derive(Debug, Clone)]
pub struct HeadlessUi {
    display_size: Vec2,
    window_size: Vec2,
    cursor: Vec2,
    line_start_x: f32,
    line_bottom: f32,
    last_item: Option<(Vec2, Vec2)>,
    same_line_pending: bool,
    next_window_pos: Option<Vec2>,
    next_window_size: Option<Vec2>,
    columns: Option<Columns>,
    commands: Vec<DrawCommand>,
    pending_clicks: Vec<String>,
}

impl Default for HeadlessUi {
    fn default() -> Self {
        Self::new(Vec2::new(800.0, 600.0))
    }
}

impl HeadlessUi {
    pub fn new(display_size: Vec2) -> Self {
        let mut ui = Self {
            display_size,
            window_size: display_size,
            cursor: WINDOW_PADDING,
            line_start_x: WINDOW_PADDING.x,
            line_bottom: WINDOW_PADDING.y,
            last_item: None,
            same_line_pending: false,
            next_window_pos: None,
            next_window_size: None,
            columns: None,
            commands: Vec::new(),
            pending_clicks: Vec::new(),
        };
        ui.begin_frame();
        ui
    }

    pub fn set_display_size(&mut self, display_size: Vec2) {
        self.display_size = display_size;
    }

    /// Forget the previous frame's commands and layout state.
    pub fn begin_frame(&mut self) {
        self.window_size = self.display_size;
        self.reset_layout();
        self.next_window_pos = None;
        self.next_window_size = None;
        self.commands.clear();
    }

    fn reset_layout(&mut self) {
        self.cursor = WINDOW_PADDING;
        self.line_start_x = WINDOW_PADDING.x;
        self.line_bottom = WINDOW_PADDING.y;
        self.last_item = None;
        self.same_line_pending = false;
        self.columns = None;
    }

    /// Make the next button with this label report a click.
    pub fn click(&mut self, label: impl Into<String>) {
        self.pending_clicks.push(label.into());
    }

    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Size of the current immediate-mode window.
    pub fn window_size(&self) -> Vec2 {
        self.window_size
    }

    /// The current frame as plain text; see [`render_text`].
    pub fn frame_text(&self) -> String {
        render_text(&self.commands)
    }

    fn place_item(&mut self, size: Vec2) -> Vec2 {
        let pos = self.cursor;
        let bottom = pos.y + size.y;
        self.line_bottom = if self.same_line_pending {
            self.line_bottom.max(bottom)
        } else {
            bottom
        };
        self.last_item = Some((pos, size));
        self.same_line_pending = false;
        self.cursor = Vec2::new(self.line_start_x, self.line_bottom + ITEM_SPACING.y);
        pos
    }
}

impl Ui for HeadlessUi {
    fn cursor_pos(&self) -> Vec2 {
        self.cursor
    }

    fn set_cursor_pos(&mut self, pos: Vec2) {
        self.cursor = pos;
        self.same_line_pending = false;
    }

    fn same_line(&mut self) {
        if let Some((pos, size)) = self.last_item {
            self.cursor = Vec2::new(pos.x + size.x + ITEM_SPACING.x, pos.y);
            self.same_line_pending = true;
        }
    }

    fn new_line(&mut self) {
        let y = if self.same_line_pending {
            self.line_bottom + ITEM_SPACING.y
        } else {
            self.cursor.y + LINE_HEIGHT + ITEM_SPACING.y
        };
        self.cursor = Vec2::new(self.line_start_x, y);
        self.line_bottom = y - ITEM_SPACING.y;
        self.same_line_pending = false;
    }

    fn window_padding(&self) -> Vec2 {
        WINDOW_PADDING
    }

    fn text(&mut self, text: &str) {
        let pos = self.place_item(self.calc_text_size(text));
        self.commands.push(DrawCommand::Text {
            pos,
            text: text.to_string(),
            color: None,
        });
    }

    fn text_colored(&mut self, text: &str, color: Rgba) {
        let pos = self.place_item(self.calc_text_size(text));
        self.commands.push(DrawCommand::Text {
            pos,
            text: text.to_string(),
            color: Some(color),
        });
    }

    fn button(&mut self, label: &str) -> bool {
        let text = self.calc_text_size(label);
        let size = Vec2::new(
            text.x + FRAME_PADDING.x * 2.0,
            text.y + FRAME_PADDING.y * 2.0,
        );
        let pos = self.place_item(size);
        self.commands.push(DrawCommand::Button {
            pos,
            label: label.to_string(),
        });

        match self.pending_clicks.iter().position(|l| l == label) {
            Some(index) => {
                self.pending_clicks.remove(index);
                true
            }
            None => false,
        }
    }

    fn calc_text_size(&self, text: &str) -> Vec2 {
        Vec2::new(text.chars().count() as f32 * GLYPH_WIDTH, LINE_HEIGHT)
    }

    fn set_next_window_pos(&mut self, pos: Vec2) {
        self.next_window_pos = Some(pos);
    }

    fn set_next_window_size(&mut self, size: Vec2) {
        self.next_window_size = Some(size);
    }

    fn begin_window(&mut self, title: &str, flags: WindowFlags) -> bool {
        let pos = self.next_window_pos.take().unwrap_or(Vec2::ZERO);
        let size = self.next_window_size.take().unwrap_or(self.display_size);
        self.window_size = size;
        self.reset_layout();
        self.commands.push(DrawCommand::BeginWindow {
            title: title.to_string(),
            pos,
            size,
            flags,
        });
        true
    }

    fn end_window(&mut self) {
        self.columns = None;
    }

    fn set_window_size(&mut self, size: Vec2) {
        self.window_size = size;
    }

    fn columns(&mut self, count: usize, _id: &str) {
        if count <= 1 {
            if let Some(columns) = self.columns.take() {
                let y = columns.max_y.max(self.cursor.y);
                self.cursor = Vec2::new(WINDOW_PADDING.x, y);
                self.line_start_x = WINDOW_PADDING.x;
            }
            return;
        }

        let content_width = self.window_size.x - WINDOW_PADDING.x * 2.0;
        self.columns = Some(Columns {
            count,
            current: 0,
            width: content_width / count as f32,
            start_y: self.cursor.y,
            max_y: self.cursor.y,
        });
        self.line_start_x = WINDOW_PADDING.x;
        self.same_line_pending = false;
    }

    fn next_column(&mut self) {
        let Some(columns) = self.columns.as_mut() else {
            return;
        };

        columns.max_y = columns.max_y.max(self.cursor.y);
        columns.current = (columns.current + 1) % columns.count;
        if columns.current == 0 {
            columns.start_y = columns.max_y;
        }

        let x = WINDOW_PADDING.x + columns.current as f32 * columns.width;
        self.cursor = Vec2::new(x, columns.start_y);
        self.line_start_x = x;
        self.last_item = None;
        self.same_line_pending = false;
    }

    fn column_width(&self) -> f32 {
        match self.columns {
            Some(columns) => columns.width,
            None => self.window_size.x - WINDOW_PADDING.x * 2.0,
        }
    }
}

/// Text and buttons as lines of plain text, top to bottom and left to right.
/// Buttons render as `[label]`.
pub fn render_text(commands: &[DrawCommand]) -> String {
    let mut items: Vec<(i32, f32, String)> = commands
        .iter()
        .filter_map(|command| match command {
            DrawCommand::Text { pos, text, .. } => Some((pos.y as i32, pos.x, text.clone())),
            DrawCommand::Button { pos, label } => {
                Some((pos.y as i32, pos.x, format!("[{}]", label)))
            }
            DrawCommand::BeginWindow { .. } => None,
        })
        .collect();
    items.sort_by(|a, b| a.0.cmp(&b.0).then(a.1.total_cmp(&b.1)));

    let mut lines: Vec<(i32, Vec<String>)> = Vec::new();
    for (y, _, text) in items {
        match lines.last_mut() {
            Some((line_y, parts)) if *line_y == y => parts.push(text),
            _ => lines.push((y, vec![text])),
        }
    }

    lines
        .into_iter()
        .map(|(_, parts)| parts.join("  "))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_items_stack_vertically() {
        let mut ui = HeadlessUi::default();
        ui.text("one");
        ui.text("two");
        assert_eq!(ui.cursor_pos(), Vec2::new(8.0, 8.0 + 2.0 * (13.0 + 4.0)));
        assert_eq!(ui.frame_text(), "one\ntwo");
    }

    #[test]
    fn test_same_line_then_new_line() {
        let mut ui = HeadlessUi::default();
        ui.text("abc");
        ui.same_line();
        assert_eq!(ui.cursor_pos(), Vec2::new(8.0 + 21.0 + 8.0, 8.0));

        ui.new_line();
        assert_eq!(ui.cursor_pos(), Vec2::new(8.0, 8.0 + 13.0 + 4.0));
    }

    #[test]
    fn test_new_line_without_same_line_adds_blank_line() {
        let mut ui = HeadlessUi::default();
        ui.text("abc");
        let before = ui.cursor_pos();
        ui.new_line();
        assert_eq!(ui.cursor_pos().y, before.y + 13.0 + 4.0);
    }

    #[test]
    fn test_button_click_is_consumed() {
        let mut ui = HeadlessUi::default();
        ui.click("Charm");
        assert!(ui.button("Charm"));
        assert!(!ui.button("Charm"));
        assert!(!ui.button("Other"));
        assert!(ui.frame_text().starts_with("[Charm]"));
    }

    #[test]
    fn test_columns_share_a_row() {
        let mut ui = HeadlessUi::new(Vec2::new(316.0, 32.0));
        ui.begin_window("bar", WindowFlags::shell());
        ui.columns(3, "bar");
        assert_eq!(ui.column_width(), 100.0);
        ui.text("left");
        ui.next_column();
        assert_eq!(ui.cursor_pos(), Vec2::new(108.0, 8.0));
        ui.text("middle");
        ui.next_column();
        ui.text("right");
        ui.columns(1, "bar");

        assert_eq!(ui.frame_text(), "left  middle  right");
    }

    #[test]
    fn test_begin_frame_clears_commands() {
        let mut ui = HeadlessUi::default();
        ui.text("stale");
        ui.begin_frame();
        assert!(ui.commands().is_empty());
        assert_eq!(ui.cursor_pos(), WINDOW_PADDING);
    }
}
