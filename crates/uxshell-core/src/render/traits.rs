//! Immediate-mode drawing library boundary.

use crate::render::types::{Vec2, WindowFlags};
use crate::style::Rgba;

/// The subset of an immediate-mode widget library that window content and
/// the bounds-fitting accumulator rely on.
///
/// Cursor positions are window-relative and include the window padding.
/// Every widget call advances the cursor to the start of the next line
/// unless [`Ui::same_line`] is called afterwards.
pub trait Ui {
    fn cursor_pos(&self) -> Vec2;

    fn set_cursor_pos(&mut self, pos: Vec2);

    /// Place the next item to the right of the previous one.
    fn same_line(&mut self);

    /// Finish a `same_line` run, or emit an empty line.
    fn new_line(&mut self);

    /// Window padding of the active theme.
    fn window_padding(&self) -> Vec2;

    fn text(&mut self, text: &str);

    fn text_colored(&mut self, text: &str, color: Rgba);

    /// Returns true when the button was clicked this frame.
    fn button(&mut self, label: &str) -> bool;

    fn calc_text_size(&self, text: &str) -> Vec2;

    fn set_next_window_pos(&mut self, pos: Vec2);

    fn set_next_window_size(&mut self, size: Vec2);

    fn begin_window(&mut self, title: &str, flags: WindowFlags) -> bool;

    fn end_window(&mut self);

    fn set_window_size(&mut self, size: Vec2);

    /// Split the current window into `count` columns; `count == 1` ends columns.
    fn columns(&mut self, count: usize, id: &str);

    fn next_column(&mut self);

    fn column_width(&self) -> f32;
}
