//! Bounds-fitting accumulator.
//!
//! Window content is drawn by independent pieces of code that do not know the
//! final window size. Each piece reports where the drawing cursor ended up and
//! the window grows to the largest reported extent, clamped to
//! `[min_size, max_size]`. Growth is monotonic within a frame; only
//! [`WindowSpec::reset_for_frame`] shrinks the size back to `min_size`.

use crate::render::Ui;
use crate::shell::spec::WindowSpec;
use crate::shell::types::{Position, Size};

impl WindowSpec {
    /// Start a new frame: size back to `min_size`, no position request,
    /// padding taken from the active theme.
    pub fn reset_for_frame(&mut self, ui: &dyn Ui) {
        self.size = self.min_size;
        self.requested_position = Position::UNSET;
        let padding = ui.window_padding();
        self.padding = Size::new(padding.x.trunc(), padding.y.trunc());
    }

    /// Report the end of a horizontal run as a width candidate, then break
    /// the line.
    pub fn propose_width(&mut self, ui: &mut dyn Ui) {
        ui.same_line();
        let current = ui.cursor_pos().x;
        if current > self.size.width {
            self.size.width = current;
        }

        ui.new_line();
        self.apply_bounds();
    }

    /// Report the cursor's vertical offset as a height candidate.
    pub fn propose_height(&mut self, ui: &dyn Ui) {
        let current = ui.cursor_pos().y;
        if current > self.size.height {
            self.size.height = current;
        }

        self.apply_bounds();
    }

    /// Clamp `size` into `[min_size, max_size]`, round to device units and
    /// derive `native_size`. Idempotent.
    pub fn apply_bounds(&mut self) {
        self.size = self.size.clamp(self.min_size, self.max_size).trunc();
        // Padding is added once; the cursor already includes the leading edge.
        self.native_size = self.size + self.padding;
    }
}
