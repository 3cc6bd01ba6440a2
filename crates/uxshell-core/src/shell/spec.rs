use crate::shell::types::{
    DockDirection, MonitorPreference, NativeHandles, Position, Rect, Size,
};

pub const DEFAULT_TITLE: &str = "uxshell";
pub const DEFAULT_MIN_SIZE: Size = Size::new(100.0, 100.0);
pub const DEFAULT_MAX_SIZE: Size = Size::new(i32::MAX as f32, i32::MAX as f32);

/// Geometry and placement state of one shell window.
///
/// Mutated on the render thread only. `size` is rebuilt every frame from
/// `min_size` by the bounds-fitting accumulator in [`crate::shell::bounds`].
#[derive(Debug, Clone)]
pub struct WindowSpec {
    pub(crate) title: String,
    pub(crate) min_size: Size,
    pub(crate) max_size: Size,
    pub(crate) size: Size,
    pub(crate) native_size: Size,
    pub(crate) padding: Size,
    pub(crate) requested_position: Position,
    pub(crate) dock: DockDirection,
    pub(crate) monitor: MonitorPreference,
    pub(crate) is_statusbar: bool,
    pub(crate) native: Option<NativeHandles>,
}

impl Default for WindowSpec {
    fn default() -> Self {
        Self::new(DEFAULT_TITLE)
    }
}

impl WindowSpec {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            min_size: DEFAULT_MIN_SIZE,
            max_size: DEFAULT_MAX_SIZE,
            size: DEFAULT_MIN_SIZE,
            native_size: DEFAULT_MIN_SIZE,
            padding: Size::default(),
            requested_position: Position::UNSET,
            dock: DockDirection::NONE,
            monitor: MonitorPreference::Unset,
            is_statusbar: false,
            native: None,
        }
    }

    pub fn with_min_size(mut self, min_size: Size) -> Self {
        self.set_min_size(min_size);
        self.size = self.min_size;
        self.native_size = self.min_size;
        self
    }

    pub fn with_max_size(mut self, max_size: Size) -> Self {
        self.set_max_size(max_size);
        self
    }

    pub fn with_dock(mut self, dock: DockDirection) -> Self {
        self.dock = dock;
        self
    }

    pub fn with_monitor(mut self, monitor: MonitorPreference) -> Self {
        self.monitor = monitor;
        self
    }

    pub fn statusbar(mut self) -> Self {
        self.is_statusbar = true;
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn min_size(&self) -> Size {
        self.min_size
    }

    pub fn max_size(&self) -> Size {
        self.max_size
    }

    /// Content size accumulated so far this frame.
    pub fn size(&self) -> Size {
        self.size
    }

    /// Size the native window should have: content size plus padding.
    pub fn native_size(&self) -> Size {
        self.native_size
    }

    pub fn padding(&self) -> Size {
        self.padding
    }

    pub fn requested_position(&self) -> Position {
        self.requested_position
    }

    pub fn dock(&self) -> DockDirection {
        self.dock
    }

    pub fn monitor(&self) -> MonitorPreference {
        self.monitor
    }

    pub fn is_statusbar(&self) -> bool {
        self.is_statusbar
    }

    pub fn native(&self) -> Option<NativeHandles> {
        self.native
    }

    /// Bounds are kept in whole device units so clamped sizes stay integral.
    pub fn set_min_size(&mut self, min_size: Size) {
        self.min_size = min_size.trunc();
    }

    pub fn set_max_size(&mut self, max_size: Size) {
        self.max_size = max_size.trunc();
    }

    /// Ask the lifecycle manager to move the window this frame.
    /// Pass [`Position::KEEP`] for an axis that should not move.
    pub fn request_position(&mut self, position: Position) {
        self.requested_position = position;
    }

    pub(crate) fn attach_native(&mut self, handles: NativeHandles) {
        self.native = Some(handles);
    }

    pub(crate) fn detach_native(&mut self) -> Option<NativeHandles> {
        self.native.take()
    }

    /// Position for this window inside `workarea` according to its dock
    /// direction. Axes the dock direction says nothing about are left as
    /// [`Position::KEEP`].
    pub fn docked_position(&self, workarea: Rect) -> Position {
        let (width, height) = self.native_size.to_device();
        let mut position = Position::UNSET;

        if self.dock.contains(DockDirection::CENTER) {
            position.x = workarea.x + (workarea.width - width) / 2;
            position.y = workarea.y + (workarea.height - height) / 2;
        }
        if self.dock.contains(DockDirection::LEFT) {
            position.x = workarea.x;
        }
        if self.dock.contains(DockDirection::RIGHT) {
            position.x = workarea.x + workarea.width - width;
        }
        if self.dock.contains(DockDirection::TOP) {
            position.y = workarea.y;
        }
        if self.dock.contains(DockDirection::BOTTOM) {
            position.y = workarea.y + workarea.height - height;
        }

        position
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let spec = WindowSpec::default();
        assert_eq!(spec.title(), "uxshell");
        assert_eq!(spec.min_size(), Size::new(100.0, 100.0));
        assert_eq!(spec.size(), spec.min_size());
        assert!(spec.requested_position().is_unset());
        assert!(spec.native().is_none());
    }

    #[test]
    fn test_bounds_setters_truncate() {
        let spec = WindowSpec::new("t").with_min_size(Size::new(10.7, 20.2));
        assert_eq!(spec.min_size(), Size::new(10.0, 20.0));
    }

    #[test]
    fn test_docked_position_bottom() {
        let spec = WindowSpec::new("bar")
            .with_min_size(Size::new(1920.0, 32.0))
            .with_dock(DockDirection::BOTTOM);
        let position = spec.docked_position(Rect::new(0, 0, 1920, 1080));
        assert_eq!(position, Position::new(Position::KEEP, 1048));
    }

    #[test]
    fn test_docked_position_center() {
        let spec = WindowSpec::new("popup")
            .with_min_size(Size::new(200.0, 100.0))
            .with_dock(DockDirection::CENTER);
        let position = spec.docked_position(Rect::new(100, 0, 1000, 800));
        assert_eq!(position, Position::new(500, 350));
    }

    #[test]
    fn test_docked_position_none_keeps_both_axes() {
        let spec = WindowSpec::new("free");
        assert!(spec.docked_position(Rect::new(0, 0, 800, 600)).is_unset());
    }
}
