use bitflags::bitflags;

/// A 2D point or extent in the immediate-mode library's coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

bitflags! {
    /// Behaviour flags for an immediate-mode window.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct WindowFlags: u32 {
        const NO_TITLE_BAR = 1 << 0;
        const NO_RESIZE = 1 << 1;
        const NO_MOVE = 1 << 2;
        const NO_SCROLLBAR = 1 << 3;
        const NO_SAVED_SETTINGS = 1 << 4;
    }
}

impl WindowFlags {
    /// Chrome-less, fixed window filling its native surface.
    pub fn shell() -> Self {
        WindowFlags::NO_SAVED_SETTINGS
            | WindowFlags::NO_MOVE
            | WindowFlags::NO_RESIZE
            | WindowFlags::NO_TITLE_BAR
            | WindowFlags::NO_SCROLLBAR
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shell_flags() {
        let flags = WindowFlags::shell();
        assert!(flags.contains(WindowFlags::NO_TITLE_BAR | WindowFlags::NO_MOVE));
        assert_eq!(flags, WindowFlags::all());
    }
}
