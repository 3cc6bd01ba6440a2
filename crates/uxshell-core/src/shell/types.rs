use bitflags::bitflags;
use serde::{Deserialize, Serialize};

/// Width and height in device units.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Component-wise clamp into `[min, max]`.
    pub fn clamp(self, min: Size, max: Size) -> Size {
        Size {
            width: self.width.max(min.width).min(max.width),
            height: self.height.max(min.height).min(max.height),
        }
    }

    /// Drop the fractional part of both components.
    pub fn trunc(self) -> Size {
        Size {
            width: self.width.trunc(),
            height: self.height.trunc(),
        }
    }

    /// Size as whole device units, the form native windows are sized in.
    pub fn to_device(self) -> (i32, i32) {
        (self.width as i32, self.height as i32)
    }
}

impl std::ops::Add for Size {
    type Output = Size;

    fn add(self, rhs: Size) -> Size {
        Size::new(self.width + rhs.width, self.height + rhs.height)
    }
}

/// Requested screen position. An axis set to [`Position::KEEP`] leaves that
/// axis where the native window currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const KEEP: i32 = -1;
    pub const UNSET: Position = Position {
        x: Self::KEEP,
        y: Self::KEEP,
    };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn is_unset(&self) -> bool {
        *self == Self::UNSET
    }

    /// Resolve each axis against the window's current position.
    pub fn resolve(&self, current: Position) -> Position {
        Position {
            x: if self.x == Self::KEEP { current.x } else { self.x },
            y: if self.y == Self::KEEP { current.y } else { self.y },
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::UNSET
    }
}

/// A screen area such as a monitor's work area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }
}

bitflags! {
    /// Edges (or the center) of a monitor a window is docked to.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct DockDirection: u8 {
        const NONE = 0;
        const LEFT = 1 << 0;
        const RIGHT = 1 << 1;
        const TOP = 1 << 2;
        const BOTTOM = 1 << 3;
        const CENTER = 1 << 4;
    }
}

/// Which monitor a new window should appear on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MonitorPreference {
    #[default]
    Unset,
    Primary,
    Active,
}

/// Opaque native identifiers owned by the lifecycle manager.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NativeHandles {
    pub window: u64,
    pub context: u64,
    pub renderer: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_resolve_per_axis() {
        let current = Position::new(10, 20);
        assert_eq!(Position::new(-1, 50).resolve(current), Position::new(10, 50));
        assert_eq!(Position::new(5, -1).resolve(current), Position::new(5, 20));
        assert_eq!(Position::UNSET.resolve(current), current);
    }

    #[test]
    fn test_dock_direction_combines() {
        let dock = DockDirection::BOTTOM | DockDirection::LEFT;
        assert!(dock.contains(DockDirection::BOTTOM));
        assert!(dock.contains(DockDirection::LEFT));
        assert!(!dock.contains(DockDirection::CENTER));
        assert!(DockDirection::default().is_empty());
    }

    #[test]
    fn test_size_clamp() {
        let min = Size::new(10.0, 10.0);
        let max = Size::new(200.0, 200.0);
        assert_eq!(Size::new(5.0, 300.0).clamp(min, max), Size::new(10.0, 200.0));
    }
}
