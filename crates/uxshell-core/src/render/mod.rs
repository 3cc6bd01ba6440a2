pub mod traits;
pub mod types;

pub use traits::Ui;
pub use types::{Vec2, WindowFlags};
