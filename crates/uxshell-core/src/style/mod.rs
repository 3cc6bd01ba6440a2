pub mod color;

pub use color::{ColorError, Rgba, parse_hex_color};
