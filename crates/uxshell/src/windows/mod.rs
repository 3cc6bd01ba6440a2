//! Windows bundled with the CLI.

pub mod basic;
pub mod popup;
pub mod statusbar;
