pub mod errors;
pub mod operations;
pub mod types;

pub use errors::ProcessError;
pub use operations::{is_command_available, run, run_async};
pub use types::{CommandOutput, CommandSpec};
