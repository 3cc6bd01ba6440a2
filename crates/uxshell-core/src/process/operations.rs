use tracing::debug;

use crate::process::errors::ProcessError;
use crate::process::types::{CommandOutput, CommandSpec};

/// Run a command to completion on the calling thread, capturing its output.
pub fn run(spec: &CommandSpec) -> Result<CommandOutput, ProcessError> {
    let (program, args) = spec.program_and_args().ok_or(ProcessError::EmptyCommand)?;

    let output = std::process::Command::new(&program)
        .args(&args)
        .output()
        .map_err(|e| ProcessError::SpawnFailed {
            command: spec.to_string(),
            message: e.to_string(),
        })?;

    let output = CommandOutput::from(output);
    debug!(
        event = "core.process.run_completed",
        command = %spec,
        code = ?output.code
    );
    Ok(output)
}

/// Run a command without blocking the async runtime it is awaited on.
///
/// The child is killed if the returned future is dropped, so a timed-out or
/// cancelled fetcher does not leave the process behind.
pub async fn run_async(spec: &CommandSpec) -> Result<CommandOutput, ProcessError> {
    let (program, args) = spec.program_and_args().ok_or(ProcessError::EmptyCommand)?;

    let output = tokio::process::Command::new(&program)
        .args(&args)
        .kill_on_drop(true)
        .output()
        .await
        .map_err(|e| ProcessError::SpawnFailed {
            command: spec.to_string(),
            message: e.to_string(),
        })?;

    let output = CommandOutput::from(output);
    debug!(
        event = "core.process.run_async_completed",
        command = %spec,
        code = ?output.code
    );
    Ok(output)
}

/// Check whether `program` can be found in PATH.
pub fn is_command_available(program: &str) -> bool {
    which::which(program).is_ok()
}
