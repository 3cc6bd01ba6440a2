use crate::errors::UxError;

#[derive(Debug, thiserror::Error)]
pub enum ProcessError {
    #[error("Command is empty or invalid")]
    EmptyCommand,

    #[error("Failed to run '{command}': {message}")]
    SpawnFailed { command: String, message: String },
}

impl UxError for ProcessError {
    fn error_code(&self) -> &'static str {
        match self {
            ProcessError::EmptyCommand => "PROCESS_EMPTY_COMMAND",
            ProcessError::SpawnFailed { .. } => "PROCESS_SPAWN_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, ProcessError::EmptyCommand)
    }
}
