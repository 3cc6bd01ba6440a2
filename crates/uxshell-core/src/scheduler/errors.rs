use crate::errors::UxError;

#[derive(Debug, thiserror::Error)]
pub enum SchedulerError {
    #[error("Failed to build async runtime for '{window}': {message}")]
    RuntimeBuild { window: String, message: String },

    #[error("Failed to start data thread for '{window}': {message}")]
    ThreadSpawn { window: String, message: String },

    #[error("Data thread for '{window}' stopped before initial data was fetched")]
    SeedAborted { window: String },

    #[error("Data thread for '{window}' panicked")]
    JoinFailed { window: String },
}

impl UxError for SchedulerError {
    fn error_code(&self) -> &'static str {
        match self {
            SchedulerError::RuntimeBuild { .. } => "SCHEDULER_RUNTIME_BUILD_FAILED",
            SchedulerError::ThreadSpawn { .. } => "SCHEDULER_THREAD_SPAWN_FAILED",
            SchedulerError::SeedAborted { .. } => "SCHEDULER_SEED_ABORTED",
            SchedulerError::JoinFailed { .. } => "SCHEDULER_JOIN_FAILED",
        }
    }

    fn is_user_error(&self) -> bool {
        matches!(self, SchedulerError::SeedAborted { .. })
    }
}
