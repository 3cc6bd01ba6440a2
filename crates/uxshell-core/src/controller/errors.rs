use crate::controller::types::ControllerState;
use crate::errors::UxError;
use crate::scheduler::SchedulerError;

#[derive(Debug, thiserror::Error)]
pub enum ControllerError {
    #[error("Data thread for '{title}' unexpectedly vanished")]
    DataThreadVanished { title: String },

    #[error("Window '{title}' cannot go from {from} to {to}")]
    InvalidTransition {
        title: String,
        from: ControllerState,
        to: ControllerState,
    },

    #[error("Scheduler error: {0}")]
    Scheduler(#[from] SchedulerError),
}

impl UxError for ControllerError {
    fn error_code(&self) -> &'static str {
        match self {
            ControllerError::DataThreadVanished { .. } => "DATA_THREAD_VANISHED",
            ControllerError::InvalidTransition { .. } => "INVALID_CONTROLLER_TRANSITION",
            ControllerError::Scheduler(inner) => inner.error_code(),
        }
    }

    /// A fetcher the application registered panicked.
    fn is_user_error(&self) -> bool {
        match self {
            ControllerError::DataThreadVanished { .. } => true,
            ControllerError::InvalidTransition { .. } => false,
            ControllerError::Scheduler(inner) => inner.is_user_error(),
        }
    }
}
