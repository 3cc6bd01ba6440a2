use crate::controller::ControllerError;
use crate::errors::UxError;

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("Could not create window '{title}': {message}")]
    WindowCreationFailed { title: String, message: String },

    #[error("Window provider failed for '{title}': {message}")]
    Provider { title: String, message: String },

    #[error("Window '{title}' failed: {source}")]
    Controller {
        title: String,
        #[source]
        source: ControllerError,
    },
}

impl UxError for BackendError {
    fn error_code(&self) -> &'static str {
        match self {
            BackendError::WindowCreationFailed { .. } => "WINDOW_CREATION_FAILED",
            BackendError::Provider { .. } => "WINDOW_PROVIDER_FAILED",
            BackendError::Controller { source, .. } => source.error_code(),
        }
    }

    fn is_user_error(&self) -> bool {
        match self {
            BackendError::Controller { source, .. } => source.is_user_error(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creation_failure_display() {
        let error = BackendError::WindowCreationFailed {
            title: "bottom bar".to_string(),
            message: "no display".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Could not create window 'bottom bar': no display"
        );
        assert_eq!(error.error_code(), "WINDOW_CREATION_FAILED");
        assert!(!error.is_user_error());
    }

    #[test]
    fn test_controller_error_code_passes_through() {
        let error = BackendError::Controller {
            title: "bar".to_string(),
            source: ControllerError::DataThreadVanished {
                title: "bar".to_string(),
            },
        };
        assert_eq!(error.error_code(), "DATA_THREAD_VANISHED");
        assert!(error.is_user_error());
        assert!(std::error::Error::source(&error).is_some());
    }
}
