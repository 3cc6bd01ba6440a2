//! Process-level lifecycle events shared by every front end.

use tracing::{error, info, warn};

use crate::errors::UxError;

pub fn log_shell_started() {
    info!(
        event = "core.shell.started",
        version = env!("CARGO_PKG_VERSION")
    );
}

pub fn log_shell_stopping() {
    info!(event = "core.shell.stopping");
}

/// Log an error that ended the run, at warn level for user-caused errors.
pub fn log_shell_failed(error: &dyn UxError) {
    if error.is_user_error() {
        warn!(
            event = "core.shell.failed",
            code = error.error_code(),
            error = %error,
        );
    } else {
        error!(
            event = "core.shell.failed",
            code = error.error_code(),
            error = %error,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ConfigError;

    #[test]
    fn test_shell_events() {
        log_shell_started();
        log_shell_stopping();

        log_shell_failed(&ConfigError::InvalidConfiguration {
            message: "refresh period is zero".to_string(),
        });
        log_shell_failed(&ConfigError::from(std::io::Error::other("disk gone")));
    }
}
