use std::fmt;

/// Lifecycle of a window controller.
///
/// `Queued -> Initializing -> Active -> Closing -> Destroyed`. A window whose
/// activation fails goes straight from `Initializing` to `Closing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControllerState {
    /// Registered with a lifecycle manager, no native resources yet.
    Queued,
    /// Native window exists; data is being seeded.
    Initializing,
    /// Drawn once per frame.
    Active,
    /// Close observed; scheduler stopped, native resources being released.
    Closing,
    /// Removed from the live set. Terminal.
    Destroyed,
}

impl ControllerState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ControllerState::Queued => "queued",
            ControllerState::Initializing => "initializing",
            ControllerState::Active => "active",
            ControllerState::Closing => "closing",
            ControllerState::Destroyed => "destroyed",
        }
    }

    pub fn can_transition_to(&self, next: ControllerState) -> bool {
        use ControllerState::*;
        matches!(
            (*self, next),
            (Queued, Initializing)
                | (Initializing, Active)
                | (Initializing, Closing)
                | (Active, Closing)
                | (Closing, Destroyed)
        )
    }
}

impl fmt::Display for ControllerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forward_path_is_allowed() {
        use ControllerState::*;
        let path = [Queued, Initializing, Active, Closing, Destroyed];
        for pair in path.windows(2) {
            assert!(pair[0].can_transition_to(pair[1]), "{} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_no_way_back() {
        use ControllerState::*;
        assert!(!Active.can_transition_to(Initializing));
        assert!(!Destroyed.can_transition_to(Queued));
        assert!(!Queued.can_transition_to(Active));
        assert!(!Active.can_transition_to(Active));
    }
}
