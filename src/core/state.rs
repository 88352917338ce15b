// Author: Dustin Pilgrim
// License: MIT

use std::fmt;

use serde::Serialize;

/// Lifecycle of a pausable timer.
///
/// `Running -> {Paused, Stopped}`, `Paused -> {Running, Stopped}`.
/// `Stopped` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerState {
    Running,
    Paused,
    Stopped,
}

impl TimerState {
    pub fn is_running(self) -> bool {
        self == TimerState::Running
    }

    pub fn is_paused(self) -> bool {
        self == TimerState::Paused
    }

    pub fn is_stopped(self) -> bool {
        self == TimerState::Stopped
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimerState::Running => "running",
            TimerState::Paused => "paused",
            TimerState::Stopped => "stopped",
        }
    }
}

impl fmt::Display for TimerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_matches_json_names() {
        for state in [TimerState::Running, TimerState::Paused, TimerState::Stopped] {
            let json = serde_json::to_string(&state).unwrap();
            assert_eq!(json, format!("\"{state}\""));
        }
    }

    #[test]
    fn predicates() {
        assert!(TimerState::Running.is_running());
        assert!(TimerState::Paused.is_paused());
        assert!(TimerState::Stopped.is_stopped());
        assert!(!TimerState::Paused.is_stopped());
    }
}
