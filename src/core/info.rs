// Author: Dustin Pilgrim
// License: MIT

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::{core::state::TimerState, utils::format_duration_readable};

/// Read-only snapshot of a timer for `status` output.
///
/// - the JSON form (`to_json`) is the stable machine contract.
/// - `Display` is the CLI-facing text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TimerInfo {
    pub state: TimerState,
    pub total_ms: u64,
    pub elapsed_ms: u64,
    pub remaining_ms: u64,
    pub expired: bool,
}

impl TimerInfo {
    pub fn new(state: TimerState, total: Duration, elapsed: Duration, expired: bool) -> Self {
        let elapsed = elapsed.min(total);
        Self {
            state,
            total_ms: as_millis(total),
            elapsed_ms: as_millis(elapsed),
            remaining_ms: as_millis(total - elapsed),
            expired,
        }
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|e| {
            serde_json::json!({ "error": e.to_string() }).to_string()
        })
    }
}

fn as_millis(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

impl fmt::Display for TimerInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} elapsed, {} remaining",
            self.state,
            format_duration_readable(Duration::from_millis(self.elapsed_ms)),
            format_duration_readable(Duration::from_millis(self.remaining_ms)),
        )?;
        if self.expired {
            write!(f, " (expired)")?;
        }
        Ok(())
    }
}
