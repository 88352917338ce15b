// Author: Dustin Pilgrim
// License: MIT

pub mod manual;
pub mod runtime;

use std::time::Duration;

pub use self::manual::{AlarmTrigger, ManualAlarm};
pub use self::runtime::TokioAlarm;

/// Duration a paused timer parks its alarm at: 2^62 - 1 ns, roughly 146 years.
pub const SENTINEL: Duration = Duration::from_nanos((1u64 << 62) - 1);

/// A one-shot alarm that can be armed, rearmed and cancelled.
///
/// `rearm` and `cancel` report whether the previous schedule was still
/// pending. `false` means the alarm already fired and the caller lost the
/// race against expiry.
pub trait Alarm {
    /// Schedule a fire event `duration` from now.
    fn arm(duration: Duration) -> Self
    where
        Self: Sized;

    /// Replace the scheduled fire time with `duration` from now.
    fn rearm(&mut self, duration: Duration) -> bool;

    /// Cancel the alarm.
    fn cancel(&mut self) -> bool;

    /// Whether the alarm has fired since it was last (re)armed.
    fn has_fired(&self) -> bool;
}
