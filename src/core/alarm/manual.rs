// Author: Dustin Pilgrim
// License: MIT

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use super::Alarm;

#[derive(Debug, Default)]
struct ManualSlot {
    armed_for: Option<Duration>,
    pending: bool,
    fired: bool,
    rearms: u32,
}

/// Alarm that only fires when told to through its [`AlarmTrigger`].
///
/// Lets tests drive the expiry race deterministically.
#[derive(Debug)]
pub struct ManualAlarm {
    slot: Arc<Mutex<ManualSlot>>,
}

/// Handle firing a [`ManualAlarm`] from outside the owning timer.
#[derive(Debug, Clone)]
pub struct AlarmTrigger {
    slot: Arc<Mutex<ManualSlot>>,
}

fn lock(slot: &Mutex<ManualSlot>) -> MutexGuard<'_, ManualSlot> {
    slot.lock().unwrap_or_else(|e| e.into_inner())
}

impl ManualAlarm {
    pub fn trigger(&self) -> AlarmTrigger {
        AlarmTrigger {
            slot: Arc::clone(&self.slot),
        }
    }

    /// Duration of the current schedule, `None` once cancelled.
    pub fn armed_for(&self) -> Option<Duration> {
        lock(&self.slot).armed_for
    }

    pub fn is_pending(&self) -> bool {
        lock(&self.slot).pending
    }

    pub fn rearm_count(&self) -> u32 {
        lock(&self.slot).rearms
    }
}

impl AlarmTrigger {
    /// Fires the alarm. Returns `false` if it was not pending.
    pub fn fire(&self) -> bool {
        let mut slot = lock(&self.slot);
        if !slot.pending {
            return false;
        }
        slot.pending = false;
        slot.fired = true;
        true
    }
}

impl Alarm for ManualAlarm {
    fn arm(duration: Duration) -> Self {
        Self {
            slot: Arc::new(Mutex::new(ManualSlot {
                armed_for: Some(duration),
                pending: true,
                ..ManualSlot::default()
            })),
        }
    }

    fn rearm(&mut self, duration: Duration) -> bool {
        let mut slot = lock(&self.slot);
        let was_pending = slot.pending;
        slot.armed_for = Some(duration);
        slot.pending = true;
        slot.fired = false;
        slot.rearms += 1;
        was_pending
    }

    fn cancel(&mut self) -> bool {
        let mut slot = lock(&self.slot);
        let was_pending = slot.pending;
        slot.armed_for = None;
        slot.pending = false;
        was_pending
    }

    fn has_fired(&self) -> bool {
        lock(&self.slot).fired
    }
}
