// Author: Dustin Pilgrim
// License: MIT

use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{Instant, sleep_until};

use super::Alarm;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Pending,
    Fired,
    Cancelled,
}

#[derive(Debug)]
struct Slot {
    // Bumped on every rearm/cancel so stale sleeper tasks can tell they lost.
    generation: u64,
    phase: Phase,
}

#[derive(Debug)]
struct Shared {
    slot: Mutex<Slot>,
    fired_tx: watch::Sender<bool>,
}

impl Shared {
    fn slot(&self) -> MutexGuard<'_, Slot> {
        self.slot.lock().unwrap_or_else(|e| e.into_inner())
    }

    // Only the sleeper task fires. Until it has run, the alarm is pending
    // even if its deadline is already behind us.
    fn fire(&self, slot: &mut Slot) {
        slot.phase = Phase::Fired;
        self.fired_tx.send_replace(true);
    }
}

/// Alarm backed by a tokio task sleeping until the deadline.
///
/// Expiry is published on a watch channel; see [`TokioAlarm::subscribe`].
/// Arming requires a running tokio runtime.
#[derive(Debug)]
pub struct TokioAlarm {
    shared: Arc<Shared>,
    task: Option<JoinHandle<()>>,
}

impl TokioAlarm {
    /// Receiver flipping to `true` when the current schedule fires.
    /// A rearm resets it to `false`.
    pub fn subscribe(&self) -> watch::Receiver<bool> {
        self.shared.fired_tx.subscribe()
    }

    /// Waits until the alarm fires. Never resolves for a cancelled alarm.
    pub async fn fired(&self) {
        let mut rx = self.subscribe();
        let _ = rx.wait_for(|fired| *fired).await;
    }

    pub fn is_pending(&self) -> bool {
        self.shared.slot().phase == Phase::Pending
    }

    fn spawn_sleeper(&mut self, generation: u64, deadline: Option<Instant>) {
        if let Some(task) = self.task.take() {
            task.abort();
        }

        // Out of Instant's range: never fires.
        let Some(deadline) = deadline else {
            return;
        };

        let shared = Arc::clone(&self.shared);
        self.task = Some(tokio::spawn(async move {
            sleep_until(deadline).await;

            let mut slot = shared.slot();
            if slot.generation == generation && slot.phase == Phase::Pending {
                shared.fire(&mut slot);
            }
        }));
    }
}

impl Alarm for TokioAlarm {
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    fn arm(duration: Duration) -> Self {
        let deadline = Instant::now().checked_add(duration);
        let (fired_tx, _) = watch::channel(false);

        let mut alarm = Self {
            shared: Arc::new(Shared {
                slot: Mutex::new(Slot {
                    generation: 0,
                    phase: Phase::Pending,
                }),
                fired_tx,
            }),
            task: None,
        };
        alarm.spawn_sleeper(0, deadline);
        alarm
    }

    fn rearm(&mut self, duration: Duration) -> bool {
        let deadline = Instant::now().checked_add(duration);

        let (was_pending, generation) = {
            let mut slot = self.shared.slot();
            let was_pending = slot.phase == Phase::Pending;
            slot.generation += 1;
            slot.phase = Phase::Pending;
            (was_pending, slot.generation)
        };

        self.shared.fired_tx.send_replace(false);
        self.spawn_sleeper(generation, deadline);
        was_pending
    }

    fn cancel(&mut self) -> bool {
        let was_pending = {
            let mut slot = self.shared.slot();
            let was_pending = slot.phase == Phase::Pending;
            slot.generation += 1;
            if was_pending {
                slot.phase = Phase::Cancelled;
            }
            was_pending
        };

        if let Some(task) = self.task.take() {
            task.abort();
        }
        was_pending
    }

    fn has_fired(&self) -> bool {
        self.shared.slot().phase == Phase::Fired
    }
}

impl Drop for TokioAlarm {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}
