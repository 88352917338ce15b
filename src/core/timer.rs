// Author: Dustin Pilgrim
// License: MIT

use std::time::Duration;

use tokio::time::Instant;

use crate::{
    core::{
        alarm::{Alarm, SENTINEL, TokioAlarm},
        info::TimerInfo,
        state::TimerState,
    },
    sdebug,
    sinfo,
    utils::format_duration_readable,
};

/// A countdown that can be paused, resumed and stopped.
///
/// Each call returns a duration and whether the requested transition
/// actually happened. A `false` is an ordinary outcome: pausing an already
/// paused timer, or losing the race against the timer's own expiry.
pub trait Pausable {
    /// Returns the elapsed duration.
    fn pause(&mut self) -> (Duration, bool);

    /// Returns the remaining duration.
    fn resume(&mut self) -> (Duration, bool);

    /// Returns the elapsed duration.
    fn stop(&mut self) -> (Duration, bool);
}

/// Countdown timer with pause/resume/stop built over a one-shot [`Alarm`].
///
/// While paused the alarm is parked at [`SENTINEL`] instead of being torn
/// down. Races against expiry are resolved by the alarm's pending-vs-fired
/// report: whichever side observes the fire first wins, and a lost race
/// leaves the timer `Stopped` with the full duration elapsed.
///
/// Not internally synchronized; wrap it in a mutex to share it.
#[derive(Debug)]
pub struct PausableTimer<A: Alarm = TokioAlarm> {
    alarm: A,
    // Start of the current running segment; only meaningful while Running.
    start_time: Instant,
    // Sum of completed running segments, never above `total`.
    elapsed: Duration,
    total: Duration,
    state: TimerState,
}

impl PausableTimer<TokioAlarm> {
    /// Starts a countdown backed by a [`TokioAlarm`].
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn new(total: Duration) -> Self {
        Self::with_alarm(total)
    }
}

impl<A: Alarm> PausableTimer<A> {
    /// Starts a countdown backed by any alarm implementation.
    pub fn with_alarm(total: Duration) -> Self {
        let alarm = A::arm(total);
        sdebug!("Timer", "started for {}", format_duration_readable(total));

        Self {
            alarm,
            start_time: Instant::now(),
            elapsed: Duration::ZERO,
            total,
            state: TimerState::Running,
        }
    }

    pub fn pause(&mut self) -> (Duration, bool) {
        let now = Instant::now();

        match self.state {
            TimerState::Running => {
                if self.alarm.rearm(SENTINEL) {
                    self.commit_segment(now);
                    self.state = TimerState::Paused;
                    sdebug!("Timer", "paused after {}", format_duration_readable(self.elapsed));
                    (self.elapsed, true)
                } else {
                    sinfo!("Timer", "pause lost the race against expiry");
                    self.expire();
                    (self.total, false)
                }
            }
            TimerState::Paused => (self.elapsed, false),
            TimerState::Stopped => (self.total, false),
        }
    }

    pub fn resume(&mut self) -> (Duration, bool) {
        let now = Instant::now();

        match self.state {
            TimerState::Paused => {
                let remaining = self.total.saturating_sub(self.elapsed);

                if !self.alarm.rearm(remaining) {
                    // The sentinel alarm was consumed; replace it.
                    sdebug!("Timer", "paused alarm already consumed, arming a fresh one");
                    self.alarm.cancel();
                    self.alarm = A::arm(remaining);
                }

                self.start_time = Instant::now();
                self.state = TimerState::Running;
                sdebug!("Timer", "resumed with {} remaining", format_duration_readable(remaining));
                (remaining, true)
            }
            TimerState::Running => {
                let ran = now.saturating_duration_since(self.start_time);
                let budget = self.total.saturating_sub(self.elapsed);

                // Expired but nobody has observed it yet.
                if ran > budget || self.alarm.has_fired() {
                    sinfo!("Timer", "resume found the timer already expired");
                    self.expire();
                    return (Duration::ZERO, false);
                }

                (budget - ran, false)
            }
            TimerState::Stopped => (self.total.saturating_sub(self.elapsed), false),
        }
    }

    pub fn stop(&mut self) -> (Duration, bool) {
        let now = Instant::now();

        match self.state {
            TimerState::Running => {
                if self.alarm.cancel() {
                    self.commit_segment(now);
                    self.state = TimerState::Stopped;
                    sdebug!("Timer", "stopped after {}", format_duration_readable(self.elapsed));
                    (self.elapsed, true)
                } else {
                    sinfo!("Timer", "stop lost the race against expiry");
                    self.expire();
                    (self.total, false)
                }
            }
            TimerState::Paused => {
                // The sentinel is ~146 years out; cancelling cannot lose.
                self.alarm.cancel();
                self.state = TimerState::Stopped;
                sdebug!(
                    "Timer",
                    "stopped while paused after {}",
                    format_duration_readable(self.elapsed)
                );
                (self.elapsed, true)
            }
            TimerState::Stopped => (self.elapsed, false),
        }
    }

    // ---------------- queries ----------------

    pub fn state(&self) -> TimerState {
        self.state
    }

    pub fn total(&self) -> Duration {
        self.total
    }

    /// Elapsed time including the live segment while running.
    pub fn elapsed(&self) -> Duration {
        match self.state {
            TimerState::Running => self
                .elapsed
                .saturating_add(self.start_time.elapsed())
                .min(self.total),
            TimerState::Paused | TimerState::Stopped => self.elapsed,
        }
    }

    pub fn remaining(&self) -> Duration {
        self.total.saturating_sub(self.elapsed())
    }

    /// Whether the countdown has run out, including an expiry the alarm has
    /// observed but no transition has settled yet.
    pub fn is_expired(&self) -> bool {
        match self.state {
            TimerState::Running => self.alarm.has_fired(),
            TimerState::Paused => false,
            TimerState::Stopped => self.elapsed == self.total,
        }
    }

    pub fn info(&self) -> TimerInfo {
        TimerInfo::new(self.state, self.total, self.elapsed(), self.is_expired())
    }

    pub fn alarm(&self) -> &A {
        &self.alarm
    }

    // ---------------- helpers ----------------

    fn commit_segment(&mut self, now: Instant) {
        let segment = now.saturating_duration_since(self.start_time);
        self.elapsed = self.elapsed.saturating_add(segment).min(self.total);
    }

    /// Settles a lost race: the countdown ran to completion.
    fn expire(&mut self) {
        self.alarm.cancel();
        self.elapsed = self.total;
        self.state = TimerState::Stopped;
    }
}

impl<A: Alarm> Pausable for PausableTimer<A> {
    fn pause(&mut self) -> (Duration, bool) {
        PausableTimer::pause(self)
    }

    fn resume(&mut self) -> (Duration, bool) {
        PausableTimer::resume(self)
    }

    fn stop(&mut self) -> (Duration, bool) {
        PausableTimer::stop(self)
    }
}
