// Author: Dustin Pilgrim
// License: MIT

//! Pausable countdown timer.
//!
//! [`PausableTimer`] counts down a fixed duration and can be paused, resumed
//! and stopped. Every operation returns the relevant duration and whether the
//! transition happened, and stays correct when the caller races the timer's
//! own expiry.

pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod log;
pub mod utils;

pub use crate::core::{
    alarm::{Alarm, AlarmTrigger, ManualAlarm, SENTINEL, TokioAlarm},
    info::TimerInfo,
    state::TimerState,
    timer::{Pausable, PausableTimer},
};
