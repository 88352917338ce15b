// Author: Dustin Pilgrim
// License: MIT

pub mod alarm;
pub mod error;
pub mod info;
pub mod state;
pub mod timer;
