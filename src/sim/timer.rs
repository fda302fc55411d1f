//! Level countdown driven by the simulation step
//!
//! The countdown is advanced by the owning level once per fixed step, so it
//! can never fire after its level is gone and never races the simulation.

use serde::{Deserialize, Serialize};

use crate::consts::TICKS_PER_SECOND;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CountdownState {
    Running,
    Paused,
    /// Terminal: expired or cancelled
    Stopped,
}

/// Result of advancing the countdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownStep {
    /// Nothing changed (paused, stopped, or mid-second)
    Idle,
    /// One second elapsed
    Second { time_left: u32 },
    /// The last second elapsed; reported exactly once
    Expired,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Countdown {
    time_left: u32,
    /// Steps accumulated toward the next second
    ticks: u32,
    state: CountdownState,
}

impl Countdown {
    pub fn new(seconds: u32) -> Self {
        Self {
            time_left: seconds,
            ticks: 0,
            state: CountdownState::Running,
        }
    }

    pub fn time_left(&self) -> u32 {
        self.time_left
    }

    pub fn minutes_left(&self) -> u32 {
        self.time_left / 60
    }

    pub fn seconds_left(&self) -> u32 {
        self.time_left % 60
    }

    pub fn state(&self) -> CountdownState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == CountdownState::Running
    }

    pub fn pause(&mut self) {
        if self.state == CountdownState::Running {
            self.state = CountdownState::Paused;
        }
    }

    pub fn resume(&mut self) {
        if self.state == CountdownState::Paused {
            self.state = CountdownState::Running;
        }
    }

    /// Stop for good. Returns false if it was already stopped.
    pub fn stop(&mut self) -> bool {
        let was_live = self.state != CountdownState::Stopped;
        self.state = CountdownState::Stopped;
        was_live
    }

    /// Advance by one simulation step
    pub fn advance(&mut self) -> CountdownStep {
        if self.state != CountdownState::Running {
            return CountdownStep::Idle;
        }
        self.ticks += 1;
        if self.ticks < TICKS_PER_SECOND {
            return CountdownStep::Idle;
        }
        self.ticks = 0;
        self.elapse_second()
    }

    /// One whole second elapsed
    pub fn elapse_second(&mut self) -> CountdownStep {
        if self.state != CountdownState::Running {
            return CountdownStep::Idle;
        }
        self.time_left = self.time_left.saturating_sub(1);
        if self.time_left == 0 {
            self.state = CountdownState::Stopped;
            CountdownStep::Expired
        } else {
            CountdownStep::Second {
                time_left: self.time_left,
            }
        }
    }
}
