use serde::{Deserialize, Serialize};

use crate::bounds::MIN_CEILING;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClockConfig {
    /// Where the cycle starts and where it loops back to, in minutes since midnight
    pub floor: f64,
    /// How far each tick advances, in minutes
    pub step: f64,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            // 7am
            floor: 7.0 * 60.0,
            step: 0.5,
        }
    }
}

/// The only mutable state in a replay: the current time, in minutes. Ticking loops from the
/// ceiling back to the floor forever. Seeking jumps anywhere, and it's up to the caller to stay
/// within `[floor, ceiling]`.
#[derive(Clone, Debug, PartialEq)]
pub struct Clock {
    time: f64,
    floor: f64,
    ceiling: f64,
    step: f64,
    running: bool,
}

impl Clock {
    /// Starts at the floor, stopped.
    pub fn new(config: &ClockConfig, ceiling: f64) -> Clock {
        let step = if config.step.is_finite() && config.step > 0.0 {
            config.step
        } else {
            warn!(
                "Clock step {} isn't positive, using the default {}",
                config.step,
                ClockConfig::default().step
            );
            ClockConfig::default().step
        };
        Clock {
            time: config.floor,
            floor: config.floor,
            ceiling: sane_ceiling(ceiling),
            step,
            running: false,
        }
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn floor(&self) -> f64 {
        self.floor
    }

    pub fn ceiling(&self) -> f64 {
        self.ceiling
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    /// Advances by one step. Going past the ceiling wraps to exactly the floor; the overflow is
    /// discarded.
    pub fn tick(&mut self) -> f64 {
        let next = self.time + self.step;
        self.time = if next > self.ceiling { self.floor } else { next };
        self.time
    }

    /// Jumps straight to a time, like from a slider. No wrapping or clamping happens here.
    pub fn seek(&mut self, time: f64) {
        self.time = time;
    }

    /// For when the datasets change. If the current time is now past the end, start over.
    pub fn set_ceiling(&mut self, ceiling: f64) {
        self.ceiling = sane_ceiling(ceiling);
        if self.time > self.ceiling {
            self.time = self.floor;
        }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    /// No more ticks happen from `frame` until `start` is called again.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Called once per scheduled frame. Only ticks while running, returning the new time.
    pub fn frame(&mut self) -> Option<f64> {
        if self.running {
            Some(self.tick())
        } else {
            None
        }
    }
}

fn sane_ceiling(ceiling: f64) -> f64 {
    if ceiling.is_finite() && ceiling > 0.0 {
        ceiling
    } else {
        MIN_CEILING
    }
}

/// Formats minutes since midnight as "HH:MM", rounding to the nearest minute and wrapping hours
/// past midnight.
pub fn format_clock(minutes: f64) -> String {
    let rounded = minutes.round().max(0.0) as u64;
    format!("{:02}:{:02}", (rounded / 60) % 24, rounded % 60)
}
