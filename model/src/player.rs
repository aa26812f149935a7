use std::time::{Duration, Instant};

use crate::clock::{format_clock, Clock};
use crate::scene::{Scene, SceneConfig};
use crate::Model;

/// Drives a `Clock` on a fixed schedule, one frame per wakeup, all on the calling thread. Every
/// frame ticks the clock and then projects a fresh scene, so a projection always finishes before
/// the next tick begins.
pub struct Player {
    clock: Clock,
    scene_config: SceneConfig,
    frame_interval: Duration,
    max_frames: Option<usize>,
}

impl Player {
    pub fn new(clock: Clock, scene_config: SceneConfig, frame_interval: Duration) -> Player {
        Player {
            clock,
            scene_config,
            frame_interval,
            max_frames: None,
        }
    }

    /// Stop by itself after this many frames
    pub fn with_frame_limit(mut self, frames: usize) -> Player {
        self.max_frames = Some(frames);
        self
    }

    pub fn clock(&self) -> &Clock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    /// Starts the clock and runs frames until the callback stops the clock or the frame limit is
    /// hit. The callback gets every scene and may seek or stop the clock; stopping only prevents
    /// future ticks. Returns the number of frames run.
    pub fn run<F: FnMut(&mut Clock, &Scene)>(&mut self, model: &Model, mut on_frame: F) -> usize {
        self.clock.set_ceiling(model.ceiling());
        self.clock.start();
        info!(
            "Playing from {} to {}, {} minutes per frame",
            format_clock(self.clock.floor()),
            format_clock(self.clock.ceiling()),
            self.clock.step()
        );

        let mut frames = 0;
        let mut next_wakeup = Instant::now();
        while self.clock.is_running() {
            if let Some(limit) = self.max_frames {
                if frames >= limit {
                    self.clock.stop();
                    break;
                }
            }

            next_wakeup += self.frame_interval;
            let now = Instant::now();
            if next_wakeup > now {
                std::thread::sleep(next_wakeup - now);
            } else {
                // Fell behind; don't try to catch up with a burst of frames
                next_wakeup = now;
            }

            if let Some(time) = self.clock.frame() {
                let scene = model.project(time, &self.scene_config);
                debug!("{}: {}", format_clock(time), scene.summary());
                on_frame(&mut self.clock, &scene);
                frames += 1;
            }
        }
        frames
    }

    /// Projects the current time without ticking, like after a seek while paused
    pub fn current_scene(&self, model: &Model) -> Scene {
        model.project(self.clock.time(), &self.scene_config)
    }
}
