use std::time::Duration;

use anyhow::Result;
use serde::{Deserialize, Serialize};

use model::{ClockConfig, SceneConfig};

/// Everything tunable about a replay. Any field can be left out of the file.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReplayConfig {
    pub clock: ClockConfig,
    pub scene: SceneConfig,
    /// Frames per real second
    pub fps: f64,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            clock: ClockConfig::default(),
            scene: SceneConfig::default(),
            fps: 60.0,
        }
    }
}

impl ReplayConfig {
    pub fn load(path: &str) -> Result<ReplayConfig> {
        let raw = fs_err::read_to_string(path)?;
        let config: ReplayConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.fps.is_finite() && self.fps > 0.0) {
            bail!("fps must be positive, not {}", self.fps);
        }
        self.frame_interval()?;
        if !(self.clock.step.is_finite() && self.clock.step > 0.0) {
            bail!("The clock step must be positive, not {}", self.clock.step);
        }
        if !self.clock.floor.is_finite() {
            bail!("The clock floor must be a number, not {}", self.clock.floor);
        }
        Ok(())
    }

    pub fn frame_interval(&self) -> Result<Duration> {
        match Duration::try_from_secs_f64(1.0 / self.fps) {
            Ok(interval) => Ok(interval),
            Err(err) => bail!("fps {} doesn't give a usable frame interval: {}", self.fps, err),
        }
    }
}
