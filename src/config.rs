//! Sandbox configuration with layered loading
//!
//! Configuration is loaded from multiple sources (lowest to highest priority):
//! 1. Compiled defaults
//! 2. `sbx.ron` file (if exists)
//! 3. Environment variables prefixed with `SBX_`
//!
//! Example environment variable: `SBX_WORLD__WIDTH=128`

use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::world::{Dimension, StorageLimits};

/// Main sandbox configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SandboxConfig {
    #[serde(default)]
    pub window: WindowConfig,

    #[serde(default)]
    pub world: WorldConfig,

    #[serde(default)]
    pub limits: StorageLimits,

    /// RGB colors of the plock types, registered in order from id 1
    #[serde(default = "default_plock_types")]
    pub plock_types: Vec<[f32; 3]>,
}

/// Display surface settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    /// Frames to run before closing, must be at least 1
    pub max_frames: u64,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "SBX".to_owned(),
            width: 1200,
            height: 675,
            max_frames: 120,
        }
    }
}

/// Box dimensions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldConfig {
    pub width: Dimension,
    pub height: Dimension,
    /// Size the box is resized to halfway through the run (0 = never)
    pub resize_width: Dimension,
    pub resize_height: Dimension,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 64,
            height: 36,
            resize_width: 0,
            resize_height: 0,
        }
    }
}

impl WindowConfig {
    /// Frame budget for the headless surface, which has no other way to close
    pub fn frame_budget(&self) -> Result<u64> {
        if self.max_frames == 0 {
            anyhow::bail!("window.max_frames must be at least 1 for a headless surface");
        }
        Ok(self.max_frames)
    }
}

fn default_plock_types() -> Vec<[f32; 3]> {
    vec![
        [0.86, 0.75, 0.45], // sand
        [0.20, 0.40, 0.90], // water
        [0.45, 0.45, 0.50], // stone
    ]
}

impl SandboxConfig {
    /// Load configuration with layered priority:
    /// 1. Compiled defaults (lowest priority)
    /// 2. `sbx.ron` file (if exists)
    /// 3. Environment variables prefixed with `SBX_` (highest priority)
    pub fn load() -> Result<Self> {
        let defaults = Self {
            plock_types: default_plock_types(),
            ..Self::default()
        };
        let limits = defaults.limits;

        let builder = Config::builder()
            // Layer 1: Compiled defaults
            .set_default("window.title", defaults.window.title)?
            .set_default("window.width", defaults.window.width as i64)?
            .set_default("window.height", defaults.window.height as i64)?
            .set_default("window.max_frames", defaults.window.max_frames as i64)?
            .set_default("world.width", defaults.world.width as i64)?
            .set_default("world.height", defaults.world.height as i64)?
            .set_default("world.resize_width", defaults.world.resize_width as i64)?
            .set_default("world.resize_height", defaults.world.resize_height as i64)?
            .set_default("limits.max_plocks", limits.max_plocks as i64)?
            .set_default("limits.max_plock_ids", limits.max_plock_ids as i64)?
            // Layer 2: Config file (optional, won't error if missing)
            .add_source(
                File::with_name("sbx")
                    .format(config::FileFormat::Ron)
                    .required(false),
            )
            // Layer 3: Environment variables (SBX_WORLD__WIDTH, etc.)
            .add_source(Environment::with_prefix("SBX").separator("__"));

        let config = builder.build().context("Failed to build configuration")?;

        let mut loaded: Self = config
            .try_deserialize()
            .context("Failed to deserialize configuration")?;
        if loaded.plock_types.is_empty() {
            loaded.plock_types = defaults.plock_types;
        }
        Ok(loaded)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SandboxConfig::default();
        assert_eq!(config.window.title, "SBX");
        assert_eq!(config.window.width, 1200);
        assert_eq!(config.world.width, 64);
        assert_eq!(config.limits, StorageLimits::default());
    }

    #[test]
    fn test_zero_frame_budget_is_rejected() {
        let mut window = WindowConfig::default();
        assert_eq!(window.frame_budget().unwrap(), 120);

        window.max_frames = 0;
        assert!(window.frame_budget().is_err());
    }

    #[test]
    fn test_load_config_with_defaults() {
        // Should load defaults when no config file exists
        let config = SandboxConfig::load().expect("Failed to load config");
        assert_eq!(config.window.height, 675);
        assert_eq!(config.world.height, 36);
        assert_eq!(config.plock_types.len(), 3);
    }
}
