//! Runtime configuration.
//!
//! Loaded with figment from (highest precedence first):
//! 1. `--data` on the command line (applied by the caller)
//! 2. Environment variables prefixed with `LAUNCH_DASH_`, nested with `__`
//!    (e.g. `LAUNCH_DASH_PAYLOAD__STEP_KG=500`)
//! 3. A TOML file (`launch-dash.toml` unless `--config` names another)
//! 4. Defaults

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use crate::data::model::MAX_POSSIBLE_PAYLOAD_KG;
use crate::error::{DashError, Result};

/// Config file looked up in the working directory when `--config` is absent.
pub const DEFAULT_CONFIG_FILE: &str = "launch-dash.toml";

const ENV_PREFIX: &str = "LAUNCH_DASH_";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub data: DataConfig,
    pub payload: PayloadConfig,
    pub window: WindowConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Launch table read at startup.
    pub path: PathBuf,
}

/// Payload range slider settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayloadConfig {
    /// Right end of the slider. Raised to the dataset's heaviest payload if lower.
    pub slider_max_kg: f64,
    /// Slider step and tick spacing.
    pub step_kg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub width: f32,
    pub height: f32,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("spacex_launch_dash.csv"),
        }
    }
}

impl Default for PayloadConfig {
    fn default() -> Self {
        Self {
            slider_max_kg: MAX_POSSIBLE_PAYLOAD_KG,
            step_kg: 1000.0,
        }
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: 1200.0,
            height: 800.0,
        }
    }
}

impl Config {
    /// Load configuration, optionally from an explicit TOML file.
    ///
    /// An explicit file must exist; the default file is optional.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let toml_path = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(DashError::InvalidConfig {
                        message: format!("config file {} does not exist", path.display()),
                    });
                }
                path.to_path_buf()
            }
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };
        Self::figment(&toml_path).extract::<Config>()?.validated()
    }

    fn figment(toml_path: &Path) -> Figment {
        Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(toml_path))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    pub fn validated(self) -> Result<Self> {
        let p = &self.payload;
        if !(p.slider_max_kg.is_finite() && p.slider_max_kg > 0.0) {
            return Err(DashError::InvalidConfig {
                message: format!("payload.slider_max_kg must be positive, got {}", p.slider_max_kg),
            });
        }
        if !(p.step_kg.is_finite() && p.step_kg > 0.0 && p.step_kg <= p.slider_max_kg) {
            return Err(DashError::InvalidConfig {
                message: format!(
                    "payload.step_kg must be in (0, {}], got {}",
                    p.slider_max_kg, p.step_kg
                ),
            });
        }
        if !(self.window.width > 0.0 && self.window.height > 0.0) {
            return Err(DashError::InvalidConfig {
                message: "window dimensions must be positive".to_string(),
            });
        }
        Ok(self)
    }
}
