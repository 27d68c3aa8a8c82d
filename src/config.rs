//! Double-click budget.
//!
//! ```toml
//! max_double_click_movement = 5
//! max_double_click_time_ms = 250
//! ```
//!
//! Missing keys fall back to the defaults above. Movement is in raw report units (the
//! same units as the per-axis deltas), accumulated per axis.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_MAX_DOUBLE_CLICK_MOVEMENT: i32 = 5;
pub const DEFAULT_MAX_DOUBLE_CLICK_TIME_MS: u64 = 250;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClickConfig {
    /// Largest accumulated |dx| or |dy| between presses that still counts as a double-click.
    pub max_double_click_movement: i32,
    /// Longest time from the first press to the second press of a double-click.
    pub max_double_click_time_ms: u64,
}

impl Default for ClickConfig {
    fn default() -> Self {
        Self {
            max_double_click_movement: DEFAULT_MAX_DOUBLE_CLICK_MOVEMENT,
            max_double_click_time_ms: DEFAULT_MAX_DOUBLE_CLICK_TIME_MS,
        }
    }
}

impl ClickConfig {
    #[inline]
    pub fn max_double_click_time(&self) -> Duration {
        Duration::from_millis(self.max_double_click_time_ms)
    }

    pub fn validate(self) -> Result<Self> {
        if self.max_double_click_movement < 0 {
            return Err(Error::InvalidConfig(format!(
                "max_double_click_movement must be non-negative, got {}",
                self.max_double_click_movement
            )));
        }
        Ok(self)
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        toml::from_str::<Self>(s)?.validate()
    }

    pub fn from_json_str(s: &str) -> Result<Self> {
        serde_json::from_str::<Self>(s)?.validate()
    }

    /// Load from a file. `.json` files are parsed as JSON, everything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let is_json = path
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&text)
        } else {
            Self::from_toml_str(&text)
        }
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string(self)?)
    }
}
