use std::path::Path;

use common::{deserialize, serialize, SerdeFormat};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Initial variances applied to every estimator when the filter bank reseeds.
///
/// Higher `p` trusts the first frame less, so early frames move the estimate
/// more. Higher `r` trusts each new frame less and smooths harder.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Initial estimate uncertainty. Range `[0, f32::MAX]`.
    pub p: f32,
    /// Measurement uncertainty. Range `[0, f32::MAX]`.
    pub r: f32,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self { p: 1.0, r: 0.0 }
    }
}

impl FilterConfig {
    pub fn new(p: f32, r: f32) -> Self {
        Self { p, r }
    }

    /// Builder method to set the initial estimate uncertainty.
    pub fn p(mut self, p: f32) -> Self {
        self.p = p;
        self
    }

    /// Builder method to set the measurement uncertainty.
    pub fn r(mut self, r: f32) -> Self {
        self.r = r;
        self
    }

    /// Checks that both variances are finite and non-negative.
    ///
    /// The filter bank accepts any values; this is for callers that take
    /// configuration from users.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("p", self.p), ("r", self.r)] {
            if !value.is_finite() || value < 0.0 {
                return Err(Error::InvalidConfig(format!(
                    "{name} must be finite and >= 0, got {value}"
                )));
            }
        }
        Ok(())
    }

    /// Loads a config from a `.yaml`, `.yml` or `.json` file.
    pub fn load(path: &Path) -> Result<Self> {
        let format = SerdeFormat::from_path(path).map_err(|e| Error::ConfigFormat {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let text = std::fs::read_to_string(path).map_err(|source| Error::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        deserialize(&text, format).map_err(|e| Error::ConfigFormat {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })
    }

    /// Writes the config in the format implied by the file extension.
    pub fn save(&self, path: &Path) -> Result<()> {
        let format = SerdeFormat::from_path(path).map_err(|e| Error::ConfigFormat {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        let text = serialize(self, format).map_err(|e| Error::ConfigFormat {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        std::fs::write(path, text).map_err(|source| Error::ConfigIo {
            path: path.to_path_buf(),
            source,
        })
    }
}
