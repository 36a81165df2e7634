//! Settings file handling.
//!
//! ```toml
//! [analytics]
//! parallel = true
//! parallel_threshold = 100
//!
//! [analytics.solver]
//! method = "brent"
//! max_iterations = 100
//!
//! [validation]
//! max_coupon_pct = 50.0
//!
//! [scenarios]
//! start_bps = -200
//! end_bps = 200
//! step_bps = 25
//! ```

use std::path::{Path, PathBuf};

use bondlens_portfolio::{AnalyticsConfig, ShiftGrid};
use bondlens_validation::ValidationSettings;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Everything the settings file can override. Missing tables use defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Valuation and parallelism.
    pub analytics: AnalyticsConfig,
    /// Plausibility thresholds.
    pub validation: ValidationSettings,
    /// Default scenario grid.
    pub scenarios: ShiftGrid,
}

impl Settings {
    /// Parses settings from TOML text.
    pub fn from_toml(text: &str, path: &Path) -> CliResult<Self> {
        let settings: Settings = toml::from_str(text).map_err(|e| CliError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        settings.check(path)?;
        Ok(settings)
    }

    /// Loads settings from `explicit`, else the user config file if present,
    /// else defaults. An explicit path must exist.
    pub fn load(explicit: Option<&Path>) -> CliResult<Self> {
        let path = match explicit {
            Some(path) => path.to_path_buf(),
            None => match default_path().filter(|p| p.exists()) {
                Some(path) => path,
                None => return Ok(Self::default()),
            },
        };

        let text = std::fs::read_to_string(&path).map_err(|e| CliError::Config {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        debug!(path = %path.display(), "loading settings");
        Self::from_toml(&text, &path)
    }

    fn check(&self, path: &Path) -> CliResult<()> {
        let config_error = |reason: String| CliError::Config {
            path: path.to_path_buf(),
            reason,
        };
        self.analytics
            .solver
            .validate()
            .map_err(|e| config_error(e.to_string()))?;
        self.scenarios
            .validate()
            .map_err(|e| config_error(e.to_string()))?;
        Ok(())
    }
}

/// `<config dir>/bondlens/config.toml`.
pub fn default_path() -> Option<PathBuf> {
    dirs::config_dir()
        .or_else(dirs::home_dir)
        .map(|dir| dir.join("bondlens").join("config.toml"))
}
