//! Layered runtime settings.
//!
//! Sources, lowest precedence first: built-in defaults, a TOML file
//! (`nocwatch.toml` in the working directory if present, or the file passed
//! with `--config`), then `NOCWATCH_*` environment variables. Command-line
//! flags are applied on top by the binary.
//!
//! ```toml
//! nodes_path = "data/network_nodes_metadata.csv"
//! refresh_secs = 60
//!
//! [thresholds.temperature]
//! warning = 45.0
//! critical = 55.0
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::data::store::{DEFAULT_NODES_FILE, DEFAULT_PERFORMANCE_FILE};
use crate::data::{ThresholdPair, Thresholds};
use crate::scheduler::DEFAULT_REFRESH_SECS;

/// Config file looked up in the working directory when none is given.
pub const DEFAULT_CONFIG_FILE: &str = "nocwatch.toml";

/// Prefix for environment overrides, e.g. `NOCWATCH_REFRESH_SECS=60` or
/// `NOCWATCH_THRESHOLDS__AVAILABILITY_WARNING=97.5`.
pub const ENV_PREFIX: &str = "NOCWATCH";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub nodes_path: PathBuf,
    pub performance_path: PathBuf,
    /// Auto-refresh interval in whole seconds.
    pub refresh_secs: u64,
    /// Fixed random seed; entropy-seeded when absent.
    pub seed: Option<u64>,
    pub thresholds: Thresholds,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            nodes_path: PathBuf::from(DEFAULT_NODES_FILE),
            performance_path: PathBuf::from(DEFAULT_PERFORMANCE_FILE),
            refresh_secs: DEFAULT_REFRESH_SECS,
            seed: None,
            thresholds: Thresholds::default(),
        }
    }
}

impl Settings {
    /// Load settings from the optional file and the environment.
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) => File::from(path).required(true),
            None => File::from(Path::new(DEFAULT_CONFIG_FILE)).required(false),
        };

        let settings: Settings = Config::builder()
            .add_source(file)
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Reject intervals under one second and inverted threshold pairs.
    pub fn validate(&self) -> Result<()> {
        if self.refresh_secs < 1 {
            bail!("refresh interval must be at least 1s");
        }

        let t = &self.thresholds;
        let pairs: [(&str, ThresholdPair); 4] = [
            ("temperature", t.temperature),
            ("cpu", t.cpu),
            ("memory", t.memory),
            ("network", t.network),
        ];
        for (name, pair) in pairs {
            if pair.warning > pair.critical {
                bail!(
                    "{} warning threshold ({}) exceeds critical threshold ({})",
                    name,
                    pair.warning,
                    pair.critical
                );
            }
        }

        // Availability is a floor: critical sits below warning
        if t.availability_critical > t.availability_warning {
            bail!(
                "availability critical floor ({}) is above the warning floor ({})",
                t.availability_critical,
                t.availability_warning
            );
        }
        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs)
    }
}
