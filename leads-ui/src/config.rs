//! Optional TOML configuration for the calculator.
//!
//! Every section and key may be omitted; missing values take the built-in
//! defaults.
//!
//! ```toml
//! [session]
//! default_coverage = 25
//!
//! [funnel]
//! suitable_ratio = "0.1325"
//! connect_value = "3"
//!
//! [pricing]
//! price_per_lead = "0.80"
//!
//! [logging]
//! level = "debug"
//! file = "leads.log"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use leads_core::{Coverage, FunnelConfig, PricingConfig};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub session: SessionConfig,
    pub funnel: FunnelConfig,
    pub pricing: PricingConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Slider position before the user moves it.
    pub default_coverage: Coverage,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Any `EnvFilter` directive, e.g. `"debug"` or `"info,leads_core=trace"`.
    pub level: Option<String>,
    /// Append log records to this file in addition to the console.
    pub file: Option<PathBuf>,
}

impl AppConfig {
    /// Reads and validates a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        Self::from_toml_str(&text)
            .with_context(|| format!("Invalid config: {}", path.display()))
    }

    pub fn from_toml_str(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text).context("Failed to parse TOML")?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.funnel.validate()?;
        self.pricing.validate()?;
        Ok(())
    }
}
