mod display;
mod time_zones;

use std::path::Path;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use anyhow::Result;
use arc_swap::ArcSwap;
use serde::Deserialize;

pub use display::DisplayFormats;
pub use time_zones::TimeZones;

pub const CONFIGURATION_PATH_VARIABLE: &str = "ROTA_CONFIGURATION";
pub const DEFAULT_CONFIGURATION_PATH: &str = "./configuration/rota.toml";

/// Every setting the dashboard reads, loaded in one place.
///
/// Callers receive it wrapped in `Arc<ArcSwap<_>>` and take a snapshot with
/// `load()` at the start of each cycle.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SystemConfigurations
{
    pub time_zones: TimeZones,
    pub display: DisplayFormats,
    pub storage: Storage,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Storage
{
    pub roster_path: PathBuf,
}

impl Default for Storage
{
    fn default() -> Self
    {
        Self {
            roster_path: PathBuf::from("./data/roster.json"),
        }
    }
}

impl SystemConfigurations
{
    /// Reads the file named by `ROTA_CONFIGURATION`, or
    /// `./configuration/rota.toml` when the variable is unset. A missing file
    /// yields the defaults.
    pub fn read_all_configs() -> Result<Arc<ArcSwap<SystemConfigurations>>>
    {
        let configuration_path = dotenvy::var(CONFIGURATION_PATH_VARIABLE)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_CONFIGURATION_PATH));

        let system_configurations = Self::from_path(&configuration_path)?;

        Ok(Arc::new(ArcSwap::new(Arc::new(system_configurations))))
    }

    pub fn from_path(path: &Path) -> Result<SystemConfigurations>
    {
        if !path.exists() {
            return Ok(SystemConfigurations::default());
        }

        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Could not read configuration file {}", path.display()))?;

        Self::from_toml_str(&contents)
            .with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    pub fn from_toml_str(contents: &str) -> Result<SystemConfigurations>
    {
        Ok(toml::from_str(contents)?)
    }
}
