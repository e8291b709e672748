use std::fs;
use std::path::Path;
use std::path::PathBuf;

use anyhow::Context;
use anyhow::Result;
use rota_scheduling_environment::Roster;
use tracing::Level;
use tracing::event;
use tracing::instrument;

/// JSON file holding the roster as `{"workers": [...]}`.
#[derive(Debug, Clone)]
pub struct RosterStore
{
    path: PathBuf,
}

impl RosterStore
{
    pub fn new(path: impl Into<PathBuf>) -> Self
    {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path
    {
        &self.path
    }

    /// Loads the roster. A file that does not exist yet is an empty roster.
    #[instrument(level = "info", skip_all, fields(path = %self.path.display()))]
    pub fn load(&self) -> Result<Roster>
    {
        if !self.path.exists() {
            event!(Level::INFO, "no roster file yet, starting empty");
            return Ok(Roster::default());
        }

        let data = fs::read_to_string(&self.path)
            .with_context(|| format!("Could not read roster file {}", self.path.display()))?;

        let roster: Roster = serde_json::from_str(&data)
            .with_context(|| format!("Roster file {} is not valid JSON", self.path.display()))?;

        event!(Level::INFO, workers = roster.workers().len(), "roster loaded");
        Ok(roster)
    }

    /// Writes the whole roster, replacing the file atomically.
    #[instrument(level = "info", skip_all, fields(path = %self.path.display()))]
    pub fn save(&self, roster: &Roster) -> Result<()>
    {
        if let Some(parent) = self.path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Could not create directory {}", parent.display()))?;
        }

        let json_roster = serde_json::to_string_pretty(roster)?;
        let temporary_path = self.path.with_extension("json.tmp");

        fs::write(&temporary_path, json_roster.as_bytes())
            .with_context(|| format!("Could not write {}", temporary_path.display()))?;
        fs::rename(&temporary_path, &self.path)
            .with_context(|| format!("Could not replace {}", self.path.display()))?;

        event!(Level::INFO, workers = roster.workers().len(), "roster saved");
        Ok(())
    }
}
