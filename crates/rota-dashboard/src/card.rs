use anyhow::Result;
use anyhow::bail;
use chrono::DateTime;
use chrono::Utc;
use chrono::format::Item;
use chrono::format::StrftimeItems;
use chrono_tz::Tz;
use rota_availability::AvailabilityKind;
use rota_availability::AvailabilityStatus;
use rota_availability::ClassifiedWorker;
use rota_configuration::SystemConfigurations;
use rota_scheduling_environment::WorkerId;
use serde::Serialize;

/// How times and dates appear on a card.
#[derive(Debug, Clone)]
pub struct DisplaySettings
{
    time_zone: Tz,
    time_format: String,
    date_format: String,
}

impl DisplaySettings
{
    pub fn new(time_zone: Tz, time_format: &str, date_format: &str) -> Result<Self>
    {
        for format in [time_format, date_format] {
            if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
                bail!("Invalid display format {:?}", format);
            }
        }

        Ok(Self {
            time_zone,
            time_format: time_format.to_string(),
            date_format: date_format.to_string(),
        })
    }

    pub fn from_configuration(system_configurations: &SystemConfigurations) -> Result<Self>
    {
        Self::new(
            system_configurations.time_zones.display,
            &system_configurations.display.time_format,
            &system_configurations.display.date_format,
        )
    }

    fn time(&self, instant: &DateTime<Utc>) -> String
    {
        instant
            .with_timezone(&self.time_zone)
            .format(&self.time_format)
            .to_string()
    }

    fn date(&self, instant: &DateTime<Utc>) -> String
    {
        instant
            .with_timezone(&self.time_zone)
            .format(&self.date_format)
            .to_string()
    }
}

#[derive(PartialEq, Eq, Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Badge
{
    InToday,
    AvailableSoon,
    NoAvailability,
}

#[derive(PartialEq, Eq, Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Tone
{
    Success,
    Warning,
    Secondary,
}

impl Badge
{
    pub fn label(&self) -> &'static str
    {
        match self {
            Badge::InToday => "In Today",
            Badge::AvailableSoon => "Available Soon",
            Badge::NoAvailability => "No Availability",
        }
    }

    pub fn tone(&self) -> Tone
    {
        match self {
            Badge::InToday => Tone::Success,
            Badge::AvailableSoon => Tone::Warning,
            Badge::NoAvailability => Tone::Secondary,
        }
    }
}

impl From<AvailabilityKind> for Badge
{
    fn from(value: AvailabilityKind) -> Self
    {
        match value {
            AvailabilityKind::InProgress => Badge::InToday,
            AvailabilityKind::Upcoming => Badge::AvailableSoon,
            AvailabilityKind::None => Badge::NoAvailability,
        }
    }
}

/// Everything a renderer needs to draw one worker.
#[derive(PartialEq, Eq, Debug, Clone, Serialize)]
pub struct WorkerCard
{
    pub id: WorkerId,
    pub name: String,
    pub roles: Vec<String>,
    pub status: AvailabilityKind,
    pub badge: Badge,
    pub summary: String,
    pub late: bool,
}

impl WorkerCard
{
    pub fn from_classified(classified: &ClassifiedWorker, display: &DisplaySettings) -> Self
    {
        let worker = &classified.worker;
        let summary = match &classified.status {
            AvailabilityStatus::InProgress { window } => format!(
                "{} – {}",
                display.time(window.start()),
                display.time(window.end())
            ),
            AvailabilityStatus::Upcoming { next_start } => {
                format!("Next: {}", display.date(next_start))
            }
            AvailabilityStatus::None => "No upcoming availability".to_string(),
        };

        WorkerCard {
            id: *worker.id(),
            name: worker.name().to_string(),
            roles: worker.roles().iter().map(|role| role.to_string()).collect(),
            status: classified.status.kind(),
            badge: Badge::from(classified.status.kind()),
            summary,
            late: classified
                .status
                .in_progress_window()
                .is_some_and(|window| window.late()),
        }
    }

    pub fn matches_search(&self, query: &str) -> bool
    {
        self.name
            .to_lowercase()
            .contains(&query.trim().to_lowercase())
    }
}

/// Keeps the cards whose name contains `query`, ignoring case, in their
/// current order.
pub fn search(cards: Vec<WorkerCard>, query: &str) -> Vec<WorkerCard>
{
    cards
        .into_iter()
        .filter(|card| card.matches_search(query))
        .collect()
}
