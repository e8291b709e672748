use std::sync::Arc;

use anyhow::Result;
use arc_swap::ArcSwap;
use chrono::DateTime;
use chrono::Utc;
use rota_availability::AvailabilityKind;
use rota_availability::ClassifiedWorker;
use rota_availability::ReferenceInstant;
use rota_availability::filter_record;
use rota_availability::order;
use rota_configuration::SystemConfigurations;
use rota_scheduling_environment::Worker;
use rota_scheduling_environment::WorkerRecord;
use tracing::Level;
use tracing::event;
use tracing::instrument;

use crate::card::DisplaySettings;
use crate::card::WorkerCard;
use crate::card::search;

pub struct Dashboard
{
    system_configurations: Arc<ArcSwap<SystemConfigurations>>,
}

impl Dashboard
{
    pub fn new(system_configurations: Arc<ArcSwap<SystemConfigurations>>) -> Self
    {
        Self {
            system_configurations,
        }
    }

    /// Runs filter, classification and ordering over `records`, all at `now`.
    #[instrument(level = "info", skip_all, fields(workers = records.len(), %now))]
    pub fn cycle(&self, records: Vec<WorkerRecord>, now: DateTime<Utc>) -> Vec<ClassifiedWorker>
    {
        let system_configurations = self.system_configurations.load();
        let reference = ReferenceInstant::new(now, &system_configurations.time_zones.reference);

        let workers: Vec<Worker> = records
            .into_iter()
            .map(|record| filter_record(record, reference.now()))
            .collect();

        let ordered = order(workers, &reference);

        let count = |kind: AvailabilityKind| {
            ordered
                .iter()
                .filter(|classified| classified.status.kind() == kind)
                .count()
        };
        event!(
            Level::INFO,
            today = %reference.today().date(),
            in_progress = count(AvailabilityKind::InProgress),
            upcoming = count(AvailabilityKind::Upcoming),
            none = count(AvailabilityKind::None),
            "workers classified"
        );

        ordered
    }

    /// One cycle rendered into cards, optionally narrowed by a name search.
    pub fn cards(
        &self,
        records: Vec<WorkerRecord>,
        now: DateTime<Utc>,
        query: Option<&str>,
    ) -> Result<Vec<WorkerCard>>
    {
        let display = DisplaySettings::from_configuration(&self.system_configurations.load())?;

        let cards: Vec<WorkerCard> = self
            .cycle(records, now)
            .iter()
            .map(|classified| WorkerCard::from_classified(classified, &display))
            .collect();

        Ok(match query {
            Some(query) => search(cards, query),
            None => cards,
        })
    }
}
