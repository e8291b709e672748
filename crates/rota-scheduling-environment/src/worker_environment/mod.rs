pub mod availability;
pub mod worker;

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;
use tracing::Level;
use tracing::event;

use self::availability::TimeWindowParseError;
use self::availability::TimeWindowRecord;
use self::worker::WorkerId;
use self::worker::WorkerRecord;
use crate::time_environment::TimeRange;
use crate::time_environment::local_instant;

#[derive(Debug, Error)]
pub enum RosterError
{
    #[error("no worker found with id {0}")]
    WorkerNotFound(WorkerId),
    #[error("no worker named {0:?} in the roster")]
    UnknownWorkerName(String),
    #[error("a worker needs a non-empty name")]
    EmptyName,
    #[error("availability window {index} is invalid: {source}")]
    InvalidWindow
    {
        index: usize,
        source: TimeWindowParseError,
    },
}

/// Partial update of a worker. Fields left as `None` are not touched.
#[derive(Default, Debug, Clone, Serialize, Deserialize)]
pub struct WorkerUpdate
{
    pub name: Option<String>,
    pub roles: Option<Vec<String>>,
    pub availability: Option<Vec<TimeWindowRecord>>,
}

/// Every stored worker, in insertion order.
///
/// Serializes to the `{"workers": [...]}` document the store reads and writes.
#[derive(Default, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster
{
    workers: Vec<WorkerRecord>,
}

impl Roster
{
    pub fn new(workers: Vec<WorkerRecord>) -> Self
    {
        Self { workers }
    }

    pub fn workers(&self) -> &[WorkerRecord]
    {
        &self.workers
    }

    pub fn into_workers(self) -> Vec<WorkerRecord>
    {
        self.workers
    }

    pub fn worker(&self, id: &WorkerId) -> Option<&WorkerRecord>
    {
        self.workers.iter().find(|worker| worker.id == *id)
    }

    fn next_id(&self) -> WorkerId
    {
        WorkerId(
            self.workers
                .iter()
                .map(|worker| worker.id.0)
                .max()
                .map_or(1, |max| max + 1),
        )
    }

    pub fn add_worker(
        &mut self,
        name: &str,
        roles: Vec<String>,
        availability: Vec<TimeWindowRecord>,
    ) -> Result<WorkerId, RosterError>
    {
        let name = name.trim();
        if name.is_empty() {
            return Err(RosterError::EmptyName);
        }

        let id = self.next_id();
        self.workers.push(WorkerRecord {
            id,
            name: name.to_string(),
            roles,
            availability,
        });
        event!(Level::INFO, worker_id = %id, name, "worker created");
        Ok(id)
    }

    /// Applies `update` to the worker with `id`.
    ///
    /// Replacement availability is normalized first; a single unparsable
    /// window rejects the whole update and leaves the worker unchanged.
    pub fn update_worker(
        &mut self,
        id: &WorkerId,
        update: WorkerUpdate,
    ) -> Result<&WorkerRecord, RosterError>
    {
        let availability = update
            .availability
            .map(|windows| {
                windows
                    .iter()
                    .enumerate()
                    .map(|(index, window)| {
                        window
                            .normalized()
                            .map_err(|source| RosterError::InvalidWindow { index, source })
                    })
                    .collect::<Result<Vec<_>, _>>()
            })
            .transpose()?;

        if matches!(&update.name, Some(name) if name.trim().is_empty()) {
            return Err(RosterError::EmptyName);
        }

        let worker = self
            .workers
            .iter_mut()
            .find(|worker| worker.id == *id)
            .ok_or(RosterError::WorkerNotFound(*id))?;

        if let Some(name) = update.name {
            worker.name = name.trim().to_string();
        }
        if let Some(roles) = update.roles {
            worker.roles = roles;
        }
        if let Some(availability) = availability {
            worker.availability = availability;
        }
        event!(Level::INFO, worker_id = %id, "worker updated");
        Ok(worker)
    }

    pub fn remove_worker(&mut self, id: &WorkerId) -> Result<WorkerRecord, RosterError>
    {
        let position = self
            .workers
            .iter()
            .position(|worker| worker.id == *id)
            .ok_or(RosterError::WorkerNotFound(*id))?;

        let removed = self.workers.remove(position);
        event!(Level::INFO, worker_id = %id, name = %removed.name, "worker removed");
        Ok(removed)
    }

    /// Records that the worker named `name` is available on `date` for
    /// `time_range`, read as wall-clock time in `time_zone`.
    ///
    /// Any window already starting on `date` is replaced. Windows whose start
    /// cannot be parsed are left in place.
    pub fn set_day_availability(
        &mut self,
        name: &str,
        date: NaiveDate,
        time_range: &TimeRange,
        time_zone: &Tz,
    ) -> Result<WorkerId, RosterError>
    {
        let name = name.trim();
        let worker = self
            .workers
            .iter_mut()
            .find(|worker| worker.name == name)
            .ok_or_else(|| RosterError::UnknownWorkerName(name.to_string()))?;

        let start = local_instant(date, time_range.start, time_zone);
        let end = local_instant(date, time_range.end, time_zone);

        worker
            .availability
            .retain(|window| window.start_date() != Some(date));
        worker.availability.push(TimeWindowRecord {
            start: start.to_rfc3339(),
            end: end.to_rfc3339(),
            late: Some(false),
        });

        event!(
            Level::INFO,
            worker_id = %worker.id,
            name,
            %date,
            start = %time_range.start.format("%H:%M"),
            end = %time_range.end.format("%H:%M"),
            "day availability set"
        );
        Ok(worker.id)
    }
}
