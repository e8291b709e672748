use chrono::DateTime;
use chrono::Utc;
use rota_scheduling_environment::TimeWindow;
use rota_scheduling_environment::Worker;
use serde::Serialize;
use strum_macros::Display;
use strum_macros::EnumIter;

use crate::ReferenceInstant;
use crate::classifier::classify;

#[derive(PartialEq, Eq, Debug, Clone, Copy, Serialize)]
#[serde(tag = "status", rename_all = "kebab-case")]
pub enum AvailabilityStatus
{
    /// A window overlaps the calendar day of the reference instant.
    InProgress
    {
        window: TimeWindow
    },
    /// Nothing today, but a window starts after the reference instant.
    Upcoming
    {
        next_start: DateTime<Utc>
    },
    None,
}

#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone, Copy, Display, EnumIter, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum AvailabilityKind
{
    #[strum(serialize = "in-progress")]
    InProgress,
    #[strum(serialize = "upcoming")]
    Upcoming,
    #[strum(serialize = "none")]
    None,
}

impl AvailabilityStatus
{
    pub fn kind(&self) -> AvailabilityKind
    {
        match self {
            AvailabilityStatus::InProgress { .. } => AvailabilityKind::InProgress,
            AvailabilityStatus::Upcoming { .. } => AvailabilityKind::Upcoming,
            AvailabilityStatus::None => AvailabilityKind::None,
        }
    }

    pub fn in_progress_window(&self) -> Option<&TimeWindow>
    {
        match self {
            AvailabilityStatus::InProgress { window } => Some(window),
            AvailabilityStatus::Upcoming { .. } | AvailabilityStatus::None => None,
        }
    }

    pub fn next_start(&self) -> Option<&DateTime<Utc>>
    {
        match self {
            AvailabilityStatus::Upcoming { next_start } => Some(next_start),
            AvailabilityStatus::InProgress { .. } | AvailabilityStatus::None => None,
        }
    }
}

/// A worker paired with the status it had at one reference instant.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct ClassifiedWorker
{
    pub worker: Worker,
    pub status: AvailabilityStatus,
}

impl ClassifiedWorker
{
    pub fn new(worker: Worker, reference: &ReferenceInstant) -> Self
    {
        let status = classify(worker.availability(), reference);
        Self { worker, status }
    }
}
