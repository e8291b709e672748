use chrono::DateTime;
use chrono::Utc;
use rota_scheduling_environment::ReferenceDay;
use rota_scheduling_environment::TimeWindow;
use rota_scheduling_environment::WindowBounds;

use crate::ReferenceInstant;
use crate::status::AvailabilityStatus;

/// Classifies a worker's availability at `reference`.
///
/// "In progress" works at day granularity: any window touching the calendar
/// day of the reference instant counts, even one that started hours ago or
/// starts later today. "Upcoming" works at instant granularity and needs a
/// start strictly after the reference instant. Windows with unparsable
/// bounds are skipped, never reported.
pub fn classify<W>(availability: &[W], reference: &ReferenceInstant) -> AvailabilityStatus
where
    W: WindowBounds,
{
    if let Some(window) = in_progress_window(availability, reference.today()) {
        return AvailabilityStatus::InProgress { window };
    }

    match next_start(availability, reference.now()) {
        Some(next_start) => AvailabilityStatus::Upcoming { next_start },
        None => AvailabilityStatus::None,
    }
}

/// First window, in input order, overlapping `today`.
pub fn in_progress_window<W>(availability: &[W], today: &ReferenceDay) -> Option<TimeWindow>
where
    W: WindowBounds,
{
    availability
        .iter()
        .filter_map(WindowBounds::to_time_window)
        .find(|window| today.overlaps(window.start(), window.end()))
}

/// Earliest start strictly after `now`.
pub fn next_start<W>(availability: &[W], now: &DateTime<Utc>) -> Option<DateTime<Utc>>
where
    W: WindowBounds,
{
    availability
        .iter()
        .filter_map(WindowBounds::start)
        .filter(|start| start > now)
        .min()
}
