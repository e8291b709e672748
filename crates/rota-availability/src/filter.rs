use chrono::DateTime;
use chrono::Utc;
use rota_scheduling_environment::TimeWindow;
use rota_scheduling_environment::Worker;
use rota_scheduling_environment::WorkerRecord;
use tracing::Level;
use tracing::event;
use tracing::instrument;

/// Turns a stored record into a [`Worker`] holding only windows that are
/// still relevant at `now`.
///
/// Windows that fail to parse are dropped and logged. The worker itself is
/// always kept, even when nothing survives.
#[instrument(level = "debug", skip_all, fields(worker_id = %record.id))]
pub fn filter_record(record: WorkerRecord, now: &DateTime<Utc>) -> Worker
{
    let roles = record.roles();
    let availability = record
        .availability
        .iter()
        .filter_map(|window| match window.parse() {
            Ok(window) => Some(window),
            Err(error) => {
                event!(
                    Level::WARN,
                    worker_id = %record.id,
                    %error,
                    "dropping unparsable availability window"
                );
                None
            }
        })
        .filter(|window| !window.has_ended_before(now))
        .collect();

    Worker::new(record.id, record.name, roles, availability)
}

/// Prunes windows that ended before `now`, keeping the order of the rest.
pub fn filter_worker(worker: Worker, now: &DateTime<Utc>) -> Worker
{
    let availability: Vec<TimeWindow> = worker
        .availability()
        .iter()
        .filter(|window| !window.has_ended_before(now))
        .copied()
        .collect();

    worker.with_availability(availability)
}
