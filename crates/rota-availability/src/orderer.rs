use std::cmp::Ordering;

use itertools::Itertools;
use rota_scheduling_environment::Worker;

use crate::ReferenceInstant;
use crate::status::AvailabilityStatus;
use crate::status::ClassifiedWorker;

/// Orders workers for display: in today first, then available soon by
/// earliest start, then workers with nothing coming up.
///
/// Every worker is classified once before sorting. The sort is stable, so
/// workers that compare equal keep their input order.
pub fn order(workers: Vec<Worker>, reference: &ReferenceInstant) -> Vec<ClassifiedWorker>
{
    workers
        .into_iter()
        .map(|worker| ClassifiedWorker::new(worker, reference))
        .sorted_by(|a, b| compare_status(&a.status, &b.status))
        .collect()
}

/// Same order as [`order`], without the statuses.
pub fn order_workers(workers: Vec<Worker>, reference: &ReferenceInstant) -> Vec<Worker>
{
    order(workers, reference)
        .into_iter()
        .map(|classified| classified.worker)
        .collect()
}

pub fn compare_status(a: &AvailabilityStatus, b: &AvailabilityStatus) -> Ordering
{
    match (a, b) {
        (
            AvailabilityStatus::Upcoming { next_start: a_start },
            AvailabilityStatus::Upcoming { next_start: b_start },
        ) => a_start.cmp(b_start),
        _ => a.kind().cmp(&b.kind()),
    }
}

#[cfg(test)]
mod tests
{
    use std::collections::BTreeSet;

    use chrono::DateTime;
    use chrono::TimeZone;
    use chrono::Utc;
    use chrono_tz::Tz;
    use proptest::prelude::*;
    use rota_scheduling_environment::TimeWindow;
    use rota_scheduling_environment::WorkerId;

    use super::*;

    fn at(day: u32, hour: u32) -> DateTime<Utc>
    {
        Utc.with_ymd_and_hms(2024, 6, day, hour, 0, 0).unwrap()
    }

    fn reference() -> ReferenceInstant
    {
        ReferenceInstant::new(at(1, 10), &Tz::UTC)
    }

    fn worker(id: u32, windows: &[(DateTime<Utc>, DateTime<Utc>)]) -> Worker
    {
        Worker::new(
            WorkerId(id),
            format!("worker {}", id),
            BTreeSet::new(),
            windows
                .iter()
                .map(|(start, end)| TimeWindow::new(*start, *end, false))
                .collect(),
        )
    }

    fn ids(workers: &[Worker]) -> Vec<u32>
    {
        workers.iter().map(|worker| worker.id().0).collect()
    }

    #[test]
    fn test_in_today_then_upcoming_then_none()
    {
        let in_today = worker(1, &[(at(1, 9), at(1, 11))]);
        let tomorrow = worker(2, &[(at(2, 9), at(2, 11))]);
        let nothing = worker(3, &[]);

        let ordered = order_workers(vec![nothing, in_today, tomorrow], &reference());

        assert_eq!(ids(&ordered), vec![1, 2, 3]);
    }

    #[test]
    fn test_upcoming_sorted_by_next_start()
    {
        let workers = vec![
            worker(1, &[(at(9, 9), at(9, 11))]),
            worker(2, &[(at(3, 9), at(3, 11)), (at(12, 9), at(12, 11))]),
            worker(3, &[(at(5, 9), at(5, 11))]),
        ];

        let ordered = order_workers(workers, &reference());

        assert_eq!(ids(&ordered), vec![2, 3, 1]);
    }

    #[test]
    fn test_equal_ranks_keep_input_order()
    {
        let workers = vec![
            worker(5, &[]),
            worker(4, &[(at(1, 15), at(1, 17))]),
            worker(3, &[]),
            worker(2, &[(at(1, 6), at(1, 8))]),
            worker(1, &[(at(4, 9), at(4, 11))]),
            worker(0, &[(at(4, 9), at(4, 12))]),
        ];

        let ordered = order_workers(workers, &reference());

        assert_eq!(ids(&ordered), vec![4, 2, 1, 0, 5, 3]);
    }

    #[test]
    fn test_order_returns_statuses_with_workers()
    {
        let ordered = order(vec![worker(1, &[]), worker(2, &[(at(1, 9), at(1, 11))])], &reference());

        assert_eq!(
            ordered[0].status,
            AvailabilityStatus::InProgress {
                window: TimeWindow::new(at(1, 9), at(1, 11), false)
            }
        );
        assert_eq!(ordered[1].status, AvailabilityStatus::None);
    }

    fn worker_strategy() -> impl Strategy<Value = Vec<(DateTime<Utc>, DateTime<Utc>)>>
    {
        proptest::collection::vec(
            (0i64..(20 * 24), 1i64..10).prop_map(|(offset_hours, length_hours)| {
                let start = at(1, 0) - chrono::TimeDelta::days(5)
                    + chrono::TimeDelta::hours(offset_hours);
                (start, start + chrono::TimeDelta::hours(length_hours))
            }),
            0..3,
        )
    }

    proptest! {
        #[test]
        fn test_order_is_sorted_and_stable(windows in proptest::collection::vec(worker_strategy(), 0..12)) {
            let workers: Vec<Worker> = windows
                .iter()
                .enumerate()
                .map(|(id, windows)| worker(id as u32, windows))
                .collect();

            let ordered = order(workers, &reference());

            for pair in ordered.windows(2) {
                let ordering = compare_status(&pair[0].status, &pair[1].status);
                prop_assert_ne!(ordering, Ordering::Greater);
                if ordering == Ordering::Equal {
                    prop_assert!(pair[0].worker.id() < pair[1].worker.id());
                }
            }
        }
    }
}
