//! Availability classification and ordering.
//!
//! Raw worker records go through three pure stages, all evaluated against a
//! single [`ReferenceInstant`]:
//!
//! 1. [`filter`] drops unparsable and expired windows.
//! 2. [`classifier`] decides whether a worker is in today, available soon or
//!    has nothing coming up.
//! 3. [`orderer`] sorts the workers for display.
pub mod classifier;
pub mod filter;
pub mod orderer;
pub mod status;

use chrono::DateTime;
use chrono::Utc;
use chrono_tz::Tz;
use rota_scheduling_environment::ReferenceDay;

pub use classifier::classify;
pub use filter::filter_record;
pub use filter::filter_worker;
pub use orderer::order;
pub use status::AvailabilityKind;
pub use status::AvailabilityStatus;
pub use status::ClassifiedWorker;

/// The instant a dashboard cycle is evaluated at, together with the calendar
/// day containing it.
///
/// Capture one per cycle and hand the same value to every stage, so all
/// workers are judged against the same boundaries.
#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub struct ReferenceInstant
{
    now: DateTime<Utc>,
    today: ReferenceDay,
}

impl ReferenceInstant
{
    pub fn new(now: DateTime<Utc>, time_zone: &Tz) -> Self
    {
        Self {
            now,
            today: ReferenceDay::containing(&now, time_zone),
        }
    }

    pub fn now(&self) -> &DateTime<Utc>
    {
        &self.now
    }

    pub fn today(&self) -> &ReferenceDay
    {
        &self.today
    }
}
