pub mod time_environment;
pub mod worker_environment;

pub use time_environment::ReferenceDay;
pub use time_environment::TimeRange;
pub use worker_environment::Roster;
pub use worker_environment::RosterError;
pub use worker_environment::WorkerUpdate;
pub use worker_environment::availability::TimeWindow;
pub use worker_environment::availability::TimeWindowRecord;
pub use worker_environment::availability::WindowBounds;
pub use worker_environment::worker::Role;
pub use worker_environment::worker::Worker;
pub use worker_environment::worker::WorkerId;
pub use worker_environment::worker::WorkerRecord;
