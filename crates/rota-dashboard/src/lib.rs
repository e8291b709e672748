pub mod card;
pub mod dashboard;
pub mod logging;
pub mod store;

pub use card::DisplaySettings;
pub use card::WorkerCard;
pub use dashboard::Dashboard;
pub use store::RosterStore;
