use std::collections::BTreeSet;
use std::fmt;
use std::fmt::Display;

use serde::Deserialize;
use serde::Serialize;

use super::availability::TimeWindow;
use super::availability::TimeWindowRecord;

#[derive(Hash, Eq, PartialEq, PartialOrd, Ord, Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkerId(pub u32);

impl Display for WorkerId
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "{}", self.0)
    }
}

#[derive(Hash, Eq, PartialEq, PartialOrd, Ord, Clone, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Role(pub String);

impl Display for Role
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result
    {
        write!(f, "{}", self.0)
    }
}

/// A worker as the dashboard sees it, after its windows have been parsed.
///
/// The availability can only be replaced as a whole.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Worker
{
    id: WorkerId,
    name: String,
    roles: BTreeSet<Role>,
    availability: Vec<TimeWindow>,
}

impl Worker
{
    pub fn new(
        id: WorkerId,
        name: impl Into<String>,
        roles: BTreeSet<Role>,
        availability: Vec<TimeWindow>,
    ) -> Self
    {
        Self {
            id,
            name: name.into(),
            roles,
            availability,
        }
    }

    pub fn id(&self) -> &WorkerId
    {
        &self.id
    }

    pub fn name(&self) -> &str
    {
        &self.name
    }

    pub fn roles(&self) -> &BTreeSet<Role>
    {
        &self.roles
    }

    pub fn availability(&self) -> &[TimeWindow]
    {
        &self.availability
    }

    pub fn with_availability(self, availability: Vec<TimeWindow>) -> Self
    {
        Self {
            availability,
            ..self
        }
    }
}

/// The stored and transported shape of a worker.
#[derive(PartialEq, Eq, Debug, Clone, Serialize, Deserialize)]
pub struct WorkerRecord
{
    pub id: WorkerId,
    pub name: String,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub availability: Vec<TimeWindowRecord>,
}

impl WorkerRecord
{
    pub fn roles(&self) -> BTreeSet<Role>
    {
        self.roles.iter().cloned().map(Role).collect()
    }
}

impl From<&Worker> for WorkerRecord
{
    fn from(value: &Worker) -> Self
    {
        WorkerRecord {
            id: value.id,
            name: value.name.clone(),
            roles: value.roles.iter().map(|role| role.0.clone()).collect(),
            availability: value
                .availability
                .iter()
                .map(TimeWindowRecord::from)
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests
{
    use chrono::TimeZone;
    use chrono::Utc;

    use super::*;

    #[test]
    fn test_with_availability_replaces_the_whole_sequence()
    {
        let window = TimeWindow::new(
            Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 6, 1, 11, 0, 0).unwrap(),
            false,
        );
        let worker = Worker::new(WorkerId(3), "Aoife", BTreeSet::new(), vec![window, window]);

        let worker = worker.with_availability(vec![window]);

        assert_eq!(worker.availability().len(), 1);
        assert_eq!(worker.name(), "Aoife");
        assert_eq!(*worker.id(), WorkerId(3));
    }

    #[test]
    fn test_worker_record_deserializes_missing_late()
    {
        let json = r#"{
            "id": 7,
            "name": "Ciarán",
            "roles": ["ICA", "Lifeguard"],
            "availability": [{"start": "2024-06-01T09:00:00+01:00", "end": "2024-06-01T17:00:00+01:00"}]
        }"#;

        let record: WorkerRecord = serde_json::from_str(json).unwrap();

        assert_eq!(record.id, WorkerId(7));
        assert_eq!(record.availability[0].late, None);
        assert!(record.roles().contains(&Role("ICA".to_string())));
    }
}
