use chrono::DateTime;
use chrono::FixedOffset;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// Read access to the bounds of an availability window.
///
/// Both the typed [`TimeWindow`] and the raw [`TimeWindowRecord`] implement
/// this, so the classifier can run over either. A bound that cannot be
/// parsed is reported as `None` and the caller decides what to skip.
pub trait WindowBounds
{
    fn start(&self) -> Option<DateTime<Utc>>;

    fn end(&self) -> Option<DateTime<Utc>>;

    fn is_late(&self) -> bool;

    fn to_time_window(&self) -> Option<TimeWindow>
    {
        Some(TimeWindow::new(self.start()?, self.end()?, self.is_late()))
    }
}

#[derive(PartialEq, Eq, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TimeWindow
{
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    late: bool,
}

impl TimeWindow
{
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, late: bool) -> Self
    {
        Self { start, end, late }
    }

    pub fn start(&self) -> &DateTime<Utc>
    {
        &self.start
    }

    pub fn end(&self) -> &DateTime<Utc>
    {
        &self.end
    }

    pub fn late(&self) -> bool
    {
        self.late
    }

    pub fn has_ended_before(&self, now: &DateTime<Utc>) -> bool
    {
        self.end < *now
    }
}

impl WindowBounds for TimeWindow
{
    fn start(&self) -> Option<DateTime<Utc>>
    {
        Some(self.start)
    }

    fn end(&self) -> Option<DateTime<Utc>>
    {
        Some(self.end)
    }

    fn is_late(&self) -> bool
    {
        self.late
    }
}

/// A window as it is stored by the roster and delivered by the data source.
///
/// Timestamps are kept as the strings they arrived as. Nothing is validated
/// until the window is parsed into a [`TimeWindow`].
#[derive(PartialEq, Eq, Debug, Clone, Serialize, Deserialize)]
pub struct TimeWindowRecord
{
    pub start: String,
    pub end: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub late: Option<bool>,
}

#[derive(Debug, Error)]
pub enum TimeWindowParseError
{
    #[error("invalid start timestamp {value:?}: {source}")]
    Start
    {
        value: String,
        source: chrono::ParseError,
    },
    #[error("invalid end timestamp {value:?}: {source}")]
    End
    {
        value: String,
        source: chrono::ParseError,
    },
}

impl TimeWindowRecord
{
    pub fn new(start: impl Into<String>, end: impl Into<String>, late: Option<bool>) -> Self
    {
        Self {
            start: start.into(),
            end: end.into(),
            late,
        }
    }

    pub fn parse(&self) -> Result<TimeWindow, TimeWindowParseError>
    {
        let (start, end) = self.parse_with_offsets()?;
        Ok(TimeWindow::new(
            start.with_timezone(&Utc),
            end.with_timezone(&Utc),
            self.late.unwrap_or(false),
        ))
    }

    /// Rewrites both timestamps in RFC 3339, keeping their original offsets,
    /// and makes the `late` flag explicit.
    pub fn normalized(&self) -> Result<TimeWindowRecord, TimeWindowParseError>
    {
        let (start, end) = self.parse_with_offsets()?;
        Ok(TimeWindowRecord {
            start: start.to_rfc3339(),
            end: end.to_rfc3339(),
            late: Some(self.late.unwrap_or(false)),
        })
    }

    /// Calendar date of the start, in the offset the start was written with.
    pub fn start_date(&self) -> Option<NaiveDate>
    {
        parse_timestamp(&self.start).ok().map(|start| start.date_naive())
    }

    fn parse_with_offsets(
        &self,
    ) -> Result<(DateTime<FixedOffset>, DateTime<FixedOffset>), TimeWindowParseError>
    {
        let start = parse_timestamp(&self.start).map_err(|source| TimeWindowParseError::Start {
            value: self.start.clone(),
            source,
        })?;
        let end = parse_timestamp(&self.end).map_err(|source| TimeWindowParseError::End {
            value: self.end.clone(),
            source,
        })?;
        Ok((start, end))
    }
}

impl WindowBounds for TimeWindowRecord
{
    fn start(&self) -> Option<DateTime<Utc>>
    {
        parse_timestamp(&self.start)
            .ok()
            .map(|start| start.with_timezone(&Utc))
    }

    fn end(&self) -> Option<DateTime<Utc>>
    {
        parse_timestamp(&self.end)
            .ok()
            .map(|end| end.with_timezone(&Utc))
    }

    fn is_late(&self) -> bool
    {
        self.late.unwrap_or(false)
    }
}

impl From<&TimeWindow> for TimeWindowRecord
{
    fn from(value: &TimeWindow) -> Self
    {
        TimeWindowRecord {
            start: value.start.to_rfc3339(),
            end: value.end.to_rfc3339(),
            late: Some(value.late),
        }
    }
}

/// Parses an ISO-8601 timestamp.
///
/// Timestamps with an offset are taken as written. A date-time without an
/// offset, or a bare date, is read as UTC.
pub fn parse_timestamp(value: &str) -> Result<DateTime<FixedOffset>, chrono::ParseError>
{
    let value = value.trim();
    let rfc3339_error = match DateTime::parse_from_rfc3339(value) {
        Ok(date_time) => return Ok(date_time),
        Err(error) => error,
    };

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(naive.and_utc().fixed_offset());
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date.and_time(chrono::NaiveTime::MIN).and_utc().fixed_offset());
    }

    Err(rfc3339_error)
}

#[cfg(test)]
mod tests
{
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_parse_timestamp_with_offset()
    {
        let parsed = parse_timestamp("2024-06-01T09:00:00+01:00").unwrap();

        assert_eq!(
            parsed.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_parse_timestamp_without_offset_is_utc()
    {
        let parsed = parse_timestamp("2024-06-01T09:00:00").unwrap();

        assert_eq!(
            parsed.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2024, 6, 1, 9, 0, 0).unwrap()
        );
        assert!(parse_timestamp("2024-06-01").is_ok());
    }

    #[test]
    fn test_parse_timestamp_rejects_garbage()
    {
        assert!(parse_timestamp("not-a-date").is_err());
        assert!(parse_timestamp("").is_err());
    }

    #[test]
    fn test_record_parse_defaults_late_to_false()
    {
        let record = TimeWindowRecord::new("2024-06-01T09:00:00Z", "2024-06-01T11:00:00Z", None);

        let window = record.parse().unwrap();

        assert!(!window.late());
        assert_eq!(
            *window.end(),
            Utc.with_ymd_and_hms(2024, 6, 1, 11, 0, 0).unwrap()
        );
    }

    #[test]
    fn test_record_parse_reports_the_failing_bound()
    {
        let record = TimeWindowRecord::new("2024-06-01T09:00:00Z", "later", Some(true));

        match record.parse() {
            Err(TimeWindowParseError::End { value, .. }) => assert_eq!(value, "later"),
            other => panic!("expected an end parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_record_bounds_skip_unparsable_start()
    {
        let record = TimeWindowRecord::new("not-a-date", "2024-06-01T11:00:00Z", None);

        assert_eq!(WindowBounds::start(&record), None);
        assert!(WindowBounds::end(&record).is_some());
        assert_eq!(record.to_time_window(), None);
    }

    #[test]
    fn test_normalized_keeps_offset()
    {
        let record = TimeWindowRecord::new("2024-06-01T09:00:00+01:00", "2024-06-01 17:30:00", None);

        let normalized = record.normalized().unwrap();

        assert_eq!(normalized.start, "2024-06-01T09:00:00+01:00");
        assert_eq!(normalized.end, "2024-06-01T17:30:00+00:00");
        assert_eq!(normalized.late, Some(false));
    }
}
