use std::str::FromStr;

use chrono::DateTime;
use chrono::LocalResult;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::NaiveTime;
use chrono::Offset;
use chrono::TimeDelta;
use chrono::TimeZone;
use chrono::Utc;
use chrono_tz::Tz;
use regex::Regex;
use serde::Deserialize;
use serde::Serialize;
use thiserror::Error;

/// Hyphen, en dash and em dash all separate the two ends of a time range.
pub const DASH_PATTERN: &str = r"[-–—]";

/// The calendar day containing a reference instant, as seen in a time zone.
///
/// The bounds are the first and the last millisecond of that local day,
/// `[00:00:00.000, 23:59:59.999]`, converted to UTC.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ReferenceDay
{
    date: NaiveDate,
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl ReferenceDay
{
    pub fn containing(now: &DateTime<Utc>, time_zone: &Tz) -> Self
    {
        let date = now.with_timezone(time_zone).date_naive();
        let first_instant = date.and_time(NaiveTime::MIN);
        let last_instant = first_instant + TimeDelta::days(1) - TimeDelta::milliseconds(1);

        Self {
            date,
            start: resolve_local(time_zone, first_instant, Resolve::Earliest),
            end: resolve_local(time_zone, last_instant, Resolve::Latest),
        }
    }

    pub fn date(&self) -> &NaiveDate
    {
        &self.date
    }

    pub fn start(&self) -> &DateTime<Utc>
    {
        &self.start
    }

    pub fn end(&self) -> &DateTime<Utc>
    {
        &self.end
    }

    pub fn overlaps(&self, start: &DateTime<Utc>, end: &DateTime<Utc>) -> bool
    {
        *start <= self.end && *end >= self.start
    }
}

#[derive(Clone, Copy)]
enum Resolve
{
    Earliest,
    Latest,
}

fn resolve_local(time_zone: &Tz, naive: NaiveDateTime, resolve: Resolve) -> DateTime<Utc>
{
    match time_zone.from_local_datetime(&naive) {
        LocalResult::Single(date_time) => date_time.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, latest) => match resolve {
            Resolve::Earliest => earliest.with_timezone(&Utc),
            Resolve::Latest => latest.with_timezone(&Utc),
        },
        // The local time falls in a DST gap. Use the offset in force at the
        // equivalent UTC instant.
        LocalResult::None => {
            let offset = time_zone.offset_from_utc_datetime(&naive).fix();
            let utc = naive - TimeDelta::seconds(i64::from(offset.local_minus_utc()));
            Utc.from_utc_datetime(&utc)
        }
    }
}

/// Places a wall-clock time on a date in the given zone.
pub fn local_instant(date: NaiveDate, time: NaiveTime, time_zone: &Tz) -> DateTime<Tz>
{
    resolve_local(time_zone, date.and_time(time), Resolve::Earliest).with_timezone(time_zone)
}

/// A start and end time of day, as typed into the availability sheet.
#[derive(PartialEq, Eq, Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TimeRange
{
    pub start: NaiveTime,
    pub end: NaiveTime,
}

#[derive(Debug, Error)]
pub enum TimeRangeError
{
    #[error("unrecognized time range: {0:?}")]
    Unrecognized(String),
    #[error("invalid time {value:?} in range: {source}")]
    InvalidTime
    {
        value: String,
        source: chrono::ParseError,
    },
    #[error(transparent)]
    Pattern(#[from] regex::Error),
}

impl FromStr for TimeRange
{
    type Err = TimeRangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err>
    {
        let s = s.trim();

        let twenty_four_hour = Regex::new(&format!(
            r"(\d{{1,2}}:\d{{2}})\s*{DASH_PATTERN}\s*(\d{{1,2}}:\d{{2}})"
        ))?;
        if let Some(captures) = twenty_four_hour.captures(s) {
            return Ok(TimeRange {
                start: parse_clock(&captures[1], "%H:%M")?,
                end: parse_clock(&captures[2], "%H:%M")?,
            });
        }

        let twelve_hour = Regex::new(&format!(
            r"(\d{{1,2}}:\d{{2}}\s*[APap][Mm])\s*{DASH_PATTERN}\s*(\d{{1,2}}:\d{{2}}\s*[APap][Mm])"
        ))?;
        if let Some(captures) = twelve_hour.captures(s) {
            return Ok(TimeRange {
                start: parse_clock(&captures[1], "%I:%M%p")?,
                end: parse_clock(&captures[2], "%I:%M%p")?,
            });
        }

        Err(TimeRangeError::Unrecognized(s.to_string()))
    }
}

fn parse_clock(value: &str, format: &str) -> Result<NaiveTime, TimeRangeError>
{
    let compact: String = value
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_uppercase();

    NaiveTime::parse_from_str(&compact, format).map_err(|source| TimeRangeError::InvalidTime {
        value: value.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests
{
    use chrono_tz::Europe::Dublin;
    use chrono_tz::Europe::London;

    use super::*;

    fn time(hour: u32, minute: u32) -> NaiveTime
    {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn test_reference_day_in_summer_time()
    {
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 10, 0, 0).unwrap();

        let day = ReferenceDay::containing(&now, &Dublin);

        assert_eq!(*day.date(), NaiveDate::from_ymd_opt(2024, 6, 1).unwrap());
        assert_eq!(*day.start(), Utc.with_ymd_and_hms(2024, 5, 31, 23, 0, 0).unwrap());
        assert_eq!(
            *day.end(),
            Utc.with_ymd_and_hms(2024, 6, 1, 22, 59, 59).unwrap() + TimeDelta::milliseconds(999)
        );
    }

    #[test]
    fn test_reference_day_uses_local_date_near_midnight()
    {
        // 23:30 UTC on the 1st is already 00:30 on the 2nd in Dublin.
        let now = Utc.with_ymd_and_hms(2024, 6, 1, 23, 30, 0).unwrap();

        let day = ReferenceDay::containing(&now, &Dublin);

        assert_eq!(*day.date(), NaiveDate::from_ymd_opt(2024, 6, 2).unwrap());
    }

    #[test]
    fn test_reference_day_overlaps()
    {
        let now = Utc.with_ymd_and_hms(2024, 1, 10, 12, 0, 0).unwrap();
        let day = ReferenceDay::containing(&now, &Dublin);

        let yesterday_evening = (
            Utc.with_ymd_and_hms(2024, 1, 9, 18, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 9, 23, 59, 59).unwrap(),
        );
        let overnight = (
            Utc.with_ymd_and_hms(2024, 1, 9, 22, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 10, 6, 0, 0).unwrap(),
        );

        assert!(!day.overlaps(&yesterday_evening.0, &yesterday_evening.1));
        assert!(day.overlaps(&overnight.0, &overnight.1));
    }

    #[test]
    fn test_local_instant_in_london()
    {
        let date = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        let instant = local_instant(date, time(8, 0), &London);

        assert_eq!(
            instant.with_timezone(&Utc),
            Utc.with_ymd_and_hms(2024, 6, 1, 7, 0, 0).unwrap()
        );
        assert_eq!(instant.to_rfc3339(), "2024-06-01T08:00:00+01:00");
    }

    #[test]
    fn test_time_range_twenty_four_hour()
    {
        let range: TimeRange = "08:00 - 16:00".parse().unwrap();
        assert_eq!(range.start, time(8, 0));
        assert_eq!(range.end, time(16, 0));

        let range: TimeRange = "9:15–17:45".parse().unwrap();
        assert_eq!(range.start, time(9, 15));
        assert_eq!(range.end, time(17, 45));
    }

    #[test]
    fn test_time_range_twelve_hour()
    {
        let range: TimeRange = "8:00 AM — 4:30 PM".parse().unwrap();
        assert_eq!(range.start, time(8, 0));
        assert_eq!(range.end, time(16, 30));

        let range: TimeRange = "10:00am-1:00pm".parse().unwrap();
        assert_eq!(range.start, time(10, 0));
        assert_eq!(range.end, time(13, 0));
    }

    #[test]
    fn test_time_range_rejects_unrecognized_input()
    {
        assert!(matches!(
            "all day".parse::<TimeRange>(),
            Err(TimeRangeError::Unrecognized(_))
        ));
        assert!(matches!(
            "25:00 - 26:00".parse::<TimeRange>(),
            Err(TimeRangeError::InvalidTime { .. })
        ));
    }
}
