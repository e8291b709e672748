use chrono_tz::Europe::Dublin;
use chrono_tz::Europe::London;
use chrono_tz::Tz;
use serde::Deserialize;
use serde::Deserializer;
use serde::de;

#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TimeZones
{
    /// Zone whose calendar day decides whether a worker is "in today".
    #[serde(deserialize_with = "deserialize_time_zone")]
    pub reference: Tz,
    /// Zone used for every formatted time and date.
    #[serde(deserialize_with = "deserialize_time_zone")]
    pub display: Tz,
    /// Zone in which typed-in day availability is read.
    #[serde(deserialize_with = "deserialize_time_zone")]
    pub upload: Tz,
}

impl Default for TimeZones
{
    fn default() -> Self
    {
        Self {
            reference: Dublin,
            display: Dublin,
            upload: London,
        }
    }
}

fn deserialize_time_zone<'de, D>(deserializer: D) -> Result<Tz, D::Error>
where
    D: Deserializer<'de>,
{
    let time_zone: String = Deserialize::deserialize(deserializer)?;
    time_zone.parse::<Tz>().map_err(de::Error::custom)
}
