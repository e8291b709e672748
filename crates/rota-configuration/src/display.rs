use serde::Deserialize;

// strftime patterns, rendered in `TimeZones::display`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DisplayFormats
{
    pub time_format: String,
    pub date_format: String,
}

impl Default for DisplayFormats
{
    fn default() -> Self
    {
        Self {
            time_format: "%I:%M %p".to_string(),
            date_format: "%b %d, %Y".to_string(),
        }
    }
}
