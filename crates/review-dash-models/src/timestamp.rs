use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, Utc};

/// Provider-local layout, e.g. `2024-11-15 14:30:00`. Interpreted as UTC.
pub const SOURCE_LOCAL_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a review timestamp in any of the layouts providers emit:
/// `YYYY-MM-DD HH:MM:SS`, RFC 3339, or a bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(naive) = NaiveDateTime::parse_from_str(value, SOURCE_LOCAL_FORMAT) {
        return Some(naive.and_utc());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// en-GB abbreviated month names. September is `Sept`, not `Sep`.
const EN_GB_SHORT_MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sept", "Oct", "Nov", "Dec",
];

/// en-GB short date, e.g. `15 Nov 2024`.
pub fn format_display_date(value: &DateTime<Utc>) -> String {
    let month = EN_GB_SHORT_MONTHS[value.month0() as usize];
    format!("{} {} {}", value.day(), month, value.year())
}

/// Serde adapter for `RawReview::submitted_at`.
pub mod source_local {
    use super::{parse_timestamp, SOURCE_LOCAL_FORMAT};
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.format(SOURCE_LOCAL_FORMAT).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        parse_timestamp(&raw)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid review timestamp: {}", raw)))
    }
}

/// Serde adapter for optional query bounds. Accepts every layout
/// `parse_timestamp` does and writes RFC 3339.
pub mod optional {
    use super::parse_timestamp;
    use chrono::{DateTime, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(dt) => serializer.serialize_some(&dt.to_rfc3339()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(None),
            Some(raw) if raw.trim().is_empty() => Ok(None),
            Some(raw) => parse_timestamp(&raw)
                .map(Some)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {}", raw))),
        }
    }
}
