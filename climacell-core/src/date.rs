use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveTime, SecondsFormat, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{input:?} is neither an RFC 3339 timestamp nor a YYYY-MM-DD date")]
pub struct TimestampFormatError {
    pub input: String,
}

/// Parses either a full offset-qualified timestamp or a bare calendar date.
///
/// Dates are read as midnight UTC. Timestamps in other offsets are
/// normalized to UTC.
pub fn parse_time_or_date(input: &str) -> Result<DateTime<Utc>, TimestampFormatError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(input) {
        return Ok(ts.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .map(|date| date.and_time(NaiveTime::MIN).and_utc())
        .map_err(|_| TimestampFormatError {
            input: input.to_string(),
        })
}

pub(crate) fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

/// The timestamp a weather sample or daily forecast is for, sent as
/// `{"value": "..."}` in either timestamp or date layout.
///
/// The API always fills this in. A `null` decodes to an unset value, but a
/// missing key is a decode error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DateValue(Option<DateTime<Utc>>);

impl DateValue {
    pub fn new(value: DateTime<Utc>) -> Self {
        Self(Some(value))
    }

    pub fn value(&self) -> Option<DateTime<Utc>> {
        self.0
    }

    pub fn is_unset(&self) -> bool {
        self.0.is_none()
    }
}

impl From<DateTime<Utc>> for DateValue {
    fn from(value: DateTime<Utc>) -> Self {
        Self::new(value)
    }
}

#[derive(Deserialize)]
struct WireDateValue {
    #[serde(default)]
    value: Option<String>,
}

struct DateValueVisitor;

impl<'de> de::Visitor<'de> for DateValueVisitor {
    type Value = DateValue;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object with a timestamp `value`, or null")
    }

    fn visit_unit<E>(self) -> Result<DateValue, E>
    where
        E: de::Error,
    {
        Ok(DateValue(None))
    }

    fn visit_none<E>(self) -> Result<DateValue, E>
    where
        E: de::Error,
    {
        Ok(DateValue(None))
    }

    fn visit_some<D>(self, deserializer: D) -> Result<DateValue, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(self)
    }

    fn visit_map<A>(self, map: A) -> Result<DateValue, A::Error>
    where
        A: de::MapAccess<'de>,
    {
        let wire = WireDateValue::deserialize(de::value::MapAccessDeserializer::new(map))?;

        match wire.value {
            None => Ok(DateValue(None)),
            Some(s) => parse_time_or_date(&s)
                .map(DateValue::new)
                .map_err(de::Error::custom),
        }
    }
}

// Goes through `deserialize_any` rather than `deserialize_option`, so a
// missing `observation_time` key is reported instead of read as null.
impl<'de> Deserialize<'de> for DateValue {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(DateValueVisitor)
    }
}

impl Serialize for DateValue {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        #[derive(Serialize)]
        struct Wire {
            value: Option<String>,
        }

        Wire {
            value: self.0.as_ref().map(format_timestamp),
        }
        .serialize(serializer)
    }
}

/// Serde adapter for bare timestamp strings that may also be plain dates.
pub(crate) mod time_or_date {
    use super::*;

    pub fn deserialize<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        parse_time_or_date(&s).map_err(de::Error::custom)
    }

    pub fn serialize<S>(ts: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&format_timestamp(ts))
    }
}
