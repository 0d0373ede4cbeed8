//! Daily minimum/maximum series.
//!
//! The daily forecast endpoint reports each metric as a list of timestamped
//! records, each carrying one side of the day's range:
//!
//! ```json
//! [
//!   {"observation_time": "2020-05-01T00:00:00Z", "min": {"value": 11.23, "units": "C"}},
//!   {"observation_time": "2020-05-01T01:00:00Z", "max": {"value": 23.58, "units": "C"}}
//! ]
//! ```
//!
//! [`MinMaxSeries::min`] and [`MinMaxSeries::max`] look up each side on its
//! own, so the low and the high keep their own observation times.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::date::time_or_date;
use crate::value::{FloatValue, Value, null_as_default};

/// One timestamped entry of a [`MinMaxSeries`].
///
/// `"min": null` decodes to an absent side, unlike `"min": {"value": null}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MinMaxRecord {
    #[serde(with = "time_or_date")]
    pub observation_time: DateTime<Utc>,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Value::is_absent"
    )]
    pub min: FloatValue,
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Value::is_absent"
    )]
    pub max: FloatValue,
}

impl MinMaxRecord {
    pub fn min(observation_time: DateTime<Utc>, min: FloatValue) -> Self {
        Self {
            observation_time,
            min,
            max: Value::Absent,
        }
    }

    pub fn max(observation_time: DateTime<Utc>, max: FloatValue) -> Self {
        Self {
            observation_time,
            min: Value::Absent,
            max,
        }
    }
}

/// One side of a daily range: when it occurs and its value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatAtTime<'a> {
    pub observation_time: DateTime<Utc>,
    pub value: &'a FloatValue,
}

impl FloatAtTime<'_> {
    pub fn value(&self) -> Option<f64> {
        self.value.value().copied()
    }

    pub fn get_value(&self) -> (f64, bool) {
        self.value.get_value()
    }

    pub fn units(&self) -> Option<&str> {
        self.value.units()
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct MinMaxSeries(Vec<MinMaxRecord>);

impl MinMaxSeries {
    pub fn new(records: Vec<MinMaxRecord>) -> Self {
        Self(records)
    }

    pub fn records(&self) -> &[MinMaxRecord] {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// The first record, in payload order, that carries a `min` object.
    ///
    /// `"min": null` is skipped. `"min": {"value": null}` still counts, and
    /// its value then reads as not present.
    pub fn min(&self) -> Option<FloatAtTime<'_>> {
        self.first_side(|r| &r.min)
    }

    /// The first record, in payload order, that carries a `max` object.
    pub fn max(&self) -> Option<FloatAtTime<'_>> {
        self.first_side(|r| &r.max)
    }

    fn first_side<'a>(
        &'a self,
        side: impl Fn(&'a MinMaxRecord) -> &'a FloatValue,
    ) -> Option<FloatAtTime<'a>> {
        self.0.iter().find_map(|record| {
            let value = side(record);
            (!value.is_absent()).then_some(FloatAtTime {
                observation_time: record.observation_time,
                value,
            })
        })
    }
}

impl From<Vec<MinMaxRecord>> for MinMaxSeries {
    fn from(records: Vec<MinMaxRecord>) -> Self {
        Self(records)
    }
}

impl<'de> Deserialize<'de> for MinMaxSeries {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let records = Option::<Vec<MinMaxRecord>>::deserialize(deserializer)?;
        Ok(Self(records.unwrap_or_default()))
    }
}

impl Serialize for MinMaxSeries {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        self.0.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2020, 5, 1, hour, 0, 0).unwrap()
    }

    #[test]
    fn min_and_max_come_from_their_own_records() {
        let series: MinMaxSeries = serde_json::from_str(
            r#"[
                {"observation_time": "2020-05-01T00:00:00Z", "min": {"value": 11.23, "units": "C"}},
                {"observation_time": "2020-05-01T01:00:00Z", "max": {"value": 23.58, "units": "C"}}
            ]"#,
        )
        .unwrap();

        let min = series.min().unwrap();
        assert_eq!(min.observation_time, t(0));
        assert_eq!(min.get_value(), (11.23, true));
        assert_eq!(min.units(), Some("C"));

        let max = series.max().unwrap();
        assert_eq!(max.observation_time, t(1));
        assert_eq!(max.get_value(), (23.58, true));
    }

    #[test]
    fn empty_series_has_neither_side() {
        let series = MinMaxSeries::default();
        assert!(series.min().is_none());
        assert!(series.max().is_none());

        let from_null: MinMaxSeries = serde_json::from_str("null").unwrap();
        assert!(from_null.is_empty());
    }

    #[test]
    fn min_only_series_has_no_max() {
        let series = MinMaxSeries::new(vec![
            MinMaxRecord::min(t(3), Value::new(4.0)),
            MinMaxRecord::min(t(4), Value::new(2.0)),
        ]);

        assert_eq!(series.min().and_then(|m| m.value()), Some(4.0));
        assert!(series.max().is_none());
    }

    #[test]
    fn first_matching_record_wins() {
        let series = MinMaxSeries::new(vec![
            MinMaxRecord::max(t(0), Value::new(30.0)),
            MinMaxRecord::min(t(1), Value::new(10.0)),
            MinMaxRecord::max(t(2), Value::new(35.0)),
            MinMaxRecord::min(t(3), Value::new(5.0)),
        ]);

        let min = series.min().unwrap();
        assert_eq!((min.observation_time, min.value()), (t(1), Some(10.0)));
        let max = series.max().unwrap();
        assert_eq!((max.observation_time, max.value()), (t(0), Some(30.0)));
    }

    #[test]
    fn record_with_both_sides_serves_both() {
        let series: MinMaxSeries = serde_json::from_str(
            r#"[{"observation_time": "2020-05-01", "min": {"value": 1}, "max": {"value": 9}}]"#,
        )
        .unwrap();

        assert_eq!(series.min().and_then(|m| m.value()), Some(1.0));
        assert_eq!(series.max().and_then(|m| m.value()), Some(9.0));
        assert_eq!(series.max().unwrap().observation_time, t(0));
    }

    #[test]
    fn null_side_is_matched_but_not_present() {
        let series: MinMaxSeries = serde_json::from_str(
            r#"[
                {"observation_time": "2020-05-01T00:00:00Z", "min": {"value": null, "units": "C"}},
                {"observation_time": "2020-05-01T01:00:00Z", "min": {"value": 3.5, "units": "C"}}
            ]"#,
        )
        .unwrap();

        let min = series.min().unwrap();
        assert_eq!(min.observation_time, t(0));
        assert_eq!(min.get_value(), (0.0, false));
        assert_eq!(min.units(), Some("C"));
    }

    #[test]
    fn bare_null_side_is_skipped() {
        let series: MinMaxSeries = serde_json::from_str(
            r#"[
                {"observation_time": "2020-05-01T00:00:00Z", "min": null, "max": {"value": 9}},
                {"observation_time": "2020-05-01T01:00:00Z", "min": {"value": 3.5, "units": "C"}}
            ]"#,
        )
        .unwrap();

        assert!(series.records()[0].min.is_absent());
        let min = series.min().unwrap();
        assert_eq!(min.observation_time, t(1));
        assert_eq!(min.get_value(), (3.5, true));
        assert_eq!(series.max().unwrap().observation_time, t(0));
    }

    #[test]
    fn bad_record_timestamp_fails() {
        let res: Result<MinMaxSeries, _> =
            serde_json::from_str(r#"[{"observation_time": "soon", "min": {"value": 1}}]"#);
        assert!(res.is_err());
    }
}
