use serde::{Deserialize, Serialize};

use crate::date::DateValue;
use crate::min_max::MinMaxSeries;
use crate::value::{FloatValue, StringValue, TimeValue, Value, null_as_default};

/// A single day (6AM to 6AM) of the daily forecast from
/// `/weather/forecast/daily`.
///
/// Ranged metrics come as [`MinMaxSeries`]; read the day's high temperature
/// with:
///
/// ```
/// # use climacell_core::ForecastDay;
/// # fn high(day: &ForecastDay) -> Option<f64> {
/// day.temp.max().and_then(|max| max.value())
/// # }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ForecastDay {
    #[serde(default, deserialize_with = "null_as_default")]
    pub lat: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lon: f64,
    /// The day this forecast is for, usually sent as a bare date.
    pub observation_time: DateValue,
    #[serde(default, skip_serializing_if = "MinMaxSeries::is_empty")]
    pub temp: MinMaxSeries,
    #[serde(default, skip_serializing_if = "MinMaxSeries::is_empty")]
    pub feels_like: MinMaxSeries,
    #[serde(default, skip_serializing_if = "MinMaxSeries::is_empty")]
    pub humidity: MinMaxSeries,
    #[serde(default, skip_serializing_if = "MinMaxSeries::is_empty")]
    pub wind_speed: MinMaxSeries,
    #[serde(default, skip_serializing_if = "MinMaxSeries::is_empty")]
    pub wind_direction: MinMaxSeries,
    #[serde(default, skip_serializing_if = "MinMaxSeries::is_empty")]
    pub baro_pressure: MinMaxSeries,
    #[serde(default, skip_serializing_if = "MinMaxSeries::is_empty")]
    pub precipitation: MinMaxSeries,
    #[serde(default, skip_serializing_if = "MinMaxSeries::is_empty")]
    pub visibility: MinMaxSeries,
    #[serde(default, skip_serializing_if = "Value::is_absent")]
    pub precipitation_accumulation: FloatValue,
    #[serde(default, skip_serializing_if = "Value::is_absent")]
    pub precipitation_probability: FloatValue,
    #[serde(default, skip_serializing_if = "Value::is_absent")]
    pub sunrise: TimeValue,
    #[serde(default, skip_serializing_if = "Value::is_absent")]
    pub sunset: TimeValue,
    #[serde(default, skip_serializing_if = "Value::is_absent")]
    pub moon_phase: StringValue,
    #[serde(default, skip_serializing_if = "Value::is_absent")]
    pub weather_code: StringValue,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    // Not real data (the coordinates are out of range), but the layout the
    // API uses.
    const ALL_FIELDS: &str = r#"{
      "temp": [
        {"observation_time": "2020-05-01T00:00:00Z", "min": {"value": 11.23, "units": "C"}},
        {"observation_time": "2020-05-01T01:00:00Z", "max": {"value": 23.58, "units": "C"}}
      ],
      "precipitation_accumulation": {"value": 0.1123, "units": "in"},
      "precipitation": [
        {"observation_time": "2020-05-01T00:00:00Z", "min": {"value": 0.128, "units": "mm/hr"}},
        {"observation_time": "2020-05-01T01:00:00Z", "max": {"value": 0.250, "units": "mm/hr"}}
      ],
      "precipitation_probability": {"value": 10, "units": "%"},
      "feels_like": [
        {"observation_time": "2020-05-01T00:00:00Z", "min": {"value": 11.23, "units": "C"}},
        {"observation_time": "2020-05-01T01:00:00Z", "max": {"value": 23.58, "units": "C"}}
      ],
      "humidity": [
        {"observation_time": "2020-05-01T00:00:00Z", "min": {"value": 11, "units": "%"}},
        {"observation_time": "2020-05-01T01:00:00Z", "max": {"value": 23, "units": "%"}}
      ],
      "baro_pressure": [
        {"observation_time": "2020-05-01T00:00:00Z", "min": {"value": 70000.58, "units": "Pa"}},
        {"observation_time": "2020-05-01T01:00:00Z", "max": {"value": 75000.13, "units": "Pa"}}
      ],
      "wind_speed": [
        {"observation_time": "2020-05-01T00:00:00Z", "min": {"value": 21, "units": "beaufort"}},
        {"observation_time": "2020-05-01T01:00:00Z", "max": {"value": 34, "units": "beaufort"}}
      ],
      "wind_direction": [
        {"observation_time": "2020-05-01T00:00:00Z", "min": {"value": 55.89, "units": "degrees"}},
        {"observation_time": "2020-05-01T01:00:00Z", "max": {"value": 144.00, "units": "degrees"}}
      ],
      "visibility": [
        {"observation_time": "2020-05-01T00:00:00Z", "min": {"value": 11.23, "units": "mi"}},
        {"observation_time": "2020-05-01T01:00:00Z", "max": {"value": 58, "units": "mi"}}
      ],
      "sunrise":          {"value": "2020-05-01T11:23:58.123Z"},
      "sunset":           {"value": "2020-05-01T12:34:56.789Z"},
      "moon_phase":       {"value": "first_quarter"},
      "weather_code":     {"value": "mostly_clear"},
      "observation_time": {"value": "2020-05-01"},
      "lat":              91,
      "lon":              -181
    }"#;

    fn assert_min_max(series: &MinMaxSeries, min: Option<f64>, max: Option<f64>) {
        assert_eq!(series.min().and_then(|m| m.value()), min);
        assert_eq!(series.max().and_then(|m| m.value()), max);
    }

    #[test]
    fn decodes_all_fields() {
        let day: ForecastDay = serde_json::from_str(ALL_FIELDS).unwrap();

        assert_min_max(&day.temp, Some(11.23), Some(23.58));
        assert_min_max(&day.precipitation, Some(0.128), Some(0.250));
        assert_min_max(&day.feels_like, Some(11.23), Some(23.58));
        assert_min_max(&day.humidity, Some(11.0), Some(23.0));
        assert_min_max(&day.baro_pressure, Some(70000.58), Some(75000.13));
        assert_min_max(&day.wind_speed, Some(21.0), Some(34.0));
        assert_min_max(&day.wind_direction, Some(55.89), Some(144.0));
        assert_min_max(&day.visibility, Some(11.23), Some(58.0));

        assert_eq!(day.precipitation_accumulation.get_value(), (0.1123, true));
        assert_eq!(day.precipitation_accumulation.units(), Some("in"));
        assert_eq!(day.precipitation_probability.get_value(), (10.0, true));
        assert!(day.sunrise.is_present());
        assert!(day.sunset.is_present());
        assert_eq!(
            day.moon_phase.value().map(String::as_str),
            Some("first_quarter")
        );
        assert_eq!(
            day.weather_code.value().map(String::as_str),
            Some("mostly_clear")
        );

        assert_eq!(
            day.observation_time.value(),
            Some(Utc.with_ymd_and_hms(2020, 5, 1, 0, 0, 0).unwrap())
        );
        assert_eq!(day.lat, 91.0);
        assert_eq!(day.lon, -181.0);
    }

    #[test]
    fn range_sides_keep_their_own_times() {
        let day: ForecastDay = serde_json::from_str(ALL_FIELDS).unwrap();

        let low = day.temp.min().unwrap();
        let high = day.temp.max().unwrap();
        assert_eq!(
            low.observation_time,
            Utc.with_ymd_and_hms(2020, 5, 1, 0, 0, 0).unwrap()
        );
        assert_eq!(
            high.observation_time,
            Utc.with_ymd_and_hms(2020, 5, 1, 1, 0, 0).unwrap()
        );
        assert_eq!(high.units(), Some("C"));
    }

    #[test]
    fn missing_metrics_read_as_empty() {
        let day: ForecastDay = serde_json::from_str(
            r#"{
                "lat": 0, "lon": 0,
                "observation_time": {"value": "2020-05-01"},
                "temp": [
                    {"observation_time": "2020-05-01T06:00:00Z", "min": {"value": 3, "units": "C"}}
                ],
                "humidity": null
            }"#,
        )
        .unwrap();

        assert_min_max(&day.temp, Some(3.0), None);
        assert_min_max(&day.humidity, None, None);
        assert_min_max(&day.visibility, None, None);
        assert_eq!(day.precipitation_accumulation.get_value(), (0.0, false));
        assert_eq!(day.sunrise.value(), None);
    }

    #[test]
    fn missing_observation_time_fails() {
        let err = serde_json::from_str::<ForecastDay>(r#"{"lat": 1, "lon": 2}"#).unwrap_err();
        assert!(err.to_string().contains("observation_time"));
    }

    #[test]
    fn null_observation_time_is_unset() {
        let day: ForecastDay =
            serde_json::from_str(r#"{"lat": 1, "lon": 2, "observation_time": null}"#).unwrap();
        assert!(day.observation_time.is_unset());
    }

    #[test]
    fn null_coordinates_read_as_zero() {
        let day: ForecastDay = serde_json::from_str(
            r#"{"lat": null, "lon": null, "observation_time": {"value": "2020-05-01"}}"#,
        )
        .unwrap();
        assert_eq!((day.lat, day.lon), (0.0, 0.0));
    }

    #[test]
    fn reencodes_series() {
        let day: ForecastDay = serde_json::from_str(ALL_FIELDS).unwrap();
        let again: ForecastDay =
            serde_json::from_value(serde_json::to_value(&day).unwrap()).unwrap();
        assert_eq!(day, again);
    }
}
