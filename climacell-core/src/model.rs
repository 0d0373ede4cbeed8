//! Response shapes for the `/weather/*` sample endpoints.
//!
//! A sample is assembled from field groups. Every shape carries
//! [`BaseFields`] and [`WeatherFields`]; all but the historical station
//! shape also carry air quality, road risk and fire index groups. Each
//! group is flattened on the wire, so a payload is a single JSON object.
//!
//! Any [`Value`] field reads as not present when it was not requested or
//! the API had no data for it:
//!
//! ```
//! use climacell_core::HourlyForecast;
//!
//! let sample: HourlyForecast = serde_json::from_str(r#"{
//!     "lat": 42.38, "lon": -71.14,
//!     "observation_time": {"value": "2020-04-12T12:00:00Z"},
//!     "temp": {"value": 10, "units": "C"}
//! }"#).unwrap();
//!
//! assert_eq!(sample.weather.temp.get_value(), (10.0, true));
//! assert_eq!(sample.weather.humidity.value(), None);
//! ```

use serde::{Deserialize, Serialize};

use crate::date::DateValue;
use crate::value::{FloatValue, IntValue, StringValue, TimeValue, Value, null_as_default};

/// Where and when a sample is from.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BaseFields {
    #[serde(default, deserialize_with = "null_as_default")]
    pub lat: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub lon: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,
    pub observation_time: DateValue,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherFields {
    #[serde(skip_serializing_if = "Value::is_absent")]
    pub temp: FloatValue,
    /// Temperature adjusted for wind chill and heat index.
    #[serde(skip_serializing_if = "Value::is_absent")]
    pub feels_like: FloatValue,
    #[serde(rename = "dewpoint", skip_serializing_if = "Value::is_absent")]
    pub dew_point: FloatValue,
    /// Relative humidity, in percent.
    #[serde(skip_serializing_if = "Value::is_absent")]
    pub humidity: FloatValue,
    #[serde(skip_serializing_if = "Value::is_absent")]
    pub wind_speed: FloatValue,
    /// Degrees clockwise from north.
    #[serde(skip_serializing_if = "Value::is_absent")]
    pub wind_direction: FloatValue,
    #[serde(skip_serializing_if = "Value::is_absent")]
    pub wind_gust: FloatValue,
    #[serde(skip_serializing_if = "Value::is_absent")]
    pub baro_pressure: FloatValue,
    #[serde(skip_serializing_if = "Value::is_absent")]
    pub precipitation: FloatValue,
    /// One of `none`, `rain`, `snow`, `ice pellets` or `freezing rain`.
    #[serde(skip_serializing_if = "Value::is_absent")]
    pub precipitation_type: StringValue,
    #[serde(skip_serializing_if = "Value::is_absent")]
    pub precipitation_probability: FloatValue,
    #[serde(skip_serializing_if = "Value::is_absent")]
    pub sunrise: TimeValue,
    #[serde(skip_serializing_if = "Value::is_absent")]
    pub sunset: TimeValue,
    #[serde(skip_serializing_if = "Value::is_absent")]
    pub visibility: FloatValue,
    #[serde(skip_serializing_if = "Value::is_absent")]
    pub cloud_cover: FloatValue,
    #[serde(skip_serializing_if = "Value::is_absent")]
    pub cloud_base: FloatValue,
    #[serde(skip_serializing_if = "Value::is_absent")]
    pub cloud_ceiling: FloatValue,
    #[serde(skip_serializing_if = "Value::is_absent")]
    pub surface_shortwave_radiation: FloatValue,
    /// e.g. `new_moon`, `first_quarter`, `full`, `waning_crescent`.
    #[serde(skip_serializing_if = "Value::is_absent")]
    pub moon_phase: StringValue,
    /// e.g. `rain_light`, `fog`, `mostly_cloudy`, `clear`.
    #[serde(skip_serializing_if = "Value::is_absent")]
    pub weather_code: StringValue,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AirQualityFields {
    /// Particulate matter under 2.5 µm.
    #[serde(rename = "pm25", skip_serializing_if = "Value::is_absent")]
    pub pm2_5: FloatValue,
    /// Particulate matter under 10 µm.
    #[serde(skip_serializing_if = "Value::is_absent")]
    pub pm10: FloatValue,
    #[serde(skip_serializing_if = "Value::is_absent")]
    pub o3: FloatValue,
    #[serde(skip_serializing_if = "Value::is_absent")]
    pub no2: FloatValue,
    #[serde(skip_serializing_if = "Value::is_absent")]
    pub co: FloatValue,
    #[serde(skip_serializing_if = "Value::is_absent")]
    pub so2: FloatValue,
    #[serde(skip_serializing_if = "Value::is_absent")]
    pub epa_aqi: IntValue,
    #[serde(skip_serializing_if = "Value::is_absent")]
    pub epa_primary_pollutant: StringValue,
    #[serde(skip_serializing_if = "Value::is_absent")]
    pub epa_health_concern: StringValue,
    #[serde(skip_serializing_if = "Value::is_absent")]
    pub china_aqi: IntValue,
    #[serde(skip_serializing_if = "Value::is_absent")]
    pub china_primary_pollutant: StringValue,
    #[serde(skip_serializing_if = "Value::is_absent")]
    pub china_health_concern: StringValue,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RoadRiskFields {
    /// US only: `low_risk` through `extreme_risk`.
    #[serde(skip_serializing_if = "Value::is_absent")]
    pub road_risk: StringValue,
    // The three below are only reported for EU locations.
    #[serde(skip_serializing_if = "Value::is_absent")]
    pub road_risk_score: StringValue,
    /// Confidence in the road risk prediction, 1 to 100.
    #[serde(skip_serializing_if = "Value::is_absent")]
    pub road_risk_confidence: IntValue,
    #[serde(skip_serializing_if = "Value::is_absent")]
    pub road_risk_conditions: StringValue,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FireIndexFields {
    /// Fire risk on a scale of 1 to 100.
    #[serde(skip_serializing_if = "Value::is_absent")]
    pub fire_index: FloatValue,
}

macro_rules! full_sample {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
        pub struct $name {
            #[serde(flatten)]
            pub base: BaseFields,
            #[serde(flatten)]
            pub weather: WeatherFields,
            #[serde(flatten)]
            pub air_quality: AirQualityFields,
            #[serde(flatten)]
            pub road_risk: RoadRiskFields,
            #[serde(flatten)]
            pub fire_index: FireIndexFields,
        }
    };
}

full_sample!(
    /// Minute-by-minute prediction from `/weather/nowcast`, up to six hours out.
    NowCast
);

full_sample!(
    /// Hourly prediction from `/weather/forecast/hourly`, up to 96 hours out.
    HourlyForecast
);

full_sample!(
    /// Present-time observation from `/weather/realtime`.
    RealTime
);

full_sample!(
    /// Past model data from `/weather/historical/climacell`.
    HistoricalClimaCell
);

/// Past station observation from `/weather/historical/station`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HistoricalStation {
    #[serde(flatten)]
    pub base: BaseFields,
    #[serde(flatten)]
    pub weather: WeatherFields,
}
