//! Optional, unit-tagged field values as they appear in API payloads.
//!
//! Every measurement the API returns is wrapped in an object like
//! `{"value": 10.5, "units": "C"}`. A field can be missing from the payload
//! entirely (it was not requested), present with a `null` (no data for that
//! time and place), or present with a value. [`Value`] keeps those three
//! cases apart while offering accessors that collapse the two "no data"
//! cases into one.
//!
//! ```
//! use climacell_core::FloatValue;
//!
//! let temp: FloatValue = serde_json::from_str(r#"{"value": 15.1, "units": "C"}"#).unwrap();
//! assert_eq!(temp.value(), Some(&15.1));
//! assert_eq!(temp.units(), Some("C"));
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A field that may be absent, `null`, or populated.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<T> {
    /// The key did not appear in the payload.
    Absent,
    /// The key appeared but carried no data.
    Null { units: String },
    /// The key appeared with data.
    Present { value: T, units: String },
}

pub type StringValue = Value<String>;
pub type FloatValue = Value<f64>;
pub type IntValue = Value<i64>;
pub type TimeValue = Value<DateTime<Utc>>;

impl<T> Default for Value<T> {
    fn default() -> Self {
        Value::Absent
    }
}

impl<T> Value<T> {
    /// A populated value without units.
    pub fn new(value: T) -> Self {
        Value::Present {
            value,
            units: String::new(),
        }
    }

    pub fn with_units(value: T, units: impl Into<String>) -> Self {
        Value::Present {
            value,
            units: units.into(),
        }
    }

    /// Returns the value if one is present, `None` when the field was absent or null.
    pub fn value(&self) -> Option<&T> {
        match self {
            Value::Present { value, .. } => Some(value),
            Value::Absent | Value::Null { .. } => None,
        }
    }

    /// Returns the value together with a presence flag, substituting
    /// `T::default()` when there is no data.
    pub fn get_value(&self) -> (T, bool)
    where
        T: Clone + Default,
    {
        match self.value() {
            Some(value) => (value.clone(), true),
            None => (T::default(), false),
        }
    }

    /// Units of measure reported alongside the field. `Some("")` means the
    /// field was present without a `units` key; `None` means the field itself
    /// was absent.
    pub fn units(&self) -> Option<&str> {
        match self {
            Value::Absent => None,
            Value::Null { units } | Value::Present { units, .. } => Some(units),
        }
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            Value::Present { value, .. } => Some(value),
            Value::Absent | Value::Null { .. } => None,
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Value::Absent)
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null { .. })
    }

    pub fn is_present(&self) -> bool {
        matches!(self, Value::Present { .. })
    }
}

/// Reads a `null` as the type's default, e.g. `"lat": null` as `0.0`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Deserialize)]
struct WireValue<T> {
    #[serde(default = "Option::default")]
    value: Option<T>,
    #[serde(default)]
    units: String,
}

#[derive(Serialize)]
struct WireValueRef<'a, T> {
    value: Option<&'a T>,
    #[serde(skip_serializing_if = "is_empty")]
    units: &'a str,
}

fn is_empty(units: &&str) -> bool {
    units.is_empty()
}

// A missing key never reaches this impl: containing structs default the
// field to `Value::Absent`.
impl<'de, T> Deserialize<'de> for Value<T>
where
    T: Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let wire = Option::<WireValue<T>>::deserialize(deserializer)?;

        Ok(match wire {
            None => Value::Null {
                units: String::new(),
            },
            Some(WireValue { value: None, units }) => Value::Null { units },
            Some(WireValue {
                value: Some(value),
                units,
            }) => Value::Present { value, units },
        })
    }
}

impl<T> Serialize for Value<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Value::Absent => serializer.serialize_none(),
            Value::Null { units } => WireValueRef::<T> { value: None, units }.serialize(serializer),
            Value::Present { value, units } => WireValueRef {
                value: Some(value),
                units,
            }
            .serialize(serializer),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[derive(Debug, Default, Deserialize, Serialize)]
    #[serde(default)]
    struct Sample {
        #[serde(skip_serializing_if = "Value::is_absent")]
        name: StringValue,
        #[serde(skip_serializing_if = "Value::is_absent")]
        temp: FloatValue,
        #[serde(skip_serializing_if = "Value::is_absent")]
        aqi: IntValue,
        #[serde(skip_serializing_if = "Value::is_absent")]
        sunrise: TimeValue,
    }

    #[test]
    fn absent_fields_report_no_value() {
        let s: Sample = serde_json::from_str("{}").unwrap();

        assert!(s.name.is_absent());
        assert_eq!(s.name.get_value(), (String::new(), false));
        assert_eq!(s.temp.get_value(), (0.0, false));
        assert_eq!(s.aqi.get_value(), (0, false));
        assert!(!s.sunrise.get_value().1);
        assert_eq!(s.temp.units(), None);
    }

    #[test]
    fn null_inner_value_is_not_present() {
        let s: Sample = serde_json::from_str(
            r#"{
                "name": {"value": null},
                "temp": {"value": null, "units": "C"},
                "aqi": {"value": null},
                "sunrise": {"value": null}
            }"#,
        )
        .unwrap();

        assert!(s.name.is_null());
        assert_eq!(s.name.value(), None);
        assert_eq!(s.temp.get_value(), (0.0, false));
        assert_eq!(s.temp.units(), Some("C"));
        assert_eq!(s.aqi.get_value(), (0, false));
        assert_eq!(s.sunrise.value(), None);
    }

    #[test]
    fn null_field_is_not_present() {
        let s: Sample = serde_json::from_str(r#"{"temp": null, "aqi": null}"#).unwrap();

        assert!(s.temp.is_null());
        assert_eq!(s.temp.get_value(), (0.0, false));
        assert_eq!(s.temp.units(), Some(""));
        assert_eq!(s.aqi.get_value(), (0, false));
    }

    #[test]
    fn populated_fields_carry_value_and_units() {
        let s: Sample = serde_json::from_str(
            r#"{
                "name": {"value": "rain"},
                "temp": {"value": 10, "units": "C"},
                "aqi": {"value": 25},
                "sunrise": {"value": "2020-04-12T12:34:56Z"}
            }"#,
        )
        .unwrap();

        assert_eq!(s.name.get_value(), ("rain".to_string(), true));
        assert_eq!(s.name.units(), Some(""));
        assert_eq!(s.temp.get_value(), (10.0, true));
        assert_eq!(s.temp.units(), Some("C"));
        assert_eq!(s.aqi.value(), Some(&25));
        assert_eq!(
            s.sunrise.value(),
            Some(&Utc.with_ymd_and_hms(2020, 4, 12, 12, 34, 56).unwrap())
        );
    }

    #[test]
    fn serializes_in_wire_layout() {
        let s = Sample {
            temp: Value::with_units(15.1, "C"),
            aqi: Value::Null {
                units: String::new(),
            },
            ..Default::default()
        };

        let json = serde_json::to_value(&s).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "temp": {"value": 15.1, "units": "C"},
                "aqi": {"value": null}
            })
        );
    }

    #[test]
    fn wrong_value_type_fails() {
        let res: Result<Sample, _> = serde_json::from_str(r#"{"aqi": {"value": "many"}}"#);
        assert!(res.is_err());
    }
}
