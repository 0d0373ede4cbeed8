use std::convert::TryFrom;

use crate::error::ClimaCellError;

/// The weather endpoints this client can call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    NowCast,
    HourlyForecast,
    DailyForecast,
    HistoricalStation,
    HistoricalClimaCell,
    RealTime,
}

impl Endpoint {
    /// Short name, as accepted by `TryFrom<&str>`.
    pub fn as_str(&self) -> &'static str {
        match self {
            Endpoint::NowCast => "nowcast",
            Endpoint::HourlyForecast => "hourly",
            Endpoint::DailyForecast => "daily",
            Endpoint::HistoricalStation => "historical-station",
            Endpoint::HistoricalClimaCell => "historical-climacell",
            Endpoint::RealTime => "realtime",
        }
    }

    /// Path relative to the API root.
    pub fn path(&self) -> &'static str {
        match self {
            Endpoint::NowCast => "weather/nowcast",
            Endpoint::HourlyForecast => "weather/forecast/hourly",
            Endpoint::DailyForecast => "weather/forecast/daily",
            Endpoint::HistoricalStation => "weather/historical/station",
            Endpoint::HistoricalClimaCell => "weather/historical/climacell",
            Endpoint::RealTime => "weather/realtime",
        }
    }

    pub const fn all() -> &'static [Endpoint] {
        &[
            Endpoint::NowCast,
            Endpoint::HourlyForecast,
            Endpoint::DailyForecast,
            Endpoint::HistoricalStation,
            Endpoint::HistoricalClimaCell,
            Endpoint::RealTime,
        ]
    }

    pub(crate) fn names() -> String {
        Self::all()
            .iter()
            .map(Endpoint::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Endpoint {
    type Error = ClimaCellError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let lower = value.to_lowercase();

        Self::all()
            .iter()
            .copied()
            .find(|e| e.as_str() == lower)
            .ok_or_else(|| ClimaCellError::UnknownEndpoint(value.to_string()))
    }
}
