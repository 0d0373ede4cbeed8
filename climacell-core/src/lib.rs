//! Client library for the ClimaCell weather API.
//!
//! This crate defines:
//! - A client with one method per `/weather/*` endpoint
//! - Typed response shapes whose fields may be absent, null or populated
//! - Query encoding for locations, time ranges, units and fields
//! - A pluggable HTTP transport and on-disk configuration
//!
//! It is used by `climacell-cli`, but can also be reused by other binaries or services.
//!
//! ```no_run
//! use climacell_core::{Client, Location, RequestArgs};
//!
//! # async fn run() -> Result<(), climacell_core::ClimaCellError> {
//! let client = Client::new("my-api-key")?;
//! let args = RequestArgs::builder()
//!     .location(Location::coordinates(42.3826, -71.146))
//!     .fields(vec!["temp".into()])
//!     .build();
//!
//! for sample in client.hourly_forecast(&args).await? {
//!     if let Some(temp) = sample.weather.temp.value() {
//!         println!("{temp}");
//!     }
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod config;
pub mod date;
pub mod endpoint;
pub mod error;
pub mod forecast_day;
pub mod min_max;
pub mod model;
pub mod query;
pub mod transport;
pub mod value;

pub use client::{Client, DEFAULT_BASE_URL, client_from_config};
pub use config::Config;
pub use date::{DateValue, TimestampFormatError, parse_time_or_date};
pub use endpoint::Endpoint;
pub use error::{ClimaCellError, ErrorResponse};
pub use forecast_day::ForecastDay;
pub use min_max::{FloatAtTime, MinMaxRecord, MinMaxSeries};
pub use model::{
    AirQualityFields, BaseFields, FireIndexFields, HistoricalClimaCell, HistoricalStation,
    HourlyForecast, NowCast, RealTime, RoadRiskFields, WeatherFields,
};
pub use query::{Location, RequestArgs, UnitSystem};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport, TransportError};
pub use value::{FloatValue, IntValue, StringValue, TimeValue, Value};
