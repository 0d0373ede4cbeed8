use anyhow::{Context, Result};
use clap::{ArgGroup, Args, Parser, Subcommand};
use climacell_core::{
    BaseFields, Config, Endpoint, ForecastDay, Location, MinMaxSeries, RequestArgs, UnitSystem,
    Value, WeatherFields, client_from_config, parse_time_or_date,
};
use inquire::{Password, PasswordDisplayMode, Select};
use serde_json::to_string_pretty;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "climacell", version, about = "ClimaCell weather CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the API key and a default unit system.
    Configure,

    /// List the endpoints `fetch` can call.
    Endpoints,

    /// Fetch weather data for a location.
    Fetch(FetchArgs),
}

#[derive(Debug, Args)]
#[command(group(ArgGroup::new("location").required(true).args(["lat", "location_id"])))]
pub struct FetchArgs {
    /// Endpoint short name, e.g. "hourly" or "realtime".
    pub endpoint: String,

    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    pub lat: Option<f64>,

    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    pub lon: Option<f64>,

    #[arg(long)]
    pub location_id: Option<String>,

    /// Start of the time range, as an RFC 3339 timestamp or YYYY-MM-DD.
    #[arg(long)]
    pub start: Option<String>,

    /// End of the time range, as an RFC 3339 timestamp or YYYY-MM-DD.
    #[arg(long)]
    pub end: Option<String>,

    /// Minutes between samples (nowcast and historical-climacell only).
    #[arg(long)]
    pub timestep: Option<u32>,

    /// "si" or "us"; falls back to the configured unit system.
    #[arg(long)]
    pub units: Option<String>,

    /// Comma-separated field names, e.g. "temp,humidity".
    #[arg(long, value_delimiter = ',')]
    pub fields: Vec<String>,

    /// Print the decoded response as JSON.
    #[arg(long)]
    pub json: bool,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Endpoints => {
                for endpoint in Endpoint::all() {
                    println!("{:<22} /{}", endpoint.as_str(), endpoint.path());
                }
                Ok(())
            }
            Command::Fetch(args) => fetch(args).await,
        }
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = Password::new("ClimaCell API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key.trim().to_string());

    let choice = Select::new(
        "Default unit system:",
        vec!["server default", UnitSystem::Si.as_str(), UnitSystem::Us.as_str()],
    )
    .prompt()
    .context("Failed to read unit system")?;
    config.unit_system = UnitSystem::try_from(choice).ok();

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

impl FetchArgs {
    fn request_args(&self, config: &Config) -> Result<RequestArgs> {
        let location = match (&self.location_id, self.lat, self.lon) {
            (Some(id), _, _) => Location::id(id.as_str()),
            (None, Some(lat), Some(lon)) => Location::coordinates(lat, lon),
            _ => anyhow::bail!("Either --location-id or both --lat and --lon are required"),
        };

        let start = self
            .start
            .as_deref()
            .map(parse_time_or_date)
            .transpose()
            .context("Invalid --start")?;
        let end = self
            .end
            .as_deref()
            .map(parse_time_or_date)
            .transpose()
            .context("Invalid --end")?;

        let unit_system = match self.units.as_deref() {
            Some(units) => Some(UnitSystem::try_from(units)?),
            None => config.unit_system,
        };

        Ok(RequestArgs {
            location: Some(location),
            start,
            end,
            timestep: self.timestep,
            unit_system,
            fields: self.fields.clone(),
        })
    }
}

async fn fetch(args: FetchArgs) -> Result<()> {
    let config = Config::load()?;
    let client = client_from_config(&config)?;
    let endpoint = Endpoint::try_from(args.endpoint.as_str())?;
    let request = args.request_args(&config)?;
    let json = args.json;

    match endpoint {
        Endpoint::NowCast => {
            let samples = client.nowcast(&request).await?;
            print_all(&samples, json, |s| sample_line(&s.base, &s.weather))
        }
        Endpoint::HourlyForecast => {
            let samples = client.hourly_forecast(&request).await?;
            print_all(&samples, json, |s| sample_line(&s.base, &s.weather))
        }
        Endpoint::HistoricalStation => {
            let samples = client.historical_station(&request).await?;
            print_all(&samples, json, |s| sample_line(&s.base, &s.weather))
        }
        Endpoint::HistoricalClimaCell => {
            let samples = client.historical_climacell(&request).await?;
            print_all(&samples, json, |s| sample_line(&s.base, &s.weather))
        }
        Endpoint::RealTime => {
            let sample = client.realtime(&request).await?;
            if json {
                println!("{}", to_string_pretty(&sample)?);
            } else {
                println!("{}", sample_line(&sample.base, &sample.weather));
            }
            Ok(())
        }
        Endpoint::DailyForecast => {
            let days = client.daily_forecast(&request).await?;
            print_all(&days, json, day_line)
        }
    }
}

fn print_all<T>(items: &[T], json: bool, line: impl Fn(&T) -> String) -> Result<()>
where
    T: serde::Serialize,
{
    if json {
        println!("{}", to_string_pretty(items)?);
        return Ok(());
    }

    if items.is_empty() {
        println!("No data returned.");
    }
    for item in items {
        println!("{}", line(item));
    }
    Ok(())
}

fn sample_line(base: &BaseFields, weather: &WeatherFields) -> String {
    let when = base
        .observation_time
        .value()
        .map(|t| t.format("%Y-%m-%d %H:%M UTC").to_string())
        .unwrap_or_else(|| "unknown time".to_string());

    let mut parts = vec![when];
    push_measure(&mut parts, "temp", &weather.temp);
    push_measure(&mut parts, "feels like", &weather.feels_like);
    push_measure(&mut parts, "humidity", &weather.humidity);
    push_measure(&mut parts, "wind", &weather.wind_speed);
    push_measure(&mut parts, "precipitation", &weather.precipitation);
    if let Some(code) = weather.weather_code.value() {
        parts.push(code.clone());
    }

    parts.join("  ")
}

fn day_line(day: &ForecastDay) -> String {
    let when = day
        .observation_time
        .value()
        .map(|t| t.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "unknown day".to_string());

    let mut parts = vec![when];
    push_range(&mut parts, "temp", &day.temp);
    push_range(&mut parts, "feels like", &day.feels_like);
    push_range(&mut parts, "humidity", &day.humidity);
    push_range(&mut parts, "wind", &day.wind_speed);
    push_measure(
        &mut parts,
        "precipitation chance",
        &day.precipitation_probability,
    );
    if let Some(code) = day.weather_code.value() {
        parts.push(code.clone());
    }

    parts.join("  ")
}

fn push_measure(parts: &mut Vec<String>, label: &str, value: &Value<f64>) {
    if let Some(v) = value.value() {
        parts.push(format!("{label} {v} {}", value.units().unwrap_or_default()).trim_end().to_string());
    }
}

fn push_range(parts: &mut Vec<String>, label: &str, series: &MinMaxSeries) {
    let low = series.min().and_then(|m| m.value());
    let high = series.max().and_then(|m| m.value());
    let units = series
        .min()
        .or_else(|| series.max())
        .and_then(|m| m.units().map(str::to_string))
        .unwrap_or_default();

    let text = match (low, high) {
        (Some(low), Some(high)) => format!("{label} {low}..{high} {units}"),
        (Some(low), None) => format!("{label} min {low} {units}"),
        (None, Some(high)) => format!("{label} max {high} {units}"),
        (None, None) => return,
    };
    parts.push(text.trim_end().to_string());
}
