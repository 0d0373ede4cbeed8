use std::sync::Arc;

use anyhow::Context;
use log::{debug, warn};
use reqwest::{
    Method, StatusCode, Url,
    header::{ACCEPT, HeaderMap, HeaderValue},
};
use serde::de::DeserializeOwned;

use crate::{
    config::Config,
    endpoint::Endpoint,
    error::{ClimaCellError, ErrorResponse},
    forecast_day::ForecastDay,
    model::{HistoricalClimaCell, HistoricalStation, HourlyForecast, NowCast, RealTime},
    query::RequestArgs,
    transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport},
};

pub const DEFAULT_BASE_URL: &str = "https://api.climacell.co/v3/";

/// Client for the ClimaCell `/weather/*` endpoints.
///
/// Each endpoint method sends exactly one GET request. A 200 response is
/// decoded into the endpoint's shape; 400, 401, 403, 404 and 500 responses
/// come back as [`ClimaCellError::Api`]. Nothing is retried.
///
/// The client is cheap to clone and can be shared between tasks; it holds
/// no mutable state of its own.
///
/// Do not hard-code the API key: anyone holding it can make requests under
/// your account.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    api_key: HeaderValue,
    transport: Arc<dyn HttpTransport>,
}

impl Client {
    /// A client using [`ReqwestTransport`] with a one-minute timeout.
    pub fn new(api_key: &str) -> Result<Self, ClimaCellError> {
        let transport = ReqwestTransport::new().map_err(ClimaCellError::TransportInit)?;
        Self::with_transport(api_key, transport)
    }

    pub fn with_transport<T>(api_key: &str, transport: T) -> Result<Self, ClimaCellError>
    where
        T: HttpTransport + 'static,
    {
        let mut api_key = HeaderValue::from_str(api_key).map_err(ClimaCellError::InvalidApiKey)?;
        api_key.set_sensitive(true);

        Ok(Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key,
            transport: Arc::new(transport),
        })
    }

    /// Sends requests to another API root, such as a mock server. Endpoint
    /// paths are appended below it.
    pub fn with_base_url(mut self, base_url: &str) -> Result<Self, ClimaCellError> {
        let parsed = Url::parse(base_url)
            .map_err(|_| ClimaCellError::InvalidBaseUrl(base_url.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") || !parsed.has_host() {
            return Err(ClimaCellError::InvalidBaseUrl(base_url.to_string()));
        }

        self.base_url = base_url.to_string();
        if !self.base_url.ends_with('/') {
            self.base_url.push('/');
        }
        Ok(self)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Minute-by-minute predictions, up to six hours out.
    pub async fn nowcast(&self, args: &RequestArgs) -> Result<Vec<NowCast>, ClimaCellError> {
        self.get(Endpoint::NowCast, args).await
    }

    /// Hourly predictions, up to 96 hours out.
    pub async fn hourly_forecast(
        &self,
        args: &RequestArgs,
    ) -> Result<Vec<HourlyForecast>, ClimaCellError> {
        self.get(Endpoint::HourlyForecast, args).await
    }

    /// Daily predictions, up to 15 days out.
    pub async fn daily_forecast(
        &self,
        args: &RequestArgs,
    ) -> Result<Vec<ForecastDay>, ClimaCellError> {
        self.get(Endpoint::DailyForecast, args).await
    }

    /// Past observations from weather stations.
    pub async fn historical_station(
        &self,
        args: &RequestArgs,
    ) -> Result<Vec<HistoricalStation>, ClimaCellError> {
        self.get(Endpoint::HistoricalStation, args).await
    }

    /// Past ClimaCell model data, up to six hours back.
    pub async fn historical_climacell(
        &self,
        args: &RequestArgs,
    ) -> Result<Vec<HistoricalClimaCell>, ClimaCellError> {
        self.get(Endpoint::HistoricalClimaCell, args).await
    }

    /// Conditions at the present minute. Unlike the other endpoints this
    /// returns a single sample.
    pub async fn realtime(&self, args: &RequestArgs) -> Result<RealTime, ClimaCellError> {
        self.get(Endpoint::RealTime, args).await
    }

    async fn get<T>(&self, endpoint: Endpoint, args: &RequestArgs) -> Result<T, ClimaCellError>
    where
        T: DeserializeOwned,
    {
        let request = self.build_request(endpoint, args);
        debug!("GET {}", request.url);

        let response = self
            .transport
            .execute(request)
            .await
            .map_err(|source| ClimaCellError::Transport { endpoint, source })?;

        debug!(
            "{} responded with {} ({} bytes)",
            endpoint,
            response.status,
            response.body.len()
        );

        decode_response(endpoint, response)
    }

    fn build_request(&self, endpoint: Endpoint, args: &RequestArgs) -> HttpRequest {
        let mut url = format!("{}{}", self.base_url, endpoint.path());
        let query = args.query_string();
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query);
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert("apikey", self.api_key.clone());

        HttpRequest {
            method: Method::GET,
            url,
            headers,
        }
    }
}

/// Builds a client from stored settings, honouring base URL and timeout
/// overrides.
pub fn client_from_config(config: &Config) -> anyhow::Result<Client> {
    let api_key = config.resolved_api_key()?;

    let transport = ReqwestTransport::with_timeout(config.timeout())
        .context("Failed to build HTTP client")?;

    let client = Client::with_transport(&api_key, transport)?;

    match &config.base_url {
        Some(base_url) => Ok(client.with_base_url(base_url)?),
        None => Ok(client),
    }
}

fn decode_response<T>(endpoint: Endpoint, response: HttpResponse) -> Result<T, ClimaCellError>
where
    T: DeserializeOwned,
{
    let status = response.status;

    match status {
        StatusCode::OK => serde_json::from_slice(&response.body)
            .map_err(|source| ClimaCellError::Decode { endpoint, source }),
        StatusCode::BAD_REQUEST
        | StatusCode::UNAUTHORIZED
        | StatusCode::FORBIDDEN
        | StatusCode::NOT_FOUND
        | StatusCode::INTERNAL_SERVER_ERROR => {
            let mut err: ErrorResponse =
                serde_json::from_slice(&response.body).map_err(|source| {
                    ClimaCellError::ErrorDecode {
                        endpoint,
                        status,
                        source,
                    }
                })?;

            // These two statuses are documented to omit statusCode from the body.
            if matches!(status, StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN) {
                err.status_code = status.as_u16();
            }

            warn!("{endpoint} request failed: {err}");
            Err(ClimaCellError::Api(err))
        }
        _ => {
            warn!("{endpoint} returned unexpected status {status}");
            Err(ClimaCellError::UnexpectedStatus { endpoint, status })
        }
    }
}
