use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, de::DeserializeOwned};

use crate::model::{AirQuality, Conditions, TrackedCity};

use super::{ConditionsSource, Geocoder};

const CURRENT_FIELDS: &str = "temperature_2m,weather_code,wind_speed_10m,relative_humidity_2m";

#[derive(Debug, Clone)]
pub struct OpenMeteoGeocoder {
    url: String,
    language: String,
    http: Client,
}

impl OpenMeteoGeocoder {
    pub fn new(url: String, language: String) -> Self {
        Self { url, language, http: Client::new() }
    }
}

#[derive(Debug, Deserialize)]
struct GeoResponse {
    results: Option<Vec<GeoResult>>,
}

#[derive(Debug, Deserialize)]
struct GeoResult {
    name: String,
    latitude: f64,
    longitude: f64,
}

#[async_trait]
impl Geocoder for OpenMeteoGeocoder {
    async fn resolve(&self, query: &str) -> Result<Option<TrackedCity>> {
        tracing::debug!(query, "geocoding");

        let parsed: GeoResponse = get_json(
            &self.http,
            &self.url,
            &[
                ("name", query),
                ("count", "1"),
                ("language", self.language.as_str()),
                ("format", "json"),
            ],
            "geocoding",
        )
        .await?;

        let first = parsed.results.and_then(|r| r.into_iter().next());
        Ok(first.map(|g| TrackedCity::new(g.name, g.latitude, g.longitude)))
    }
}

#[derive(Debug, Clone)]
pub struct OpenMeteoConditions {
    forecast_url: String,
    air_quality_url: String,
    http: Client,
}

impl OpenMeteoConditions {
    pub fn new(forecast_url: String, air_quality_url: String) -> Self {
        Self { forecast_url, air_quality_url, http: Client::new() }
    }

    async fn fetch_current(&self, lat: &str, lon: &str) -> Result<OmCurrent> {
        let parsed: OmForecastResponse = get_json(
            &self.http,
            &self.forecast_url,
            &[
                ("latitude", lat),
                ("longitude", lon),
                ("current", CURRENT_FIELDS),
                ("timezone", "auto"),
            ],
            "forecast",
        )
        .await?;

        Ok(parsed.current)
    }

    async fn fetch_air_quality(&self, lat: &str, lon: &str) -> Result<AirQuality> {
        let parsed: OmAirQualityResponse = get_json(
            &self.http,
            &self.air_quality_url,
            &[("latitude", lat), ("longitude", lon), ("hourly", "us_aqi"), ("timezone", "auto")],
            "air quality",
        )
        .await?;

        let first = parsed.hourly.and_then(|h| h.us_aqi).and_then(|series| series.into_iter().next());
        Ok(AirQuality::from(first.flatten()))
    }
}

#[derive(Debug, Deserialize)]
struct OmCurrent {
    temperature_2m: f64,
    relative_humidity_2m: f64,
    weather_code: i32,
    wind_speed_10m: f64,
}

#[derive(Debug, Deserialize)]
struct OmForecastResponse {
    current: OmCurrent,
}

#[derive(Debug, Deserialize)]
struct OmHourly {
    us_aqi: Option<Vec<Option<f64>>>,
}

#[derive(Debug, Deserialize)]
struct OmAirQualityResponse {
    hourly: Option<OmHourly>,
}

#[async_trait]
impl ConditionsSource for OpenMeteoConditions {
    async fn fetch(&self, latitude: f64, longitude: f64) -> Result<Conditions> {
        let lat = latitude.to_string();
        let lon = longitude.to_string();
        tracing::debug!(%lat, %lon, "fetching conditions");

        let (current, air_quality) =
            tokio::try_join!(self.fetch_current(&lat, &lon), self.fetch_air_quality(&lat, &lon))?;

        Ok(Conditions {
            temperature_c: current.temperature_2m,
            humidity_pct: current.relative_humidity_2m,
            wind_speed_kmh: current.wind_speed_10m,
            weather_code: current.weather_code,
            air_quality,
        })
    }
}

async fn get_json<T: DeserializeOwned>(
    http: &Client,
    url: &str,
    query: &[(&str, &str)],
    what: &str,
) -> Result<T> {
    let res = http
        .get(url)
        .query(query)
        .send()
        .await
        .with_context(|| format!("Failed to send request to Open-Meteo ({what})"))?;

    let status = res.status();
    let body = res
        .text()
        .await
        .with_context(|| format!("Failed to read Open-Meteo {what} response body"))?;

    if !status.is_success() {
        return Err(anyhow!(
            "Open-Meteo {what} request failed with status {status}: {}",
            truncate_body(&body),
        ));
    }

    serde_json::from_str(&body).with_context(|| format!("Failed to parse Open-Meteo {what} JSON"))
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    match body.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &body[..idx]),
        None => body.to_string(),
    }
}
