use async_trait::async_trait;
use std::fmt::Debug;

use crate::{
    Config,
    model::{Conditions, TrackedCity},
    provider::open_meteo::{OpenMeteoConditions, OpenMeteoGeocoder},
};

pub mod open_meteo;

/// Resolves free text to a canonical city name and coordinates.
#[async_trait]
pub trait Geocoder: Send + Sync + Debug {
    /// `Ok(None)` means the service had no match, which is not an error.
    async fn resolve(&self, query: &str) -> anyhow::Result<Option<TrackedCity>>;
}

/// Current readings for a coordinate pair.
#[async_trait]
pub trait ConditionsSource: Send + Sync + Debug {
    /// Both weather and air quality, or an error if either part fails.
    async fn fetch(&self, latitude: f64, longitude: f64) -> anyhow::Result<Conditions>;
}

/// Geocoder configured from `config.endpoints` and `config.language`.
pub fn geocoder_from_config(config: &Config) -> Box<dyn Geocoder> {
    Box::new(OpenMeteoGeocoder::new(
        config.endpoints.geocoding.clone(),
        config.language.clone(),
    ))
}

/// Conditions source configured from `config.endpoints`.
pub fn conditions_from_config(config: &Config) -> Box<dyn ConditionsSource> {
    Box::new(OpenMeteoConditions::new(
        config.endpoints.forecast.clone(),
        config.endpoints.air_quality.clone(),
    ))
}
