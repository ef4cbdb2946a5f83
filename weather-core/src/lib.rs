//! Core library for the `weatherdash` terminal dashboard.
//!
//! This crate defines:
//! - Configuration handling
//! - The persisted list of tracked cities and its storage backends
//! - Clients for geocoding, current weather and air quality (Open-Meteo)
//! - Mapping of weather codes and AQI values to card text
//! - The dashboard controller that drives a [`Renderer`]
//!
//! Nothing here touches the terminal, so every piece can be tested without one.

pub mod board;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod model;
pub mod presentation;
pub mod provider;
pub mod render;
pub mod store;

pub use board::{Board, Card, CardPhase, CardView};
pub use config::Config;
pub use dashboard::{Dashboard, Replay};
pub use error::{DashboardError, StoreError};
pub use model::{AirQuality, Conditions, ConditionsSnapshot, TrackedCity};
pub use provider::{ConditionsSource, Geocoder};
pub use render::Renderer;
pub use store::{CityStore, FileStore, KeyValueStore, MemoryStore};
