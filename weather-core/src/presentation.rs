//! Maps raw service values to the text, icons and severity shown on a card.
//!
//! Band checks below are ordered and return early. The order is part of the
//! behavior: `icon_for` lets anything `<= 3` (negative codes included) match
//! the sun band, and `classify_aqi` relies on ascending checks.

use std::fmt;

use serde::Serialize;

use crate::model::{AirQuality, Conditions, ConditionsSnapshot, NOT_AVAILABLE};

/// Weather code to phrase, or `"N/A"` for codes outside the table.
pub fn describe(code: i32) -> &'static str {
    match code {
        0 => "Clear sky",
        1 => "Mainly clear",
        2 => "Partly cloudy",
        3 => "Overcast",
        45 => "Fog",
        48 => "Depositing rime fog",
        51 => "Drizzle",
        53 => "Moderate Drizzle",
        55 => "Dense Drizzle",
        61 => "Light Rain",
        63 => "Rain",
        65 => "Heavy Rain",
        71 => "Light Snow",
        73 => "Snow",
        75 => "Heavy Snow",
        80 | 81 => "Rain showers",
        82 => "Heavy rain showers",
        95 => "Thunderstorm",
        _ => NOT_AVAILABLE,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WeatherIcon {
    Sun,
    Fog,
    Rain,
    Snow,
    Thunderstorm,
    Unknown,
}

impl WeatherIcon {
    pub fn symbol(&self) -> &'static str {
        match self {
            WeatherIcon::Sun => "☀️",
            WeatherIcon::Fog => "🌫️",
            WeatherIcon::Rain => "🌧️",
            WeatherIcon::Snow => "❄️",
            WeatherIcon::Thunderstorm => "⛈️",
            WeatherIcon::Unknown => "❓",
        }
    }
}

impl fmt::Display for WeatherIcon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

#[allow(clippy::manual_range_contains)]
pub fn icon_for(code: i32) -> WeatherIcon {
    if code <= 3 {
        return WeatherIcon::Sun;
    }
    if code >= 45 && code <= 48 {
        return WeatherIcon::Fog;
    }
    if code >= 51 && code <= 55 {
        return WeatherIcon::Rain;
    }
    if (code >= 61 && code <= 65) || (code >= 80 && code <= 82) {
        return WeatherIcon::Rain;
    }
    if code >= 71 && code <= 75 {
        return WeatherIcon::Snow;
    }
    if code == 95 {
        return WeatherIcon::Thunderstorm;
    }
    WeatherIcon::Unknown
}

/// Air-quality severity band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AqiBand {
    Good,
    Moderate,
    Unhealthy,
    Hazardous,
}

impl AqiBand {
    pub fn from_index(aqi: f64) -> Option<Self> {
        if aqi <= 50.0 {
            return Some(AqiBand::Good);
        }
        if aqi <= 100.0 {
            return Some(AqiBand::Moderate);
        }
        if aqi <= 150.0 {
            return Some(AqiBand::Unhealthy);
        }
        if aqi > 150.0 {
            return Some(AqiBand::Hazardous);
        }
        // NaN falls through every comparison.
        None
    }

    pub fn color_class(&self) -> &'static str {
        match self {
            AqiBand::Good => "good",
            AqiBand::Moderate => "moderate",
            AqiBand::Unhealthy => "unhealthy",
            AqiBand::Hazardous => "hazardous",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AqiBand::Good => "Good",
            AqiBand::Moderate => "Moderate",
            AqiBand::Unhealthy => "Unhealthy",
            AqiBand::Hazardous => "Hazardous",
        }
    }
}

/// Returns `(color_class, status_label)`; `("", "N/A")` when there is no usable index.
pub fn classify_aqi(aqi: AirQuality) -> (&'static str, &'static str) {
    match aqi.index().and_then(AqiBand::from_index) {
        Some(band) => (band.color_class(), band.label()),
        None => ("", NOT_AVAILABLE),
    }
}

/// Combine a city name with freshly fetched readings.
pub fn build_snapshot(
    name: &str,
    conditions: &Conditions,
    observed_at: impl Into<String>,
) -> ConditionsSnapshot {
    ConditionsSnapshot {
        name: name.to_string(),
        temperature_c: conditions.temperature_c,
        humidity_pct: conditions.humidity_pct,
        description: describe(conditions.weather_code).to_string(),
        icon: icon_for(conditions.weather_code),
        wind_speed_kmh: conditions.wind_speed_kmh,
        air_quality: conditions.air_quality,
        observed_at: observed_at.into(),
    }
}

/// Local time-of-day stamp for a snapshot.
pub fn local_time_now() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

/// Round half up, so `-2.5` becomes `-2` rather than `-3`.
pub fn round_temperature(t: f64) -> i64 {
    (t + 0.5).floor() as i64
}
