use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer, de::Error as _};

use crate::presentation::WeatherIcon;

/// A city the user has chosen to track. This is the only durable record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackedCity {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl TrackedCity {
    pub fn new(name: impl Into<String>, latitude: f64, longitude: f64) -> Self {
        Self { name: name.into(), latitude, longitude }
    }

    /// Identity check used everywhere a city is looked up by name.
    pub fn is_named(&self, name: &str) -> bool {
        same_city(&self.name, name)
    }
}

/// Case-insensitive city name comparison.
pub fn same_city(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Most recent air-quality reading. Serializes as the bare number or `"N/A"`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AirQuality {
    Index(f64),
    Unavailable,
}

impl AirQuality {
    pub fn index(&self) -> Option<f64> {
        match self {
            AirQuality::Index(v) => Some(*v),
            AirQuality::Unavailable => None,
        }
    }
}

impl From<Option<f64>> for AirQuality {
    fn from(value: Option<f64>) -> Self {
        value.map_or(AirQuality::Unavailable, AirQuality::Index)
    }
}

impl fmt::Display for AirQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AirQuality::Index(v) => write!(f, "{v}"),
            AirQuality::Unavailable => f.write_str(NOT_AVAILABLE),
        }
    }
}

pub(crate) const NOT_AVAILABLE: &str = "N/A";

impl Serialize for AirQuality {
    fn serialize<S: Serializer>(&self, s: S) -> Result<S::Ok, S::Error> {
        match self {
            AirQuality::Index(v) => s.serialize_f64(*v),
            AirQuality::Unavailable => s.serialize_str(NOT_AVAILABLE),
        }
    }
}

impl<'de> Deserialize<'de> for AirQuality {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(f64),
            Text(String),
        }

        match Raw::deserialize(d)? {
            Raw::Number(v) => Ok(AirQuality::Index(v)),
            Raw::Text(s) if s == NOT_AVAILABLE => Ok(AirQuality::Unavailable),
            Raw::Text(s) => Err(D::Error::custom(format!(
                "expected a number or \"{NOT_AVAILABLE}\", got {s:?}"
            ))),
        }
    }
}

/// Raw readings for one coordinate pair, as returned by a conditions source.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conditions {
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub wind_speed_kmh: f64,
    pub weather_code: i32,
    pub air_quality: AirQuality,
}

/// Everything a card needs, built fresh on every fetch and never cached.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConditionsSnapshot {
    pub name: String,
    pub temperature_c: f64,
    pub humidity_pct: f64,
    pub description: String,
    pub icon: WeatherIcon,
    pub wind_speed_kmh: f64,
    pub air_quality: AirQuality,
    /// Local wall-clock time of the fetch, e.g. `14:03:27`.
    pub observed_at: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tracked_city_json_shape() {
        let city = TrackedCity::new("Paris", 48.8566, 2.3522);
        let json = serde_json::to_string(&city).unwrap();
        assert_eq!(json, r#"{"name":"Paris","latitude":48.8566,"longitude":2.3522}"#);
    }

    #[test]
    fn identity_is_case_insensitive() {
        let city = TrackedCity::new("Zürich", 47.37, 8.54);
        assert!(city.is_named("zürich"));
        assert!(city.is_named("ZÜRICH"));
        assert!(!city.is_named("Zurich"));
    }

    #[test]
    fn air_quality_serializes_as_number_or_na() {
        assert_eq!(serde_json::to_string(&AirQuality::Index(42.0)).unwrap(), "42.0");
        assert_eq!(serde_json::to_string(&AirQuality::Unavailable).unwrap(), r#""N/A""#);

        let parsed: AirQuality = serde_json::from_str(r#""N/A""#).unwrap();
        assert_eq!(parsed, AirQuality::Unavailable);
        let parsed: AirQuality = serde_json::from_str("17").unwrap();
        assert_eq!(parsed, AirQuality::Index(17.0));
    }

    #[test]
    fn air_quality_display() {
        assert_eq!(AirQuality::Index(42.0).to_string(), "42");
        assert_eq!(AirQuality::Index(42.5).to_string(), "42.5");
        assert_eq!(AirQuality::Unavailable.to_string(), "N/A");
    }
}
