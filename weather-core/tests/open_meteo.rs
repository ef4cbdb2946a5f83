//! Open-Meteo clients against a mock HTTP server.

use weatherdash_core::{
    AirQuality, ConditionsSource, Geocoder, TrackedCity,
    provider::open_meteo::{OpenMeteoConditions, OpenMeteoGeocoder},
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn geocoder(server: &MockServer) -> OpenMeteoGeocoder {
    OpenMeteoGeocoder::new(format!("{}/v1/search", server.uri()), "en".to_string())
}

fn conditions(server: &MockServer) -> OpenMeteoConditions {
    OpenMeteoConditions::new(
        format!("{}/v1/forecast", server.uri()),
        format!("{}/v1/air-quality", server.uri()),
    )
}

async fn mount_forecast(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .and(query_param("latitude", "48.8566"))
        .and(query_param("longitude", "2.3522"))
        .and(query_param(
            "current",
            "temperature_2m,weather_code,wind_speed_10m,relative_humidity_2m",
        ))
        .and(query_param("timezone", "auto"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "timezone": "Europe/Paris",
            "current": {
                "time": "2026-10-16T14:00",
                "temperature_2m": 15.2,
                "weather_code": 2,
                "wind_speed_10m": 10.0,
                "relative_humidity_2m": 70
            }
        })))
        .mount(server)
        .await;
}

async fn mount_air_quality(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/v1/air-quality"))
        .and(query_param("hourly", "us_aqi"))
        .and(query_param("timezone", "auto"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn geocoder_returns_first_match() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .and(query_param("name", "paris"))
        .and(query_param("count", "1"))
        .and(query_param("language", "en"))
        .and(query_param("format", "json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "results": [
                {"id": 2988507, "name": "Paris", "latitude": 48.8566, "longitude": 2.3522, "country": "France"}
            ],
            "generationtime_ms": 0.5
        })))
        .mount(&server)
        .await;

    let city = geocoder(&server).resolve("paris").await.unwrap();
    assert_eq!(city, Some(TrackedCity::new("Paris", 48.8566, 2.3522)));
}

#[tokio::test]
async fn geocoder_no_results_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"generationtime_ms": 0.3})),
        )
        .mount(&server)
        .await;

    let city = geocoder(&server).resolve("Xyzzyville").await.unwrap();
    assert_eq!(city, None);
}

#[tokio::test]
async fn geocoder_empty_results_is_none() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"results": []})))
        .mount(&server)
        .await;

    assert_eq!(geocoder(&server).resolve("Nowhere").await.unwrap(), None);
}

#[tokio::test]
async fn geocoder_server_error_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v1/search"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&server)
        .await;

    let err = geocoder(&server).resolve("Paris").await.unwrap_err();
    let msg = err.to_string();
    assert!(msg.contains("500"), "{msg}");
    assert!(msg.contains("upstream down"), "{msg}");
}

#[tokio::test]
async fn conditions_combine_weather_and_aqi() {
    let server = MockServer::start().await;
    mount_forecast(&server).await;
    mount_air_quality(
        &server,
        serde_json::json!({"hourly": {"time": ["2026-10-16T00:00"], "us_aqi": [42, 44]}}),
    )
    .await;

    let c = conditions(&server).fetch(48.8566, 2.3522).await.unwrap();
    assert_eq!(c.temperature_c, 15.2);
    assert_eq!(c.humidity_pct, 70.0);
    assert_eq!(c.wind_speed_kmh, 10.0);
    assert_eq!(c.weather_code, 2);
    assert_eq!(c.air_quality, AirQuality::Index(42.0));
}

#[tokio::test]
async fn missing_aqi_degrades_to_na() {
    for body in [
        serde_json::json!({}),
        serde_json::json!({"hourly": {}}),
        serde_json::json!({"hourly": {"us_aqi": []}}),
        serde_json::json!({"hourly": {"us_aqi": [null, 30]}}),
    ] {
        let server = MockServer::start().await;
        mount_forecast(&server).await;
        mount_air_quality(&server, body.clone()).await;

        let c = conditions(&server).fetch(48.8566, 2.3522).await.unwrap();
        assert_eq!(c.air_quality, AirQuality::Unavailable, "body {body}");
    }
}

#[tokio::test]
async fn air_quality_failure_fails_whole_fetch() {
    let server = MockServer::start().await;
    mount_forecast(&server).await;

    Mock::given(method("GET"))
        .and(path("/v1/air-quality"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let err = conditions(&server).fetch(48.8566, 2.3522).await.unwrap_err();
    assert!(err.to_string().contains("air quality"));
}

#[tokio::test]
async fn malformed_weather_fails_whole_fetch() {
    let server = MockServer::start().await;
    mount_air_quality(&server, serde_json::json!({"hourly": {"us_aqi": [10]}})).await;

    Mock::given(method("GET"))
        .and(path("/v1/forecast"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"current\": {}}"))
        .mount(&server)
        .await;

    let err = conditions(&server).fetch(48.8566, 2.3522).await.unwrap_err();
    assert!(err.to_string().contains("Failed to parse Open-Meteo forecast JSON"));
}
