//! Weather client and surface state against a mock weather API.

use std::time::Duration;

use skycast_core::{
    ApiClient, Coordinate, FetchError, MeasureUnits, Phase, Surface, SurfaceState, WeatherClient,
    WeatherRequest,
};
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn record(temp: f64, deg: f64, pop: Option<f64>) -> serde_json::Value {
    let mut value = serde_json::json!({
        "weather": [{ "id": 800, "main": "Clear", "description": "clear sky", "icon": "01d" }],
        "main": {
            "temp": temp, "feels_like": temp - 1.0, "temp_min": temp - 2.0,
            "temp_max": temp + 2.0, "pressure": 1015, "humidity": 40
        },
        "wind": { "speed": 3.6, "gust": 5.1, "deg": deg },
        "clouds": { "all": 0 },
        "visibility": 10000,
        "dt": 1_700_000_000
    });
    if let Some(pop) = pop {
        value["pop"] = serde_json::json!(pop);
    }
    value
}

fn client(server: &MockServer) -> WeatherClient {
    WeatherClient::new(ApiClient::new(format!("{}/api", server.uri())))
}

fn request(lat: f64, units: MeasureUnits) -> WeatherRequest {
    WeatherRequest::new(Some(Coordinate::new(lat, -85.67)), units)
}

#[tokio::test]
async fn test_fetch_current_normalizes_units() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/weather/current"))
        .and(query_param("units", "imperial"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "weather": record(71.0, 45.0, None)
            })),
        )
        .mount(&server)
        .await;

    let snapshot = client(&server)
        .fetch_current(
            &request(42.96, MeasureUnits::Imperial),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(snapshot.temperature.unit, "°F");
    assert_eq!(snapshot.temperature.air, 71.0);
    assert_eq!(snapshot.wind.unit, "mi/hr");
    assert_eq!(snapshot.wind.direction_compass, "NE");
    assert_eq!(snapshot.wind.gust, Some(5.1));
    assert_eq!(snapshot.condition.chance_of_precip, None);
}

#[tokio::test]
async fn test_fetch_extended_returns_every_step() {
    let server = MockServer::start().await;
    let steps: Vec<_> = (0..40)
        .map(|i| record(280.0 + i as f64, 180.0, Some(0.421)))
        .collect();
    Mock::given(method("GET"))
        .and(path("/api/weather/extended"))
        .and(query_param("units", "standard"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "weather": steps })),
        )
        .mount(&server)
        .await;

    let forecast = client(&server)
        .fetch_extended(
            &request(42.96, MeasureUnits::Standard),
            &CancellationToken::new(),
        )
        .await
        .unwrap();

    assert_eq!(forecast.len(), 40);
    assert_eq!(forecast[0].temperature.unit, "K");
    assert_eq!(forecast[0].wind.direction_compass, "S");
    assert_eq!(forecast[39].condition.chance_of_precip, Some(43));
    assert_eq!(skycast_core::weather::forecast_pages(&forecast).len(), 5);
}

#[tokio::test]
async fn test_upstream_failure_keeps_warm_snapshot() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/weather/current"))
        .and(query_param("units", "metric"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "weather": record(21.0, 0.0, None)
            })),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/weather/current"))
        .and(query_param("units", "imperial"))
        .respond_with(
            ResponseTemplate::new(502)
                .set_body_json(serde_json::json!({ "error": "502: Bad Gateway" })),
        )
        .mount(&server)
        .await;

    let client = client(&server);
    let mut surface = SurfaceState::new(Surface::Current);

    let id = surface.begin(Coordinate::new(1.0, -85.67));
    let first = client
        .fetch_current(&request(1.0, MeasureUnits::Metric), &CancellationToken::new())
        .await
        .unwrap();
    assert!(surface.complete(id, first));

    let id = surface.begin(Coordinate::new(1.0, -85.67));
    let err = client
        .fetch_current(&request(1.0, MeasureUnits::Imperial), &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(surface.fail(id, &err));

    assert_eq!(surface.phase(), Phase::Failed);
    assert_eq!(surface.status().message(), "502: Bad Gateway");
    assert_eq!(surface.data().map(|s| s.temperature.unit), Some("°C"));
}

#[tokio::test]
async fn test_superseded_fetch_never_overwrites_newer_result() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/weather/current"))
        .and(query_param("lat", "1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "weather": record(1.0, 0.0, None) }))
                .set_delay(Duration::from_millis(200)),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/weather/current"))
        .and(query_param("lat", "2"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "weather": record(2.0, 0.0, None) })),
        )
        .mount(&server)
        .await;

    let client = client(&server);
    let mut surface = SurfaceState::new(Surface::Current);

    // A starts, then B supersedes it without A being cancelled.
    let id_a = surface.begin(Coordinate::new(1.0, -85.67));
    let slow = {
        let client = client.clone();
        tokio::spawn(async move {
            client
                .fetch_current(&request(1.0, MeasureUnits::Metric), &CancellationToken::new())
                .await
        })
    };
    let id_b = surface.begin(Coordinate::new(2.0, -85.67));
    let fast = client
        .fetch_current(&request(2.0, MeasureUnits::Metric), &CancellationToken::new())
        .await
        .unwrap();
    assert!(surface.complete(id_b, fast));

    let late = slow.await.unwrap().unwrap();
    assert!(!surface.complete(id_a, late));

    assert_eq!(surface.data().map(|s| s.temperature.air), Some(2.0));
}

#[tokio::test]
async fn test_cancelled_fetch_returns_cancelled() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/weather/extended"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "weather": [] }))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let client = client(&server);
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let result = tokio::time::timeout(
        Duration::from_secs(2),
        client.fetch_extended(&request(1.0, MeasureUnits::Metric), &token),
    )
    .await
    .expect("cancellation did not interrupt the request");
    assert_eq!(result.unwrap_err(), FetchError::Cancelled);
}
