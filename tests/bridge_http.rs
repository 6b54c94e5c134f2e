//! Integration tests for the companion bridge client.
//!
//! A local mockito server stands in for the three upstream services so
//! request formation, response parsing, and error mapping are exercised
//! over real HTTP.

use mihrab::bridge::{BridgeError, Companion, HttpBridge};
use mihrab::config::BridgeConfig;
use mihrab::models::Location;
use mockito::Matcher;

fn bridge_config(server: &mockito::ServerGuard) -> BridgeConfig {
    BridgeConfig {
        prayer_base_url: server.url(),
        geo_url: format!("{}/geo", server.url()),
        city_url: format!("{}/city", server.url()),
        city_api_key: "test-key".to_string(),
        timeout_secs: 5,
    }
}

fn day_json(date: &str, hijri_day: &str, fajr: &str) -> String {
    format!(
        r#"{{
            "date": {{
                "gregorian": {{ "date": "{date}" }},
                "hijri": {{ "day": "{hijri_day}", "month": {{ "en": "Shawwal" }}, "year": "1446" }}
            }},
            "timings": {{
                "Fajr": "{fajr}", "Sunrise": "05:38 (PKT)", "Dhuhr": "12:05 (PKT)",
                "Asr": "15:40 (PKT)", "Maghrib": "18:33 (PKT)", "Isha": "19:59 (PKT)"
            }}
        }}"#
    )
}

/// A month fetch sends the coordinates and method as query parameters
/// and lands in a cache stamped with the zero-padded month.
#[test]
fn test_fetch_month_success() {
    let mut server = mockito::Server::new();
    let body = format!(
        r#"{{ "code": 200, "status": "OK", "data": [{}, {}] }}"#,
        day_json("01-04-2025", "03", "04:21 (PKT)"),
        day_json("02-04-2025", "04", "04:20 (PKT)")
    );
    let mock = server
        .mock("GET", "/calendar/2025/4")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("latitude".into(), "31.5497".into()),
            Matcher::UrlEncoded("longitude".into(), "74.3436".into()),
            Matcher::UrlEncoded("method".into(), "3".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(&body)
        .create();

    let bridge = HttpBridge::new(&bridge_config(&server)).unwrap();
    let location = Location::new("Lahore", "Pakistan", 31.5497, 74.3436);
    let cache = bridge.fetch_month(&location, 2025, 4).unwrap();

    mock.assert();
    assert_eq!(cache.month, "04", "month key should be zero padded");
    assert_eq!(cache.year, "2025");
    assert_eq!(cache.data.len(), 2);
    assert_eq!(cache.data[0].timings.fajr, "04:21 (PKT)");
    assert_eq!(cache.data[1].date.gregorian.date, "02-04-2025");
}

/// The feed reports bad requests inside an HTTP 200 body; the body
/// code decides.
#[test]
fn test_fetch_month_error_code_in_200_body() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/calendar/2025/4")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{ "code": 400, "status": "Invalid longitude", "data": "Invalid longitude" }"#)
        .create();

    let bridge = HttpBridge::new(&bridge_config(&server)).unwrap();
    let location = Location::new("Nowhere", "", 0.0, 999.0);
    let err = bridge.fetch_month(&location, 2025, 4).unwrap_err();

    assert!(matches!(err, BridgeError::Api { .. }));
    assert!(
        err.to_string().contains("Invalid longitude"),
        "upstream status should be surfaced: {err}"
    );
}

#[test]
fn test_fetch_month_http_error() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/calendar/2025/4")
        .match_query(Matcher::Any)
        .with_status(503)
        .create();

    let bridge = HttpBridge::new(&bridge_config(&server)).unwrap();
    let location = Location::new("Lahore", "Pakistan", 31.5497, 74.3436);
    let err = bridge.fetch_month(&location, 2025, 4).unwrap_err();

    assert!(matches!(err, BridgeError::Http(_)), "got: {err:?}");
}

#[test]
fn test_fetch_month_malformed_body() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/calendar/2025/4")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>502 bad gateway</html>")
        .create();

    let bridge = HttpBridge::new(&bridge_config(&server)).unwrap();
    let location = Location::new("Lahore", "Pakistan", 31.5497, 74.3436);
    let err = bridge.fetch_month(&location, 2025, 4).unwrap_err();

    assert!(matches!(err, BridgeError::Malformed { .. }), "got: {err:?}");
}

/// City search carries the API key as a header and tolerates hits with
/// missing optional fields.
#[test]
fn test_search_city_success() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("GET", "/city")
        .match_query(Matcher::UrlEncoded("name".into(), "lahore".into()))
        .match_header("x-api-key", "test-key")
        .with_status(200)
        .with_body(
            r#"[
                {"name": "Lahore", "country": "PK", "latitude": 31.5497, "longitude": 74.3436, "population": 11126285},
                {"name": "Lahore", "latitude": 40.26, "longitude": -80.26}
            ]"#,
        )
        .create();

    let bridge = HttpBridge::new(&bridge_config(&server)).unwrap();
    let hits = bridge.search_city("lahore").unwrap();

    mock.assert();
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].country, "PK");
    assert_eq!(hits[0].population, Some(11_126_285));
    assert_eq!(hits[1].country, "", "missing country should default to empty");
    assert_eq!(hits[1].population, None);

    let location = hits[0].clone().into_location();
    assert_eq!(location.city, "Lahore");
    assert_eq!(location.latitude, 31.5497);
}

#[test]
fn test_search_city_no_match_is_empty() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/city")
        .match_query(Matcher::Any)
        .match_header("x-api-key", "test-key")
        .with_status(200)
        .with_body("[]")
        .create();

    let bridge = HttpBridge::new(&bridge_config(&server)).unwrap();
    let hits = bridge.search_city("xyzzy").unwrap();
    assert!(hits.is_empty());
}

/// Without a key the client refuses up front instead of sending a
/// request that can only 401.
#[test]
fn test_search_city_without_api_key() {
    let server = mockito::Server::new();
    let mut config = bridge_config(&server);
    config.city_api_key = String::new();

    let bridge = HttpBridge::new(&config).unwrap();
    let err = bridge.search_city("lahore").unwrap_err();

    assert!(matches!(err, BridgeError::Api { .. }));
    assert!(err.to_string().contains("API key"), "got: {err}");
}

#[test]
fn test_locate_success() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/geo")
        .with_status(200)
        .with_body(
            r#"{ "status": "success", "city": "Istanbul", "country": "Turkey",
                 "lat": 41.0082, "lon": 28.9784 }"#,
        )
        .create();

    let bridge = HttpBridge::new(&bridge_config(&server)).unwrap();
    let fix = bridge.locate().unwrap();

    assert_eq!(fix.city, "Istanbul");
    assert_eq!(fix.country, "Turkey");
    assert_eq!(fix.latitude, 41.0082);
}

/// The geolocation service signals failure in-band with `status: fail`.
#[test]
fn test_locate_fail_status() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/geo")
        .with_status(200)
        .with_body(r#"{ "status": "fail", "message": "private range" }"#)
        .create();

    let bridge = HttpBridge::new(&bridge_config(&server)).unwrap();
    let err = bridge.locate().unwrap_err();

    assert!(matches!(err, BridgeError::Api { .. }));
    assert!(err.to_string().contains("private range"));
}
