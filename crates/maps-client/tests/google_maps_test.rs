//! Integration tests for [`maps_client::GoogleMapsClient`] against a mockito server.

use std::time::Duration;

use maps_client::{DirectionsRequest, GoogleMapsClient, MapsError, MapsProvider, TravelMode};
use mockito::Matcher;

fn client(server: &mockito::ServerGuard) -> GoogleMapsClient {
    GoogleMapsClient::new("test-key", server.url(), Duration::from_secs(5)).unwrap()
}

/// **Test: geocode sends address + key and returns candidates in provider order.**
#[tokio::test]
async fn geocode_returns_candidates() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/maps/api/geocode/json")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("address".into(), "Kabanbay Batyr 53".into()),
            Matcher::UrlEncoded("key".into(), "test-key".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            serde_json::json!({
                "status": "OK",
                "results": [
                    {
                        "formatted_address": "Kabanbay Batyr Ave 53, Astana 010000, Kazakhstan",
                        "geometry": { "location": { "lat": 51.0906, "lng": 71.3984 } }
                    },
                    {
                        "formatted_address": "Kabanbay Batyr St 53, Almaty, Kazakhstan",
                        "geometry": { "location": { "lat": 43.25, "lng": 76.95 } }
                    }
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let results = client(&server).geocode("Kabanbay Batyr 53").await.unwrap();

    mock.assert_async().await;
    assert_eq!(results.len(), 2);
    assert!(results[0].formatted_address.contains("Astana"));
    assert_eq!(results[0].geometry.location.lat, 51.0906);
}

/// **Test: ZERO_RESULTS is an empty answer, not an error.**
#[tokio::test]
async fn geocode_zero_results_is_empty() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/maps/api/geocode/json")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status":"ZERO_RESULTS","results":[]}"#)
        .create_async()
        .await;

    let results = client(&server).geocode("nowhere at all").await.unwrap();
    assert!(results.is_empty());
}

/// **Test: a rejected request surfaces the provider status and message.**
#[tokio::test]
async fn geocode_request_denied_is_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/maps/api/geocode/json")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status":"REQUEST_DENIED","error_message":"The provided API key is invalid."}"#)
        .create_async()
        .await;

    let err = client(&server).geocode("Abay 10").await.unwrap_err();
    match err {
        MapsError::Status { status, message } => {
            assert_eq!(status, "REQUEST_DENIED");
            assert_eq!(message, "The provided API key is invalid.");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

/// **Test: non-2xx HTTP is an error carrying the status code.**
#[tokio::test]
async fn http_failure_is_error() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/maps/api/geocode/json")
        .match_query(Matcher::Any)
        .with_status(503)
        .with_body("unavailable")
        .create_async()
        .await;

    let err = client(&server).geocode("Abay 10").await.unwrap_err();
    assert!(matches!(err, MapsError::Http { status: 503, .. }));
}

/// **Test: directions sends mode, departure "now" and best_guess; parses traffic and transit details.**
#[tokio::test]
async fn directions_parses_legs() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("GET", "/maps/api/directions/json")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("origin".into(), "A, Astana".into()),
            Matcher::UrlEncoded("destination".into(), "B, Astana".into()),
            Matcher::UrlEncoded("mode".into(), "transit".into()),
            Matcher::UrlEncoded("departure_time".into(), "now".into()),
            Matcher::UrlEncoded("traffic_model".into(), "best_guess".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            serde_json::json!({
                "status": "OK",
                "routes": [{
                    "legs": [{
                        "distance": { "text": "7.4 km", "value": 7400 },
                        "duration": { "text": "31 mins", "value": 1860 },
                        "start_location": { "lat": 51.09, "lng": 71.39 },
                        "end_location": { "lat": 51.12, "lng": 71.43 },
                        "steps": [{
                            "travel_mode": "TRANSIT",
                            "transit_details": {
                                "line": { "short_name": "10", "name": "Bus 10" },
                                "departure_stop": { "name": "Khan Shatyr" },
                                "arrival_stop": { "name": "Baiterek" }
                            }
                        }]
                    }]
                }]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let request = DirectionsRequest::new("A, Astana", "B, Astana", TravelMode::Transit);
    let routes = client(&server).directions(&request).await.unwrap();

    mock.assert_async().await;
    let leg = &routes[0].legs[0];
    assert_eq!(leg.duration.value, 1860);
    assert!(leg.duration_in_traffic.is_none());
    let details = leg.steps[0].transit_details.as_ref().unwrap();
    assert_eq!(details.line.short_name.as_deref(), Some("10"));
    assert_eq!(details.departure_stop.name, "Khan Shatyr");
}

/// **Test: a mode that does not connect the points yields no routes.**
#[tokio::test]
async fn directions_zero_results_is_empty() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/maps/api/directions/json")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status":"ZERO_RESULTS","routes":[]}"#)
        .create_async()
        .await;

    let request = DirectionsRequest::new("A", "B", TravelMode::Walking);
    assert!(client(&server).directions(&request).await.unwrap().is_empty());
}

/// **Test: a provider slower than the client timeout fails like any other request.**
#[tokio::test]
async fn slow_provider_times_out_without_leaking_key() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("GET", "/maps/api/geocode/json")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_chunked_body(|w| {
            std::thread::sleep(Duration::from_secs(2));
            w.write_all(br#"{"status":"ZERO_RESULTS","results":[]}"#)
        })
        .create_async()
        .await;

    let client =
        GoogleMapsClient::new("SECRET_MAPS_KEY", server.url(), Duration::from_millis(200)).unwrap();
    let err = client.geocode("Baiterek").await.unwrap_err();

    assert!(matches!(err, MapsError::Request(_)), "got {err:?}");
    assert!(!err.to_string().contains("SECRET_MAPS_KEY"), "{err}");
    assert!(!format!("{err:?}").contains("SECRET_MAPS_KEY"));
}

/// **Test: connection failures keep the key out of the error text.**
#[tokio::test]
async fn unreachable_provider_error_hides_key() {
    let client =
        GoogleMapsClient::new("SECRET_MAPS_KEY", "http://127.0.0.1:1", Duration::from_secs(2))
            .unwrap();

    let err = client.geocode("Baiterek").await.unwrap_err();

    assert!(matches!(err, MapsError::Request(_)), "got {err:?}");
    assert!(!err.to_string().contains("SECRET_MAPS_KEY"), "{err}");
}
