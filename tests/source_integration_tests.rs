use std::sync::Arc;
use std::time::Duration;

use atlas::core::service::{CountryService, Origin};
use atlas::countries::{CountrySource, RestCountriesSource, SourceError};
use serde_json::json;
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{method, path, query_param},
};

// ============================================================================
// Helper Functions
// ============================================================================

fn source_for(server: &MockServer) -> RestCountriesSource {
    RestCountriesSource::new(&server.uri(), Duration::from_secs(5)).unwrap()
}

fn list_body() -> serde_json::Value {
    json!([
        {
            "name": {"common": "Kenya", "official": "Republic of Kenya", "nativeName": {}},
            "capital": ["Nairobi"],
            "flags": {"png": "https://flagcdn.com/w320/ke.png", "svg": "https://flagcdn.com/ke.svg"}
        },
        {
            "name": {"common": "Antarctica", "official": "Antarctica"},
            "capital": [],
            "flags": {"png": "https://flagcdn.com/w320/aq.png"}
        }
    ])
}

fn kenya_body() -> serde_json::Value {
    json!([{
        "name": {"common": "Kenya", "official": "Republic of Kenya"},
        "independent": true,
        "currencies": {"KES": {"name": "Kenyan shilling", "symbol": "Sh"}},
        "capital": ["Nairobi"],
        "region": "Africa",
        "subregion": "Eastern Africa",
        "languages": {"eng": "English", "swa": "Swahili"},
        "translations": {"fra": {"official": "République du Kenya", "common": "Kenya"}},
        "population": 53771300,
        "timezones": ["UTC+03:00"],
        "maps": {"googleMaps": "https://goo.gl/maps/Ni9M7wcCxf8bJHLX8"},
        "flags": {"png": "https://flagcdn.com/w320/ke.png"}
    }])
}

// ============================================================================
// RestCountriesSource Tests
// ============================================================================

#[tokio::test]
async fn test_fetch_all_requests_list_fields() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/all"))
        .and(query_param("fields", "name,capital,flags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let countries = source_for(&mock_server).fetch_all_countries().await.unwrap();

    assert_eq!(countries.len(), 2);
    assert_eq!(countries[0].name.official, "Republic of Kenya");
    assert_eq!(countries[0].capital, vec!["Nairobi".to_string()]);
    assert!(countries[1].capital.is_empty());
}

#[tokio::test]
async fn test_fetch_by_name_returns_all_matches() {
    let mock_server = MockServer::start().await;

    let mut body = kenya_body();
    if let Some(list) = body.as_array_mut() {
        let mut second = list[0].clone();
        second["name"]["official"] = json!("Other Kenya");
        list.push(second);
    }

    Mock::given(method("GET"))
        .and(path("/name/Kenya"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(&mock_server)
        .await;

    let matches = source_for(&mock_server)
        .fetch_country_by_name("Kenya")
        .await
        .unwrap();

    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0].name.official, "Republic of Kenya");
    assert_eq!(matches[0].population, 53771300);
}

#[tokio::test]
async fn test_fetch_by_name_encodes_spaces() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/name/Republic%20of%20Kenya"))
        .respond_with(ResponseTemplate::new(200).set_body_json(kenya_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let matches = source_for(&mock_server)
        .fetch_country_by_name("Republic of Kenya")
        .await
        .unwrap();
    assert_eq!(matches.len(), 1);
}

#[tokio::test]
async fn test_404_is_not_found() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/name/Atlantis"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"status": 404, "message": "Not Found"})),
        )
        .mount(&mock_server)
        .await;

    let result = source_for(&mock_server).fetch_country_by_name("Atlantis").await;
    assert_eq!(result.unwrap_err(), SourceError::NotFound("Atlantis".to_string()));
}

#[tokio::test]
async fn test_server_error_keeps_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/all"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let result = source_for(&mock_server).fetch_all_countries().await;
    match result {
        Err(SourceError::Api { status, message }) => {
            assert_eq!(status, 500);
            assert!(message.contains("Internal Server Error"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_malformed_body_is_parse_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/all"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{not json"))
        .mount(&mock_server)
        .await;

    let result = source_for(&mock_server).fetch_all_countries().await;
    assert!(matches!(result, Err(SourceError::Parse(_))));
}

#[tokio::test]
async fn test_empty_match_list_is_empty_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/name/Kenya"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let result = source_for(&mock_server).fetch_country_by_name("Kenya").await;
    assert_eq!(result.unwrap_err(), SourceError::Empty);
}

#[tokio::test]
async fn test_slow_server_times_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/all"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(list_body())
                .set_delay(Duration::from_secs(2)),
        )
        .mount(&mock_server)
        .await;

    let source = RestCountriesSource::new(&mock_server.uri(), Duration::from_millis(100)).unwrap();
    let result = source.fetch_all_countries().await;
    assert_eq!(result.unwrap_err(), SourceError::Timeout);
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    // Bind an ephemeral port, then release it so nothing is listening there
    let uri = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        format!("http://{}", listener.local_addr().unwrap())
    };

    let source = RestCountriesSource::new(&uri, Duration::from_secs(2)).unwrap();
    let result = source.fetch_all_countries().await;
    assert!(matches!(result, Err(SourceError::Network(_))));
}

// ============================================================================
// End-to-end: REST source behind the cache-or-fetch service
// ============================================================================

#[tokio::test]
async fn test_service_fetches_once_then_serves_cache() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(list_body()))
        .expect(1)
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/name/Republic%20of%20Kenya"))
        .respond_with(ResponseTemplate::new(200).set_body_json(kenya_body()))
        .expect(1)
        .mount(&mock_server)
        .await;

    let dir = tempfile::TempDir::new().unwrap();
    let service = CountryService::open(Arc::new(source_for(&mock_server)), dir.path()).unwrap();

    let first = service.load_all().await.unwrap();
    assert_eq!(first.origin, Origin::Remote);
    assert_eq!(first.value[1].capital, "No Capital");
    let second = service.load_all().await.unwrap();
    assert_eq!(second.origin, Origin::Cache);
    assert_eq!(second.value, first.value);

    let details = service.load_details("Republic of Kenya").await.unwrap();
    assert_eq!(details.origin, Origin::Remote);
    assert_eq!(details.value.currency_name, "Kenyan shilling");
    assert_eq!(details.value.english_translation, "Kenya");
    assert!(dir.path().join("Republic of Kenya.json").exists());

    let again = service.load_details("Republic of Kenya").await.unwrap();
    assert_eq!(again.origin, Origin::Cache);
    assert!(!service.is_saved("Republic of Kenya"));
}
