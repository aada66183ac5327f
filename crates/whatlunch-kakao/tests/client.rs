//! Integration tests for `KakaoClient` using wiremock HTTP mocks.

use whatlunch_core::{CategoryCode, Coordinate, PlacesError, PlacesIndex, Radius, SearchScope};
use whatlunch_kakao::{KakaoClient, KakaoError};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CITY_HALL: Coordinate = Coordinate {
    lat: 37.5665,
    lng: 126.978,
};

fn test_client(base_url: &str) -> KakaoClient {
    KakaoClient::with_base_url("test-key", 5, "whatlunch-test", base_url)
        .expect("client construction should not fail")
}

fn place_json(id: &str, name: &str, code: &str) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "place_name": name,
        "category_name": "음식점 > 한식",
        "category_group_code": code,
        "category_group_name": "음식점",
        "phone": "02-123-4567",
        "address_name": "서울 중구 태평로1가 31",
        "road_address_name": "서울 중구 세종대로 110",
        "x": "126.9780",
        "y": "37.5670",
        "place_url": format!("http://place.map.kakao.com/{id}"),
        "distance": "55"
    })
}

#[tokio::test]
async fn keyword_search_sends_auth_header_and_scope() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "meta": { "total_count": 1, "pageable_count": 1, "is_end": true },
        "documents": [place_json("100", "Gwanghwamun Gukbap", "FD6")]
    });

    Mock::given(method("GET"))
        .and(path("/v2/local/search/keyword.json"))
        .and(header("authorization", "KakaoAK test-key"))
        .and(query_param("query", "한식"))
        .and(query_param("x", "126.978"))
        .and(query_param("y", "37.5665"))
        .and(query_param("radius", "1000"))
        .and(query_param("page", "1"))
        .and(query_param("size", "15"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let docs = client
        .search_keyword(
            "한식",
            Some(SearchScope {
                origin: CITY_HALL,
                radius: Radius::from_meters(1_000),
            }),
        )
        .await
        .expect("should parse keyword results");

    assert_eq!(docs.len(), 1);
    assert_eq!(docs[0].id, "100");
    assert_eq!(docs[0].place_name, "Gwanghwamun Gukbap");
    assert_eq!(docs[0].category_group_code, "FD6");
}

#[tokio::test]
async fn category_search_requests_the_category_code() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "meta": { "total_count": 2, "pageable_count": 2, "is_end": true },
        "documents": [
            place_json("1", "Sushi Hyo", "FD4"),
            place_json("2", "Tonkatsu Jeong", "FD4")
        ]
    });

    Mock::given(method("GET"))
        .and(path("/v2/local/search/category.json"))
        .and(query_param("category_group_code", "FD4"))
        .and(query_param("radius", "800"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let places = client
        .category_search(CategoryCode::Fd4, CITY_HALL, Radius::from_meters(800))
        .await
        .expect("should parse category results");

    assert_eq!(places.len(), 2);
    assert_eq!(places[0].name, "Sushi Hyo");
    assert_eq!(places[1].phone.as_deref(), Some("02-123-4567"));
    assert_eq!(
        places[1].place_url.as_deref(),
        Some("http://place.map.kakao.com/2")
    );
}

#[tokio::test]
async fn place_search_pages_until_is_end() {
    let server = MockServer::start().await;

    let page = |n: u32, is_end: bool| {
        serde_json::json!({
            "meta": { "total_count": 3, "pageable_count": 3, "is_end": is_end },
            "documents": [place_json(&n.to_string(), &format!("Place {n}"), "FD6")]
        })
    };

    Mock::given(method("GET"))
        .and(path("/v2/local/search/keyword.json"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(1, false)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/local/search/keyword.json"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(2, true)))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/v2/local/search/keyword.json"))
        .and(query_param("page", "3"))
        .respond_with(ResponseTemplate::new(200).set_body_json(page(3, true)))
        .expect(0)
        .mount(&server)
        .await;

    let client = test_client(&server.uri()).with_max_pages(5);
    let docs = client
        .search_keyword("음식점", None)
        .await
        .expect("should collect pages");

    let ids: Vec<_> = docs.iter().map(|d| d.id.as_str()).collect();
    assert_eq!(ids, ["1", "2"]);
}

#[tokio::test]
async fn default_client_fetches_only_the_first_page() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "meta": { "total_count": 40, "pageable_count": 40, "is_end": false },
        "documents": [place_json("1", "First", "FD6")]
    });

    Mock::given(method("GET"))
        .and(path("/v2/local/search/keyword.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let docs = client.search_keyword("음식점", None).await.unwrap();
    assert_eq!(docs.len(), 1);
}

#[tokio::test]
async fn address_search_returns_documents() {
    let server = MockServer::start().await;

    let body = serde_json::json!({
        "meta": { "total_count": 1, "pageable_count": 1, "is_end": true },
        "documents": [{
            "address_name": "서울 중구 세종대로 110",
            "address_type": "ROAD_ADDR",
            "x": "126.977829174031",
            "y": "37.5663174209601"
        }]
    });

    Mock::given(method("GET"))
        .and(path("/v2/local/search/address.json"))
        .and(query_param("query", "세종대로 110"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&body))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let matches = client
        .address_search("세종대로 110")
        .await
        .expect("should parse address results");

    assert_eq!(matches.len(), 1);
    assert_eq!(
        matches[0].address_name.as_deref(),
        Some("서울 중구 세종대로 110")
    );
    let coord = matches[0].coordinate().expect("coordinates should parse");
    assert!((coord.lat - 37.566_317).abs() < 1e-5);
}

#[tokio::test]
async fn unauthorized_maps_to_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/local/search/keyword.json"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "errorType": "AccessDeniedError",
            "message": "wrong appKey(test-key) format"
        })))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.search_keyword("한식", None).await.unwrap_err();

    match err {
        KakaoError::Api {
            status,
            ref error_type,
            ref message,
        } => {
            assert_eq!(status, 401);
            assert_eq!(error_type, "AccessDeniedError");
            assert!(message.contains("appKey"));
        }
        other => panic!("expected Api error, got {other:?}"),
    }
}

#[tokio::test]
async fn places_index_surfaces_rejections_as_places_errors() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/local/search/category.json"))
        .respond_with(ResponseTemplate::new(400).set_body_string("bad request"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client
        .category_search(CategoryCode::Fd7, CITY_HALL, Radius::default())
        .await
        .unwrap_err();

    assert!(
        matches!(err, PlacesError::Rejected { status: 400, ref message } if message == "bad request"),
        "got {err:?}"
    );
}

#[tokio::test]
async fn malformed_body_maps_to_deserialize_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/local/search/address.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let client = test_client(&server.uri());
    let err = client.search_address("anything").await.unwrap_err();
    assert!(matches!(err, KakaoError::Deserialize { .. }), "got {err:?}");
}

#[tokio::test]
async fn unreachable_server_maps_to_unreachable() {
    // Nothing listens on port 1.
    let client = test_client("http://127.0.0.1:1");
    let err = client.address_search("anything").await.unwrap_err();
    assert!(matches!(err, PlacesError::Unreachable(_)), "got {err:?}");
}
