//! HTTP client tests
//!
//! A mock backend stands in for the `/api/` server.

use simmer_common::{Error, Outcome, SimmerApi, TransformationMethod, Workflow};
use simmer_toads::client::HttpClient;
use std::time::Duration;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

async fn client_for(server: &MockServer) -> HttpClient {
    HttpClient::new(&format!("{}/api", server.uri()), None, Duration::from_secs(5))
        .expect("client")
}

#[tokio::test]
async fn test_login_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"logged_in": true})))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    assert!(client.login_status().await.unwrap().logged_in);
    assert!(client.check_session().await);
}

#[tokio::test]
async fn test_check_session_never_fails() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    assert!(!client.check_session().await);
}

#[tokio::test]
async fn test_login_returns_auth_url() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "auth_url": "https://accounts.spotify.com/authorize?client_id=x"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let auth = client.login().await.unwrap();
    assert!(auth.auth_url.starts_with("https://accounts.spotify.com/authorize"));
}

#[tokio::test]
async fn test_list_playlists() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/playlists"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [
                {"id": "a", "name": "Alpha", "description": "first", "images": [{"url": "https://img/a.jpg"}]},
                {"id": "b", "name": "Beta", "description": null, "images": []}
            ]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let playlists = client.list_playlists().await.unwrap();

    assert_eq!(playlists.len(), 2);
    assert_eq!(playlists[0].cover_image_url.as_deref(), Some("https://img/a.jpg"));
    assert_eq!(playlists[1].description, "");
    assert!(playlists[1].cover_image_url.is_none());
}

#[tokio::test]
async fn test_unauthorized_maps_to_auth_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/playlists"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({"message": "Access denied"})))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let err = client.list_playlists().await.unwrap_err();
    assert!(matches!(err, Error::Auth));
}

#[tokio::test]
async fn test_server_error_keeps_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/me"))
        .respond_with(ResponseTemplate::new(503).set_body_string("maintenance"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    match client.me().await.unwrap_err() {
        Error::Server { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "maintenance");
        }
        other => panic!("expected server error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    let client = HttpClient::new("http://127.0.0.1:9/api/", None, Duration::from_secs(2)).unwrap();
    assert!(matches!(client.list_playlists().await, Err(Error::Network(_))));
}

#[tokio::test]
async fn test_request_transformation_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/simmered_playlist/abc/tracks"))
        .and(query_param("evaluator", "chaos"))
        .and(query_param("to_spotify", "true"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!(["Hop by Toad", "Leap by Frog"])))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let tracks = client.request_transformation("abc", "chaos", true).await.unwrap();
    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[1].artist, "Frog");
}

#[tokio::test]
async fn test_playlist_tracks() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/playlist/abc/tracks"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "items": [{"track": {"name": "Pond", "artists": [{"name": "Toad"}]}}]
        })))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let tracks = client.playlist_tracks("abc").await.unwrap();
    assert_eq!(tracks[0].to_string(), "Pond by Toad");
}

#[tokio::test]
async fn test_set_active_playlist() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/playlist_id"))
        .and(body_json(serde_json::json!({"playlist_id": "abc"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"playlist_id": "abc"})))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let active = client.set_active_playlist("abc").await.unwrap();
    assert_eq!(active.playlist_id.as_deref(), Some("abc"));
}

#[tokio::test]
async fn test_saved_cookie_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/login"))
        .and(header("cookie", "session=abc123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"logged_in": true})))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new(
        &format!("{}/api/", server.uri()),
        Some("session=abc123"),
        Duration::from_secs(5),
    )
    .unwrap();
    assert!(client.check_session().await);
}

#[tokio::test]
async fn test_logout_follows_redirect() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/logout"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/"))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(200).set_body_string("home"))
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let redirect = client.logout().await.unwrap();
    assert_eq!(redirect, format!("{}/", server.uri()));
}

#[tokio::test]
async fn test_batch_over_http_reports_partial_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/simmered_playlist/a/tracks"))
        .and(query_param("evaluator", "tsp"))
        .respond_with(ResponseTemplate::new(500).set_body_string("evaluator crashed"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/simmered_playlist/b/tracks"))
        .and(query_param("evaluator", "tsp"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({"success": true}))
                .set_delay(Duration::from_millis(100)),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server).await;
    let mut workflow = Workflow::new();
    workflow.select(true, "a", "Alpha").unwrap();
    workflow.select(true, "b", "Beta").unwrap();

    let outcome = workflow.submit(&client, TransformationMethod::Bake).await.unwrap();

    assert!(matches!(outcome, Outcome::Failure { .. }));
    assert_eq!(outcome.failed_ids(), vec!["a".to_string()]);
    assert!(outcome.notice().text.contains("evaluator crashed"));
}
