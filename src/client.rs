//! reqwest transport for the backend API
//!
//! One client (and one cookie jar) per process, so the session cookie set by
//! the backend is sent on every later request.

use async_trait::async_trait;
use reqwest::cookie::{CookieStore, Jar};
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use simmer_common::{
    parse_track_list, parse_transformation_ack, ActivePlaylist, AuthUrl, Endpoint, Error,
    HttpMethod, LoginStatus, Playlist, PlaylistPage, Profile, SimmerApi, Track,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

use crate::error::{Result, SimmerError};

pub struct HttpClient {
    http: Client,
    base_url: Url,
    jar: Arc<Jar>,
}

impl HttpClient {
    /// `session_cookie` is a `Cookie` header value (`name=value; other=value`).
    pub fn new(base_url: &str, session_cookie: Option<&str>, timeout: Duration) -> Result<Self> {
        let base_url = normalize_base_url(base_url)?;

        let jar = Arc::new(Jar::default());
        if let Some(cookie) = session_cookie {
            for pair in cookie.split(';').map(str::trim).filter(|p| !p.is_empty()) {
                jar.add_cookie_str(&format!("{}; Path=/", pair), &base_url);
            }
        }

        let http = Client::builder()
            .cookie_provider(jar.clone())
            .timeout(timeout)
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("simmer-toads/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url,
            jar,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Cookies the backend holds for us, in `Cookie` header form.
    pub fn session_cookie(&self) -> Option<String> {
        self.jar
            .cookies(&self.base_url)
            .and_then(|value| value.to_str().ok().map(str::to_string))
            .filter(|value| !value.is_empty())
    }

    fn url(&self, endpoint: &Endpoint<'_>) -> simmer_common::Result<Url> {
        self.base_url
            .join(&endpoint.path_and_query())
            .map_err(|e| Error::Config(format!("bad endpoint {}: {}", endpoint.path(), e)))
    }

    async fn send(
        &self,
        endpoint: Endpoint<'_>,
        body: Option<&serde_json::Value>,
    ) -> simmer_common::Result<Response> {
        let url = self.url(&endpoint)?;
        debug!(method = endpoint.method().as_str(), url = %url, "backend request");

        let request = match endpoint.method() {
            HttpMethod::Get => self.http.get(url),
            HttpMethod::Post => self.http.post(url),
            HttpMethod::Put => self.http.put(url),
        };
        let request = match body {
            Some(body) => request.json(body),
            None => request,
        };

        request.send().await.map_err(network_error)
    }

    async fn checked(&self, endpoint: Endpoint<'_>) -> simmer_common::Result<Response> {
        let response = self.send(endpoint, None).await?;
        ensure_success(response).await
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: Endpoint<'_>) -> simmer_common::Result<T> {
        let response = self.checked(endpoint).await?;
        response
            .json()
            .await
            .map_err(|e| Error::Parse(e.to_string()))
    }
}

fn normalize_base_url(raw: &str) -> Result<Url> {
    let mut url =
        Url::parse(raw).map_err(|e| SimmerError::InvalidUrl(format!("{}: {}", raw, e)))?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(SimmerError::InvalidUrl(format!(
            "{}: scheme must be http or https",
            raw
        )));
    }
    // Url::join replaces the last segment unless the path ends with '/'.
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    Ok(url)
}

fn network_error(e: reqwest::Error) -> Error {
    Error::Network(e.to_string())
}

async fn ensure_success(response: Response) -> simmer_common::Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let message = response.text().await.unwrap_or_default();
    debug!(status = status.as_u16(), "backend returned an error");
    Err(Error::from_status(status.as_u16(), message))
}

#[async_trait(?Send)]
impl SimmerApi for HttpClient {
    async fn login_status(&self) -> simmer_common::Result<LoginStatus> {
        self.get_json(Endpoint::LoginStatus).await
    }

    async fn login(&self) -> simmer_common::Result<AuthUrl> {
        self.get_json(Endpoint::Login).await
    }

    async fn logout(&self) -> simmer_common::Result<String> {
        let requested = self.url(&Endpoint::Logout)?;
        let response = self.send(Endpoint::Logout, None).await?;
        let final_url = response.url().clone();

        // The backend answers with a redirect; whatever the target serves is
        // not our concern.
        if final_url != requested || response.status().is_success() {
            return Ok(final_url.to_string());
        }
        ensure_success(response).await.map(|r| r.url().to_string())
    }

    async fn me(&self) -> simmer_common::Result<Profile> {
        self.get_json(Endpoint::Me).await
    }

    async fn list_playlists(&self) -> simmer_common::Result<Vec<Playlist>> {
        let page: PlaylistPage = self.get_json(Endpoint::Playlists).await?;
        debug!(count = page.items.len(), "fetched playlists");
        Ok(page.items)
    }

    async fn playlist_tracks(&self, playlist_id: &str) -> simmer_common::Result<Vec<Track>> {
        let value: serde_json::Value = self.get_json(Endpoint::PlaylistTracks(playlist_id)).await?;
        parse_track_list(value)
    }

    async fn request_transformation(
        &self,
        playlist_id: &str,
        evaluator: &str,
        write_back: bool,
    ) -> simmer_common::Result<Vec<Track>> {
        let response = self
            .checked(Endpoint::SimmeredTracks {
                playlist_id,
                evaluator,
                to_spotify: write_back,
            })
            .await?;
        let body = response.text().await.map_err(network_error)?;
        parse_transformation_ack(&body)
    }

    async fn active_playlist(&self) -> simmer_common::Result<ActivePlaylist> {
        self.get_json(Endpoint::ActivePlaylist).await
    }

    async fn set_active_playlist(&self, playlist_id: &str) -> simmer_common::Result<ActivePlaylist> {
        let body = serde_json::json!({ "playlist_id": playlist_id });
        let response = self.send(Endpoint::SetActivePlaylist, Some(&body)).await?;
        let response = ensure_success(response).await?;
        response
            .json()
            .await
            .map_err(|e| Error::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_adds_trailing_slash() {
        let url = normalize_base_url("http://127.0.0.1:5000/api").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:5000/api/");
        assert_eq!(
            url.join("playlists").unwrap().as_str(),
            "http://127.0.0.1:5000/api/playlists"
        );
    }

    #[test]
    fn test_normalize_rejects_other_schemes() {
        assert!(matches!(
            normalize_base_url("ftp://example.com/api/"),
            Err(SimmerError::InvalidUrl(_))
        ));
        assert!(matches!(
            normalize_base_url("not a url"),
            Err(SimmerError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_configured_cookie_is_in_jar() {
        let client = HttpClient::new(
            "http://127.0.0.1:5000/api/",
            Some("session=abc123"),
            Duration::from_secs(5),
        )
        .unwrap();
        assert_eq!(client.session_cookie().as_deref(), Some("session=abc123"));
    }

    #[test]
    fn test_no_cookie_by_default() {
        let client =
            HttpClient::new("http://127.0.0.1:5000/api/", None, Duration::from_secs(5)).unwrap();
        assert!(client.session_cookie().is_none());
    }
}
