//! `fetch` transport for the backend API
//!
//! Every request is sent with `credentials: include` so the backend's session
//! cookie travels with it.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use simmer_common::{
    parse_track_list, parse_transformation_ack, ActivePlaylist, AuthUrl, Endpoint, Error,
    LoginStatus, Playlist, PlaylistPage, Profile, Result, SimmerApi, Track,
};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestCredentials, RequestInit, RequestMode, Response};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchClient {
    base: String,
}

impl FetchClient {
    pub fn new(base: impl Into<String>) -> Self {
        let mut base = base.into();
        if !base.ends_with('/') {
            base.push('/');
        }
        Self { base }
    }

    pub fn url(&self, endpoint: &Endpoint<'_>) -> String {
        format!("{}{}", self.base, endpoint.path_and_query())
    }

    async fn send(&self, endpoint: Endpoint<'_>, body: Option<&serde_json::Value>) -> Result<Response> {
        let url = self.url(&endpoint);

        let opts = RequestInit::new();
        opts.set_method(endpoint.method().as_str());
        opts.set_mode(RequestMode::Cors);
        opts.set_credentials(RequestCredentials::Include);
        if let Some(body) = body {
            let body = serde_json::to_string(body)?;
            opts.set_body(&JsValue::from_str(&body));
        }

        let request = Request::new_with_str_and_init(&url, &opts).map_err(js_error)?;
        if body.is_some() {
            request
                .headers()
                .set("Content-Type", "application/json")
                .map_err(js_error)?;
        }

        let window = web_sys::window().ok_or_else(|| Error::Network("no window".into()))?;
        let resp_value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_error)?;
        resp_value.dyn_into::<Response>().map_err(js_error)
    }

    async fn checked(&self, endpoint: Endpoint<'_>, body: Option<&serde_json::Value>) -> Result<Response> {
        let resp = self.send(endpoint, body).await?;
        if resp.ok() {
            return Ok(resp);
        }
        let message = response_text(&resp).await.unwrap_or_default();
        Err(Error::from_status(resp.status(), message))
    }

    async fn get_json<T: DeserializeOwned>(&self, endpoint: Endpoint<'_>) -> Result<T> {
        let resp = self.checked(endpoint, None).await?;
        response_json(&resp).await
    }
}

async fn response_text(resp: &Response) -> Result<String> {
    let value = JsFuture::from(resp.text().map_err(js_error)?)
        .await
        .map_err(js_error)?;
    Ok(value.as_string().unwrap_or_default())
}

async fn response_json<T: DeserializeOwned>(resp: &Response) -> Result<T> {
    let promise = resp.json().map_err(|e| Error::Parse(describe(&e)))?;
    let value = JsFuture::from(promise)
        .await
        .map_err(|e| Error::Parse(describe(&e)))?;
    serde_wasm_bindgen::from_value(value).map_err(|e| Error::Parse(e.to_string()))
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}

fn js_error(value: JsValue) -> Error {
    Error::Network(describe(&value))
}

#[async_trait(?Send)]
impl SimmerApi for FetchClient {
    async fn login_status(&self) -> Result<LoginStatus> {
        self.get_json(Endpoint::LoginStatus).await
    }

    async fn login(&self) -> Result<AuthUrl> {
        self.get_json(Endpoint::Login).await
    }

    async fn logout(&self) -> Result<String> {
        let resp = self.send(Endpoint::Logout, None).await?;
        // fetch follows the backend's redirect on its own
        if resp.redirected() || resp.ok() {
            return Ok(resp.url());
        }
        let message = response_text(&resp).await.unwrap_or_default();
        Err(Error::from_status(resp.status(), message))
    }

    async fn me(&self) -> Result<Profile> {
        self.get_json(Endpoint::Me).await
    }

    async fn list_playlists(&self) -> Result<Vec<Playlist>> {
        let page: PlaylistPage = self.get_json(Endpoint::Playlists).await?;
        Ok(page.items)
    }

    async fn playlist_tracks(&self, playlist_id: &str) -> Result<Vec<Track>> {
        let value: serde_json::Value = self.get_json(Endpoint::PlaylistTracks(playlist_id)).await?;
        parse_track_list(value)
    }

    async fn request_transformation(
        &self,
        playlist_id: &str,
        evaluator: &str,
        write_back: bool,
    ) -> Result<Vec<Track>> {
        let resp = self
            .checked(
                Endpoint::SimmeredTracks {
                    playlist_id,
                    evaluator,
                    to_spotify: write_back,
                },
                None,
            )
            .await?;
        let body = response_text(&resp).await?;
        parse_transformation_ack(&body)
    }

    async fn active_playlist(&self) -> Result<ActivePlaylist> {
        self.get_json(Endpoint::ActivePlaylist).await
    }

    async fn set_active_playlist(&self, playlist_id: &str) -> Result<ActivePlaylist> {
        let body = serde_json::json!({ "playlist_id": playlist_id });
        let resp = self.checked(Endpoint::SetActivePlaylist, Some(&body)).await?;
        response_json(&resp).await
    }
}


#[cfg(all(target_arch = "wasm32", test))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    /// The test runner serves no backend, so the session check must settle
    /// on "logged out" instead of failing.
    #[wasm_bindgen_test]
    async fn wasm_check_session_without_backend() {
        let client = FetchClient::new(crate::api::API_BASE);
        assert!(!client.check_session().await);
    }
}
