//! Backend contract
//!
//! Every outbound call goes through [`SimmerApi`]. The terminal client
//! implements it on reqwest, the web app on the browser's fetch. Session
//! credentials (the backend's cookie) are attached by the transport.

use async_trait::async_trait;
use tracing::debug;

use crate::error::Result;
use crate::types::{ActivePlaylist, AuthUrl, LoginStatus, Playlist, Profile, Track};

#[async_trait(?Send)]
pub trait SimmerApi {
    /// `GET login`
    async fn login_status(&self) -> Result<LoginStatus>;

    /// `POST login`: returns the OAuth authorization URL. Opening it and
    /// waiting for the user is the caller's job.
    async fn login(&self) -> Result<AuthUrl>;

    /// `GET logout`: invalidates the backend session, returns the redirect
    /// target.
    async fn logout(&self) -> Result<String>;

    /// `GET me`
    async fn me(&self) -> Result<Profile>;

    /// `GET playlists`. Never cached.
    async fn list_playlists(&self) -> Result<Vec<Playlist>>;

    /// `GET playlist/{id}/tracks`
    async fn playlist_tracks(&self, playlist_id: &str) -> Result<Vec<Track>>;

    /// `GET simmered_playlist/{id}/tracks`: reorders one playlist with the
    /// named evaluator, optionally writing the result back to the service.
    /// Not retried.
    async fn request_transformation(
        &self,
        playlist_id: &str,
        evaluator: &str,
        write_back: bool,
    ) -> Result<Vec<Track>>;

    /// `GET playlist_id`
    async fn active_playlist(&self) -> Result<ActivePlaylist>;

    /// `PUT playlist_id`
    async fn set_active_playlist(&self, playlist_id: &str) -> Result<ActivePlaylist>;

    /// Login state that never fails: any error counts as logged out.
    async fn check_session(&self) -> bool {
        match self.login_status().await {
            Ok(status) => status.logged_in,
            Err(e) => {
                debug!(error = %e, "session check failed, treating as logged out");
                false
            }
        }
    }
}
