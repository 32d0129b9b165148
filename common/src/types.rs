//! Backend payload types
//!
//! Shared by the terminal client and the web app:
//! - Playlist / PlaylistPage: `GET playlists`
//! - Profile: `GET me`
//! - Track: every track-list endpoint
//! - LoginStatus / AuthUrl / ActivePlaylist: small session and bookkeeping bodies

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Image reference as returned by the streaming service
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

/// A playlist owned or followed by the current user
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "PlaylistWire")]
pub struct Playlist {
    pub id: String,
    pub name: String,
    pub description: String,
    pub cover_image_url: Option<String>,
}

impl Playlist {
    pub fn to_ref(&self) -> PlaylistRef {
        PlaylistRef::new(&self.id, &self.name)
    }
}

/// Playlist as it arrives on the wire. Accepts both the service's shape
/// (`images`) and our own serialized shape (`cover_image_url`).
#[derive(Deserialize)]
struct PlaylistWire {
    id: String,
    #[serde(default)]
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    images: Option<Vec<Image>>,
    #[serde(default)]
    cover_image_url: Option<String>,
}

impl From<PlaylistWire> for Playlist {
    fn from(wire: PlaylistWire) -> Self {
        let cover_image_url = wire.cover_image_url.or_else(|| {
            wire.images
                .unwrap_or_default()
                .into_iter()
                .map(|image| image.url)
                .find(|url| !url.is_empty())
        });

        Self {
            id: wire.id,
            name: wire.name,
            description: wire.description.unwrap_or_default(),
            cover_image_url,
        }
    }
}

/// Body of `GET playlists`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaylistPage {
    #[serde(default)]
    pub items: Vec<Playlist>,
}

/// Identity of a playlist inside the pending selection
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlaylistRef {
    pub id: String,
    pub name: String,
}

impl PlaylistRef {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalUrls {
    #[serde(default)]
    pub spotify: Option<String>,
}

/// Current user's profile (`GET me`)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub images: Vec<Image>,
    #[serde(default)]
    pub external_urls: ExternalUrls,
}

impl Profile {
    pub fn avatar_url(&self) -> Option<&str> {
        self.images.first().map(|image| image.url.as_str())
    }

    pub fn profile_url(&self) -> Option<&str> {
        self.external_urls.spotify.as_deref()
    }

    pub fn display_name_or_default(&self) -> &str {
        self.display_name.as_deref().unwrap_or("(unnamed)")
    }
}

fn null_as_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// One track of a playlist
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "TrackWire")]
pub struct Track {
    pub name: String,
    pub artist: String,
}

impl Track {
    pub fn new(name: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            artist: artist.into(),
        }
    }

    /// Splits a `"<song> by <artist>"` line. Without a separator the whole
    /// line is the song name.
    pub fn from_line(line: &str) -> Self {
        match line.split_once(" by ") {
            Some((name, artist)) => Self::new(name.trim(), artist.trim()),
            None => Self::new(line.trim(), ""),
        }
    }
}

impl std::fmt::Display for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.artist.is_empty() {
            write!(f, "{}", self.name)
        } else {
            write!(f, "{} by {}", self.name, self.artist)
        }
    }
}

#[derive(Deserialize)]
struct ArtistWire {
    name: String,
}

#[derive(Deserialize)]
struct TrackObject {
    name: String,
    #[serde(default)]
    artists: Vec<ArtistWire>,
    #[serde(default)]
    artist: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum TrackWire {
    Line(String),
    Wrapped { track: TrackObject },
    Object(TrackObject),
}

impl From<TrackObject> for Track {
    fn from(object: TrackObject) -> Self {
        let artist = match object.artist {
            Some(artist) => artist,
            None => object
                .artists
                .into_iter()
                .map(|a| a.name)
                .collect::<Vec<_>>()
                .join(", "),
        };
        Self::new(object.name, artist)
    }
}

impl From<TrackWire> for Track {
    fn from(wire: TrackWire) -> Self {
        match wire {
            TrackWire::Line(line) => Track::from_line(&line),
            TrackWire::Wrapped { track } => track.into(),
            TrackWire::Object(object) => object.into(),
        }
    }
}

/// Decodes a track-list body. Accepts a bare array, `{items: [...]}`,
/// `{tracks: [...]}` or `null`.
pub fn parse_track_list(value: serde_json::Value) -> Result<Vec<Track>> {
    let list = match value {
        serde_json::Value::Null => return Ok(Vec::new()),
        serde_json::Value::Array(_) => value,
        serde_json::Value::Object(mut map) => {
            match map.remove("items").or_else(|| map.remove("tracks")) {
                Some(inner) => inner,
                None => return Err(Error::Parse("track list not found".to_string())),
            }
        }
        other => {
            return Err(Error::Parse(format!("unexpected track list: {}", other)));
        }
    };

    serde_json::from_value(list).map_err(|e| Error::Parse(format!("track list: {}", e)))
}

/// Decodes the body of a transformation request. The backend either returns
/// the reordered track list or a bare acknowledgement (empty body or an
/// object without a track list), which yields no tracks.
pub fn parse_transformation_ack(body: &str) -> Result<Vec<Track>> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| Error::Parse(format!("transformation response: {}", e)))?;
    match &value {
        serde_json::Value::Object(map)
            if !map.contains_key("items") && !map.contains_key("tracks") =>
        {
            Ok(Vec::new())
        }
        _ => parse_track_list(value),
    }
}

/// Body of `GET login`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginStatus {
    #[serde(default)]
    pub logged_in: bool,
}

/// Body of `POST login`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUrl {
    pub auth_url: String,
}

/// Body of `GET/PUT playlist_id`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivePlaylist {
    #[serde(default)]
    pub playlist_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_playlist_from_service_shape() {
        let playlist: Playlist = serde_json::from_value(json!({
            "id": "37i9dQZF1DX",
            "name": "Lo-fi",
            "description": "beats to simmer to",
            "images": [{"url": "https://i.scdn.co/a.jpg", "height": 640, "width": 640}]
        }))
        .unwrap();

        assert_eq!(playlist.id, "37i9dQZF1DX");
        assert_eq!(playlist.name, "Lo-fi");
        assert_eq!(playlist.description, "beats to simmer to");
        assert_eq!(playlist.cover_image_url.as_deref(), Some("https://i.scdn.co/a.jpg"));
    }

    #[test]
    fn test_playlist_without_images_or_description() {
        let playlist: Playlist = serde_json::from_value(json!({
            "id": "p1",
            "name": "Empty",
            "description": null,
            "images": null
        }))
        .unwrap();

        assert_eq!(playlist.description, "");
        assert!(playlist.cover_image_url.is_none());
    }

    #[test]
    fn test_playlist_serialized_shape_reloads() {
        let playlist = Playlist {
            id: "p1".to_string(),
            name: "Road trip".to_string(),
            description: String::new(),
            cover_image_url: Some("https://img/1.png".to_string()),
        };
        let json = serde_json::to_string(&playlist).unwrap();
        let loaded: Playlist = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded, playlist);
    }

    #[test]
    fn test_playlist_page() {
        let page: PlaylistPage = serde_json::from_value(json!({
            "items": [{"id": "a", "name": "A"}, {"id": "b", "name": "B"}],
            "total": 2
        }))
        .unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.items[1].to_ref(), PlaylistRef::new("b", "B"));
    }

    #[test]
    fn test_track_from_line() {
        assert_eq!(Track::from_line("Hop by The Toads"), Track::new("Hop", "The Toads"));
        assert_eq!(Track::from_line("Untitled"), Track::new("Untitled", ""));
    }

    #[test]
    fn test_parse_track_list_shapes() {
        let lines = parse_track_list(json!(["Ribbit by Frog", "Croak"])).unwrap();
        assert_eq!(lines, vec![Track::new("Ribbit", "Frog"), Track::new("Croak", "")]);

        let objects = parse_track_list(json!({
            "items": [
                {"track": {"name": "Pond", "artists": [{"name": "A"}, {"name": "B"}]}},
                {"name": "Lily", "artists": []}
            ]
        }))
        .unwrap();
        assert_eq!(objects, vec![Track::new("Pond", "A, B"), Track::new("Lily", "")]);

        let tracks = parse_track_list(json!({"tracks": ["Leap by Toad"]})).unwrap();
        assert_eq!(tracks, vec![Track::new("Leap", "Toad")]);

        assert!(parse_track_list(serde_json::Value::Null).unwrap().is_empty());
    }

    #[test]
    fn test_parse_track_list_rejects_unknown_shape() {
        assert!(matches!(parse_track_list(json!({"foo": 1})), Err(Error::Parse(_))));
        assert!(matches!(parse_track_list(json!(42)), Err(Error::Parse(_))));
    }

    #[test]
    fn test_parse_transformation_ack() {
        assert!(parse_transformation_ack("").unwrap().is_empty());
        assert!(parse_transformation_ack(r#"{"success": true}"#).unwrap().is_empty());
        assert_eq!(
            parse_transformation_ack(r#"["Hop by Toad"]"#).unwrap(),
            vec![Track::new("Hop", "Toad")]
        );
        assert!(matches!(parse_transformation_ack("<html>"), Err(Error::Parse(_))));
    }

    #[test]
    fn test_track_display() {
        assert_eq!(Track::new("Hop", "Toad").to_string(), "Hop by Toad");
        assert_eq!(Track::new("Hop", "").to_string(), "Hop");
    }

    #[test]
    fn test_profile_accessors() {
        let profile: Profile = serde_json::from_value(json!({
            "display_name": "toadfan",
            "images": null,
            "external_urls": {"spotify": "https://open.spotify.com/user/toadfan"}
        }))
        .unwrap();

        assert_eq!(profile.display_name_or_default(), "toadfan");
        assert!(profile.avatar_url().is_none());
        assert_eq!(profile.profile_url(), Some("https://open.spotify.com/user/toadfan"));
    }

    #[test]
    fn test_login_status_default_false() {
        let status: LoginStatus = serde_json::from_value(json!({})).unwrap();
        assert!(!status.logged_in);
    }
}
