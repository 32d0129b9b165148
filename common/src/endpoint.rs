//! Backend route table
//!
//! Paths are relative to the API base (`/api/`), so both transports can join
//! them onto whatever base they were configured with.

/// HTTP verb used by an endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint<'a> {
    LoginStatus,
    Login,
    Logout,
    Me,
    Playlists,
    PlaylistTracks(&'a str),
    SimmeredTracks {
        playlist_id: &'a str,
        evaluator: &'a str,
        to_spotify: bool,
    },
    ActivePlaylist,
    SetActivePlaylist,
}

impl Endpoint<'_> {
    pub fn method(&self) -> HttpMethod {
        match self {
            Endpoint::Login => HttpMethod::Post,
            Endpoint::SetActivePlaylist => HttpMethod::Put,
            _ => HttpMethod::Get,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Endpoint::LoginStatus | Endpoint::Login => "login".to_string(),
            Endpoint::Logout => "logout".to_string(),
            Endpoint::Me => "me".to_string(),
            Endpoint::Playlists => "playlists".to_string(),
            Endpoint::PlaylistTracks(id) => format!("playlist/{}/tracks", encode_segment(id)),
            Endpoint::SimmeredTracks { playlist_id, .. } => {
                format!("simmered_playlist/{}/tracks", encode_segment(playlist_id))
            }
            Endpoint::ActivePlaylist | Endpoint::SetActivePlaylist => "playlist_id".to_string(),
        }
    }

    pub fn query(&self) -> Vec<(&'static str, String)> {
        match self {
            Endpoint::SimmeredTracks {
                evaluator,
                to_spotify,
                ..
            } => vec![
                ("to_spotify", to_spotify.to_string()),
                ("evaluator", evaluator.to_string()),
            ],
            _ => Vec::new(),
        }
    }

    /// Path plus encoded query string, e.g.
    /// `simmered_playlist/abc/tracks?to_spotify=false&evaluator=tsp`
    pub fn path_and_query(&self) -> String {
        let query = self.query();
        if query.is_empty() {
            return self.path();
        }

        let pairs = query
            .iter()
            .map(|(k, v)| format!("{}={}", k, encode_segment(v)))
            .collect::<Vec<_>>()
            .join("&");
        format!("{}?{}", self.path(), pairs)
    }
}

/// Percent-encodes everything outside the RFC 3986 unreserved set.
pub fn encode_segment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{:02X}", byte)),
        }
    }
    out
}
