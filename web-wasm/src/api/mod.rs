//! Backend access from the browser

pub mod fetch;

pub use fetch::FetchClient;

/// The app is served next to the backend, which mounts its routes here.
pub const API_BASE: &str = "/api/";
