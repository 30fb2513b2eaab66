use once_cell::sync::Lazy;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Shared HTTP client with reasonable defaults for timeouts
static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .user_agent("tunecards/0.1")
        .timeout(std::time::Duration::from_secs(10))
        .build()
        .expect("failed to build HTTP client")
});

/// Track record as fetched from the playlist source and stored on disk next
/// to each QR image. Immutable once loaded; the layout step reads it as-is.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrackMetadata {
    #[serde(default = "unknown_name")]
    pub name: String,
    #[serde(default = "unknown_artists")]
    pub artists: Vec<String>,
    #[serde(default = "unknown_year")]
    pub release_year: String,
    #[serde(default)]
    pub album: String,
    #[serde(default)]
    pub spotify_url: String,
}

fn unknown_name() -> String {
    "Unknown".to_string()
}

fn unknown_artists() -> Vec<String> {
    vec!["Unknown Artist".to_string()]
}

fn unknown_year() -> String {
    "Unknown".to_string()
}

#[derive(Error, Debug)]
pub enum SpotifyError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("API error: {0}")]
    Api(String),
    #[error("Auth error: {0}")]
    Auth(String),
    #[error("Serde error: {0}")]
    Serde(#[from] serde_json::Error),
}

// Re-export HTTP client for the API calls within the spotify module
pub(crate) fn http_client() -> &'static Client {
    &HTTP_CLIENT
}
