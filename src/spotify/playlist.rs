//! Playlist lookup and track listing via the Spotify Web API.

use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::spotify::types::{SpotifyError, TrackMetadata, http_client};

const API_BASE: &str = "https://api.spotify.com/v1";

/// One page of any Spotify listing endpoint; `next` carries the full URL of
/// the following page or null on the last one.
#[derive(Deserialize)]
struct Paging<T> {
    items: Vec<T>,
    next: Option<String>,
}

#[derive(Deserialize)]
struct PlaylistSummary {
    id: String,
    name: String,
}

#[derive(Deserialize)]
struct PlaylistItem {
    // Null for removed/unavailable entries; those are skipped.
    track: Option<TrackObject>,
}

#[derive(Deserialize)]
struct TrackObject {
    name: String,
    artists: Vec<ArtistObject>,
    album: AlbumObject,
    #[serde(default)]
    external_urls: ExternalUrls,
}

#[derive(Deserialize)]
struct ArtistObject {
    name: String,
}

#[derive(Deserialize)]
struct AlbumObject {
    #[serde(default)]
    name: String,
    #[serde(default)]
    release_date: String,
}

#[derive(Deserialize, Default)]
struct ExternalUrls {
    #[serde(default)]
    spotify: String,
}

/// Collect every item of a paged listing by following `next` links.
async fn fetch_all_pages<T: DeserializeOwned>(
    token: &str,
    first_url: String,
) -> Result<Vec<T>, SpotifyError> {
    let mut items = Vec::new();
    let mut url = Some(first_url);

    while let Some(page_url) = url {
        let resp = http_client()
            .get(&page_url)
            .bearer_auth(token)
            .send()
            .await?;

        if !resp.status().is_success() {
            return Err(SpotifyError::Api(format!(
                "GET {page_url}: HTTP {}",
                resp.status()
            )));
        }

        let page: Paging<T> = resp.json().await?;
        items.extend(page.items);
        url = page.next;
    }

    Ok(items)
}

/// Find a playlist by exact name among a user's public playlists.
///
/// Returns `Ok(None)` when no playlist of that name exists; that is a user
/// input problem, not an API failure.
pub async fn find_playlist_id(
    token: &str,
    user: &str,
    playlist_name: &str,
) -> Result<Option<String>, SpotifyError> {
    let url = format!(
        "{API_BASE}/users/{}/playlists?limit=50",
        urlencoding::encode(user)
    );
    let playlists: Vec<PlaylistSummary> = fetch_all_pages(token, url).await?;

    Ok(playlists
        .into_iter()
        .find(|p| p.name == playlist_name)
        .map(|p| p.id))
}

/// Fetch all tracks of a playlist as metadata records, skipping null entries.
pub async fn fetch_playlist_tracks(
    token: &str,
    playlist_id: &str,
) -> Result<Vec<TrackMetadata>, SpotifyError> {
    let url = format!(
        "{API_BASE}/playlists/{}/tracks?limit=100",
        urlencoding::encode(playlist_id)
    );
    let items: Vec<PlaylistItem> = fetch_all_pages(token, url).await?;

    let tracks = items
        .into_iter()
        .filter_map(|item| item.track)
        .map(track_to_metadata)
        .collect();
    Ok(tracks)
}

fn track_to_metadata(track: TrackObject) -> TrackMetadata {
    TrackMetadata {
        name: track.name,
        artists: track.artists.into_iter().map(|a| a.name).collect(),
        release_year: release_year(&track.album.release_date),
        album: track.album.name,
        spotify_url: track.external_urls.spotify,
    }
}

/// First four characters of an album release date ("1991-09-24" -> "1991").
/// Dates missing or shorter than a year degrade to "Unknown".
fn release_year(release_date: &str) -> String {
    let year: String = release_date.chars().take(4).collect();
    if year.len() == 4 {
        year
    } else {
        "Unknown".to_string()
    }
}
