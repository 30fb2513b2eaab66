//! Client-credentials token request against the Spotify accounts service.

use std::env;

use serde::Deserialize;

use crate::spotify::types::{SpotifyError, http_client};

const TOKEN_URL: &str = "https://accounts.spotify.com/api/token";

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Resolve API credentials from explicit values, falling back to the
/// `SPOTIFY_CLIENT_ID` / `SPOTIFY_CLIENT_SECRET` environment variables.
pub fn resolve_credentials(
    client_id: Option<String>,
    client_secret: Option<String>,
) -> Result<(String, String), SpotifyError> {
    let id = client_id
        .or_else(|| env::var("SPOTIFY_CLIENT_ID").ok())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| SpotifyError::Auth("missing client id (set SPOTIFY_CLIENT_ID)".into()))?;
    let secret = client_secret
        .or_else(|| env::var("SPOTIFY_CLIENT_SECRET").ok())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| {
            SpotifyError::Auth("missing client secret (set SPOTIFY_CLIENT_SECRET)".into())
        })?;
    Ok((id, secret))
}

/// Fetch a bearer token via the client-credentials grant.
///
/// This is the only authentication the tool performs; user-scoped flows are
/// out of scope since public playlist reads don't need them.
pub async fn fetch_access_token(
    client_id: &str,
    client_secret: &str,
) -> Result<String, SpotifyError> {
    let resp = http_client()
        .post(TOKEN_URL)
        .basic_auth(client_id, Some(client_secret))
        .form(&[("grant_type", "client_credentials")])
        .send()
        .await?;

    if !resp.status().is_success() {
        return Err(SpotifyError::Auth(format!(
            "token request failed: HTTP {}",
            resp.status()
        )));
    }

    let token: TokenResponse = resp.json().await?;
    Ok(token.access_token)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_credentials_win_over_env() {
        let (id, secret) =
            resolve_credentials(Some("abc".into()), Some("def".into())).unwrap();
        assert_eq!(id, "abc");
        assert_eq!(secret, "def");
    }

    #[test]
    fn missing_credentials_are_an_auth_error() {
        // Empty strings count as missing, same as absent flags.
        let err = resolve_credentials(Some(String::new()), Some(String::new()));
        assert!(matches!(err, Err(SpotifyError::Auth(_))));
    }
}
