//! Spotify web token retrieval
//!
//! The music widget needs a short-lived Spotify access token. The public
//! web player embeds one in a `<script id="session">` JSON block on every
//! page, so we fetch the search page and scrape it out; no credentials
//! involved, same token the anonymous web player uses.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

const SESSION_PAGE_URL: &str = "https://open.spotify.com/search";

/// The session blob spans lines, hence `(?s)`
static SESSION_SCRIPT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"(?s)<script id="session" data-testid="session" type="application/json"[^>]*>(.*?)</script>"#,
    )
    .expect("session script regex must compile")
});

#[derive(Debug, Error)]
pub enum SpotifyError {
    #[error("token page request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("session script not found in page")]
    SessionNotFound,
    #[error("failed to parse session payload: {0}")]
    Parse(#[from] serde_json::Error),
}

#[derive(Deserialize)]
struct SessionPayload {
    #[serde(rename = "accessToken")]
    access_token: String,
}

/// Track shape returned by the Spotify search API, trimmed to the fields
/// the music widget renders
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SpotifyTrack {
    pub id: String,
    pub name: String,
    pub artists: Vec<SpotifyArtist>,
    pub album: SpotifyAlbum,
    pub external_urls: SpotifyExternalUrls,
    pub preview_url: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SpotifyArtist {
    pub id: String,
    pub name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SpotifyAlbum {
    pub name: String,
    pub images: Vec<SpotifyImage>,
    pub href: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SpotifyImage {
    pub url: String,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SpotifyExternalUrls {
    pub spotify: String,
}

/// Fetch an anonymous Spotify web access token.
///
/// # Errors
///
/// Returns an error if the page fetch fails, the session script is missing
/// (Spotify changed their markup), or the embedded JSON does not parse.
pub async fn get_spotify_token(client: &reqwest::Client) -> Result<String, SpotifyError> {
    let body = client.get(SESSION_PAGE_URL).send().await?.text().await?;
    extract_access_token(&body)
}

fn extract_access_token(html: &str) -> Result<String, SpotifyError> {
    let captures = SESSION_SCRIPT_RE
        .captures(html)
        .ok_or(SpotifyError::SessionNotFound)?;
    let payload: SessionPayload = serde_json::from_str(&captures[1])?;
    Ok(payload.access_token)
}
