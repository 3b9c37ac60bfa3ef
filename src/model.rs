//! Data models for the URL shortener
//!
//! Request/response bodies of the HTTP API and the record kept by the stores.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::codec::LinkId;

/// A stored link
///
/// Created exactly once when the store assigns its id and never modified
/// afterwards. The shortcode is not stored; it is always derived from `id`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    /// Store-assigned identifier, the source of the shortcode
    pub id: LinkId,

    /// The original long URL
    pub long_url: String,

    /// When the store accepted the record
    pub created_at: DateTime<Utc>,
}

/// Request payload for `POST /api/links`
///
/// # Example
/// ```json
/// { "url": "https://example.com/very/long/url" }
/// ```
#[derive(Deserialize, Debug)]
pub struct CreateLinkRequest {
    /// Missing in the body reads as empty and is refused by validation
    #[serde(default)]
    pub url: String,
}

/// Response returned after a link is created
///
/// # Example
/// ```json
/// { "shortcode": "1", "shortUrl": "http://localhost:8080/1" }
/// ```
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CreateLinkResponse {
    pub shortcode: String,

    #[serde(rename = "shortUrl")]
    pub short_url: String,
}
