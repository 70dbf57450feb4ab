use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

const USER_AGENT: &str = concat!("santa-town/", env!("CARGO_PKG_VERSION"));

/// Shown when the backend fails without a usable `detail` message.
pub const GENERIC_FAILURE: &str = "Failed to process image. Please try again.";

#[derive(Debug, Clone, Serialize)]
struct PixelifyRequest {
    image_base64: String,
}

/// Successful response from `/api/pixelify`. Fields beyond `result_text`
/// are tolerated when missing so older backends still work.
#[derive(Debug, Clone, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct PixelifyResponse {
    pub id: String,
    pub original_image: String,
    pub result_text: String,
    pub generated_image: String,
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct HistoryEntry {
    pub id: String,
    pub result_text: String,
    pub generated_image: String,
    pub timestamp: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ErrorBody {
    detail: Option<String>,
}

/// Client for the pixelify backend.
#[derive(Clone)]
pub struct PixelifyClient {
    client: Client,
    base_url: String,
}

impl PixelifyClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .context("failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// Submit a data-URL-encoded image and get back the description of
    /// its Santa version.
    pub fn pixelify(&self, image_base64: &str) -> Result<PixelifyResponse> {
        let url = format!("{}/api/pixelify", self.base_url);
        let body = PixelifyRequest {
            image_base64: image_base64.to_string(),
        };

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .context("failed to reach the pixelify backend")?;

        if response.status().is_success() {
            response.json().context("failed to parse response")
        } else {
            let body = response.bytes().unwrap_or_default();
            bail!("{}", failure_message(&body));
        }
    }

    /// Recent conversions, newest first. The backend caps this at ten.
    pub fn history(&self) -> Result<Vec<HistoryEntry>> {
        let url = format!("{}/api/history", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .context("failed to reach the pixelify backend")?;

        if response.status().is_success() {
            response.json().context("failed to parse history")
        } else {
            bail!("history request failed: HTTP {}", response.status());
        }
    }
}

/// User-facing message for a failed pixelify call: the payload's
/// `detail` field when present, a fixed fallback otherwise.
fn failure_message(body: &[u8]) -> String {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|e| e.detail)
        .unwrap_or_else(|| GENERIC_FAILURE.to_string())
}
