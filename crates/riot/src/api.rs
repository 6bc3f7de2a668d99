//! REST client for the Valorant content and ranked endpoints.
//!
//! Each call issues exactly one `GET` with the API key as the `api_key`
//! query parameter. There is no retry, backoff, or timeout beyond the
//! transport defaults of [`reqwest`].

use serde::de::DeserializeOwned;
use valboard_core::content::{ActiveAct, ContentDocument};
use valboard_core::leaderboard::Leaderboard;

use crate::config::{validate_page_size, RiotApiConfig};

const CONTENT_PATH: &str = "/val/content/v1/contents";
const LEADERBOARD_PATH: &str = "/val/ranked/v1/leaderboards/by-act";

/// HTTP client for the Riot Valorant API.
pub struct LeaderboardFetcher {
    client: reqwest::Client,
    config: RiotApiConfig,
}

/// Errors from the Riot REST API layer.
#[derive(Debug, thiserror::Error)]
pub enum RiotApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Riot returned a non-2xx status code.
    #[error("Riot API error ({status}): {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The body was not the expected JSON document.
    #[error("Failed to decode {endpoint} response: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// The request was rejected before being sent.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl LeaderboardFetcher {
    pub fn new(config: RiotApiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    /// Fetch the full content document.
    ///
    /// Sends `GET /val/content/v1/contents?locale={locale}&api_key={key}`.
    pub async fn get_content(&self) -> Result<ContentDocument, RiotApiError> {
        let response = self
            .client
            .get(format!("{}{CONTENT_PATH}", self.config.base_url))
            .query(&[
                ("locale", self.config.locale.as_str()),
                ("api_key", self.config.api_key.as_str()),
            ])
            .send()
            .await?;

        Self::parse_response(response, "content").await
    }

    /// Resolve the id of the currently active act.
    ///
    /// Returns an empty string when no act is both active and of type
    /// `act`. When several qualify, the last one in feed order wins and a
    /// warning is logged.
    pub async fn get_active_act_id(&self) -> Result<String, RiotApiError> {
        let content = self.get_content().await?;

        match content.active_act() {
            ActiveAct::None => {
                tracing::warn!(
                    acts = content.acts.len(),
                    "No active act in content feed"
                );
            }
            ActiveAct::Unique(act) => {
                tracing::debug!(act_id = %act.id, act_name = %act.name, "Resolved active act");
            }
            ActiveAct::Ambiguous {
                selected,
                candidates,
            } => {
                tracing::warn!(
                    act_id = %selected.id,
                    candidates,
                    "Several acts are marked active, using the last one"
                );
            }
        }

        Ok(content.active_act_id())
    }

    /// Fetch the configured leaderboard page for `act_id`.
    pub async fn get_leaderboard(&self, act_id: &str) -> Result<Leaderboard, RiotApiError> {
        self.get_leaderboard_page(act_id, self.config.page_size, self.config.start_index)
            .await
    }

    /// Fetch one leaderboard page.
    ///
    /// Sends `GET /val/ranked/v1/leaderboards/by-act/{act_id}` with `size`,
    /// `startIndex` and `api_key` query parameters.
    pub async fn get_leaderboard_page(
        &self,
        act_id: &str,
        size: u32,
        start_index: u32,
    ) -> Result<Leaderboard, RiotApiError> {
        validate_act_id(act_id)?;
        validate_page_size(size).map_err(|e| RiotApiError::InvalidRequest(e.to_string()))?;

        let size = size.to_string();
        let start_index = start_index.to_string();
        let response = self
            .client
            .get(format!("{}{LEADERBOARD_PATH}/{act_id}", self.config.base_url))
            .query(&[
                ("size", size.as_str()),
                ("startIndex", start_index.as_str()),
                ("api_key", self.config.api_key.as_str()),
            ])
            .send()
            .await?;

        let leaderboard: Leaderboard = Self::parse_response(response, "leaderboard").await?;
        tracing::debug!(
            act_id,
            shard = %leaderboard.shard,
            total_players = leaderboard.total_players,
            players = leaderboard.players.len(),
            "Fetched leaderboard page"
        );
        Ok(leaderboard)
    }

    // ---- private helpers ----

    /// Ensure the response has a success status code. Returns the
    /// response unchanged on success, or a [`RiotApiError::Status`]
    /// containing the status and body text on failure.
    async fn ensure_success(
        response: reqwest::Response,
    ) -> Result<reqwest::Response, RiotApiError> {
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(RiotApiError::Status {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }

    /// Read a successful body and decode it, keeping transport and
    /// decode failures apart.
    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
        endpoint: &'static str,
    ) -> Result<T, RiotApiError> {
        let response = Self::ensure_success(response).await?;
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|source| RiotApiError::Decode { endpoint, source })
    }
}

/// Act ids are interpolated into the URL path.
fn validate_act_id(act_id: &str) -> Result<(), RiotApiError> {
    if act_id.is_empty() {
        return Err(RiotApiError::InvalidRequest("act id is empty".into()));
    }
    if act_id.contains(['/', '?', '#', '%']) || act_id.chars().any(char::is_whitespace) {
        return Err(RiotApiError::InvalidRequest(format!(
            "act id {act_id:?} contains reserved characters"
        )));
    }
    Ok(())
}
