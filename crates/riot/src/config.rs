use std::fmt;

use valboard_core::config::{env_or, env_parse_or, env_var};
use valboard_core::error::CoreError;

/// Default regional routing value.
pub const DEFAULT_REGION: &str = "latam";
/// Default locale requested from the content endpoint.
pub const DEFAULT_LOCALE: &str = "en-US";
/// Largest page the ranked endpoint serves.
pub const MAX_PAGE_SIZE: u32 = 200;

/// Settings for [`LeaderboardFetcher`](crate::api::LeaderboardFetcher).
#[derive(Clone)]
pub struct RiotApiConfig {
    /// Base URL without trailing slash, e.g. `https://latam.api.riotgames.com`.
    pub base_url: String,
    pub api_key: String,
    pub locale: String,
    /// Players requested per leaderboard page (1..=200).
    pub page_size: u32,
    pub start_index: u32,
}

impl RiotApiConfig {
    /// Configuration for the given region's public endpoint with the
    /// default locale and a single full page starting at rank 0.
    pub fn new(region: &str, api_key: impl Into<String>) -> Self {
        Self {
            base_url: regional_base_url(region),
            api_key: api_key.into(),
            locale: DEFAULT_LOCALE.to_string(),
            page_size: MAX_PAGE_SIZE,
            start_index: 0,
        }
    }

    /// Point the client at a different host (proxies, local fixtures).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Load configuration from environment variables.
    ///
    /// | Env Var                        | Default  |
    /// |--------------------------------|----------|
    /// | `RIOT_API_KEY`                 | required |
    /// | `RIOT_REGION`                  | `latam`  |
    /// | `RIOT_BASE_URL`                | derived from `RIOT_REGION` |
    /// | `RIOT_LOCALE`                  | `en-US`  |
    /// | `RIOT_LEADERBOARD_PAGE_SIZE`   | `200`    |
    /// | `RIOT_LEADERBOARD_START_INDEX` | `0`      |
    pub fn from_env() -> Result<Self, CoreError> {
        let api_key = env_var("RIOT_API_KEY")?;
        let region = env_or("RIOT_REGION", DEFAULT_REGION);

        let mut config = Self::new(&region, api_key);
        if let Ok(base_url) = env_var("RIOT_BASE_URL") {
            config = config.with_base_url(base_url);
        }
        config.locale = env_or("RIOT_LOCALE", DEFAULT_LOCALE);
        config.page_size = env_parse_or("RIOT_LEADERBOARD_PAGE_SIZE", MAX_PAGE_SIZE)?;
        config.start_index = env_parse_or("RIOT_LEADERBOARD_START_INDEX", 0)?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), CoreError> {
        if self.api_key.is_empty() {
            return Err(CoreError::Validation("Riot API key is empty".into()));
        }
        validate_page_size(self.page_size)
    }
}

// The API key is a credential; keep it out of logs.
impl fmt::Debug for RiotApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RiotApiConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .field("locale", &self.locale)
            .field("page_size", &self.page_size)
            .field("start_index", &self.start_index)
            .finish()
    }
}

/// `https://{region}.api.riotgames.com`
pub fn regional_base_url(region: &str) -> String {
    format!("https://{}.api.riotgames.com", region.to_ascii_lowercase())
}

pub(crate) fn validate_page_size(size: u32) -> Result<(), CoreError> {
    if size == 0 || size > MAX_PAGE_SIZE {
        return Err(CoreError::Validation(format!(
            "leaderboard page size must be within 1..={MAX_PAGE_SIZE}, got {size}"
        )));
    }
    Ok(())
}
