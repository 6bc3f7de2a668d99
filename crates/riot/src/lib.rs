//! Riot Games REST client for Valorant content and ranked leaderboards.
//!
//! Provides [`api::LeaderboardFetcher`], which resolves the active act
//! and downloads its leaderboard, and [`config::RiotApiConfig`], which
//! carries the injected API key and endpoint settings.

pub mod api;
pub mod config;

pub use api::{LeaderboardFetcher, RiotApiError};
pub use config::RiotApiConfig;
