//! `valboard-sync` library crate.
//!
//! Copies the current act's ranked leaderboard from the Riot API into
//! the leaderboard table. The binary entrypoint lives in `main.rs`.

pub mod config;
pub mod pipeline;

pub use config::SyncConfig;
pub use pipeline::{LeaderboardSync, SyncError, SyncFailure, SyncOptions, SyncReport};
