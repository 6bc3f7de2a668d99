//! Shared domain types for the Valorant leaderboard sync.
//!
//! Holds the wire models returned by the Riot content and ranked
//! endpoints, the record persisted per player, the active-act selection
//! policy, and the environment-config helpers used by every crate.

pub mod config;
pub mod content;
pub mod error;
pub mod leaderboard;
pub mod record;
