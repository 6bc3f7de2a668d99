//! One sync pass: resolve the act, fetch its leaderboard, write a row per
//! player.
//!
//! Calls are strictly sequential. A failed player write is logged and
//! recorded in the [`SyncReport`]; the pass carries on with the next
//! player. Fetch failures and table management failures abort the pass.
//!
//! Players without an id all share the sentinel key, so later writes
//! replace earlier ones. Those writes are counted in
//! [`SyncReport::overwritten`].

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use valboard_db::{LeaderboardStore, StoreError};
use valboard_riot::{LeaderboardFetcher, RiotApiError};

/// Knobs for a single pass.
#[derive(Debug, Clone, Default)]
pub struct SyncOptions {
    /// Drop (if present) and recreate the table before writing.
    pub reset_table: bool,
    /// Fail instead of picking the last match when several acts are active.
    pub require_unique_act: bool,
    /// Skip act resolution and sync this act.
    pub act_id: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error(transparent)]
    Fetch(#[from] RiotApiError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("No active act in the content feed")]
    NoActiveAct,

    #[error("Several acts are marked active: {}", .0.join(", "))]
    AmbiguousAct(Vec<String>),
}

/// A player row that could not be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncFailure {
    /// Resolved player id (possibly the sentinel).
    pub player_id: String,
    pub error: String,
}

/// Outcome of a completed pass.
#[derive(Debug, Clone)]
pub struct SyncReport {
    pub act_id: String,
    pub shard: String,
    /// `totalPlayers` as reported by the API (all pages).
    pub total_players: i64,
    /// Players present in the fetched page.
    pub fetched: usize,
    pub written: usize,
    /// Writes that replaced a row written earlier in the same pass.
    pub overwritten: usize,
    pub failures: Vec<SyncFailure>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl SyncReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Rows this pass left in the table for its act.
    pub fn distinct_rows(&self) -> usize {
        self.written - self.overwritten
    }
}

/// Runs sync passes from a fetcher into a store.
pub struct LeaderboardSync<S> {
    fetcher: LeaderboardFetcher,
    store: S,
}

impl<S: LeaderboardStore> LeaderboardSync<S> {
    pub fn new(fetcher: LeaderboardFetcher, store: S) -> Self {
        Self { fetcher, store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub async fn run(&self, options: &SyncOptions) -> Result<SyncReport, SyncError> {
        let started_at = Utc::now();

        if options.reset_table {
            self.reset_table().await?;
        }

        let act_id = self.resolve_act(options).await?;
        tracing::info!(act_id = %act_id, "Syncing leaderboard");

        let leaderboard = self.fetcher.get_leaderboard(&act_id).await?;
        if !leaderboard.act_id.is_empty() && leaderboard.act_id != act_id {
            tracing::warn!(
                requested = %act_id,
                returned = %leaderboard.act_id,
                "Leaderboard act id differs from the requested act"
            );
        }

        let mut written = 0;
        let mut overwritten = 0;
        let mut seen = HashSet::new();
        let mut failures = Vec::new();
        for player in &leaderboard.players {
            match self.store.add_leaderboard_item(&act_id, player).await {
                Ok(player_id) => {
                    written += 1;
                    tracing::trace!(
                        player_id = %player_id,
                        rank = player.rank,
                        "Wrote leaderboard item"
                    );
                    if seen.contains(&player_id) {
                        overwritten += 1;
                        tracing::warn!(
                            act_id = %act_id,
                            player_id = %player_id,
                            rank = player.rank,
                            "Leaderboard item replaced a row written earlier in this pass"
                        );
                    } else {
                        seen.insert(player_id);
                    }
                }
                Err(e) => {
                    tracing::error!(
                        act_id = %act_id,
                        player_id = %e.player_id,
                        error = %e.source,
                        "Failed to write leaderboard item"
                    );
                    failures.push(SyncFailure {
                        player_id: e.player_id,
                        error: e.source.to_string(),
                    });
                }
            }
        }

        let report = SyncReport {
            act_id,
            shard: leaderboard.shard,
            total_players: leaderboard.total_players,
            fetched: leaderboard.players.len(),
            written,
            overwritten,
            failures,
            started_at,
            finished_at: Utc::now(),
        };

        tracing::info!(
            act_id = %report.act_id,
            shard = %report.shard,
            fetched = report.fetched,
            written = report.written,
            overwritten = report.overwritten,
            failed = report.failures.len(),
            "Leaderboard sync finished"
        );
        Ok(report)
    }

    async fn resolve_act(&self, options: &SyncOptions) -> Result<String, SyncError> {
        if let Some(act_id) = options.act_id.as_ref().filter(|id| !id.is_empty()) {
            tracing::debug!(act_id = %act_id, "Using configured act id");
            return Ok(act_id.clone());
        }

        let act_id = if options.require_unique_act {
            let content = self.fetcher.get_content().await?;
            let candidates = content.active_act_candidates();
            if candidates.len() > 1 {
                return Err(SyncError::AmbiguousAct(candidates));
            }
            content.active_act_id()
        } else {
            self.fetcher.get_active_act_id().await?
        };

        if act_id.is_empty() {
            return Err(SyncError::NoActiveAct);
        }
        Ok(act_id)
    }

    async fn reset_table(&self) -> Result<(), StoreError> {
        match self.store.drop_table().await {
            Ok(()) => {}
            Err(StoreError::TableNotFound(_)) => {
                tracing::debug!(table = %self.store.table_name(), "Table absent, nothing to drop");
            }
            Err(e) => return Err(e),
        }
        self.store.create_table().await
    }
}
