//! Fixture Riot API and store helpers for sync tests.

use std::collections::HashMap;

use async_trait::async_trait;
use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use valboard_core::record::StoredLeaderboardRecord;
use valboard_db::{LeaderboardStore, MemoryLeaderboardStore, Projection, StoreError};
use valboard_riot::{LeaderboardFetcher, RiotApiConfig};

pub const API_KEY: &str = "RGAPI-test-key";

/// Bind `router` to `127.0.0.1:0` and return its base URL.
pub async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

pub fn fetcher(base_url: &str) -> LeaderboardFetcher {
    LeaderboardFetcher::new(RiotApiConfig::new("latam", API_KEY).with_base_url(base_url))
}

/// A Riot API serving `acts` from the content feed and `players` as the
/// leaderboard of every act.
pub fn riot_router(acts: Value, players: Value) -> Router {
    let players_total = players.as_array().map(Vec::len).unwrap_or_default();
    Router::new()
        .route(
            "/val/content/v1/contents",
            get(move || {
                let acts = acts.clone();
                async move { Json(json!({"version": "release-08.00", "acts": acts})) }
            }),
        )
        .route(
            "/val/ranked/v1/leaderboards/by-act/{act_id}",
            get(
                move |Path(act_id): Path<String>,
                      Query(params): Query<HashMap<String, String>>| {
                    let players = players.clone();
                    async move {
                        if params.get("api_key").map(String::as_str) != Some(API_KEY) {
                            return StatusCode::FORBIDDEN.into_response();
                        }
                        Json(json!({
                            "shard": "latam",
                            "actId": act_id,
                            "totalPlayers": players_total,
                            "players": players,
                        }))
                        .into_response()
                    }
                },
            ),
        )
}

pub fn acts(active: &[&str]) -> Value {
    let mut acts = vec![json!({
        "name": "EPISODE 8",
        "id": "E8",
        "isActive": true,
        "type": "episode"
    })];
    acts.extend(active.iter().map(|id| {
        json!({"name": format!("ACT {id}"), "id": id, "isActive": true, "type": "act"})
    }));
    Value::Array(acts)
}

pub fn players() -> Value {
    json!([
        {"puuid": "p-1", "gameName": "Foo", "tagLine": "1234",
         "leaderboardRank": 1, "rankedRating": 999, "numberOfWins": 10},
        {"puuid": "", "gameName": "Secret", "tagLine": "0000",
         "leaderboardRank": 2, "rankedRating": 950, "numberOfWins": 9},
        {"puuid": "p-3", "gameName": "Bar", "tagLine": "42",
         "leaderboardRank": 3, "rankedRating": 900, "numberOfWins": 8}
    ])
}

/// Never responds with a valid document; any request reaching it fails.
pub fn broken_router() -> Router {
    Router::new()
        .fallback(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response() })
}

/// Memory store whose writes fail for one player id.
pub struct FailingStore {
    pub inner: MemoryLeaderboardStore,
    pub fail_player_id: String,
}

#[async_trait]
impl LeaderboardStore for FailingStore {
    fn table_name(&self) -> &str {
        self.inner.table_name()
    }

    async fn create_table(&self) -> Result<(), StoreError> {
        self.inner.create_table().await
    }

    async fn drop_table(&self) -> Result<(), StoreError> {
        self.inner.drop_table().await
    }

    async fn find_all(
        &self,
        act_id: &str,
        projection: &Projection,
    ) -> Result<Vec<StoredLeaderboardRecord>, StoreError> {
        self.inner.find_all(act_id, projection).await
    }

    async fn put_record(&self, record: &StoredLeaderboardRecord) -> Result<(), StoreError> {
        if record.player_id == self.fail_player_id {
            return Err(StoreError::InvalidKey(format!(
                "refusing to write {}",
                record.player_id
            )));
        }
        self.inner.put_record(record).await
    }
}
