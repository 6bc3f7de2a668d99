//! Local stand-in for the Riot API, served by axum on an ephemeral port.

use std::collections::HashMap;

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use valboard_riot::RiotApiConfig;

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

pub fn config(base_url: &str) -> RiotApiConfig {
    RiotApiConfig::new("latam", API_KEY).with_base_url(base_url)
}

/// A well-behaved Riot API with one active act (`A1`) whose leaderboard
/// echoes the requested page parameters in `shard`.
pub fn riot_router() -> Router {
    Router::new()
        .route("/val/content/v1/contents", get(contents))
        .route("/val/ranked/v1/leaderboards/by-act/{act_id}", get(leaderboard))
}

fn forbidden() -> Response {
    (
        StatusCode::FORBIDDEN,
        Json(json!({"status": {"message": "Forbidden", "status_code": 403}})),
    )
        .into_response()
}

async fn contents(Query(params): Query<HashMap<String, String>>) -> Response {
    if params.get("api_key").map(String::as_str) != Some(API_KEY) {
        return forbidden();
    }
    if params.get("locale").map(String::as_str) != Some("en-US") {
        return (StatusCode::BAD_REQUEST, "missing locale").into_response();
    }
    Json(json!({
        "version": "release-08.00",
        "characters": [{"name": "Jett", "id": "add6443a", "assetName": "Wushu_PrimaryAsset"}],
        "acts": [
            {"name": "EPISODE 8", "id": "E8", "isActive": true, "type": "episode"},
            {"name": "ACT III", "id": "A0", "isActive": false, "type": "act"},
            {"name": "ACT I", "id": "A1", "isActive": true, "type": "act"}
        ]
    }))
    .into_response()
}

async fn leaderboard(
    Path(act_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if params.get("api_key").map(String::as_str) != Some(API_KEY) {
        return forbidden();
    }
    if act_id != "A1" {
        return (StatusCode::NOT_FOUND, "unknown act").into_response();
    }
    let size = params.get("size").cloned().unwrap_or_default();
    let start = params.get("startIndex").cloned().unwrap_or_default();
    Json(json!({
        "shard": format!("latam size={size} start={start}"),
        "actId": act_id,
        "totalPlayers": 3,
        "players": [
            {"puuid": "p-1", "gameName": "Foo", "tagLine": "1234",
             "leaderboardRank": 1, "rankedRating": 999, "numberOfWins": 10},
            {"puuid": "", "gameName": "Secret", "tagLine": "0000",
             "leaderboardRank": 2, "rankedRating": 950, "numberOfWins": 9},
            {"gameName": "Private", "tagLine": "",
             "leaderboardRank": 3, "rankedRating": 900, "numberOfWins": 8}
        ]
    }))
    .into_response()
}
