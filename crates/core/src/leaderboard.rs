//! Ranked leaderboard models (`/val/ranked/v1/leaderboards/by-act/{actId}`).

use serde::{Deserialize, Serialize};

use crate::record::NOT_AVAILABLE_PLAYER_ID;

/// One ranked leaderboard entry.
///
/// Anonymous players come back without a `puuid` (or with an empty one);
/// [`Player::resolved_id`] substitutes the sentinel for them.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Player {
    #[serde(rename = "puuid", skip_serializing_if = "Option::is_none")]
    pub player_id: Option<String>,
    #[serde(rename = "gameName")]
    pub display_name: String,
    #[serde(rename = "tagLine")]
    pub tag: String,
    #[serde(rename = "leaderboardRank")]
    pub rank: i64,
    #[serde(rename = "rankedRating")]
    pub rating: i64,
    #[serde(rename = "numberOfWins")]
    pub wins: i64,
}

impl Player {
    /// The player id used as sort key: the puuid, or
    /// [`NOT_AVAILABLE_PLAYER_ID`] when it is absent or empty.
    pub fn resolved_id(&self) -> &str {
        match self.player_id.as_deref() {
            Some(id) if !id.is_empty() => id,
            _ => NOT_AVAILABLE_PLAYER_ID,
        }
    }
}

/// One page of a ranked leaderboard for an act and shard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Leaderboard {
    pub shard: String,
    pub act_id: String,
    pub total_players: i64,
    pub players: Vec<Player>,
}
