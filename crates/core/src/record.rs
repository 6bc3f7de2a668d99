//! The per-player row persisted in the leaderboard table.

use serde::{Deserialize, Serialize};

use crate::leaderboard::Player;

/// Sort-key placeholder for players the API returns without a puuid.
pub const NOT_AVAILABLE_PLAYER_ID: &str = "NOT-AVAILABLE";

/// A leaderboard row keyed by `(act_id, player_id)`.
///
/// Serialized field names are the table's attribute names. Non-key
/// attributes default when missing so that projected reads decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoredLeaderboardRecord {
    #[serde(rename = "actid")]
    pub act_id: String,
    #[serde(rename = "puuid")]
    pub player_id: String,
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

impl StoredLeaderboardRecord {
    /// Build the row for `player` in `act_id`, substituting the sentinel id
    /// when the player has none.
    pub fn from_player(act_id: &str, player: &Player) -> Self {
        Self {
            act_id: act_id.to_string(),
            player_id: player.resolved_id().to_string(),
            display_name: player.display_name.clone(),
            tag: player.tag.clone(),
            rank: player.rank,
            rating: player.rating,
            wins: player.wins,
        }
    }

    /// Copy of this record keeping only the key and the given fields;
    /// everything else is reset to its default.
    pub fn project(&self, fields: &[RecordField]) -> Self {
        let mut out = Self {
            act_id: self.act_id.clone(),
            player_id: self.player_id.clone(),
            ..Default::default()
        };
        for field in fields {
            match field {
                RecordField::ActId | RecordField::PlayerId => {}
                RecordField::DisplayName => out.display_name = self.display_name.clone(),
                RecordField::Tag => out.tag = self.tag.clone(),
                RecordField::Rank => out.rank = self.rank,
                RecordField::Rating => out.rating = self.rating,
                RecordField::Wins => out.wins = self.wins,
            }
        }
        out
    }
}

/// A stored attribute of [`StoredLeaderboardRecord`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordField {
    ActId,
    PlayerId,
    DisplayName,
    Tag,
    Rank,
    Rating,
    Wins,
}

impl RecordField {
    pub const ALL: [RecordField; 7] = [
        RecordField::ActId,
        RecordField::PlayerId,
        RecordField::DisplayName,
        RecordField::Tag,
        RecordField::Rank,
        RecordField::Rating,
        RecordField::Wins,
    ];

    /// Attribute name in the table.
    pub fn attribute_name(self) -> &'static str {
        match self {
            RecordField::ActId => "actid",
            RecordField::PlayerId => "puuid",
            RecordField::DisplayName => "gameName",
            RecordField::Tag => "tagLine",
            RecordField::Rank => "leaderboardRank",
            RecordField::Rating => "rankedRating",
            RecordField::Wins => "numberOfWins",
        }
    }

    pub fn is_key(self) -> bool {
        matches!(self, RecordField::ActId | RecordField::PlayerId)
    }
}
