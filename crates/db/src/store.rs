//! The store abstraction and the read projection.

use async_trait::async_trait;
use valboard_core::leaderboard::Player;
use valboard_core::record::{RecordField, StoredLeaderboardRecord};

use crate::error::{ItemWriteError, StoreError};

/// Default table name.
pub const LEADERBOARD_TABLE: &str = "val_leaderboards";

/// A table of leaderboard rows keyed by `(actid, puuid)`.
///
/// Every operation is a single independent exchange with the backing
/// store. Writes are unconditional overwrites.
#[async_trait]
pub trait LeaderboardStore: Send + Sync {
    fn table_name(&self) -> &str;

    /// Create the table and wait until it is ready.
    async fn create_table(&self) -> Result<(), StoreError>;

    /// Delete the table and wait until it is gone.
    async fn drop_table(&self) -> Result<(), StoreError>;

    /// All rows of `act_id`, restricted to the projected fields. Key
    /// attributes are always returned.
    async fn find_all(
        &self,
        act_id: &str,
        projection: &Projection,
    ) -> Result<Vec<StoredLeaderboardRecord>, StoreError>;

    /// Upsert one row.
    async fn put_record(&self, record: &StoredLeaderboardRecord) -> Result<(), StoreError>;

    /// Write `player` under `act_id`, substituting the sentinel id for
    /// anonymous players. Returns the resolved id; on failure the error
    /// carries it instead.
    async fn add_leaderboard_item(
        &self,
        act_id: &str,
        player: &Player,
    ) -> Result<String, ItemWriteError> {
        let record = StoredLeaderboardRecord::from_player(act_id, player);
        let result = match validate_key(&record) {
            Ok(()) => self.put_record(&record).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(()) => Ok(record.player_id),
            Err(source) => Err(ItemWriteError {
                player_id: record.player_id,
                source,
            }),
        }
    }
}

pub(crate) fn validate_key(record: &StoredLeaderboardRecord) -> Result<(), StoreError> {
    if record.act_id.is_empty() {
        return Err(StoreError::InvalidKey("act id is empty".into()));
    }
    if record.player_id.is_empty() {
        return Err(StoreError::InvalidKey("player id is empty".into()));
    }
    Ok(())
}

/// The non-key fields returned by [`LeaderboardStore::find_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    fields: Vec<RecordField>,
}

impl Projection {
    /// Display name, rank and wins.
    pub fn summary() -> Self {
        Self::fields([RecordField::DisplayName, RecordField::Rank, RecordField::Wins])
    }

    /// Every stored field.
    pub fn all() -> Self {
        Self::fields(RecordField::ALL)
    }

    /// An explicit field set. Key fields and duplicates are dropped; the
    /// key is always projected.
    pub fn fields(fields: impl IntoIterator<Item = RecordField>) -> Self {
        let mut out: Vec<RecordField> = Vec::new();
        for field in fields {
            if !field.is_key() && !out.contains(&field) {
                out.push(field);
            }
        }
        Self { fields: out }
    }

    /// Projected non-key fields.
    pub fn non_key_fields(&self) -> &[RecordField] {
        &self.fields
    }

    /// Attribute names to request, key attributes first.
    pub fn attribute_names(&self) -> Vec<&'static str> {
        [RecordField::ActId, RecordField::PlayerId]
            .into_iter()
            .chain(self.fields.iter().copied())
            .map(RecordField::attribute_name)
            .collect()
    }
}

impl Default for Projection {
    fn default() -> Self {
        Self::summary()
    }
}
