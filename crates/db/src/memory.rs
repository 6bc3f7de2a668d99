//! In-process [`LeaderboardStore`] used for tests and dry runs.
//!
//! Mirrors the DynamoDB table lifecycle: the table must be created
//! before it can be read or written, creating an existing table fails,
//! and dropping a missing table fails.

use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use valboard_core::record::StoredLeaderboardRecord;

use crate::error::StoreError;
use crate::store::{LeaderboardStore, Projection, LEADERBOARD_TABLE};

type Rows = BTreeMap<(String, String), StoredLeaderboardRecord>;

pub struct MemoryLeaderboardStore {
    table_name: String,
    /// `None` while the table does not exist.
    table: Mutex<Option<Rows>>,
}

impl MemoryLeaderboardStore {
    /// A store whose table has not been created yet.
    pub fn new() -> Self {
        Self::named(LEADERBOARD_TABLE)
    }

    pub fn named(table_name: impl Into<String>) -> Self {
        Self {
            table_name: table_name.into(),
            table: Mutex::new(None),
        }
    }

    /// A store whose table already exists and is empty.
    pub fn with_table() -> Self {
        let store = Self::new();
        *store.lock() = Some(Rows::new());
        store
    }

    /// Number of rows across all acts, or `None` if the table is absent.
    pub fn row_count(&self) -> Option<usize> {
        self.lock().as_ref().map(BTreeMap::len)
    }

    fn lock(&self) -> MutexGuard<'_, Option<Rows>> {
        self.table.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn missing(&self) -> StoreError {
        StoreError::TableNotFound(self.table_name.clone())
    }
}

impl Default for MemoryLeaderboardStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl LeaderboardStore for MemoryLeaderboardStore {
    fn table_name(&self) -> &str {
        &self.table_name
    }

    async fn create_table(&self) -> Result<(), StoreError> {
        let mut table = self.lock();
        if table.is_some() {
            return Err(StoreError::TableExists(self.table_name.clone()));
        }
        *table = Some(Rows::new());
        tracing::info!(table = %self.table_name, "Created in-memory leaderboard table");
        Ok(())
    }

    async fn drop_table(&self) -> Result<(), StoreError> {
        match self.lock().take() {
            Some(rows) => {
                tracing::info!(
                    table = %self.table_name,
                    rows = rows.len(),
                    "Dropped in-memory leaderboard table"
                );
                Ok(())
            }
            None => Err(self.missing()),
        }
    }

    async fn find_all(
        &self,
        act_id: &str,
        projection: &Projection,
    ) -> Result<Vec<StoredLeaderboardRecord>, StoreError> {
        let table = self.lock();
        let rows = table.as_ref().ok_or_else(|| self.missing())?;
        Ok(rows
            .values()
            .filter(|record| record.act_id == act_id)
            .map(|record| record.project(projection.non_key_fields()))
            .collect())
    }

    async fn put_record(&self, record: &StoredLeaderboardRecord) -> Result<(), StoreError> {
        crate::store::validate_key(record)?;
        let mut table = self.lock();
        let rows = table.as_mut().ok_or_else(|| self.missing())?;
        rows.insert(
            (record.act_id.clone(), record.player_id.clone()),
            record.clone(),
        );
        Ok(())
    }
}
