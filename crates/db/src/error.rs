use std::time::Duration;

use aws_sdk_dynamodb::config::http::HttpResponse;
use aws_sdk_dynamodb::error::{BuildError, SdkError};
use aws_sdk_dynamodb::operation::create_table::CreateTableError;
use aws_sdk_dynamodb::operation::delete_table::DeleteTableError;
use aws_sdk_dynamodb::operation::describe_table::DescribeTableError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;
use aws_sdk_dynamodb::operation::scan::ScanError;

/// Errors from the leaderboard store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Table {0} already exists")]
    TableExists(String),

    #[error("Table {0} does not exist")]
    TableNotFound(String),

    #[error("Timed out after {waited:?} waiting for table {table} to become {target}")]
    WaitTimeout {
        table: String,
        target: &'static str,
        waited: Duration,
    },

    /// A key attribute would be empty.
    #[error("Invalid key: {0}")]
    InvalidKey(String),

    /// Record <-> attribute map conversion failed.
    #[error("Attribute marshalling failed: {0}")]
    Marshal(#[from] serde_dynamo::Error),

    /// A request shape could not be built.
    #[error("Invalid request: {0}")]
    Build(#[from] BuildError),

    #[error("CreateTable failed: {0}")]
    CreateTable(#[from] SdkError<CreateTableError, HttpResponse>),

    #[error("DeleteTable failed: {0}")]
    DeleteTable(#[from] SdkError<DeleteTableError, HttpResponse>),

    #[error("DescribeTable failed: {0}")]
    DescribeTable(#[from] SdkError<DescribeTableError, HttpResponse>),

    #[error("Scan failed: {0}")]
    Scan(#[from] SdkError<ScanError, HttpResponse>),

    #[error("PutItem failed: {0}")]
    PutItem(#[from] SdkError<PutItemError, HttpResponse>),
}

/// A failed per-player write, carrying the sort key that was attempted.
#[derive(Debug, thiserror::Error)]
#[error("Failed to write leaderboard item {player_id}: {source}")]
pub struct ItemWriteError {
    /// Resolved player id (possibly the sentinel).
    pub player_id: String,
    #[source]
    pub source: StoreError,
}
