//! Persistence for leaderboard rows.
//!
//! [`LeaderboardStore`] is implemented by [`DynamoLeaderboardStore`]
//! (the `val_leaderboards` DynamoDB table) and [`MemoryLeaderboardStore`]
//! (an in-process table with the same semantics).

pub mod dynamo;
pub mod error;
pub mod memory;
pub mod store;

pub use dynamo::{DynamoConfig, DynamoLeaderboardStore, WaitConfig};
pub use error::{ItemWriteError, StoreError};
pub use memory::MemoryLeaderboardStore;
pub use store::{LeaderboardStore, Projection, LEADERBOARD_TABLE};
