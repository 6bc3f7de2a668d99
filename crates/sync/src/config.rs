use valboard_core::config::{env_flag, env_var};
use valboard_core::error::CoreError;
use valboard_db::DynamoConfig;
use valboard_riot::RiotApiConfig;

use crate::pipeline::SyncOptions;

/// Everything the binary needs, loaded from environment variables.
#[derive(Debug, Clone)]
pub struct SyncConfig {
    pub riot: RiotApiConfig,
    pub dynamo: DynamoConfig,
    pub options: SyncOptions,
    /// Write into an in-memory table instead of DynamoDB.
    pub dry_run: bool,
}

impl SyncConfig {
    /// Load configuration from environment variables.
    ///
    /// Besides the `RIOT_*` and `DYNAMODB_*` variables read by
    /// [`RiotApiConfig::from_env`] and [`DynamoConfig::from_env`]:
    ///
    /// | Env Var                  | Default |
    /// |--------------------------|---------|
    /// | `SYNC_RESET_TABLE`       | `false` |
    /// | `SYNC_REQUIRE_UNIQUE_ACT`| `false` |
    /// | `SYNC_ACT_ID`            | --      |
    /// | `SYNC_DRY_RUN`           | `false` |
    pub fn from_env() -> Result<Self, CoreError> {
        Ok(Self {
            riot: RiotApiConfig::from_env()?,
            dynamo: DynamoConfig::from_env()?,
            options: SyncOptions {
                reset_table: env_flag("SYNC_RESET_TABLE", false)?,
                require_unique_act: env_flag("SYNC_REQUIRE_UNIQUE_ACT", false)?,
                act_id: env_var("SYNC_ACT_ID").ok(),
            },
            dry_run: env_flag("SYNC_DRY_RUN", false)?,
        })
    }
}
