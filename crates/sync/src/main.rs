//! `valboard-sync` -- one-shot Valorant leaderboard sync.
//!
//! Resolves the active act from the Riot content feed, downloads its
//! ranked leaderboard, and upserts one row per player into the
//! `val_leaderboards` DynamoDB table.
//!
//! # Environment variables
//!
//! | Variable                       | Default            | Description                  |
//! |--------------------------------|--------------------|------------------------------|
//! | `RIOT_API_KEY`                 | required           | Riot developer API key       |
//! | `RIOT_REGION`                  | `latam`            | Regional routing value       |
//! | `RIOT_BASE_URL`                | regional host      | Overrides the regional host  |
//! | `RIOT_LOCALE`                  | `en-US`            | Content feed locale          |
//! | `RIOT_LEADERBOARD_PAGE_SIZE`   | `200`              | Players per request (1-200)  |
//! | `RIOT_LEADERBOARD_START_INDEX` | `0`                | First player requested       |
//! | `DYNAMODB_TABLE`               | `val_leaderboards` | Target table                 |
//! | `DYNAMODB_ENDPOINT_URL`        | --                 | e.g. `http://localhost:8000` |
//! | `DYNAMODB_WAIT_POLL_MS`        | `2000`             | Table status poll interval   |
//! | `DYNAMODB_WAIT_TIMEOUT_SECS`   | `120`              | Table wait limit             |
//! | `SYNC_ACT_ID`                  | --                 | Sync this act instead        |
//! | `SYNC_REQUIRE_UNIQUE_ACT`      | `false`            | Fail on several active acts  |
//! | `SYNC_RESET_TABLE`             | `false`            | Drop and recreate the table  |
//! | `SYNC_DRY_RUN`                 | `false`            | Write to an in-memory table  |
//!
//! AWS credentials and region come from the standard AWS environment.

use valboard_db::{DynamoLeaderboardStore, LeaderboardStore, MemoryLeaderboardStore};
use valboard_riot::LeaderboardFetcher;
use valboard_sync::{LeaderboardSync, SyncConfig, SyncOptions};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "valboard_sync=info,valboard_riot=info,valboard_db=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = SyncConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        std::process::exit(1);
    });

    tracing::info!(
        base_url = %config.riot.base_url,
        table = %config.dynamo.table_name,
        dry_run = config.dry_run,
        reset_table = config.options.reset_table,
        "Starting valboard-sync",
    );

    let fetcher = LeaderboardFetcher::new(config.riot);
    let ok = if config.dry_run {
        let store = MemoryLeaderboardStore::with_table();
        run(LeaderboardSync::new(fetcher, store), &config.options).await
    } else {
        let store = DynamoLeaderboardStore::connect(config.dynamo).await;
        run(LeaderboardSync::new(fetcher, store), &config.options).await
    };

    if !ok {
        std::process::exit(1);
    }
}

/// Run one pass and report it. Returns `false` if anything failed.
async fn run<S: LeaderboardStore>(sync: LeaderboardSync<S>, options: &SyncOptions) -> bool {
    match sync.run(options).await {
        Ok(report) if report.is_complete() => true,
        Ok(report) => {
            for failure in &report.failures {
                tracing::warn!(
                    player_id = %failure.player_id,
                    error = %failure.error,
                    "Unwritten player"
                );
            }
            tracing::error!(
                failed = report.failures.len(),
                written = report.written,
                "Leaderboard sync finished with failures"
            );
            false
        }
        Err(e) => {
            tracing::error!(error = %e, "Leaderboard sync failed");
            false
        }
    }
}
