//! DynamoDB-backed [`LeaderboardStore`].
//!
//! The table has a composite key: partition key `actid` and sort key
//! `puuid`, both strings, with 1/1 provisioned throughput. Table
//! creation and deletion poll `DescribeTable` until the change is
//! visible. Scans follow `LastEvaluatedKey` until every page has been
//! read.

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use aws_sdk_dynamodb::types::{
    AttributeDefinition, AttributeValue, KeySchemaElement, KeyType, ProvisionedThroughput,
    ScalarAttributeType, TableStatus,
};
use aws_sdk_dynamodb::Client;
use serde_dynamo::aws_sdk_dynamodb_1::{from_items, to_item};
use tokio::time::Instant;
use valboard_core::config::{env_or, env_parse_or, env_var};
use valboard_core::error::CoreError;
use valboard_core::record::{RecordField, StoredLeaderboardRecord};

use crate::error::StoreError;
use crate::store::{validate_key, LeaderboardStore, Projection, LEADERBOARD_TABLE};

/// Provisioned read and write capacity of the table.
const CAPACITY_UNITS: i64 = 1;

/// Polling parameters for table create/delete.
#[derive(Debug, Clone, Copy)]
pub struct WaitConfig {
    /// Delay between `DescribeTable` calls.
    pub poll_interval: Duration,
    /// Give up after this long.
    pub timeout: Duration,
}

impl Default for WaitConfig {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(2),
            timeout: Duration::from_secs(120),
        }
    }
}

/// Connection settings for [`DynamoLeaderboardStore::connect`].
#[derive(Debug, Clone)]
pub struct DynamoConfig {
    pub table_name: String,
    /// Override the service endpoint, e.g. `http://localhost:8000` for
    /// DynamoDB Local.
    pub endpoint_url: Option<String>,
    pub wait: WaitConfig,
}

impl Default for DynamoConfig {
    fn default() -> Self {
        Self {
            table_name: LEADERBOARD_TABLE.to_string(),
            endpoint_url: None,
            wait: WaitConfig::default(),
        }
    }
}

impl DynamoConfig {
    /// Load configuration from environment variables.
    ///
    /// Credentials and region come from the standard AWS chain
    /// (`AWS_REGION`, `AWS_ACCESS_KEY_ID`, profiles, ...).
    ///
    /// | Env Var                       | Default            |
    /// |-------------------------------|--------------------|
    /// | `DYNAMODB_TABLE`              | `val_leaderboards` |
    /// | `DYNAMODB_ENDPOINT_URL`       | AWS endpoint       |
    /// | `DYNAMODB_WAIT_POLL_MS`       | `2000`             |
    /// | `DYNAMODB_WAIT_TIMEOUT_SECS`  | `120`              |
    pub fn from_env() -> Result<Self, CoreError> {
        let defaults = WaitConfig::default();
        let poll_ms: u64 =
            env_parse_or("DYNAMODB_WAIT_POLL_MS", defaults.poll_interval.as_millis() as u64)?;
        let timeout_secs: u64 =
            env_parse_or("DYNAMODB_WAIT_TIMEOUT_SECS", defaults.timeout.as_secs())?;

        Ok(Self {
            table_name: env_or("DYNAMODB_TABLE", LEADERBOARD_TABLE),
            endpoint_url: env_var("DYNAMODB_ENDPOINT_URL").ok(),
            wait: WaitConfig {
                poll_interval: Duration::from_millis(poll_ms),
                timeout: Duration::from_secs(timeout_secs),
            },
        })
    }
}

/// Observed state of the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableState {
    Absent,
    Pending,
    Active,
}

impl TableState {
    fn label(self) -> &'static str {
        match self {
            TableState::Absent => "absent",
            TableState::Pending => "pending",
            TableState::Active => "active",
        }
    }
}

/// Leaderboard rows in a DynamoDB table.
pub struct DynamoLeaderboardStore {
    client: Client,
    table_name: String,
    wait: WaitConfig,
}

impl DynamoLeaderboardStore {
    pub fn new(client: Client, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
            wait: WaitConfig::default(),
        }
    }

    pub fn with_wait(mut self, wait: WaitConfig) -> Self {
        self.wait = wait;
        self
    }

    /// Build an SDK client from the default AWS configuration chain.
    pub async fn connect(config: DynamoConfig) -> Self {
        let sdk_config = aws_config::load_from_env().await;
        let mut builder = aws_sdk_dynamodb::config::Builder::from(&sdk_config);
        if let Some(endpoint) = &config.endpoint_url {
            tracing::info!(endpoint = %endpoint, "Using DynamoDB endpoint override");
            builder = builder.endpoint_url(endpoint);
        }
        let client = Client::from_conf(builder.build());

        Self::new(client, config.table_name).with_wait(config.wait)
    }

    async fn table_state(&self) -> Result<TableState, StoreError> {
        match self
            .client
            .describe_table()
            .table_name(&self.table_name)
            .send()
            .await
        {
            Ok(output) => Ok(match output.table().and_then(|t| t.table_status()) {
                Some(TableStatus::Active) => TableState::Active,
                _ => TableState::Pending,
            }),
            Err(err)
                if err
                    .as_service_error()
                    .is_some_and(|e| e.is_resource_not_found_exception()) =>
            {
                Ok(TableState::Absent)
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Poll until the table reaches `target` or the wait times out.
    async fn wait_for(&self, target: TableState) -> Result<(), StoreError> {
        let started = Instant::now();
        loop {
            let state = self.table_state().await?;
            if state == target {
                tracing::debug!(
                    table = %self.table_name,
                    state = state.label(),
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Table reached target state"
                );
                return Ok(());
            }

            let waited = started.elapsed();
            if waited >= self.wait.timeout {
                return Err(StoreError::WaitTimeout {
                    table: self.table_name.clone(),
                    target: target.label(),
                    waited,
                });
            }
            tokio::time::sleep(self.wait.poll_interval).await;
        }
    }

    fn table_missing(&self) -> StoreError {
        StoreError::TableNotFound(self.table_name.clone())
    }
}

#[async_trait]
impl LeaderboardStore for DynamoLeaderboardStore {
    fn table_name(&self) -> &str {
        &self.table_name
    }

    async fn create_table(&self) -> Result<(), StoreError> {
        let result = self
            .client
            .create_table()
            .table_name(&self.table_name)
            .set_attribute_definitions(Some(attribute_definitions()?))
            .set_key_schema(Some(key_schema()?))
            .provisioned_throughput(
                ProvisionedThroughput::builder()
                    .read_capacity_units(CAPACITY_UNITS)
                    .write_capacity_units(CAPACITY_UNITS)
                    .build()?,
            )
            .send()
            .await;

        match result {
            Ok(_) => {}
            Err(err)
                if err
                    .as_service_error()
                    .is_some_and(|e| e.is_resource_in_use_exception()) =>
            {
                return Err(StoreError::TableExists(self.table_name.clone()));
            }
            Err(err) => return Err(err.into()),
        }

        tracing::info!(
            table = %self.table_name,
            "Created DynamoDB table, waiting for it to become active"
        );
        self.wait_for(TableState::Active).await
    }

    async fn drop_table(&self) -> Result<(), StoreError> {
        let result = self
            .client
            .delete_table()
            .table_name(&self.table_name)
            .send()
            .await;

        match result {
            Ok(_) => {}
            Err(err)
                if err
                    .as_service_error()
                    .is_some_and(|e| e.is_resource_not_found_exception()) =>
            {
                return Err(self.table_missing());
            }
            Err(err) => return Err(err.into()),
        }

        tracing::info!(
            table = %self.table_name,
            "Deleted DynamoDB table, waiting for it to disappear"
        );
        self.wait_for(TableState::Absent).await
    }

    async fn find_all(
        &self,
        act_id: &str,
        projection: &Projection,
    ) -> Result<Vec<StoredLeaderboardRecord>, StoreError> {
        let expressions = ScanExpressions::new(projection);
        let mut records = Vec::new();
        let mut start_key: Option<HashMap<String, AttributeValue>> = None;
        let mut pages = 0u32;

        loop {
            let result = self
                .client
                .scan()
                .table_name(&self.table_name)
                .filter_expression(&expressions.filter)
                .projection_expression(&expressions.projection)
                .set_expression_attribute_names(Some(expressions.names.clone()))
                .expression_attribute_values(
                    ACT_ID_VALUE,
                    AttributeValue::S(act_id.to_string()),
                )
                .set_exclusive_start_key(start_key.take())
                .send()
                .await;

            let output = match result {
                Ok(output) => output,
                Err(err)
                    if err
                        .as_service_error()
                        .is_some_and(|e| e.is_resource_not_found_exception()) =>
                {
                    return Err(self.table_missing());
                }
                Err(err) => return Err(err.into()),
            };
            pages += 1;

            if let Some(items) = output.items {
                records.extend(from_items::<StoredLeaderboardRecord>(items)?);
            }

            match output.last_evaluated_key {
                Some(key) if !key.is_empty() => start_key = Some(key),
                _ => break,
            }
        }

        tracing::debug!(
            table = %self.table_name,
            act_id,
            pages,
            rows = records.len(),
            "Scanned leaderboard rows"
        );
        Ok(records)
    }

    async fn put_record(&self, record: &StoredLeaderboardRecord) -> Result<(), StoreError> {
        validate_key(record)?;
        let item: HashMap<String, AttributeValue> = to_item(record)?;

        let result = self
            .client
            .put_item()
            .table_name(&self.table_name)
            .set_item(Some(item))
            .send()
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(err)
                if err
                    .as_service_error()
                    .is_some_and(|e| e.is_resource_not_found_exception()) =>
            {
                Err(self.table_missing())
            }
            Err(err) => Err(err.into()),
        }
    }
}

// ---------------------------------------------------------------------------
// Request shapes
// ---------------------------------------------------------------------------

const ACT_ID_NAME: &str = "#actid";
const ACT_ID_VALUE: &str = ":actid";

fn attribute_definitions() -> Result<Vec<AttributeDefinition>, StoreError> {
    [RecordField::ActId, RecordField::PlayerId]
        .into_iter()
        .map(|field| {
            AttributeDefinition::builder()
                .attribute_name(field.attribute_name())
                .attribute_type(ScalarAttributeType::S)
                .build()
                .map_err(StoreError::from)
        })
        .collect()
}

fn key_schema() -> Result<Vec<KeySchemaElement>, StoreError> {
    [
        (RecordField::ActId, KeyType::Hash),
        (RecordField::PlayerId, KeyType::Range),
    ]
    .into_iter()
    .map(|(field, key_type)| {
        KeySchemaElement::builder()
            .attribute_name(field.attribute_name())
            .key_type(key_type)
            .build()
            .map_err(StoreError::from)
    })
    .collect()
}

/// Filter and projection expressions for a scan of one act.
///
/// Attribute names always go through placeholders so that reserved
/// words never reach the expression text.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ScanExpressions {
    filter: String,
    projection: String,
    names: HashMap<String, String>,
}

impl ScanExpressions {
    fn new(projection: &Projection) -> Self {
        let mut names = HashMap::new();
        names.insert(
            ACT_ID_NAME.to_string(),
            RecordField::ActId.attribute_name().to_string(),
        );

        let placeholders: Vec<String> = projection
            .attribute_names()
            .into_iter()
            .enumerate()
            .map(|(i, name)| {
                let placeholder = format!("#p{i}");
                names.insert(placeholder.clone(), name.to_string());
                placeholder
            })
            .collect();

        Self {
            filter: format!("{ACT_ID_NAME} = {ACT_ID_VALUE}"),
            projection: placeholders.join(", "),
            names,
        }
    }
}
