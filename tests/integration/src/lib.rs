//! End-to-end tests for dynawire.
//!
//! These tests need a DynamoDB-compatible endpoint, such as DynamoDB Local
//! at `localhost:8000`. They are marked `#[ignore]` so they don't run during
//! normal `cargo test`.
//!
//! Run them with:
//! ```text
//! DYNAWIRE_ENDPOINT_URL=http://localhost:8000 \
//! AWS_ACCESS_KEY_ID=test AWS_SECRET_ACCESS_KEY=test \
//!     cargo test -p dynawire-integration -- --ignored
//! ```

use std::sync::Once;
use std::time::Duration;

use dynawire::input::CreateTableInput;
use dynawire::types::{AttributeType, TableDescription};
use dynawire::{Client, ClientConfig};

const DEFAULT_ENDPOINT: &str = "http://localhost:8000";

static INIT: Once = Once::new();

/// Initialize tracing (once).
fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
            )
            .with_test_writer()
            .init();
    });
}

/// Configuration for the test endpoint. Unset variables fall back to a
/// local endpoint with dummy credentials.
#[must_use]
pub fn config() -> ClientConfig {
    init_tracing();
    let config = ClientConfig::from_lookup(|name| {
        std::env::var(name).ok().or_else(|| match name {
            "DYNAWIRE_ENDPOINT_URL" => Some(DEFAULT_ENDPOINT.to_owned()),
            "AWS_ACCESS_KEY_ID" | "AWS_SECRET_ACCESS_KEY" => Some("test".to_owned()),
            _ => None,
        })
    })
    .unwrap_or_else(|e| panic!("invalid test configuration: {e}"));
    config.with_timeout(Duration::from_secs(10))
}

/// A client for the test endpoint.
#[must_use]
pub fn client() -> Client {
    Client::new(&config()).unwrap_or_else(|e| panic!("failed to build client: {e}"))
}

/// Generate a unique table name for a test.
#[must_use]
pub fn test_table_name(prefix: &str) -> String {
    let id = uuid::Uuid::new_v4().to_string()[..8].to_owned();
    format!("test-{prefix}-{id}")
}

/// Create a table keyed by a numeric `Id`.
pub async fn create_hash_table(client: &Client, prefix: &str) -> String {
    let name = test_table_name(prefix);
    create_table(client, CreateTableInput::new(&name).hash_key("Id", AttributeType::N)).await;
    name
}

/// Create a table keyed by a string `Owner` and a numeric `Seq`.
pub async fn create_range_table(client: &Client, prefix: &str) -> String {
    let name = test_table_name(prefix);
    create_table(
        client,
        CreateTableInput::new(&name)
            .hash_key("Owner", AttributeType::S)
            .range_key("Seq", AttributeType::N),
    )
    .await;
    name
}

async fn create_table(client: &Client, input: CreateTableInput) -> TableDescription {
    let name = input.table_name.clone();
    client
        .create_table(input)
        .await
        .unwrap_or_else(|e| panic!("failed to create table {name}: {e}"))
}

/// Delete a table, ignoring errors.
pub async fn cleanup_table(client: &Client, table: &str) {
    if let Err(e) = client.delete_table(table).await {
        tracing::warn!(table, error = %e, "failed to delete test table");
    }
}

mod test_batch;
mod test_items;
mod test_query;
mod test_streams;
mod test_tables;
