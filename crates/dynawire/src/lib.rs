//! Async DynamoDB client.
//!
//! Requests are built with immutable, chainable builders obtained from a
//! [`Client`]. Each `execute()` performs one signed HTTP round trip through
//! the [`Executor`] the client was created with.
//!
//! ```no_run
//! # async fn demo() -> dynawire::Result<()> {
//! use dynawire::{Client, ClientConfig, Document};
//!
//! let client = Client::new(&ClientConfig::from_env()?)?;
//! client
//!     .put_item("People", Document::new().with("Id", 1).with("Name", "Bob"))
//!     .execute()
//!     .await?;
//!
//! let found = client
//!     .get_item("People", Document::hash_key("Id", 1))
//!     .execute()
//!     .await?;
//! assert_eq!(found.item.unwrap().get_string("Name").ok().flatten(), Some("Bob"));
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`config`] - Endpoint, credentials, timeout and debug settings
//! - [`dispatch`] - Signed request transport with a response size ceiling
//! - [`executor`] - The seam between builders and the transport
//! - [`mock`] - Recording executor for tests
//! - [`request`] - Operation builders and page results

pub mod client;
pub mod config;
mod cursor;
pub mod dispatch;
pub mod error;
pub mod executor;
pub mod mock;
pub mod request;

pub use client::Client;
pub use config::{ClientConfig, DebugFlags, DebugSink};
pub use dispatch::{MAX_RESPONSE_SIZE, RequestMaker, Requester};
pub use error::{Error, Result, ServiceError};
pub use executor::{AwsExecutor, Executor, SchemaExecutor};
pub use request::{
    BatchGet, BatchGetResult, BatchWrite, BatchWriteResult, DeleteItem, DeleteItemResult, GetItem,
    GetItemResult, ListTables, ListTablesResult, PutItem, PutItemResult, Query, QueryResult, Scan,
    ScanResult, UpdateItem, UpdateItemResult,
};

pub use dynawire_auth::Credentials;
pub use dynawire_model::{
    Document, ErrorKind, IntoParams, Number, Operation, Param, Value, input, output, types,
};
