//! Operation builders.
//!
//! Every builder is an immutable value. Chaining methods take `&self` and
//! return a new builder, so a partially configured request can be kept as a
//! template and forked from any number of tasks. Bound expression
//! parameters are shared between forks until one of them binds more.
//!
//! ```no_run
//! # async fn demo(client: dynawire::Client) -> dynawire::Result<()> {
//! use dynawire::Param;
//!
//! let base = client
//!     .query("Orders")
//!     .key_condition_expression("CustomerId = :c", Param::new(":c", "alice"));
//!
//! let recent = base.filter_expression("Total > :t", Param::new(":t", 100)).desc();
//! let mut page = recent.execute().await?;
//! while let Some(next) = page.next() {
//!     page = next.execute().await?;
//! }
//! # Ok(())
//! # }
//! ```

mod batch_get;
mod batch_write;
mod delete_item;
mod get_item;
mod put_item;
mod query;
mod scan;
mod tables;
mod update_item;

use dynawire_model::{
    Document, ExpressionAttributes, IntoParams, ParamError, encode_document,
};

pub use batch_get::{BatchGet, BatchGetResult};
pub use batch_write::{BatchWrite, BatchWriteResult};
pub use delete_item::{DeleteItem, DeleteItemResult};
pub use get_item::{GetItem, GetItemResult};
pub use put_item::{PutItem, PutItemResult};
pub use query::{Query, QueryResult};
pub use scan::{Scan, ScanResult};
pub use tables::{ListTables, ListTablesResult};
pub use update_item::{UpdateItem, UpdateItemResult};

use crate::error::{Error, Result};

/// Bind `params` onto `attributes`. The first failure is kept and later
/// bindings are skipped.
pub(crate) fn bind_params(
    attributes: &mut ExpressionAttributes,
    error: &mut Option<ParamError>,
    params: impl IntoParams,
) {
    if error.is_some() {
        return;
    }
    match attributes.add_params(params) {
        Ok(bound) => *attributes = bound,
        Err(err) => *error = Some(err),
    }
}

/// Fail with the recorded parameter error, if any.
pub(crate) fn check_params(error: Option<&ParamError>) -> Result<()> {
    match error {
        Some(err) => Err(Error::InvalidParam(err.clone())),
        None => Ok(()),
    }
}

/// Encode `documents` up front so a value with no wire form fails as
/// [`Error::Encode`] before anything is sent.
pub(crate) fn check_documents<'a>(
    documents: impl IntoIterator<Item = &'a Document>,
) -> Result<()> {
    for document in documents {
        encode_document(document)?;
    }
    Ok(())
}

/// `param` / `params` for builders that carry expression attributes.
macro_rules! impl_params {
    ($builder:ty) => {
        impl $builder {
            /// Bind one `:value` placeholder or `#name` alias.
            pub fn param(
                &self,
                key: impl Into<String>,
                value: impl Into<dynawire_model::Value>,
            ) -> Self {
                self.params(dynawire_model::Param::new(key, value))
            }

            /// Bind placeholders and aliases.
            pub fn params(&self, params: impl dynawire_model::IntoParams) -> Self {
                let mut next = self.clone();
                crate::request::bind_params(
                    &mut next.input.expression_attributes,
                    &mut next.param_error,
                    params,
                );
                next
            }
        }
    };
}

pub(crate) use impl_params;
