use std::sync::Arc;

use dynawire_model::input::GetItemInput;
use dynawire_model::output::GetItemOutput;
use dynawire_model::types::CapacityDetail;
use dynawire_model::{Document, IntoParams, ParamError};

use super::{bind_params, check_documents, check_params, impl_params};
use crate::error::Result;
use crate::executor::Executor;

/// Result of a get. `item` is `None` when no item has the key.
pub type GetItemResult = GetItemOutput;

/// Reads one item by primary key.
#[derive(Debug, Clone)]
#[must_use = "builders do nothing until executed"]
pub struct GetItem {
    executor: Arc<dyn Executor>,
    input: GetItemInput,
    param_error: Option<ParamError>,
}

impl GetItem {
    pub(crate) fn new(
        executor: Arc<dyn Executor>,
        table: impl Into<String>,
        key: Document,
    ) -> Self {
        Self {
            executor,
            input: GetItemInput {
                table_name: table.into(),
                key,
                ..Default::default()
            },
            param_error: None,
        }
    }

    /// Only return these attributes.
    pub fn projection_expression(
        &self,
        expression: impl Into<String>,
        params: impl IntoParams,
    ) -> Self {
        let mut next = self.clone();
        next.input.projection_expression = Some(expression.into());
        bind_params(
            &mut next.input.expression_attributes,
            &mut next.param_error,
            params,
        );
        next
    }

    /// Use a strongly consistent read.
    pub fn consistent_read(&self, consistent: bool) -> Self {
        let mut next = self.clone();
        next.input.consistent_read = consistent;
        next
    }

    /// Ask for consumed capacity in the result.
    pub fn return_consumed_capacity(&self, detail: CapacityDetail) -> Self {
        let mut next = self.clone();
        next.input.return_consumed_capacity = Some(detail);
        next
    }

    /// The request as it will be sent.
    #[must_use]
    pub fn input(&self) -> &GetItemInput {
        &self.input
    }

    /// Send the request.
    pub async fn execute(&self) -> Result<GetItemResult> {
        check_params(self.param_error.as_ref())?;
        check_documents([
            &self.input.key,
            self.input.expression_attributes.values(),
        ])?;
        self.executor.get_item(self).await
    }
}

impl_params!(GetItem);
